use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::{AnswerId, CategoryId, QuestionId, SectionId};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PAGE_SIZE: u64 = 100;

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[\w.@+-]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

static LETTER_REGEX: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\p{L}").expect("LETTER_REGEX is a valid regex pattern"));

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !USERNAME_REGEX.is_match(username) {
        return Err(validation_error(
            "username",
            "Username may contain only letters, digits and @/./+/-/_",
        ));
    }
    Ok(())
}

/// Password rules: a minimum length and at least one letter.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(validation_error(
            "password_too_short",
            "Password must be at least 8 characters long",
        ));
    }
    if !LETTER_REGEX.is_match(password) {
        return Err(validation_error(
            "password_no_letter",
            "Password must contain at least one letter",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(
        length(min = 1, max = 150),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(
        custom(function = "validate_password_strength"),
        must_match(other = "password2", message = "Passwords do not match")
    )]
    pub password: String,

    pub password2: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_password_confirmation"))]
pub struct UpdateAccountRequest {
    #[validate(
        length(min = 1, max = 150),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,

    pub password2: Option<String>,
}

/// A new password must arrive together with a matching `password2`.
fn validate_password_confirmation(request: &UpdateAccountRequest) -> Result<(), ValidationError> {
    match (&request.password, &request.password2) {
        (Some(password), Some(password2)) if password == password2 => Ok(()),
        (Some(_), Some(_)) => Err(validation_error(
            "password_mismatch",
            "Passwords do not match",
        )),
        (Some(_), None) => Err(validation_error(
            "password2_required",
            "password2 is required when changing the password",
        )),
        (None, _) => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSectionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSectionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContentRequest {
    pub section_id: SectionId,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContentRequest {
    pub section_id: Option<SectionId>,

    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub category_id: CategoryId,

    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    pub category_id: Option<CategoryId>,

    #[validate(length(min = 1))]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    pub question_id: QuestionId,

    #[validate(length(min = 1, max = 255))]
    pub text: String,

    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnswerRequest {
    pub question_id: Option<QuestionId>,

    #[validate(length(min = 1, max = 255))]
    pub text: Option<String>,

    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckAnswerRequest {
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
}

/// Page-number pagination as accepted on list endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_page_window"))]
pub struct PaginationParams {
    #[validate(range(min = 1))]
    pub page: Option<u64>,

    #[validate(range(min = 1))]
    pub page_size: Option<u64>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self, default_size: u64) -> u64 {
        self.page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self, default_size: u64) -> u64 {
        (self.page() - 1).saturating_mul(self.page_size(default_size))
    }
}

/// The skip handed to the store is an `i64`, so the furthest reachable page
/// is bounded by the largest page size.
const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE + 1;

fn validate_page_window(params: &PaginationParams) -> Result<(), ValidationError> {
    if params.page() > MAX_PAGE {
        return Err(validation_error("page_out_of_range", "Page number is too large"));
    }
    Ok(())
}
