use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::domain::{
    Account, AccountId, Answer, AnswerId, CategoryId, Content, ContentId, Question,
    QuestionCategory, QuestionId, Section, SectionId,
};

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct AccountDto {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_superuser: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        AccountDto {
            id: account.id,
            username: account.username,
            email: account.email,
            phone_number: account.phone_number,
            birth_date: account.birth_date,
            is_superuser: account.is_superuser,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionDto {
    pub id: SectionId,
    /// Username of the owning account.
    pub owner: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SectionDto {
    pub fn new(section: Section, owner: String) -> Self {
        SectionDto {
            id: section.id,
            owner,
            title: section.title,
            description: section.description,
            created_at: section.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentDto {
    pub id: ContentId,
    pub section_id: SectionId,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Content> for ContentDto {
    fn from(content: Content) -> Self {
        ContentDto {
            id: content.id,
            section_id: content.section_id,
            title: content.title,
            text: content.text,
            created_at: content.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
}

impl From<QuestionCategory> for CategoryDto {
    fn from(category: QuestionCategory) -> Self {
        CategoryDto {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub id: QuestionId,
    pub category: CategoryDto,
    pub text: String,
}

impl QuestionDto {
    pub fn new(question: Question, category: QuestionCategory) -> Self {
        QuestionDto {
            id: question.id,
            category: category.into(),
            text: question.text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerDto {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub text: String,
    pub is_correct: bool,
}

impl From<Answer> for AnswerDto {
    fn from(answer: Answer) -> Self {
        AnswerDto {
            id: answer.id,
            question_id: answer.question_id,
            text: answer.text,
            is_correct: answer.is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckAnswerResponse {
    pub question_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub results: Vec<T>,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(results: Vec<T>, count: u64, page: u64, page_size: u64) -> Self {
        PaginatedResponse {
            count,
            page,
            page_size,
            results,
        }
    }
}
