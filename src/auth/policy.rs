//! Access rules for every resource the API exposes.
//!
//! All decisions go through [`authorize`], a pure function of the caller's
//! identity, the action and the target. Content carries no owner of its own,
//! so content targets are expressed through the parent section.

use crate::{
    auth::identity::{Identity, Principal},
    errors::{AppError, AppResult},
    models::domain::{AccountId, Section},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn is_read(self) -> bool {
        matches!(self, Action::Read)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizResource {
    Category,
    Question,
    Answer,
    /// Submitting an answer for checking.
    AnswerCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The account collection: listing and creating accounts.
    Accounts,
    Account(AccountId),
    /// The section collection: listing and creating sections.
    Sections,
    Section(&'a Section),
    /// The content collection, before any parent section is known.
    Contents,
    /// Content addressed through its parent section. For `Create` this is
    /// the section that would receive the new content.
    Content(&'a Section),
    Quiz(QuizResource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    NotSuperuser,
    NotSelf,
    NotOwner,
    NotSectionOwner,
}

impl Denial {
    pub fn message(self) -> &'static str {
        match self {
            Denial::Unauthenticated => "Authentication credentials were not provided",
            Denial::NotSuperuser => "Only superusers can perform this action",
            Denial::NotSelf => "You can only access your own account",
            Denial::NotOwner => "You do not own this section",
            Denial::NotSectionOwner => "You do not own the section this content belongs to",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> AppResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(Denial::Unauthenticated) => Err(AppError::Unauthorized(
                Denial::Unauthenticated.message().to_string(),
            )),
            Decision::Deny(denial) => Err(AppError::Forbidden(denial.message().to_string())),
        }
    }
}

fn allow_if(condition: bool, denial: Denial) -> Decision {
    if condition {
        Decision::Allow
    } else {
        Decision::Deny(denial)
    }
}

fn owns(principal: &Principal, section: &Section) -> bool {
    principal.is_superuser || section.owner_id == principal.id
}

pub fn authorize(identity: &Identity, action: Action, target: Target<'_>) -> Decision {
    let Identity::Account(principal) = identity else {
        return Decision::Deny(Denial::Unauthenticated);
    };

    match target {
        Target::Accounts => allow_if(principal.is_superuser, Denial::NotSuperuser),
        Target::Account(id) => allow_if(
            principal.is_superuser || principal.id == id,
            Denial::NotSelf,
        ),
        Target::Sections | Target::Contents => Decision::Allow,
        Target::Section(section) => allow_if(owns(principal, section), Denial::NotOwner),
        Target::Content(section) => allow_if(owns(principal, section), Denial::NotSectionOwner),
        Target::Quiz(QuizResource::AnswerCheck) => Decision::Allow,
        Target::Quiz(_) if action.is_read() => Decision::Allow,
        Target::Quiz(_) => allow_if(principal.is_superuser, Denial::NotSuperuser),
    }
}

/// [`authorize`] turned into an error, with denials logged.
pub fn require(identity: &Identity, action: Action, target: Target<'_>) -> AppResult<()> {
    let decision = authorize(identity, action, target);
    if let Decision::Deny(denial) = decision {
        log::warn!(
            "Denied {:?} on {:?} for {}: {:?}",
            action,
            target,
            identity.label(),
            denial
        );
    }
    decision.into_result()
}
