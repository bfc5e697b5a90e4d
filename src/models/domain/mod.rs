pub mod account;
pub mod quiz;
pub mod section;

pub use account::{Account, AccountId};
pub use quiz::{Answer, AnswerId, CategoryId, Question, QuestionCategory, QuestionId};
pub use section::{Content, ContentId, Section, SectionId};
