pub mod account_repository;
pub mod content_repository;
pub mod db_helpers;
pub mod quiz_repository;
pub mod section_repository;

pub use account_repository::{AccountRepository, MongoAccountRepository};
pub use content_repository::{ContentRepository, MongoContentRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use section_repository::{MongoSectionRepository, SectionRepository};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use content_repository::MockContentRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use section_repository::MockSectionRepository;
