pub mod account_service;
pub mod content_service;
pub mod quiz_service;
pub mod section_service;

pub use account_service::AccountService;
pub use content_service::ContentService;
pub use quiz_service::QuizService;
pub use section_service::SectionService;
