use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AccountRepository, ContentRepository, MongoAccountRepository, MongoContentRepository,
        MongoQuizRepository, MongoSectionRepository, QuizRepository, SectionRepository,
    },
    services::{AccountService, ContentService, QuizService, SectionService},
};

/// The storage backends the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub contents: Arc<dyn ContentRepository>,
    pub quiz: Arc<dyn QuizRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub section_service: Arc<SectionService>,
    pub content_service: Arc<ContentService>,
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    /// `None` when running on non-Mongo repositories.
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let accounts = Arc::new(MongoAccountRepository::new(&db));
        accounts.ensure_indexes().await?;

        let sections = Arc::new(MongoSectionRepository::new(&db));
        sections.ensure_indexes().await?;

        let contents = Arc::new(MongoContentRepository::new(&db));
        contents.ensure_indexes().await?;

        let quiz = Arc::new(MongoQuizRepository::new(&db));
        quiz.ensure_indexes().await?;

        let repositories = Repositories {
            accounts,
            sections,
            contents,
            quiz,
        };

        let mut state = Self::with_repositories(config, repositories);
        state.db = Some(db);
        Ok(state)
    }

    pub fn with_repositories(config: Config, repositories: Repositories) -> Self {
        let Repositories {
            accounts,
            sections,
            contents,
            quiz,
        } = repositories;

        let account_service = Arc::new(AccountService::new(
            accounts.clone(),
            sections.clone(),
            contents.clone(),
            config.password_hash_iterations,
        ));
        let section_service = Arc::new(SectionService::new(
            sections.clone(),
            contents.clone(),
            accounts,
            config.sections_page_size,
        ));
        let content_service = Arc::new(ContentService::new(
            contents,
            sections,
            config.sections_page_size,
        ));
        let quiz_service = Arc::new(QuizService::new(quiz, config.questions_page_size));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.jwt_refresh_expiration_hours,
        ));

        Self {
            account_service,
            section_service,
            content_service,
            quiz_service,
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
