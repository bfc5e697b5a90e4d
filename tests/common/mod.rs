#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use learnbox_server::{
    app_state::{AppState, Repositories},
    auth::password::hash_password,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Account, AccountId, Answer, AnswerId, CategoryId, Content, ContentId, Question,
        QuestionCategory, QuestionId, Section, SectionId,
    },
    repositories::{AccountRepository, ContentRepository, QuizRepository, SectionRepository},
};

pub const PASSWORD: &str = "password123";

/// Records keyed by id, handed out in id order.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| keep(row))
            .cloned()
            .collect()
    }

    async fn replace(&self, id: i64, row: T, kind: &str) -> AppResult<T> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&id) {
            return Err(AppError::NotFound(format!("{} with id {} not found", kind, id)));
        }
        rows.insert(id, row.clone());
        Ok(row)
    }

    async fn remove(&self, id: i64, kind: &str) -> AppResult<()> {
        if self.rows.write().await.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("{} with id {} not found", kind, id)));
        }
        Ok(())
    }

    async fn remove_where(&self, drop: impl Fn(&T) -> bool) -> u64 {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, row| !drop(row));
        (before - rows.len()) as u64
    }
}

fn paginate<T: Clone>(items: Vec<T>, offset: u64, limit: u64) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let start = offset as usize;
    let end = (start + limit as usize).min(items.len());

    let page = if start >= items.len() {
        vec![]
    } else {
        items[start..end].to_vec()
    };

    (page, total)
}

pub struct InMemoryAccountRepository {
    accounts: Table<Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Table::new(),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, mut account: Account) -> AppResult<Account> {
        let mut rows = self.accounts.rows.write().await;
        if rows.values().any(|a| a.username == account.username) {
            return Err(AppError::AlreadyExists(format!(
                "Account with username '{}' already exists",
                account.username
            )));
        }

        account.id = self.accounts.allocate();
        rows.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(id).await)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .filtered(|a| a.username == username)
            .await
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> AppResult<Vec<Account>> {
        Ok(self.accounts.filtered(|_| true).await)
    }

    async fn update(&self, account: Account) -> AppResult<Account> {
        self.accounts.replace(account.id, account, "Account").await
    }

    async fn delete(&self, id: AccountId) -> AppResult<()> {
        self.accounts.remove(id, "Account").await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemorySectionRepository {
    sections: Table<Section>,
}

impl InMemorySectionRepository {
    pub fn new() -> Self {
        Self {
            sections: Table::new(),
        }
    }
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn create(&self, mut section: Section) -> AppResult<Section> {
        section.id = self.sections.allocate();
        self.sections
            .rows
            .write()
            .await
            .insert(section.id, section.clone());
        Ok(section)
    }

    async fn find_by_id(&self, id: SectionId) -> AppResult<Option<Section>> {
        Ok(self.sections.get(id).await)
    }

    async fn list(
        &self,
        owner_id: Option<AccountId>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Section>, u64)> {
        let items = self
            .sections
            .filtered(|s| owner_id.map_or(true, |owner| s.owner_id == owner))
            .await;
        Ok(paginate(items, offset, limit))
    }

    async fn ids_owned_by(&self, owner_id: AccountId) -> AppResult<Vec<SectionId>> {
        let owned = self.sections.filtered(|s| s.owner_id == owner_id).await;
        Ok(owned.into_iter().map(|s| s.id).collect())
    }

    async fn update(&self, section: Section) -> AppResult<Section> {
        self.sections.replace(section.id, section, "Section").await
    }

    async fn delete(&self, id: SectionId) -> AppResult<()> {
        self.sections.remove(id, "Section").await
    }

    async fn delete_by_owner(&self, owner_id: AccountId) -> AppResult<u64> {
        Ok(self.sections.remove_where(|s| s.owner_id == owner_id).await)
    }
}

pub struct InMemoryContentRepository {
    contents: Table<Content>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self {
            contents: Table::new(),
        }
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(&self, mut content: Content) -> AppResult<Content> {
        content.id = self.contents.allocate();
        self.contents
            .rows
            .write()
            .await
            .insert(content.id, content.clone());
        Ok(content)
    }

    async fn find_by_id(&self, id: ContentId) -> AppResult<Option<Content>> {
        Ok(self.contents.get(id).await)
    }

    async fn list(
        &self,
        section_ids: Option<Vec<SectionId>>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Content>, u64)> {
        let items = self
            .contents
            .filtered(|c| {
                section_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&c.section_id))
            })
            .await;
        Ok(paginate(items, offset, limit))
    }

    async fn update(&self, content: Content) -> AppResult<Content> {
        self.contents.replace(content.id, content, "Content").await
    }

    async fn delete(&self, id: ContentId) -> AppResult<()> {
        self.contents.remove(id, "Content").await
    }

    async fn delete_by_sections(&self, section_ids: Vec<SectionId>) -> AppResult<u64> {
        Ok(self
            .contents
            .remove_where(|c| section_ids.contains(&c.section_id))
            .await)
    }
}

pub struct InMemoryQuizRepository {
    categories: Table<QuestionCategory>,
    questions: Table<Question>,
    answers: Table<Answer>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            categories: Table::new(),
            questions: Table::new(),
            answers: Table::new(),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create_category(&self, mut category: QuestionCategory) -> AppResult<QuestionCategory> {
        category.id = self.categories.allocate();
        self.categories
            .rows
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_category(&self, id: CategoryId) -> AppResult<Option<QuestionCategory>> {
        Ok(self.categories.get(id).await)
    }

    async fn list_categories(&self) -> AppResult<Vec<QuestionCategory>> {
        Ok(self.categories.filtered(|_| true).await)
    }

    async fn update_category(&self, category: QuestionCategory) -> AppResult<QuestionCategory> {
        self.categories
            .replace(category.id, category, "Question category")
            .await
    }

    async fn delete_category(&self, id: CategoryId) -> AppResult<()> {
        self.categories.remove(id, "Question category").await
    }

    async fn create_question(&self, mut question: Question) -> AppResult<Question> {
        question.id = self.questions.allocate();
        self.questions
            .rows
            .write()
            .await
            .insert(question.id, question.clone());
        Ok(question)
    }

    async fn find_question(&self, id: QuestionId) -> AppResult<Option<Question>> {
        Ok(self.questions.get(id).await)
    }

    async fn list_questions(&self, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)> {
        let items = self.questions.filtered(|_| true).await;
        Ok(paginate(items, offset, limit))
    }

    async fn question_ids_in_category(&self, category_id: CategoryId) -> AppResult<Vec<QuestionId>> {
        let questions = self
            .questions
            .filtered(|q| q.category_id == category_id)
            .await;
        Ok(questions.into_iter().map(|q| q.id).collect())
    }

    async fn update_question(&self, question: Question) -> AppResult<Question> {
        self.questions.replace(question.id, question, "Question").await
    }

    async fn delete_question(&self, id: QuestionId) -> AppResult<()> {
        self.questions.remove(id, "Question").await
    }

    async fn delete_questions_in_category(&self, category_id: CategoryId) -> AppResult<u64> {
        Ok(self
            .questions
            .remove_where(|q| q.category_id == category_id)
            .await)
    }

    async fn create_answer(&self, mut answer: Answer) -> AppResult<Answer> {
        answer.id = self.answers.allocate();
        self.answers
            .rows
            .write()
            .await
            .insert(answer.id, answer.clone());
        Ok(answer)
    }

    async fn find_answer(&self, id: AnswerId) -> AppResult<Option<Answer>> {
        Ok(self.answers.get(id).await)
    }

    async fn list_answers(&self) -> AppResult<Vec<Answer>> {
        Ok(self.answers.filtered(|_| true).await)
    }

    async fn update_answer(&self, answer: Answer) -> AppResult<Answer> {
        self.answers.replace(answer.id, answer, "Answer").await
    }

    async fn delete_answer(&self, id: AnswerId) -> AppResult<()> {
        self.answers.remove(id, "Answer").await
    }

    async fn delete_answers_for_questions(&self, question_ids: Vec<QuestionId>) -> AppResult<u64> {
        Ok(self
            .answers
            .remove_where(|a| question_ids.contains(&a.question_id))
            .await)
    }
}

/// Shared handles to the in-memory stores behind an [`AppState`].
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<InMemoryAccountRepository>,
    pub sections: Arc<InMemorySectionRepository>,
    pub contents: Arc<InMemoryContentRepository>,
    pub quiz: Arc<InMemoryQuizRepository>,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            sections: Arc::new(InMemorySectionRepository::new()),
            contents: Arc::new(InMemoryContentRepository::new()),
            quiz: Arc::new(InMemoryQuizRepository::new()),
        }
    }

    pub fn app_state(&self) -> AppState {
        let repositories = Repositories {
            accounts: self.accounts.clone(),
            sections: self.sections.clone(),
            contents: self.contents.clone(),
            quiz: self.quiz.clone(),
        };
        AppState::with_repositories(Config::test_config(), repositories)
    }
}

/// Builds fixture records directly in the stores. Every account gets the
/// password [`PASSWORD`].
pub struct Seed<'a> {
    stores: &'a Stores,
}

impl<'a> Seed<'a> {
    pub fn new(stores: &'a Stores) -> Self {
        Self { stores }
    }

    pub async fn member(&self, username: &str) -> Account {
        self.account(Account::new(
            username,
            &format!("{}@example.com", username),
            hash_password(PASSWORD, Config::test_config().password_hash_iterations),
        ))
        .await
    }

    pub async fn superuser(&self, username: &str) -> Account {
        self.account(Account::new_superuser(
            username,
            &format!("{}@example.com", username),
            hash_password(PASSWORD, Config::test_config().password_hash_iterations),
        ))
        .await
    }

    async fn account(&self, account: Account) -> Account {
        self.stores
            .accounts
            .create(account)
            .await
            .expect("seed account")
    }

    pub async fn section(&self, owner: &Account, title: &str) -> Section {
        self.stores
            .sections
            .create(Section::new(owner.id, title, ""))
            .await
            .expect("seed section")
    }

    pub async fn content(&self, section: &Section, title: &str) -> Content {
        self.stores
            .contents
            .create(Content::new(section.id, title, "text"))
            .await
            .expect("seed content")
    }

    pub async fn category(&self, name: &str) -> QuestionCategory {
        self.stores
            .quiz
            .create_category(QuestionCategory::new(name))
            .await
            .expect("seed category")
    }

    pub async fn question(&self, category: &QuestionCategory, text: &str) -> Question {
        self.stores
            .quiz
            .create_question(Question::new(category.id, text))
            .await
            .expect("seed question")
    }

    pub async fn answer(&self, question: &Question, text: &str, is_correct: bool) -> Answer {
        self.stores
            .quiz
            .create_answer(Answer::new(question.id, text, is_correct))
            .await
            .expect("seed answer")
    }
}

/// `Authorization` header value carrying a fresh access token for `account`.
pub fn bearer(state: &AppState, account: &Account) -> String {
    let token = state
        .jwt_service
        .create_token(account)
        .expect("token for seeded account");
    format!("Bearer {}", token)
}

/// Builds the full application service over `state`, the way `main` wires it.
#[allow(unused_macros)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .wrap(learnbox_server::auth::AuthMiddleware)
                .wrap(learnbox_server::middleware::RequestIdMiddleware)
                .configure(learnbox_server::handlers::configure),
        )
        .await
    };
}
