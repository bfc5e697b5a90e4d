use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Answer, AnswerId, CategoryId, Question, QuestionCategory, QuestionId},
    repositories::db_helpers::{delete_by_id, find_ids, find_page, find_sorted, replace_by_id},
};

/// Storage for the quiz catalog: categories, their questions and the
/// answers attached to each question.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create_category(&self, category: QuestionCategory) -> AppResult<QuestionCategory>;
    async fn find_category(&self, id: CategoryId) -> AppResult<Option<QuestionCategory>>;
    async fn list_categories(&self) -> AppResult<Vec<QuestionCategory>>;
    async fn update_category(&self, category: QuestionCategory) -> AppResult<QuestionCategory>;
    async fn delete_category(&self, id: CategoryId) -> AppResult<()>;

    async fn create_question(&self, question: Question) -> AppResult<Question>;
    async fn find_question(&self, id: QuestionId) -> AppResult<Option<Question>>;
    async fn list_questions(&self, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)>;
    async fn question_ids_in_category(&self, category_id: CategoryId) -> AppResult<Vec<QuestionId>>;
    async fn update_question(&self, question: Question) -> AppResult<Question>;
    async fn delete_question(&self, id: QuestionId) -> AppResult<()>;
    async fn delete_questions_in_category(&self, category_id: CategoryId) -> AppResult<u64>;

    async fn create_answer(&self, answer: Answer) -> AppResult<Answer>;
    async fn find_answer(&self, id: AnswerId) -> AppResult<Option<Answer>>;
    async fn list_answers(&self) -> AppResult<Vec<Answer>>;
    async fn update_answer(&self, answer: Answer) -> AppResult<Answer>;
    async fn delete_answer(&self, id: AnswerId) -> AppResult<()>;
    async fn delete_answers_for_questions(&self, question_ids: Vec<QuestionId>) -> AppResult<u64>;
}

pub struct MongoQuizRepository {
    db: Database,
    categories: Collection<QuestionCategory>,
    questions: Collection<Question>,
    answers: Collection<Answer>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            categories: db.get_collection("question_categories"),
            questions: db.get_collection("questions"),
            answers: db.get_collection("answers"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz collections");

        let category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_id".to_string())
                    .build(),
            )
            .build();
        self.questions.create_index(category_index).await?;

        let question_index = IndexModel::builder()
            .keys(doc! { "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("question_id".to_string())
                    .build(),
            )
            .build();
        self.answers.create_index(question_index).await?;

        log::info!("Successfully created indexes for quiz collections");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create_category(&self, mut category: QuestionCategory) -> AppResult<QuestionCategory> {
        category.id = self.db.next_id("question_categories").await?;
        self.categories.insert_one(&category).await?;
        Ok(category)
    }

    async fn find_category(&self, id: CategoryId) -> AppResult<Option<QuestionCategory>> {
        let category = self.categories.find_one(doc! { "_id": id }).await?;
        Ok(category)
    }

    async fn list_categories(&self) -> AppResult<Vec<QuestionCategory>> {
        find_sorted(&self.categories, doc! {}).await
    }

    async fn update_category(&self, category: QuestionCategory) -> AppResult<QuestionCategory> {
        replace_by_id(&self.categories, category.id, &category, "Question category").await?;
        Ok(category)
    }

    async fn delete_category(&self, id: CategoryId) -> AppResult<()> {
        delete_by_id(&self.categories, id, "Question category").await
    }

    async fn create_question(&self, mut question: Question) -> AppResult<Question> {
        question.id = self.db.next_id("questions").await?;
        self.questions.insert_one(&question).await?;
        Ok(question)
    }

    async fn find_question(&self, id: QuestionId) -> AppResult<Option<Question>> {
        let question = self.questions.find_one(doc! { "_id": id }).await?;
        Ok(question)
    }

    async fn list_questions(&self, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)> {
        find_page(&self.questions, doc! {}, offset, limit).await
    }

    async fn question_ids_in_category(&self, category_id: CategoryId) -> AppResult<Vec<QuestionId>> {
        find_ids(&self.questions, doc! { "category_id": category_id }).await
    }

    async fn update_question(&self, question: Question) -> AppResult<Question> {
        replace_by_id(&self.questions, question.id, &question, "Question").await?;
        Ok(question)
    }

    async fn delete_question(&self, id: QuestionId) -> AppResult<()> {
        delete_by_id(&self.questions, id, "Question").await
    }

    async fn delete_questions_in_category(&self, category_id: CategoryId) -> AppResult<u64> {
        let result = self
            .questions
            .delete_many(doc! { "category_id": category_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn create_answer(&self, mut answer: Answer) -> AppResult<Answer> {
        answer.id = self.db.next_id("answers").await?;
        self.answers.insert_one(&answer).await?;
        Ok(answer)
    }

    async fn find_answer(&self, id: AnswerId) -> AppResult<Option<Answer>> {
        let answer = self.answers.find_one(doc! { "_id": id }).await?;
        Ok(answer)
    }

    async fn list_answers(&self) -> AppResult<Vec<Answer>> {
        find_sorted(&self.answers, doc! {}).await
    }

    async fn update_answer(&self, answer: Answer) -> AppResult<Answer> {
        replace_by_id(&self.answers, answer.id, &answer, "Answer").await?;
        Ok(answer)
    }

    async fn delete_answer(&self, id: AnswerId) -> AppResult<()> {
        delete_by_id(&self.answers, id, "Answer").await
    }

    async fn delete_answers_for_questions(&self, question_ids: Vec<QuestionId>) -> AppResult<u64> {
        if question_ids.is_empty() {
            return Ok(0);
        }

        let result = self
            .answers
            .delete_many(doc! { "question_id": { "$in": question_ids } })
            .await?;
        Ok(result.deleted_count)
    }
}
