use std::{collections::HashMap, sync::Arc};

use validator::Validate;

use crate::{
    auth::{require, scope, Action, Collection, Identity, QuizResource, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, AnswerId, CategoryId, Question, QuestionCategory, QuestionId},
        dto::{
            request::{
                CategoryRequest, CheckAnswerRequest, CreateAnswerRequest, CreateQuestionRequest,
                PaginationParams, UpdateAnswerRequest, UpdateCategoryRequest,
                UpdateQuestionRequest,
            },
            response::{AnswerDto, CategoryDto, CheckAnswerResponse, PaginatedResponse, QuestionDto},
        },
    },
    repositories::QuizRepository,
};

/// Grades a submitted answer against the question it was submitted for.
///
/// An answer attached to a different question is rejected without looking
/// at its correctness flag.
pub fn evaluate(question: &Question, answer: &Answer) -> AppResult<CheckAnswerResponse> {
    if !answer.belongs_to(question) {
        return Err(AppError::BadRequest(format!(
            "Answer {} does not belong to question {}",
            answer.id, question.id
        )));
    }

    Ok(CheckAnswerResponse {
        question_text: question.text.clone(),
        is_correct: answer.is_correct,
    })
}

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    questions_page_size: u64,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, questions_page_size: u64) -> Self {
        Self {
            repository,
            questions_page_size,
        }
    }

    pub async fn list_categories(&self, identity: &Identity) -> AppResult<Vec<CategoryDto>> {
        scope(identity, Collection::Categories)?;

        let categories = self.repository.list_categories().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn create_category(
        &self,
        identity: &Identity,
        request: CategoryRequest,
    ) -> AppResult<CategoryDto> {
        require(identity, Action::Create, Target::Quiz(QuizResource::Category))?;
        request.validate()?;

        let category = self
            .repository
            .create_category(QuestionCategory::new(&request.name))
            .await?;

        log::info!("Question category '{}' created by {}", category.name, identity.label());
        Ok(category.into())
    }

    pub async fn get_category(&self, identity: &Identity, id: CategoryId) -> AppResult<CategoryDto> {
        require(identity, Action::Read, Target::Quiz(QuizResource::Category))?;
        Ok(self.find_category(id).await?.into())
    }

    pub async fn update_category(
        &self,
        identity: &Identity,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> AppResult<CategoryDto> {
        require(identity, Action::Update, Target::Quiz(QuizResource::Category))?;
        request.validate()?;

        let mut category = self.find_category(id).await?;
        if let Some(name) = request.name {
            category.name = name;
        }

        Ok(self.repository.update_category(category).await?.into())
    }

    /// Deletes a category with its questions and their answers.
    pub async fn delete_category(&self, identity: &Identity, id: CategoryId) -> AppResult<()> {
        require(identity, Action::Delete, Target::Quiz(QuizResource::Category))?;
        self.find_category(id).await?;

        let question_ids = self.repository.question_ids_in_category(id).await?;
        self.repository.delete_answers_for_questions(question_ids).await?;
        let removed = self.repository.delete_questions_in_category(id).await?;
        self.repository.delete_category(id).await?;

        log::info!(
            "Question category {} deleted by {} with {} questions",
            id,
            identity.label(),
            removed
        );
        Ok(())
    }

    pub async fn list_questions(
        &self,
        identity: &Identity,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<QuestionDto>> {
        scope(identity, Collection::Questions)?;
        params.validate()?;

        let page_size = params.page_size(self.questions_page_size);
        let (questions, total) = self
            .repository
            .list_questions(params.offset(self.questions_page_size), page_size)
            .await?;

        let categories: HashMap<CategoryId, QuestionCategory> = self
            .repository
            .list_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let results = questions
            .into_iter()
            .map(|question| {
                let category = categories
                    .get(&question.category_id)
                    .cloned()
                    .ok_or_else(|| dangling_category(&question))?;
                Ok(QuestionDto::new(question, category))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse::new(results, total, params.page(), page_size))
    }

    pub async fn create_question(
        &self,
        identity: &Identity,
        request: CreateQuestionRequest,
    ) -> AppResult<QuestionDto> {
        require(identity, Action::Create, Target::Quiz(QuizResource::Question))?;
        request.validate()?;

        let category = self.find_category(request.category_id).await?;
        let question = self
            .repository
            .create_question(Question::new(category.id, &request.text))
            .await?;

        log::info!("Question {} created by {}", question.id, identity.label());
        Ok(QuestionDto::new(question, category))
    }

    pub async fn get_question(&self, identity: &Identity, id: QuestionId) -> AppResult<QuestionDto> {
        require(identity, Action::Read, Target::Quiz(QuizResource::Question))?;

        let question = self.find_question(id).await?;
        self.question_dto(question).await
    }

    pub async fn update_question(
        &self,
        identity: &Identity,
        id: QuestionId,
        request: UpdateQuestionRequest,
    ) -> AppResult<QuestionDto> {
        require(identity, Action::Update, Target::Quiz(QuizResource::Question))?;
        request.validate()?;

        let mut question = self.find_question(id).await?;
        if let Some(category_id) = request.category_id {
            question.category_id = self.find_category(category_id).await?.id;
        }
        if let Some(text) = request.text {
            question.text = text;
        }

        let question = self.repository.update_question(question).await?;
        self.question_dto(question).await
    }

    /// Deletes a question with its answers.
    pub async fn delete_question(&self, identity: &Identity, id: QuestionId) -> AppResult<()> {
        require(identity, Action::Delete, Target::Quiz(QuizResource::Question))?;
        self.find_question(id).await?;

        self.repository.delete_answers_for_questions(vec![id]).await?;
        self.repository.delete_question(id).await?;

        log::info!("Question {} deleted by {}", id, identity.label());
        Ok(())
    }

    pub async fn list_answers(&self, identity: &Identity) -> AppResult<Vec<AnswerDto>> {
        scope(identity, Collection::Answers)?;

        let answers = self.repository.list_answers().await?;
        Ok(answers.into_iter().map(AnswerDto::from).collect())
    }

    pub async fn create_answer(
        &self,
        identity: &Identity,
        request: CreateAnswerRequest,
    ) -> AppResult<AnswerDto> {
        require(identity, Action::Create, Target::Quiz(QuizResource::Answer))?;
        request.validate()?;

        let question = self.find_question(request.question_id).await?;
        let answer = self
            .repository
            .create_answer(Answer::new(question.id, &request.text, request.is_correct))
            .await?;

        Ok(answer.into())
    }

    pub async fn get_answer(&self, identity: &Identity, id: AnswerId) -> AppResult<AnswerDto> {
        require(identity, Action::Read, Target::Quiz(QuizResource::Answer))?;
        Ok(self.find_answer(id).await?.into())
    }

    pub async fn update_answer(
        &self,
        identity: &Identity,
        id: AnswerId,
        request: UpdateAnswerRequest,
    ) -> AppResult<AnswerDto> {
        require(identity, Action::Update, Target::Quiz(QuizResource::Answer))?;
        request.validate()?;

        let mut answer = self.find_answer(id).await?;
        if let Some(question_id) = request.question_id {
            answer.question_id = self.find_question(question_id).await?.id;
        }
        if let Some(text) = request.text {
            answer.text = text;
        }
        if let Some(is_correct) = request.is_correct {
            answer.is_correct = is_correct;
        }

        Ok(self.repository.update_answer(answer).await?.into())
    }

    pub async fn delete_answer(&self, identity: &Identity, id: AnswerId) -> AppResult<()> {
        require(identity, Action::Delete, Target::Quiz(QuizResource::Answer))?;
        self.find_answer(id).await?;
        self.repository.delete_answer(id).await
    }

    pub async fn check_answer(
        &self,
        identity: &Identity,
        request: CheckAnswerRequest,
    ) -> AppResult<CheckAnswerResponse> {
        require(identity, Action::Create, Target::Quiz(QuizResource::AnswerCheck))?;

        let question = self.find_question(request.question_id).await?;
        let answer = self.find_answer(request.answer_id).await?;

        evaluate(&question, &answer).inspect_err(|e| {
            log::warn!("Answer check by {} failed: {}", identity.label(), e);
        })
    }

    async fn find_category(&self, id: CategoryId) -> AppResult<QuestionCategory> {
        self.repository
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question category with id {} not found", id)))
    }

    async fn find_question(&self, id: QuestionId) -> AppResult<Question> {
        self.repository
            .find_question(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id {} not found", id)))
    }

    async fn find_answer(&self, id: AnswerId) -> AppResult<Answer> {
        self.repository
            .find_answer(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Answer with id {} not found", id)))
    }

    async fn question_dto(&self, question: Question) -> AppResult<QuestionDto> {
        let category = self
            .repository
            .find_category(question.category_id)
            .await?
            .ok_or_else(|| dangling_category(&question))?;
        Ok(QuestionDto::new(question, category))
    }
}

fn dangling_category(question: &Question) -> AppError {
    AppError::DatabaseError(format!(
        "Question {} references missing category {}",
        question.id, question.category_id
    ))
}
