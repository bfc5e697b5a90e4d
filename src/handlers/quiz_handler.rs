use actix_web::{delete, get, post, route, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::Identity,
    errors::AppError,
    models::{
        domain::{AnswerId, CategoryId, QuestionId},
        dto::request::{
            CategoryRequest, CheckAnswerRequest, CreateAnswerRequest, CreateQuestionRequest,
            PaginationParams, UpdateAnswerRequest, UpdateCategoryRequest, UpdateQuestionRequest,
        },
    },
};

#[get("/api/quiz/categories")]
async fn list_categories(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let categories = state.quiz_service.list_categories(&identity).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("/api/quiz/categories")]
async fn create_category(
    state: web::Data<AppState>,
    request: web::Json<CategoryRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let category = state
        .quiz_service
        .create_category(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("/api/quiz/categories/{id}")]
async fn get_category(
    state: web::Data<AppState>,
    id: web::Path<CategoryId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let category = state
        .quiz_service
        .get_category(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[route("/api/quiz/categories/{id}", method = "PUT", method = "PATCH")]
async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<CategoryId>,
    request: web::Json<UpdateCategoryRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let category = state
        .quiz_service
        .update_category(&identity, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/api/quiz/categories/{id}")]
async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<CategoryId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_category(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/quiz/questions")]
async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let page = state.quiz_service.list_questions(&identity, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/api/quiz/questions")]
async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .create_question(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[get("/api/quiz/questions/{id}")]
async fn get_question(
    state: web::Data<AppState>,
    id: web::Path<QuestionId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .get_question(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[route("/api/quiz/questions/{id}", method = "PUT", method = "PATCH")]
async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<QuestionId>,
    request: web::Json<UpdateQuestionRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .update_question(&identity, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/quiz/questions/{id}")]
async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<QuestionId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_question(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/quiz/answers")]
async fn list_answers(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let answers = state.quiz_service.list_answers(&identity).await?;
    Ok(HttpResponse::Ok().json(answers))
}

#[post("/api/quiz/answers")]
async fn create_answer(
    state: web::Data<AppState>,
    request: web::Json<CreateAnswerRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let answer = state
        .quiz_service
        .create_answer(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(answer))
}

#[get("/api/quiz/answers/{id}")]
async fn get_answer(
    state: web::Data<AppState>,
    id: web::Path<AnswerId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let answer = state
        .quiz_service
        .get_answer(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(answer))
}

#[route("/api/quiz/answers/{id}", method = "PUT", method = "PATCH")]
async fn update_answer(
    state: web::Data<AppState>,
    id: web::Path<AnswerId>,
    request: web::Json<UpdateAnswerRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let answer = state
        .quiz_service
        .update_answer(&identity, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(answer))
}

#[delete("/api/quiz/answers/{id}")]
async fn delete_answer(
    state: web::Data<AppState>,
    id: web::Path<AnswerId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_answer(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/quiz/check-answer")]
async fn check_answer(
    state: web::Data<AppState>,
    request: web::Json<CheckAnswerRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let result = state
        .quiz_service
        .check_answer(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
