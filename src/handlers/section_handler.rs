use actix_web::{delete, get, post, route, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::Identity,
    errors::AppError,
    models::{
        domain::{ContentId, SectionId},
        dto::request::{
            CreateContentRequest, CreateSectionRequest, PaginationParams, UpdateContentRequest,
            UpdateSectionRequest,
        },
    },
};

#[get("/api/sections")]
async fn list_sections(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let page = state
        .section_service
        .list_sections(&identity, &query)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/api/sections")]
async fn create_section(
    state: web::Data<AppState>,
    request: web::Json<CreateSectionRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let section = state
        .section_service
        .create_section(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(section))
}

#[get("/api/sections/{id}")]
async fn get_section(
    state: web::Data<AppState>,
    id: web::Path<SectionId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let section = state
        .section_service
        .get_section(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(section))
}

#[route("/api/sections/{id}", method = "PUT", method = "PATCH")]
async fn update_section(
    state: web::Data<AppState>,
    id: web::Path<SectionId>,
    request: web::Json<UpdateSectionRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let section = state
        .section_service
        .update_section(&identity, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(section))
}

#[delete("/api/sections/{id}")]
async fn delete_section(
    state: web::Data<AppState>,
    id: web::Path<SectionId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .section_service
        .delete_section(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/contents")]
async fn list_contents(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let page = state
        .content_service
        .list_contents(&identity, &query)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/api/contents")]
async fn create_content(
    state: web::Data<AppState>,
    request: web::Json<CreateContentRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let content = state
        .content_service
        .create_content(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(content))
}

#[get("/api/contents/{id}")]
async fn get_content(
    state: web::Data<AppState>,
    id: web::Path<ContentId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let content = state
        .content_service
        .get_content(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(content))
}

#[route("/api/contents/{id}", method = "PUT", method = "PATCH")]
async fn update_content(
    state: web::Data<AppState>,
    id: web::Path<ContentId>,
    request: web::Json<UpdateContentRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let content = state
        .content_service
        .update_content(&identity, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(content))
}

#[delete("/api/contents/{id}")]
async fn delete_content(
    state: web::Data<AppState>,
    id: web::Path<ContentId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .content_service
        .delete_content(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
