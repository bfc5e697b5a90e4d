use actix_web::{delete, get, post, route, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::Identity,
    errors::AppError,
    models::{
        domain::AccountId,
        dto::request::{CreateAccountRequest, UpdateAccountRequest},
    },
};

#[get("/api/users")]
async fn list_accounts(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let accounts = state.account_service.list_accounts(&identity).await?;
    Ok(HttpResponse::Ok().json(accounts))
}

#[post("/api/users")]
async fn create_account(
    state: web::Data<AppState>,
    request: web::Json<CreateAccountRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let account = state
        .account_service
        .create_account(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(account))
}

#[get("/api/users/{id}")]
async fn get_account(
    state: web::Data<AppState>,
    id: web::Path<AccountId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let account = state
        .account_service
        .get_account(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(account))
}

#[route("/api/users/{id}", method = "PUT", method = "PATCH")]
async fn update_account(
    state: web::Data<AppState>,
    id: web::Path<AccountId>,
    request: web::Json<UpdateAccountRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let account = state
        .account_service
        .update_account(&identity, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(account))
}

#[delete("/api/users/{id}")]
async fn delete_account(
    state: web::Data<AppState>,
    id: web::Path<AccountId>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .account_service
        .delete_account(&identity, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
