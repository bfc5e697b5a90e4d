use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{RefreshTokenRequest, TokenRequest},
};

/// Exchanges a username and password for an access/refresh token pair.
#[post("/api/token")]
async fn obtain_token(
    state: web::Data<AppState>,
    request: web::Json<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let account = state.account_service.authenticate(&request).await?;
    let tokens = state.jwt_service.issue_pair(&account)?;

    log::info!("Issued tokens for '{}'", account.username);
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/api/token/refresh")]
async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let claims = state.jwt_service.validate_refresh_token(&request.refresh)?;

    let account_id = claims
        .account_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".to_string()))?;

    let account = state
        .account_service
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    let tokens = state.jwt_service.issue_pair(&account)?;
    Ok(HttpResponse::Ok().json(tokens))
}
