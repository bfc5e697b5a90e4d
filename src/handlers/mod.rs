pub mod account_handler;
pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod section_handler;

use actix_web::web;

use crate::errors::AppError;

/// Registers every route together with the JSON, query and path extractor
/// settings, so malformed input comes back as a 400 `AppError` body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .service(health_handler::health_check)
    .service(health_handler::health_check_ready)
    .service(health_handler::health_check_live)
    .service(auth_handler::obtain_token)
    .service(auth_handler::refresh_token)
    .service(account_handler::list_accounts)
    .service(account_handler::create_account)
    .service(account_handler::get_account)
    .service(account_handler::update_account)
    .service(account_handler::delete_account)
    .service(section_handler::list_sections)
    .service(section_handler::create_section)
    .service(section_handler::get_section)
    .service(section_handler::update_section)
    .service(section_handler::delete_section)
    .service(section_handler::list_contents)
    .service(section_handler::create_content)
    .service(section_handler::get_content)
    .service(section_handler::update_content)
    .service(section_handler::delete_content)
    .service(quiz_handler::list_categories)
    .service(quiz_handler::create_category)
    .service(quiz_handler::get_category)
    .service(quiz_handler::update_category)
    .service(quiz_handler::delete_category)
    .service(quiz_handler::list_questions)
    .service(quiz_handler::create_question)
    .service(quiz_handler::get_question)
    .service(quiz_handler::update_question)
    .service(quiz_handler::delete_question)
    .service(quiz_handler::list_answers)
    .service(quiz_handler::create_answer)
    .service(quiz_handler::get_answer)
    .service(quiz_handler::update_answer)
    .service(quiz_handler::delete_answer)
    .service(quiz_handler::check_answer);
}
