use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::password::DEFAULT_ITERATIONS,
    errors::{AppError, AppResult},
};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const MIN_JWT_SECRET_LEN: usize = 32;

/// Credentials for the superuser ensured at startup.
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub jwt_refresh_expiration_hours: i64,
    pub cors_allowed_origin: String,
    pub sections_page_size: u64,
    pub questions_page_size: u64,
    pub password_hash_iterations: u32,
    pub admin_seed: Option<AdminSeed>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "learnbox-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT").unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: parse_env("JWT_EXPIRATION_HOURS").unwrap_or(1),
            jwt_refresh_expiration_hours: parse_env("JWT_REFRESH_EXPIRATION_HOURS").unwrap_or(24),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            sections_page_size: parse_env("SECTIONS_PAGE_SIZE").unwrap_or(10),
            questions_page_size: parse_env("QUESTIONS_PAGE_SIZE").unwrap_or(5),
            password_hash_iterations: parse_env("PASSWORD_HASH_ITERATIONS")
                .unwrap_or(DEFAULT_ITERATIONS),
            admin_seed: admin_seed_from_env(),
        }
    }

    /// Rejects secrets that are only fit for local development.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least {} characters",
                jwt_secret.len(),
                MIN_JWT_SECRET_LEN
            )));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "learnbox-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            jwt_refresh_expiration_hours: 24,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            sections_page_size: 10,
            questions_page_size: 5,
            password_hash_iterations: 1_000,
            admin_seed: None,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn admin_seed_from_env() -> Option<AdminSeed> {
    let username = env::var("ADMIN_USERNAME").ok()?;
    let password = env::var("ADMIN_PASSWORD").ok()?;
    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| format!("{}@localhost", username));

    Some(AdminSeed {
        username,
        email,
        password: SecretString::from(password),
    })
}
