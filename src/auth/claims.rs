use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Account, AccountId};

pub const ACCESS_TOKEN_TYPE: &str = "access";
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (account id)
    pub username: String,
    pub token_type: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(account: &Account, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: account.id.to_string(),
            username: account.username.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,        // account id
    pub token_type: String, // "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl RefreshClaims {
    pub fn new(account_id: AccountId, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: account_id.to_string(),
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let mut account = Account::new("johndoe", "john@example.com", "h".to_string());
        account.id = 42;
        let claims = Claims::new(&account, 24);

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.account_id(), Some(42));
        assert_eq!(claims.username, "johndoe");
        assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_claims_creation() {
        let refresh_claims = RefreshClaims::new(42, 168);

        assert_eq!(refresh_claims.account_id(), Some(42));
        assert_eq!(refresh_claims.token_type, REFRESH_TOKEN_TYPE);
        assert!(refresh_claims.exp > refresh_claims.iat);
    }
}
