use crate::models::domain::{Account, AccountId};

/// The account behind an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: AccountId,
    pub username: String,
    pub is_superuser: bool,
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Principal {
            id: account.id,
            username: account.username.clone(),
            is_superuser: account.is_superuser,
        }
    }
}

/// Who is making a request, as resolved by the authenticator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Account(Principal),
}

impl Identity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Identity::Account(principal) => Some(principal),
            Identity::Anonymous => None,
        }
    }

    pub fn is_superuser(&self) -> bool {
        self.principal().is_some_and(|p| p.is_superuser)
    }

    /// Username for log lines.
    pub fn label(&self) -> &str {
        self.principal().map_or("<anonymous>", |p| p.username.as_str())
    }
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Identity::Account(Principal::from(account))
    }
}
