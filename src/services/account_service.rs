use std::sync::Arc;

use secrecy::ExposeSecret;
use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        require, Action, Identity, Target,
    },
    config::AdminSeed,
    errors::{AppError, AppResult},
    models::{
        domain::{Account, AccountId},
        dto::{
            request::{CreateAccountRequest, TokenRequest, UpdateAccountRequest},
            response::AccountDto,
        },
    },
    repositories::{AccountRepository, ContentRepository, SectionRepository},
};

pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    sections: Arc<dyn SectionRepository>,
    contents: Arc<dyn ContentRepository>,
    password_iterations: u32,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        sections: Arc<dyn SectionRepository>,
        contents: Arc<dyn ContentRepository>,
        password_iterations: u32,
    ) -> Self {
        Self {
            repository,
            sections,
            contents,
            password_iterations,
        }
    }

    pub async fn list_accounts(&self, identity: &Identity) -> AppResult<Vec<AccountDto>> {
        require(identity, Action::Read, Target::Accounts)?;

        let accounts = self.repository.find_all().await?;
        Ok(accounts.into_iter().map(AccountDto::from).collect())
    }

    pub async fn create_account(
        &self,
        identity: &Identity,
        request: CreateAccountRequest,
    ) -> AppResult<AccountDto> {
        require(identity, Action::Create, Target::Accounts)?;
        request.validate()?;

        self.ensure_username_free(&request.username).await?;

        let password_hash = hash_password(&request.password, self.password_iterations);
        let account = self
            .repository
            .create(Account::from_request(request, password_hash))
            .await?;

        log::info!(
            "Account '{}' ({}) created by {}",
            account.username,
            account.id,
            identity.label()
        );

        Ok(account.into())
    }

    pub async fn get_account(&self, identity: &Identity, id: AccountId) -> AppResult<AccountDto> {
        require(identity, Action::Read, Target::Account(id))?;

        let account = self.load(id).await?;
        Ok(account.into())
    }

    pub async fn update_account(
        &self,
        identity: &Identity,
        id: AccountId,
        request: UpdateAccountRequest,
    ) -> AppResult<AccountDto> {
        require(identity, Action::Update, Target::Account(id))?;
        request.validate()?;

        let mut account = self.load(id).await?;

        if let Some(username) = request.username {
            if username != account.username {
                self.ensure_username_free(&username).await?;
                account.username = username;
            }
        }
        if let Some(email) = request.email {
            account.email = email;
        }
        if let Some(phone_number) = request.phone_number {
            account.phone_number = Some(phone_number);
        }
        if let Some(birth_date) = request.birth_date {
            account.birth_date = Some(birth_date);
        }
        if let Some(password) = request.password {
            account.password_hash = hash_password(&password, self.password_iterations);
        }

        let account = self.repository.update(account).await?;
        log::info!("Account {} updated by {}", account.id, identity.label());

        Ok(account.into())
    }

    /// Deletes an account together with its sections and their content.
    pub async fn delete_account(&self, identity: &Identity, id: AccountId) -> AppResult<()> {
        require(identity, Action::Delete, Target::Account(id))?;

        self.load(id).await?;

        let section_ids = self.sections.ids_owned_by(id).await?;
        let removed_contents = self.contents.delete_by_sections(section_ids).await?;
        let removed_sections = self.sections.delete_by_owner(id).await?;
        self.repository.delete(id).await?;

        log::info!(
            "Account {} deleted by {} ({} sections, {} content items)",
            id,
            identity.label(),
            removed_sections,
            removed_contents
        );

        Ok(())
    }

    /// Checks a username/password pair.
    pub async fn authenticate(&self, request: &TokenRequest) -> AppResult<Account> {
        let account = self.repository.find_by_username(&request.username).await?;

        match account {
            Some(account) if verify_password(&request.password, &account.password_hash) => {
                Ok(account)
            }
            _ => {
                log::warn!("Failed login attempt for '{}'", request.username);
                Err(AppError::Unauthorized(
                    "No active account found with the given credentials".to_string(),
                ))
            }
        }
    }

    pub async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        self.repository.find_by_id(id).await
    }

    /// Makes sure the configured bootstrap superuser exists.
    pub async fn ensure_superuser(&self, seed: &AdminSeed) -> AppResult<Account> {
        if let Some(existing) = self.repository.find_by_username(&seed.username).await? {
            if !existing.is_superuser {
                log::warn!(
                    "Bootstrap account '{}' exists but is not a superuser",
                    existing.username
                );
            }
            return Ok(existing);
        }

        let password_hash =
            hash_password(seed.password.expose_secret(), self.password_iterations);
        let account = self
            .repository
            .create(Account::new_superuser(&seed.username, &seed.email, password_hash))
            .await?;

        log::info!("Created bootstrap superuser '{}'", account.username);
        Ok(account)
    }

    async fn load(&self, id: AccountId) -> AppResult<Account> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account with id {} not found", id)))
    }

    async fn ensure_username_free(&self, username: &str) -> AppResult<()> {
        if self.repository.find_by_username(username).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Account with username '{}' already exists",
                username
            )));
        }
        Ok(())
    }
}
