use std::{collections::HashMap, sync::Arc};

use validator::Validate;

use crate::{
    auth::{require, scope, Action, Collection, Identity, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{AccountId, Section, SectionId},
        dto::{
            request::{CreateSectionRequest, PaginationParams, UpdateSectionRequest},
            response::{PaginatedResponse, SectionDto},
        },
    },
    repositories::{AccountRepository, ContentRepository, SectionRepository},
};

pub struct SectionService {
    repository: Arc<dyn SectionRepository>,
    contents: Arc<dyn ContentRepository>,
    accounts: Arc<dyn AccountRepository>,
    page_size: u64,
}

impl SectionService {
    pub fn new(
        repository: Arc<dyn SectionRepository>,
        contents: Arc<dyn ContentRepository>,
        accounts: Arc<dyn AccountRepository>,
        page_size: u64,
    ) -> Self {
        Self {
            repository,
            contents,
            accounts,
            page_size,
        }
    }

    pub async fn list_sections(
        &self,
        identity: &Identity,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<SectionDto>> {
        let visible = scope(identity, Collection::Sections)?;
        params.validate()?;

        let page_size = params.page_size(self.page_size);
        let (sections, total) = self
            .repository
            .list(visible.owner(), params.offset(self.page_size), page_size)
            .await?;

        let mut owners: HashMap<AccountId, String> = HashMap::new();
        let mut results = Vec::with_capacity(sections.len());
        for section in sections {
            let owner = match owners.get(&section.owner_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.owner_name(section.owner_id).await?;
                    owners.insert(section.owner_id, name.clone());
                    name
                }
            };
            results.push(SectionDto::new(section, owner));
        }

        Ok(PaginatedResponse::new(results, total, params.page(), page_size))
    }

    /// Creates a section owned by the caller.
    pub async fn create_section(
        &self,
        identity: &Identity,
        request: CreateSectionRequest,
    ) -> AppResult<SectionDto> {
        require(identity, Action::Create, Target::Sections)?;
        request.validate()?;

        let principal = identity
            .principal()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let section = self
            .repository
            .create(Section::new(principal.id, &request.title, &request.description))
            .await?;

        log::info!("Section {} created by {}", section.id, principal.username);
        Ok(SectionDto::new(section, principal.username.clone()))
    }

    pub async fn get_section(&self, identity: &Identity, id: SectionId) -> AppResult<SectionDto> {
        let section = self.load(identity, Action::Read, id).await?;
        self.to_dto(section).await
    }

    pub async fn update_section(
        &self,
        identity: &Identity,
        id: SectionId,
        request: UpdateSectionRequest,
    ) -> AppResult<SectionDto> {
        let mut section = self.load(identity, Action::Update, id).await?;
        request.validate()?;

        if let Some(title) = request.title {
            section.title = title;
        }
        if let Some(description) = request.description {
            section.description = description;
        }

        let section = self.repository.update(section).await?;
        self.to_dto(section).await
    }

    /// Deletes a section and everything inside it.
    pub async fn delete_section(&self, identity: &Identity, id: SectionId) -> AppResult<()> {
        self.load(identity, Action::Delete, id).await?;

        let removed = self.contents.delete_by_sections(vec![id]).await?;
        self.repository.delete(id).await?;

        log::info!(
            "Section {} deleted by {} with {} content items",
            id,
            identity.label(),
            removed
        );
        Ok(())
    }

    /// Fetches a section the caller is allowed to act on.
    async fn load(&self, identity: &Identity, action: Action, id: SectionId) -> AppResult<Section> {
        require(identity, Action::Read, Target::Sections)?;

        let section = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section with id {} not found", id)))?;

        require(identity, action, Target::Section(&section))?;
        Ok(section)
    }

    async fn to_dto(&self, section: Section) -> AppResult<SectionDto> {
        let owner = self.owner_name(section.owner_id).await?;
        Ok(SectionDto::new(section, owner))
    }

    async fn owner_name(&self, owner_id: AccountId) -> AppResult<String> {
        let account = self.accounts.find_by_id(owner_id).await?;
        Ok(account.map(|a| a.username).unwrap_or_default())
    }
}
