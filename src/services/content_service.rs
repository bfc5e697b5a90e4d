use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require, scope, Action, Collection, Identity, Scope, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{Content, ContentId, Section, SectionId},
        dto::{
            request::{CreateContentRequest, PaginationParams, UpdateContentRequest},
            response::{ContentDto, PaginatedResponse},
        },
    },
    repositories::{ContentRepository, SectionRepository},
};

pub struct ContentService {
    repository: Arc<dyn ContentRepository>,
    sections: Arc<dyn SectionRepository>,
    page_size: u64,
}

impl ContentService {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        sections: Arc<dyn SectionRepository>,
        page_size: u64,
    ) -> Self {
        Self {
            repository,
            sections,
            page_size,
        }
    }

    pub async fn list_contents(
        &self,
        identity: &Identity,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<ContentDto>> {
        let visible = scope(identity, Collection::Contents)?;
        params.validate()?;

        let section_ids = match visible {
            Scope::All => None,
            Scope::OwnedBy(owner_id) => Some(self.sections.ids_owned_by(owner_id).await?),
        };

        let page_size = params.page_size(self.page_size);
        let (contents, total) = self
            .repository
            .list(section_ids, params.offset(self.page_size), page_size)
            .await?;

        let results = contents.into_iter().map(ContentDto::from).collect();
        Ok(PaginatedResponse::new(results, total, params.page(), page_size))
    }

    /// Adds content to a section the caller owns.
    pub async fn create_content(
        &self,
        identity: &Identity,
        request: CreateContentRequest,
    ) -> AppResult<ContentDto> {
        require(identity, Action::Create, Target::Contents)?;
        request.validate()?;

        let section = self.find_section(request.section_id).await?;
        require(identity, Action::Create, Target::Content(&section))?;

        let content = self
            .repository
            .create(Content::new(section.id, &request.title, &request.text))
            .await?;

        log::info!(
            "Content {} created in section {} by {}",
            content.id,
            section.id,
            identity.label()
        );
        Ok(content.into())
    }

    pub async fn get_content(&self, identity: &Identity, id: ContentId) -> AppResult<ContentDto> {
        let content = self.load(identity, Action::Read, id).await?;
        Ok(content.into())
    }

    /// Updates content. Moving it to another section requires the caller to
    /// be allowed to create content there.
    pub async fn update_content(
        &self,
        identity: &Identity,
        id: ContentId,
        request: UpdateContentRequest,
    ) -> AppResult<ContentDto> {
        let mut content = self.load(identity, Action::Update, id).await?;
        request.validate()?;

        if let Some(section_id) = request.section_id {
            if section_id != content.section_id {
                let destination = self.find_section(section_id).await?;
                require(identity, Action::Create, Target::Content(&destination))?;
                content.section_id = destination.id;
            }
        }
        if let Some(title) = request.title {
            content.title = title;
        }
        if let Some(text) = request.text {
            content.text = text;
        }

        let content = self.repository.update(content).await?;
        Ok(content.into())
    }

    pub async fn delete_content(&self, identity: &Identity, id: ContentId) -> AppResult<()> {
        self.load(identity, Action::Delete, id).await?;
        self.repository.delete(id).await?;

        log::info!("Content {} deleted by {}", id, identity.label());
        Ok(())
    }

    /// Fetches content and checks the caller against its parent section.
    async fn load(&self, identity: &Identity, action: Action, id: ContentId) -> AppResult<Content> {
        require(identity, Action::Read, Target::Contents)?;

        let content = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content with id {} not found", id)))?;

        let section = self.find_section(content.section_id).await?;
        require(identity, action, Target::Content(&section))?;

        Ok(content)
    }

    async fn find_section(&self, id: SectionId) -> AppResult<Section> {
        self.sections
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section with id {} not found", id)))
    }
}
