//! Row-level narrowing for list reads, kept in step with [`authorize`].
//!
//! [`authorize`]: crate::auth::policy::authorize

use crate::{
    auth::{
        identity::Identity,
        policy::{require, Action, QuizResource, Target},
    },
    errors::AppResult,
    models::domain::{AccountId, Section},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Accounts,
    Sections,
    Contents,
    Categories,
    Questions,
    Answers,
}

impl Collection {
    fn target(self) -> Target<'static> {
        match self {
            Collection::Accounts => Target::Accounts,
            Collection::Sections => Target::Sections,
            Collection::Contents => Target::Contents,
            Collection::Categories => Target::Quiz(QuizResource::Category),
            Collection::Questions => Target::Quiz(QuizResource::Question),
            Collection::Answers => Target::Quiz(QuizResource::Answer),
        }
    }
}

/// Which rows of a collection a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    /// Sections owned by the account, or content inside those sections.
    OwnedBy(AccountId),
}

impl Scope {
    /// Owner filter to hand to a repository; `None` means unfiltered.
    pub fn owner(self) -> Option<AccountId> {
        match self {
            Scope::All => None,
            Scope::OwnedBy(owner_id) => Some(owner_id),
        }
    }

    /// Whether a section, or content inside it, falls within this scope.
    pub fn admits(self, section: &Section) -> bool {
        match self {
            Scope::All => true,
            Scope::OwnedBy(owner_id) => section.owner_id == owner_id,
        }
    }
}

/// Applies the list gate for `collection`, then narrows sections and content
/// to the caller's own unless the caller is a superuser.
pub fn scope(identity: &Identity, collection: Collection) -> AppResult<Scope> {
    require(identity, Action::Read, collection.target())?;

    match (collection, identity.principal()) {
        (Collection::Sections | Collection::Contents, Some(principal))
            if !principal.is_superuser =>
        {
            Ok(Scope::OwnedBy(principal.id))
        }
        _ => Ok(Scope::All),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{identity::Principal, policy::authorize},
        errors::AppError,
    };

    fn identity(id: AccountId, is_superuser: bool) -> Identity {
        Identity::Account(Principal {
            id,
            username: format!("user{}", id),
            is_superuser,
        })
    }

    fn sections() -> Vec<Section> {
        (1..=3)
            .flat_map(|owner| {
                (0..2).map(move |n| {
                    let mut section = Section::new(owner, "s", "");
                    section.id = owner * 10 + n;
                    section
                })
            })
            .collect()
    }

    #[test]
    fn members_see_only_their_own_sections() {
        assert_eq!(
            scope(&identity(2, false), Collection::Sections).unwrap(),
            Scope::OwnedBy(2)
        );
        assert_eq!(
            scope(&identity(2, false), Collection::Contents).unwrap(),
            Scope::OwnedBy(2)
        );
    }

    #[test]
    fn superusers_see_everything() {
        for collection in [Collection::Sections, Collection::Contents, Collection::Accounts] {
            assert_eq!(scope(&identity(1, true), collection).unwrap(), Scope::All);
        }
    }

    #[test]
    fn quiz_collections_are_unscoped_for_members() {
        for collection in [Collection::Categories, Collection::Questions, Collection::Answers] {
            assert_eq!(scope(&identity(4, false), collection).unwrap(), Scope::All);
        }
    }

    #[test]
    fn account_list_is_gated_for_members() {
        assert!(matches!(
            scope(&identity(4, false), Collection::Accounts),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn anonymous_cannot_list_anything() {
        for collection in [Collection::Sections, Collection::Categories] {
            assert!(matches!(
                scope(&Identity::Anonymous, collection),
                Err(AppError::Unauthorized(_))
            ));
        }
    }

    #[test]
    fn scope_never_admits_what_authorize_denies() {
        let callers = [identity(1, false), identity(2, false), identity(9, true)];

        for caller in &callers {
            for collection in [Collection::Sections, Collection::Contents] {
                let visible = scope(caller, collection).unwrap();
                for section in sections() {
                    let target = match collection {
                        Collection::Sections => Target::Section(&section),
                        _ => Target::Content(&section),
                    };
                    let allowed = authorize(caller, Action::Read, target).is_allowed();
                    assert_eq!(
                        visible.admits(&section),
                        allowed,
                        "{:?} {:?} section {}",
                        caller,
                        collection,
                        section.id
                    );
                }
            }
        }
    }
}
