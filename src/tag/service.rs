//! The tag service: tag operations plus the access policy for changing tags.

use crate::{
    Error,
    auth::{AuthContext, Profile},
    tag::{Tag, TagId, TagName, TagStore},
};

/// The catalogue's classic default tags, seeded on request at start-up.
pub const DEFAULT_TAG_NAMES: [&str; 12] = [
    "maps",
    "datasets",
    "interactiveResources",
    "applications",
    "caseStudies",
    "proceedings",
    "photo",
    "audioVideo",
    "directories",
    "otherResources",
    "zarchival",
    "infomap",
];

/// Which profile, if any, each tag changing operation requires.
///
/// `None` lets anyone, including anonymous callers, perform the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Required for [TagService::create_or_replace].
    pub create: Option<Profile>,
    /// Required for [TagService::update].
    pub update: Option<Profile>,
    /// Required for [TagService::delete].
    pub delete: Option<Profile>,
}

impl AccessPolicy {
    /// Every change requires an administrator.
    pub fn restricted() -> Self {
        Self {
            create: Some(Profile::Administrator),
            update: Some(Profile::Administrator),
            delete: Some(Profile::Administrator),
        }
    }
}

impl Default for AccessPolicy {
    /// Only creating tags requires an administrator.
    fn default() -> Self {
        Self {
            create: Some(Profile::Administrator),
            update: None,
            delete: None,
        }
    }
}

/// Lists, fetches, creates, renames and deletes tags held in a [TagStore].
#[derive(Debug, Clone)]
pub struct TagService<S> {
    store: S,
    policy: AccessPolicy,
}

impl<S> TagService<S>
where
    S: TagStore,
{
    /// Create a service over `store` that enforces `policy`.
    pub fn new(store: S, policy: AccessPolicy) -> Self {
        Self { store, policy }
    }

    /// Get all tags, ordered by ID.
    pub fn list(&self) -> Result<Vec<Tag>, Error> {
        self.store.list()
    }

    /// Get the tag with `tag_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such tag.
    pub fn get(&self, tag_id: TagId) -> Result<Tag, Error> {
        self.store.get(tag_id)
    }

    /// Get the tag called exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such tag.
    pub fn find_by_name(&self, name: &TagName) -> Result<Tag, Error> {
        self.store.get_by_name(name)
    }

    /// Create a tag, or rename an existing one if `requested_id` names it.
    ///
    /// A missing or negative `requested_id` lets the store pick the ID. A
    /// non-negative ID that does not exist yet is used as the new tag's ID.
    ///
    /// # Errors
    ///
    /// Returns an auth error if `auth` does not satisfy the create policy,
    /// and [Error::DuplicateTagName] if another tag already uses `name`.
    pub fn create_or_replace(
        &self,
        auth: &AuthContext,
        requested_id: Option<TagId>,
        name: TagName,
    ) -> Result<Tag, Error> {
        auth.require(self.policy.create)?;

        let tag = match requested_id.filter(|id| *id >= 0) {
            Some(id) => self.store.upsert(id, name)?,
            None => self.store.insert(None, name)?,
        };
        tracing::info!("Tag {} saved as \"{}\" by {auth:?}", tag.id, tag.name);

        Ok(tag)
    }

    /// Rename the tag with `tag_id`.
    ///
    /// # Errors
    ///
    /// Returns an auth error if `auth` does not satisfy the update policy,
    /// [Error::NotFound] if there is no such tag, and
    /// [Error::DuplicateTagName] if another tag already uses `name`.
    pub fn update(&self, auth: &AuthContext, tag_id: TagId, name: TagName) -> Result<(), Error> {
        auth.require(self.policy.update)?;

        self.store.update(tag_id, name.clone())?;
        tracing::info!("Tag {tag_id} renamed to \"{name}\" by {auth:?}");

        Ok(())
    }

    /// Delete the tag with `tag_id`.
    ///
    /// # Errors
    ///
    /// Returns an auth error if `auth` does not satisfy the delete policy and
    /// [Error::NotFound] if there is no such tag.
    pub fn delete(&self, auth: &AuthContext, tag_id: TagId) -> Result<(), Error> {
        auth.require(self.policy.delete)?;

        self.store.delete(tag_id)?;
        tracing::info!("Tag {tag_id} deleted by {auth:?}");

        Ok(())
    }

    /// Insert each of `names` that does not exist yet and return how many were added.
    ///
    /// This bypasses the access policy and is meant for start-up only.
    pub fn seed_defaults(&self, names: &[&str]) -> Result<usize, Error> {
        let mut added = 0;

        for raw_name in names {
            let name = TagName::new(raw_name)?;

            match self.store.get_by_name(&name) {
                Ok(_) => continue,
                Err(Error::NotFound) => {
                    self.store.insert(None, name)?;
                    added += 1;
                }
                Err(error) => return Err(error),
            }
        }

        if added > 0 {
            tracing::info!("Seeded {added} default tags");
        }

        Ok(added)
    }
}

#[cfg(test)]
mod tag_service_tests {
    use crate::{
        Error,
        auth::{AuthContext, Profile, UserID},
        tag::{
            AccessPolicy, DEFAULT_TAG_NAMES, InMemoryTagStore, TagName, TagService, TagStore,
            UNASSIGNED_TAG_ID,
        },
    };

    fn admin() -> AuthContext {
        AuthContext::administrator(UserID::new(1))
    }

    fn editor() -> AuthContext {
        AuthContext::User {
            user_id: UserID::new(2),
            profile: Profile::Editor,
        }
    }

    fn get_seeded_service() -> TagService<InMemoryTagStore> {
        let store = InMemoryTagStore::new();
        store.insert(Some(1), TagName::new_unchecked("maps")).unwrap();
        store
            .insert(Some(2), TagName::new_unchecked("datasets"))
            .unwrap();

        TagService::new(store, AccessPolicy::default())
    }

    #[test]
    fn get_returns_every_existing_tag_by_id() {
        let service = get_seeded_service();

        for tag in service.list().unwrap() {
            assert_eq!(service.get(tag.id).unwrap().name, tag.name);
        }
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let service = get_seeded_service();

        assert_eq!(service.get(222), Err(Error::NotFound));
    }

    #[test]
    fn create_with_sentinel_id_adds_exactly_one_tag() {
        let service = get_seeded_service();
        let name = TagName::new_unchecked("newcategory");
        assert_eq!(service.find_by_name(&name), Err(Error::NotFound));
        let count_before = service.list().unwrap().len();

        let tag = service
            .create_or_replace(&admin(), Some(UNASSIGNED_TAG_ID), name.clone())
            .unwrap();

        assert_eq!(tag.id, 3);
        assert_eq!(service.list().unwrap().len(), count_before + 1);
        assert_eq!(service.find_by_name(&name), Ok(tag));
    }

    #[test]
    fn create_with_unused_id_keeps_it() {
        let service = get_seeded_service();

        let tag = service
            .create_or_replace(&admin(), Some(30), TagName::new_unchecked("photo"))
            .unwrap();

        assert_eq!(tag.id, 30);
        assert_eq!(service.get(30), Ok(tag));
    }

    #[test]
    fn create_with_existing_id_replaces_name() {
        let service = get_seeded_service();

        service
            .create_or_replace(&admin(), Some(1), TagName::new_unchecked("cartography"))
            .unwrap();

        assert_eq!(service.list().unwrap().len(), 2);
        assert_eq!(
            service.get(1).unwrap().name,
            TagName::new_unchecked("cartography")
        );
    }

    #[test]
    fn create_with_existing_id_never_fails_while_it_is_deleted() {
        let service = get_seeded_service();
        let deleter = service.clone();

        let handle = std::thread::spawn(move || {
            for _ in 0..500 {
                let _ = deleter.delete(&admin(), 1);
            }
        });

        for _ in 0..500 {
            let result =
                service.create_or_replace(&admin(), Some(1), TagName::new_unchecked("maps"));
            assert_eq!(result.map(|tag| tag.id), Ok(1));
        }
        handle.join().unwrap();
    }

    #[test]
    fn create_with_taken_name_fails_without_changes() {
        let service = get_seeded_service();
        let before = service.list().unwrap();

        let result = service.create_or_replace(&admin(), None, TagName::new_unchecked("maps"));

        assert_eq!(result, Err(Error::DuplicateTagName("maps".to_owned())));
        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn create_requires_administrator() {
        let service = get_seeded_service();
        let name = TagName::new_unchecked("newcategory");

        assert_eq!(
            service.create_or_replace(&AuthContext::Anonymous, None, name.clone()),
            Err(Error::NotAuthenticated)
        );
        assert_eq!(
            service.create_or_replace(&editor(), None, name.clone()),
            Err(Error::InsufficientPrivileges(Profile::Administrator))
        );
        assert_eq!(service.find_by_name(&name), Err(Error::NotFound));
    }

    #[test]
    fn update_renames_in_place() {
        let service = get_seeded_service();

        service
            .update(&AuthContext::Anonymous, 1, TagName::new_unchecked("maps-2"))
            .unwrap();

        assert_eq!(service.get(1).unwrap().name, TagName::new_unchecked("maps-2"));
    }

    #[test]
    fn update_and_delete_unknown_id_are_not_found_without_changes() {
        let service = get_seeded_service();
        let before = service.list().unwrap();

        assert_eq!(
            service.update(&admin(), 222, TagName::new_unchecked("whatever")),
            Err(Error::NotFound)
        );
        assert_eq!(service.delete(&admin(), 222), Err(Error::NotFound));
        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let service = get_seeded_service();

        service.delete(&AuthContext::Anonymous, 1).unwrap();

        assert_eq!(service.get(1), Err(Error::NotFound));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn restricted_policy_guards_update_and_delete() {
        let store = InMemoryTagStore::new();
        store.insert(Some(1), TagName::new_unchecked("maps")).unwrap();
        let service = TagService::new(store, AccessPolicy::restricted());

        assert_eq!(
            service.update(&AuthContext::Anonymous, 1, TagName::new_unchecked("x")),
            Err(Error::NotAuthenticated)
        );
        assert_eq!(
            service.delete(&editor(), 1),
            Err(Error::InsufficientPrivileges(Profile::Administrator))
        );
        assert_eq!(service.delete(&admin(), 1), Ok(()));
    }

    #[test]
    fn seed_defaults_skips_existing_names() {
        let service = get_seeded_service();

        let added = service.seed_defaults(&DEFAULT_TAG_NAMES).unwrap();

        assert_eq!(added, DEFAULT_TAG_NAMES.len() - 2);
        assert_eq!(service.list().unwrap().len(), DEFAULT_TAG_NAMES.len());
        assert_eq!(service.seed_defaults(&DEFAULT_TAG_NAMES), Ok(0));
    }
}
