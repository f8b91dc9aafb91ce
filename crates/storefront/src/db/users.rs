//! User repository: the member registry.

use mr_daebak_core::Email;

use super::{KeyValueStore, RepositoryError, StoredList, USERS_KEY, load_list};
use crate::models::user::{MemberProfile, StoredUser};

/// Repository for member records.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Get a member by email. Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be read.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<StoredUser>, RepositoryError> {
        let users: Vec<StoredUser> = load_list(self.store, USERS_KEY)?;
        Ok(users.into_iter().find(|u| u.email == *email))
    }

    /// Register a new member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Store` if the store cannot be read or written.
    pub fn create(&self, user: StoredUser) -> Result<StoredUser, RepositoryError> {
        let mut users: StoredList<StoredUser> = StoredList::load(self.store, USERS_KEY)?;
        if users.iter().any(|u| u.email == user.email)
            || users.raw_field_matches("email", user.email.as_str())
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        users.push(user.clone());
        users.save(self.store, USERS_KEY)?;
        Ok(user)
    }

    /// Update a member's profile. The stored password hash is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no member has this email.
    /// Returns `RepositoryError::Store` if the store cannot be read or written.
    pub fn update(
        &self,
        email: &Email,
        profile: MemberProfile,
    ) -> Result<StoredUser, RepositoryError> {
        let mut users: StoredList<StoredUser> = StoredList::load(self.store, USERS_KEY)?;
        let user = users
            .iter_mut()
            .find(|u| u.email == *email)
            .ok_or(RepositoryError::NotFound)?;

        user.name = profile.name;
        user.address = profile.address;
        user.phone = profile.phone;
        let updated = user.clone();

        users.save(self.store, USERS_KEY)?;
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn member(email: &str) -> StoredUser {
        StoredUser {
            name: "Kim".to_owned(),
            email: Email::parse(email).unwrap(),
            password_hash: "$argon2id$stub".to_owned(),
            address: "Seoul".to_owned(),
            phone: "010-1234-5678".to_owned(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(member("a@x.com")).unwrap();

        let found = repo.get_by_email(&Email::parse("a@x.com").unwrap()).unwrap();
        assert_eq!(found, Some(member("a@x.com")));
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(member("a@x.com")).unwrap();
        let found = repo.get_by_email(&Email::parse("A@x.com").unwrap()).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(member("a@x.com")).unwrap();
        assert!(matches!(
            repo.create(member("a@x.com")),
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[test]
    fn test_update_keeps_password() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(member("a@x.com")).unwrap();

        let email = Email::parse("a@x.com").unwrap();
        let updated = repo
            .update(
                &email,
                MemberProfile {
                    name: "Park".to_owned(),
                    address: "Busan".to_owned(),
                    phone: "010-0000-0000".to_owned(),
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Park");
        assert_eq!(updated.password_hash, "$argon2id$stub");

        let stored = repo.get_by_email(&email).unwrap().unwrap();
        assert_eq!(stored.address, "Busan");
        assert_eq!(stored.password_hash, "$argon2id$stub");
    }

    #[test]
    fn test_update_unknown_email() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        let result = repo.update(
            &Email::parse("nobody@x.com").unwrap(),
            MemberProfile {
                name: String::new(),
                address: String::new(),
                phone: String::new(),
            },
        );
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn test_unreadable_member_is_kept_and_still_claims_email() {
        let store = MemoryStore::new();
        store
            .set(USERS_KEY, r#"[{"email":"old@x.com","name":"Lee"}]"#)
            .unwrap();
        let repo = UserRepository::new(&store);

        assert!(matches!(
            repo.create(member("old@x.com")),
            Err(RepositoryError::Conflict(_))
        ));
        repo.create(member("a@x.com")).unwrap();

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&store.get(USERS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(
            raw.first().and_then(|u| u.get("name")).and_then(|n| n.as_str()),
            Some("Lee")
        );
    }
}
