//! Authentication service.
//!
//! Members sign up and log in with email and password; guests identify
//! themselves by phone number only and are never persisted.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use mr_daebak_core::{Email, Phone};

use crate::db::users::UserRepository;
use crate::db::{KeyValueStore, RepositoryError};
use crate::identity::GuestToken;
use crate::models::user::{AppUser, MemberProfile, StoredUser};

/// Name used for a guest who leaves the name blank.
const GUEST_FALLBACK_NAME: &str = "Guest";

/// Name used for a member whose email has no usable local part.
const MEMBER_FALLBACK_NAME: &str = "Member";

/// Signup form.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub address: String,
    pub phone: String,
}

/// Authentication service.
///
/// Handles member registration, login and account edits, and guest entry.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Register a new member.
    ///
    /// A blank name falls back to the email's local part.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub fn register(&self, registration: Registration) -> Result<AppUser, AuthError> {
        let email = Email::parse(&registration.email)?;
        validate_password(registration.password.expose_secret())?;
        let password_hash = hash_password(registration.password.expose_secret())?;

        let name = non_blank(&registration.name)
            .or_else(|| non_blank(email.local_part()))
            .unwrap_or(MEMBER_FALLBACK_NAME)
            .to_owned();

        let stored = self
            .users
            .create(StoredUser {
                name,
                email,
                password_hash,
                address: registration.address.trim().to_owned(),
                phone: registration.phone.trim().to_owned(),
            })
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!("member registered");
        Ok(AppUser::from_stored(&stored))
    }

    /// Log in with email and password.
    ///
    /// The email must match a registered one exactly.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &SecretString) -> Result<AppUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let stored = self
            .users
            .get_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &stored.password_hash)?;

        Ok(AppUser::from_stored(&stored))
    }

    /// Update the profile of the logged-in member.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::GuestAccount` for a guest session.
    /// Returns `AuthError::MissingField` if the name is blank.
    /// Returns `AuthError::UserNotFound` if the member is no longer registered.
    #[instrument(skip_all)]
    pub fn update_account(
        &self,
        user: &AppUser,
        profile: MemberProfile,
    ) -> Result<AppUser, AuthError> {
        let AppUser::Member { email, .. } = user else {
            return Err(AuthError::GuestAccount);
        };

        let profile = MemberProfile {
            name: profile.name.trim().to_owned(),
            address: profile.address.trim().to_owned(),
            phone: profile.phone.trim().to_owned(),
        };
        if profile.name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }

        let stored = self.users.update(email, profile).map_err(|e| match e {
            RepositoryError::NotFound => AuthError::UserNotFound,
            other => AuthError::Repository(other),
        })?;

        Ok(AppUser::from_stored(&stored))
    }

    // =========================================================================
    // Guests
    // =========================================================================

    /// Start a guest session.
    ///
    /// The guest token is derived from the phone, so the same phone always
    /// reaches the same orders. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPhone` if the phone holds no digits.
    pub fn start_guest(
        &self,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<AppUser, AuthError> {
        let phone = Phone::parse(phone)?;
        Ok(AppUser::Guest {
            name: non_blank(name).unwrap_or(GUEST_FALLBACK_NAME).to_owned(),
            guest_id: GuestToken::from_phone(&phone),
            address: address.trim().to_owned(),
            phone: phone.as_str().to_owned(),
        })
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Passwords only have to be present.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::WeakPassword("password must not be empty".to_owned()));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            name: "Kim".to_owned(),
            email: email.to_owned(),
            password: SecretString::from(password.to_owned()),
            address: "Seoul".to_owned(),
            phone: "010-1234-5678".to_owned(),
        }
    }

    #[test]
    fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let user = auth.register(registration("a@x.com", "pw")).unwrap();
        assert!(!user.is_guest());

        let logged_in = auth
            .login("a@x.com", &SecretString::from("pw".to_owned()))
            .unwrap();
        assert_eq!(logged_in, user);
    }

    #[test]
    fn test_password_is_not_stored_in_clear() {
        let store = MemoryStore::new();
        AuthService::new(&store)
            .register(registration("a@x.com", "hunter2"))
            .unwrap();
        let stored = UserRepository::new(&store)
            .get_by_email(&Email::parse("a@x.com").unwrap())
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "hunter2");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn test_login_rejects_wrong_password_and_case() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(registration("a@x.com", "pw")).unwrap();

        let wrong = auth.login("a@x.com", &SecretString::from("PW".to_owned()));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
        let other_case = auth.login("A@x.com", &SecretString::from("pw".to_owned()));
        assert!(matches!(other_case, Err(AuthError::InvalidCredentials)));
        let garbage = auth.login("not-an-email", &SecretString::from("pw".to_owned()));
        assert!(matches!(garbage, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_register_rejects_duplicates_and_empty_password() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(registration("a@x.com", "pw")).unwrap();
        assert!(matches!(
            auth.register(registration("a@x.com", "pw2")),
            Err(AuthError::UserAlreadyExists)
        ));
        assert!(matches!(
            auth.register(registration("b@x.com", "")),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.register(registration("no-at-sign", "pw")),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_blank_name_falls_back_to_local_part() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let user = auth
            .register(Registration {
                name: "  ".to_owned(),
                ..registration("daebak@x.com", "pw")
            })
            .unwrap();
        assert_eq!(user.name(), "daebak");
    }

    #[test]
    fn test_update_account_keeps_password() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let user = auth.register(registration("a@x.com", "pw")).unwrap();

        let updated = auth
            .update_account(
                &user,
                MemberProfile {
                    name: "Park".to_owned(),
                    address: "Busan".to_owned(),
                    phone: "010-9999-8888".to_owned(),
                },
            )
            .unwrap();
        assert_eq!(updated.name(), "Park");
        assert_eq!(updated.address(), "Busan");

        assert!(
            auth.login("a@x.com", &SecretString::from("pw".to_owned()))
                .is_ok()
        );
    }

    #[test]
    fn test_update_account_rejects_guests_and_blank_names() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let guest = auth.start_guest("Lee", "010-1234-5678", "").unwrap();
        let profile = MemberProfile {
            name: "Lee".to_owned(),
            address: String::new(),
            phone: String::new(),
        };
        assert!(matches!(
            auth.update_account(&guest, profile.clone()),
            Err(AuthError::GuestAccount)
        ));

        let member = auth.register(registration("a@x.com", "pw")).unwrap();
        assert!(matches!(
            auth.update_account(
                &member,
                MemberProfile {
                    name: " ".to_owned(),
                    ..profile
                }
            ),
            Err(AuthError::MissingField("name"))
        ));
    }

    #[test]
    fn test_start_guest() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let guest = auth.start_guest("", "010-1234-5678", "Seoul").unwrap();
        assert!(guest.is_guest());
        assert_eq!(guest.name(), "Guest");

        let again = auth.start_guest("Lee", "01012345678", "").unwrap();
        let (AppUser::Guest { guest_id: a, .. }, AppUser::Guest { guest_id: b, .. }) =
            (&guest, &again)
        else {
            panic!("expected guests");
        };
        assert_eq!(a, b);

        assert!(matches!(
            auth.start_guest("Lee", "none", ""),
            Err(AuthError::InvalidPhone(_))
        ));
    }
}
