//! Identity resolution: who owns an order.
//!
//! Members own orders by email. Guests own orders by a token derived from
//! their phone number, so a guest who re-enters the same phone in a later
//! session gets the same token back and sees the same orders.
//!
//! Ownership is a plain string comparison against what the session claims;
//! nothing binds the session to the phone or email cryptographically.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mr_daebak_core::{OwnerType, Phone};

use crate::models::user::AppUser;

/// Prefix of every guest token.
const GUEST_PREFIX: &str = "guest";

/// Number of trailing phone digits embedded in a guest token.
pub const GUEST_LOOKUP_DIGITS: usize = 8;

/// The session cannot be mapped to an owner; it must re-authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("member session has no email")]
    MissingEmail,
    #[error("guest session has no guest token")]
    MissingGuestToken,
}

/// Guest ownership token: `guest-{hash}-{last 8 digits}`.
///
/// ```
/// use mr_daebak_core::Phone;
/// use mr_daebak_storefront::identity::GuestToken;
///
/// let a = GuestToken::from_phone(&Phone::parse("010-1234-5678").unwrap());
/// let b = GuestToken::from_phone(&Phone::parse("01012345678").unwrap());
/// assert_eq!(a, b);
/// assert_eq!(a.lookup_code(), "12345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestToken(String);

impl GuestToken {
    /// Derive the token for a phone number.
    ///
    /// Only the digits matter: `010-1234-5678` and `01012345678` map to the
    /// same token.
    #[must_use]
    pub fn from_phone(phone: &Phone) -> Self {
        let digits = phone.digits();
        let hash = rolling_hash(&digits);
        let last = phone.trailing_digits(GUEST_LOOKUP_DIGITS);
        Self(format!("{GUEST_PREFIX}-{hash:x}-{last}"))
    }

    /// Derive the token from raw input, or `None` when it holds no digits.
    #[must_use]
    pub fn derive(raw_phone: &str) -> Option<Self> {
        Phone::parse(raw_phone).ok().map(|p| Self::from_phone(&p))
    }

    /// The token as stored on orders.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing phone digits a customer can type to find their orders.
    #[must_use]
    pub fn lookup_code(&self) -> &str {
        trailing_fragment(&self.0)
    }
}

impl fmt::Display for GuestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The part of an owner key after its last `-`.
#[must_use]
pub fn trailing_fragment(key: &str) -> &str {
    key.rsplit('-').next().unwrap_or(key)
}

/// 32-bit polynomial rolling hash (`h = h * 31 + byte`).
fn rolling_hash(s: &str) -> u32 {
    s.bytes()
        .fold(0_u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

/// Ownership key of a session: the pair every order is scoped by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub owner_key: String,
    pub owner_type: OwnerType,
}

impl Owner {
    /// Resolve the owner of a session user.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` when the member has an empty email or the guest
    /// an empty token.
    pub fn resolve(user: &AppUser) -> Result<Self, IdentityError> {
        match user {
            AppUser::Member { email, .. } => {
                if email.as_str().is_empty() {
                    return Err(IdentityError::MissingEmail);
                }
                Ok(Self {
                    owner_key: email.as_str().to_owned(),
                    owner_type: OwnerType::Member,
                })
            }
            AppUser::Guest { guest_id, .. } => {
                if guest_id.as_str().is_empty() {
                    return Err(IdentityError::MissingGuestToken);
                }
                Ok(Self {
                    owner_key: guest_id.as_str().to_owned(),
                    owner_type: OwnerType::Guest,
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mr_daebak_core::Email;

    use super::*;

    fn guest(phone: &str) -> AppUser {
        AppUser::Guest {
            name: "Guest".to_owned(),
            guest_id: GuestToken::derive(phone).unwrap(),
            address: String::new(),
            phone: phone.to_owned(),
        }
    }

    #[test]
    fn test_token_ignores_phone_formatting() {
        let dashed = GuestToken::derive("010-1234-5678").unwrap();
        let bare = GuestToken::derive("01012345678").unwrap();
        let spaced = GuestToken::derive("010 1234 5678").unwrap();
        assert_eq!(dashed, bare);
        assert_eq!(spaced, bare);
    }

    #[test]
    fn test_token_is_stable() {
        let first = GuestToken::derive("010-1234-5678").unwrap();
        for _ in 0..10 {
            assert_eq!(GuestToken::derive("010-1234-5678").unwrap(), first);
        }
        // h = h*31 + b over "01012345678", rendered in hex.
        let expected = "01012345678"
            .bytes()
            .fold(0_u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        assert_eq!(first.as_str(), format!("guest-{expected:x}-12345678"));
    }

    #[test]
    fn test_token_shape() {
        let token = GuestToken::derive("010-8765-4321").unwrap();
        let parts: Vec<_> = token.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first(), Some(&"guest"));
        assert_eq!(parts.last(), Some(&"87654321"));
        assert_eq!(token.lookup_code(), "87654321");
    }

    #[test]
    fn test_different_phones_differ() {
        assert_ne!(
            GuestToken::derive("010-1111-2222"),
            GuestToken::derive("010-1111-2223")
        );
    }

    #[test]
    fn test_no_digits_no_token() {
        assert!(GuestToken::derive("").is_none());
        assert!(GuestToken::derive("no phone").is_none());
    }

    #[test]
    fn test_short_phone_uses_all_digits() {
        let token = GuestToken::derive("119").unwrap();
        assert_eq!(token.lookup_code(), "119");
    }

    #[test]
    fn test_resolve_member() {
        let user = AppUser::Member {
            name: "Kim".to_owned(),
            email: Email::parse("a@x.com").unwrap(),
            address: String::new(),
            phone: String::new(),
        };
        let owner = Owner::resolve(&user).unwrap();
        assert_eq!(owner.owner_key, "a@x.com");
        assert_eq!(owner.owner_type, OwnerType::Member);
    }

    #[test]
    fn test_resolve_guest() {
        let owner = Owner::resolve(&guest("010-1234-5678")).unwrap();
        assert_eq!(owner.owner_type, OwnerType::Guest);
        assert!(owner.owner_key.ends_with("-12345678"));
    }

    #[test]
    fn test_resolve_rejects_empty_keys() {
        let member: AppUser = serde_json::from_str(
            r#"{"kind":"member","name":"x","email":"","address":"","phone":""}"#,
        )
        .unwrap();
        assert_eq!(Owner::resolve(&member), Err(IdentityError::MissingEmail));

        let guest: AppUser = serde_json::from_str(
            r#"{"kind":"guest","name":"x","guestId":"","address":"","phone":""}"#,
        )
        .unwrap();
        assert_eq!(Owner::resolve(&guest), Err(IdentityError::MissingGuestToken));
    }

    #[test]
    fn test_trailing_fragment() {
        assert_eq!(trailing_fragment("guest-ab12cd34-87654321"), "87654321");
        assert_eq!(trailing_fragment("plain"), "plain");
    }
}
