//! User domain types.
//!
//! [`StoredUser`] is the durable member record; [`AppUser`] is the identity
//! carried by a session, either a member or a guest but never both.

use serde::{Deserialize, Serialize};

use mr_daebak_core::Email;

use crate::identity::GuestToken;

/// A registered member, as persisted in the user registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub name: String,
    /// Unique key of the registry.
    pub email: Email,
    /// Argon2 PHC string. Never replaced by a profile update.
    pub password_hash: String,
    pub address: String,
    pub phone: String,
}

/// Editable profile fields of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// The identity of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum AppUser {
    Member {
        name: String,
        email: Email,
        address: String,
        phone: String,
    },
    Guest {
        name: String,
        guest_id: GuestToken,
        address: String,
        phone: String,
    },
}

impl AppUser {
    /// Session identity for a stored member.
    #[must_use]
    pub fn from_stored(user: &StoredUser) -> Self {
        Self::Member {
            name: user.name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            phone: user.phone.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Member { name, .. } | Self::Guest { name, .. } => name,
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Member { address, .. } | Self::Guest { address, .. } => address,
        }
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        match self {
            Self::Member { phone, .. } | Self::Guest { phone, .. } => phone,
        }
    }

    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wire_format() {
        let guest = AppUser::Guest {
            name: "Lee".to_owned(),
            guest_id: GuestToken::derive("010-1234-5678").unwrap(),
            address: "Seoul".to_owned(),
            phone: "010-1234-5678".to_owned(),
        };
        let json = serde_json::to_value(&guest).unwrap();
        assert_eq!(json["kind"], "guest");
        assert!(json["guestId"].as_str().unwrap().starts_with("guest-"));
        assert!(json.get("email").is_none());

        let back: AppUser = serde_json::from_value(json).unwrap();
        assert_eq!(back, guest);
        assert!(back.is_guest());
    }

    #[test]
    fn test_from_stored_drops_password() {
        let stored = StoredUser {
            name: "Kim".to_owned(),
            email: Email::parse("kim@x.com").unwrap(),
            password_hash: "$argon2id$...".to_owned(),
            address: "Busan".to_owned(),
            phone: "010-0000-0000".to_owned(),
        };
        let user = AppUser::from_stored(&stored);
        assert!(!user.is_guest());
        assert_eq!(user.name(), "Kim");
        assert_eq!(user.address(), "Busan");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
    }
}
