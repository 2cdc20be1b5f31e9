//! Account view and registration status types
//!
//! An [`Account`] is an immutable snapshot decoded from the raw key/value
//! payload the engine attaches to account-related responses and
//! notifications. A fresh view is constructed per event; nothing here is
//! mutated after decoding.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque engine-assigned account identifier.
///
/// The engine owns identifier allocation; this layer never generates or
/// renumbers one. Payloads may carry the identifier as a JSON string or as
/// an integer, so decoding accepts both and keeps the string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AccountId(String);

impl AccountId {
    /// The identifier as the engine spelled it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_opaque_id(deserializer).map(Self)
    }
}

/// Decode an opaque identifier from either a JSON string or an integer.
pub(crate) fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer identifier")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// SIP registration state of an account, as last reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegistrationStatus {
    /// No registration information has been reported yet.
    #[default]
    Unknown,
    /// A REGISTER request is in flight.
    Trying,
    /// The registrar accepted the registration.
    Active,
    /// The registrar rejected the registration or it expired with an error.
    Failed,
}

impl RegistrationStatus {
    fn from_name(name: &str) -> Self {
        match name {
            "TRYING" => Self::Trying,
            "ACTIVE" => Self::Active,
            "FAILED" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for RegistrationStatus {
    // Unrecognized status names map to Unknown rather than failing the
    // whole payload.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Immutable view over a raw account payload.
///
/// Absent payload fields decode to defined defaults: empty strings, `None`
/// for the registration server, and [`RegistrationStatus::Unknown`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    id: AccountId,
    name: String,
    username: String,
    domain: String,
    #[serde(rename = "regServer")]
    reg_server: Option<String>,
    registration: RegistrationStatus,
}

impl Account {
    /// Engine-assigned identifier for this account.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SIP username (the user part of the account URI).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// SIP domain the account belongs to.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Explicit registrar address, when one was configured.
    ///
    /// When absent the registrar defaults from [`Account::domain`]; see
    /// [`crate::uri::normalize_destination`].
    pub fn reg_server(&self) -> Option<&str> {
        self.reg_server.as_deref()
    }

    /// Last reported registration state.
    pub fn registration(&self) -> RegistrationStatus {
        self.registration
    }
}
