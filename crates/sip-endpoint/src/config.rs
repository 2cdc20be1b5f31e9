//! Configuration payloads forwarded to the engine
//!
//! These structs fix the recognized field set of each configuration payload
//! and serialize with the key spellings the engine expects. Beyond field
//! names, nothing is validated here; the engine is the authority on
//! semantic correctness.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::Endpoint::create_account`].
///
/// ```
/// use sip_endpoint::AccountConfig;
///
/// let config = AccountConfig {
///     name: "John Doe".into(),
///     username: "100".into(),
///     domain: "pbx.com".into(),
///     password: "secret".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    /// Display name.
    pub name: String,
    /// SIP username.
    pub username: String,
    /// SIP domain, optionally with a port (`"pbx.com:5061"`).
    pub domain: String,
    /// Authentication password.
    pub password: String,
    /// Outbound proxy address. Disabled when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Transport to use ("UDP", "TCP", "TLS"). Engine default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    /// Explicit registrar address. Defaults from `domain` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_server: Option<String>,
    /// Registration refresh interval in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_timeout: Option<u32>,
}

/// Per-call settings forwarded with [`crate::Endpoint::make_call`].
///
/// Field names match the engine's own spelling and are passed through
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSettings {
    /// Bitmask of engine call flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<u32>,
    /// Allowed keyframe request methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_keyframe_method: Option<u32>,
    /// Number of simultaneous active audio streams. Zero disables audio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud_cnt: Option<u32>,
    /// Number of simultaneous active video streams. Zero disables video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid_cnt: Option<u32>,
}

/// Additional data attached to an outgoing SIP request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MsgData {
    /// Overrides the request target URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_uri: Option<String>,
    /// Extra headers, name to value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdr_list: Option<HashMap<String, String>>,
    /// MIME type of the optional body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Optional message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_body: Option<String>,
}

/// Device orientations accepted by [`crate::Endpoint::change_orientation`].
///
/// The wire names are the engine's fixed `PJMEDIA_ORIENT_*` constants;
/// anything outside this set is rejected before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Orientation is unknown.
    Unknown,
    /// Rotated 90 degrees clockwise.
    Rotate90,
    /// Rotated 180 degrees.
    Rotate180,
    /// Rotated 270 degrees clockwise.
    Rotate270,
    /// Natural orientation.
    Natural,
}

impl Orientation {
    /// All recognized orientations.
    pub const ALL: [Orientation; 5] = [
        Orientation::Unknown,
        Orientation::Rotate90,
        Orientation::Rotate180,
        Orientation::Rotate270,
        Orientation::Natural,
    ];

    /// Wire name of this orientation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Unknown => "PJMEDIA_ORIENT_UNKNOWN",
            Orientation::Rotate90 => "PJMEDIA_ORIENT_ROTATE_90DEG",
            Orientation::Rotate180 => "PJMEDIA_ORIENT_ROTATE_180DEG",
            Orientation::Rotate270 => "PJMEDIA_ORIENT_ROTATE_270DEG",
            Orientation::Natural => "PJMEDIA_ORIENT_NATURAL",
        }
    }

    /// Look up an orientation by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.as_str() == name)
    }

    /// The accepted wire names, comma separated, for error messages.
    pub fn accepted_names() -> String {
        Self::ALL
            .iter()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_config_uses_engine_key_spelling() {
        let config = AccountConfig {
            name: "John Doe".into(),
            username: "100".into(),
            domain: "pbx.com".into(),
            password: "secret".into(),
            reg_server: Some("sip.pbx.com".into()),
            reg_timeout: Some(300),
            ..Default::default()
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "John Doe",
                "username": "100",
                "domain": "pbx.com",
                "password": "secret",
                "regServer": "sip.pbx.com",
                "regTimeout": 300,
            })
        );
    }

    #[test]
    fn call_settings_skip_absent_fields() {
        let settings = CallSettings {
            aud_cnt: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({"aud_cnt": 1})
        );
    }

    #[test]
    fn orientation_round_trips_by_name() {
        for orientation in Orientation::ALL {
            assert_eq!(Orientation::from_name(orientation.as_str()), Some(orientation));
        }
    }

    #[test]
    fn orientation_lookup_is_case_sensitive() {
        assert_eq!(Orientation::from_name("pjmedia_orient_natural"), None);
        assert_eq!(Orientation::from_name("NATURAL"), None);
        assert_eq!(Orientation::from_name(""), None);
    }
}
