//! Call view and dialog state types
//!
//! A [`Call`] is an immutable snapshot of one engine-side call session,
//! decoded from the raw payload attached to call responses and
//! notifications. The engine owns the session lifecycle; this layer only
//! mirrors what it reports.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::account::{deserialize_opaque_id, AccountId};

/// Opaque engine-assigned call identifier, scoped to the engine's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CallId(String);

impl CallId {
    /// The identifier as the engine spelled it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CallId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for CallId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_opaque_id(deserializer).map(Self)
    }
}

/// Direction of a call relative to the local endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    /// Initiated locally.
    #[default]
    Outgoing,
    /// Received from a remote party.
    Incoming,
}

impl<'de> Deserialize<'de> for CallDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name.eq_ignore_ascii_case("incoming") {
            Ok(Self::Incoming)
        } else {
            Ok(Self::Outgoing)
        }
    }
}

/// SIP invite session state, mirroring the engine's dialog states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallState {
    /// Session not yet initialized.
    #[default]
    Null,
    /// Outgoing INVITE sent.
    Calling,
    /// Incoming INVITE received.
    Incoming,
    /// Provisional response received or sent.
    Early,
    /// 200/OK exchanged, awaiting ACK.
    Connecting,
    /// Dialog established, media flowing.
    Confirmed,
    /// Session terminated.
    Disconnected,
}

impl CallState {
    fn from_name(name: &str) -> Self {
        match name {
            "CALLING" => Self::Calling,
            "INCOMING" => Self::Incoming,
            "EARLY" => Self::Early,
            "CONNECTING" => Self::Connecting,
            "CONFIRMED" => Self::Confirmed,
            "DISCONNECTED" => Self::Disconnected,
            _ => Self::Null,
        }
    }
}

impl<'de> Deserialize<'de> for CallState {
    // Unrecognized state names map to Null rather than failing the payload.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Immutable view over a raw call payload.
///
/// Absent fields decode to defaults: empty identifiers, an empty remote
/// URI, [`CallState::Null`], and cleared media flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Call {
    id: CallId,
    #[serde(rename = "accountId")]
    account_id: AccountId,
    #[serde(rename = "remoteUri")]
    remote_uri: String,
    direction: CallDirection,
    state: CallState,
    held: bool,
    muted: bool,
    speaker: bool,
}

impl Call {
    /// Engine-assigned identifier for this call.
    pub fn id(&self) -> &CallId {
        &self.id
    }

    /// Identifier of the account this call belongs to.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// URI of the remote party.
    pub fn remote_uri(&self) -> &str {
        &self.remote_uri
    }

    /// Whether the call is incoming or outgoing.
    pub fn direction(&self) -> CallDirection {
        self.direction
    }

    /// Current dialog state.
    pub fn state(&self) -> CallState {
        self.state
    }

    /// Whether the call is on hold.
    pub fn held(&self) -> bool {
        self.held
    }

    /// Whether the local microphone is muted for this call.
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Whether audio is routed to the loudspeaker.
    pub fn speaker(&self) -> bool {
        self.speaker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_payload() {
        let call: Call = serde_json::from_value(json!({
            "id": 12,
            "accountId": "1",
            "remoteUri": "sip:alice@pbx.com",
            "direction": "incoming",
            "state": "CONFIRMED",
            "held": true,
            "muted": false,
            "speaker": true,
        }))
        .unwrap();

        assert_eq!(call.id().as_str(), "12");
        assert_eq!(call.account_id().as_str(), "1");
        assert_eq!(call.remote_uri(), "sip:alice@pbx.com");
        assert_eq!(call.direction(), CallDirection::Incoming);
        assert_eq!(call.state(), CallState::Confirmed);
        assert!(call.held());
        assert!(!call.muted());
        assert!(call.speaker());
    }

    #[test]
    fn absent_fields_decode_to_defaults() {
        let call: Call = serde_json::from_value(json!({})).unwrap();

        assert_eq!(call.id().as_str(), "");
        assert_eq!(call.state(), CallState::Null);
        assert_eq!(call.direction(), CallDirection::Outgoing);
        assert!(!call.held());
        assert!(!call.muted());
        assert!(!call.speaker());
    }

    #[test]
    fn unrecognized_state_maps_to_null() {
        let call: Call = serde_json::from_value(json!({"state": "RINGING"})).unwrap();
        assert_eq!(call.state(), CallState::Null);
    }
}
