//! Engine boundary
//!
//! The native SIP/media stack is an opaque collaborator reached through
//! [`SipEngine`]: one async request/response method per facade operation,
//! plus a push channel of [`EngineNotification`]s. The engine owns all
//! signaling, media, registration retry, and call state transitions;
//! nothing at this layer reinterprets its payloads.
//!
//! Structured arguments cross the boundary as [`serde_json::Value`] with
//! the engine's own key spellings; the typed configuration structs in
//! [`crate::config`] serialize into that shape at the facade.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::account::AccountId;
use crate::call::CallId;

/// Result type for raw engine calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure reported by the engine, payload carried verbatim.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct EngineError {
    /// The engine's failure payload, unmodified.
    pub reason: Value,
}

impl EngineError {
    /// Wrap an engine failure payload.
    pub fn new(reason: impl Into<Value>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A push notification delivered by the engine.
///
/// Channels are fixed; each carries either a raw structured payload to be
/// wrapped into a view object or a bare boolean passed through as-is.
#[derive(Debug, Clone)]
pub enum EngineNotification {
    /// Registration status of an account changed.
    RegistrationChanged(Value),
    /// An incoming call arrived.
    CallReceived(Value),
    /// State or media flags of a call changed.
    CallChanged(Value),
    /// A call reached a terminal state.
    CallTerminated(Value),
    /// The platform locked or unlocked the call screen.
    CallScreenLocked(bool),
    /// A SIP MESSAGE arrived.
    MessageReceived(Value),
    /// Network connectivity toward the configured services changed.
    ConnectivityChanged(bool),
}

/// Request/response and notification contract of the native engine.
///
/// Every method is a plain forward: the engine serializes concurrent
/// requests as it sees fit, and no call can be withdrawn once issued. A
/// hung engine call hangs the returned future — the facade adds no
/// timeout.
#[async_trait]
pub trait SipEngine: Send + Sync {
    /// Hand out the engine's notification stream.
    ///
    /// Called exactly once, at facade construction.
    fn notifications(&self) -> mpsc::UnboundedReceiver<EngineNotification>;

    /// Initialize the engine. Resolves with the snapshot payload
    /// (accounts, calls, and engine metadata).
    async fn start(&self, config: Value) -> EngineResult<Value>;

    /// Create an account; resolves with the account payload.
    async fn create_account(&self, config: Value) -> EngineResult<Value>;

    /// Refresh (`renew`) or tear down (`!renew`) an account registration.
    async fn register_account(&self, account: &AccountId, renew: bool) -> EngineResult<Value>;

    /// Delete an account, unregistering it first if needed.
    async fn delete_account(&self, account: &AccountId) -> EngineResult<Value>;

    /// Replace the STUN server list used by an account.
    async fn update_stun_servers(
        &self,
        account: &AccountId,
        servers: Vec<String>,
    ) -> EngineResult<Value>;

    /// Start an outgoing call; resolves with the call payload.
    async fn make_call(
        &self,
        account: &AccountId,
        destination: &str,
        settings: Value,
        msg_data: Value,
    ) -> EngineResult<Value>;

    /// Answer an incoming call.
    async fn answer_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Hang up a call with whatever method fits its current state.
    async fn hangup_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Decline an incoming call (603).
    async fn decline_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Put a call on hold.
    async fn hold_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Resume a held call.
    async fn unhold_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Mute the microphone for a call.
    async fn mute_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Unmute the microphone for a call.
    async fn unmute_call(&self, call: &CallId) -> EngineResult<Value>;

    /// Route call audio to the loudspeaker.
    async fn use_speaker(&self, call: &CallId) -> EngineResult<Value>;

    /// Route call audio to the earpiece.
    async fn use_earpiece(&self, call: &CallId) -> EngineResult<Value>;

    /// Blind-transfer a call to a destination URI.
    async fn xfer_call(&self, call: &CallId, destination: &str) -> EngineResult<Value>;

    /// Attended transfer, replacing `dest_call` with `call`.
    async fn xfer_replaces_call(&self, call: &CallId, dest_call: &CallId)
        -> EngineResult<Value>;

    /// Redirect an incoming call to a destination URI.
    async fn redirect_call(&self, call: &CallId, destination: &str) -> EngineResult<Value>;

    /// Send DTMF digits on a call (RFC 2833).
    async fn dtmf_call(&self, call: &CallId, digits: &str) -> EngineResult<Value>;

    /// Activate the platform audio session.
    async fn activate_audio_session(&self) -> EngineResult<Value>;

    /// Deactivate the platform audio session.
    async fn deactivate_audio_session(&self) -> EngineResult<Value>;

    /// Change the device orientation used for video capture.
    async fn change_orientation(&self, orientation: &str) -> EngineResult<Value>;

    /// Replace codec priority settings.
    async fn change_codec_settings(&self, settings: Value) -> EngineResult<Value>;

    /// Replace the network configuration.
    async fn change_network_configuration(&self, config: Value) -> EngineResult<Value>;

    /// Replace the foreground service configuration.
    async fn change_service_configuration(&self, config: Value) -> EngineResult<Value>;
}
