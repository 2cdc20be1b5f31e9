//! The endpoint facade
//!
//! [`Endpoint`] is a thin pass-through in both directions: application
//! calls become engine invocations, engine notifications become
//! [`EndpointEvent`]s. It keeps no call or account state, performs no
//! retries, and coalesces nothing — concurrent identical operations are
//! each forwarded; the engine is responsible for serialization.
//!
//! # Lifecycle
//!
//! [`Endpoint::start`] must be called, and must resolve, before any other
//! operation. Invoking other operations first is undefined behavior at the
//! engine boundary; this layer does not enforce ordering and defines no
//! recovery for it.
//!
//! Notification routing lives in a task scoped to the endpoint instance:
//! dropping the endpoint (or calling [`Endpoint::shutdown`]) stops
//! delivery, so two endpoints over two engines never cross-deliver.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::account::Account;
use crate::call::Call;
use crate::config::{AccountConfig, CallSettings, MsgData, Orientation};
use crate::engine::{EngineNotification, SipEngine};
use crate::error::{EndpointError, EndpointResult};
use crate::events::{EndpointEvent, EventEmitter, EventKind, EventStream, ListenerHandle};
use crate::message::Message;
use crate::uri::normalize_destination;

/// Engine snapshot returned by [`Endpoint::start`].
#[derive(Debug, Clone, Default)]
pub struct StartSummary {
    /// Accounts already known to the engine.
    pub accounts: Vec<Account>,
    /// Calls already in progress.
    pub calls: Vec<Call>,
    /// Any further top-level payload entries, verbatim.
    pub extra: Map<String, Value>,
}

/// Typed facade over a native SIP engine.
pub struct Endpoint {
    engine: Arc<dyn SipEngine>,
    events: Arc<EventEmitter>,
    router: JoinHandle<()>,
}

impl Endpoint {
    /// Wrap an engine, subscribing to its notification channels.
    ///
    /// Must be called from within a tokio runtime; the notification router
    /// is spawned here.
    pub fn new(engine: Arc<dyn SipEngine>) -> Self {
        let events = Arc::new(EventEmitter::default());
        let notifications = engine.notifications();
        let router = tokio::spawn(route_notifications(notifications, Arc::clone(&events)));
        Self {
            engine,
            events,
            router,
        }
    }

    // ===== Lifecycle =====

    /// Initialize the engine and decode its snapshot.
    ///
    /// Fails if the engine reports an initialization error or returns a
    /// snapshot whose `accounts`/`calls` entries do not decode.
    pub async fn start(&self, configuration: Value) -> EndpointResult<StartSummary> {
        info!("starting SIP engine");
        let payload = self.engine.start(configuration).await?;

        let mut summary = StartSummary::default();
        if let Value::Object(entries) = payload {
            for (key, value) in entries {
                match key.as_str() {
                    "accounts" => summary.accounts = serde_json::from_value(value)?,
                    "calls" => summary.calls = serde_json::from_value(value)?,
                    _ => {
                        summary.extra.insert(key, value);
                    }
                }
            }
        }
        Ok(summary)
    }

    /// Stop notification delivery. Issued engine requests are unaffected;
    /// they cannot be withdrawn.
    pub fn shutdown(&self) {
        info!("shutting down endpoint event routing");
        self.router.abort();
    }

    // ===== Events =====

    /// Register a callback for one event kind.
    pub fn on(
        &self,
        kind: EventKind,
        listener: impl Fn(&EndpointEvent) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.events.on(kind, listener)
    }

    /// Detach a previously registered listener.
    pub fn remove_listener(&self, handle: &ListenerHandle) {
        self.events.remove_listener(handle);
    }

    /// Subscribe to the async event stream.
    pub fn subscribe(&self) -> EventStream {
        self.events.subscribe()
    }

    // ===== Account operations =====

    /// Create an account. When registration is configured the engine
    /// starts and maintains the registration session on its own.
    pub async fn create_account(&self, configuration: &AccountConfig) -> EndpointResult<Account> {
        debug!(username = %configuration.username, domain = %configuration.domain, "createAccount");
        let config = serde_json::to_value(configuration)?;
        let payload = self.engine.create_account(config).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Replace an account's configuration in place.
    ///
    /// Explicitly unsupported: fails immediately, without reaching the
    /// engine. Delete and recreate the account instead.
    pub fn replace_account(
        &self,
        _account: &Account,
        _configuration: &AccountConfig,
    ) -> EndpointResult<Account> {
        Err(EndpointError::NotImplemented {
            feature: "account replacement",
        })
    }

    /// Manually refresh a registration, or unregister when `renew` is
    /// false. Routine refreshes are the engine's job; this is only for
    /// forcing one.
    pub async fn register_account(&self, account: &Account, renew: bool) -> EndpointResult<()> {
        debug!(account = %account.id(), renew, "registerAccount");
        self.engine.register_account(account.id(), renew).await?;
        Ok(())
    }

    /// Delete an account, unregistering it first when necessary.
    pub async fn delete_account(&self, account: &Account) -> EndpointResult<()> {
        debug!(account = %account.id(), "deleteAccount");
        self.engine.delete_account(account.id()).await?;
        Ok(())
    }

    /// Replace the STUN server list used by an account.
    pub async fn update_stun_servers(
        &self,
        account: &Account,
        servers: Vec<String>,
    ) -> EndpointResult<()> {
        debug!(account = %account.id(), count = servers.len(), "updateStunServers");
        self.engine.update_stun_servers(account.id(), servers).await?;
        Ok(())
    }

    // ===== Call operations =====

    /// Make an outgoing call.
    ///
    /// A bare destination is first expanded against the account realm; see
    /// [`normalize_destination`].
    pub async fn make_call(
        &self,
        account: &Account,
        destination: &str,
        settings: &CallSettings,
        msg_data: &MsgData,
    ) -> EndpointResult<Call> {
        let destination = normalize_destination(account, destination);
        debug!(account = %account.id(), %destination, "makeCall");
        let payload = self
            .engine
            .make_call(
                account.id(),
                &destination,
                serde_json::to_value(settings)?,
                serde_json::to_value(msg_data)?,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Answer an incoming call.
    pub async fn answer_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "answerCall");
        self.engine.answer_call(call.id()).await?;
        Ok(())
    }

    /// Hang up a call, using whatever method fits its current state.
    pub async fn hangup_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "hangupCall");
        self.engine.hangup_call(call.id()).await?;
        Ok(())
    }

    /// Decline an incoming call (603).
    pub async fn decline_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "declineCall");
        self.engine.decline_call(call.id()).await?;
        Ok(())
    }

    /// Put a call on hold (re-INVITE with hold SDP).
    pub async fn hold_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "holdCall");
        self.engine.hold_call(call.id()).await?;
        Ok(())
    }

    /// Resume a held call.
    pub async fn unhold_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "unholdCall");
        self.engine.unhold_call(call.id()).await?;
        Ok(())
    }

    /// Mute the microphone for a call.
    pub async fn mute_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "muteCall");
        self.engine.mute_call(call.id()).await?;
        Ok(())
    }

    /// Unmute the microphone for a call.
    pub async fn unmute_call(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "unMuteCall");
        self.engine.unmute_call(call.id()).await?;
        Ok(())
    }

    /// Route call audio to the loudspeaker.
    pub async fn use_speaker(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "useSpeaker");
        self.engine.use_speaker(call.id()).await?;
        Ok(())
    }

    /// Route call audio to the earpiece.
    pub async fn use_earpiece(&self, call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), "useEarpiece");
        self.engine.use_earpiece(call.id()).await?;
        Ok(())
    }

    /// Blind transfer: REFER the remote party to `destination`, normalized
    /// against the account realm.
    pub async fn xfer_call(
        &self,
        account: &Account,
        call: &Call,
        destination: &str,
    ) -> EndpointResult<()> {
        let destination = normalize_destination(account, destination);
        debug!(call = %call.id(), %destination, "xferCall");
        self.engine.xfer_call(call.id(), &destination).await?;
        Ok(())
    }

    /// Attended transfer: REFER the remote party of `call` to the remote
    /// party of `dest_call`, replacing that call.
    pub async fn xfer_replaces_call(&self, call: &Call, dest_call: &Call) -> EndpointResult<()> {
        debug!(call = %call.id(), dest_call = %dest_call.id(), "xferReplacesCall");
        self.engine
            .xfer_replaces_call(call.id(), dest_call.id())
            .await?;
        Ok(())
    }

    /// Redirect (forward) an incoming call to `destination`, normalized
    /// against the account realm.
    pub async fn redirect_call(
        &self,
        account: &Account,
        call: &Call,
        destination: &str,
    ) -> EndpointResult<()> {
        let destination = normalize_destination(account, destination);
        debug!(call = %call.id(), %destination, "redirectCall");
        self.engine.redirect_call(call.id(), &destination).await?;
        Ok(())
    }

    /// Send DTMF digits on a call (RFC 2833).
    pub async fn dtmf_call(&self, call: &Call, digits: &str) -> EndpointResult<()> {
        debug!(call = %call.id(), "dtmfCall");
        self.engine.dtmf_call(call.id(), digits).await?;
        Ok(())
    }

    // ===== Global media operations =====

    /// Activate the platform audio session.
    pub async fn activate_audio_session(&self) -> EndpointResult<()> {
        debug!("activateAudioSession");
        self.engine.activate_audio_session().await?;
        Ok(())
    }

    /// Deactivate the platform audio session.
    pub async fn deactivate_audio_session(&self) -> EndpointResult<()> {
        debug!("deactivateAudioSession");
        self.engine.deactivate_audio_session().await?;
        Ok(())
    }

    /// Change the device orientation used for video capture.
    ///
    /// The value is validated against [`Orientation`] before the engine is
    /// reached; an unrecognized name fails with an error listing the
    /// accepted set.
    pub async fn change_orientation(&self, orientation: &str) -> EndpointResult<()> {
        let Some(orientation) = Orientation::from_name(orientation) else {
            return Err(EndpointError::InvalidOrientation {
                value: orientation.to_string(),
            });
        };
        debug!(orientation = orientation.as_str(), "changeOrientation");
        self.engine.change_orientation(orientation.as_str()).await?;
        Ok(())
    }

    /// Replace codec priority settings.
    pub async fn change_codec_settings(&self, settings: Value) -> EndpointResult<()> {
        debug!("changeCodecSettings");
        self.engine.change_codec_settings(settings).await?;
        Ok(())
    }

    /// Replace the network configuration.
    pub async fn change_network_configuration(&self, configuration: Value) -> EndpointResult<()> {
        debug!("changeNetworkConfiguration");
        self.engine.change_network_configuration(configuration).await?;
        Ok(())
    }

    /// Replace the foreground service configuration.
    pub async fn change_service_configuration(&self, configuration: Value) -> EndpointResult<()> {
        debug!("changeServiceConfiguration");
        self.engine.change_service_configuration(configuration).await?;
        Ok(())
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.router.abort();
    }
}

/// Forward engine notifications as endpoint events, preserving order.
async fn route_notifications(
    mut notifications: mpsc::UnboundedReceiver<EngineNotification>,
    events: Arc<EventEmitter>,
) {
    while let Some(notification) = notifications.recv().await {
        if let Some(event) = wrap_notification(notification) {
            events.emit(event);
        }
    }
    debug!("engine notification channel closed");
}

/// Wrap one notification payload in its designated view type.
///
/// A payload that does not decode is dropped; raw payloads are never
/// delivered to subscribers.
fn wrap_notification(notification: EngineNotification) -> Option<EndpointEvent> {
    match notification {
        EngineNotification::RegistrationChanged(payload) => {
            decode::<Account>("registration_changed", payload)
                .map(EndpointEvent::RegistrationChanged)
        }
        EngineNotification::CallReceived(payload) => {
            decode::<Call>("call_received", payload).map(EndpointEvent::CallReceived)
        }
        EngineNotification::CallChanged(payload) => {
            decode::<Call>("call_changed", payload).map(EndpointEvent::CallChanged)
        }
        EngineNotification::CallTerminated(payload) => {
            decode::<Call>("call_terminated", payload).map(EndpointEvent::CallTerminated)
        }
        EngineNotification::CallScreenLocked(locked) => {
            Some(EndpointEvent::CallScreenLocked(locked))
        }
        EngineNotification::MessageReceived(payload) => {
            decode::<Message>("message_received", payload).map(EndpointEvent::MessageReceived)
        }
        EngineNotification::ConnectivityChanged(available) => {
            Some(EndpointEvent::ConnectivityChanged(available))
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(channel: &'static str, payload: Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(view) => Some(view),
        Err(error) => {
            warn!(channel, %error, "dropping undecodable notification payload");
            None
        }
    }
}
