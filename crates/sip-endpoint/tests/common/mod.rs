//! Shared test fixtures: a scriptable in-memory engine.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use sip_endpoint::{
    Account, AccountId, Call, CallId, EngineNotification, EngineResult, SipEngine,
};

/// Install a log subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Fake engine that records every forwarded request and replays scripted
/// responses. Unscripted methods succeed with an empty object payload.
pub struct FakeEngine {
    notify_tx: mpsc::UnboundedSender<EngineNotification>,
    notify_rx: Mutex<Option<mpsc::UnboundedReceiver<EngineNotification>>>,
    requests: Mutex<Vec<(String, Value)>>,
    responses: Mutex<HashMap<String, VecDeque<EngineResult<Value>>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        Self {
            notify_tx,
            notify_rx: Mutex::new(Some(notify_rx)),
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
        }
    }

    /// Queue the next response for `method`.
    pub fn respond(&self, method: &str, result: EngineResult<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(result);
    }

    /// Push a notification, as the native layer would. Delivery is
    /// fire-and-forget; a shut-down endpoint simply no longer listens.
    pub fn push(&self, notification: EngineNotification) {
        let _ = self.notify_tx.send(notification);
    }

    /// Every request forwarded so far, as (method, arguments) pairs.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: &str, args: Value) -> EngineResult<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), args));
        self.responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(Ok(json!({})))
    }
}

#[async_trait]
impl SipEngine for FakeEngine {
    fn notifications(&self) -> mpsc::UnboundedReceiver<EngineNotification> {
        self.notify_rx
            .lock()
            .unwrap()
            .take()
            .expect("notifications() called twice")
    }

    async fn start(&self, config: Value) -> EngineResult<Value> {
        self.record("start", config)
    }

    async fn create_account(&self, config: Value) -> EngineResult<Value> {
        self.record("createAccount", config)
    }

    async fn register_account(&self, account: &AccountId, renew: bool) -> EngineResult<Value> {
        self.record(
            "registerAccount",
            json!({"accountId": account.as_str(), "renew": renew}),
        )
    }

    async fn delete_account(&self, account: &AccountId) -> EngineResult<Value> {
        self.record("deleteAccount", json!({"accountId": account.as_str()}))
    }

    async fn update_stun_servers(
        &self,
        account: &AccountId,
        servers: Vec<String>,
    ) -> EngineResult<Value> {
        self.record(
            "updateStunServers",
            json!({"accountId": account.as_str(), "servers": servers}),
        )
    }

    async fn make_call(
        &self,
        account: &AccountId,
        destination: &str,
        settings: Value,
        msg_data: Value,
    ) -> EngineResult<Value> {
        self.record(
            "makeCall",
            json!({
                "accountId": account.as_str(),
                "destination": destination,
                "settings": settings,
                "msgData": msg_data,
            }),
        )
    }

    async fn answer_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("answerCall", json!({"callId": call.as_str()}))
    }

    async fn hangup_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("hangupCall", json!({"callId": call.as_str()}))
    }

    async fn decline_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("declineCall", json!({"callId": call.as_str()}))
    }

    async fn hold_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("holdCall", json!({"callId": call.as_str()}))
    }

    async fn unhold_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("unholdCall", json!({"callId": call.as_str()}))
    }

    async fn mute_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("muteCall", json!({"callId": call.as_str()}))
    }

    async fn unmute_call(&self, call: &CallId) -> EngineResult<Value> {
        self.record("unMuteCall", json!({"callId": call.as_str()}))
    }

    async fn use_speaker(&self, call: &CallId) -> EngineResult<Value> {
        self.record("useSpeaker", json!({"callId": call.as_str()}))
    }

    async fn use_earpiece(&self, call: &CallId) -> EngineResult<Value> {
        self.record("useEarpiece", json!({"callId": call.as_str()}))
    }

    async fn xfer_call(&self, call: &CallId, destination: &str) -> EngineResult<Value> {
        self.record(
            "xferCall",
            json!({"callId": call.as_str(), "destination": destination}),
        )
    }

    async fn xfer_replaces_call(
        &self,
        call: &CallId,
        dest_call: &CallId,
    ) -> EngineResult<Value> {
        self.record(
            "xferReplacesCall",
            json!({"callId": call.as_str(), "destCallId": dest_call.as_str()}),
        )
    }

    async fn redirect_call(&self, call: &CallId, destination: &str) -> EngineResult<Value> {
        self.record(
            "redirectCall",
            json!({"callId": call.as_str(), "destination": destination}),
        )
    }

    async fn dtmf_call(&self, call: &CallId, digits: &str) -> EngineResult<Value> {
        self.record(
            "dtmfCall",
            json!({"callId": call.as_str(), "digits": digits}),
        )
    }

    async fn activate_audio_session(&self) -> EngineResult<Value> {
        self.record("activateAudioSession", json!({}))
    }

    async fn deactivate_audio_session(&self) -> EngineResult<Value> {
        self.record("deactivateAudioSession", json!({}))
    }

    async fn change_orientation(&self, orientation: &str) -> EngineResult<Value> {
        self.record("changeOrientation", json!({"orientation": orientation}))
    }

    async fn change_codec_settings(&self, settings: Value) -> EngineResult<Value> {
        self.record("changeCodecSettings", settings)
    }

    async fn change_network_configuration(&self, config: Value) -> EngineResult<Value> {
        self.record("changeNetworkConfiguration", config)
    }

    async fn change_service_configuration(&self, config: Value) -> EngineResult<Value> {
        self.record("changeServiceConfiguration", config)
    }
}

/// Decode an account view from a raw payload.
pub fn account(payload: Value) -> Account {
    serde_json::from_value(payload).unwrap()
}

/// Decode a call view from a raw payload.
pub fn call(payload: Value) -> Call {
    serde_json::from_value(payload).unwrap()
}
