//! # sip-endpoint — typed facade over a native SIP engine
//!
//! This crate is the application-side half of a SIP client: every
//! operation is a thin async pass-through to an opaque native engine
//! (reached via the [`SipEngine`] trait), and every engine notification is
//! republished as a typed [`EndpointEvent`]. All signaling, media, and
//! registration logic lives in the engine; this layer only translates.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use sip_endpoint::{AccountConfig, CallSettings, Endpoint, MsgData, SipEngine};
//!
//! async fn run(engine: Arc<dyn SipEngine>) -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::new(engine);
//!
//!     // Initialize the engine before anything else.
//!     let snapshot = endpoint.start(json!({})).await?;
//!     println!("{} accounts restored", snapshot.accounts.len());
//!
//!     let account = endpoint
//!         .create_account(&AccountConfig {
//!             username: "100".into(),
//!             domain: "pbx.com".into(),
//!             password: "secret".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     // Bare destinations are expanded against the account realm.
//!     let call = endpoint
//!         .make_call(&account, "200", &CallSettings::default(), &MsgData::default())
//!         .await?;
//!     endpoint.hangup_call(&call).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Events
//!
//! ```rust,no_run
//! use sip_endpoint::{Endpoint, EndpointEvent, EventKind};
//! # fn listen(endpoint: &Endpoint) {
//! let handle = endpoint.on(EventKind::CallReceived, |event| {
//!     if let EndpointEvent::CallReceived(call) = event {
//!         println!("incoming call from {}", call.remote_uri());
//!     }
//! });
//! # endpoint.remove_listener(&handle);
//! # }
//! ```
//!
//! An async stream is available through [`Endpoint::subscribe`]. Delivery
//! order equals the engine's delivery order for every subscriber.

#![warn(missing_docs)]

pub mod account;
pub mod call;
pub mod config;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod events;
pub mod message;
pub mod uri;

pub use account::{Account, AccountId, RegistrationStatus};
pub use call::{Call, CallDirection, CallId, CallState};
pub use config::{AccountConfig, CallSettings, MsgData, Orientation};
pub use endpoint::{Endpoint, StartSummary};
pub use engine::{EngineError, EngineNotification, EngineResult, SipEngine};
pub use error::{EndpointError, EndpointResult};
pub use events::{EndpointEvent, EventEmitter, EventKind, EventStream, ListenerHandle};
pub use message::Message;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
