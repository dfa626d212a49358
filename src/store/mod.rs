//! Session Store
//!
//! Holds the bounded list of chat sessions and the active-session pointer.
//!
//! ## Architecture
//!
//! - **AppState**: serializable snapshot of everything the view draws
//! - **SessionStore**: owns the state, exposes the actions that mutate it
//!
//! Actions run one at a time against the current snapshot, so two appends
//! to the same session in quick succession are both kept.

mod error;
mod session_store;
mod state;

pub use error::{StoreError, StoreResult};
pub(crate) use session_store::{DashboardUpdate, RequestStart, TurnTarget};
pub use session_store::{SessionStore, StoreConfig, DEFAULT_MAX_SESSIONS};
pub use state::{AppState, Screen};
