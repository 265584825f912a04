//! Core client for the hosted FinTrack personal-finance REST API.
//!
//! The crate is a thin client: it owns token storage, session state, and
//! transaction-list pagination, and leaves all rendering to its callers.
//! Everything is constructed explicitly at the application root; there is
//! no global state.

pub use config::ApiConfig;
pub use error::{ClientError, Result};
pub use http::ApiClient;
pub use session::{SessionManager, SessionState};
pub use store::TokenStore;
pub use transactions::{ListQuery, PageRequest, TransactionList, TypeFilter};

mod config;
mod error;
mod http;
mod session;
mod store;
mod transactions;
