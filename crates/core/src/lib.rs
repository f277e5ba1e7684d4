//! Core types for scheduled-search governance.
//!
//! This crate provides:
//! - [`GovernanceRecord`]: one tracked scheduled search, as stored in the
//!   flagged-searches lookup
//! - [`SearchStatus`]: lifecycle statuses with legacy raw-value aliases
//! - [`GovernanceConfig`]: environment-driven policy knobs

pub mod config;
pub mod record;
pub mod status;

pub use config::{load_dotenv, GovernanceConfig};
pub use record::{epoch_to_datetime, GovernanceRecord};
pub use status::{ParseStatusError, SearchStatus};
