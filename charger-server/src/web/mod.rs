//! Web layer for the corridor charger finder.
//!
//! JSON endpoints for ranking chargers and managing the blacklist.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
