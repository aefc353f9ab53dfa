//! Local JSON caches under the chatlist data directory.

mod auth;
mod links;
mod matches;

pub use auth::TokenManager;
pub use links::LinkManager;
pub use matches::MatchManager;
