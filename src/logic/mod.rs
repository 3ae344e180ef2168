//! Business Logic
//!
//! Pure functions and small value types that can be unit tested without I/O:
//! - errors: Error classification and the session-expiry sentinel
//! - favorites: Local favorites mirror and pagination bookkeeping
//! - navigation: Hall plan list selection movement
//! - watchlists: Watchlist eligibility and creation bodies

pub mod errors;
pub mod favorites;
pub mod navigation;
pub mod watchlists;
