//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - keyboard: User keyboard input (hall plan, selector modal, expiry notice)
//! - sync: Notices from the background sync service

pub mod keyboard;
pub mod sync;

pub use keyboard::handle_key;
pub use sync::handle_sync_notice;
