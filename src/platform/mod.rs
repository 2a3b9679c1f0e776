//! Platform abstraction layer
//!
//! Handles the browser side of the game:
//! - Device orientation and motion events
//! - Tick cadence driven by the page
//! - Storage (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub mod web;
