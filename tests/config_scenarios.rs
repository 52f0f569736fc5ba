//! End-to-end configuration scenarios
//!
//! Each scenario feeds raw document text through the public API, the same
//! way the settings UI and CLI do.

mod helpers;
mod scenarios;
