//! Glowcheck HTTP gateway.
//!
//! Serves the single-page UI and the analysis API. One analysis request maps
//! to one orchestrator run on its own task, streamed back as server-sent
//! events so the page can show per-phase progress instead of a single
//! end-to-end spinner.

pub mod routes;
pub mod server;
pub mod ui;

pub use server::{start_server, GatewayState};
