//! Discord integration and the live-dashboard refresh engine.
//!
//! This crate wires the Rollcall domain onto Discord:
//! - **config**: environment-driven settings (poll interval, prefix, ...)
//! - **gateway**: the `RoleGateway` trait isolating every Discord call the
//!   engine issues, so the engine is testable without a live session
//! - **feats**: TTL-cached feat (badge) lookup per tracked role
//! - **task**: `DashboardTask`, the per-dashboard poll/render/diff/edit
//!   state machine
//! - **supervisor**: owns the live task set; restart recovery,
//!   registration, and deregistration
//! - **commands**: prefix command parsing
//! - **discord**: the Serenity-backed gateway, event handler, and client

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commands;
mod config;
mod discord;
mod feats;
mod gateway;
mod supervisor;
mod task;

pub use commands::{usage, Command};
pub use config::RollcallConfig;
pub use discord::{RollcallBot, RollcallHandler, SerenityGateway};
pub use feats::FeatLookup;
pub use gateway::RoleGateway;
pub use supervisor::{Supervisor, SupervisorConfig, PLACEHOLDER_TEXT};
pub use task::{DashboardHandle, DashboardTask};
