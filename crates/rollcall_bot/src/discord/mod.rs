//! Discord integration for Rollcall.
//!
//! This module binds the refresh engine to Discord via Serenity:
//!
//! - **gateway**: [`SerenityGateway`], the production `RoleGateway` over
//!   the HTTP client and the gateway cache
//! - **handler**: [`RollcallHandler`], the event handler that dispatches
//!   prefix commands, removal reactions, and restart recovery on ready
//! - **client**: [`RollcallBot`], client setup and lifecycle

mod client;
mod gateway;
mod handler;

pub use client::RollcallBot;
pub use gateway::SerenityGateway;
pub use handler::RollcallHandler;
