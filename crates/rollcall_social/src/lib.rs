//! Discord integration for rollcall.
//!
//! - **host**: [`SerenityHost`], the REST-backed `ReactionHost`
//! - **handler**: gateway events routed into the aggregation pipeline
//! - **commands**: the `/ping` slash command
//! - **scheduler**: cron-driven role-mention announcements
//! - **client**: client construction, intents and shutdown

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod commands;
mod error;
mod handler;
mod host;
mod scheduler;

pub use client::{RollcallBot, ShutdownHandle};
pub use commands::{PING, PING_PENDING, ping_command, ping_report, run_ping};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::RollcallHandler;
pub use host::{SerenityHost, classify_channel, emoji_ref, guild_member, reaction_type};
pub use scheduler::{
    AnnouncementConfig, AnnouncementScheduler, announcement_text, daily_expression, next_fire,
    parse_cron,
};
