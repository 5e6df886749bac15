//! Slash commands.

use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse,
};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Name of the latency check command.
pub const PING: &str = "ping";

/// Initial reply, edited once latency is known.
pub const PING_PENDING: &str = "Pong! 計測中...";

/// Registration payload for `/ping`.
pub fn ping_command() -> CreateCommand {
    CreateCommand::new(PING).description("Botの応答速度を確認します")
}

/// Final `/ping` reply.
///
/// # Examples
///
/// ```
/// use rollcall_social::ping_report;
/// use std::time::Duration;
///
/// let text = ping_report(Duration::from_millis(120), Some(Duration::from_millis(45)));
/// assert!(text.contains("120ms"));
/// assert!(text.contains("45ms"));
/// ```
pub fn ping_report(round_trip: Duration, gateway: Option<Duration>) -> String {
    let gateway = gateway
        .map(|latency| format!("{}ms", latency.as_millis()))
        .unwrap_or_else(|| "計測不可".to_string());
    format!(
        "🏓 Pong!\n📊 レイテンシ: {}ms\n🌐 APIレイテンシ: {}",
        round_trip.as_millis(),
        gateway
    )
}

/// Answer `/ping`: reply immediately, then edit in the measured latencies.
#[instrument(skip_all, fields(command = PING))]
pub async fn run_ping(
    ctx: &Context,
    command: &CommandInteraction,
    gateway: Option<Duration>,
) -> DiscordResult<()> {
    let started = Instant::now();
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().content(PING_PENDING),
            ),
        )
        .await
        .map_err(|e| DiscordError::new(DiscordErrorKind::InteractionFailed(e.to_string())))?;
    let round_trip = started.elapsed();
    debug!(round_trip_ms = round_trip.as_millis() as u64, "Ping reply sent");

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(ping_report(round_trip, gateway)),
        )
        .await
        .map_err(|e| DiscordError::new(DiscordErrorKind::InteractionFailed(e.to_string())))?;
    Ok(())
}
