//! Discord bot client setup and lifecycle management.

use crate::{
    AnnouncementConfig, AnnouncementScheduler, DiscordError, DiscordErrorKind, DiscordResult,
    RollcallHandler, SerenityHost,
};
use rollcall_core::{Aggregator, PayloadSink};
use serenity::Client;
use serenity::gateway::ShardManager;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord bot client for rollcall.
///
/// # Example
/// ```rust,ignore
/// use rollcall_core::{AggregateSettings, Aggregator};
/// use rollcall_sheets::SheetsDispatcher;
/// use rollcall_social::RollcallBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let aggregator = Aggregator::new(AggregateSettings::default(), SheetsDispatcher::new(""));
///
///     let mut bot = RollcallBot::new(&token, aggregator, &[], false).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct RollcallBot {
    client: Client,
    scheduler: Arc<AnnouncementScheduler<SerenityHost>>,
}

/// Handle used to stop a running bot from another task.
#[derive(Clone)]
pub struct ShutdownHandle {
    shard_manager: Arc<ShardManager>,
    scheduler: Arc<AnnouncementScheduler<SerenityHost>>,
}

impl ShutdownHandle {
    /// Stop announcements and close every shard.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        info!("Shutting down");
        self.scheduler.stop_all();
        self.shard_manager.shutdown_all().await;
    }
}

impl RollcallBot {
    /// Build the serenity client and schedule announcements.
    ///
    /// `roster_export` requests the privileged member and content intents.
    ///
    /// # Errors
    /// Returns an error if the serenity client fails to initialize.
    #[instrument(skip_all, fields(token_len = token.len(), announcements = announcements.len()))]
    pub async fn new<S>(
        token: &str,
        aggregator: Aggregator<S>,
        announcements: &[AnnouncementConfig],
        roster_export: bool,
    ) -> DiscordResult<Self>
    where
        S: PayloadSink + 'static,
    {
        info!("Initializing rollcall Discord bot");

        let offset = *aggregator.settings().utc_offset();
        let handler = RollcallHandler::new(Arc::new(aggregator));
        let shard_slot = handler.shard_manager_slot();
        let intents = RollcallHandler::<S>::intents(roster_export);

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;
        // The slot is fresh, so the first set cannot fail.
        let _ = shard_slot.set(Arc::clone(&client.shard_manager));

        let host = Arc::new(SerenityHost::new(Arc::clone(&client.http)));
        let scheduler = Arc::new(AnnouncementScheduler::new(host, offset));
        scheduler.schedule_all(announcements);

        info!("Serenity client built successfully");
        Ok(Self { client, scheduler })
    }

    /// Handle for stopping the bot, e.g. from a signal listener.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shard_manager: Arc::clone(&self.client.shard_manager),
            scheduler: Arc::clone(&self.scheduler),
        }
    }

    /// Run until the gateway closes or [`ShutdownHandle::shutdown`] is called.
    ///
    /// # Errors
    /// Returns an error if the client encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        self.scheduler.stop_all();
        Ok(())
    }
}
