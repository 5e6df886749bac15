//! Serenity event handler for the rollcall bot.

use crate::commands::{PING, ping_command, run_ping};
use crate::host::emoji_ref;
use crate::SerenityHost;
use rollcall_core::{
    Aggregator, ChannelId, GuildId, Handled, MessageId, PayloadSink, ReactionEvent, UserId,
};
use serenity::all::{
    Command, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction, Reaction,
    Ready,
};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::gateway::ShardManager;
use serenity::model::gateway::GatewayIntents;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Generic reply when a slash command fails.
const COMMAND_FAILED: &str = "コマンドの実行中にエラーが発生しました。";

/// Event handler for the rollcall bot.
///
/// Routes trigger reactions into the [`Aggregator`] and answers `/ping`.
pub struct RollcallHandler<S> {
    aggregator: Arc<Aggregator<S>>,
    shard_manager: Arc<OnceLock<Arc<ShardManager>>>,
}

impl<S: PayloadSink + 'static> RollcallHandler<S> {
    /// Create a handler around a shared aggregator.
    pub fn new(aggregator: Arc<Aggregator<S>>) -> Self {
        Self {
            aggregator,
            shard_manager: Arc::new(OnceLock::new()),
        }
    }

    /// Slot filled with the shard manager once the client is built.
    pub fn shard_manager_slot(&self) -> Arc<OnceLock<Arc<ShardManager>>> {
        Arc::clone(&self.shard_manager)
    }

    /// Required gateway intents.
    ///
    /// Member listing and message content are privileged and only requested
    /// when the roster export is in use.
    pub fn intents(roster_export: bool) -> GatewayIntents {
        let base = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MESSAGE_REACTIONS;
        if roster_export {
            base | GatewayIntents::GUILD_MEMBERS | GatewayIntents::MESSAGE_CONTENT
        } else {
            base
        }
    }

    async fn gateway_latency(&self, ctx: &Context) -> Option<Duration> {
        let manager = self.shard_manager.get()?;
        let runners = manager.runners.lock().await;
        runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
    }

    async fn reactor_is_bot(ctx: &Context, reaction: &Reaction) -> bool {
        if let Some(member) = &reaction.member {
            return member.user.bot;
        }
        let Some(user_id) = reaction.user_id else {
            return false;
        };
        match ctx.http.get_user(user_id).await {
            Ok(user) => user.bot,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Could not fetch reacting user");
                false
            }
        }
    }
}

#[async_trait]
impl<S: PayloadSink + 'static> EventHandler for RollcallHandler<S> {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Bot connected");

        match Command::set_global_commands(&ctx.http, vec![ping_command()]).await {
            Ok(commands) => info!(count = commands.len(), "Slash commands registered"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    #[instrument(skip_all, fields(message_id = %reaction.message_id, channel_id = %reaction.channel_id))]
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let Some(user_id) = reaction.user_id else {
            debug!("Reaction without user, ignoring");
            return;
        };

        let event = ReactionEvent {
            emoji: emoji_ref(&reaction.emoji),
            message_id: MessageId(reaction.message_id.get()),
            channel_id: ChannelId(reaction.channel_id.get()),
            guild_id: reaction.guild_id.map(|id| GuildId(id.get())),
            user_id: UserId(user_id.get()),
            user_is_bot: Self::reactor_is_bot(&ctx, &reaction).await,
        };

        let host = SerenityHost::new(Arc::clone(&ctx.http));
        match self.aggregator.handle_reaction(&host, &event).await {
            Handled::Ignored(reason) => debug!(%reason, "Reaction ignored"),
            Handled::Ran(report) => debug!(stage = %report.stage, "Aggregation run finished"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let result = match command.data.name.as_str() {
            PING => run_ping(&ctx, &command, self.gateway_latency(&ctx).await).await,
            other => {
                error!(command = other, "Unknown command");
                return;
            }
        };

        if let Err(e) = result {
            error!(command = %command.data.name, error = %e, "Command failed");
            let reply = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(COMMAND_FAILED)
                    .ephemeral(true),
            );
            if let Err(e) = command.create_response(&ctx.http, reply).await {
                error!(error = %e, "Could not report command failure");
            }
        }
    }
}
