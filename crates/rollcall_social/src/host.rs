//! [`ReactionHost`] backed by the Discord REST API.

use async_trait::async_trait;
use rollcall_core::{
    ChannelId, Destination, DestinationKind, EmojiRef, GuildId, GuildMember, MessageId,
    MessageSnapshot, ReactionHost, Reactor, RoleId, UserId,
};
use rollcall_error::{PlatformError, PlatformErrorKind, PlatformResult};
use serenity::all::{Channel, ChannelType, EmojiId, Member, ReactionType};
use serenity::http::Http;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Discord caps reaction user pages at 100.
const REACTORS_PAGE: u8 = 100;
/// Discord caps member list pages at 1000.
const MEMBERS_PAGE: u64 = 1000;

/// Fresh-fetch view of Discord for the aggregation pipeline.
///
/// Every call goes to the REST API; nothing is read from a gateway cache.
#[derive(Clone)]
pub struct SerenityHost {
    http: Arc<Http>,
}

impl SerenityHost {
    /// Wrap a serenity HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

impl std::fmt::Debug for SerenityHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityHost").finish_non_exhaustive()
    }
}

/// Convert a snowflake into a serenity id. Serenity ids cannot be zero.
pub(crate) fn snowflake<T: From<u64>>(raw: u64, what: &str) -> PlatformResult<T> {
    if raw == 0 {
        return Err(PlatformError::new(PlatformErrorKind::NotFound(format!(
            "{what} 0"
        ))));
    }
    Ok(T::from(raw))
}

/// Emoji identity of a serenity reaction.
pub fn emoji_ref(reaction: &ReactionType) -> EmojiRef {
    match reaction {
        ReactionType::Custom { id, name, .. } => EmojiRef::custom(id.to_string(), name.clone()),
        ReactionType::Unicode(name) => EmojiRef::unicode(name.clone()),
        _ => EmojiRef {
            id: None,
            name: None,
        },
    }
}

/// Serenity reaction for an emoji identity.
pub fn reaction_type(emoji: &EmojiRef) -> PlatformResult<ReactionType> {
    match (&emoji.id, &emoji.name) {
        (Some(id), name) => {
            let raw = id.parse::<u64>().map_err(|e| {
                PlatformError::new(PlatformErrorKind::fetch("emoji", format!("{id}: {e}")))
            })?;
            Ok(ReactionType::Custom {
                animated: false,
                id: snowflake::<EmojiId>(raw, "emoji")?,
                name: name.clone(),
            })
        }
        (None, Some(name)) => Ok(ReactionType::Unicode(name.clone())),
        (None, None) => Err(PlatformError::new(PlatformErrorKind::NotFound(
            "emoji without id or name".to_string(),
        ))),
    }
}

/// Roster view of a serenity member.
pub fn guild_member(member: &Member) -> GuildMember {
    GuildMember {
        user_id: UserId(member.user.id.get()),
        display_name: member.display_name().to_string(),
        is_bot: member.user.bot,
        roles: member.roles.iter().map(|role| RoleId(role.get())).collect(),
    }
}

/// Whether a channel accepts plain text for the given destination kind.
pub fn classify_channel(channel: &Channel, kind: DestinationKind) -> bool {
    match channel {
        Channel::Guild(guild_channel) => match kind {
            DestinationKind::ThreadOnly => is_thread(guild_channel.kind),
            DestinationKind::AnyText => {
                is_thread(guild_channel.kind)
                    || matches!(
                        guild_channel.kind,
                        ChannelType::Text
                            | ChannelType::News
                            | ChannelType::Voice
                            | ChannelType::Stage
                    )
            }
        },
        Channel::Private(_) => kind == DestinationKind::AnyText,
        _ => false,
    }
}

fn is_thread(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread
    )
}

#[async_trait]
impl ReactionHost for SerenityHost {
    #[instrument(skip(self), fields(channel_id = %channel, message_id = %message))]
    async fn fetch_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> PlatformResult<MessageSnapshot> {
        let fetched = self
            .http
            .get_message(
                snowflake(channel.get(), "channel")?,
                snowflake(message.get(), "message")?,
            )
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::fetch("message", e)))?;

        Ok(MessageSnapshot {
            id: message,
            channel_id: channel,
            content: fetched.content.clone(),
            reactions: fetched
                .reactions
                .iter()
                .map(|reaction| emoji_ref(&reaction.reaction_type))
                .collect(),
        })
    }

    #[instrument(skip(self, message), fields(message_id = %message.id, emoji = emoji.config_value()))]
    async fn fetch_reactors(
        &self,
        message: &MessageSnapshot,
        emoji: &EmojiRef,
    ) -> PlatformResult<Vec<Reactor>> {
        let reaction = reaction_type(emoji)?;
        let channel = snowflake(message.channel_id.get(), "channel")?;
        let message_id = snowflake(message.id.get(), "message")?;

        let mut reactors = Vec::new();
        let mut after = None;
        loop {
            let page = self
                .http
                .get_reaction_users(channel, message_id, &reaction, REACTORS_PAGE, after)
                .await
                .map_err(|e| PlatformError::new(PlatformErrorKind::fetch("reactors", e)))?;
            let full = page.len() == usize::from(REACTORS_PAGE);
            after = page.last().map(|user| user.id.get());
            reactors.extend(page.into_iter().map(|user| Reactor {
                id: UserId(user.id.get()),
                is_bot: user.bot,
            }));
            if !full {
                break;
            }
        }
        debug!(count = reactors.len(), "Fetched reactors");
        Ok(reactors)
    }

    #[instrument(skip(self), fields(guild_id = %guild))]
    async fn fetch_members(&self, guild: GuildId) -> PlatformResult<Vec<GuildMember>> {
        let guild_id = snowflake(guild.get(), "guild")?;

        let mut members = Vec::new();
        let mut after = None;
        loop {
            let page = self
                .http
                .get_guild_members(guild_id, Some(MEMBERS_PAGE), after)
                .await
                .map_err(|e| PlatformError::new(PlatformErrorKind::fetch("members", e)))?;
            let full = page.len() as u64 == MEMBERS_PAGE;
            after = page.last().map(|member| member.user.id.get());
            members.extend(page.iter().map(guild_member));
            if !full {
                break;
            }
        }
        debug!(count = members.len(), "Fetched guild members");
        Ok(members)
    }

    #[instrument(skip(self), fields(channel_id = %channel))]
    async fn destination(
        &self,
        channel: ChannelId,
        kind: DestinationKind,
    ) -> PlatformResult<Destination> {
        let fetched = self
            .http
            .get_channel(snowflake(channel.get(), "channel")?)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::fetch("channel", e)))?;

        Ok(if classify_channel(&fetched, kind) {
            Destination::Sendable(channel)
        } else {
            Destination::NotSendable
        })
    }

    #[instrument(skip(self, text), fields(channel_id = %channel, len = text.len()))]
    async fn send_text(&self, channel: ChannelId, text: &str) -> PlatformResult<()> {
        let target: serenity::all::ChannelId = snowflake(channel.get(), "channel")?;
        target
            .say(&self.http, text)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::SendFailed(e.to_string())))?;
        Ok(())
    }
}
