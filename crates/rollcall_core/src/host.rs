//! The host chat platform seam.
//!
//! Everything the aggregation pipeline needs from the chat service goes
//! through [`ReactionHost`]. Nothing here assumes a warm cache: every method
//! is a fallible fetch that may suspend.

use crate::{ChannelId, EmojiRef, GuildId, MessageId, RoleId, UserId};
use async_trait::async_trait;
use rollcall_error::PlatformResult;

/// A user who applied a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reactor {
    /// Reacting user.
    pub id: UserId,
    /// Whether the account is automated.
    pub is_bot: bool,
}

impl Reactor {
    /// A human reactor.
    pub fn human(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            is_bot: false,
        }
    }

    /// An automated reactor.
    pub fn bot(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            is_bot: true,
        }
    }
}

/// A freshly fetched view of the trigger message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSnapshot {
    /// Message id.
    pub id: MessageId,
    /// Channel the message lives in.
    pub channel_id: ChannelId,
    /// Raw message text, used to find role mentions.
    pub content: String,
    /// Distinct emojis currently reacted on the message.
    pub reactions: Vec<EmojiRef>,
}

/// A guild member as seen by the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    /// Member's user id.
    pub user_id: UserId,
    /// Nickname, global name or username, whichever the platform shows.
    pub display_name: String,
    /// Whether the account is automated.
    pub is_bot: bool,
    /// Roles the member holds.
    pub roles: Vec<RoleId>,
}

/// Where a chat message can be posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// A channel the bot can post plain text to.
    Sendable(ChannelId),
    /// Exists, but does not accept text (voice, category, forum root, ...).
    NotSendable,
}

/// Which channels count as a valid destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    /// Any text-capable channel or thread.
    AnyText,
    /// Threads only.
    ThreadOnly,
}

/// Chat platform operations used by an aggregation run.
#[async_trait]
pub trait ReactionHost: Send + Sync {
    /// Fetch the message a reaction was added to.
    async fn fetch_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> PlatformResult<MessageSnapshot>;

    /// Fetch every user who reacted to `message` with `emoji`.
    async fn fetch_reactors(
        &self,
        message: &MessageSnapshot,
        emoji: &EmojiRef,
    ) -> PlatformResult<Vec<Reactor>>;

    /// Fetch the full member list of a guild.
    async fn fetch_members(&self, guild: GuildId) -> PlatformResult<Vec<GuildMember>>;

    /// Decide whether a channel can receive chat text.
    async fn destination(
        &self,
        channel: ChannelId,
        kind: DestinationKind,
    ) -> PlatformResult<Destination>;

    /// Post plain text to a channel.
    async fn send_text(&self, channel: ChannelId, text: &str) -> PlatformResult<()>;
}
