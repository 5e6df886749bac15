//! Collecting the human reactors of a single reaction.

use crate::{EmojiRef, MessageSnapshot, ReactionHost, UserId};
use std::collections::HashSet;
use tracing::{debug, error, instrument};

/// Collect the ids of every human who reacted to `message` with `emoji`.
///
/// A failed fetch degrades to an empty set so the run can continue on
/// partial data.
#[instrument(skip(host, message), fields(message_id = %message.id, emoji = emoji.config_value()))]
pub async fn collect_user_ids<H>(host: &H, message: &MessageSnapshot, emoji: &EmojiRef) -> HashSet<UserId>
where
    H: ReactionHost + ?Sized,
{
    match host.fetch_reactors(message, emoji).await {
        Ok(reactors) => {
            let ids: HashSet<UserId> = reactors
                .into_iter()
                .filter(|reactor| !reactor.is_bot)
                .map(|reactor| reactor.id)
                .collect();
            debug!(count = ids.len(), "Collected reactors");
            ids
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch reactors, counting none");
            HashSet::new()
        }
    }
}
