//! Settings consumed by the aggregation pipeline.

use crate::{ChannelId, DEFAULT_COOLDOWN, GenericAttendingSlot, RoleTable, SheetNames};
use chrono::FixedOffset;
use derive_getters::Getters;
use std::time::Duration;

/// Everything an aggregation run needs to know about the deployment.
///
/// Values are opaque to the pipeline; an empty emoji string disables the
/// corresponding reaction.
///
/// # Examples
///
/// ```
/// use rollcall_core::AggregateSettings;
///
/// let settings = AggregateSettings::builder()
///     .reaction_absent("🙅")
///     .build()
///     .unwrap();
/// assert_eq!(settings.trigger(), "📊");
/// assert_eq!(settings.reaction_absent(), "🙅");
/// ```
#[derive(Debug, Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AggregateSettings {
    /// Emoji that starts an aggregation.
    #[builder(default = "\"📊\".to_string()")]
    trigger: String,

    /// Category A emoji.
    #[builder(default = "\"🅰️\".to_string()")]
    reaction_a: String,

    /// Category B emoji.
    #[builder(default = "\"🅱️\".to_string()")]
    reaction_b: String,

    /// Category C emoji.
    #[builder(default = "\"©️\".to_string()")]
    reaction_c: String,

    /// Absence emoji; empty disables absence tracking.
    #[builder(default)]
    reaction_absent: String,

    /// Generic attending emojis; empty means any other reaction.
    #[builder(default)]
    reaction_attending: Vec<String>,

    /// Tracked role ids.
    #[builder(default)]
    roles: RoleTable,

    /// Export sheet names.
    #[builder(default)]
    sheets: SheetNames,

    /// Thread to post summaries to instead of the originating channel.
    #[builder(default)]
    result_thread: Option<ChannelId>,

    /// Debounce window per message.
    #[builder(default = "DEFAULT_COOLDOWN")]
    debounce: Duration,

    /// Offset used for the export timestamp.
    #[builder(default = "default_offset()")]
    utc_offset: FixedOffset,

    /// Precedence of generic attendance.
    #[builder(default)]
    attending_slot: GenericAttendingSlot,

    /// Log every reaction on the trigger message.
    #[builder(default)]
    debug_reactions: bool,

    /// Log chat output instead of sending it.
    #[builder(default)]
    debug_no_discord_send: bool,

    /// Log the export payload before dispatch.
    #[builder(default)]
    debug_spreadsheet: bool,
}

impl AggregateSettings {
    /// Creates a new settings builder.
    pub fn builder() -> AggregateSettingsBuilder {
        AggregateSettingsBuilder::default()
    }

    /// Whether `emoji` is the trigger, a category or the absence emoji.
    pub(crate) fn is_reserved_emoji(&self, emoji: &crate::EmojiRef) -> bool {
        [
            &self.trigger,
            &self.reaction_a,
            &self.reaction_b,
            &self.reaction_c,
            &self.reaction_absent,
        ]
        .into_iter()
        .any(|value| emoji.matches(value))
    }
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            trigger: "📊".to_string(),
            reaction_a: "🅰️".to_string(),
            reaction_b: "🅱️".to_string(),
            reaction_c: "©️".to_string(),
            reaction_absent: String::new(),
            reaction_attending: Vec::new(),
            roles: RoleTable::default(),
            sheets: SheetNames::default(),
            result_thread: None,
            debounce: DEFAULT_COOLDOWN,
            utc_offset: default_offset(),
            attending_slot: GenericAttendingSlot::default(),
            debug_reactions: false,
            debug_no_discord_send: false,
            debug_spreadsheet: false,
        }
    }
}

/// Japan Standard Time.
fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("Valid JST offset")
}
