//! Reaction aggregation for rollcall.
//!
//! This crate turns the reactions on a chat message into disjoint category
//! headcounts, a per-member attendance roster and a human-readable summary.
//! Access to the chat platform goes through [`ReactionHost`]; export goes
//! through [`PayloadSink`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attendance;
mod collation;
mod debounce;
mod emoji;
mod host;
mod ids;
mod payload;
mod pipeline;
mod reactors;
mod roster;
mod settings;
mod summary;
mod tally;

pub use attendance::{AttendanceLabel, AttendanceSets, GenericAttendingSlot};
pub use collation::{collation_key, compare_names};
pub use debounce::{Clock, DEFAULT_COOLDOWN, ManualClock, SystemClock, TriggerDebouncer};
pub use emoji::EmojiRef;
pub use host::{
    Destination, DestinationKind, GuildMember, MessageSnapshot, ReactionHost, Reactor,
};
pub use ids::{ChannelId, GuildId, MessageId, RoleId, UserId, parse_optional_id};
pub use payload::{
    AggregateBlock, ExportPayload, MemberRow, SheetNames, format_retrieved_at, sort_rows,
};
pub use pipeline::{Aggregator, Handled, IgnoreReason, PayloadSink, ReactionEvent, RunReport, RunStage};
pub use reactors::collect_user_ids;
pub use roster::{Role, RoleTable, RosterEntry, mentioned_role_ids, select_roster};
pub use settings::{AggregateSettings, AggregateSettingsBuilder};
pub use summary::{FAILURE_NOTICE, format_summary};
pub use tally::{AggregateResult, CategorySets, DisjointCategorySets, FIXED_OCCUPANTS, GUESTS_PER_A};
