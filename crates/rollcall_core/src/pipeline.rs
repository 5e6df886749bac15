//! One aggregation run, from reaction event to posted summary.
//!
//! ```text
//! Received → Classifying → Aggregating → Resolving → Building → Dispatching → Reporting → Done
//!                 └────────────┴────────────┴───────────┘                      │
//!                                   ↓                                          │
//!                                 Failed ←─────────────────────────────────────┘
//! ```
//!
//! Export failures inside `Dispatching` are absorbed and never reach `Failed`.
//! Posting the summary happens in `Reporting`, after the export has settled.

use crate::{
    AggregateResult, AggregateSettings, AttendanceSets, CategorySets, ChannelId, Clock,
    Destination, DestinationKind, DisjointCategorySets, EmojiRef, ExportPayload, FAILURE_NOTICE,
    GuildId, MemberRow, MessageId, MessageSnapshot, ReactionHost, SystemClock, TriggerDebouncer,
    UserId, collect_user_ids, format_summary, mentioned_role_ids, select_roster,
};
use async_trait::async_trait;
use chrono::Utc;
use rollcall_error::RollcallResult;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

/// A reaction-add notification from the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Emoji that was added.
    pub emoji: EmojiRef,
    /// Message it was added to.
    pub message_id: MessageId,
    /// Channel holding the message.
    pub channel_id: ChannelId,
    /// Guild holding the channel, if any.
    pub guild_id: Option<GuildId>,
    /// User who reacted.
    pub user_id: UserId,
    /// Whether that user is automated.
    pub user_is_bot: bool,
}

/// Receives the export payload at the end of a run.
#[async_trait]
pub trait PayloadSink: Send + Sync {
    /// Deliver the payload once. Returns whether delivery succeeded.
    async fn dispatch(&self, payload: &ExportPayload) -> bool;
}

/// Stages of an aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RunStage {
    /// Event accepted by the debouncer.
    Received,
    /// Collecting and classifying category reactors.
    Classifying,
    /// Deriving headcounts.
    Aggregating,
    /// Building the member roster and attendance labels.
    Resolving,
    /// Sorting rows and assembling the payload.
    Building,
    /// Handing the payload to the export sink.
    Dispatching,
    /// Posting the summary to chat.
    Reporting,
    /// Summary posted.
    Done,
    /// Aborted; a failure notice was posted.
    Failed,
}

/// Why an event did not start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// Reaction came from a bot account.
    #[display("reaction by bot")]
    BotReaction,
    /// Emoji is not the trigger.
    #[display("not the trigger emoji")]
    NotTrigger,
    /// The message could not be fetched.
    #[display("message unavailable")]
    MessageUnavailable,
    /// The channel cannot receive text.
    #[display("channel not sendable")]
    NotSendable,
    /// The message was processed within the cooldown window.
    #[display("debounced")]
    Debounced,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Message the run aggregated.
    pub message_id: MessageId,
    /// Last stage reached.
    pub stage: RunStage,
    /// Stage that failed, if the run failed.
    pub failed_at: Option<RunStage>,
    /// Headcounts, once computed.
    pub aggregate: Option<AggregateResult>,
    /// Number of member rows exported.
    pub exported_rows: usize,
    /// Whether the export sink accepted the payload.
    pub exported: bool,
    /// Channel the summary or failure notice went to.
    pub posted_to: Option<ChannelId>,
}

impl RunReport {
    fn new(message_id: MessageId) -> Self {
        Self {
            message_id,
            stage: RunStage::Received,
            failed_at: None,
            aggregate: None,
            exported_rows: 0,
            exported: false,
            posted_to: None,
        }
    }

    fn advance(&mut self, next: RunStage) {
        debug!(message_id = %self.message_id, from = %self.stage, to = %next, "Run stage");
        self.stage = next;
    }

    fn fail(&mut self) {
        self.failed_at = Some(self.stage);
        self.advance(RunStage::Failed);
    }
}

/// Outcome of handling one reaction event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// No run was started.
    Ignored(IgnoreReason),
    /// A run was started; it may have completed or failed.
    Ran(RunReport),
}

/// Reaction-triggered aggregation.
///
/// Owns the debounce registry and the export sink. The host platform is
/// passed per event.
pub struct Aggregator<S, C = SystemClock> {
    settings: AggregateSettings,
    sink: S,
    debouncer: TriggerDebouncer<C>,
}

impl<S: PayloadSink> Aggregator<S, SystemClock> {
    /// Aggregator on the system clock.
    pub fn new(settings: AggregateSettings, sink: S) -> Self {
        Self::with_clock(settings, sink, SystemClock)
    }
}

impl<S: PayloadSink, C: Clock> Aggregator<S, C> {
    /// Aggregator on an arbitrary clock.
    pub fn with_clock(settings: AggregateSettings, sink: S, clock: C) -> Self {
        let debouncer = TriggerDebouncer::with_clock(*settings.debounce(), clock);
        Self {
            settings,
            sink,
            debouncer,
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &AggregateSettings {
        &self.settings
    }

    /// Handle a reaction-add event.
    ///
    /// Never returns an error: failures inside a run are reported to the
    /// originating channel and recorded in the [`RunReport`].
    #[instrument(
        skip(self, host, event),
        fields(message_id = %event.message_id, channel_id = %event.channel_id, user_id = %event.user_id)
    )]
    pub async fn handle_reaction<H>(&self, host: &H, event: &ReactionEvent) -> Handled
    where
        H: ReactionHost + ?Sized,
    {
        if event.user_is_bot {
            return Handled::Ignored(IgnoreReason::BotReaction);
        }
        if !event.emoji.matches(self.settings.trigger()) {
            return Handled::Ignored(IgnoreReason::NotTrigger);
        }

        let message = match host.fetch_message(event.channel_id, event.message_id).await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Could not fetch trigger message");
                return Handled::Ignored(IgnoreReason::MessageUnavailable);
            }
        };

        let origin = match host
            .destination(event.channel_id, DestinationKind::AnyText)
            .await
        {
            Ok(Destination::Sendable(channel)) => channel,
            Ok(Destination::NotSendable) => return Handled::Ignored(IgnoreReason::NotSendable),
            Err(e) => {
                warn!(error = %e, "Could not resolve originating channel");
                return Handled::Ignored(IgnoreReason::NotSendable);
            }
        };

        if !self.debouncer.should_process(message.id) {
            debug!("Trigger debounced");
            return Handled::Ignored(IgnoreReason::Debounced);
        }

        let mut report = RunReport::new(message.id);
        if let Err(e) = self
            .execute(host, &message, event.guild_id, origin, &mut report)
            .await
        {
            error!(error = %e, stage = %report.stage, "Aggregation run failed");
            report.fail();
            match self.post(host, origin, FAILURE_NOTICE).await {
                Ok(()) => report.posted_to = Some(origin),
                Err(e) => error!(error = %e, "Could not post failure notice"),
            }
        }
        Handled::Ran(report)
    }

    async fn execute<H>(
        &self,
        host: &H,
        message: &MessageSnapshot,
        guild: Option<GuildId>,
        origin: ChannelId,
        report: &mut RunReport,
    ) -> RollcallResult<()>
    where
        H: ReactionHost + ?Sized,
    {
        report.advance(RunStage::Classifying);
        self.log_reaction_details(message);
        let categories = self.collect_categories(host, message).await.classify();

        report.advance(RunStage::Aggregating);
        let aggregate = categories.aggregate();
        report.aggregate = Some(aggregate);

        report.advance(RunStage::Resolving);
        let rows = self.resolve_rows(host, message, guild, categories).await;

        report.advance(RunStage::Building);
        let retrieved_at = Utc::now().with_timezone(self.settings.utc_offset());
        let payload = ExportPayload::build(
            rows,
            aggregate,
            self.settings.sheets().clone(),
            &retrieved_at,
        );
        report.exported_rows = payload.members().len();
        self.log_payload(&payload);

        report.advance(RunStage::Dispatching);
        report.exported = self.sink.dispatch(&payload).await;

        report.advance(RunStage::Reporting);
        let target = self.summary_target(host, origin).await;
        self.post(host, target, &format_summary(&aggregate)).await?;
        report.posted_to = Some(target);
        report.advance(RunStage::Done);

        info!(
            channel_id = %target,
            staff = aggregate.staff,
            guest = aggregate.guest,
            instance = aggregate.instance,
            "Aggregation summary sent"
        );
        Ok(())
    }

    async fn collect_categories<H>(&self, host: &H, message: &MessageSnapshot) -> CategorySets
    where
        H: ReactionHost + ?Sized,
    {
        let mut sets = CategorySets::default();
        for emoji in &message.reactions {
            if emoji.matches(self.settings.reaction_a()) {
                sets.a = collect_user_ids(host, message, emoji).await;
            } else if emoji.matches(self.settings.reaction_b()) {
                sets.b = collect_user_ids(host, message, emoji).await;
            } else if emoji.matches(self.settings.reaction_c()) {
                sets.c = collect_user_ids(host, message, emoji).await;
            }
        }
        if *self.settings.debug_reactions() {
            debug!(
                a = sets.a.len(),
                b = sets.b.len(),
                c = sets.c.len(),
                "Matched category reactors"
            );
        }
        sets
    }

    async fn resolve_rows<H>(
        &self,
        host: &H,
        message: &MessageSnapshot,
        guild: Option<GuildId>,
        categories: DisjointCategorySets,
    ) -> Vec<MemberRow>
    where
        H: ReactionHost + ?Sized,
    {
        let Some(guild) = guild else {
            debug!("Message is outside a guild, no roster");
            return Vec::new();
        };

        let roles = self.settings.roles();
        let mentioned = mentioned_role_ids(&message.content);
        if !roles.configured().any(|(_, id)| mentioned.contains(&id)) {
            debug!("No tracked role mentioned, skipping member fetch");
            return Vec::new();
        }

        let members = match host.fetch_members(guild).await {
            Ok(members) => members,
            Err(e) => {
                error!(guild_id = %guild, error = %e, "Failed to fetch guild members");
                return Vec::new();
            }
        };
        let roster = select_roster(&members, roles, &mentioned);
        if roster.is_empty() {
            return Vec::new();
        }

        let (absent, attending) = self.collect_attendance(host, message).await;
        let sets = AttendanceSets {
            categories,
            absent,
            attending,
        };
        let slot = *self.settings.attending_slot();
        roster
            .into_iter()
            .map(|entry| {
                let status = sets.resolve(entry.user_id, slot);
                MemberRow::new(entry.user_id, entry.name, entry.role, status)
            })
            .collect()
    }

    async fn collect_attendance<H>(
        &self,
        host: &H,
        message: &MessageSnapshot,
    ) -> (HashSet<UserId>, HashSet<UserId>)
    where
        H: ReactionHost + ?Sized,
    {
        let mut absent = HashSet::new();
        let mut attending = HashSet::new();
        let tracked_attending = self.settings.reaction_attending();
        for emoji in &message.reactions {
            if emoji.matches(self.settings.reaction_absent()) {
                absent.extend(collect_user_ids(host, message, emoji).await);
            } else if self.counts_as_attending(emoji, tracked_attending) {
                attending.extend(collect_user_ids(host, message, emoji).await);
            }
        }
        (absent, attending)
    }

    fn counts_as_attending(&self, emoji: &EmojiRef, tracked: &[String]) -> bool {
        if tracked.iter().any(|value| !value.is_empty()) {
            emoji.matches_any(tracked)
        } else {
            !self.settings.is_reserved_emoji(emoji)
        }
    }

    async fn summary_target<H>(&self, host: &H, origin: ChannelId) -> ChannelId
    where
        H: ReactionHost + ?Sized,
    {
        let Some(thread) = *self.settings.result_thread() else {
            return origin;
        };
        match host.destination(thread, DestinationKind::ThreadOnly).await {
            Ok(Destination::Sendable(channel)) => channel,
            Ok(Destination::NotSendable) => {
                error!(thread_id = %thread, "Configured result thread is not a thread");
                origin
            }
            Err(e) => {
                error!(thread_id = %thread, error = %e, "Failed to fetch result thread");
                origin
            }
        }
    }

    async fn post<H>(&self, host: &H, channel: ChannelId, text: &str) -> RollcallResult<()>
    where
        H: ReactionHost + ?Sized,
    {
        if *self.settings.debug_no_discord_send() {
            info!(channel_id = %channel, text, "Chat send suppressed");
            return Ok(());
        }
        host.send_text(channel, text).await?;
        Ok(())
    }

    fn log_reaction_details(&self, message: &MessageSnapshot) {
        if !*self.settings.debug_reactions() {
            return;
        }
        const KEYS: [&str; 3] = ["REACTION_A", "REACTION_B", "REACTION_C"];
        debug!(count = message.reactions.len(), "Reactions on message");
        let mut hints = KEYS.iter();
        for (index, emoji) in message.reactions.iter().enumerate() {
            let is_trigger = emoji.matches(self.settings.trigger());
            debug!(
                index = index + 1,
                id = emoji.id.as_deref().unwrap_or("null"),
                name = ?emoji.name,
                trigger = is_trigger,
                "Reaction"
            );
            let value = emoji.config_value();
            if !is_trigger && !value.is_empty() {
                let key = hints.next().copied().unwrap_or("REACTION_?");
                debug!("  copy to configuration: {}={}", key, value);
            }
        }
        debug!(
            reaction_a = ?self.settings.reaction_a(),
            reaction_b = ?self.settings.reaction_b(),
            reaction_c = ?self.settings.reaction_c(),
            "Current category configuration"
        );
    }

    fn log_payload(&self, payload: &ExportPayload) {
        if !*self.settings.debug_spreadsheet() {
            return;
        }
        info!(
            sheet1 = %payload.sheets().sheet1_name,
            sheet2 = %payload.sheets().sheet2_name,
            members = payload.members().len(),
            "Export payload prepared"
        );
        for (index, row) in payload.members().iter().enumerate() {
            info!(index = index + 1, name = %row.name(), status = %row.status(), role = %row.role(), "Export row");
        }
        match serde_json::to_string(payload.aggregate_block()) {
            Ok(json) => info!(aggregate = %json, "Export aggregate"),
            Err(e) => warn!(error = %e, "Could not render export aggregate"),
        }
    }
}
