//! Layered bot configuration.
//!
//! Precedence, lowest first:
//! 1. Bundled defaults (include_str! from rollcall.toml)
//! 2. `./rollcall.toml`, or the file passed with `--config`
//! 3. Environment variables (`DISCORD_TOKEN`, `REACTION_A`, ...)
//!
//! `ROLE_IKEMO`, `ROLE_ANNAI` and `ROLE_URABATA` are still read and fill
//! `role_performer`, `role_guide` and `role_backstage` when those are empty.

use chrono::FixedOffset;
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use rollcall_core::{
    AggregateSettings, ChannelId, GenericAttendingSlot, RoleId, RoleTable, SheetNames,
    parse_optional_id,
};
use rollcall_error::{ConfigError, RollcallError, RollcallResult};
use rollcall_social::{AnnouncementConfig, daily_expression, parse_cron};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../rollcall.toml");

/// Earlier role key names, each filling its role when that role is unset.
const LEGACY_ROLE_KEYS: [(&str, &str); 3] = [
    ("role_ikemo", "role_performer"),
    ("role_annai", "role_guide"),
    ("role_urabata", "role_backstage"),
];

/// Everything the bot reads from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Settings {
    discord_token: String,
    reaction_trigger: String,
    reaction_a: String,
    reaction_b: String,
    reaction_c: String,
    reaction_absent: String,
    reaction_attending: String,
    role_performer: String,
    role_guide: String,
    role_backstage: String,
    spreadsheet_api_url: String,
    sheet1_name: String,
    sheet2_name: String,
    result_thread_id: String,
    debounce_ms: u64,
    utc_offset_hours: i32,
    generic_attending_slot: GenericAttendingSlot,
    debug_reactions: bool,
    debug_no_discord_send: bool,
    debug_spreadsheet: bool,
    #[serde(default)]
    announcements: Vec<AnnouncementConfig>,
}

impl Settings {
    /// Load from the bundled defaults, an optional file and the process
    /// environment.
    ///
    /// With `path` the file must exist; without it `./rollcall.toml` is used
    /// if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> RollcallResult<Self> {
        Self::load_with_env(path, Environment::default().try_parsing(true))
    }

    /// [`Settings::load`] with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> RollcallResult<Self> {
        debug!(?path, "Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("rollcall").required(false)),
        };

        let build_failed = |e: config::ConfigError| {
            RollcallError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        };
        let merged = builder.add_source(env).build().map_err(build_failed)?;

        let legacy: Vec<(&str, String)> = LEGACY_ROLE_KEYS
            .iter()
            .filter(|(_, key)| {
                merged
                    .get_string(key)
                    .map_or(true, |value| value.trim().is_empty())
            })
            .filter_map(|(legacy, key)| {
                let value = merged.get_string(legacy).ok()?;
                debug!(legacy, key, "Using legacy role key");
                Some((*key, value))
            })
            .collect();

        let mut builder = Config::builder().add_source(merged);
        for (key, value) in legacy {
            builder = builder.set_override(key, value).map_err(build_failed)?;
        }

        builder
            .build()
            .map_err(build_failed)?
            .try_deserialize()
            .map_err(|e| {
                RollcallError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Check the values the bot cannot start without.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the token is missing or the offset is
    /// out of range.
    pub fn validate(&self) -> RollcallResult<()> {
        if self.discord_token.trim().is_empty() {
            return Err(ConfigError::for_key("discord_token", "is not set").into());
        }
        self.utc_offset()?;
        Ok(())
    }

    /// Non-fatal problems worth reporting at startup.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (key, value) in [
            ("role_performer", &self.role_performer),
            ("role_guide", &self.role_guide),
            ("role_backstage", &self.role_backstage),
            ("result_thread_id", &self.result_thread_id),
        ] {
            let value = value.trim();
            if !value.is_empty() && !matches!(value.parse::<u64>(), Ok(id) if id != 0) {
                warnings.push(format!("{key} is not a valid id and will be ignored: {value}"));
            }
        }

        if self.roster_export() && self.role_table().configured().next().is_none() {
            warnings.push(
                "spreadsheet_api_url is set but no role ids are configured; exports will have no members"
                    .to_string(),
            );
        }
        if self.reaction_trigger.trim().is_empty() {
            warnings.push("reaction_trigger is empty; aggregation can never start".to_string());
        }

        for (index, entry) in self.announcements.iter().enumerate() {
            let checked = match (&entry.cron, &entry.daily) {
                (Some(expression), None) => parse_cron(expression).map(|_| ()),
                (None, Some(time)) => daily_expression(time).map(|_| ()),
                _ => {
                    warnings.push(format!(
                        "announcements[{index}] must set exactly one of cron or daily"
                    ));
                    continue;
                }
            };
            if let Err(e) = checked {
                warnings.push(format!("announcements[{index}] is invalid: {e}"));
            }
        }

        warnings
    }

    /// Whether the spreadsheet export (and with it the member roster) is on.
    pub fn roster_export(&self) -> bool {
        !self.spreadsheet_api_url.trim().is_empty()
    }

    /// Configured UTC offset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the offset is not within ±23 hours.
    pub fn utc_offset(&self) -> RollcallResult<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::for_key(
                    "utc_offset_hours",
                    format!("out of range: {}", self.utc_offset_hours),
                )
                .into()
            })
    }

    /// Tracked role ids; malformed values disable the role.
    pub fn role_table(&self) -> RoleTable {
        RoleTable::new(
            parse_optional_id::<RoleId>("role_performer", &self.role_performer),
            parse_optional_id::<RoleId>("role_guide", &self.role_guide),
            parse_optional_id::<RoleId>("role_backstage", &self.role_backstage),
        )
    }

    /// Comma separated attending reactions, trimmed, empties dropped.
    pub fn attending_reactions(&self) -> Vec<String> {
        self.reaction_attending
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Settings for the aggregation pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the offset is out of range.
    pub fn aggregate_settings(&self) -> RollcallResult<AggregateSettings> {
        AggregateSettings::builder()
            .trigger(self.reaction_trigger.trim())
            .reaction_a(self.reaction_a.trim())
            .reaction_b(self.reaction_b.trim())
            .reaction_c(self.reaction_c.trim())
            .reaction_absent(self.reaction_absent.trim())
            .reaction_attending(self.attending_reactions())
            .roles(self.role_table())
            .sheets(SheetNames {
                sheet1_name: self.sheet1_name.clone(),
                sheet2_name: self.sheet2_name.clone(),
            })
            .result_thread(parse_optional_id::<ChannelId>(
                "result_thread_id",
                &self.result_thread_id,
            ))
            .debounce(Duration::from_millis(self.debounce_ms))
            .utc_offset(self.utc_offset()?)
            .attending_slot(self.generic_attending_slot)
            .debug_reactions(self.debug_reactions)
            .debug_no_discord_send(self.debug_no_discord_send)
            .debug_spreadsheet(self.debug_spreadsheet)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid aggregation settings: {}", e)).into())
    }

    /// The settings as TOML with the token masked.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if serialization fails.
    pub fn redacted(&self) -> RollcallResult<String> {
        let mut shown = self.clone();
        if !shown.discord_token.is_empty() {
            shown.discord_token = "********".to_string();
        }
        toml::to_string_pretty(&shown).map_err(|e| {
            ConfigError::new(format!("Failed to render configuration: {}", e)).into()
        })
    }
}
