//! Snowflake identifiers used across the pipeline.
//!
//! The host platform hands out 64-bit ids. Each kind gets its own newtype so a
//! role id can never be passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[display("{}", _0)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

snowflake!(
    /// A user (human or bot account).
    UserId
);
snowflake!(
    /// A chat message.
    MessageId
);
snowflake!(
    /// A channel or thread.
    ChannelId
);
snowflake!(
    /// A guild (server).
    GuildId
);
snowflake!(
    /// A guild role.
    RoleId
);

/// Parse an optional id from a configuration string.
///
/// Empty strings mean "disabled" and yield `None`. Strings that are not valid
/// snowflakes are logged and also yield `None`.
pub fn parse_optional_id<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(key, value = raw, "Ignoring malformed id in configuration");
            None
        }
    }
}
