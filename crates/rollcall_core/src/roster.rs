//! Role assignment and roster selection.

use crate::{GuildMember, RoleId, UserId};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

/// Tracked guild roles, declared in priority order.
///
/// The declaration order is the rank used both for assignment and for
/// sorting the export.
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
    strum::EnumIter,
)]
#[serde(into = "&'static str")]
pub enum Role {
    /// Front-of-house performers.
    Performer,
    /// Guides.
    Guide,
    /// Backstage crew.
    Backstage,
}

impl Role {
    /// Member-facing name of the role.
    pub fn label(self) -> &'static str {
        match self {
            Role::Performer => "イケケモ",
            Role::Guide => "ケモ案内",
            Role::Backstage => "ケモ裏方",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> Self {
        role.label()
    }
}

/// Mapping from tracked roles to their guild role ids.
///
/// A role without an id is disabled and never assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    performer: Option<RoleId>,
    guide: Option<RoleId>,
    backstage: Option<RoleId>,
}

impl RoleTable {
    /// Build from the three optional role ids.
    pub fn new(
        performer: Option<RoleId>,
        guide: Option<RoleId>,
        backstage: Option<RoleId>,
    ) -> Self {
        Self {
            performer,
            guide,
            backstage,
        }
    }

    /// Guild role id configured for `role`.
    pub fn id_of(&self, role: Role) -> Option<RoleId> {
        match role {
            Role::Performer => self.performer,
            Role::Guide => self.guide,
            Role::Backstage => self.backstage,
        }
    }

    /// Configured role ids, in priority order.
    pub fn configured(&self) -> impl Iterator<Item = (Role, RoleId)> + '_ {
        Role::iter().filter_map(|role| self.id_of(role).map(|id| (role, id)))
    }

    /// Highest-priority tracked role the member holds.
    pub fn resolve(&self, member: &GuildMember) -> Option<Role> {
        self.configured()
            .find(|(_, id)| member.roles.contains(id))
            .map(|(role, _)| role)
    }
}

static ROLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@&(\d+)>").expect("Valid role mention pattern"));

/// Role ids mentioned in message text as `<@&id>`.
///
/// # Examples
///
/// ```
/// use rollcall_core::{mentioned_role_ids, RoleId};
///
/// let ids = mentioned_role_ids("<@&42> and <@&7> tonight");
/// assert!(ids.contains(&RoleId(42)));
/// assert!(ids.contains(&RoleId(7)));
/// ```
pub fn mentioned_role_ids(content: &str) -> HashSet<RoleId> {
    ROLE_MENTION
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// A member selected for the report, before attendance is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Member's user id.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
}

/// Select the report roster from a guild member list.
///
/// Bots are dropped first. Each remaining member is assigned its
/// highest-priority tracked role; members with none are dropped, as are
/// members whose assigned role is not among `mentioned`. Each user appears
/// once, in input order.
pub fn select_roster(
    members: &[GuildMember],
    roles: &RoleTable,
    mentioned: &HashSet<RoleId>,
) -> Vec<RosterEntry> {
    let relevant: HashSet<RoleId> = roles
        .configured()
        .map(|(_, id)| id)
        .filter(|id| mentioned.contains(id))
        .collect();
    if relevant.is_empty() {
        tracing::debug!("No tracked role mentioned, roster is empty");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    members
        .iter()
        .filter(|member| !member.is_bot)
        .filter_map(|member| {
            let role = roles.resolve(member)?;
            let id = roles.id_of(role)?;
            if !relevant.contains(&id) || !seen.insert(member.user_id) {
                return None;
            }
            Some(RosterEntry {
                user_id: member.user_id,
                name: member.display_name.clone(),
                role,
            })
        })
        .collect()
}
