//! Attendance labels derived from reactions.

use crate::{DisjointCategorySets, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Reaction-derived attendance status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum AttendanceLabel {
    /// Reacted with the absence emoji.
    Absent,
    /// Counted under category A.
    CategoryA,
    /// Counted under category B.
    CategoryB,
    /// Counted under category C.
    CategoryC,
    /// Reacted with some other attending emoji.
    Attending,
    /// No relevant reaction.
    Unset,
}

impl AttendanceLabel {
    /// Member-facing text for the label.
    pub fn label(self) -> &'static str {
        match self {
            AttendanceLabel::Absent => "欠席",
            AttendanceLabel::CategoryA => "イケケモ",
            AttendanceLabel::CategoryB => "案内",
            AttendanceLabel::CategoryC => "サクラ",
            AttendanceLabel::Attending => "出席",
            AttendanceLabel::Unset => "未入力",
        }
    }
}

impl fmt::Display for AttendanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<AttendanceLabel> for &'static str {
    fn from(label: AttendanceLabel) -> Self {
        label.label()
    }
}

/// Where generic attendance sits relative to the category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericAttendingSlot {
    /// Categories win over a generic attending reaction.
    #[default]
    AfterCategories,
    /// A generic attending reaction wins over the categories.
    BeforeCategories,
}

/// Reaction sets that feed attendance resolution.
#[derive(Debug, Clone, Default)]
pub struct AttendanceSets {
    /// Category sets after priority resolution.
    pub categories: DisjointCategorySets,
    /// Users who reacted with the absence emoji.
    pub absent: HashSet<UserId>,
    /// Users who reacted with any other attending emoji.
    pub attending: HashSet<UserId>,
}

impl AttendanceSets {
    /// Resolve the label for one user.
    ///
    /// Absence always wins. Then categories A, B and C in that order, with
    /// generic attendance slotted per `slot`. No reaction at all is `Unset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_core::{AttendanceLabel, AttendanceSets, CategorySets, GenericAttendingSlot, UserId};
    ///
    /// let sets = AttendanceSets {
    ///     categories: CategorySets::new([UserId(1)].into(), Default::default(), Default::default()).classify(),
    ///     absent: [UserId(1)].into(),
    ///     attending: Default::default(),
    /// };
    /// assert_eq!(sets.resolve(UserId(1), GenericAttendingSlot::default()), AttendanceLabel::Absent);
    /// assert_eq!(sets.resolve(UserId(2), GenericAttendingSlot::default()), AttendanceLabel::Unset);
    /// ```
    pub fn resolve(&self, user: UserId, slot: GenericAttendingSlot) -> AttendanceLabel {
        if self.absent.contains(&user) {
            return AttendanceLabel::Absent;
        }
        let attending = self.attending.contains(&user);
        if attending && slot == GenericAttendingSlot::BeforeCategories {
            return AttendanceLabel::Attending;
        }
        if self.categories.a().contains(&user) {
            AttendanceLabel::CategoryA
        } else if self.categories.b().contains(&user) {
            AttendanceLabel::CategoryB
        } else if self.categories.c().contains(&user) {
            AttendanceLabel::CategoryC
        } else if attending {
            AttendanceLabel::Attending
        } else {
            AttendanceLabel::Unset
        }
    }
}
