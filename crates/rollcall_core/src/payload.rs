//! Export payload assembly.

use crate::{AggregateResult, AttendanceLabel, Role, UserId, collation_key};
use chrono::{DateTime, TimeZone};
use derive_getters::Getters;
use serde::Serialize;
use std::fmt::Display;

/// One member line of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct MemberRow {
    #[serde(skip)]
    user_id: UserId,
    name: String,
    status: AttendanceLabel,
    role: Role,
}

impl MemberRow {
    /// Build a row.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        role: Role,
        status: AttendanceLabel,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            status,
            role,
        }
    }
}

/// Destination sheet names in the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetNames {
    /// Member list sheet.
    pub sheet1_name: String,
    /// Aggregate sheet.
    pub sheet2_name: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            sheet1_name: "シート1".to_string(),
            sheet2_name: "シート2".to_string(),
        }
    }
}

/// Aggregate block of the export, keyed the way the sheet script reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateBlock {
    #[serde(rename = "イケケモ")]
    performer: usize,
    #[serde(rename = "案内")]
    guide: usize,
    #[serde(rename = "サクラ")]
    decoy: usize,
    #[serde(rename = "スタッフ")]
    staff: usize,
    #[serde(rename = "ゲスト")]
    guest: usize,
    #[serde(rename = "インスタンス")]
    instance: usize,
}

impl From<AggregateResult> for AggregateBlock {
    fn from(result: AggregateResult) -> Self {
        Self {
            performer: result.count_a,
            guide: result.count_b,
            decoy: result.count_c,
            staff: result.staff,
            guest: result.guest,
            instance: result.instance,
        }
    }
}

/// The unit handed to the export sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    #[serde(flatten)]
    sheets: SheetNames,
    retrieved_at: String,
    members: Vec<MemberRow>,
    #[serde(skip)]
    aggregate: AggregateResult,
    #[serde(rename = "aggregate")]
    aggregate_block: AggregateBlock,
}

impl ExportPayload {
    /// Sort `rows` and bundle them with the aggregate.
    pub fn build<Tz>(
        mut rows: Vec<MemberRow>,
        aggregate: AggregateResult,
        sheets: SheetNames,
        retrieved_at: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        sort_rows(&mut rows);
        Self {
            sheets,
            retrieved_at: format_retrieved_at(retrieved_at),
            members: rows,
            aggregate,
            aggregate_block: aggregate.into(),
        }
    }
}

/// Sort rows by role rank, then by display name.
///
/// The sort is stable: rows whose role and folded name are equal keep their
/// input order.
pub fn sort_rows(rows: &mut [MemberRow]) {
    rows.sort_by_cached_key(|row| (row.role, collation_key(&row.name)));
}

/// Format a timestamp as `MM/DD HH:MM` in its own offset.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use rollcall_core::format_retrieved_at;
///
/// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
/// let at = jst.with_ymd_and_hms(2025, 3, 7, 21, 5, 0).unwrap();
/// assert_eq!(format_retrieved_at(&at), "03/07 21:05");
/// ```
pub fn format_retrieved_at<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%m/%d %H:%M").to_string()
}
