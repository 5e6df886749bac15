//! Plain-text chat output.

use crate::AggregateResult;

/// Notice posted to the originating channel when a run fails.
pub const FAILURE_NOTICE: &str = "リアクション集計の計算中にエラーが発生しました。";

/// Render the headcount summary posted back to chat.
///
/// # Examples
///
/// ```
/// use rollcall_core::{AggregateResult, format_summary};
///
/// let text = format_summary(&AggregateResult::compute(2, 1, 1));
/// assert!(text.contains("インスタンス人数: **9**"));
/// ```
pub fn format_summary(result: &AggregateResult) -> String {
    [
        "**リアクション集計結果**".to_string(),
        format!(
            "・イケケモ: {}人 / 案内: {}人 / サクラ: {}人",
            result.count_a, result.count_b, result.count_c
        ),
        format!("・スタッフ: {}人 (イケケモ+案内+サクラ)", result.staff),
        format!("・ゲスト: {}人 (イケケモ×2)", result.guest),
        format!(
            "・インスタンス人数: **{}** (スタッフ+ゲスト+Nekodon)",
            result.instance
        ),
    ]
    .join("\n")
}
