use chrono::{FixedOffset, TimeZone};
use rollcall_core::{
    AggregateResult, AttendanceLabel, ExportPayload, MemberRow, Role, SheetNames, UserId,
    compare_names, format_summary,
};
use std::cmp::Ordering;

fn row(id: u64, name: &str, role: Role) -> MemberRow {
    MemberRow::new(UserId(id), name, role, AttendanceLabel::Unset)
}

fn build(rows: Vec<MemberRow>) -> ExportPayload {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let at = jst.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap();
    ExportPayload::build(rows, AggregateResult::compute(0, 0, 0), SheetNames::default(), &at)
}

#[test]
fn rows_sort_by_role_then_name() {
    let payload = build(vec![
        row(1, "Zoe", Role::Backstage),
        row(2, "Bob", Role::Performer),
        row(3, "Ann", Role::Backstage),
        row(4, "Amy", Role::Guide),
    ]);
    let names: Vec<&str> = payload.members().iter().map(|r| r.name().as_str()).collect();
    assert_eq!(names, ["Bob", "Amy", "Ann", "Zoe"]);
}

#[test]
fn equal_keys_keep_input_order() {
    let payload = build(vec![
        row(1, "same", Role::Guide),
        row(2, "same", Role::Guide),
    ]);
    let ids: Vec<UserId> = payload.members().iter().map(|r| *r.user_id()).collect();
    assert_eq!(ids, [UserId(1), UserId(2)]);
}

#[test]
fn name_comparison_folds_width_and_kana() {
    assert_eq!(compare_names("ａｂｃ", "abc"), Ordering::Equal);
    assert_eq!(compare_names("アイ", "あい"), Ordering::Equal);
    assert_eq!(compare_names("Alice", "bob"), Ordering::Less);
}

#[test]
fn payload_serializes_to_sheet_format() {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let at = jst.with_ymd_and_hms(2025, 11, 30, 22, 15, 0).unwrap();
    let payload = ExportPayload::build(
        vec![MemberRow::new(UserId(1), "Ann", Role::Guide, AttendanceLabel::CategoryB)],
        AggregateResult::compute(2, 1, 1),
        SheetNames::default(),
        &at,
    );
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["sheet1Name"], "シート1");
    assert_eq!(json["sheet2Name"], "シート2");
    assert_eq!(json["retrievedAt"], "11/30 22:15");
    assert_eq!(json["members"][0]["name"], "Ann");
    assert_eq!(json["members"][0]["status"], "案内");
    assert_eq!(json["members"][0]["role"], "ケモ案内");
    assert!(json["members"][0].get("user_id").is_none());
    assert_eq!(json["aggregate"]["イケケモ"], 2);
    assert_eq!(json["aggregate"]["案内"], 1);
    assert_eq!(json["aggregate"]["サクラ"], 1);
    assert_eq!(json["aggregate"]["スタッフ"], 4);
    assert_eq!(json["aggregate"]["ゲスト"], 4);
    assert_eq!(json["aggregate"]["インスタンス"], 9);
}

#[test]
fn summary_lists_every_count() {
    let text = format_summary(&AggregateResult::compute(2, 1, 1));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "**リアクション集計結果**");
    assert_eq!(lines[1], "・イケケモ: 2人 / 案内: 1人 / サクラ: 1人");
    assert_eq!(lines[2], "・スタッフ: 4人 (イケケモ+案内+サクラ)");
    assert_eq!(lines[3], "・ゲスト: 4人 (イケケモ×2)");
    assert_eq!(lines[4], "・インスタンス人数: **9** (スタッフ+ゲスト+Nekodon)");
}
