use rollcall_core::{AttendanceLabel, AttendanceSets, CategorySets, GenericAttendingSlot, UserId};
use std::collections::HashSet;

fn ids(raw: &[u64]) -> HashSet<UserId> {
    raw.iter().copied().map(UserId).collect()
}

fn sets() -> AttendanceSets {
    AttendanceSets {
        categories: CategorySets::new(ids(&[1, 5]), ids(&[2, 6]), ids(&[3])).classify(),
        absent: ids(&[5]),
        attending: ids(&[4, 6]),
    }
}

#[test]
fn labels_follow_precedence() {
    let sets = sets();
    let slot = GenericAttendingSlot::AfterCategories;

    assert_eq!(sets.resolve(UserId(1), slot), AttendanceLabel::CategoryA);
    assert_eq!(sets.resolve(UserId(2), slot), AttendanceLabel::CategoryB);
    assert_eq!(sets.resolve(UserId(3), slot), AttendanceLabel::CategoryC);
    assert_eq!(sets.resolve(UserId(4), slot), AttendanceLabel::Attending);
    assert_eq!(sets.resolve(UserId(5), slot), AttendanceLabel::Absent);
    assert_eq!(sets.resolve(UserId(6), slot), AttendanceLabel::CategoryB);
    assert_eq!(sets.resolve(UserId(7), slot), AttendanceLabel::Unset);
}

#[test]
fn attending_can_outrank_categories() {
    let sets = sets();
    let slot = GenericAttendingSlot::BeforeCategories;

    assert_eq!(sets.resolve(UserId(6), slot), AttendanceLabel::Attending);
    assert_eq!(sets.resolve(UserId(5), slot), AttendanceLabel::Absent);
    assert_eq!(sets.resolve(UserId(1), slot), AttendanceLabel::CategoryA);
}

#[test]
fn label_text_matches_sheet_values() {
    assert_eq!(AttendanceLabel::Absent.label(), "欠席");
    assert_eq!(AttendanceLabel::CategoryA.label(), "イケケモ");
    assert_eq!(AttendanceLabel::CategoryB.label(), "案内");
    assert_eq!(AttendanceLabel::CategoryC.label(), "サクラ");
    assert_eq!(AttendanceLabel::Attending.label(), "出席");
    assert_eq!(AttendanceLabel::Unset.label(), "未入力");
}
