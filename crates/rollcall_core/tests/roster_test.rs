use rollcall_core::{GuildMember, Role, RoleId, RoleTable, UserId, mentioned_role_ids, select_roster};

const PERFORMER: RoleId = RoleId(10);
const GUIDE: RoleId = RoleId(20);
const BACKSTAGE: RoleId = RoleId(30);

fn table() -> RoleTable {
    RoleTable::new(Some(PERFORMER), Some(GUIDE), Some(BACKSTAGE))
}

fn member(id: u64, name: &str, roles: &[RoleId]) -> GuildMember {
    GuildMember {
        user_id: UserId(id),
        display_name: name.to_string(),
        is_bot: false,
        roles: roles.to_vec(),
    }
}

#[test]
fn member_gets_highest_priority_role() {
    let roles = table();
    assert_eq!(roles.resolve(&member(1, "a", &[BACKSTAGE, PERFORMER])), Some(Role::Performer));
    assert_eq!(roles.resolve(&member(2, "b", &[BACKSTAGE, GUIDE])), Some(Role::Guide));
    assert_eq!(roles.resolve(&member(3, "c", &[RoleId(99)])), None);
}

#[test]
fn unconfigured_role_is_never_assigned() {
    let roles = RoleTable::new(None, Some(GUIDE), None);
    assert_eq!(roles.resolve(&member(1, "a", &[PERFORMER, GUIDE])), Some(Role::Guide));
    assert_eq!(roles.resolve(&member(2, "b", &[PERFORMER])), None);
}

#[test]
fn role_labels_are_sheet_values() {
    assert_eq!(Role::Performer.label(), "イケケモ");
    assert_eq!(Role::Guide.label(), "ケモ案内");
    assert_eq!(Role::Backstage.label(), "ケモ裏方");
    assert!(Role::Performer < Role::Guide && Role::Guide < Role::Backstage);
}

#[test]
fn mentions_are_parsed_from_text() {
    let ids = mentioned_role_ids("Tonight <@&10>, <@&30> and <@123> <@&abc>");
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&PERFORMER));
    assert!(ids.contains(&BACKSTAGE));
}

#[test]
fn roster_is_empty_without_relevant_mention() {
    let members = vec![member(1, "a", &[PERFORMER])];
    assert!(select_roster(&members, &table(), &mentioned_role_ids("no mentions")).is_empty());
    assert!(select_roster(&members, &table(), &mentioned_role_ids("<@&99>")).is_empty());
}

#[test]
fn member_excluded_when_assigned_role_not_mentioned() {
    // Holds performer and guide, only guide mentioned: assigned performer, so excluded.
    let members = vec![
        member(1, "both", &[PERFORMER, GUIDE]),
        member(2, "guide", &[GUIDE]),
    ];
    let roster = select_roster(&members, &table(), &mentioned_role_ids("<@&20>"));

    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].user_id, UserId(2));
    assert_eq!(roster[0].role, Role::Guide);
}

#[test]
fn bots_and_duplicates_are_dropped() {
    let mut bot = member(5, "bot", &[PERFORMER]);
    bot.is_bot = true;
    let members = vec![
        member(1, "first", &[PERFORMER]),
        bot,
        member(1, "again", &[PERFORMER]),
    ];
    let roster = select_roster(&members, &table(), &mentioned_role_ids("<@&10>"));

    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "first");
}
