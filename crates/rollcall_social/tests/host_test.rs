use rollcall_core::EmojiRef;
use rollcall_social::{emoji_ref, ping_report, reaction_type};
use serenity::all::{EmojiId, ReactionType};
use std::time::Duration;

#[test]
fn unicode_reaction_maps_to_name() {
    let emoji = emoji_ref(&ReactionType::Unicode("📊".to_string()));
    assert_eq!(emoji, EmojiRef::unicode("📊"));
    assert!(emoji.matches("📊"));
}

#[test]
fn custom_reaction_matches_by_id_or_name() {
    let emoji = emoji_ref(&ReactionType::Custom {
        animated: false,
        id: EmojiId::new(123456),
        name: Some("tally".to_string()),
    });
    assert!(emoji.matches("123456"));
    assert!(emoji.matches("tally"));
}

#[test]
fn emoji_converts_back_to_reaction() {
    let custom = reaction_type(&EmojiRef::custom("987", Some("party".into()))).unwrap();
    assert!(matches!(custom, ReactionType::Custom { id, .. } if id.get() == 987));

    let unicode = reaction_type(&EmojiRef::unicode("🅰️")).unwrap();
    assert_eq!(unicode, ReactionType::Unicode("🅰️".to_string()));

    assert!(reaction_type(&EmojiRef::custom("not-a-number", None)).is_err());
    assert!(reaction_type(&EmojiRef::custom("0", None)).is_err());
}

#[test]
fn ping_report_without_gateway_latency() {
    let text = ping_report(Duration::from_millis(80), None);
    assert!(text.starts_with("🏓 Pong!"));
    assert!(text.contains("レイテンシ: 80ms"));
    assert!(text.contains("計測不可"));
}
