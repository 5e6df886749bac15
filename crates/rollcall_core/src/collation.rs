//! Name ordering for a Japanese-speaking member list.
//!
//! Names are compared on a folded key: fullwidth ASCII is narrowed,
//! katakana is folded onto hiragana, and letters are lowercased. This puts
//! `アン`, `あん` and `ＡＮＮ`/`Ann` next to their counterparts instead of
//! scattering them by code point.

use std::cmp::Ordering;

const KATAKANA_START: u32 = 0x30A1;
const KATAKANA_END: u32 = 0x30F6;
const KANA_OFFSET: u32 = 0x60;
const FULLWIDTH_START: u32 = 0xFF01;
const FULLWIDTH_END: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

fn fold_char(c: char) -> char {
    let code = c as u32;
    let folded = if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        code - KANA_OFFSET
    } else if (FULLWIDTH_START..=FULLWIDTH_END).contains(&code) {
        code - FULLWIDTH_OFFSET
    } else {
        code
    };
    char::from_u32(folded).unwrap_or(c)
}

/// Folded comparison key for `name`.
pub fn collation_key(name: &str) -> String {
    name.chars()
        .map(fold_char)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two display names on their folded keys.
///
/// # Examples
///
/// ```
/// use rollcall_core::compare_names;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_names("アン", "あん"), Ordering::Equal);
/// assert_eq!(compare_names("Ann", "zoe"), Ordering::Less);
/// assert_eq!(compare_names("ＢＯＢ", "bob"), Ordering::Equal);
/// ```
pub fn compare_names(left: &str, right: &str) -> Ordering {
    collation_key(left).cmp(&collation_key(right))
}
