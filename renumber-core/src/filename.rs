//! Filename grammar: `[-]<digits>[<flag run>][<suffix>]`.
//!
//! The flag run is a maximal run of identical `+` or `-` characters right
//! after the digits. It only counts as a flag run when it ends the name or
//! is followed by `.`; otherwise those characters belong to the suffix.

use crate::error::{RenumberError, RenumberResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pending increment/decrement marker carried by a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Plus,
    Minus,
    None,
}

impl FlagKind {
    pub const fn marker(self) -> Option<char> {
        match self {
            Self::Plus => Some('+'),
            Self::Minus => Some('-'),
            Self::None => None,
        }
    }
}

/// A filename split into its numeric parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    /// Leading `-` sign.
    pub negative: bool,
    /// Magnitude of the digit run.
    pub value: i64,
    /// Length of the digit run as written, leading zeros included.
    pub digits: usize,
    pub flag: FlagKind,
    pub flag_count: usize,
    /// Everything after the digits and flag run, usually an extension.
    pub suffix: String,
}

/// Identity of a numbered file once padding is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKey {
    pub value: i64,
    pub flag: FlagKind,
    pub flag_count: usize,
    pub suffix: String,
}

impl ParsedFilename {
    /// The digit value with its sign applied.
    pub const fn signed(&self) -> i64 {
        if self.negative {
            -self.value
        } else {
            self.value
        }
    }

    pub const fn plus_count(&self) -> usize {
        match self.flag {
            FlagKind::Plus => self.flag_count,
            _ => 0,
        }
    }

    pub const fn minus_count(&self) -> usize {
        match self.flag {
            FlagKind::Minus => self.flag_count,
            _ => 0,
        }
    }

    pub fn flag_run(&self) -> String {
        self.flag
            .marker()
            .map(|c| c.to_string().repeat(self.flag_count))
            .unwrap_or_default()
    }

    pub fn key(&self) -> NameKey {
        NameKey {
            value: self.signed(),
            flag: self.flag,
            flag_count: self.flag_count,
            suffix: self.suffix.clone(),
        }
    }

    /// Serialize with the digit run zero-padded to at least `width`.
    pub fn render(&self, width: usize) -> String {
        format!(
            "{}{:0width$}{}{}",
            if self.negative { "-" } else { "" },
            self.value,
            self.flag_run(),
            self.suffix,
            width = width
        )
    }

    /// The same file with `amount` added to its value.
    pub fn offset(&self, amount: i64) -> Option<Self> {
        let shifted = self.signed().checked_add(amount)?;
        Some(Self {
            negative: shifted < 0,
            value: shifted.checked_abs()?,
            digits: count_digits(shifted),
            flag: self.flag,
            flag_count: self.flag_count,
            suffix: self.suffix.clone(),
        })
    }
}

impl fmt::Display for ParsedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

fn count_digits(n: i64) -> usize {
    n.unsigned_abs().to_string().len()
}

/// Split `name` into sign, digit run, flag run and suffix.
pub fn parse(name: &str) -> RenumberResult<ParsedFilename> {
    let not_numeric = || RenumberError::NotNumeric {
        name: name.to_string(),
    };
    let bytes = name.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let digit_start = usize::from(negative);
    let digit_end = digit_start
        + bytes[digit_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
    if digit_end == digit_start {
        return Err(not_numeric());
    }
    let value = name[digit_start..digit_end]
        .parse::<i64>()
        .map_err(|_| not_numeric())?;

    let (flag, flag_count) = match bytes.get(digit_end) {
        Some(&marker) if marker == b'+' || marker == b'-' => {
            let run = bytes[digit_end..]
                .iter()
                .take_while(|&&b| b == marker)
                .count();
            match bytes.get(digit_end + run) {
                None | Some(b'.') => {
                    let kind = if marker == b'+' {
                        FlagKind::Plus
                    } else {
                        FlagKind::Minus
                    };
                    (kind, run)
                },
                Some(_) => (FlagKind::None, 0),
            }
        },
        _ => (FlagKind::None, 0),
    };

    Ok(ParsedFilename {
        negative,
        value,
        digits: digit_end - digit_start,
        flag,
        flag_count,
        suffix: name[digit_end + flag_count..].to_string(),
    })
}

/// Inverse of [`parse`], without padding.
pub fn serialize(parsed: &ParsedFilename) -> String {
    parsed.render(0)
}

/// Add `amount` to the number in `name`, keeping flags and suffix.
///
/// The result is not padded; padding is applied by a later
/// normalization pass.
pub fn apply_offset(name: &str, amount: i64) -> RenumberResult<String> {
    let parsed = parse(name)?;
    parsed
        .offset(amount)
        .map(|shifted| serialize(&shifted))
        .ok_or_else(|| RenumberError::Overflow {
            name: name.to_string(),
            amount,
        })
}

/// Zero-pad the digit run of `name` to `width` characters.
///
/// The sign stays in front of the padding. Names that are not numbered
/// are returned unchanged.
pub fn normalize(name: &str, width: usize) -> String {
    parse(name).map_or_else(|_| name.to_string(), |parsed| parsed.render(width))
}

/// `name` with its flag run removed, or `None` if it has none.
pub fn strip_flags(name: &str) -> Option<String> {
    let parsed = parse(name).ok()?;
    if parsed.flag == FlagKind::None {
        return None;
    }
    let bare = ParsedFilename {
        flag: FlagKind::None,
        flag_count: 0,
        ..parsed
    };
    Some(bare.render(bare.digits))
}

/// `file` renamed to take over `slot`'s number as written, keeping its own
/// flag run and suffix. When either name is not numbered the file takes
/// the slot name whole.
pub fn renumber_as(file: &str, slot: &str) -> String {
    match (parse(file), parse(slot)) {
        (Ok(file), Ok(slot)) => ParsedFilename {
            negative: slot.negative,
            value: slot.value,
            digits: slot.digits,
            ..file
        }
        .render(slot.digits),
        _ => slot.to_string(),
    }
}

/// Width of the digit run of `name`, if it is numbered.
pub fn digit_width(name: &str) -> Option<usize> {
    parse(name).ok().map(|p| p.digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_plain_name() {
        let p = parse("42.txt").unwrap();
        assert!(!p.negative);
        assert_eq!(p.value, 42);
        assert_eq!(p.digits, 2);
        assert_eq!(p.flag, FlagKind::None);
        assert_eq!(p.suffix, ".txt");
    }

    #[test]
    fn parse_keeps_leading_zeros_in_width() {
        let p = parse("007.jpg").unwrap();
        assert_eq!(p.value, 7);
        assert_eq!(p.digits, 3);
    }

    #[test]
    fn parse_plus_and_minus_runs() {
        let p = parse("12++.png").unwrap();
        assert_eq!((p.flag, p.flag_count), (FlagKind::Plus, 2));
        assert_eq!(p.suffix, ".png");

        let m = parse("12---.png").unwrap();
        assert_eq!((m.flag, m.flag_count), (FlagKind::Minus, 3));
    }

    #[test]
    fn sign_is_distinct_from_minus_flags() {
        let p = parse("-5-.txt").unwrap();
        assert!(p.negative);
        assert_eq!(p.value, 5);
        assert_eq!(p.signed(), -5);
        assert_eq!((p.flag, p.flag_count), (FlagKind::Minus, 1));
    }

    #[test]
    fn flag_run_without_extension() {
        let p = parse("3+").unwrap();
        assert_eq!((p.flag, p.flag_count), (FlagKind::Plus, 1));
        assert_eq!(p.suffix, "");
    }

    #[test]
    fn markers_inside_suffix_are_not_flags() {
        let p = parse("5-3.txt").unwrap();
        assert_eq!(p.flag, FlagKind::None);
        assert_eq!(p.suffix, "-3.txt");

        let q = parse("5+b").unwrap();
        assert_eq!(q.flag, FlagKind::None);
        assert_eq!(q.suffix, "+b");
    }

    #[test]
    fn mixed_markers_only_take_the_first_kind() {
        let p = parse("5+-.txt").unwrap();
        assert_eq!(p.flag, FlagKind::None);
        assert_eq!(p.suffix, "+-.txt");
    }

    #[test]
    fn not_numeric_names() {
        for name in ["abc.txt", "", "-", "-.txt", "+5.txt", "--5", ".5"] {
            assert!(
                matches!(parse(name), Err(RenumberError::NotNumeric { .. })),
                "{name:?} parsed"
            );
        }
    }

    #[test]
    fn oversized_digit_run_is_not_numeric() {
        assert!(parse("99999999999999999999999.txt").is_err());
    }

    #[test]
    fn apply_offset_adds_and_keeps_suffix() {
        assert_eq!(apply_offset("1.txt", 10).unwrap(), "11.txt");
        assert_eq!(apply_offset("007.txt", 1).unwrap(), "8.txt");
        assert_eq!(apply_offset("3++.txt", 2).unwrap(), "5++.txt");
    }

    #[test]
    fn apply_offset_crosses_zero() {
        assert_eq!(apply_offset("1.txt", -3).unwrap(), "-2.txt");
        assert_eq!(apply_offset("-2-.txt", 5).unwrap(), "3-.txt");
    }

    #[test]
    fn apply_offset_reports_not_numeric() {
        let err = apply_offset("abc.txt", 1).unwrap_err();
        assert!(matches!(err, RenumberError::NotNumeric { name } if name == "abc.txt"));
    }

    #[test]
    fn apply_offset_reports_overflow() {
        let name = format!("{}.txt", i64::MAX);
        assert!(matches!(
            apply_offset(&name, 1),
            Err(RenumberError::Overflow { amount: 1, .. })
        ));
    }

    #[test]
    fn normalize_pads_digits() {
        assert_eq!(normalize("7.txt", 3), "007.txt");
        assert_eq!(normalize("-7.txt", 3), "-007.txt");
        assert_eq!(normalize("7+.txt", 2), "07+.txt");
        assert_eq!(normalize("1234.txt", 2), "1234.txt");
        assert_eq!(normalize("notes.md", 4), "notes.md");
    }

    #[test]
    fn strip_flags_keeps_padding() {
        assert_eq!(strip_flags("03++.txt").as_deref(), Some("03.txt"));
        assert_eq!(strip_flags("-4-").as_deref(), Some("-4"));
        assert_eq!(strip_flags("4.txt"), None);
        assert_eq!(strip_flags("abc"), None);
    }

    #[test]
    fn renumber_as_takes_slot_number() {
        assert_eq!(renumber_as("0.txt", "3.txt"), "3.txt");
        assert_eq!(renumber_as("4+.jpg", "007.txt"), "007+.jpg");
        assert_eq!(renumber_as("2.txt", "-1.txt"), "-1.txt");
        assert_eq!(renumber_as("cover.png", "3.png"), "3.png");
        assert_eq!(renumber_as("3.png", "cover.png"), "cover.png");
    }

    #[test]
    fn key_ignores_padding() {
        assert_eq!(parse("5.txt").unwrap().key(), parse("005.txt").unwrap().key());
        assert_ne!(parse("5.txt").unwrap().key(), parse("5+.txt").unwrap().key());
        assert_ne!(parse("5.txt").unwrap().key(), parse("-5.txt").unwrap().key());
    }

    fn flag_strategy() -> impl Strategy<Value = (FlagKind, usize)> {
        prop_oneof![
            Just((FlagKind::None, 0)),
            (1usize..4).prop_map(|n| (FlagKind::Plus, n)),
            (1usize..4).prop_map(|n| (FlagKind::Minus, n)),
        ]
    }

    fn suffix_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "\\.[a-z]{1,4}"]
    }

    fn parsed_strategy() -> impl Strategy<Value = ParsedFilename> {
        (any::<bool>(), 0i64..1_000_000, flag_strategy(), suffix_strategy()).prop_map(
            |(negative, value, (flag, flag_count), suffix)| ParsedFilename {
                negative,
                value,
                digits: value.to_string().len(),
                flag,
                flag_count,
                suffix,
            },
        )
    }

    proptest! {
        #[test]
        fn parse_serialize_round_trip(p in parsed_strategy()) {
            prop_assert_eq!(parse(&serialize(&p)).unwrap(), p);
        }

        #[test]
        fn normalize_is_idempotent(p in parsed_strategy(), extra in 0usize..4) {
            let name = serialize(&p);
            let width = p.digits + extra;
            let once = normalize(&name, width);
            prop_assert_eq!(normalize(&once, width), once.clone());
            prop_assert_eq!(parse(&once).unwrap().key(), p.key());
        }

        #[test]
        fn offset_then_inverse_restores_value(p in parsed_strategy(), amount in -5000i64..5000) {
            let shifted = apply_offset(&serialize(&p), amount).unwrap();
            let back = apply_offset(&shifted, -amount).unwrap();
            let restored = parse(&back).unwrap();
            prop_assert_eq!(restored.signed(), p.signed());
            prop_assert_eq!(restored.flag, p.flag);
            prop_assert_eq!(restored.suffix, p.suffix);
        }
    }
}
