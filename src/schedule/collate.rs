//! Name ordering for Russian-language schedules.
//!
//! A small three-level collation: letters compare by alphabet first (Cyrillic before Latin,
//! `ё` alongside `е`), then by diacritics, then by case with lowercase first. Whitespace and
//! punctuation sort before digits, digits before letters.

use std::cmp::Ordering;

const CYRILLIC_ALPHABET: &str = "абвгдежзийклмнопрстуфхцчшщъыьэюя";

const LATIN_DIACRITICS: &[(char, &str)] = &[
    ('a', "àáâãäå"),
    ('c', "çč"),
    ('e', "èéêë"),
    ('i', "ìíîï"),
    ('n', "ñ"),
    ('o', "òóôõö"),
    ('s', "š"),
    ('u', "ùúûü"),
    ('y', "ýÿ"),
    ('z', "ž"),
];

const GROUP_SPACE: u32 = 0x0100;
const GROUP_DIGIT: u32 = 0x1000;
const GROUP_CYRILLIC: u32 = 0x2000;
const GROUP_CYRILLIC_OTHER: u32 = 0x2100;
const GROUP_LATIN: u32 = 0x3000;
const GROUP_OTHER: u32 = 0x10_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Weight {
    primary: u32,
    secondary: u8,
    tertiary: u8,
}

/// Compare two strings under Russian collation rules.
pub fn compare(a: &str, b: &str) -> Ordering {
    let wa: Vec<Weight> = a.chars().map(weight).collect();
    let wb: Vec<Weight> = b.chars().map(weight).collect();

    let primary = wa.iter().map(|w| w.primary).cmp(wb.iter().map(|w| w.primary));
    let secondary = || {
        wa.iter()
            .map(|w| w.secondary)
            .cmp(wb.iter().map(|w| w.secondary))
    };
    let tertiary = || wa.iter().map(|w| w.tertiary).cmp(wb.iter().map(|w| w.tertiary));

    primary
        .then_with(secondary)
        .then_with(tertiary)
        .then_with(|| a.cmp(b))
}

fn weight(c: char) -> Weight {
    let tertiary = u8::from(c.is_uppercase());
    let lower = c.to_lowercase().next().unwrap_or(c);

    if lower.is_whitespace() {
        return Weight {
            primary: GROUP_SPACE,
            secondary: 0,
            tertiary,
        };
    }
    if lower.is_ascii_punctuation() {
        return Weight {
            primary: GROUP_SPACE + u32::from(lower),
            secondary: 0,
            tertiary,
        };
    }
    if let Some(d) = lower.to_digit(10) {
        return Weight {
            primary: GROUP_DIGIT + d,
            secondary: 0,
            tertiary,
        };
    }

    let (base, secondary) = fold_diacritic(lower);
    if let Some(idx) = CYRILLIC_ALPHABET.chars().position(|x| x == base) {
        return Weight {
            primary: GROUP_CYRILLIC + idx as u32,
            secondary,
            tertiary,
        };
    }
    if ('\u{0400}'..='\u{04FF}').contains(&base) {
        return Weight {
            primary: GROUP_CYRILLIC_OTHER + u32::from(base),
            secondary,
            tertiary,
        };
    }
    if base.is_ascii_lowercase() {
        return Weight {
            primary: GROUP_LATIN + u32::from(base) - u32::from('a'),
            secondary,
            tertiary,
        };
    }
    Weight {
        primary: GROUP_OTHER + u32::from(base),
        secondary,
        tertiary,
    }
}

/// Map a lowercase letter with a diacritic to its base letter and a nonzero secondary weight.
fn fold_diacritic(c: char) -> (char, u8) {
    if c == 'ё' {
        return ('е', 1);
    }
    for (base, marked) in LATIN_DIACRITICS {
        if let Some(i) = marked.chars().position(|x| x == c) {
            return (*base, i as u8 + 1);
        }
    }
    (c, 0)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/collate.rs"]
mod tests;
