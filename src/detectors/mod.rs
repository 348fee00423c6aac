//! Passive heuristics over a URL and its page markup. Everything here is pure:
//! no I/O and no shared mutable state.

pub mod brand;
pub mod content;
pub mod domain;

/// Lookalike characters keyed by the Latin letter they imitate.
pub(crate) const HOMOGLYPHS: &[(char, &[char])] = &[
    ('a', &['\u{0430}', '\u{0251}', '\u{03B1}']),
    ('e', &['\u{0435}', '\u{04BD}']),
    ('o', &['\u{043E}', '0', '\u{03BF}']),
    ('i', &['\u{0456}', '\u{03B9}', '1']),
    ('c', &['\u{0441}', '\u{03F2}']),
    ('p', &['\u{0440}', '\u{03C1}']),
    ('x', &['\u{0445}', '\u{03C7}']),
];
