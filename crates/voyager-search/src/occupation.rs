//! Splitting free-text occupation lines into position and company.
//!
//! Members write their headline however they like ("Engineer – Acme",
//! "Engineer at Acme", "Engineer | Acme"). The rules below are tried in
//! order and the first one that cuts the text into exactly two parts wins.

/// A delimiter rule: applies when splitting on `delimiter` yields exactly
/// `parts` pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRule {
    /// Separator to split on, surrounding spaces included
    pub delimiter: &'static str,
    /// Number of pieces the split must produce
    pub parts: usize,
}

/// Rules in priority order. Append new rules at the end.
pub const OCCUPATION_RULES: &[SplitRule] = &[
    SplitRule {
        delimiter: "\u{2013}",
        parts: 2,
    },
    SplitRule {
        delimiter: " at ",
        parts: 2,
    },
    SplitRule {
        delimiter: "|",
        parts: 2,
    },
    SplitRule {
        delimiter: "-",
        parts: 2,
    },
];

impl SplitRule {
    /// Apply the rule, returning `(position, company)` when it matches.
    ///
    /// The position is right-trimmed. The company keeps the whitespace that
    /// followed the delimiter's visible part, so both `"A – B"` and
    /// `"A at B"` yield `" B"`.
    pub fn apply<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str)> {
        if text.split(self.delimiter).count() != self.parts {
            return None;
        }
        let index = text.find(self.delimiter)?;
        let core = self.delimiter.trim();
        let core_start = index + (self.delimiter.len() - self.delimiter.trim_start().len());
        let company = &text[core_start + core.len()..];
        Some((text[..index].trim_end(), company))
    }
}

/// Split an occupation line into `(position, company)`.
///
/// Falls back to the whole text as the position and an empty company when
/// no rule splits it into exactly two parts.
pub fn split_occupation(text: &str) -> (String, String) {
    OCCUPATION_RULES
        .iter()
        .find_map(|rule| rule.apply(text))
        .map_or_else(
            || (text.to_string(), String::new()),
            |(position, company)| (position.to_string(), company.to_string()),
        )
}
