//! Rule-driven transliteration of native-script names.

use crate::model::{Transliteration, TransliterationRule};

impl Transliteration {
    /// Transliterate `native`, copying characters no rule covers.
    pub fn apply(&self, native: &str) -> String {
        let mut out = String::with_capacity(native.len());
        let mut rest = native;
        let mut prev: Option<char> = None;

        while let Some(ch) = rest.chars().next() {
            let word_start = prev.is_none_or(|prev| !prev.is_alphabetic());
            let consumed = match self.rule_at(rest, word_start) {
                Some(rule) => {
                    out.push_str(&rule.to);
                    rule.from.len()
                }
                None => {
                    out.push(ch);
                    ch.len_utf8()
                }
            };
            prev = rest[..consumed].chars().next_back();
            rest = &rest[consumed..];
        }
        out
    }

    /// Whether `romanised` is the transliteration of `native`.
    pub fn accepts(&self, native: &str, romanised: &str) -> bool {
        let expected = self.apply(native);
        if self.case_sensitive {
            expected == romanised
        } else {
            expected.to_lowercase() == romanised.to_lowercase()
        }
    }

    fn rule_at(&self, rest: &str, word_start: bool) -> Option<&TransliterationRule> {
        self.rules.iter().find(|rule| {
            !rule.from.is_empty() && rest.starts_with(&rule.from) && (word_start || !rule.initial)
        })
    }
}
