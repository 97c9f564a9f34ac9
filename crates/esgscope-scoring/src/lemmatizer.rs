//! Lemmatization for single-word keyword matching
//!
//! Keywords and document words are both reduced to a base form before they
//! are compared, so "polluted", "pollutes" and "polluting" all meet at
//! "pollute". The default [`RuleLemmatizer`] combines an irregular-form table
//! with English suffix rules; any other implementation can be plugged into
//! the scorer through the [`Lemmatizer`] trait.

use esgscope_core::{Error, Result};
use regex::Regex;
use std::collections::HashMap;

/// Default maximum document length accepted by [`RuleLemmatizer`], in characters
pub const DEFAULT_MAX_LENGTH: usize = 2_000_000;

/// Trait for all lemmatizers
pub trait Lemmatizer: Send + Sync {
    /// Reduce a whole text to its ordered sequence of lemmas
    fn lemmatize(&self, text: &str) -> Result<Vec<String>>;

    /// Base form of a single word
    fn lemma(&self, word: &str) -> String;

    /// Get the lemmatizer name
    fn name(&self) -> &str;
}

/// Rule-based English lemmatizer
pub struct RuleLemmatizer {
    word_regex: Regex,
    irregular: HashMap<&'static str, &'static str>,
    max_length: usize,
}

impl RuleLemmatizer {
    /// Create a lemmatizer with the default length limit
    pub fn new() -> Result<Self> {
        Self::with_max_length(DEFAULT_MAX_LENGTH)
    }

    /// Create a lemmatizer accepting documents up to `max_length` characters
    pub fn with_max_length(max_length: usize) -> Result<Self> {
        let word_regex = Regex::new(r"[\p{Alphabetic}\p{N}]+(?:'[\p{Alphabetic}\p{N}]+)*")
            .map_err(|e| Error::lemmatizer(format!("Failed to compile word regex: {}", e)))?;

        Ok(Self {
            word_regex,
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
            max_length,
        })
    }

    /// Maximum accepted document length in characters
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Split text into word tokens, in document order
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.word_regex.find_iter(text).map(|m| m.as_str())
    }

    fn reduce(&self, word: &str) -> String {
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix('\''))
            .unwrap_or(word);

        if let Some(base) = self.irregular.get(word) {
            return (*base).to_string();
        }
        if word.len() <= 3 || !word.is_ascii() || UNINFLECTED.contains(&word) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
            if stem.len() >= 2 {
                return format!("{}y", stem);
            }
        }

        if let Some(stem) = word.strip_suffix("ing") {
            if stem.len() >= 2 && has_vowel(stem) {
                return restore_stem(stem);
            }
        }

        if let Some(stem) = word.strip_suffix("ed") {
            if !word.ends_with("eed") && stem.len() >= 2 && has_vowel(stem) {
                return restore_stem(stem);
            }
        }

        if let Some(stem) = word.strip_suffix("es") {
            if ["ss", "x", "ch", "sh", "zz"].iter().any(|s| stem.ends_with(s)) {
                return stem.to_string();
            }
        }

        if let Some(stem) = word.strip_suffix('s') {
            if !["ss", "us", "is", "as"].iter().any(|s| word.ends_with(s)) {
                return stem.to_string();
            }
        }

        word.to_string()
    }
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new().expect("Failed to create rule lemmatizer")
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, text: &str) -> Result<Vec<String>> {
        let length = text.chars().count();
        if length > self.max_length {
            return Err(Error::lemmatizer(format!(
                "text of {} characters exceeds maximum length of {}",
                length, self.max_length
            )));
        }

        Ok(self.tokenize(text).map(|word| self.reduce(word)).collect())
    }

    fn lemma(&self, word: &str) -> String {
        self.reduce(word)
    }

    fn name(&self) -> &str {
        "rule-lemmatizer"
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn is_consonant(b: u8) -> bool {
    b.is_ascii_alphabetic() && !is_vowel(b)
}

fn has_vowel(s: &str) -> bool {
    s.bytes().any(|b| is_vowel(b) || b == b'y')
}

/// Undo consonant doubling and restore a dropped silent "e" after an
/// "-ed"/"-ing" suffix has been removed.
fn restore_stem(stem: &str) -> String {
    let b = stem.as_bytes();
    let n = b.len();
    let last = b[n - 1];
    let prev = b[n - 2];

    let doubled = n >= 3 && last == prev && is_consonant(last);
    if doubled && !matches!(last, b'l' | b's' | b'z' | b'f' | b'd') {
        return stem[..n - 1].to_string();
    }

    if needs_silent_e(b) {
        format!("{}e", stem)
    } else {
        stem.to_string()
    }
}

fn needs_silent_e(b: &[u8]) -> bool {
    let n = b.len();
    let last = b[n - 1];
    let prev = b[n - 2];
    let before = if n >= 3 { Some(b[n - 3]) } else { None };
    let consonant_before = before.map_or(false, is_consonant);

    match last {
        b'v' | b'c' | b'u' => true,
        b'z' => prev != b'z',
        b'g' => match prev {
            b'd' | b'r' => true,
            b'n' => matches!(before, Some(b'a') | Some(b'e')),
            _ => is_vowel(prev),
        },
        b's' => is_vowel(prev),
        b't' => match prev {
            b'a' => !matches!(before, Some(b'e') | Some(b'o') | Some(b'a')),
            b'u' => consonant_before,
            _ => false,
        },
        b'r' => match prev {
            b'u' => consonant_before,
            b'i' => consonant_before || before == Some(b'u'),
            _ => false,
        },
        b'n' => prev == b'i' && consonant_before,
        b'd' => matches!(prev, b'i' | b'u' | b'a') && consonant_before,
        b'k' | b'm' | b'b' => is_vowel(prev) && consonant_before,
        b'l' => is_consonant(prev) && !matches!(prev, b'l' | b'r' | b'w'),
        _ => false,
    }
}

/// Words that look inflected but are already base forms
const UNINFLECTED: &[&str] = &[
    "during", "nothing", "something", "anything", "everything", "thing", "morning", "evening",
    "ceiling", "string", "spring", "bring", "sibling", "hundred", "indeed", "sacred", "naked",
    "always", "perhaps", "news", "series", "species", "lens", "thus", "this", "physics",
];

/// Irregular inflections mapped to their base form
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
    ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("does", "do"),
    ("did", "do"), ("done", "do"), ("goes", "go"), ("went", "go"), ("gone", "go"),
    ("paid", "pay"), ("laid", "lay"), ("said", "say"), ("made", "make"), ("stole", "steal"),
    ("stolen", "steal"), ("fought", "fight"), ("caught", "catch"), ("sold", "sell"),
    ("bought", "buy"), ("brought", "bring"), ("thought", "think"), ("took", "take"),
    ("taken", "take"), ("gave", "give"), ("given", "give"), ("knew", "know"), ("known", "know"),
    ("saw", "see"), ("seen", "see"), ("left", "leave"), ("lost", "lose"), ("held", "hold"),
    ("withheld", "withhold"), ("led", "lead"), ("met", "meet"), ("sent", "send"),
    ("spent", "spend"), ("built", "build"), ("found", "find"), ("told", "tell"), ("got", "get"),
    ("gotten", "get"), ("kept", "keep"), ("ran", "run"), ("began", "begin"), ("begun", "begin"),
    ("fell", "fall"), ("fallen", "fall"), ("rose", "rise"), ("risen", "rise"), ("hid", "hide"),
    ("hidden", "hide"), ("struck", "strike"), ("children", "child"), ("men", "man"),
    ("women", "woman"), ("feet", "foot"), ("teeth", "tooth"), ("died", "die"), ("dying", "die"),
    ("lied", "lie"), ("lying", "lie"), ("tied", "tie"), ("used", "use"), ("uses", "use"),
    ("sued", "sue"), ("suing", "sue"), ("wasted", "waste"), ("wasting", "waste"),
    ("boycotted", "boycott"), ("boycotting", "boycott"), ("biases", "bias"), ("biased", "bias"),
    ("crises", "crisis"), ("analyses", "analysis"), ("gases", "gas"),
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmatizer() -> RuleLemmatizer {
        RuleLemmatizer::new().unwrap()
    }

    #[test]
    fn test_inflections_share_a_lemma() {
        let l = lemmatizer();
        for word in ["pollute", "polluted", "pollutes", "polluting"] {
            assert_eq!(l.lemma(word), "pollute", "word: {}", word);
        }
        for word in ["fine", "fined", "fines"] {
            assert_eq!(l.lemma(word), "fine", "word: {}", word);
        }
        for word in ["ban", "banned", "bans", "banning"] {
            assert_eq!(l.lemma(word), "ban", "word: {}", word);
        }
    }

    #[test]
    fn test_plurals() {
        let l = lemmatizer();
        assert_eq!(l.lemma("injuries"), "injury");
        assert_eq!(l.lemma("sanctions"), "sanction");
        assert_eq!(l.lemma("breaches"), "breach");
        assert_eq!(l.lemma("damages"), "damage");
        assert_eq!(l.lemma("bias"), "bias");
        assert_eq!(l.lemma("crisis"), "crisis");
        assert_eq!(l.lemma("hazardous"), "hazardous");
        assert_eq!(l.lemma("stress"), "stress");
        assert_eq!(l.lemma("crises"), "crisis");
        assert_eq!(l.lemma("analyses"), "analysis");
        assert_eq!(l.lemma("gases"), "gas");
        assert_eq!(l.lemma("biased"), "bias");
    }

    #[test]
    fn test_verb_forms() {
        let l = lemmatizer();
        assert_eq!(l.lemma("spilled"), "spill");
        assert_eq!(l.lemma("charged"), l.lemma("charges"));
        assert_eq!(l.lemma("fired"), "fire");
        assert_eq!(l.lemma("rising"), "rise");
        assert_eq!(l.lemma("prosecuted"), "prosecute");
        assert_eq!(l.lemma("falsified"), "falsify");
        assert_eq!(l.lemma("occurred"), "occur");
        assert_eq!(l.lemma("leaked"), "leak");
    }

    #[test]
    fn test_irregular_forms() {
        let l = lemmatizer();
        assert_eq!(l.lemma("stolen"), "steal");
        assert_eq!(l.lemma("stealing"), "steal");
        assert_eq!(l.lemma("withheld"), "withhold");
        assert_eq!(l.lemma("paid"), "pay");
        assert_eq!(l.lemma("during"), "during");
    }

    #[test]
    fn test_possessive_is_stripped() {
        let l = lemmatizer();
        assert_eq!(l.lemma("company's"), "company");
    }

    #[test]
    fn test_lemmatize_keeps_order_and_splits_hyphens() {
        let l = lemmatizer();
        let lemmas = l
            .lemmatize("the plant polluted rivers; non-compliance followed.")
            .unwrap();
        assert_eq!(
            lemmas,
            vec!["the", "plant", "pollute", "river", "non", "compliance", "follow"]
        );
    }

    #[test]
    fn test_empty_text() {
        let l = lemmatizer();
        assert!(l.lemmatize("").unwrap().is_empty());
        assert!(l.lemmatize("  ... !!").unwrap().is_empty());
    }

    #[test]
    fn test_max_length_is_enforced() {
        let l = RuleLemmatizer::with_max_length(10).unwrap();
        assert!(l.lemmatize("short text").is_ok());

        let err = l.lemmatize("this text is too long").unwrap_err();
        assert!(matches!(err, Error::Lemmatizer(_)));
        assert!(err.to_string().contains("exceeds maximum length of 10"));
    }
}
