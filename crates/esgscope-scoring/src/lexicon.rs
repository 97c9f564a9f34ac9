//! ESG risk lexicon
//!
//! Three fixed keyword tables, one per category, each keyword carrying a
//! severity weight from 1 (weak signal) to 3 (strong signal). Tables are
//! compiled once into a [`Lexicon`], where every entry is tagged with the
//! matching strategy it uses:
//! - single words match by lemma, so inflected forms count
//! - multi-word and hyphenated phrases match as raw substrings of the text

use crate::lemmatizer::Lemmatizer;
use esgscope_core::{Category, Error, Result};
use std::collections::HashSet;

/// Lowest severity a keyword may carry
pub const MIN_SEVERITY: u8 = 1;
/// Highest severity a keyword may carry
pub const MAX_SEVERITY: u8 = 3;

#[rustfmt::skip]
pub const ENVIRONMENTAL_KEYWORDS: &[(&str, u8)] = &[
    ("pollution", 2), ("emission", 2), ("toxic", 3), ("waste", 1), ("contamination", 3),
    ("leak", 2), ("climate", 2), ("greenhouse", 2), ("scarcity", 2), ("depletion", 2),
    ("deforestation", 3), ("carbon", 2), ("spill", 2), ("violation", 2), ("fine", 1),
    ("fined", 1), ("penalty", 2), ("cleanup", 1), ("remediation", 1), ("liability", 2),
    ("harm", 2), ("destruction", 3), ("extinction", 3), ("endangered", 2), ("habitat loss", 3),
    ("flood", 2), ("drought", 2), ("storm", 2), ("wildfire", 3), ("temperature", 1),
    ("warming", 2), ("rising", 1), ("shortage", 2), ("overuse", 1), ("unsustainable", 2),
    ("degradation", 3), ("non-compliance", 2), ("illegal", 3), ("unauthorized", 2),
    ("banned", 2), ("restricted", 1), ("hazardous", 3), ("dangerous", 3), ("risky", 2),
    ("unsafe", 2), ("uncontrolled", 3),
];

#[rustfmt::skip]
pub const SOCIAL_KEYWORDS: &[(&str, u8)] = &[
    ("harassment", 3), ("abuse", 3), ("discrimination", 3), ("accident", 2), ("injury", 2),
    ("fatality", 3), ("death", 3), ("violence", 3), ("assault", 3), ("strike", 1),
    ("protest", 1), ("boycott", 1), ("dispute", 2), ("conflict", 2), ("unrest", 2),
    ("opposition", 1), ("lawsuit", 2), ("complaint", 2), ("allegation", 2), ("claim", 1),
    ("charged", 2), ("sued", 2), ("prosecuted", 3), ("child labor", 3), ("forced labor", 3),
    ("slavery", 3), ("trafficking", 3), ("underpaid", 2), ("unpaid", 2), ("overtime", 1),
    ("overwork", 1), ("exhaustion", 1), ("stress", 1), ("burnout", 1), ("turnover", 1),
    ("quit", 1), ("fired", 2), ("terminated", 2), ("laid off", 2), ("downsized", 1),
    ("restructured", 1), ("closure", 1), ("inequality", 2), ("unfair", 2), ("bias", 2),
    ("exclusion", 2), ("retaliation", 3), ("whistleblower", 2), ("breach", 2), ("hack", 3),
    ("stolen", 3), ("exposed", 2), ("compromised", 2),
];

#[rustfmt::skip]
pub const GOVERNANCE_KEYWORDS: &[(&str, u8)] = &[
    ("corruption", 3), ("bribery", 3), ("fraud", 3), ("embezzlement", 3), ("theft", 3),
    ("stealing", 3), ("misuse", 2), ("criminal", 3), ("prosecuted", 3), ("charged", 3),
    ("arrested", 3), ("convicted", 3), ("sentenced", 3), ("sanctions", 3), ("investigation", 2),
    ("probe", 2), ("inquiry", 2), ("audit", 1), ("review", 1), ("examination", 1),
    ("scrutiny", 1), ("litigation", 2), ("court", 2), ("trial", 2), ("settlement", 1),
    ("judgment", 2), ("misconduct", 3), ("malpractice", 3), ("negligence", 3), ("failure", 2),
    ("default", 2), ("manipulation", 3), ("insider trading", 3), ("conflict", 2),
    ("undisclosed", 3), ("hidden", 2), ("secret", 2), ("falsified", 3), ("misrepresented", 2),
    ("overstated", 2), ("understated", 2), ("concealed", 3), ("withheld", 2),
    ("resignation", 1), ("dismissed", 2), ("removed", 2), ("suspended", 2), ("replaced", 1),
    ("crisis", 3), ("scandal", 3), ("controversy", 2), ("accusation", 2),
];

/// Flat red-flag vocabulary used for sentence flagging and occurrence counts.
///
/// Overlaps the scoring tables but is not identical to them.
#[rustfmt::skip]
pub const FLAG_KEYWORDS: &[&str] = &[
    // Environmental
    "pollution", "contamination", "spill", "leak", "emission", "toxic", "waste", "dumping",
    "violation", "breach", "fine", "fined", "penalty", "cleanup", "remediation", "liability",
    "damage", "harm", "destruction", "deforestation", "extinction", "endangered",
    "habitat loss", "carbon", "greenhouse", "climate", "flood", "drought", "storm", "wildfire",
    "temperature", "warming", "rising", "scarcity", "depletion", "shortage", "overuse",
    "unsustainable", "degradation", "non-compliance", "illegal", "unauthorized", "banned",
    "restricted", "hazardous", "dangerous", "risky", "unsafe", "uncontrolled",
    // Social
    "discrimination", "harassment", "abuse", "exploitation", "accident", "injury", "fatality",
    "death", "violence", "assault", "strike", "protest", "boycott", "dispute", "conflict",
    "unrest", "opposition", "lawsuit", "complaint", "allegation", "claim", "charged", "sued",
    "prosecuted", "child labor", "forced labor", "slavery", "trafficking", "underpaid",
    "unpaid", "overtime", "overwork", "exhaustion", "stress", "burnout", "turnover", "quit",
    "fired", "terminated", "laid off", "downsized", "restructured", "closure", "inequality",
    "unfair", "bias", "exclusion", "retaliation", "whistleblower", "hack", "stolen", "exposed",
    "compromised",
    // Governance
    "corruption", "bribery", "fraud", "embezzlement", "theft", "stealing", "misuse",
    "criminal", "arrested", "convicted", "sentenced", "sanctions", "investigation", "probe",
    "inquiry", "audit", "review", "examination", "scrutiny", "litigation", "court", "trial",
    "settlement", "judgment", "misconduct", "malpractice", "negligence", "failure", "default",
    "manipulation", "insider trading", "undisclosed", "hidden", "secret", "falsified",
    "misrepresented", "overstated", "understated", "concealed", "withheld", "resignation",
    "dismissed", "removed", "suspended", "replaced", "crisis", "scandal", "controversy",
    "accusation",
];

/// Built-in keyword table for a category
pub fn keywords_for(category: Category) -> &'static [(&'static str, u8)] {
    match category {
        Category::Environmental => ENVIRONMENTAL_KEYWORDS,
        Category::Social => SOCIAL_KEYWORDS,
        Category::Governance => GOVERNANCE_KEYWORDS,
    }
}

/// How a lexicon keyword is located in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordMatcher {
    /// Single word, compared against the document's lemma sequence
    Single { lemma: String },
    /// Multi-word or hyphenated phrase, counted as a raw substring
    Phrase(String),
}

/// A compiled lexicon keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub keyword: String,
    pub severity: u8,
    pub matcher: KeywordMatcher,
}

/// All compiled keywords of one category, in definition order
#[derive(Debug, Clone)]
pub struct CategoryLexicon {
    pub category: Category,
    pub entries: Vec<LexiconEntry>,
}

impl CategoryLexicon {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable, compiled ESG lexicon
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: Vec<CategoryLexicon>,
}

impl Lexicon {
    /// Compile the built-in keyword tables
    pub fn builtin(lemmatizer: &dyn Lemmatizer) -> Result<Self> {
        let table: Vec<_> = Category::ALL
            .iter()
            .map(|&category| (category, keywords_for(category)))
            .collect();
        Self::from_table(&table, lemmatizer)
    }

    /// Compile a custom keyword table.
    ///
    /// Every category must appear exactly once. Keywords must be lowercase,
    /// non-empty, unique within their category, and carry a severity between
    /// [`MIN_SEVERITY`] and [`MAX_SEVERITY`].
    pub fn from_table(
        table: &[(Category, &[(&str, u8)])],
        lemmatizer: &dyn Lemmatizer,
    ) -> Result<Self> {
        let mut categories = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let mut rows = table.iter().filter(|(c, _)| *c == category);
            let (_, keywords) = rows
                .next()
                .ok_or_else(|| Error::config(format!("lexicon has no {} keywords", category)))?;
            if rows.next().is_some() {
                return Err(Error::config(format!(
                    "lexicon defines {} more than once",
                    category
                )));
            }

            let mut seen = HashSet::new();
            let mut entries = Vec::with_capacity(keywords.len());
            for &(keyword, severity) in keywords.iter() {
                validate_keyword(category, keyword, severity)?;
                if !seen.insert(keyword) {
                    return Err(Error::config(format!(
                        "duplicate {} keyword '{}'",
                        category, keyword
                    )));
                }
                entries.push(compile_entry(keyword, severity, lemmatizer));
            }

            categories.push(CategoryLexicon { category, entries });
        }

        Ok(Self { categories })
    }

    /// Categories in scorecard order
    pub fn categories(&self) -> &[CategoryLexicon] {
        &self.categories
    }

    /// Compiled keywords for one category
    pub fn category(&self, category: Category) -> &CategoryLexicon {
        // `from_table` stores exactly one lexicon per category, in `Category::ALL` order
        &self.categories[category as usize]
    }

    /// Total number of keywords over all categories
    pub fn len(&self) -> usize {
        self.categories.iter().map(CategoryLexicon::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_keyword(category: Category, keyword: &str, severity: u8) -> Result<()> {
    if keyword.trim().is_empty() {
        return Err(Error::config(format!("empty {} keyword", category)));
    }
    if keyword != keyword.to_lowercase() {
        return Err(Error::config(format!(
            "{} keyword '{}' must be lowercase",
            category, keyword
        )));
    }
    if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
        return Err(Error::config(format!(
            "{} keyword '{}' has severity {} outside {}..={}",
            category, keyword, severity, MIN_SEVERITY, MAX_SEVERITY
        )));
    }
    Ok(())
}

fn compile_entry(keyword: &str, severity: u8, lemmatizer: &dyn Lemmatizer) -> LexiconEntry {
    // Hyphens split tokens, so hyphenated keywords can only match as phrases
    let matcher = if keyword.contains(|c: char| c.is_whitespace() || c == '-') {
        KeywordMatcher::Phrase(keyword.to_string())
    } else {
        KeywordMatcher::Single {
            lemma: lemmatizer.lemma(keyword),
        }
    };

    LexiconEntry {
        keyword: keyword.to_string(),
        severity,
        matcher,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::RuleLemmatizer;

    #[test]
    fn test_builtin_sizes() {
        let lexicon = Lexicon::builtin(&RuleLemmatizer::default()).unwrap();
        assert_eq!(lexicon.category(Category::Environmental).len(), 46);
        assert_eq!(lexicon.category(Category::Social).len(), 53);
        assert_eq!(lexicon.category(Category::Governance).len(), 52);
        assert_eq!(lexicon.len(), 151);
        assert_eq!(FLAG_KEYWORDS.len(), 151);
    }

    #[test]
    fn test_categories_in_scorecard_order() {
        let lexicon = Lexicon::builtin(&RuleLemmatizer::default()).unwrap();
        let order: Vec<_> = lexicon.categories().iter().map(|c| c.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_matcher_selected_by_keyword_shape() {
        let lexicon = Lexicon::builtin(&RuleLemmatizer::default()).unwrap();
        let social = lexicon.category(Category::Social);

        let child_labor = social.entries.iter().find(|e| e.keyword == "child labor").unwrap();
        assert_eq!(
            child_labor.matcher,
            KeywordMatcher::Phrase("child labor".to_string())
        );

        let environmental = lexicon.category(Category::Environmental);
        let non_compliance = environmental
            .entries
            .iter()
            .find(|e| e.keyword == "non-compliance")
            .unwrap();
        assert_eq!(
            non_compliance.matcher,
            KeywordMatcher::Phrase("non-compliance".to_string())
        );

        let fired = social.entries.iter().find(|e| e.keyword == "fired").unwrap();
        assert_eq!(
            fired.matcher,
            KeywordMatcher::Single {
                lemma: "fire".to_string()
            }
        );
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        for category in Category::ALL {
            for &(keyword, severity) in keywords_for(category) {
                assert!(validate_keyword(category, keyword, severity).is_ok());
            }
        }
        for keyword in FLAG_KEYWORDS {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }

    #[test]
    fn test_rejects_bad_severity() {
        let lemmatizer = RuleLemmatizer::default();
        let table: [(Category, &[(&str, u8)]); 3] = [
            (Category::Environmental, &[("toxic", 4)]),
            (Category::Social, &[]),
            (Category::Governance, &[]),
        ];
        let err = Lexicon::from_table(&table, &lemmatizer).unwrap_err();
        assert!(err.to_string().contains("severity 4"));
    }

    #[test]
    fn test_rejects_missing_category() {
        let lemmatizer = RuleLemmatizer::default();
        let table: [(Category, &[(&str, u8)]); 2] = [
            (Category::Environmental, &[("toxic", 3)]),
            (Category::Social, &[("abuse", 3)]),
        ];
        let err = Lexicon::from_table(&table, &lemmatizer).unwrap_err();
        assert!(err.to_string().contains("no Governance keywords"));
    }

    #[test]
    fn test_rejects_uppercase_and_duplicates() {
        let lemmatizer = RuleLemmatizer::default();
        let upper: [(Category, &[(&str, u8)]); 3] = [
            (Category::Environmental, &[("Toxic", 3)]),
            (Category::Social, &[]),
            (Category::Governance, &[]),
        ];
        assert!(Lexicon::from_table(&upper, &lemmatizer).is_err());

        let duplicate: [(Category, &[(&str, u8)]); 3] = [
            (Category::Environmental, &[("toxic", 3), ("toxic", 2)]),
            (Category::Social, &[]),
            (Category::Governance, &[]),
        ];
        let err = Lexicon::from_table(&duplicate, &lemmatizer).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
