//! Property tests for the risk scorer
//!
//! Documents are generated from a mix of lexicon keywords, inflected forms
//! and neutral filler so that every category gets exercised.

use esgscope_core::{Category, RiskLevel};
use esgscope_scoring::lexicon::keywords_for;
use esgscope_scoring::RiskScorer;
use proptest::prelude::*;

const FILLER: &[&str] = &[
    "the", "company", "reported", "annual", "growth", "employees", "board", "river", "plant",
    "quarter", "and", "was", "in", "revenue", "polluted", "fines", "lawsuits", "arrested",
    "sanctioned", "spills",
];

fn vocabulary() -> Vec<String> {
    let mut words: Vec<String> = FILLER.iter().map(|w| w.to_string()).collect();
    for category in Category::ALL {
        words.extend(keywords_for(category).iter().map(|(k, _)| k.to_string()));
    }
    words
}

fn document() -> impl Strategy<Value = String> {
    let words = vocabulary();
    let separators = vec![" ", ", ", ". ", "! "];
    prop::collection::vec(
        (prop::sample::select(words), prop::sample::select(separators)),
        0..120,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, sep)| format!("{}{}", word, sep))
            .collect::<String>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scorecard_has_three_categories(text in document()) {
        let scorer = RiskScorer::with_defaults().unwrap();
        let scorecard = scorer.score(&text).unwrap();

        let categories: Vec<_> = scorecard.categories.iter().map(|c| c.category).collect();
        prop_assert_eq!(categories, Category::ALL.to_vec());
        for result in &scorecard.categories {
            prop_assert_eq!(
                result.total_keywords_in_dictionary,
                keywords_for(result.category).len() as u64
            );
            prop_assert!(result.unique_keywords_matched <= result.total_keywords_in_dictionary);
            prop_assert_eq!(result.unique_keywords_matched, result.keyword_matches.len() as u64);
        }
    }

    #[test]
    fn totals_are_consistent(text in document()) {
        let scorer = RiskScorer::with_defaults().unwrap();
        let scorecard = scorer.score(&text).unwrap();

        let weighted: u64 = scorecard.categories.iter().map(|c| c.weighted_score).sum();
        let terms: u64 = scorecard.categories.iter().map(|c| c.total_terms_matched).sum();
        prop_assert_eq!(scorecard.total_weighted_score, weighted);
        prop_assert_eq!(scorecard.total_keyword_matches, terms);
        prop_assert_eq!(scorecard.risk_level, RiskLevel::from_score(weighted));

        for result in &scorecard.categories {
            let contribution: u64 = result.keyword_matches.iter().map(|m| m.contribution()).sum();
            prop_assert_eq!(result.weighted_score, contribution);
        }
    }

    #[test]
    fn percentages_are_bounded(text in document()) {
        let scorer = RiskScorer::with_defaults().unwrap();
        let scorecard = scorer.score(&text).unwrap();

        for result in &scorecard.categories {
            prop_assert!((0.0..=100.0).contains(&result.risk_percentage));
            prop_assert!((0.0..=100.0).contains(&result.term_percentage));
        }

        let risk_sum: f64 = scorecard.categories.iter().map(|c| c.risk_percentage).sum();
        let term_sum: f64 = scorecard.categories.iter().map(|c| c.term_percentage).sum();
        if scorecard.total_weighted_score > 0 {
            prop_assert!((risk_sum - 100.0).abs() <= 0.5, "risk sum {}", risk_sum);
            prop_assert!((term_sum - 100.0).abs() <= 0.5, "term sum {}", term_sum);
        } else {
            prop_assert_eq!(risk_sum, 0.0);
            prop_assert_eq!(term_sum, 0.0);
        }
    }

    #[test]
    fn scoring_is_idempotent(text in document()) {
        let scorer = RiskScorer::with_defaults().unwrap();
        prop_assert_eq!(scorer.score(&text).unwrap(), scorer.score(&text).unwrap());
    }
}

#[test]
fn every_keyword_matches_itself() {
    let scorer = RiskScorer::with_defaults().unwrap();

    for category in Category::ALL {
        for (keyword, severity) in keywords_for(category) {
            let scorecard = scorer.score(&format!("the report mentions {}.", keyword)).unwrap();
            let result = scorecard.category(category).unwrap();
            assert!(
                result.count_for(keyword) >= 1,
                "{} keyword '{}' did not match itself",
                category,
                keyword
            );
            assert!(result.weighted_score >= u64::from(*severity));
        }
    }
}

#[test]
fn risk_level_boundaries_follow_weighted_score() {
    let scorer = RiskScorer::with_defaults().unwrap();

    // "fraud" weighs 3 and "audit" weighs 1, both Governance only
    let cases = [
        (10, 0, 30, RiskLevel::Low),
        (10, 1, 31, RiskLevel::Medium),
        (23, 1, 70, RiskLevel::Medium),
        (23, 2, 71, RiskLevel::High),
    ];
    for (frauds, audits, expected_score, expected_level) in cases {
        let text = format!("{}{}", "fraud ".repeat(frauds), "audit ".repeat(audits));
        let scorecard = scorer.score(&text).unwrap();
        assert_eq!(scorecard.total_weighted_score, expected_score);
        assert_eq!(scorecard.risk_level, expected_level);
    }
}
