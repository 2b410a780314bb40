//! Deterministic keyword pass of the router.
//!
//! Pure text matching, no network access. Each capability owns a curated
//! set of phrases; phrases are matched on whole normalized word tokens so
//! that `apr` never matches inside `april`.
//!
//! | Priority | Capability | Cues |
//! |----------|------------|------|
//! | 1 | group-coordination | split, owe, settle up, per person, first-person plural + group noun |
//! | 2 | credit-advisory | credit score, best card, cashback, apr, rewards |
//! | 3 | personal-finance | should i buy, afford, my spending, my budget |

use super::decision::{RoutingDecision, RoutingSource};
use crate::core::capability::CapabilityTag;
use crate::util::{contains_phrase, word_tokens};

const GROUP_TERMS: &[&str] = &[
    "split",
    "splitting",
    "settle up",
    "settle",
    "owe",
    "owes",
    "owed",
    "per person",
    "each person",
    "rsvp",
    "reimburse",
];

const FIRST_PERSON_PLURAL: &[&str] = &["we", "we're", "we've", "us", "our", "let's", "lets"];

const GROUP_NOUNS: &[&str] = &[
    "group",
    "team",
    "trip",
    "everyone",
    "friends",
    "roommates",
    "people",
    "squad",
    "crew",
    "household",
    "together",
];

const CREDIT_TERMS: &[&str] = &[
    "credit score",
    "best card",
    "which card",
    "credit card",
    "cashback",
    "cash back",
    "apr",
    "reward",
    "rewards",
    "points",
    "signup bonus",
    "sign up bonus",
    "utilization",
];

const PERSONAL_TERMS: &[&str] = &[
    "should i buy",
    "can i buy",
    "buy now",
    "buying",
    "afford",
    "my spending",
    "my budget",
    "my transactions",
    "spent this",
];

/// A single capability matched by the keyword pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub tag: CapabilityTag,
    /// The phrase that triggered the match
    pub term: &'static str,
}

fn find_term(tokens: &str, terms: &[&'static str]) -> Option<&'static str> {
    terms
        .iter()
        .copied()
        .find(|term| contains_phrase(tokens, term))
}

fn match_group(normalized: &str) -> Option<&'static str> {
    if let Some(term) = find_term(normalized, GROUP_TERMS) {
        return Some(term);
    }
    // "we/us/our" alone is too weak; require a group noun alongside it
    find_term(normalized, FIRST_PERSON_PLURAL)
        .and_then(|_| find_term(normalized, GROUP_NOUNS))
}

/// Match the query against every capability's keyword set.
///
/// Returns matches in fixed priority order: group-coordination,
/// credit-advisory, personal-finance. Conversational has no keyword set.
pub fn match_keywords(text: &str) -> Vec<KeywordMatch> {
    let normalized = word_tokens(text);
    if normalized.trim().is_empty() {
        return Vec::new();
    }

    let checks: [(CapabilityTag, Option<&'static str>); 3] = [
        (CapabilityTag::GroupCoordination, match_group(&normalized)),
        (
            CapabilityTag::CreditAdvisory,
            find_term(&normalized, CREDIT_TERMS),
        ),
        (
            CapabilityTag::PersonalFinance,
            find_term(&normalized, PERSONAL_TERMS),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(tag, term)| term.map(|term| KeywordMatch { tag, term }))
        .collect()
}

/// Run the deterministic pass, returning `None` when no keyword set matches
pub fn route_by_keywords(text: &str) -> Option<RoutingDecision> {
    let matches = match_keywords(text);
    if matches.is_empty() {
        return None;
    }

    let rationale = matches
        .iter()
        .map(|m| format!("{} (matched \"{}\")", m.tag, m.term))
        .collect::<Vec<_>>()
        .join(", ");

    Some(RoutingDecision::new(
        matches.iter().map(|m| m.tag),
        format!("keyword match: {}", rationale),
        RoutingSource::Keywords,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use CapabilityTag::*;

    fn tags(text: &str) -> Vec<CapabilityTag> {
        match_keywords(text).into_iter().map(|m| m.tag).collect()
    }

    #[test]
    fn test_group_split_phrase() {
        assert_eq!(tags("split $120 dinner evenly"), vec![GroupCoordination]);
        assert_eq!(tags("Who still owes for the Airbnb?"), vec![GroupCoordination]);
        assert_eq!(tags("time to settle up"), vec![GroupCoordination]);
    }

    #[test]
    fn test_plural_pronoun_needs_group_noun() {
        assert_eq!(
            tags("Should we get a projector for the trip?"),
            vec![GroupCoordination]
        );
        assert!(tags("we had fun").is_empty());
    }

    #[test]
    fn test_credit_terms() {
        assert_eq!(tags("What's the best card for Uber Eats?"), vec![CreditAdvisory]);
        assert_eq!(tags("how do I raise my credit score"), vec![CreditAdvisory]);
        assert_eq!(tags("Is this APR good?"), vec![CreditAdvisory]);
    }

    #[test]
    fn test_whole_word_matching() {
        // "apr" must not match inside "april", "split" not inside "splitter"
        assert!(tags("see you in april").is_empty());
        assert!(tags("buy a cable splitter").is_empty());
    }

    #[test]
    fn test_personal_terms() {
        assert_eq!(
            tags("Should I buy concert tickets for $120?"),
            vec![PersonalFinance]
        );
        assert_eq!(tags("can I afford a new monitor"), vec![PersonalFinance]);
    }

    #[test]
    fn test_multiple_matches_in_priority_order() {
        let query = "Should I buy this? My credit score matters, and we need to split the bill";
        assert_eq!(
            tags(query),
            vec![GroupCoordination, CreditAdvisory, PersonalFinance]
        );
    }

    #[test]
    fn test_curly_apostrophe() {
        assert_eq!(
            tags("let\u{2019}s plan the team dinner"),
            vec![GroupCoordination]
        );
    }

    #[test]
    fn test_route_by_keywords_none_for_small_talk() {
        assert!(route_by_keywords("hi there, how are you?").is_none());
        assert!(route_by_keywords("").is_none());
    }

    #[test]
    fn test_route_by_keywords_rationale() {
        let decision = route_by_keywords("best card for travel").unwrap();
        assert_eq!(decision.tags(), &[CreditAdvisory]);
        assert_eq!(decision.source(), RoutingSource::Keywords);
        assert!(decision.rationale().contains("best card"));
    }
}
