//! Even cost splitting for group chats.

use crate::util::round_cents;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Tip-adjusted share multiplier (15% tip)
pub const TIP_MULTIPLIER: f64 = 1.15;

static CURRENCY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\$\s*|\busd\s*)(\d+(?:\.\d{1,2})?)|\b(\d+(?:\.\d{1,2})?)\s*(?:usd|dollars?|bucks)\b")
        .expect("currency amount pattern is valid")
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:\.\d{1,2})?)\b").expect("bare number pattern is valid"));

/// Pull a monetary amount out of free text.
///
/// Thousands separators are stripped first. Amounts marked as currency
/// (`$120`, `usd 120`, `120 dollars`) win over bare numbers, so
/// "3 of us, $90 total" yields 90. Falls back to the first bare number.
pub fn extract_amount(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");

    if let Some(caps) = CURRENCY_AMOUNT.captures(&cleaned) {
        let value = caps.get(1).or_else(|| caps.get(2))?;
        return value.as_str().parse().ok();
    }

    BARE_NUMBER
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Resolve how many people share a cost: roster size first, then the
/// declared participant count. Zero is treated as unknown.
pub fn resolve_participants(roster_size: usize, declared: Option<usize>) -> Option<usize> {
    if roster_size > 0 {
        Some(roster_size)
    } else {
        declared.filter(|n| *n > 0)
    }
}

/// Even split of one amount, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitEstimate {
    pub total: f64,
    pub participants: usize,
    pub per_person: f64,
    pub per_person_with_tip: f64,
}

impl SplitEstimate {
    /// `None` when `participants` is zero
    pub fn compute(total: f64, participants: usize) -> Option<Self> {
        if participants == 0 {
            return None;
        }
        let count = participants as f64;
        Some(Self {
            total,
            participants,
            per_person: round_cents(total / count),
            per_person_with_tip: round_cents(total * TIP_MULTIPLIER / count),
        })
    }
}
