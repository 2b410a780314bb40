//! Static credit card knowledge table.
//!
//! Read-only data shared by every credit-advisory invocation. A query is
//! mapped to a [`SpendCategory`] by keyword, and each category carries a
//! best/backup card pair. Long-form descriptions live in [`CARD_CATALOG`].

use crate::util::{contains_phrase, word_tokens};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spend category detected from a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendCategory {
    Travel,
    Dining,
    Groceries,
    Entertainment,
    Gas,
    Online,
    /// No category keyword matched
    General,
}

impl SpendCategory {
    /// Categories in detection order; the first match wins
    pub const DETECTABLE: [SpendCategory; 6] = [
        SpendCategory::Travel,
        SpendCategory::Dining,
        SpendCategory::Groceries,
        SpendCategory::Entertainment,
        SpendCategory::Gas,
        SpendCategory::Online,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpendCategory::Travel => "travel",
            SpendCategory::Dining => "dining",
            SpendCategory::Groceries => "groceries",
            SpendCategory::Entertainment => "entertainment",
            SpendCategory::Gas => "gas",
            SpendCategory::Online => "online",
            SpendCategory::General => "general",
        }
    }

    /// Phrase used in rendered advice ("everyday spending" for General)
    pub fn describe(&self) -> &'static str {
        match self {
            SpendCategory::General => "everyday spending",
            other => other.as_str(),
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            SpendCategory::Travel => &[
                "travel", "flight", "flights", "air", "airline", "hotel", "hotels", "vacation",
                "trip",
            ],
            SpendCategory::Dining => &[
                "dining",
                "restaurant",
                "restaurants",
                "food",
                "eat",
                "eats",
                "coffee",
                "drink",
                "drinks",
            ],
            SpendCategory::Groceries => &["grocery", "groceries", "supermarket", "market"],
            SpendCategory::Entertainment => &["concert", "concerts", "entertainment", "movie", "movies", "show"],
            SpendCategory::Gas => &["gas", "fuel"],
            SpendCategory::Online => &["amazon", "online", "shopping"],
            SpendCategory::General => &[],
        }
    }

    /// Detect the spend category of `text` on whole words
    pub fn detect(text: &str) -> Self {
        let tokens = word_tokens(text);
        Self::DETECTABLE
            .into_iter()
            .find(|category| {
                category
                    .keywords()
                    .iter()
                    .any(|kw| contains_phrase(&tokens, kw))
            })
            .unwrap_or(SpendCategory::General)
    }

    /// Best and backup card for this category
    pub fn recommendation(&self) -> CardRecommendation {
        let (best, backup) = match self {
            SpendCategory::Travel => (
                card("Chase Sapphire Preferred", "700+", "3x on travel/dining; strong transfer partners"),
                card("Capital One Venture Rewards", "700+", "2x everywhere with simple redemption"),
            ),
            SpendCategory::Dining => (
                card("American Express Gold", "720+", "4x on restaurants & US supermarkets"),
                card("Capital One Savor", "700+", "4x dining & entertainment"),
            ),
            SpendCategory::Groceries => (
                card("Amex Blue Cash Preferred", "700+", "6% at US supermarkets"),
                card("Amex Blue Cash Everyday", "690+", "3% supermarkets with no annual fee"),
            ),
            SpendCategory::Entertainment => (
                card("Capital One Savor", "700+", "4x on entertainment and dining"),
                card("Chase Freedom Flex", "700+", "Rotating 5% categories often include entertainment"),
            ),
            SpendCategory::Gas => (
                card("Costco Anywhere Visa", "700+", "4% back on fuel (Costco membership required)"),
                card("Bank of America Customized Cash", "700+", "3% in chosen category like gas"),
            ),
            SpendCategory::Online => (
                card("Amazon Prime Rewards Visa", "700+", "5% back at Amazon for Prime members"),
                card("Chase Freedom Unlimited", "700+", "1.5%-3% across categories including online spends"),
            ),
            SpendCategory::General => (
                card("Chase Freedom Unlimited", "700+", "Flat rewards across every purchase, easy to manage"),
                card("Discover it Cash Back", "690+", "Rotating 5% quarterly categories"),
            ),
        };
        CardRecommendation { best, backup }
    }
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One card in a recommendation pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPick {
    pub name: &'static str,
    pub recommended_score: &'static str,
    pub rationale: &'static str,
}

const fn card(name: &'static str, recommended_score: &'static str, rationale: &'static str) -> CardPick {
    CardPick {
        name,
        recommended_score,
        rationale,
    }
}

impl CardPick {
    /// Long-form catalog description, if the catalog knows this card
    pub fn details(&self) -> Option<&'static str> {
        CARD_CATALOG
            .iter()
            .find(|(name, _)| *name == self.name)
            .map(|(_, details)| *details)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRecommendation {
    pub best: CardPick,
    pub backup: CardPick,
}

/// Card name to long-form description
pub const CARD_CATALOG: &[(&str, &str)] = &[
    (
        "Chase Sapphire Preferred",
        "2x-3x points on travel & dining, 1x elsewhere; annual fee ~$95; good for travel redemptions and transfer partners",
    ),
    (
        "Capital One Venture Rewards",
        "2x miles on all purchases, 5x on hotels booked with Capital One; annual fee ~$95; simple flat-rate travel",
    ),
    (
        "American Express Gold",
        "4x restaurants & U.S. supermarkets (up to caps), 3x flights booked directly; annual fee ~$250",
    ),
    (
        "Capital One Savor",
        "4x on dining & entertainment, 2x on groceries; great for dining/entertainment spenders",
    ),
    (
        "Amex Blue Cash Preferred",
        "6% at US supermarkets (up to cap), 3% on transit and select streaming; annual fee ~$95",
    ),
    (
        "Amex Blue Cash Everyday",
        "3% at supermarkets (lower caps); no annual fee; lighter grocery option",
    ),
    (
        "Chase Freedom Flex",
        "rotating 5% quarterly categories, plus 5% on travel via Chase and 3% on dining; no annual fee",
    ),
    (
        "Costco Anywhere Visa",
        "4% on gas (up to cap), 3% on restaurants & travel, 2% at Costco; requires Costco membership",
    ),
    (
        "Bank of America Customized Cash",
        "3% in a chosen category (gas, online shopping, dining, travel), 2% at grocery stores; no annual fee",
    ),
    (
        "Amazon Prime Rewards Visa",
        "5% on Amazon purchases for Prime members, 2% at restaurants/gas; no annual fee (Prime required)",
    ),
    (
        "Chase Freedom Unlimited",
        "1.5%-3% on various categories (3% dining & drugstores); no annual fee; good companion to Sapphire",
    ),
    (
        "Discover it Cash Back",
        "rotating 5% quarterly categories (matched the first year); no annual fee",
    ),
    (
        "Citi Double Cash",
        "2% total cashback (1% when you buy, 1% when you pay); no annual fee",
    ),
    (
        "Wells Fargo Active Cash",
        "2% unlimited cash back; no annual fee; simple flat-rate cashback",
    ),
];
