//! Personal-finance fallback: a buy/wait answer from spending history alone.

use crate::finance::spending::SpendingSummary;
use crate::finance::transaction::MerchantRecords;
use crate::util::format_money;
use chrono::{DateTime, Utc};

/// Render the deterministic purchase recommendation.
///
/// Always recommends waiting; it has no market or sentiment signal to argue
/// for buying now. With no records in the window it says so instead of
/// asserting a risk level.
pub fn render_purchase_advice(
    records: &[MerchantRecords],
    today: DateTime<Utc>,
    user_query: &str,
) -> String {
    let summary = SpendingSummary::compute(records, today);
    render_summary(&summary, user_query)
}

/// Render from an already computed summary
pub fn render_summary(summary: &SpendingSummary, user_query: &str) -> String {
    let spending_line = if summary.has_data() {
        let top_line = match &summary.top_merchant {
            Some(top) => format!("Top merchant: {} ({}).", top.name, format_money(top.total)),
            None => "Top merchant: data not yet available.".to_string(),
        };
        format!(
            "{} in the past 7 days, {} over the last 30 days. {}",
            format_money(summary.total_7_days),
            format_money(summary.total_30_days),
            top_line
        )
    } else {
        "Transaction history is not yet available, so totals start at $0.00. \
         Top merchant: data not yet available."
            .to_string()
    };

    let budget_line = if !summary.has_data() {
        "Spending data not yet available; link an account to get a risk check."
    } else if summary.risk_flag {
        "Recent spend looks elevated compared to your weekly baseline."
    } else {
        "Recent spend is within a steady band."
    };

    let subject = match user_query.trim() {
        "" => "this purchase",
        q => q,
    };

    format!(
        "**Purchase Recommendation:** Wait\n\
         **Reasoning Summary**\n\
         - Spending: {spending_line}\n\
         - Market: Check a couple of trusted retailers for up-to-date pricing before committing.\n\
         - Sentiment: Scan a few recent reviews and forums to make sure there's no major red flag.\n\
         - Budget Check: {budget_line}\n\n\
         **Confidence:** Medium\n\
         **Additional Advice:** Set a maximum price in mind before you shop for \"{subject}\" \
         and give yourself a 24-hour cool-off window before hitting buy."
    )
}
