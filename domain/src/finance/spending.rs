//! Rolling-window spending analysis
//!
//! Pure computation over a user's transaction history anchored at "today":
//! 7-day and 30-day totals, the top merchant of the 30-day window, a
//! trailing weekly baseline and a risk flag.

use super::transaction::MerchantRecords;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days in the recent window
pub const RECENT_WINDOW_DAYS: i64 = 7;
/// Days in the baseline window
pub const BASELINE_WINDOW_DAYS: i64 = 30;
/// Weeks the baseline window is averaged over
pub const BASELINE_WEEKS: f64 = 4.0;
/// Recent spend above `baseline * RISK_MULTIPLIER` is flagged
pub const RISK_MULTIPLIER: f64 = 1.25;
/// Used instead of the baseline when the baseline is zero
pub const ABSOLUTE_RISK_THRESHOLD: f64 = 400.0;

/// Merchant with the highest 30-day spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMerchant {
    pub name: String,
    pub total: f64,
}

/// Result of the rolling-window analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_7_days: f64,
    pub total_30_days: f64,
    pub top_merchant: Option<TopMerchant>,
    /// Trailing weekly baseline: 30-day total / 4
    pub weekly_baseline: f64,
    pub risk_flag: bool,
    /// Number of records that fell inside the 30-day window
    pub records_in_window: usize,
}

impl SpendingSummary {
    /// Analyze `records` relative to `today`.
    ///
    /// Records dated after `today` are ignored. Merchant ties resolve to the
    /// alphabetically first name so identical input always yields identical
    /// output.
    pub fn compute(records: &[MerchantRecords], today: DateTime<Utc>) -> Self {
        let start_30 = today - Duration::days(BASELINE_WINDOW_DAYS);
        let start_7 = today - Duration::days(RECENT_WINDOW_DAYS);

        let mut total_30 = 0.0;
        let mut total_7 = 0.0;
        let mut records_in_window = 0;
        let mut merchant_totals: BTreeMap<&str, f64> = BTreeMap::new();

        for group in records {
            for tx in &group.transactions {
                if tx.timestamp > today || tx.timestamp < start_30 {
                    continue;
                }
                records_in_window += 1;
                total_30 += tx.amount;
                *merchant_totals.entry(group.merchant.as_str()).or_insert(0.0) += tx.amount;
                if tx.timestamp >= start_7 {
                    total_7 += tx.amount;
                }
            }
        }

        let top_merchant = merchant_totals
            .into_iter()
            .fold(None::<(&str, f64)>, |best, (name, total)| match best {
                Some((_, best_total)) if best_total >= total => best,
                _ => Some((name, total)),
            })
            .map(|(name, total)| TopMerchant {
                name: name.to_string(),
                total,
            });

        let weekly_baseline = total_30 / BASELINE_WEEKS;
        let risk_flag = if weekly_baseline > 0.0 {
            total_7 > weekly_baseline * RISK_MULTIPLIER
        } else {
            total_7 > ABSOLUTE_RISK_THRESHOLD
        };

        Self {
            total_7_days: total_7,
            total_30_days: total_30,
            top_merchant,
            weekly_baseline,
            risk_flag,
            records_in_window,
        }
    }

    /// Whether any record fell inside the analysis window
    pub fn has_data(&self) -> bool {
        self.records_in_window > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::transaction::TransactionRecord;
    use chrono::TimeZone;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 9, 12, 0, 0).unwrap()
    }

    fn tx(days_ago: i64, amount: f64) -> TransactionRecord {
        TransactionRecord::new(amount, today() - Duration::days(days_ago))
    }

    #[test]
    fn test_empty_records() {
        let summary = SpendingSummary::compute(&[], today());
        assert_eq!(summary.total_7_days, 0.0);
        assert_eq!(summary.total_30_days, 0.0);
        assert_eq!(summary.weekly_baseline, 0.0);
        assert!(summary.top_merchant.is_none());
        assert!(!summary.risk_flag);
        assert!(!summary.has_data());
    }

    #[test]
    fn test_risk_flag_above_baseline() {
        // $400 over 30 days (baseline $100/week), $130 of it in the last 7 days
        let records = vec![
            MerchantRecords::new("Ticketmaster", vec![tx(2, 130.0)]),
            MerchantRecords::new("Grocer", vec![tx(10, 90.0), tx(17, 90.0), tx(24, 90.0)]),
        ];
        let summary = SpendingSummary::compute(&records, today());
        assert_eq!(summary.total_30_days, 400.0);
        assert_eq!(summary.total_7_days, 130.0);
        assert_eq!(summary.weekly_baseline, 100.0);
        assert!(summary.risk_flag);
        assert_eq!(summary.top_merchant.unwrap().name, "Grocer");
    }

    #[test]
    fn test_no_risk_at_threshold() {
        // 125 is not strictly greater than 100 * 1.25
        let records = vec![MerchantRecords::new(
            "Shop",
            vec![tx(1, 125.0), tx(12, 275.0)],
        )];
        let summary = SpendingSummary::compute(&records, today());
        assert!(!summary.risk_flag);
    }

    #[test]
    fn test_absolute_threshold_when_baseline_zero() {
        let records = vec![MerchantRecords::new("Refunds", vec![tx(3, 0.0)])];
        let summary = SpendingSummary::compute(&records, today());
        assert_eq!(summary.weekly_baseline, 0.0);
        assert!(!summary.risk_flag);
        assert!(summary.has_data());
    }

    #[test]
    fn test_old_and_future_records_excluded() {
        let records = vec![MerchantRecords::new(
            "Shop",
            vec![tx(45, 500.0), tx(-2, 80.0), tx(5, 20.0)],
        )];
        let summary = SpendingSummary::compute(&records, today());
        assert_eq!(summary.total_30_days, 20.0);
        assert_eq!(summary.records_in_window, 1);
    }

    #[test]
    fn test_top_merchant_tie_is_deterministic() {
        let records = vec![
            MerchantRecords::new("Zeta", vec![tx(1, 50.0)]),
            MerchantRecords::new("Alpha", vec![tx(2, 50.0)]),
        ];
        let summary = SpendingSummary::compute(&records, today());
        assert_eq!(summary.top_merchant.unwrap().name, "Alpha");
    }

    #[test]
    fn test_same_merchant_across_groups_is_merged() {
        let records = vec![
            MerchantRecords::new("Amazon", vec![tx(1, 30.0)]),
            MerchantRecords::new("Amazon", vec![tx(9, 40.0)]),
            MerchantRecords::new("Target", vec![tx(3, 60.0)]),
        ];
        let top = SpendingSummary::compute(&records, today()).top_merchant.unwrap();
        assert_eq!(top.name, "Amazon");
        assert_eq!(top.total, 70.0);
    }
}
