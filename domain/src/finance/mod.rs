//! Financial computations over structured records
//!
//! Everything here is pure and synchronous: spending windows, even splits,
//! amount extraction and the credit card knowledge table.

pub mod cards;
pub mod spending;
pub mod split;
pub mod transaction;

pub use cards::{CARD_CATALOG, CardPick, CardRecommendation, SpendCategory};
pub use spending::{SpendingSummary, TopMerchant};
pub use split::{SplitEstimate, TIP_MULTIPLIER, extract_amount, resolve_participants};
pub use transaction::{MerchantRecords, TransactionRecord};
