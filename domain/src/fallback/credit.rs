//! Credit-advisory answer rendered from the static card table.

use crate::finance::cards::{CardPick, SpendCategory};

fn describe(pick: &CardPick) -> String {
    match pick.details() {
        Some(details) => format!(
            "{} (recommended score {}): {}",
            pick.name, pick.recommended_score, details
        ),
        None => format!("{} (recommended score {})", pick.name, pick.recommended_score),
    }
}

/// Render a best/backup card recommendation for the spend category
/// detected in `query_text`.
pub fn render_card_advice(query_text: &str) -> String {
    let category = SpendCategory::detect(query_text);
    let rec = category.recommendation();

    format!(
        "**Best Card:** {best}\n\
         **Why it Wins:** Tailored for {category}: {why}, without overcomplicating your wallet.\n\
         **Rewards Snapshot:** Expect elevated earn rates for {category} while keeping utilisation in check.\n\
         **Backup Option:** {backup}. {backup_why}.\n\
         **Score Health Tip:** Keep utilisation below 30% and pay in full each month to support your credit score.\n\
         **Extra Advice:** Set a reminder to review your statement in a week to confirm the expected rewards posted.",
        best = describe(&rec.best),
        category = category.describe(),
        why = rec.best.rationale,
        backup = describe(&rec.backup),
        backup_why = rec.backup.rationale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dining_query() {
        let text = render_card_advice("Heading to a new restaurant tonight, any card suggestions?");
        assert!(text.starts_with("**Best Card:** American Express Gold (recommended score 720+)"));
        assert!(text.contains("**Backup Option:** Capital One Savor"));
        assert!(text.contains("Tailored for dining"));
    }

    #[test]
    fn test_general_default() {
        let text = render_card_advice("what's the best card?");
        assert!(text.contains("**Best Card:** Chase Freedom Unlimited"));
        assert!(text.contains("**Backup Option:** Discover it Cash Back"));
        assert!(text.contains("everyday spending"));
    }

    #[test]
    fn test_has_every_section() {
        let text = render_card_advice("gas card");
        for heading in [
            "**Best Card:**",
            "**Why it Wins:**",
            "**Rewards Snapshot:**",
            "**Backup Option:**",
            "**Score Health Tip:**",
            "**Extra Advice:**",
        ] {
            assert!(text.contains(heading), "missing {}", heading);
        }
    }
}
