//! Group-coordination fallback: even split arithmetic with stated assumptions.

use crate::core::query::GroupMember;
use crate::finance::split::{SplitEstimate, extract_amount, resolve_participants};
use crate::util::format_money;

/// Render a split plan for `query_text`.
///
/// Participants come from `roster` when it is non-empty, otherwise from
/// `declared_participants`. When the amount or the head count can't be
/// resolved the missing piece is named instead of guessed.
pub fn render_split_plan(
    query_text: &str,
    roster: &[GroupMember],
    declared_participants: Option<usize>,
) -> String {
    let amount = extract_amount(query_text);
    let participants = resolve_participants(roster.len(), declared_participants);
    let split = amount.zip(participants).and_then(|(a, n)| SplitEstimate::compute(a, n));

    let mut out = String::new();

    match &split {
        Some(split) => {
            out.push_str(&format!(
                "**Task Summary:** Even split of {} across {} people.\n",
                format_money(split.total),
                split.participants
            ));
            out.push_str(&format!(
                "Total {} ÷ {} = ${:.2}. With a 15% tip, it's about ${:.2}.\n",
                format_money(split.total),
                split.participants,
                split.per_person,
                split.per_person_with_tip
            ));
        }
        None => {
            out.push_str("**Task Summary:** I can set up the split once a couple of details are in.\n");
        }
    }

    out.push_str("**Suggested Split:**\n");
    if roster.is_empty() {
        match &split {
            Some(split) => out.push_str(&format!(
                "- Each of the {} people: ${:.2}\n",
                split.participants, split.per_person
            )),
            None => out.push_str("- Add members so I can help divide the total.\n"),
        }
    } else {
        for member in roster {
            let share = split
                .map(|s| format!("${:.2}", s.per_person))
                .unwrap_or_else(|| "amount TBD".to_string());
            out.push_str(&format!("- {}: {}\n", member.name, share));
        }
    }

    if amount.is_none() {
        out.push_str(
            "**Missing:** I couldn't find a total amount in that message. \
             Tell me the total (for example \"$120\") and I'll divide it.\n",
        );
    }
    if participants.is_none() {
        out.push_str(
            "**Missing:** I don't know how many people are splitting this. \
             Tell me the head count and I'll do the math.\n",
        );
    }

    if let Some(n) = participants {
        out.push_str(&format!(
            "**Assumption:** Assuming all {} members are in; say who opted out and I'll recalculate.",
            n
        ));
    } else {
        out.push_str("**Next Step:** Once I have both pieces I'll split it instantly.");
    }

    out
}
