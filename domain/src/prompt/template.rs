//! Prompt templates for the generative backend

use crate::core::query::{ChatMetadata, GroupMember, HistoryEntry};
use crate::finance::spending::SpendingSummary;
use crate::finance::split::SplitEstimate;
use crate::finance::transaction::MerchantRecords;
use crate::util::format_money;

/// Templates for every generative call the assistant makes
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the router's classification call
    pub fn router_system() -> &'static str {
        r#"You are Lattice, a ROUTER. Your ONLY job is to decide which specialist should handle the user's message.

SPECIALISTS
1 = Personal finance for ONE person: "should I buy", "buy now or wait", affordability, "my spending", "my budget", past transactions.
2 = Credit advisory: card recommendations, rewards, cashback, points, APR, credit score strategy, signup bonuses.
3 = Group coordination: splitting costs, settle-ups, "who owes who", shared purchases, "we/us/our" plus a group, RSVPs, reminders for everyone. If both personal and group cues are present, prefer 3.
4 = Conversation: greetings, small talk, questions about the assistant, anything outside finance, unclear intent.

OUTPUT FORMAT (MANDATORY)
- Output ONLY one digit: 1, 2, 3 or 4. No words, no punctuation, no code fences.
- Only if the message clearly needs several specialists, output JSON instead: {"tags": [3, 2]} with at most three codes, most specific first."#
    }

    /// User prompt for the router's classification call
    pub fn router_prompt(today: &str, chat: &ChatMetadata, message: &str) -> String {
        let chat_json = serde_json::to_string(chat).unwrap_or_else(|_| "{}".to_string());
        format!(
            r#"EXAMPLES
- "hi" -> 4
- "Should I buy concert tickets for $120?" -> 1
- "Which card should I use for Uber Eats?" -> 2
- "Split $240 dinner among 5" -> 3
- "Who still owes for the Airbnb?" -> 3

METADATA
- Today (ISO): {}
- Chat context (JSON): {}
- Latest user message: {}

Output exactly one digit now."#,
            today, chat_json, message
        )
    }

    /// Prompt for the personal-finance specialist
    pub fn personal_finance(
        today: &str,
        query: &str,
        summary: &SpendingSummary,
        records: &[MerchantRecords],
    ) -> String {
        let history = serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
        let top = summary
            .top_merchant
            .as_ref()
            .map(|t| format!("{} ({})", t.name, format_money(t.total)))
            .unwrap_or_else(|| "none".to_string());

        format!(
            r#"You are Lattice, an individual spending advisor for one user.
Given the user's purchase question, analyze (1) their recent spending behavior, (2) current price trends and
(3) public sentiment, then return a clear recommendation: Buy Now, Wait or Avoid.
Use the search tools when they are available to check prices and sentiment.

INFORMATION YOU HAVE
- Today (ISO): {today}
- User purchase question: {query}
- Precomputed spending summary: last 7 days {total_7}, last 30 days {total_30}, weekly baseline {baseline}, top merchant {top}, elevated risk: {risk}
- Purchase history (JSON, grouped by merchant):
{history}

OUTPUT FORMAT
**Purchase Recommendation:** <Buy Now | Wait | Avoid>
**Reasoning Summary:**
- Spending: <weekly/monthly totals and risk>
- Market: <price trend signal and why>
- Sentiment: <polarity and implications>
**Confidence:** <Low | Medium | High>
**Additional Advice:** <practical tip, alternatives, or timing>

Keep it simple, transparent and actionable."#,
            today = today,
            query = query,
            total_7 = format_money(summary.total_7_days),
            total_30 = format_money(summary.total_30_days),
            baseline = format_money(summary.weekly_baseline),
            top = top,
            risk = if summary.risk_flag { "yes" } else { "no" },
            history = history,
        )
    }

    /// Prompt for the group-coordination specialist
    pub fn group_coordination(
        today: &str,
        query: &str,
        chat: &ChatMetadata,
        roster: &[GroupMember],
        participants: Option<usize>,
        split: Option<&SplitEstimate>,
    ) -> String {
        let members = if roster.is_empty() {
            "No members listed yet.".to_string()
        } else {
            roster
                .iter()
                .map(|m| match &m.role {
                    Some(role) => format!("{} (role: {})", m.name, role),
                    None => m.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        let participant_hint = participants
            .map(|n| format!("{} members", n))
            .unwrap_or_else(|| "everyone involved".to_string());
        let (amount_hint, per_person, per_person_tip) = match split {
            Some(s) => (
                format_money(s.total),
                format!("${:.2}", s.per_person),
                format!("${:.2}", s.per_person_with_tip),
            ),
            None => (
                "the amount mentioned".to_string(),
                "calculated after confirming participants".to_string(),
                "depends on final tip".to_string(),
            ),
        };

        format!(
            r#"You are Lattice, a friendly group finance and task co-pilot for a chat of friends or teammates.
Keep the conversation natural while doing the math and logistics: split costs, suggest fair shares,
decide if the group should buy something now or later, and manage light follow-ups.

INFORMATION YOU HAVE
- Today (ISO): {today}
- Group name: {group}
- Members: {members}
- Currency: {currency}
- User message: {query}

HOW TO SPLIT COSTS
- Equal split: total divided by the participants actually involved. Default to cents.
- Taxes, fees and tip are allocated proportionally.
- If information is missing, state your assumption and proceed ("Assuming all {participant_hint} are in; shout if not.").

OUTPUT STYLE
- Splits: "Total {amount_hint} ÷ {participant_hint} = {per_person}. With tip, it's about {per_person_tip}."
- Be warm and concise; ask at most one clarifying question. Never trigger payments without explicit consent."#,
            today = today,
            group = chat.group_name.as_deref().unwrap_or("Your group chat"),
            members = members,
            currency = chat.currency.as_deref().unwrap_or("USD"),
            query = query,
            participant_hint = participant_hint,
            amount_hint = amount_hint,
            per_person = per_person,
            per_person_tip = per_person_tip,
        )
    }

    /// Prompt for the conversational companion
    pub fn conversational(
        today: &str,
        query: &str,
        user_name: Option<&str>,
        history: &[HistoryEntry],
    ) -> String {
        let history = serde_json::to_string_pretty(history).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"You are Lattice, a warm conversational front door for a personal finance co-pilot.
Greet people, keep the chat friendly, and gently steer toward money topics you can help with:
choosing a card, deciding whether to buy now or wait, and splitting costs with a group.
Politely decline tasks outside finance or light chit-chat.

STYLE
- Friendly, human, concise: 1-3 short sentences unless asked for more.
- Ask at most one gentle clarifying question.

CONTEXT
- Today (ISO): {}
- User name: {}
- Recent conversation (JSON): {}

User message: {}"#,
            today,
            user_name.unwrap_or("unknown"),
            history,
            query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::ChatKind;

    #[test]
    fn test_router_prompt_includes_metadata() {
        let chat = ChatMetadata {
            chat_id: Some("42".to_string()),
            chat_type: ChatKind::Group,
            ..Default::default()
        };
        let prompt = PromptTemplate::router_prompt("2025-11-09", &chat, "split the bill");
        assert!(prompt.contains("Today (ISO): 2025-11-09"));
        assert!(prompt.contains("\"chat_id\":\"42\""));
        assert!(prompt.contains("Latest user message: split the bill"));
    }

    #[test]
    fn test_group_prompt_with_split() {
        let split = SplitEstimate::compute(120.0, 3).unwrap();
        let roster = vec![GroupMember::new("Alice").with_role("admin"), GroupMember::new("Bob")];
        let prompt = PromptTemplate::group_coordination(
            "2025-11-09",
            "split $120",
            &ChatMetadata::default(),
            &roster,
            Some(3),
            Some(&split),
        );
        assert!(prompt.contains("Alice (role: admin), Bob"));
        assert!(prompt.contains("Total $120.00 ÷ 3 members = $40.00"));
        assert!(prompt.contains("about $46.00"));
        assert!(prompt.contains("Currency: USD"));
    }

    #[test]
    fn test_conversational_prompt_history() {
        let history = vec![HistoryEntry::user("hey"), HistoryEntry::ai("hi Alex")];
        let prompt = PromptTemplate::conversational("2025-11-09", "any tips?", Some("Alex"), &history);
        assert!(prompt.contains("User name: Alex"));
        assert!(prompt.contains("hi Alex"));
        assert!(prompt.ends_with("User message: any tips?"));
    }
}
