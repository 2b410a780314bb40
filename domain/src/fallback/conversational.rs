//! Fixed small-talk replies

/// Shown for a blank query
pub const EMPTY_QUERY_HELP: &str = "Add a question and I'll take it from there. I can help you decide \
whether to buy now or wait, pick the best card for a purchase, or split a cost with your group.";

/// Polite reply used when no generative backend is available
pub fn render_greeting(user_name: Option<&str>) -> String {
    let name = user_name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("there");
    format!(
        "Hey {}! Thanks for checking in. I can help you weigh a purchase, pick a card, \
         or split a bill. What's on your mind money-wise?",
        name
    )
}
