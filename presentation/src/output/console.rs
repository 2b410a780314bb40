//! Console output formatter for answers

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use lattice_application::RespondOutput;
use lattice_domain::HandlerResult;

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format(output: &RespondOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_text(output),
            OutputFormat::Sections => Self::format_sections(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// The composite answer as the chat would show it
    pub fn format_text(output: &RespondOutput) -> String {
        format!("{}\n", output.text())
    }

    /// Routing decision followed by one colored block per section
    pub fn format_sections(output: &RespondOutput) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "{} {} {}\n",
            "Routed:".cyan().bold(),
            output
                .decision
                .tags()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            format!(
                "({}: {})",
                output.decision.source(),
                output.decision.rationale()
            )
            .dimmed()
        ));

        for section in output.response.sections() {
            text.push_str(&Self::section_header(section));
            text.push_str(section.text.trim());
            text.push('\n');
        }

        if output.response.all_failed() {
            text.push_str(&format!("\n{}\n", output.text().red()));
        }

        text
    }

    /// Pretty JSON of the decision and every section
    pub fn format_json(output: &RespondOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(section: &HandlerResult) -> String {
        let title = format!("── {} ──", section.tag.label());
        let status = match (section.succeeded, section.tier, section.error) {
            (true, Some(tier), _) => format!("[{}]", tier),
            (true, None, _) => String::new(),
            (false, _, Some(error)) => format!("[{}]", error),
            (false, _, None) => "[failed]".to_string(),
        };
        if section.succeeded {
            format!("\n{} {}\n", title.yellow().bold(), status.dimmed())
        } else {
            format!("\n{} {}\n", title.red().bold(), status.red())
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
