//! Progress reporting while a query is answered

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use lattice_application::ports::progress::ProgressNotifier;
use lattice_domain::{CapabilityTag, HandlerResult, RoutingDecision};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per running capability
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<CapabilityTag, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn status_line(result: &HandlerResult) -> String {
        match (result.succeeded, result.tier, result.error) {
            (true, Some(tier), _) if result.degraded() => {
                format!("{} answered at {}", "~".yellow(), tier)
            }
            (true, Some(tier), _) => format!("{} answered at {}", "v".green(), tier),
            (true, None, _) => format!("{} answered", "v".green()),
            (false, _, Some(error)) => format!("{} {}", "x".red(), error),
            (false, _, None) => format!("{} failed", "x".red()),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_routed(&self, decision: &RoutingDecision) {
        let tags: Vec<_> = decision.tags().iter().map(|t| t.label()).collect();
        let _ = self.multi.println(format!(
            "{} {} ({})",
            "->".cyan(),
            tags.join(" + ").bold(),
            decision.source()
        ));
    }

    fn on_capability_start(&self, tag: CapabilityTag) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(tag.label());
        pb.set_message("working...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(tag, pb);
        }
    }

    fn on_capability_complete(&self, result: &HandlerResult) {
        let bar = self
            .bars
            .lock()
            .ok()
            .and_then(|mut bars| bars.remove(&result.tag));
        match bar {
            Some(pb) => pb.finish_with_message(Self::status_line(result)),
            None => {
                let _ = self.multi.println(format!(
                    "  {} {}",
                    result.tag.label().bold(),
                    Self::status_line(result)
                ));
            }
        }
    }

    fn on_complete(&self) {
        if let Ok(mut bars) = self.bars.lock() {
            for (_, pb) in bars.drain() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_routed(&self, decision: &RoutingDecision) {
        eprintln!(
            "{} routed to {} ({})",
            "->".cyan(),
            decision
                .tags()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
                .bold(),
            decision.rationale()
        );
    }

    fn on_capability_start(&self, tag: CapabilityTag) {
        eprintln!("  {} {}", "..".dimmed(), tag);
    }

    fn on_capability_complete(&self, result: &HandlerResult) {
        eprintln!(
            "  {} {}",
            result.tag,
            ProgressReporter::status_line(result)
        );
    }
}
