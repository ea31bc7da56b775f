//! Human-readable text output formatter

use crate::aggregator::AggregateResult;
use crate::error::Result;
use crate::format::OutputFormatter;

/// Text formatter - outputs a human-readable listing
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, result: &AggregateResult) -> Result<String> {
        let mut output = String::new();

        if result.locations.is_empty() {
            output.push_str("No drive-thru locations found.\n");
        } else {
            output.push_str(&format!("Found {} locations:\n\n", result.locations.len()));

            for loc in &result.locations {
                let status = if loc.is_open { "open" } else { "closed" };
                let schedule = if loc.open_time.is_none() {
                    "24 hours".to_string()
                } else {
                    status.to_string()
                };

                output.push_str(&format!(
                    "  {:>6.2} mi  {:8}  {}  ({})\n",
                    loc.distance_miles, schedule, loc.address, loc.kind
                ));
            }
        }

        if !result.errors.is_empty() {
            output.push_str("\nErrors:\n");
            for error in &result.errors {
                output.push_str(&format!("  - {}\n", error));
            }
        }

        Ok(output)
    }
}
