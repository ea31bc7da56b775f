//! JSON output formatter

use crate::aggregator::AggregateResult;
use crate::error::Result;
use crate::format::OutputFormatter;

/// JSON formatter - outputs the full result as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON response"
    }

    fn format(&self, result: &AggregateResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
