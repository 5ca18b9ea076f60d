use serde::Serialize;

use crate::error::Result;

use super::{CheckSummary, MissingReason, OutputFormatter};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    covered: bool,
    manifest: &'a str,
    staged: usize,
    excluded: usize,
    missing: Vec<JsonMissing<'a>>,
}

#[derive(Serialize)]
struct JsonMissing<'a> {
    path: &'a str,
    reason: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    recorded_as: &'a [String],
}

fn is_empty(names: &&[String]) -> bool {
    names.is_empty()
}

const fn reason_key(reason: MissingReason) -> &'static str {
    match reason {
        MissingReason::UnknownChecksum => "unknown_checksum",
        MissingReason::NameMismatch => "name_mismatch",
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &CheckSummary) -> Result<String> {
        let output = JsonOutput {
            covered: summary.is_covered(),
            manifest: &summary.manifest,
            staged: summary.staged,
            excluded: summary.excluded,
            missing: summary
                .missing
                .iter()
                .map(|m| JsonMissing {
                    path: &m.path,
                    reason: reason_key(m.reason),
                    recorded_as: &m.recorded_as,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
