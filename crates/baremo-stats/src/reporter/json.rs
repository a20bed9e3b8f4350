use crate::report::ScoreReport;
use anyhow::Result;

pub struct JsonReporter;

impl JsonReporter {
    pub fn format(report: &ScoreReport, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::sample_report;

    #[test]
    fn test_json_compact() {
        let output = JsonReporter::format(&sample_report(), false).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_json_roundtrip() {
        let report = sample_report();
        let json = JsonReporter::format(&report, true).unwrap();
        let parsed: ScoreReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.scores, report.scores);
        assert_eq!(parsed.buckets.len(), report.buckets.len());
        assert_eq!(parsed.generated_at, report.generated_at);
    }
}
