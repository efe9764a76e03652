use crate::models::EnrichedRecord;

/// Render the enriched record set as CSV with a header row, one record per
/// line, in record (= component) order.
pub fn render(records: &[EnrichedRecord]) -> String {
    let mut out = String::from("identifier,version,license,source,outcome\n");

    for record in records {
        let source = record
            .source
            .map(|s| s.to_string())
            .unwrap_or_default();
        let outcome = record.outcome.to_string();
        let row = [
            record.identifier.as_str(),
            record.version.as_str(),
            record.license.as_deref().unwrap_or("UNKNOWN"),
            source.as_str(),
            outcome.as_str(),
        ];
        let line: Vec<String> = row.iter().map(|field| escape(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutcomeKind, SourceKind};

    fn record(identifier: &str, license: Option<&str>, source: Option<SourceKind>) -> EnrichedRecord {
        EnrichedRecord {
            identifier: identifier.to_string(),
            version: "1.0.0".to_string(),
            license: license.map(str::to_string),
            source,
            outcome: match license {
                Some("Proprietary") => OutcomeKind::Proprietary,
                Some(_) => OutcomeKind::Resolved,
                None => OutcomeKind::Unknown,
            },
            note: None,
        }
    }

    #[test]
    fn test_render_rows() {
        let records = vec![
            record("github.com/acme/widget", Some("MIT"), Some(SourceKind::Override)),
            record("mystery", None, None),
        ];

        let csv = render(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "identifier,version,license,source,outcome");
        assert_eq!(lines[1], "github.com/acme/widget,1.0.0,MIT,override,resolved");
        assert_eq!(lines[2], "mystery,1.0.0,UNKNOWN,,unknown");
    }

    #[test]
    fn test_escaping() {
        let records = vec![record("weird,name", Some("MIT OR \"X\""), Some(SourceKind::Npm))];
        let csv = render(&records);
        assert!(csv.contains("\"weird,name\""));
        assert!(csv.contains("\"MIT OR \"\"X\"\"\""));
    }
}
