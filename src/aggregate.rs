use crate::models::{Component, EnrichedRecord, LicenseOutcome, OutcomeKind, Summary};

/// Build the enriched record set and summary tallies from resolved slots.
///
/// Record order preserves component order to keep output stable and
/// diffable; the counters are commutative so completion order never shows
/// through. Unresolved slots (left over from a cancelled run) are skipped —
/// partial results are still valid output.
pub fn aggregate(
    components: &[Component],
    outcomes: &[Option<LicenseOutcome>],
) -> (Vec<EnrichedRecord>, Summary) {
    let mut records = Vec::with_capacity(components.len());
    let mut summary = Summary::default();

    for (component, slot) in components.iter().zip(outcomes) {
        let Some(outcome) = slot else { continue };

        match outcome.kind() {
            OutcomeKind::Resolved => summary.resolved += 1,
            OutcomeKind::Proprietary => summary.proprietary += 1,
            OutcomeKind::Unknown => summary.unknown += 1,
        }

        let (license, source, note) = match outcome {
            LicenseOutcome::Resolved { license, source } => {
                (Some(license.clone()), Some(*source), None)
            }
            LicenseOutcome::Proprietary => (Some("Proprietary".to_string()), None, None),
            LicenseOutcome::Unknown { note } => (None, None, note.clone()),
        };

        records.push(EnrichedRecord {
            identifier: component.identifier.clone(),
            version: component.version.clone(),
            license,
            source,
            outcome: outcome.kind(),
            note,
        });
    }

    (records, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    fn component(identifier: &str) -> Component {
        Component {
            identifier: identifier.to_string(),
            version: "1.0.0".to_string(),
            purl: None,
            is_vendor_or_replaced: false,
        }
    }

    #[test]
    fn test_counts_sum_to_total() {
        let components = vec![component("a"), component("b"), component("c")];
        let outcomes = vec![
            Some(LicenseOutcome::Resolved {
                license: "MIT".to_string(),
                source: SourceKind::Override,
            }),
            Some(LicenseOutcome::Proprietary),
            Some(LicenseOutcome::Unknown { note: None }),
        ];

        let (records, summary) = aggregate(&components, &outcomes);
        assert_eq!(records.len(), 3);
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.proprietary, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.total(), components.len());
    }

    #[test]
    fn test_record_fields_and_order() {
        let components = vec![component("zzz"), component("aaa")];
        let outcomes = vec![
            Some(LicenseOutcome::Resolved {
                license: "Apache-2.0".to_string(),
                source: SourceKind::Github,
            }),
            Some(LicenseOutcome::Unknown {
                note: Some("blank component identifier".to_string()),
            }),
        ];

        let (records, _) = aggregate(&components, &outcomes);
        // Input order, not alphabetical or completion order.
        assert_eq!(records[0].identifier, "zzz");
        assert_eq!(records[0].license.as_deref(), Some("Apache-2.0"));
        assert_eq!(records[0].source, Some(SourceKind::Github));
        assert_eq!(records[0].outcome, OutcomeKind::Resolved);
        assert_eq!(records[1].license, None);
        assert_eq!(
            records[1].note.as_deref(),
            Some("blank component identifier")
        );
    }

    #[test]
    fn test_proprietary_fills_license_column() {
        let components = vec![component("go.mod")];
        let outcomes = vec![Some(LicenseOutcome::Proprietary)];

        let (records, _) = aggregate(&components, &outcomes);
        assert_eq!(records[0].license.as_deref(), Some("Proprietary"));
        assert_eq!(records[0].source, None);
    }

    #[test]
    fn test_cancelled_slots_are_skipped() {
        let components = vec![component("a"), component("b")];
        let outcomes = vec![Some(LicenseOutcome::Proprietary), None];

        let (records, summary) = aggregate(&components, &outcomes);
        assert_eq!(records.len(), 1);
        assert_eq!(summary.total(), 1);
    }
}
