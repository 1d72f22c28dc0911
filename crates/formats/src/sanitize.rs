use tracing::debug;

use crate::boundary::{Boundary, BoundaryRegion};

/// Administrative code the national boundary uses for the disputed-waters line.
pub const DISPUTED_ADCODE: &str = "100000_JD";

/// Region-name markers of disputed or inset placeholder features.
pub const DISPUTED_NAME_MARKERS: &[&str] = &["南海诸岛", "九段线"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeRules {
    pub reserved_adcode: String,
    /// Case-sensitive substrings; a name containing any of them is dropped.
    pub name_markers: Vec<String>,
}

impl Default for SanitizeRules {
    fn default() -> Self {
        Self {
            reserved_adcode: DISPUTED_ADCODE.to_string(),
            name_markers: DISPUTED_NAME_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// Why a region was dropped. Checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    ReservedAdcode,
    NameMarker,
    EmptyName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub kept: usize,
    pub reserved_adcode: usize,
    pub name_marker: usize,
    pub empty_name: usize,
}

impl SanitizeReport {
    pub fn dropped(&self) -> usize {
        self.reserved_adcode + self.name_marker + self.empty_name
    }
}

impl SanitizeRules {
    pub fn drop_reason(&self, region: &BoundaryRegion) -> Option<DropReason> {
        if region.adcode.as_deref() == Some(self.reserved_adcode.as_str()) {
            return Some(DropReason::ReservedAdcode);
        }
        if self
            .name_markers
            .iter()
            .any(|m| !m.is_empty() && region.name.contains(m.as_str()))
        {
            return Some(DropReason::NameMarker);
        }
        if region.name.is_empty() {
            return Some(DropReason::EmptyName);
        }
        None
    }
}

/// Drops disputed, placeholder and unnamed regions, keeping the order of the
/// rest. Running it on its own output changes nothing.
pub fn sanitize_boundary(boundary: &Boundary, rules: &SanitizeRules) -> (Boundary, SanitizeReport) {
    let mut report = SanitizeReport::default();
    let mut regions = Vec::with_capacity(boundary.regions.len());

    for region in &boundary.regions {
        match rules.drop_reason(region) {
            None => {
                report.kept += 1;
                regions.push(region.clone());
            }
            Some(DropReason::ReservedAdcode) => report.reserved_adcode += 1,
            Some(DropReason::NameMarker) => report.name_marker += 1,
            Some(DropReason::EmptyName) => report.empty_name += 1,
        }
    }

    debug!(
        kept = report.kept,
        reserved_adcode = report.reserved_adcode,
        name_marker = report.name_marker,
        empty_name = report.empty_name,
        "sanitized boundary regions"
    );

    (Boundary { regions }, report)
}

#[cfg(test)]
mod tests {
    use super::{DropReason, SanitizeRules, sanitize_boundary};
    use crate::boundary::{Boundary, BoundaryRegion};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn boundary(regions: &[(&str, Option<&str>)]) -> Boundary {
        Boundary {
            regions: regions
                .iter()
                .map(|(name, code)| BoundaryRegion::new(*name, *code))
                .collect(),
        }
    }

    #[test]
    fn drops_disputed_marker_and_empty_regions() {
        let b = boundary(&[
            ("北京市", Some("110000")),
            ("", Some("100000_JD")),
            ("南海诸岛", Some("100000")),
            ("", None),
            ("九段线", None),
            ("四川省", Some("510000")),
        ]);
        let (out, report) = sanitize_boundary(&b, &SanitizeRules::default());
        let names: Vec<&str> = out.region_names().collect();
        assert_eq!(names, vec!["北京市", "四川省"]);
        assert_eq!(report.kept, 2);
        assert_eq!(report.reserved_adcode, 1);
        assert_eq!(report.name_marker, 2);
        assert_eq!(report.empty_name, 1);
        assert_eq!(report.dropped(), 4);
    }

    #[test]
    fn reserved_code_wins_over_other_reasons() {
        let rules = SanitizeRules::default();
        let r = BoundaryRegion::new("", Some("100000_JD"));
        assert_eq!(rules.drop_reason(&r), Some(DropReason::ReservedAdcode));
    }

    #[test]
    fn marker_match_is_case_sensitive() {
        let rules = SanitizeRules {
            reserved_adcode: "X".to_string(),
            name_markers: vec!["Dispute".to_string()],
        };
        assert_eq!(
            rules.drop_reason(&BoundaryRegion::new("Disputed zone", None)),
            Some(DropReason::NameMarker)
        );
        assert_eq!(
            rules.drop_reason(&BoundaryRegion::new("disputed zone", None)),
            None
        );
    }

    fn arb_region() -> impl Strategy<Value = BoundaryRegion> {
        let name = prop_oneof![
            Just(String::new()),
            Just("南海诸岛".to_string()),
            Just("南海诸岛附属".to_string()),
            Just("九段线".to_string()),
            "[a-z]{1,6}",
        ];
        let code = prop_oneof![
            Just(None),
            Just(Some("100000_JD".to_string())),
            "[0-9]{6}".prop_map(Some),
        ];
        (name, code).prop_map(|(n, c)| BoundaryRegion::new(n, c.as_deref()))
    }

    proptest! {
        #[test]
        fn prop_output_is_clean_ordered_and_idempotent(
            regions in proptest::collection::vec(arb_region(), 0..24)
        ) {
            let rules = SanitizeRules::default();
            let input = Boundary { regions };
            let (once, _) = sanitize_boundary(&input, &rules);

            for r in &once.regions {
                prop_assert_ne!(r.adcode.as_deref(), Some("100000_JD"));
                prop_assert!(!r.name.is_empty());
                prop_assert!(!r.name.contains("南海诸岛") && !r.name.contains("九段线"));
            }

            // Survivors appear in the input in the same relative order.
            let mut cursor = input.regions.iter();
            for r in &once.regions {
                prop_assert!(cursor.any(|x| x == r));
            }

            let (twice, report) = sanitize_boundary(&once, &rules);
            prop_assert_eq!(&twice, &once);
            prop_assert_eq!(report.dropped(), 0);
        }
    }
}
