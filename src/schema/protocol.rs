//! The clinical study protocol schema.
//!
//! This is the concrete document shape behind the eight-tab "create study"
//! wizard. Each top-level field corresponds to a section of the protocol;
//! the wizard tabs decide which section is on screen, but required flags
//! apply document-wide regardless of which tab declared them.

use super::FieldSchema;

/// Builds the full protocol schema.
///
/// Top-level layout:
///
/// - `overview` - identifying information and study design basics
/// - `eligibility` - age/sex bounds plus inclusion/exclusion criteria lists
/// - `arms` - study arms, each with a nested interventions collection
/// - `endpoints` - one primary endpoint record, secondary/exploratory lists
/// - `visits` - the visit schedule, each visit with nested procedure,
///   assessment, and lab-test collections
/// - `safety_rules` - stopping/alert rules
/// - `data` - eCRF inventory and data-management settings
pub fn protocol_schema() -> FieldSchema {
    FieldSchema::record(vec![
        ("overview", overview_section()),
        ("eligibility", eligibility_section()),
        ("arms", FieldSchema::collection(arm_element())),
        ("endpoints", endpoints_section()),
        ("visits", FieldSchema::collection(visit_element())),
        ("safety_rules", FieldSchema::collection(safety_rule_element())),
        ("data", data_section()),
    ])
}

fn overview_section() -> FieldSchema {
    FieldSchema::record(vec![
        ("title", FieldSchema::required_text()),
        (
            "phase",
            FieldSchema::required_choice(&[
                "Early Phase 1",
                "Phase 1",
                "Phase 2",
                "Phase 3",
                "Phase 4",
                "Not Applicable",
            ]),
        ),
        ("condition", FieldSchema::required_text()),
        ("sponsor", FieldSchema::text()),
        ("summary", FieldSchema::text()),
        ("start_date", FieldSchema::date()),
        ("estimated_enrollment", FieldSchema::number()),
    ])
}

fn eligibility_section() -> FieldSchema {
    FieldSchema::record(vec![
        ("min_age", FieldSchema::number()),
        ("max_age", FieldSchema::number()),
        ("sex", FieldSchema::choice(&["All", "Female", "Male"])),
        ("healthy_volunteers", FieldSchema::flag()),
        (
            "inclusion_criteria",
            FieldSchema::collection(FieldSchema::record(vec![(
                "criterion",
                FieldSchema::required_text(),
            )])),
        ),
        (
            "exclusion_criteria",
            FieldSchema::collection(FieldSchema::record(vec![(
                "criterion",
                FieldSchema::required_text(),
            )])),
        ),
    ])
}

fn arm_element() -> FieldSchema {
    FieldSchema::record(vec![
        ("name", FieldSchema::required_text()),
        (
            "arm_type",
            FieldSchema::choice(&[
                "Experimental",
                "Active Comparator",
                "Placebo Comparator",
                "Sham Comparator",
                "No Intervention",
            ]),
        ),
        ("description", FieldSchema::text()),
        (
            "interventions",
            FieldSchema::collection(intervention_element()),
        ),
    ])
}

fn intervention_element() -> FieldSchema {
    FieldSchema::record(vec![
        ("name", FieldSchema::required_text()),
        (
            "intervention_type",
            FieldSchema::choice(&[
                "Drug",
                "Device",
                "Biological",
                "Procedure",
                "Behavioral",
                "Other",
            ]),
        ),
        ("dosage", FieldSchema::text()),
        ("frequency", FieldSchema::text()),
        ("duration", FieldSchema::text()),
        ("route", FieldSchema::text()),
    ])
}

fn endpoints_section() -> FieldSchema {
    FieldSchema::record(vec![
        (
            "primary",
            FieldSchema::record(vec![
                ("name", FieldSchema::required_text()),
                ("time_frame", FieldSchema::required_text()),
                ("description", FieldSchema::text()),
            ]),
        ),
        (
            "secondary",
            FieldSchema::collection(FieldSchema::record(vec![
                ("name", FieldSchema::required_text()),
                ("time_frame", FieldSchema::text()),
                ("description", FieldSchema::text()),
            ])),
        ),
        (
            "exploratory",
            FieldSchema::collection(FieldSchema::record(vec![
                ("name", FieldSchema::text()),
                ("time_frame", FieldSchema::text()),
                ("description", FieldSchema::text()),
            ])),
        ),
    ])
}

fn visit_element() -> FieldSchema {
    FieldSchema::record(vec![
        ("name", FieldSchema::required_text()),
        ("day", FieldSchema::required_number()),
        ("window_days", FieldSchema::number()),
        (
            "procedures",
            FieldSchema::collection(FieldSchema::record(vec![("name", FieldSchema::text())])),
        ),
        (
            "assessments",
            FieldSchema::collection(FieldSchema::record(vec![("name", FieldSchema::text())])),
        ),
        (
            "lab_tests",
            FieldSchema::collection(FieldSchema::record(vec![
                ("name", FieldSchema::text()),
                ("fasting", FieldSchema::flag()),
            ])),
        ),
    ])
}

fn safety_rule_element() -> FieldSchema {
    FieldSchema::record(vec![
        ("parameter", FieldSchema::required_text()),
        (
            "condition",
            FieldSchema::choice(&["Above Threshold", "Below Threshold", "Outside Range"]),
        ),
        ("threshold", FieldSchema::text()),
        (
            "action",
            FieldSchema::required_choice(&[
                "Notify Investigator",
                "Pause Enrollment",
                "Dose Reduction",
                "Withdraw Participant",
            ]),
        ),
    ])
}

fn data_section() -> FieldSchema {
    FieldSchema::record(vec![
        (
            "ecrfs",
            FieldSchema::collection(FieldSchema::record(vec![
                ("name", FieldSchema::required_text()),
                (
                    "form_type",
                    FieldSchema::choice(&["Scheduled", "Unscheduled", "Log"]),
                ),
            ])),
        ),
        ("monitoring_plan", FieldSchema::text()),
        ("retention_years", FieldSchema::number()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fieldpath::FieldPath;

    #[test]
    fn test_top_level_sections_present() {
        let schema = protocol_schema();
        for section in [
            "overview",
            "eligibility",
            "arms",
            "endpoints",
            "visits",
            "safety_rules",
            "data",
        ] {
            assert!(schema.child(section).is_some(), "missing section {section}");
        }
    }

    #[test]
    fn test_nested_collection_depth() {
        let schema = protocol_schema();
        // arm -> intervention and visit -> procedure both nest two deep
        let path: FieldPath = "arms[0].interventions[0].route".parse().unwrap();
        assert!(schema.lookup(&path).is_some());

        let path: FieldPath = "visits[0].lab_tests[0].fasting".parse().unwrap();
        assert!(schema.lookup(&path).is_some());
    }

    #[test]
    fn test_required_flags() {
        let schema = protocol_schema();
        let required = [
            "overview.title",
            "arms[0].name",
            "arms[0].interventions[0].name",
            "endpoints.primary.time_frame",
            "visits[0].day",
            "safety_rules[0].action",
        ];
        for path in required {
            let field: FieldPath = path.parse().unwrap();
            assert!(
                schema.lookup(&field).unwrap().is_required(),
                "{path} should be required"
            );
        }

        let optional: FieldPath = "arms[0].interventions[0].dosage".parse().unwrap();
        assert!(!schema.lookup(&optional).unwrap().is_required());
    }
}
