//! End-to-end tests for loading and replaying edit scripts.

use std::fs;
use std::io::Write;

use studybuilder::engine::{FormEngine, Wizard};
use studybuilder::schema::protocol_schema;
use studybuilder::script::{apply_script, load_script_file};
use tempfile::NamedTempFile;

fn write_script(extension: &str, content: &str) -> std::path::PathBuf {
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().with_extension(extension);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn yaml_script_drives_the_engine() {
    let script = write_script(
        "yaml",
        r#"
- set:
    path: overview.title
    value: Dose Escalation Study
- set:
    path: overview.estimated_enrollment
    value: 48
- append:
    path: arms
- set:
    path: arms[1].name
    value: Placebo
- append:
    path: arms[0].interventions
- set:
    path: arms[0].interventions[1].dosage
    value: 50 mg
- remove_at:
    path: arms[0].interventions
    index: 0
"#,
    );

    let mut engine = FormEngine::new(protocol_schema());
    let ops = load_script_file(&script).unwrap();
    apply_script(&mut engine, &ops).unwrap();

    assert_eq!(
        engine
            .get(&"arms[1].name".parse().unwrap())
            .unwrap()
            .as_text(),
        Some("Placebo")
    );
    // The removal shifted the surviving intervention down to index 0
    assert_eq!(
        engine
            .get(&"arms[0].interventions[0].dosage".parse().unwrap())
            .unwrap()
            .as_text(),
        Some("50 mg")
    );
    assert!(engine
        .get(&"arms[0].interventions[1].dosage".parse().unwrap())
        .is_none());
}

#[test]
fn json_script_parses_identically() {
    let script = write_script(
        "json",
        r#"[
            {"set": {"path": "eligibility.healthy_volunteers", "value": true}},
            {"append": {"path": "eligibility.inclusion_criteria"}},
            {"set": {"path": "eligibility.inclusion_criteria[1].criterion", "value": "ECOG 0-1"}}
        ]"#,
    );

    let mut engine = FormEngine::new(protocol_schema());
    let ops = load_script_file(&script).unwrap();
    apply_script(&mut engine, &ops).unwrap();

    assert_eq!(
        engine
            .get(&"eligibility.inclusion_criteria[1].criterion".parse().unwrap())
            .unwrap()
            .as_text(),
        Some("ECOG 0-1")
    );
}

#[test]
fn script_error_names_the_failing_step_and_leaves_prior_edits() {
    let script = write_script(
        "yaml",
        r#"
- set:
    path: overview.title
    value: Study
- remove_at:
    path: visits
    index: 0
"#,
    );

    let mut engine = FormEngine::new(protocol_schema());
    let ops = load_script_file(&script).unwrap();
    let err = apply_script(&mut engine, &ops).unwrap_err();

    // Step 2 tried to remove the only visit
    assert!(err.to_string().contains("step 2"));
    let chain = format!("{:#}", err);
    assert!(chain.contains("Cannot remove the last element"));

    // The edit before the failure was applied
    assert_eq!(
        engine
            .get(&"overview.title".parse().unwrap())
            .unwrap()
            .as_text(),
        Some("Study")
    );
}

#[test]
fn full_script_reaches_a_submittable_document() {
    let script = write_script(
        "yaml",
        r#"
- set: {path: overview.title, value: Adjuvant Therapy Outcomes Study}
- set: {path: overview.phase, value: Phase 3}
- set: {path: overview.condition, value: Stage II Breast Cancer}
- set: {path: 'eligibility.inclusion_criteria[0].criterion', value: Age 18 or older}
- set: {path: 'eligibility.exclusion_criteria[0].criterion', value: Prior systemic therapy}
- set: {path: 'arms[0].name', value: Arm A}
- set: {path: 'arms[0].interventions[0].name', value: Drug X}
- set: {path: endpoints.primary.name, value: Overall Survival}
- set: {path: endpoints.primary.time_frame, value: 5 years}
- set: {path: 'endpoints.secondary[0].name', value: Progression-Free Survival}
- set: {path: 'visits[0].name', value: Baseline}
- set: {path: 'visits[0].day', value: 0}
- set: {path: 'safety_rules[0].parameter', value: ALT}
- set: {path: 'safety_rules[0].action', value: Notify Investigator}
- set: {path: 'data.ecrfs[0].name', value: Demographics}
"#,
    );

    let mut wizard = Wizard::new(FormEngine::new(protocol_schema()));
    let ops = load_script_file(&script).unwrap();
    apply_script(wizard.engine_mut(), &ops).unwrap();

    assert!(wizard.engine().is_complete());
    let document = wizard.submit().unwrap();
    assert_eq!(
        document["safety_rules"][0]["action"],
        serde_json::json!("Notify Investigator")
    );
}
