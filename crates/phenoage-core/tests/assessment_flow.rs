//! Input assembly, assessment, and batch processing through the public API.

use serde_json::{json, Value};

use phenoage_core::{
    bioage_assessment, process_records, simulate_with_percentiles, BatchOptions, Biomarker,
    BiomarkerInput, PhenoAgeError, Record,
};

fn labeled_input() -> BiomarkerInput {
    let mut input = BiomarkerInput::new();
    input.set_labeled("Albumin", 4.47);
    input.set_labeled("creat", 1.17);
    input.set_labeled("GLU", 77.0);
    input.set_labeled("C-Reactive Protein", 0.07);
    input.set_labeled("lymphs", 36.0);
    input.set_labeled("Mean Cell Volume", 90.0);
    input.set_labeled("RDW", 13.7);
    input.set_labeled("alk phos", 54.0);
    input.set_labeled("White Blood Cells", 4.5);
    input.set_labeled("Chron Age", 46.0);
    input
}

#[test]
fn aliased_input_assembles_a_working_panel() {
    let panel = labeled_input().into_panel().unwrap();
    let assessment = bioage_assessment(&panel).unwrap();
    assert_eq!(assessment.chronological_age, 46.0);
    assert!(assessment.phenotypic_age.is_finite());
    assert_eq!(assessment.reference_values.p50, 46.0);
    // A healthy panel reads younger than its years.
    assert!(assessment.age_difference < 0.0);
    assert!(assessment.percentile > 50.0);
    assert!(assessment.age_difference_text.contains("YOUNGER"));
}

#[test]
fn incomplete_input_reports_every_gap_with_units() {
    let mut input = BiomarkerInput::new();
    input.set(Biomarker::Albumin, 4.2);
    input.set(Biomarker::ChronologicalAge, 40.0);
    let err = input.into_panel().unwrap_err();
    let msg = err.to_string();
    for fragment in [
        "creatinine (mg/dL)",
        "glucose (mg/dL)",
        "crp (mg/L)",
        "lymphocyte (%)",
        "mcv (fL)",
        "rdw (%)",
        "alkaline_phosphatase (U/L)",
        "wbc (10^3 cells/µL)",
    ] {
        assert!(msg.contains(fragment), "{msg}");
    }
    assert!(!msg.contains("albumin"), "{msg}");
    assert!(matches!(err, PhenoAgeError::MissingBiomarkers { .. }));
}

#[test]
fn simulation_report_tracks_percentiles_and_changes() {
    let panel = labeled_input().into_panel().unwrap();
    let report = simulate_with_percentiles(
        &panel,
        &["Regular Exercise", "Stop Creatine Supplementation"],
    )
    .unwrap();
    assert!(report.new_percentile >= report.original_percentile);
    assert_eq!(
        report.percentile_change,
        report.new_percentile - report.original_percentile
    );
    assert!(report
        .biomarker_changes
        .iter()
        .any(|c| c.biomarker == Biomarker::Creatinine));
    assert_eq!(
        report.simulation.applied_interventions,
        vec![
            "Regular Exercise".to_string(),
            "Stop Creatine Supplementation".to_string()
        ]
    );
}

#[test]
fn batch_processing_annotates_rows_independently() {
    let mut good = Record::new();
    good.insert("id".to_string(), json!("A"));
    for (label, value) in [
        ("albumin", 4.2),
        ("creatinine", 0.9),
        ("glucose", 85.0),
        ("crp", 0.5),
        ("lymphocyte", 32.0),
        ("mcv", 88.0),
        ("rdw", 12.9),
        ("alkaline_phosphatase", 62.0),
        ("wbc", 5.2),
        ("chronological_age", 40.0),
    ] {
        good.insert(label.to_string(), json!(value));
    }
    let mut bad = good.clone();
    bad.remove("glucose");
    bad.insert("id".to_string(), json!("B"));

    let options = BatchOptions {
        rank: true,
        apply: vec!["Regular Exercise".to_string()],
    };
    let out = process_records(&[good, bad], &options);

    assert_eq!(out[0].get("id"), Some(&json!("A")));
    assert!(out[0].contains_key("phenoage_pheno_age"));
    assert!(out[0].contains_key("rank1_intervention"));
    assert!(out[0].contains_key("combined_pheno_age"));
    assert!(out[0].get("error").is_none());

    assert_eq!(out[1].get("id"), Some(&json!("B")));
    let error = out[1].get("error").and_then(Value::as_str).unwrap();
    assert!(error.contains("glucose (mg/dL)"), "{error}");
    assert!(!out[1].contains_key("rank1_intervention"));
}
