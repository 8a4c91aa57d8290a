//! End-to-end properties of the clock, percentile model, and intervention
//! engine through the public API.

use phenoage_core::{
    compute_phenoage, percentile, rank_interventions, reference_values, simulate_combined,
    BiomarkerPanel, PhenoAgeError, SYNERGY_FACTOR,
};

fn mixed_panel() -> BiomarkerPanel {
    BiomarkerPanel {
        albumin: 4.0,
        creatinine: 1.2,
        glucose: 110.0,
        crp: 2.5,
        lymphocyte: 30.0,
        mcv: 92.0,
        rdw: 14.1,
        alkaline_phosphatase: 110.0,
        wbc: 7.0,
        chronological_age: 55.0,
    }
}

#[test]
fn matching_ages_are_the_median() {
    for age in [20.0, 47.3, 55.0, 90.0] {
        assert!((percentile(age, age) - 50.0).abs() < 1e-9, "age {age}");
    }
}

#[test]
fn reference_values_bracket_the_chronological_age() {
    let refs = reference_values(55.0);
    assert!(refs.p10 > refs.p25);
    assert!(refs.p25 > refs.p50);
    assert_eq!(refs.p50, 55.0);
    assert!(refs.p50 > refs.p75);
    assert!(refs.p75 > refs.p90);
}

#[test]
fn ranking_covers_the_catalog_and_is_sorted() {
    let ranking = rank_interventions(&mixed_panel()).unwrap();
    assert_eq!(ranking.len(), 25);
    let base = ranking[0].base_pheno_age;
    for pair in ranking.windows(2) {
        assert!(pair[0].delta <= pair[1].delta);
    }
    for entry in &ranking {
        assert_eq!(entry.base_pheno_age, base);
    }
}

#[test]
fn single_intervention_simulation_agrees_with_ranking() {
    let panel = mixed_panel();
    let ranking = rank_interventions(&panel).unwrap();
    for entry in ranking.iter().take(3) {
        let sim = simulate_combined(&panel, &[entry.intervention.as_str()]).unwrap();
        assert_eq!(sim.new_pheno_age, entry.new_pheno_age);
        assert_eq!(sim.delta, entry.delta);
        assert!(!sim.synergy_adjusted);
    }
}

#[test]
fn combined_simulation_never_loses_to_the_weaker_component() {
    let panel = mixed_panel();
    let ranking = rank_interventions(&panel).unwrap();
    let names = [
        ranking[0].intervention.as_str(),
        ranking[1].intervention.as_str(),
    ];
    let combined = simulate_combined(&panel, &names).unwrap();
    let weaker = ranking[1].delta;
    assert!(combined.delta <= weaker);
    // The floor guarantees at least the synergy-scaled best case.
    assert!(combined.delta <= SYNERGY_FACTOR * ranking[0].delta + 1e-9);
}

#[test]
fn unknown_intervention_fails_before_any_application() {
    let err = simulate_combined(&mixed_panel(), &["Regular Exercise", "Moon Dust"]).unwrap_err();
    match err {
        PhenoAgeError::UnknownIntervention(name) => assert_eq!(name, "Moon Dust"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn zero_crp_still_produces_a_finite_age() {
    let mut panel = mixed_panel();
    panel.crp = 0.0;
    let result = compute_phenoage(&panel).unwrap();
    assert!(result.pheno_age.is_finite());
}

#[test]
fn recomputation_is_bit_identical() {
    let panel = mixed_panel();
    let a = compute_phenoage(&panel).unwrap();
    let b = compute_phenoage(&panel).unwrap();
    assert_eq!(a.pheno_age.to_bits(), b.pheno_age.to_bits());
}
