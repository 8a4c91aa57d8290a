//! The intervention catalog: 25 named rules in a fixed order.
//!
//! Catalog order defines default display order; ranking order is computed by
//! the engine. Display names are external identifiers and are preserved
//! verbatim, dosage suffixes included.

use serde::{Deserialize, Serialize};

use super::rules;
use crate::biomarkers::BiomarkerPanel;

/// A catalog intervention. Each variant is a pure, clamping transform over a
/// biomarker panel; applying one never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    RegularExercise,
    WeightLoss,
    LowAllergenDiet,
    Curcumin,
    Omega3,
    Taurine,
    HighProteinIntake,
    BalancedDiet,
    ReduceAlcohol,
    StopCreatine,
    ReduceRedMeat,
    ReduceSodium,
    AvoidNsaids,
    AvoidHeavyExercise,
    MilkThistle,
    Nac,
    CarbFatRestriction,
    PostmealWalk,
    Sauna,
    Berberine,
    VitaminB1,
    OliveOil,
    Mushrooms,
    Zinc,
    BComplex,
}

impl Intervention {
    /// The full catalog, in fixed order.
    pub const ALL: [Intervention; 25] = [
        Intervention::RegularExercise,
        Intervention::WeightLoss,
        Intervention::LowAllergenDiet,
        Intervention::Curcumin,
        Intervention::Omega3,
        Intervention::Taurine,
        Intervention::HighProteinIntake,
        Intervention::BalancedDiet,
        Intervention::ReduceAlcohol,
        Intervention::StopCreatine,
        Intervention::ReduceRedMeat,
        Intervention::ReduceSodium,
        Intervention::AvoidNsaids,
        Intervention::AvoidHeavyExercise,
        Intervention::MilkThistle,
        Intervention::Nac,
        Intervention::CarbFatRestriction,
        Intervention::PostmealWalk,
        Intervention::Sauna,
        Intervention::Berberine,
        Intervention::VitaminB1,
        Intervention::OliveOil,
        Intervention::Mushrooms,
        Intervention::Zinc,
        Intervention::BComplex,
    ];

    /// Display name, used as the external identifier in rankings,
    /// simulations, and CLI input.
    pub fn name(self) -> &'static str {
        match self {
            Self::RegularExercise => "Regular Exercise",
            Self::WeightLoss => "Weight Loss",
            Self::LowAllergenDiet => "Low Allergen Diet",
            Self::Curcumin => "Curcumin (500 mg/day)",
            Self::Omega3 => "Omega-3 (1.5–3 g/day)",
            Self::Taurine => "Taurine (3–6 g/day)",
            Self::HighProteinIntake => "High Protein Intake",
            Self::BalancedDiet => "Well-Balanced Diet",
            Self::ReduceAlcohol => "Reduce Alcohol",
            Self::StopCreatine => "Stop Creatine Supplementation",
            Self::ReduceRedMeat => "Reduce Red Meat Intake",
            Self::ReduceSodium => "Reduce Sodium",
            Self::AvoidNsaids => "Avoid NSAIDs",
            Self::AvoidHeavyExercise => "Avoid Very Heavy Exercise",
            Self::MilkThistle => "Milk Thistle (1 g/day)",
            Self::Nac => "NAC (1–2 g/day)",
            Self::CarbFatRestriction => "Carb & Fat Restriction",
            Self::PostmealWalk => "Walking After Meals",
            Self::Sauna => "Sauna",
            Self::Berberine => "Berberine (500–1000 mg/day)",
            Self::VitaminB1 => "Vitamin B1 (100 mg/day)",
            Self::OliveOil => "Olive Oil (Med Diet)",
            Self::Mushrooms => "Mushrooms (Beta-Glucans)",
            Self::Zinc => "Zinc Supplementation",
            Self::BComplex => "B-Complex (B12/Folate)",
        }
    }

    /// Look an intervention up by its exact display name.
    pub fn from_name(name: &str) -> Option<Intervention> {
        Self::ALL.into_iter().find(|iv| iv.name() == name)
    }

    /// Apply this intervention's rule to a panel, returning the adjusted
    /// copy. The input is never modified.
    pub fn apply(self, panel: &BiomarkerPanel) -> BiomarkerPanel {
        match self {
            Self::RegularExercise => rules::regular_exercise(panel),
            Self::WeightLoss => rules::weight_loss(panel),
            Self::LowAllergenDiet => rules::low_allergen_diet(panel),
            Self::Curcumin => rules::curcumin(panel),
            Self::Omega3 => rules::omega3(panel),
            Self::Taurine => rules::taurine(panel),
            Self::HighProteinIntake => rules::high_protein_intake(panel),
            Self::BalancedDiet => rules::balanced_diet(panel),
            Self::ReduceAlcohol => rules::reduce_alcohol(panel),
            Self::StopCreatine => rules::stop_creatine(panel),
            Self::ReduceRedMeat => rules::reduce_red_meat(panel),
            Self::ReduceSodium => rules::reduce_sodium(panel),
            Self::AvoidNsaids => rules::avoid_nsaids(panel),
            Self::AvoidHeavyExercise => rules::avoid_heavy_exercise(panel),
            Self::MilkThistle => rules::milk_thistle(panel),
            Self::Nac => rules::nac(panel),
            Self::CarbFatRestriction => rules::carb_fat_restriction(panel),
            Self::PostmealWalk => rules::postmeal_walk(panel),
            Self::Sauna => rules::sauna(panel),
            Self::Berberine => rules::berberine(panel),
            Self::VitaminB1 => rules::vitamin_b1(panel),
            Self::OliveOil => rules::olive_oil(panel),
            Self::Mushrooms => rules::mushrooms(panel),
            Self::Zinc => rules::zinc(panel),
            Self::BComplex => rules::b_complex(panel),
        }
    }
}

impl std::fmt::Display for Intervention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_25_rules() {
        assert_eq!(Intervention::ALL.len(), 25);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Intervention::ALL.iter().map(|iv| iv.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 25);
    }

    #[test]
    fn test_from_name_round_trip() {
        for iv in Intervention::ALL {
            assert_eq!(Intervention::from_name(iv.name()), Some(iv));
        }
    }

    #[test]
    fn test_from_name_is_exact_match() {
        assert_eq!(Intervention::from_name("regular exercise"), None);
        assert_eq!(Intervention::from_name("Curcumin"), None);
        assert_eq!(
            Intervention::from_name("Curcumin (500 mg/day)"),
            Some(Intervention::Curcumin)
        );
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let panel = BiomarkerPanel {
            albumin: 3.5,
            creatinine: 1.3,
            glucose: 140.0,
            crp: 6.0,
            lymphocyte: 20.0,
            mcv: 104.0,
            rdw: 16.0,
            alkaline_phosphatase: 140.0,
            wbc: 9.0,
            chronological_age: 55.0,
        };
        let before = panel;
        for iv in Intervention::ALL {
            let _ = iv.apply(&panel);
        }
        assert_eq!(panel, before);
    }

    #[test]
    fn test_serde_round_trip() {
        for iv in Intervention::ALL {
            let json = serde_json::to_string(&iv).unwrap();
            let back: Intervention = serde_json::from_str(&json).unwrap();
            assert_eq!(iv, back);
        }
    }
}
