//! Biomarker adjustment rules, one per catalog intervention.
//!
//! Each rule is a pure transform over a complete panel: it reads the markers
//! it targets, applies a piecewise adjustment, clamps to a floor or range,
//! and leaves everything else untouched. Rules never fail; out-of-range
//! inputs are clamped silently. The thresholds and magnitudes below are the
//! product's behavioral contract and must be preserved verbatim.

use crate::biomarkers::BiomarkerPanel;

const CRP_FLOOR: f64 = 0.01;
const GLUCOSE_FLOOR: f64 = 70.0;
const CREATININE_FLOOR: f64 = 0.6;
const ALP_FLOOR: f64 = 50.0;
const WBC_FLOOR: f64 = 4.0;
const ALBUMIN_CEILING: f64 = 5.0;
const LYMPH_MIN: f64 = 5.0;
const LYMPH_MAX: f64 = 60.0;

fn bump_lymph(panel: &mut BiomarkerPanel, below: f64, by: f64) {
    if panel.lymphocyte < below {
        panel.lymphocyte = (panel.lymphocyte + by).clamp(LYMPH_MIN, LYMPH_MAX);
    }
}

/// Regular Exercise: large CRP drop when inflamed, glucose drop scaled to
/// baseline, trims elevated WBC, lifts low lymphocyte%.
pub(super) fn regular_exercise(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.crp = if p.crp >= 3.0 {
        (p.crp - 3.0).max(CRP_FLOOR)
    } else if p.crp >= 1.0 {
        (p.crp - 1.0).max(CRP_FLOOR)
    } else {
        (p.crp - 0.2).max(CRP_FLOOR)
    };
    p.glucose = if p.glucose >= 130.0 {
        (p.glucose - 15.0).max(GLUCOSE_FLOOR)
    } else if p.glucose >= 100.0 {
        (p.glucose - 7.0).max(GLUCOSE_FLOOR)
    } else {
        (p.glucose - 3.0).max(GLUCOSE_FLOOR)
    };
    if p.wbc >= 8.0 {
        p.wbc = (p.wbc - 1.0).max(WBC_FLOOR);
    }
    bump_lymph(&mut p, 30.0, 5.0);
    p
}

/// Weight Loss: ~10% body weight off translates to a 30-40% CRP drop at
/// higher baselines, plus glucose and WBC reductions.
pub(super) fn weight_loss(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.crp = if p.crp >= 5.0 {
        (p.crp - 2.0).max(CRP_FLOOR)
    } else if p.crp >= 2.0 {
        (p.crp - 1.0).max(CRP_FLOOR)
    } else {
        (p.crp - 0.2).max(CRP_FLOOR)
    };
    p.glucose = if p.glucose >= 130.0 {
        (p.glucose - 20.0).max(GLUCOSE_FLOOR)
    } else if p.glucose >= 100.0 {
        (p.glucose - 10.0).max(GLUCOSE_FLOOR)
    } else {
        (p.glucose - 3.0).max(GLUCOSE_FLOOR)
    };
    if p.wbc > 7.5 {
        p.wbc = (p.wbc - 1.0).max(WBC_FLOOR);
    }
    p
}

/// Low-allergen / anti-inflammatory diet: CRP only.
pub(super) fn low_allergen_diet(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.crp = if p.crp >= 3.0 {
        (p.crp - 1.0).max(CRP_FLOOR)
    } else if p.crp >= 1.0 {
        (p.crp - 0.5).max(CRP_FLOOR)
    } else {
        (p.crp - 0.2).max(CRP_FLOOR)
    };
    p
}

/// Curcumin: strong CRP reduction at high baselines.
pub(super) fn curcumin(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.crp = if p.crp >= 3.0 {
        (p.crp - 3.7).max(CRP_FLOOR)
    } else if p.crp >= 1.0 {
        (p.crp - 1.0).max(CRP_FLOOR)
    } else {
        (p.crp - 0.2).max(CRP_FLOOR)
    };
    p
}

/// Omega-3: CRP down, elevated WBC trimmed, low albumin and lymphocyte%
/// nudged up.
pub(super) fn omega3(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.crp = if p.crp >= 5.0 {
        (p.crp - 3.0).max(CRP_FLOOR)
    } else if p.crp >= 1.0 {
        (p.crp - 1.0).max(CRP_FLOOR)
    } else {
        (p.crp - 0.3).max(CRP_FLOOR)
    };
    if p.wbc >= 8.0 {
        p.wbc = (p.wbc - 0.8).max(WBC_FLOOR);
    }
    if p.albumin < 4.0 {
        p.albumin = (p.albumin + 0.2).min(ALBUMIN_CEILING);
    }
    bump_lymph(&mut p, 30.0, 3.0);
    p
}

/// Taurine: modest CRP reduction.
pub(super) fn taurine(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.crp = if p.crp >= 3.0 {
        (p.crp - 1.0).max(CRP_FLOOR)
    } else if p.crp >= 1.0 {
        (p.crp - 0.4).max(CRP_FLOOR)
    } else {
        (p.crp - 0.1).max(CRP_FLOOR)
    };
    p
}

/// High protein intake: raises low albumin.
pub(super) fn high_protein_intake(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.albumin < 4.0 {
        p.albumin = (p.albumin + 0.3).min(ALBUMIN_CEILING);
    }
    p
}

/// Well-balanced diet: low albumin up, MCV nudged toward the normal range
/// from either side, small CRP improvement.
pub(super) fn balanced_diet(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.albumin < 4.0 {
        p.albumin = (p.albumin + 0.5).min(ALBUMIN_CEILING);
    }
    if p.mcv < 80.0 {
        p.mcv = (p.mcv + 5.0).min(80.0);
    } else if p.mcv > 100.0 {
        p.mcv = (p.mcv - 5.0).max(100.0);
    }
    p.crp = (p.crp - 0.3).max(CRP_FLOOR);
    p
}

/// Reduce alcohol: albumin rebound when low, ALP drop when elevated.
pub(super) fn reduce_alcohol(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.albumin < 4.0 {
        p.albumin = (p.albumin + 0.5).min(ALBUMIN_CEILING);
    }
    if p.alkaline_phosphatase > 120.0 {
        p.alkaline_phosphatase = (p.alkaline_phosphatase - 40.0).max(ALP_FLOOR);
    } else if p.alkaline_phosphatase > 100.0 {
        p.alkaline_phosphatase = (p.alkaline_phosphatase - 20.0).max(ALP_FLOOR);
    }
    p
}

/// Stop creatine supplementation: unconditional creatinine drop.
pub(super) fn stop_creatine(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.creatinine = (p.creatinine - 0.25).max(CREATININE_FLOOR);
    p
}

/// Reduce red meat intake: creatinine drop scaled to baseline.
pub(super) fn reduce_red_meat(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.creatinine = if p.creatinine >= 1.2 {
        (p.creatinine - 0.3).max(CREATININE_FLOOR)
    } else {
        (p.creatinine - 0.1).max(CREATININE_FLOOR)
    };
    p
}

/// Reduce sodium: small creatinine improvement.
pub(super) fn reduce_sodium(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.creatinine = if p.creatinine >= 1.2 {
        (p.creatinine - 0.2).max(CREATININE_FLOOR)
    } else {
        (p.creatinine - 0.1).max(CREATININE_FLOOR)
    };
    p
}

/// Avoid NSAIDs: unconditional creatinine drop.
pub(super) fn avoid_nsaids(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.creatinine = (p.creatinine - 0.2).max(CREATININE_FLOOR);
    p
}

/// Avoid very heavy exercise before testing: ~15% ALP drop when elevated,
/// small absolute drop otherwise.
pub(super) fn avoid_heavy_exercise(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.alkaline_phosphatase = if p.alkaline_phosphatase > 100.0 {
        (p.alkaline_phosphatase * 0.85).max(ALP_FLOOR)
    } else {
        (p.alkaline_phosphatase - 5.0).max(30.0)
    };
    p
}

/// Milk thistle: ALP reduction when elevated, no-op otherwise.
pub(super) fn milk_thistle(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.alkaline_phosphatase >= 130.0 {
        p.alkaline_phosphatase = (p.alkaline_phosphatase - 30.0).max(ALP_FLOOR);
    } else if p.alkaline_phosphatase >= 100.0 {
        p.alkaline_phosphatase = (p.alkaline_phosphatase - 20.0).max(ALP_FLOOR);
    }
    p
}

/// NAC: percentage ALP reduction when elevated, no-op otherwise.
pub(super) fn nac(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.alkaline_phosphatase >= 120.0 {
        p.alkaline_phosphatase = (p.alkaline_phosphatase * 0.85).max(ALP_FLOOR);
    } else if p.alkaline_phosphatase >= 100.0 {
        p.alkaline_phosphatase = (p.alkaline_phosphatase * 0.90).max(ALP_FLOOR);
    }
    p
}

/// Carb & fat restriction: glucose drop scaled to baseline.
pub(super) fn carb_fat_restriction(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.glucose = if p.glucose >= 130.0 {
        (p.glucose - 15.0).max(GLUCOSE_FLOOR)
    } else if p.glucose >= 100.0 {
        (p.glucose - 10.0).max(GLUCOSE_FLOOR)
    } else {
        (p.glucose - 3.0).max(GLUCOSE_FLOOR)
    };
    p
}

/// Walking after meals: small fasting glucose effect.
pub(super) fn postmeal_walk(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.glucose = if p.glucose > 100.0 {
        (p.glucose - 5.0).max(GLUCOSE_FLOOR)
    } else {
        (p.glucose - 2.0).max(GLUCOSE_FLOOR)
    };
    p
}

/// Sauna: mild glucose drop, short-term lift of low WBC and lymphocyte%.
pub(super) fn sauna(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.glucose = (p.glucose - 4.0).max(GLUCOSE_FLOOR);
    if p.wbc < 4.0 {
        p.wbc += 0.5;
    }
    bump_lymph(&mut p, 30.0, 5.0);
    p
}

/// Berberine: glucose reduction scaled to baseline.
pub(super) fn berberine(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    p.glucose = if p.glucose >= 130.0 {
        (p.glucose - 15.0).max(GLUCOSE_FLOOR)
    } else if p.glucose >= 100.0 {
        (p.glucose - 10.0).max(GLUCOSE_FLOOR)
    } else {
        (p.glucose - 3.0).max(GLUCOSE_FLOOR)
    };
    p
}

/// Vitamin B1: glucose reduction only when borderline or high.
pub(super) fn vitamin_b1(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.glucose >= 130.0 {
        p.glucose = (p.glucose - 10.0).max(GLUCOSE_FLOOR);
    } else if p.glucose >= 100.0 {
        p.glucose = (p.glucose - 5.0).max(GLUCOSE_FLOOR);
    }
    p
}

/// Olive oil: slight lymphocyte% lift when below 35.
pub(super) fn olive_oil(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    bump_lymph(&mut p, 35.0, 3.0);
    p
}

/// Mushrooms: lymphocyte% lift when low, WBC lift when low.
pub(super) fn mushrooms(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    bump_lymph(&mut p, 35.0, 7.0);
    if p.wbc < 4.0 {
        p.wbc += 0.8;
    }
    p
}

/// Zinc: lifts low WBC and lymphocyte%.
pub(super) fn zinc(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.wbc < 4.0 {
        p.wbc += 0.5;
    }
    bump_lymph(&mut p, 30.0, 5.0);
    p
}

/// B-complex: normalizes elevated RDW, drops macrocytic MCV.
pub(super) fn b_complex(panel: &BiomarkerPanel) -> BiomarkerPanel {
    let mut p = *panel;
    if p.rdw >= 18.0 {
        p.rdw = 14.0;
    } else if p.rdw >= 15.0 {
        p.rdw = 13.5;
    }
    if p.mcv >= 100.0 {
        p.mcv = (p.mcv - 10.0).max(80.0);
    }
    p
}
