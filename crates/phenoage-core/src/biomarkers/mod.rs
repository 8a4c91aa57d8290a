//! Biomarker data model: canonical keys, free-text label normalization, and
//! the complete ten-marker panel the clock operates on.

mod alias;
mod input;
mod panel;

pub use alias::normalize_label;
pub use input::BiomarkerInput;
pub use panel::{Biomarker, BiomarkerPanel};
