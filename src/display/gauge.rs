/// Moisture gauge model
///
/// Display-only derivation from the score and category: the progress bar
/// percentage and the row of droplet glyphs.

use super::status::MoistureCategory;

/// Top of the service's score scale
pub const SCORE_MAX: f64 = 10.0;

/// Labels spread under the gauge, left to right
pub const SCALE_LABELS: [&str; 5] = ["Dry", "Low", "Moderate", "Good", "Wet"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropletIntensity {
    Small,
    Medium,
    Large,
}

impl DropletIntensity {
    /// Glyph size in pixels
    pub const fn size(self) -> u16 {
        match self {
            Self::Small => 16,
            Self::Medium => 24,
            Self::Large => 32,
        }
    }

    /// Medium and large droplets render filled, small ones faded
    pub const fn is_filled(self) -> bool {
        self.size() > 20
    }
}

/// Score clamped to 0-10, then scaled to 0-100. NaN reads as empty.
pub fn display_percentage(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, SCORE_MAX) / SCORE_MAX * 100.0
}

pub fn droplet_intensities(category: MoistureCategory) -> [DropletIntensity; 5] {
    use DropletIntensity::{Large as L, Medium as M, Small as S};
    match category {
        MoistureCategory::Dry => [S, S, S, S, S],
        MoistureCategory::SlightlyMoist => [S, S, S, M, M],
        MoistureCategory::Moist => [S, M, M, M, L],
        MoistureCategory::Wet => [M, M, L, L, L],
        MoistureCategory::Unrecognized => [S, S, M, M, L],
    }
}

/// Everything the gauge panel renders
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeModel {
    pub category: MoistureCategory,
    /// Canonical label for known categories, the service's text otherwise
    pub status_label: String,
    pub percentage: f64,
    /// e.g. `5.5/10`; shows the raw score, not the clamped one
    pub score_label: String,
    pub droplets: [DropletIntensity; 5],
}

impl GaugeModel {
    pub fn new(score: f64, status: &str) -> Self {
        let category = MoistureCategory::parse(status);
        let status_label = match category {
            MoistureCategory::Unrecognized => status.trim().to_string(),
            known => known.label().to_string(),
        };
        Self {
            category,
            status_label,
            percentage: display_percentage(score),
            score_label: format!("{:.1}/10", score),
            droplets: droplet_intensities(category),
        }
    }
}
