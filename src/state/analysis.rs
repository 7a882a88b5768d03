/// Analysis result model
///
/// The JSON envelope returned by the analysis service, and the validated
/// result the rest of the application renders. Parsing is strict about the
/// four required fields and lenient about the nested metrics: a whole block,
/// or any single metric inside one, may be missing.

use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::error::AnalysisError;

/// Raw response envelope, exactly as the service sends it
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEnvelope {
    pub success: bool,
    pub classified_soil_moisture: Option<String>,
    pub recommendation: Option<String>,
    /// Older service builds call this `soilMoistureScore`
    #[serde(alias = "soilMoistureScore")]
    pub moisture_score: Option<f64>,
    pub timestamp: Option<f64>,
    pub error: Option<String>,
    pub details: Option<AnalysisDetails>,
}

/// Nested metrics; each block may be absent on its own
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AnalysisDetails {
    #[serde(default)]
    pub color: Option<ColorMetrics>,
    #[serde(default)]
    pub texture: Option<TextureMetrics>,
}

/// Color metrics; any single metric may be missing
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorMetrics {
    pub average_brightness: Option<f64>,
    pub brightness_std_dev: Option<f64>,
    pub average_saturation: Option<f64>,
    pub color_channels: Option<ColorChannels>,
    pub blue_to_red_ratio: Option<f64>,
    pub average_lightness: Option<f64>,
    pub brown_color_ratio: Option<f64>,
    pub highlight_ratio: Option<f64>,
    #[serde(alias = "hueSTD")]
    pub hue_std: Option<f64>,
}

/// Mean value per RGB channel (0-255)
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ColorChannels {
    pub red: Option<f64>,
    pub green: Option<f64>,
    pub blue: Option<f64>,
}

/// Texture metrics; any single metric may be missing
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TextureMetrics {
    pub edge_density: Option<f64>,
    pub granularity: Option<f64>,
    pub crack_density: Option<f64>,
    pub reflectance_variation: Option<f64>,
    pub water_detected: Option<bool>,
    pub water_area_ratio: Option<f64>,
    pub is_dark_soil: Option<bool>,
    pub is_light_soil: Option<bool>,
    pub local_contrast: Option<f64>,
}

/// A completed, validated analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Category label as sent by the service (e.g. "Slightly Moist")
    pub classified_soil_moisture: String,
    /// 0-10, not clamped here; the gauge clamps for display
    pub moisture_score: f64,
    pub recommendation: String,
    /// Unix seconds
    pub timestamp: Option<f64>,
    pub details: Option<AnalysisDetails>,
}

impl AnalysisEnvelope {
    /// Parse an envelope from a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, AnalysisError> {
        serde_json::from_slice(body).map_err(|e| AnalysisError::Malformed(e.to_string()))
    }

    /// Validate the envelope into a result.
    ///
    /// `success: false` wins over everything else; a successful envelope
    /// missing any required field is malformed.
    pub fn into_result(self) -> Result<AnalysisResult, AnalysisError> {
        if !self.success {
            return Err(AnalysisError::application(self.error));
        }

        let classified_soil_moisture = self
            .classified_soil_moisture
            .ok_or_else(|| missing("classifiedSoilMoisture"))?;
        let recommendation = self.recommendation.ok_or_else(|| missing("recommendation"))?;
        let moisture_score = self.moisture_score.ok_or_else(|| missing("moistureScore"))?;

        if !moisture_score.is_finite() {
            return Err(AnalysisError::Malformed(format!(
                "moistureScore is not a finite number: {}",
                moisture_score
            )));
        }

        Ok(AnalysisResult {
            classified_soil_moisture,
            moisture_score,
            recommendation,
            timestamp: self.timestamp,
            details: self.details,
        })
    }
}

fn missing(field: &str) -> AnalysisError {
    AnalysisError::Malformed(format!("missing field `{}`", field))
}

impl AnalysisResult {
    pub fn color(&self) -> Option<&ColorMetrics> {
        self.details.as_ref().and_then(|d| d.color.as_ref())
    }

    pub fn texture(&self) -> Option<&TextureMetrics> {
        self.details.as_ref().and_then(|d| d.texture.as_ref())
    }

    /// Service timestamp converted to local time, if present and in range
    pub fn analyzed_at(&self) -> Option<DateTime<Local>> {
        let ts = self.timestamp?;
        if !ts.is_finite() {
            return None;
        }
        let floor = ts.floor();
        let secs = floor as i64;
        let nanos = (((ts - floor) * 1e9) as u32).min(999_999_999);
        DateTime::from_timestamp(secs, nanos).map(|utc| utc.with_timezone(&Local))
    }
}
