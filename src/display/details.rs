/// Detail view model: the Overview / Color / Texture tabs.
///
/// A section whose metrics block is missing renders as
/// [`SectionView::NotAvailable`] instead of failing.

use crate::state::analysis::{AnalysisResult, ColorMetrics, TextureMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    Color,
    Texture,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Overview, DetailTab::Color, DetailTab::Texture];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Color => "Color",
            Self::Texture => "Texture",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    Available(Vec<Metric>),
    NotAvailable,
}

pub fn section(result: &AnalysisResult, tab: DetailTab) -> SectionView {
    match tab {
        DetailTab::Overview => overview(result.color(), result.texture()),
        DetailTab::Color => result.color().map_or(SectionView::NotAvailable, color),
        DetailTab::Texture => result.texture().map_or(SectionView::NotAvailable, texture),
    }
}

/// Shown in place of a single metric the service left out
pub const NOT_AVAILABLE: &str = "Not available";

fn overview(color: Option<&ColorMetrics>, texture: Option<&TextureMetrics>) -> SectionView {
    let mut metrics = Vec::new();
    if let Some(t) = texture {
        metrics.push(metric("Soil Type", soil_tone(t)));
        metrics.push(metric("Water Detected", show(t.water_detected, yes_no)));
        metrics.push(metric("Water Area Ratio", show(t.water_area_ratio, |v| percent(v, 1))));
    }
    if let Some(c) = color {
        metrics.push(metric("Brown Color Ratio", show(c.brown_color_ratio, |v| percent(v, 1))));
    }
    if metrics.is_empty() {
        SectionView::NotAvailable
    } else {
        SectionView::Available(metrics)
    }
}

fn color(c: &ColorMetrics) -> SectionView {
    let channels = c.color_channels.unwrap_or_default();
    let mut metrics = vec![
        metric("Average Red", show(channels.red, |v| fixed(v, 1))),
        metric("Average Green", show(channels.green, |v| fixed(v, 1))),
        metric("Average Blue", show(channels.blue, |v| fixed(v, 1))),
        metric("Blue-to-Red Ratio", show(c.blue_to_red_ratio, |v| fixed(v, 2))),
        metric("Avg. Saturation", show(c.average_saturation, |v| fixed(v, 1))),
        metric("Avg. Brightness", show(c.average_brightness, |v| fixed(v, 1))),
        metric("Brightness Std. Dev.", show(c.brightness_std_dev, |v| fixed(v, 2))),
        metric("Avg. Lightness", show(c.average_lightness, |v| fixed(v, 1))),
        metric("Highlight Ratio", show(c.highlight_ratio, |v| percent(v, 2))),
    ];
    // Only newer service builds report hue spread
    if let Some(hue_std) = c.hue_std {
        metrics.push(metric("Hue Std. Dev.", fixed(hue_std, 2)));
    }
    SectionView::Available(metrics)
}

fn texture(t: &TextureMetrics) -> SectionView {
    let mut metrics = vec![
        metric("Edge Density", show(t.edge_density, |v| fixed(v, 4))),
        metric("Granularity", show(t.granularity, |v| fixed(v, 2))),
    ];
    if let Some(local_contrast) = t.local_contrast {
        metrics.push(metric("Local Contrast", fixed(local_contrast, 2)));
    }
    metrics.extend([
        metric("Crack Density", show(t.crack_density, |v| fixed(v, 4))),
        metric("Reflectance Variation", show(t.reflectance_variation, |v| fixed(v, 4))),
        metric("Water Area Ratio", show(t.water_area_ratio, |v| percent(v, 1))),
    ]);
    SectionView::Available(metrics)
}

fn metric(label: &'static str, value: impl Into<String>) -> Metric {
    Metric {
        label,
        value: value.into(),
    }
}

fn show<T, S: Into<String>>(value: Option<T>, format: impl FnOnce(T) -> S) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format(v).into())
}

fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

fn percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Dark or light only; `isLightSoil` is a fallback for when `isDarkSoil` is missing
fn soil_tone(t: &TextureMetrics) -> &'static str {
    match (t.is_dark_soil, t.is_light_soil) {
        (Some(true), _) => "Dark Soil",
        (Some(false), _) | (None, Some(true)) => "Light Soil",
        (None, _) => NOT_AVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::analysis::{AnalysisDetails, ColorChannels};

    fn result(details: Option<AnalysisDetails>) -> AnalysisResult {
        AnalysisResult {
            classified_soil_moisture: "Moist".into(),
            moisture_score: 6.0,
            recommendation: "Fine".into(),
            timestamp: None,
            details,
        }
    }

    fn texture_metrics() -> TextureMetrics {
        TextureMetrics {
            edge_density: Some(0.1153),
            granularity: Some(22.49),
            crack_density: Some(0.6081),
            reflectance_variation: Some(0.4995),
            water_detected: Some(false),
            water_area_ratio: Some(0.0206),
            is_dark_soil: Some(true),
            is_light_soil: Some(false),
            local_contrast: None,
        }
    }

    fn color_metrics() -> ColorMetrics {
        ColorMetrics {
            average_brightness: Some(73.51),
            brightness_std_dev: Some(36.72),
            average_saturation: Some(50.71),
            color_channels: Some(ColorChannels {
                red: Some(73.5),
                green: Some(67.85),
                blue: Some(61.14),
            }),
            blue_to_red_ratio: Some(0.83),
            average_lightness: Some(72.85),
            brown_color_ratio: Some(0.9708),
            highlight_ratio: Some(0.0163),
            hue_std: None,
        }
    }

    #[test]
    fn test_missing_details_not_available() {
        let r = result(None);
        for tab in DetailTab::ALL {
            assert_eq!(section(&r, tab), SectionView::NotAvailable, "{:?}", tab);
        }
    }

    #[test]
    fn test_partial_details() {
        let r = result(Some(AnalysisDetails {
            color: None,
            texture: Some(texture_metrics()),
        }));
        assert_eq!(section(&r, DetailTab::Color), SectionView::NotAvailable);
        assert!(matches!(section(&r, DetailTab::Texture), SectionView::Available(_)));

        let SectionView::Available(overview) = section(&r, DetailTab::Overview) else {
            panic!("overview should be available");
        };
        assert_eq!(overview[0].value, "Dark Soil");
        assert_eq!(overview[2].value, "2.1%");
    }

    #[test]
    fn test_full_details_formatting() {
        let r = result(Some(AnalysisDetails {
            color: Some(color_metrics()),
            texture: Some(texture_metrics()),
        }));

        let SectionView::Available(color) = section(&r, DetailTab::Color) else {
            panic!("color should be available");
        };
        assert_eq!(color[0], metric("Average Red", "73.5"));
        assert_eq!(color[3], metric("Blue-to-Red Ratio", "0.83"));
        assert_eq!(color[8], metric("Highlight Ratio", "1.63%"));

        let SectionView::Available(texture) = section(&r, DetailTab::Texture) else {
            panic!("texture should be available");
        };
        assert_eq!(texture[0], metric("Edge Density", "0.1153"));
        assert!(texture.iter().all(|m| m.label != "Local Contrast"));

        let SectionView::Available(overview) = section(&r, DetailTab::Overview) else {
            panic!("overview should be available");
        };
        assert_eq!(overview.last().unwrap(), &metric("Brown Color Ratio", "97.1%"));
    }

    #[test]
    fn test_missing_metric_shows_not_available() {
        let r = result(Some(AnalysisDetails {
            color: Some(ColorMetrics {
                highlight_ratio: None,
                color_channels: None,
                ..color_metrics()
            }),
            texture: Some(TextureMetrics {
                is_dark_soil: None,
                water_area_ratio: None,
                ..texture_metrics()
            }),
        }));

        let SectionView::Available(color) = section(&r, DetailTab::Color) else {
            panic!("color should be available");
        };
        assert_eq!(color[0], metric("Average Red", NOT_AVAILABLE));
        assert_eq!(color[1], metric("Average Green", NOT_AVAILABLE));
        assert_eq!(color[5], metric("Avg. Brightness", "73.5"));
        assert_eq!(color[8], metric("Highlight Ratio", NOT_AVAILABLE));

        let SectionView::Available(overview) = section(&r, DetailTab::Overview) else {
            panic!("overview should be available");
        };
        // Falls back to isLightSoil, which is false here
        assert_eq!(overview[0], metric("Soil Type", NOT_AVAILABLE));
        assert_eq!(overview[1], metric("Water Detected", "No"));
        assert_eq!(overview[2], metric("Water Area Ratio", NOT_AVAILABLE));
    }

    #[test]
    fn test_soil_tone_is_dark_or_light() {
        let tone = |dark, light| {
            soil_tone(&TextureMetrics {
                is_dark_soil: dark,
                is_light_soil: light,
                ..TextureMetrics::default()
            })
        };
        assert_eq!(tone(Some(true), Some(true)), "Dark Soil");
        assert_eq!(tone(Some(false), Some(false)), "Light Soil");
        assert_eq!(tone(None, Some(true)), "Light Soil");
        assert_eq!(tone(None, None), NOT_AVAILABLE);
    }
}
