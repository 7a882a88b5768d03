/// Status mapper
///
/// Maps the service's moisture label onto everything the UI derives from
/// it: the recommended action, the alert icon, severity, tone and care tip.
/// Every lookup is a total `match` over [`MoistureCategory`], so adding a
/// category forces every mapping to be updated together.

/// Closed set of moisture categories, plus a bucket for anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoistureCategory {
    Dry,
    SlightlyMoist,
    Moist,
    Wet,
    Unrecognized,
}

/// Icon shown next to an action or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Droplet,
    Sun,
    CloudRain,
    Alert,
    AlertCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Default,
    Destructive,
}

/// Accent color family for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Red,
    Yellow,
    Green,
    Blue,
    Neutral,
}

/// What the user should do, derived from the category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAction {
    pub kind: IconKind,
    pub text: &'static str,
    pub severity: Severity,
}

const DRY_TIP: &str = "Water thoroughly until water drains from the bottom of the pot, \
                       then allow soil to dry slightly before watering again.";

impl MoistureCategory {
    /// Case-insensitive; unknown labels map to `Unrecognized`
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "dry" => Self::Dry,
            "slightly moist" => Self::SlightlyMoist,
            "moist" => Self::Moist,
            "wet" => Self::Wet,
            _ => Self::Unrecognized,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::SlightlyMoist => "Slightly Moist",
            Self::Moist => "Moist",
            Self::Wet => "Wet",
            Self::Unrecognized => "Unknown",
        }
    }

    pub const fn action(self) -> DisplayAction {
        match self {
            Self::Dry => DisplayAction {
                kind: IconKind::Droplet,
                text: "Water immediately",
                severity: Severity::Destructive,
            },
            Self::SlightlyMoist => DisplayAction {
                kind: IconKind::Droplet,
                text: "Water soon",
                severity: Severity::Default,
            },
            Self::Moist => DisplayAction {
                kind: IconKind::Sun,
                text: "No action needed",
                severity: Severity::Default,
            },
            Self::Wet => DisplayAction {
                kind: IconKind::Sun,
                text: "Allow to dry",
                severity: Severity::Default,
            },
            Self::Unrecognized => DisplayAction {
                kind: IconKind::Alert,
                text: "Check plant",
                severity: Severity::Default,
            },
        }
    }

    pub const fn recommendation_icon(self) -> IconKind {
        match self {
            Self::Dry => IconKind::AlertCircle,
            Self::SlightlyMoist => IconKind::Droplet,
            Self::Moist => IconKind::Sun,
            Self::Wet => IconKind::CloudRain,
            Self::Unrecognized => IconKind::AlertCircle,
        }
    }

    /// Severity of the recommendation alert; always agrees with the action
    pub const fn alert_severity(self) -> Severity {
        self.action().severity
    }

    pub const fn tone(self) -> StatusTone {
        match self {
            Self::Dry => StatusTone::Red,
            Self::SlightlyMoist => StatusTone::Yellow,
            Self::Moist => StatusTone::Green,
            Self::Wet => StatusTone::Blue,
            Self::Unrecognized => StatusTone::Neutral,
        }
    }

    pub const fn care_tip(self) -> Option<&'static str> {
        match self {
            Self::Dry => Some(DRY_TIP),
            _ => None,
        }
    }
}

/// Action for a raw status label
pub fn moisture_action(status: &str) -> DisplayAction {
    MoistureCategory::parse(status).action()
}

/// Recommendation icon for a raw status label
pub fn recommendation_icon(status: &str) -> IconKind {
    MoistureCategory::parse(status).recommendation_icon()
}

impl IconKind {
    /// Text glyph used when rendering the icon
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Droplet => "💧",
            Self::Sun => "☀",
            Self::CloudRain => "🌧",
            Self::Alert => "⚠",
            Self::AlertCircle => "❗",
        }
    }
}
