/// User-facing notification banners
use chrono::{DateTime, TimeZone};

/// Maximum number of banners kept on screen
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn analysis_complete() -> Self {
        Self::success(
            "Analysis complete!",
            "Soil moisture analysis has been completed successfully.",
        )
    }

    pub fn analysis_failed(reason: &str) -> Self {
        Self::error(
            "Failed to analyze image",
            format!("{}. Please try uploading a different image.", reason.trim_end_matches('.')),
        )
    }

    /// Local acknowledgement for "Schedule Reminder"; nothing is persisted
    pub fn reminder_scheduled<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::success(
            "Watering reminder scheduled!",
            format!(
                "We'll remind you when it's time to water your plant. (Set at {})",
                format_reminder_time(at)
            ),
        )
    }
}

/// Format a time as `hh:mm AM/PM`
pub fn format_reminder_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%I:%M %p").to_string()
}

/// Append a banner, dropping the oldest beyond [`MAX_VISIBLE`]
pub fn push(list: &mut Vec<Notification>, notification: Notification) {
    list.push(notification);
    if list.len() > MAX_VISIBLE {
        let excess = list.len() - MAX_VISIBLE;
        list.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_reminder_time_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap();
        assert_eq!(format_reminder_time(&at), "02:05 PM");

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format_reminder_time(&at), "09:30 AM");
        assert!(Notification::reminder_scheduled(&at).description.contains("09:30 AM"));
    }

    #[test]
    fn test_push_caps_list() {
        let mut list = Vec::new();
        for i in 0..5 {
            push(&mut list, Notification::success(format!("n{}", i), ""));
        }
        assert_eq!(list.len(), MAX_VISIBLE);
        assert_eq!(list[0].title, "n2");
        assert_eq!(list[MAX_VISIBLE - 1].title, "n4");
    }
}
