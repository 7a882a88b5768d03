/// Presentation models
///
/// Pure derivations from an analysis result to what the UI shows. Nothing
/// here touches iced, so every mapping is testable on its own:
/// - Category -> action, icon, severity, tone (status.rs)
/// - Score -> gauge percentage and droplet row (gauge.rs)
/// - Metrics -> detail tabs with "not available" fallbacks (details.rs)

pub mod details;
pub mod gauge;
pub mod status;
