/// State management module
/// 
/// This module handles all application state, including:
/// - The selected image and its preview (data.rs)
/// - The analysis envelope and result model (analysis.rs)
/// - The upload -> analyze -> display state machine (controller.rs)
/// - Notification banners (notification.rs)

pub mod analysis;
pub mod controller;
pub mod data;
pub mod notification;
