use iced::widget::{column, container, row, scrollable, text};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod display;
mod error;
mod state;
mod ui;

use api::client::HttpAnalysisService;
use api::AnalysisService;
use config::AnalyzerConfig;
use display::details::DetailTab;
use display::gauge::GaugeModel;
use error::SelectionError;
use state::controller::{run_analysis, Completion, UploadController};
use state::data::{load_selection, ImageSelection, SelectionOrigin};
use state::notification::{self, Notification};

/// Extensions offered by the file picker
const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];

/// Main application state
struct SoilAnalyzer {
    /// Remote analysis backend
    service: Arc<dyn AnalysisService>,
    /// Upload -> analyze -> display state machine
    controller: UploadController,
    /// A file is being dragged over the window
    is_dragging: bool,
    /// Active tab in the detail panel
    detail_tab: DetailTab,
    /// Banners, oldest first
    notifications: Vec<Notification>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Choose image" / "Upload different image"
    PickImage,
    /// A file is hovering over the window
    FileHovered,
    /// Hovered files left the window without dropping
    FilesHoveredLeft,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// Background file read finished
    SelectionLoaded(Result<ImageSelection, SelectionError>),
    /// Remote analysis finished
    AnalysisFinished(Completion),
    SelectTab(DetailTab),
    ScheduleReminder,
    DismissNotification(usize),
}

impl SoilAnalyzer {
    /// Create a new instance of the application
    fn new(service: Arc<dyn AnalysisService>) -> (Self, Task<Message>) {
        (
            SoilAnalyzer {
                service,
                controller: UploadController::new(),
                is_dragging: false,
                detail_tab: DetailTab::default(),
                notifications: Vec::new(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                if self.controller.is_uploading() {
                    return Task::none();
                }

                // Show the native file picker; the filter stands in for `accept="image/*"`
                let file = FileDialog::new()
                    .set_title("Select a photo of your plant's soil")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => Task::perform(
                        load_selection(path, SelectionOrigin::Picker),
                        Message::SelectionLoaded,
                    ),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.is_dragging = true;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.is_dragging = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.is_dragging = false;
                Task::perform(
                    load_selection(path, SelectionOrigin::Drop),
                    Message::SelectionLoaded,
                )
            }
            Message::SelectionLoaded(Ok(selection)) => {
                let submission = self.controller.submit(selection);
                Task::perform(
                    run_analysis(Arc::clone(&self.service), submission),
                    Message::AnalysisFinished,
                )
            }
            Message::SelectionLoaded(Err(err)) => {
                match err {
                    // Non-image drops are ignored without a banner
                    SelectionError::NotAnImage { file_name, mime } => {
                        tracing::debug!(file = %file_name, %mime, "Ignoring non-image drop");
                    }
                    other => {
                        tracing::warn!(error = %other, "Could not use selected file");
                        notification::push(
                            &mut self.notifications,
                            Notification::error("Could not open image", other.to_string()),
                        );
                    }
                }
                Task::none()
            }
            Message::AnalysisFinished(completion) => {
                if let Some(n) = self.controller.complete(completion) {
                    if self.controller.result().is_some() {
                        self.detail_tab = DetailTab::default();
                    }
                    notification::push(&mut self.notifications, n);
                }
                Task::none()
            }
            Message::SelectTab(tab) => {
                self.detail_tab = tab;
                Task::none()
            }
            Message::ScheduleReminder => {
                let now = chrono::Local::now();
                tracing::info!(at = %now, "Watering reminder acknowledged");
                notification::push(
                    &mut self.notifications,
                    Notification::reminder_scheduled(&now),
                );
                Task::none()
            }
            Message::DismissNotification(index) => {
                if index < self.notifications.len() {
                    self.notifications.remove(index);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Soil Moisture Analyzer").size(40),
            text("Upload a photo of your plant's soil to receive watering recommendations and moisture analysis.")
                .size(16)
                .color(ui::MUTED),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let mut content = column![
            header,
            ui::notifications::view(&self.notifications),
            ui::uploader::view(&self.controller, self.is_dragging),
        ]
        .spacing(20)
        .padding(40)
        .max_width(1100.0);

        if let Some(result) = self.controller.result() {
            let gauge = GaugeModel::new(result.moisture_score, &result.classified_soil_moisture);

            let summary = container(
                column![
                    text("Moisture Analysis").size(22),
                    ui::moisture::view(&gauge),
                    ui::recommendation::view(&result.recommendation, &result.classified_soil_moisture),
                ]
                .spacing(18),
            )
            .padding(20)
            .width(Length::FillPortion(1))
            .style(container::bordered_box);

            let details = container(ui::details::view(result, self.detail_tab))
                .padding(20)
                .width(Length::FillPortion(1))
                .style(container::bordered_box);

            content = content.push(row![summary, details].spacing(20));
        }

        scrollable(
            container(content)
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .into()
    }

    /// Window file hover / drop events
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soil_moisture_analyzer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AnalyzerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let service = HttpAnalysisService::new(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Could not build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(
        endpoint = service.endpoint(),
        timeout_secs = config.request_timeout.map(|t| t.as_secs()),
        "🌱 Soil Moisture Analyzer starting",
    );

    let service: Arc<dyn AnalysisService> = Arc::new(service);

    iced::application(
        "Soil Moisture Analyzer",
        SoilAnalyzer::update,
        SoilAnalyzer::view,
    )
    .subscription(SoilAnalyzer::subscription)
    .theme(SoilAnalyzer::theme)
    .centered()
    .run_with(move || SoilAnalyzer::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::state::analysis::AnalysisResult;
    use crate::state::controller::AnalysisState;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisService for CountingService {
        async fn analyze(&self, _image: &ImageSelection) -> Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AnalysisError::transport("unreachable in these tests"))
        }
    }

    fn app() -> (SoilAnalyzer, Arc<CountingService>) {
        let service = Arc::new(CountingService {
            calls: AtomicUsize::new(0),
        });
        let (app, _) = SoilAnalyzer::new(service.clone());
        (app, service)
    }

    #[tokio::test]
    async fn test_text_drop_never_reaches_service() {
        let (mut app, service) = app();

        let loaded = load_selection(PathBuf::from("notes.txt"), SelectionOrigin::Drop).await;
        let _ = app.update(Message::SelectionLoaded(loaded));

        assert_eq!(app.controller.state(), &AnalysisState::Idle);
        assert!(app.notifications.is_empty(), "non-image drops are silent");
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_loaded_selection_goes_in_flight() {
        let (mut app, _) = app();
        let selection =
            ImageSelection::new("soil.jpg", "image/jpeg", vec![1, 2, 3], SelectionOrigin::Picker).unwrap();

        let _ = app.update(Message::SelectionLoaded(Ok(selection)));

        assert!(app.controller.is_uploading());
        assert_eq!(app.controller.preview().unwrap().file_name(), "soil.jpg");
    }

    #[test]
    fn test_unreadable_picker_file_shows_banner() {
        let (mut app, _) = app();
        let _ = app.update(Message::SelectionLoaded(Err(SelectionError::Unreadable {
            file_name: "soil.jpg".into(),
            reason: "permission denied".into(),
        })));
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.controller.state(), &AnalysisState::Idle);
    }

    #[test]
    fn test_reminder_and_dismiss() {
        let (mut app, _) = app();
        let _ = app.update(Message::ScheduleReminder);
        assert_eq!(app.notifications[0].title, "Watering reminder scheduled!");

        let _ = app.update(Message::DismissNotification(5));
        assert_eq!(app.notifications.len(), 1);
        let _ = app.update(Message::DismissNotification(0));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_drag_highlight() {
        let (mut app, _) = app();
        let _ = app.update(Message::FileHovered);
        assert!(app.is_dragging);
        let _ = app.update(Message::FilesHoveredLeft);
        assert!(!app.is_dragging);
    }

    #[test]
    fn test_picker_filter_lists_only_image_types() {
        assert!(IMAGE_EXTENSIONS.contains(&"tif"));
        assert!(IMAGE_EXTENSIONS.contains(&"tiff"));
        for extension in IMAGE_EXTENSIONS {
            let path = PathBuf::from(format!("soil.{}", extension));
            let mime = state::data::mime_from_path(&path);
            assert!(
                mime.as_deref().is_some_and(state::data::is_image_mime),
                "{} -> {:?}",
                extension,
                mime
            );
        }
    }
}
