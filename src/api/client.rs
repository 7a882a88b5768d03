/// HTTP client for the soil analysis endpoint
///
/// Posts the image as `multipart/form-data` (one part named `image`) and
/// interprets the JSON envelope that comes back, using [`reqwest`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use super::AnalysisService;
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::state::analysis::{AnalysisEnvelope, AnalysisResult};
use crate::state::data::ImageSelection;

/// Multipart field the service reads the image from.
pub const IMAGE_FIELD: &str = "image";

/// HTTP client for a single analysis endpoint.
pub struct HttpAnalysisService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisService {
    /// Build a client from configuration.
    ///
    /// No timeout is applied unless `request_timeout` is set.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(image: &ImageSelection) -> Result<Form, AnalysisError> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime())?;
        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, image: &ImageSelection) -> Result<AnalysisResult, AnalysisError> {
        let form = Self::form(image)?;

        tracing::info!(
            endpoint = %self.endpoint,
            file = image.file_name(),
            mime = image.mime(),
            size = image.bytes().len(),
            "Uploading image for analysis",
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        interpret_response(status, &body)
    }
}

/// Turn an HTTP status and body into a result.
///
/// Transport-level failure (non-2xx) is checked before the body is looked
/// at; application-level failure (`success: false`) after.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    if !status.is_success() {
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string();
        tracing::warn!(status = status.as_u16(), %reason, "Analysis service rejected request");
        return Err(AnalysisError::ServiceRejected {
            status: status.as_u16(),
            reason,
        });
    }

    AnalysisEnvelope::from_slice(body)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use crate::state::controller::{run_analysis, AnalysisState, UploadController};
    use crate::state::data::SelectionOrigin;

    const DRY_BODY: &str = r#"{"success":true,"classifiedSoilMoisture":"Dry","moistureScore":2.4,"recommendation":"Water now","details":{"color":{"averageBrightness":61.0}}}"#;

    /// Answer exactly one request on a local port, handing back the raw request text
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/analyze-soil", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (endpoint, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_lowercase();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok());
                match length {
                    Some(length) if buf.len() >= head_end + 4 + length => break,
                    None if text.ends_with("--\r\n") => break,
                    _ => {}
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Client that ignores proxy settings from the environment
    fn local_service(endpoint: String) -> HttpAnalysisService {
        HttpAnalysisService {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            endpoint,
        }
    }

    fn soil_photo() -> ImageSelection {
        ImageSelection::new("soil.jpg", "image/jpeg", b"fake-jpeg-bytes".to_vec(), SelectionOrigin::Picker)
            .unwrap()
    }

    #[test]
    fn test_non_success_status_ignores_body() {
        let body = br#"{"success":true,"classifiedSoilMoisture":"Dry","moistureScore":1,"recommendation":"Water"}"#;
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ServiceRejected {
                status: 500,
                reason: "Internal Server Error".into()
            }
        );
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_ok_status_with_application_failure() {
        let err = interpret_response(StatusCode::OK, br#"{"success":false,"error":"Too blurry"}"#)
            .unwrap_err();
        assert_eq!(err, AnalysisError::Application("Too blurry".into()));
    }

    #[test]
    fn test_ok_status_with_result() {
        let result = interpret_response(
            StatusCode::OK,
            br#"{"success":true,"classifiedSoilMoisture":"Moist","moistureScore":7.1,"recommendation":"No action needed"}"#,
        )
        .unwrap();
        assert_eq!(result.classified_soil_moisture, "Moist");
        assert_eq!(result.moisture_score, 7.1);
    }

    #[test]
    fn test_ok_status_with_empty_body() {
        assert_matches!(
            interpret_response(StatusCode::OK, b""),
            Err(AnalysisError::Malformed(_))
        );
    }

    #[test]
    fn test_form_rejects_invalid_mime() {
        let image = ImageSelection::new(
            "soil.png",
            "not a mime type",
            vec![1, 2, 3],
            crate::state::data::SelectionOrigin::Picker,
        )
        .unwrap();
        assert_matches!(HttpAnalysisService::form(&image), Err(AnalysisError::Transport(_)));
    }

    #[test]
    fn test_builds_from_config() {
        let config = AnalyzerConfig {
            endpoint: "http://127.0.0.1:9/api/analyze-soil".into(),
            request_timeout: Some(Duration::from_secs(5)),
        };
        let service = HttpAnalysisService::new(&config).unwrap();
        assert_eq!(service.endpoint(), "http://127.0.0.1:9/api/analyze-soil");
    }

    #[tokio::test]
    async fn test_upload_is_single_image_part() {
        let (endpoint, server) = serve_once("200 OK", DRY_BODY).await;

        let result = local_service(endpoint).analyze(&soil_photo()).await.unwrap();
        assert_eq!(result.classified_soil_moisture, "Dry");
        assert_eq!(result.moisture_score, 2.4);
        assert_eq!(result.color().unwrap().average_brightness, Some(61.0));

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /api/analyze-soil HTTP/1.1"), "{}", request);
        assert!(lower.contains("content-type: multipart/form-data; boundary="), "{}", request);
        assert_eq!(lower.matches("content-disposition: form-data").count(), 1, "{}", request);
        assert!(lower.contains(r#"name="image""#), "{}", request);
        assert!(lower.contains(r#"filename="soil.jpg""#), "{}", request);
        assert!(lower.contains("content-type: image/jpeg"), "{}", request);
        assert!(request.contains("fake-jpeg-bytes"));
    }

    #[tokio::test]
    async fn test_http_500_is_service_rejected() {
        let (endpoint, server) = serve_once("500 Internal Server Error", DRY_BODY).await;

        let err = local_service(endpoint).analyze(&soil_photo()).await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ServiceRejected {
                status: 500,
                reason: "Internal Server Error".into()
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_500_through_controller_ends_failed() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "").await;
        let service: Arc<dyn AnalysisService> = Arc::new(local_service(endpoint));

        let mut controller = UploadController::new();
        let submission = controller.submit(soil_photo());
        assert!(controller.is_uploading());

        let completion = run_analysis(service, submission).await;
        controller.complete(completion);
        server.await.unwrap();

        assert!(!controller.is_uploading());
        assert_matches!(controller.state(), AnalysisState::Failed(msg) if msg.contains("500"));
        assert_eq!(controller.preview().unwrap().file_name(), "soil.jpg");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/analyze-soil", listener.local_addr().unwrap());
        drop(listener);

        let err = local_service(endpoint).analyze(&soil_photo()).await.unwrap_err();
        assert_matches!(err, AnalysisError::Transport(msg) if !msg.is_empty());
    }
}
