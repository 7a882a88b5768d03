/// Remote soil analysis service.
///
/// The controller only sees the [`AnalysisService`] trait; the HTTP
/// implementation lives in [`client`].

pub mod client;

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::state::analysis::AnalysisResult;
use crate::state::data::ImageSelection;

/// Something that can turn an image into a moisture analysis.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Analyze one image. Every failure mode is folded into [`AnalysisError`].
    async fn analyze(&self, image: &ImageSelection) -> Result<AnalysisResult, AnalysisError>;
}
