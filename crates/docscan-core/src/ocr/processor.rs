//! Request pipeline: OCR each orientation, extract, keep the best.

use tracing::{info, warn};

use super::orientation::{OrientationAttempt, OrientationRetry};
use super::OcrService;
use crate::document::{registry, ExtractorRegistry};
use crate::error::OcrError;
use crate::models::{ExtractionRequest, ExtractionResponse, OrientationConfig};

#[cfg(feature = "native")]
use super::OcrSpaceClient;
#[cfg(feature = "native")]
use crate::models::DocscanConfig;

/// Runs extraction requests against an OCR backend.
pub struct DocumentProcessor<S: OcrService> {
    service: S,
    policy: OrientationConfig,
    registry: &'static ExtractorRegistry,
}

#[cfg(feature = "native")]
impl DocumentProcessor<OcrSpaceClient> {
    /// Processor backed by the OCR.space client.
    ///
    /// Fails when the configuration is invalid or no API key is available.
    pub fn from_config(config: &DocscanConfig) -> crate::error::Result<Self> {
        config.validate()?;
        let client = OcrSpaceClient::new(config.ocr.clone())?;
        Ok(Self::new(client, config.orientation))
    }
}

impl<S: OcrService> DocumentProcessor<S> {
    /// Create a processor with the given retry thresholds.
    pub fn new(service: S, policy: OrientationConfig) -> Self {
        Self {
            service,
            policy,
            registry: registry(),
        }
    }

    /// The OCR backend.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Recognize and extract one document, trying orientations as needed.
    ///
    /// Never fails: OCR errors become empty attempts and are reflected in
    /// the response message.
    pub async fn process(&self, request: &ExtractionRequest) -> ExtractionResponse {
        let Some(extractor) = self.registry.get(&request.document_type) else {
            warn!(document_type = %request.document_type, "unsupported document type");
            return ExtractionResponse::failure(format!(
                "Unsupported document type: {}",
                request.document_type
            ));
        };

        info!(
            document_type = %extractor.document_type(),
            backend = self.service.name(),
            "processing document"
        );

        let mut retry = OrientationRetry::new(self.policy);
        let mut transport_failures = 0usize;
        let mut blank_results = 0usize;

        while let Some(orientation) = retry.next_orientation() {
            let attempt = match self.service.recognize(&request.file_url, orientation).await {
                Ok(recognized) if recognized.is_blank() => {
                    blank_results += 1;
                    OrientationAttempt::failed(orientation)
                }
                Ok(recognized) => {
                    let extraction =
                        self.registry
                            .extract(&request.document_type, &recognized.text, &request.expected_fields);
                    OrientationAttempt::new(
                        orientation,
                        extraction.fields,
                        extraction.confidence,
                        extraction.text_length,
                    )
                }
                Err(OcrError::NoText) => {
                    blank_results += 1;
                    OrientationAttempt::failed(orientation)
                }
                Err(e) => {
                    warn!(orientation = orientation.degrees(), error = %e, "OCR attempt failed");
                    transport_failures += 1;
                    OrientationAttempt::failed(orientation)
                }
            };
            retry.record(attempt);
        }

        let outcome = retry.finish();
        let attempts = outcome.tested.len();
        let tested_orientations = Some(outcome.tested.iter().map(|o| o.degrees()).collect());

        let Some(best) = outcome.best else {
            return ExtractionResponse::failure("No orientation was attempted");
        };

        let message = if transport_failures == attempts {
            format!("OCR failed for all {attempts} orientations")
        } else if transport_failures + blank_results == attempts {
            "No text recognized in the document".to_string()
        } else {
            format!(
                "Extracted {} fields at {} orientation",
                best.field_count(),
                best.orientation
            )
        };

        info!(
            success = outcome.success,
            confidence = best.confidence,
            fields = best.field_count(),
            "document processed"
        );

        ExtractionResponse {
            success: outcome.success,
            data: best.fields,
            confidence: best.confidence,
            message,
            tested_orientations,
        }
    }
}
