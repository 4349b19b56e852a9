// src/services/face.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use crate::exam::Presence;

#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("no face classifier is configured")]
    Unconfigured,

    #[error("face classifier request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Answers "is at least one face visible in this frame". No identity matching.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    async fn detect(&self, frame: &[u8]) -> Result<bool, DetectorError>;
}

/// Runs the detector and folds any failure into [`Presence::Inconclusive`].
pub async fn check_face_presence(detector: &dyn FaceDetector, frame: &[u8]) -> Presence {
    match detector.detect(frame).await {
        Ok(true) => Presence::Detected,
        Ok(false) => Presence::NotDetected,
        Err(e) => {
            tracing::warn!("Face presence check inconclusive: {}", e);
            Presence::Inconclusive
        }
    }
}

/// Reply body of the classifier service.
#[derive(Debug, Deserialize)]
struct ClassifierResponse {
    /// Number of face regions found in the frame.
    faces: u32,
}

/// Posts the raw frame to an external classifier and reads `{"faces": n}` back.
#[derive(Debug, Clone)]
pub struct HttpFaceDetector {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpFaceDetector {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, DetectorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl FaceDetector for HttpFaceDetector {
    async fn detect(&self, frame: &[u8]) -> Result<bool, DetectorError> {
        let reply: ClassifierResponse = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(frame.to_vec())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!("Classifier found {} face(s)", reply.faces);
        Ok(reply.faces > 0)
    }
}

/// Stand-in when no classifier is configured. Every check is inconclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDetector;

#[async_trait]
impl FaceDetector for UnavailableDetector {
    async fn detect(&self, _frame: &[u8]) -> Result<bool, DetectorError> {
        Err(DetectorError::Unconfigured)
    }
}
