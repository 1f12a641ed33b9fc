//! Presence source interface and the command-backed face detector

use std::{future::Future, path::PathBuf};

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{DetectionError, InitializationError};

/// A readable frame handed to the detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub device: PathBuf,
    pub sequence: u64,
}

/// Which detection pass to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Face box plus landmarks
    Full,
    /// Cheaper box-only pass used as fallback
    BoxOnly,
}

impl DetectionMode {
    pub fn as_arg(&self) -> &'static str {
        match self {
            DetectionMode::Full => "full",
            DetectionMode::BoxOnly => "box",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A single detected face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub face: FaceBox,
    #[serde(default)]
    pub landmarks: Option<Vec<Point>>,
}

impl Detection {
    /// A box with non-finite coordinates or no area is not a usable result
    pub fn is_well_formed(&self) -> bool {
        let b = &self.face;
        [b.x, b.y, b.width, b.height].iter().all(|v| v.is_finite())
            && b.width > 0.0
            && b.height > 0.0
    }
}

/// Anything that can be polled for face presence.
///
/// `detect` may only be called after `initialize` succeeded and only with a
/// frame taken from a readable input.
pub trait PresenceSource: Send {
    fn initialize(&mut self) -> impl Future<Output = Result<(), InitializationError>> + Send;

    fn is_initialized(&self) -> bool;

    fn detect(
        &mut self,
        frame: &Frame,
        mode: DetectionMode,
    ) -> impl Future<Output = Result<Option<Detection>, DetectionError>> + Send;
}

#[derive(Debug, Deserialize)]
struct DetectorOutput {
    face: Option<FaceBox>,
    #[serde(default)]
    landmarks: Option<Vec<Point>>,
}

/// Parse detector stdout: a JSON object with an optional `face`, or bare `null`
pub fn parse_detection_output(stdout: &str) -> Result<Option<Detection>, DetectionError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(DetectionError::Malformed("empty output".to_string()));
    }

    let output: Option<DetectorOutput> = serde_json::from_str(trimmed)
        .map_err(|e| DetectionError::Malformed(e.to_string()))?;

    Ok(output.and_then(|out| {
        out.face.map(|face| Detection {
            face,
            landmarks: out.landmarks,
        })
    }))
}

/// Presence source backed by an external detector program.
///
/// Protocol: `<program> check` exits 0 once models are usable;
/// `<program> detect --device D --frame N --mode full|box` prints JSON.
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: String,
    initialized: bool,
}

impl CommandDetector {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            initialized: false,
        }
    }
}

impl PresenceSource for CommandDetector {
    async fn initialize(&mut self) -> Result<(), InitializationError> {
        debug!("Checking detector readiness: {} check", self.program);

        let output = Command::new(&self.program)
            .arg("check")
            .output()
            .await
            .map_err(|source| InitializationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InitializationError::CheckFailed(stderr.trim().to_string()));
        }

        self.initialized = true;
        info!("Detector {} is ready", self.program);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    async fn detect(
        &mut self,
        frame: &Frame,
        mode: DetectionMode,
    ) -> Result<Option<Detection>, DetectionError> {
        let output = Command::new(&self.program)
            .arg("detect")
            .arg("--device")
            .arg(&frame.device)
            .arg("--frame")
            .arg(frame.sequence.to_string())
            .arg("--mode")
            .arg(mode.as_arg())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DetectionError::Failed(format!(
                "exit {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        parse_detection_output(&String::from_utf8_lossy(&output.stdout))
    }
}
