//! Capture device acquisition and frame readiness

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::fs::File;
use tracing::{info, warn};

use crate::{error::{InvalidInputState, MediaAccessError}, services::detector::Frame};

/// Source of readable frames for the detector
pub trait FrameInput: Send {
    fn next_frame(&mut self) -> Result<Frame, InvalidInputState>;
}

/// Shared pause switch for an acquired stream
#[derive(Debug, Clone, Default)]
pub struct MediaControl {
    paused: Arc<AtomicBool>,
}

impl MediaControl {
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// An opened capture device
#[derive(Debug)]
pub struct MediaStream {
    device: PathBuf,
    _handle: File,
    control: MediaControl,
    sequence: u64,
}

impl MediaStream {
    pub fn control(&self) -> MediaControl {
        self.control.clone()
    }
}

impl FrameInput for MediaStream {
    fn next_frame(&mut self) -> Result<Frame, InvalidInputState> {
        if self.control.is_paused() {
            return Err(InvalidInputState::Paused);
        }
        if !self.device.exists() {
            return Err(InvalidInputState::Ended);
        }

        self.sequence += 1;
        Ok(Frame {
            device: self.device.clone(),
            sequence: self.sequence,
        })
    }
}

/// Open the capture device, holding it for the lifetime of the stream
pub async fn acquire(device: impl AsRef<Path>) -> Result<MediaStream, MediaAccessError> {
    let device = device.as_ref().to_path_buf();

    let unsupported = |reason: String| MediaAccessError::UnsupportedDevice {
        path: device.clone(),
        reason,
    };

    let metadata = tokio::fs::metadata(&device).await.map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => MediaAccessError::PermissionDenied(device.clone()),
        _ => unsupported(e.to_string()),
    })?;

    if metadata.is_dir() {
        return Err(unsupported("is a directory".to_string()));
    }

    let handle = File::open(&device).await.map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => MediaAccessError::PermissionDenied(device.clone()),
        _ => unsupported(e.to_string()),
    })?;

    info!("Acquired capture device {}", device.display());
    Ok(MediaStream {
        device,
        _handle: handle,
        control: MediaControl::default(),
        sequence: 0,
    })
}

/// Acquire the device, logging any failure
pub async fn try_acquire(device: impl AsRef<Path>) -> Result<MediaStream, MediaAccessError> {
    acquire(device).await.inspect_err(|e| warn!("Camera unavailable: {}", e))
}
