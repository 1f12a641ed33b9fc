//! User-facing status labels

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::presence::{PresenceSample, SourceCondition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Ready,
    Loading,
    CameraError,
    Studying,
    Distracted,
    NotFound,
    Paused,
}

/// Color class of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Good,
    Alert,
    Neutral,
}

impl StatusLabel {
    pub fn text(&self) -> &'static str {
        match self {
            StatusLabel::Ready => "Camera Ready",
            StatusLabel::Loading => "Loading models...",
            StatusLabel::CameraError => "Camera Access Denied",
            StatusLabel::Studying => "Studying...",
            StatusLabel::Distracted => "Not Studying",
            StatusLabel::NotFound => "No Face Found",
            StatusLabel::Paused => "Video Paused/Ended",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            StatusLabel::Ready | StatusLabel::Studying => StatusTone::Good,
            StatusLabel::Distracted | StatusLabel::NotFound => StatusTone::Alert,
            StatusLabel::Loading | StatusLabel::CameraError | StatusLabel::Paused => {
                StatusTone::Neutral
            }
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Map the latest sample and sampler condition to a label
pub fn status_label(sample: &PresenceSample, condition: SourceCondition) -> StatusLabel {
    match condition {
        SourceCondition::AwaitingMedia | SourceCondition::SourceLoading => StatusLabel::Loading,
        SourceCondition::MediaError => StatusLabel::CameraError,
        SourceCondition::SourceReady => StatusLabel::Ready,
        SourceCondition::InputUnreadable(_) => StatusLabel::Paused,
        SourceCondition::Live if sample.studying => StatusLabel::Studying,
        SourceCondition::Live if sample.present => StatusLabel::Distracted,
        SourceCondition::Live => StatusLabel::NotFound,
    }
}
