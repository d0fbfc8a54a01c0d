use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("could not decode image {}", path.display())]
    Decode { path: PathBuf },

    #[error("camera {index} could not be opened")]
    CameraOpen { index: i32 },

    #[error("unsupported channel layout ({channels} channels)")]
    ChannelLayout { channels: i32 },

    #[error("image encoding failed")]
    Encode,

    #[error(transparent)]
    Cv(#[from] opencv::Error),
}

pub type VisionResult<T> = Result<T, VisionError>;
