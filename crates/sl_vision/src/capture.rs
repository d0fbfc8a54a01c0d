use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio;

use crate::error::{VisionError, VisionResult};
use crate::frame::Frame;

/// Exclusively-owned video capture device.
///
/// Opened on entering the capturing state, released (via `Drop`) on leaving
/// it; re-entering opens the device again from scratch.
pub struct CaptureDevice {
    inner: videoio::VideoCapture,
    index: i32,
}

impl CaptureDevice {
    /// Open the device at `index`.
    pub fn open(index: i32) -> VisionResult<Self> {
        let inner = videoio::VideoCapture::new(index, videoio::CAP_ANY)?;
        if !inner.is_opened()? {
            return Err(VisionError::CameraOpen { index });
        }
        log::info!("camera {index} opened");
        Ok(Self { inner, index })
    }

    /// Read a single frame.
    ///
    /// A failed read is not an error; ticks simply skip the display update
    /// when no frame arrived.
    pub fn read_frame(&mut self) -> VisionResult<Option<Frame>> {
        let mut mat = Mat::default();
        let grabbed = self.inner.read(&mut mat)?;
        if !grabbed || mat.rows() == 0 || mat.cols() == 0 {
            return Ok(None);
        }
        Ok(Some(Frame::from_mat(mat)))
    }
}

impl Drop for CaptureDevice {
    fn drop(&mut self) {
        if let Err(e) = self.inner.release() {
            log::warn!("camera {} release failed: {e}", self.index);
        } else {
            log::info!("camera {} released", self.index);
        }
    }
}
