use std::path::Path;

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::prelude::*;
use opencv::{imgcodecs, imgproc};

use sl_app::selection::RectPx;

use crate::error::{VisionError, VisionResult};

/// RGBA pixels ready for upload to a display texture.
#[derive(Debug, Clone)]
pub struct DisplayRgba {
    pub data: Vec<u8>,
    pub width: i32,
    pub height: i32,
}

/// An owned image buffer (BGR or single-channel).
///
/// Source images are replaced wholesale on every load or captured frame and
/// never mutated in place; all transforms return a new `Frame`.
#[derive(Debug)]
pub struct Frame {
    mat: Mat,
}

impl Frame {
    pub fn from_mat(mat: Mat) -> Self {
        Self { mat }
    }

    /// Decode an image file.
    ///
    /// The decoder signals failure with an empty buffer rather than an error,
    /// which is mapped to [`VisionError::Decode`] here.
    pub fn load(path: &Path) -> VisionResult<Frame> {
        let mat = imgcodecs::imread(path.to_string_lossy().as_ref(), imgcodecs::IMREAD_COLOR)?;
        if mat.rows() == 0 || mat.cols() == 0 {
            return Err(VisionError::Decode {
                path: path.to_path_buf(),
            });
        }
        Ok(Self { mat })
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn mat_mut(&mut self) -> &mut Mat {
        &mut self.mat
    }

    pub fn width(&self) -> i32 {
        self.mat.cols()
    }

    pub fn height(&self) -> i32 {
        self.mat.rows()
    }

    pub fn channels(&self) -> i32 {
        self.mat.channels()
    }

    pub fn try_clone(&self) -> VisionResult<Frame> {
        Ok(Self {
            mat: self.mat.try_clone()?,
        })
    }

    /// Copy out a sub-region. The rectangle must already be clamped to
    /// bounds (see `sl_app::roi::map_to_source`).
    pub fn crop(&self, rect: RectPx) -> VisionResult<Frame> {
        let roi = Mat::roi(&self.mat, Rect::new(rect.x, rect.y, rect.width, rect.height))?;
        Ok(Self {
            mat: roi.clone_pointee(),
        })
    }

    /// Scale to fit inside `max_w` x `max_h`, preserving aspect ratio.
    pub fn scaled_to_fit(&self, max_w: i32, max_h: i32) -> VisionResult<Frame> {
        let (w, h) = (self.width(), self.height());
        let ratio = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);

        let new_w = ((w as f64 * ratio) as i32).max(1);
        let new_h = ((h as f64 * ratio) as i32).max(1);
        let interpolation = if ratio < 1.0 {
            imgproc::INTER_AREA
        } else {
            imgproc::INTER_LINEAR
        };

        let mut scaled = Mat::default();
        imgproc::resize(
            &self.mat,
            &mut scaled,
            Size::new(new_w, new_h),
            0.0,
            0.0,
            interpolation,
        )?;
        Ok(Self { mat: scaled })
    }

    /// Convert to tightly packed RGBA for display.
    pub fn to_rgba(&self) -> VisionResult<DisplayRgba> {
        let code = match self.channels() {
            1 => imgproc::COLOR_GRAY2RGBA,
            3 => imgproc::COLOR_BGR2RGBA,
            4 => imgproc::COLOR_BGRA2RGBA,
            channels => return Err(VisionError::ChannelLayout { channels }),
        };

        let mut rgba = Mat::default();
        imgproc::cvt_color_def(&self.mat, &mut rgba, code)?;

        Ok(DisplayRgba {
            data: rgba.data_bytes()?.to_vec(),
            width: self.width(),
            height: self.height(),
        })
    }

    /// Encode to an in-memory PNG, the interchange format handed to the OCR
    /// engine boundary.
    pub fn encode_png(&self) -> VisionResult<Vec<u8>> {
        let mut buf = Vector::<u8>::new();
        let ok = imgcodecs::imencode(".png", &self.mat, &mut buf, &Vector::new())?;
        if !ok {
            return Err(VisionError::Encode);
        }
        Ok(buf.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use opencv::core::{CV_8UC3, Mat, Scalar};
    use opencv::prelude::*;

    use sl_app::selection::RectPx;

    use super::Frame;

    fn solid_bgr(rows: i32, cols: i32) -> Frame {
        let mat =
            Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::new(20.0, 40.0, 60.0, 0.0))
                .unwrap();
        Frame::from_mat(mat)
    }

    #[test]
    fn crop_returns_the_requested_region() {
        let frame = solid_bgr(100, 200);
        let cropped = frame.crop(RectPx::new(10, 20, 50, 30)).unwrap();
        assert_eq!(cropped.width(), 50);
        assert_eq!(cropped.height(), 30);
    }

    #[test]
    fn scaled_to_fit_preserves_aspect_ratio() {
        let frame = solid_bgr(800, 1200);
        let scaled = frame.scaled_to_fit(600, 600).unwrap();
        assert_eq!(scaled.width(), 600);
        assert_eq!(scaled.height(), 400);

        // Upscaling also fits the box.
        let small = solid_bgr(100, 100);
        let scaled = small.scaled_to_fit(300, 200).unwrap();
        assert_eq!(scaled.width(), 200);
        assert_eq!(scaled.height(), 200);
    }

    #[test]
    fn rgba_conversion_is_tightly_packed() {
        let frame = solid_bgr(4, 6);
        let rgba = frame.to_rgba().unwrap();
        assert_eq!(rgba.width, 6);
        assert_eq!(rgba.height, 4);
        assert_eq!(rgba.data.len(), 4 * 6 * 4);
        // BGR (20, 40, 60) becomes RGB (60, 40, 20) with opaque alpha.
        assert_eq!(&rgba.data[0..4], &[60, 40, 20, 255]);
    }

    #[test]
    fn png_round_trip_keeps_dimensions() {
        let frame = solid_bgr(8, 10);
        let png = frame.encode_png().unwrap();
        let decoded = opencv::imgcodecs::imdecode(
            &opencv::core::Vector::<u8>::from_slice(&png),
            opencv::imgcodecs::IMREAD_COLOR,
        )
        .unwrap();
        assert_eq!(decoded.cols(), 10);
        assert_eq!(decoded.rows(), 8);
    }
}
