use opencv::core::{Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;

use sl_app::preprocess::Preprocess;

use crate::error::VisionResult;
use crate::frame::Frame;

/// Kernel size of the smoothing pass in `BlurThreshold`.
const BLUR_KERNEL: i32 = 5;

/// Apply the selected preprocessing filter.
///
/// `threshold` is only consulted by the binarizing modes.
pub fn apply(frame: &Frame, mode: Preprocess, threshold: u8) -> VisionResult<Frame> {
    match mode {
        Preprocess::None => frame.try_clone(),

        Preprocess::Grayscale => Ok(Frame::from_mat(to_gray(frame.mat())?)),

        Preprocess::Threshold => {
            let gray = to_gray(frame.mat())?;
            Ok(Frame::from_mat(binarize(&gray, threshold)?))
        }

        Preprocess::BlurThreshold => {
            let gray = to_gray(frame.mat())?;
            let mut blurred = Mat::default();
            imgproc::gaussian_blur_def(
                &gray,
                &mut blurred,
                Size::new(BLUR_KERNEL, BLUR_KERNEL),
                0.0,
            )?;
            Ok(Frame::from_mat(binarize(&blurred, threshold)?))
        }
    }
}

/// Luminance conversion; no-op for already single-channel input.
fn to_gray(mat: &Mat) -> VisionResult<Mat> {
    if mat.channels() == 1 {
        return Ok(mat.try_clone()?);
    }
    let mut gray = Mat::default();
    imgproc::cvt_color_def(mat, &mut gray, imgproc::COLOR_BGR2GRAY)?;
    Ok(gray)
}

/// Pixels strictly above `threshold` become 255, all others 0.
fn binarize(gray: &Mat, threshold: u8) -> VisionResult<Mat> {
    let mut binary = Mat::default();
    imgproc::threshold(
        gray,
        &mut binary,
        threshold as f64,
        255.0,
        imgproc::THRESH_BINARY,
    )?;
    Ok(binary)
}

#[cfg(test)]
mod tests {
    use opencv::core::{CV_8UC1, CV_8UC3, Mat, Scalar};
    use opencv::prelude::*;

    use sl_app::preprocess::Preprocess;

    use super::apply;
    use crate::frame::Frame;

    fn gray_gradient() -> Frame {
        let mut mat =
            Mat::new_rows_cols_with_default(2, 2, CV_8UC1, Scalar::all(0.0)).unwrap();
        *mat.at_2d_mut::<u8>(0, 0).unwrap() = 0;
        *mat.at_2d_mut::<u8>(0, 1).unwrap() = 100;
        *mat.at_2d_mut::<u8>(1, 0).unwrap() = 127;
        *mat.at_2d_mut::<u8>(1, 1).unwrap() = 200;
        Frame::from_mat(mat)
    }

    fn color_block() -> Frame {
        let mat = Mat::new_rows_cols_with_default(
            8,
            8,
            CV_8UC3,
            Scalar::new(10.0, 50.0, 200.0, 0.0),
        )
        .unwrap();
        Frame::from_mat(mat)
    }

    fn assert_two_valued(frame: &Frame) {
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let v: u8 = *frame.mat().at_2d(y, x).unwrap();
                assert!(v == 0 || v == 255, "pixel ({x},{y}) = {v}");
            }
        }
    }

    #[test]
    fn none_passes_through_unchanged() {
        let frame = color_block();
        let out = apply(&frame, Preprocess::None, 127).unwrap();
        assert_eq!(out.channels(), 3);
        assert_eq!((out.width(), out.height()), (8, 8));
    }

    #[test]
    fn grayscale_yields_a_single_channel() {
        let out = apply(&color_block(), Preprocess::Grayscale, 127).unwrap();
        assert_eq!(out.channels(), 1);
    }

    #[test]
    fn grayscale_is_a_noop_on_single_channel_input() {
        let out = apply(&gray_gradient(), Preprocess::Grayscale, 127).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(*out.mat().at_2d::<u8>(1, 1).unwrap(), 200);
    }

    #[test]
    fn threshold_output_is_strictly_two_valued() {
        let out = apply(&gray_gradient(), Preprocess::Threshold, 127).unwrap();
        assert_two_valued(&out);

        // Strictly greater: 127 itself maps to 0.
        assert_eq!(*out.mat().at_2d::<u8>(0, 0).unwrap(), 0);
        assert_eq!(*out.mat().at_2d::<u8>(1, 0).unwrap(), 0);
        assert_eq!(*out.mat().at_2d::<u8>(1, 1).unwrap(), 255);
    }

    #[test]
    fn threshold_binarizes_color_input_too() {
        let out = apply(&color_block(), Preprocess::Threshold, 127).unwrap();
        assert_eq!(out.channels(), 1);
        assert_two_valued(&out);
    }

    #[test]
    fn blur_threshold_output_is_strictly_two_valued() {
        let out = apply(&color_block(), Preprocess::BlurThreshold, 127).unwrap();
        assert_eq!(out.channels(), 1);
        assert_two_valued(&out);
    }
}
