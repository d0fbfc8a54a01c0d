use opencv::core::{Point, Rect, Scalar};
use opencv::imgproc;

use sl_ocr::OcrWord;

use crate::error::VisionResult;
use crate::frame::Frame;

/// Box outline color (BGR green).
fn box_color() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

/// Label text color (BGR blue).
fn label_color() -> Scalar {
    Scalar::new(255.0, 0.0, 0.0, 0.0)
}

/// Draw word boxes and labels onto a fresh copy of `base`.
///
/// Word boxes must already be in `base`'s coordinate space; recognition over
/// a crop is offset back via `sl_ocr::offset_words` first. The label is
/// drawn 10 px above the box origin.
pub fn annotate(base: &Frame, words: &[OcrWord]) -> VisionResult<Frame> {
    let mut canvas = base.try_clone()?;

    for word in words {
        let b = word.bounding_box;
        let rect = Rect::new(b.x, b.y, b.width, b.height);

        imgproc::rectangle(canvas.mat_mut(), rect, box_color(), 2, imgproc::LINE_8, 0)?;
        imgproc::put_text(
            canvas.mat_mut(),
            &word.text,
            Point::new(b.x, b.y - 10),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.5,
            label_color(),
            1,
            imgproc::LINE_8,
            false,
        )?;
    }

    log::debug!("annotated {} word boxes", words.len());
    Ok(canvas)
}
