//! The synchronous crop → preprocess → recognize pipeline shared by both OCR
//! actions. Runs on the UI thread; failures are reported by the caller.

use anyhow::Result;

use sl_app::preprocess::Preprocess;
use sl_app::roi;
use sl_app::selection::RectPx;
use sl_ocr::{CONFIDENCE_CUTOFF, EngineConfig, OcrOutcome};
use sl_vision::{Frame, overlay, preprocess};

pub struct OcrRequest<'a> {
    /// Unmodified source buffer.
    pub source: &'a Frame,
    /// Committed selection in display coordinates, if any.
    pub roi: Option<RectPx>,
    /// Dimensions of the scaled preview the selection was made on.
    pub display_size: (i32, i32),
    pub mode: Preprocess,
    pub threshold: u8,
}

/// Resolve the display-space selection against the source image.
///
/// A missing selection, or one whose clamped mapping has no area, falls back
/// to the full frame at origin (0, 0).
fn cropped_region(req: &OcrRequest) -> Result<(Frame, (i32, i32))> {
    let mapped = req.roi.and_then(|rect| {
        roi::map_to_source(
            rect,
            req.display_size.0,
            req.display_size.1,
            req.source.width(),
            req.source.height(),
        )
    });

    match mapped {
        Some(rect) => {
            log::debug!(
                "cropping to {}x{} at ({}, {})",
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );
            Ok((req.source.crop(rect)?, (rect.x, rect.y)))
        }
        None => Ok((req.source.try_clone()?, (0, 0))),
    }
}

fn preprocessed_png(req: &OcrRequest) -> Result<(Vec<u8>, (i32, i32))> {
    let (region, origin) = cropped_region(req)?;
    let processed = preprocess::apply(&region, req.mode, req.threshold)?;
    Ok((processed.encode_png()?, origin))
}

/// Plain-text extraction over the selected region.
pub fn recognize_text(req: &OcrRequest, config: &EngineConfig) -> Result<OcrOutcome> {
    let (png, _) = preprocessed_png(req)?;
    Ok(sl_ocr::extract_text(&png, config)?)
}

/// Structured extraction; returns the uncropped source annotated with every
/// word above the confidence cutoff.
pub fn recognize_overlay(req: &OcrRequest, config: &EngineConfig) -> Result<Frame> {
    let (png, origin) = preprocessed_png(req)?;

    let words = sl_ocr::extract_words(&png, config)?;
    let mut confident = sl_ocr::filter_confident(words, CONFIDENCE_CUTOFF);
    sl_ocr::offset_words(&mut confident, origin.0, origin.1);

    Ok(overlay::annotate(req.source, &confident)?)
}
