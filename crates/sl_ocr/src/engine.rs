use std::collections::HashMap;

use rusty_tesseract::{Args, Image};
use thiserror::Error;

use crate::types::{BoundingBox, OcrOutcome, OcrWord};

/// Engine configuration. Internal constants, not a UI surface.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Trained-data language identifier.
    pub language: String,
    /// Page segmentation mode; `None` uses the engine default.
    pub psm: Option<i32>,
    /// Engine mode; `None` uses the engine default.
    pub oem: Option<i32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            psm: None,
            oem: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image decoding failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("OCR engine failed: {0}")]
    Engine(String),
}

pub type OcrResult<T> = Result<T, OcrError>;

fn tess_args(config: &EngineConfig) -> Args {
    Args {
        lang: config.language.clone(),
        config_variables: HashMap::new(),
        dpi: None,
        psm: config.psm,
        oem: config.oem,
    }
}

/// Decode encoded image bytes into the engine's input type.
fn tess_image(image_data: &[u8]) -> OcrResult<Image> {
    let decoded = image::load_from_memory(image_data)?;
    Image::from_dynamic_image(&decoded).map_err(|e| OcrError::Engine(e.to_string()))
}

/// Plain-text extraction from encoded image bytes.
pub fn extract_text(image_data: &[u8], config: &EngineConfig) -> OcrResult<OcrOutcome> {
    let img = tess_image(image_data)?;
    let text = rusty_tesseract::image_to_string(&img, &tess_args(config))
        .map_err(|e| OcrError::Engine(e.to_string()))?;

    log::debug!("plain-text OCR returned {} bytes", text.len());
    Ok(OcrOutcome::from_text(text))
}

/// Structured extraction: every word row with its box and confidence.
///
/// Rows are returned unfiltered; callers apply
/// [`crate::types::filter_confident`] before drawing.
pub fn extract_words(image_data: &[u8], config: &EngineConfig) -> OcrResult<Vec<OcrWord>> {
    let img = tess_image(image_data)?;
    let output = rusty_tesseract::image_to_data(&img, &tess_args(config))
        .map_err(|e| OcrError::Engine(e.to_string()))?;

    let words: Vec<OcrWord> = output
        .data
        .into_iter()
        .map(|line| OcrWord {
            text: line.text,
            confidence: line.conf,
            bounding_box: BoundingBox {
                x: line.left,
                y: line.top,
                width: line.width,
                height: line.height,
            },
        })
        .collect();

    log::debug!("structured OCR returned {} rows", words.len());
    Ok(words)
}
