/// Shown in the text pane when recognition produced no usable text.
pub const NO_TEXT_PLACEHOLDER: &str = "[No text detected]";

/// Words at or below this confidence are omitted from overlays.
///
/// The engine reports negative sentinel confidences on non-text rows, which
/// this cutoff also discards.
pub const CONFIDENCE_CUTOFF: f32 = 30.0;

/// One recognized word (text + coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    pub text: String,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

/// Bounding box in the coordinate space of the image handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Outcome of a plain-text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// The engine returned usable text (kept verbatim).
    Text { text: String },
    /// The engine returned nothing, or only whitespace.
    Empty,
}

impl OcrOutcome {
    pub fn from_text(raw: String) -> Self {
        if raw.trim().is_empty() {
            OcrOutcome::Empty
        } else {
            OcrOutcome::Text { text: raw }
        }
    }

    /// Text to render in the output pane.
    pub fn display_text(&self) -> &str {
        match self {
            OcrOutcome::Text { text } => text,
            OcrOutcome::Empty => NO_TEXT_PLACEHOLDER,
        }
    }
}

/// Keep only the words with confidence strictly greater than `cutoff`.
pub fn filter_confident(words: Vec<OcrWord>, cutoff: f32) -> Vec<OcrWord> {
    words
        .into_iter()
        .filter(|w| w.confidence > cutoff)
        .collect()
}

/// Shift word boxes by the crop origin so they land in full-image
/// coordinates even though recognition ran on a cropped sub-image.
pub fn offset_words(words: &mut [OcrWord], dx: i32, dy: i32) {
    for word in words {
        word.bounding_box.x += dx;
        word.bounding_box.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BoundingBox, CONFIDENCE_CUTOFF, NO_TEXT_PLACEHOLDER, OcrOutcome, OcrWord, filter_confident,
        offset_words,
    };

    fn word(text: &str, confidence: f32) -> OcrWord {
        OcrWord {
            text: text.to_string(),
            confidence,
            bounding_box: BoundingBox {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
        }
    }

    #[test]
    fn cutoff_is_strict_and_discards_sentinels() {
        let words = vec![
            word("a", 10.0),
            word("b", 31.0),
            word("c", 30.0),
            word("d", 95.0),
            word("", -1.0),
        ];

        let kept = filter_confident(words, CONFIDENCE_CUTOFF);
        let texts: Vec<_> = kept.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "d"]);
    }

    #[test]
    fn empty_and_whitespace_text_become_the_placeholder() {
        assert_eq!(
            OcrOutcome::from_text(String::new()).display_text(),
            NO_TEXT_PLACEHOLDER
        );
        assert_eq!(
            OcrOutcome::from_text("  \n\t ".to_string()).display_text(),
            NO_TEXT_PLACEHOLDER
        );
    }

    #[test]
    fn recognized_text_is_kept_verbatim() {
        let outcome = OcrOutcome::from_text("Hello world\n".to_string());
        assert_eq!(outcome.display_text(), "Hello world\n");
    }

    #[test]
    fn offsetting_moves_only_the_origin() {
        let mut words = vec![word("a", 90.0)];
        offset_words(&mut words, 200, 150);

        assert_eq!(
            words[0].bounding_box,
            BoundingBox {
                x: 200,
                y: 150,
                width: 10,
                height: 10,
            }
        );
    }
}
