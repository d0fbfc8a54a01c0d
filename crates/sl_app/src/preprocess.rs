/// Default threshold slider value (mid-range).
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Preprocessing filter applied to the cropped image before OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preprocess {
    /// Pass the image through unchanged.
    #[default]
    None,
    /// Single-channel luminance conversion.
    Grayscale,
    /// Grayscale then binarize at the threshold parameter.
    Threshold,
    /// Grayscale, 5x5 Gaussian smoothing, then binarize.
    BlurThreshold,
}

impl Preprocess {
    /// All modes, in UI order.
    pub const ALL: [Preprocess; 4] = [
        Preprocess::None,
        Preprocess::Grayscale,
        Preprocess::Threshold,
        Preprocess::BlurThreshold,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preprocess::None => "None",
            Preprocess::Grayscale => "Grayscale",
            Preprocess::Threshold => "Threshold",
            Preprocess::BlurThreshold => "Blur + Threshold",
        }
    }

    /// True for the modes that consume the threshold parameter.
    ///
    /// Drives the enabled state of the threshold control; the parameter value
    /// itself is retained regardless.
    pub fn uses_threshold(&self) -> bool {
        matches!(self, Preprocess::Threshold | Preprocess::BlurThreshold)
    }
}

#[cfg(test)]
mod tests {
    use super::Preprocess;

    #[test]
    fn only_binarizing_modes_use_the_threshold() {
        assert!(!Preprocess::None.uses_threshold());
        assert!(!Preprocess::Grayscale.uses_threshold());
        assert!(Preprocess::Threshold.uses_threshold());
        assert!(Preprocess::BlurThreshold.uses_threshold());
    }

    #[test]
    fn labels_are_distinct() {
        let labels: Vec<_> = Preprocess::ALL.iter().map(|m| m.label()).collect();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_mode_is_none() {
        assert_eq!(Preprocess::default(), Preprocess::None);
    }
}
