pub mod camera;
pub mod preprocess;
pub mod roi;
pub mod selection;

use preprocess::{DEFAULT_THRESHOLD, Preprocess};
use selection::RectPx;

/// Top-level application actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Selection(selection::Action),
    Camera(camera::Action),
    /// Host decoded a user-chosen file and replaced the source image.
    ImageLoaded,
    /// A camera tick read a frame and replaced the source image.
    FrameCaptured,
    /// User picked a preprocessing mode.
    SetPreprocess(Preprocess),
    /// User moved the threshold slider.
    SetThreshold(u8),
    /// User pressed the clear-selection button.
    ClearSelection,
    /// Extract plain text from the current image.
    RunOcr,
    /// Extract per-word boxes and draw them over the source image.
    RunOcrWithOverlay,
}

/// Top-level application effects, executed synchronously by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Selection(selection::Effect),
    Camera(camera::Effect),
    /// Rebuild the scaled display image from the current source.
    RefreshDisplay,
    /// Show a warning dialog (precondition or device failure).
    ShowWarning { message: String },
    /// Run plain-text OCR over the (optionally selected) region.
    ///
    /// `roi` is the committed selection in display coordinates; the host
    /// rescales it against the source image before cropping.
    ExtractText { roi: Option<RectPx> },
    /// Run structured OCR and display the annotated source image.
    ExtractWords { roi: Option<RectPx> },
}

/// Core app model.
///
/// Owns all process-wide state the UI mutates: the two small state machines
/// (drag selection, camera), the preprocessing choice, and whether a source
/// image is present. The pixel buffers themselves live in the host.
#[derive(Debug)]
pub struct AppModel {
    selection: selection::Model,
    camera: camera::Model,
    preprocess: Preprocess,
    threshold: u8,
    has_image: bool,
}

impl Default for AppModel {
    fn default() -> Self {
        Self {
            selection: selection::Model::default(),
            camera: camera::Model::default(),
            preprocess: Preprocess::default(),
            threshold: DEFAULT_THRESHOLD,
            has_image: false,
        }
    }
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &selection::Model {
        &self.selection
    }

    pub fn camera(&self) -> &camera::Model {
        &self.camera
    }

    pub fn preprocess(&self) -> Preprocess {
        self.preprocess
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Enabled state of the threshold control (pure UI affordance).
    pub fn threshold_control_enabled(&self) -> bool {
        self.preprocess.uses_threshold()
    }

    pub fn has_image(&self) -> bool {
        self.has_image
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Selection(a) => self
                .selection
                .reduce(a)
                .into_iter()
                .map(Effect::Selection)
                .collect(),

            Action::Camera(a) => self
                .camera
                .reduce(a)
                .into_iter()
                .map(Effect::Camera)
                .collect(),

            Action::ImageLoaded => {
                self.has_image = true;

                // A freshly loaded image invalidates any prior selection.
                let mut effects: Vec<Effect> = self
                    .selection
                    .reduce(selection::Action::Clear)
                    .into_iter()
                    .map(Effect::Selection)
                    .collect();
                effects.push(Effect::RefreshDisplay);
                effects
            }

            Action::FrameCaptured => {
                // Live frames keep the selection so a region can be watched
                // across ticks.
                self.has_image = true;
                vec![Effect::RefreshDisplay]
            }

            Action::SetPreprocess(mode) => {
                // The threshold value is retained even when its control is
                // disabled for the new mode.
                self.preprocess = mode;
                Vec::new()
            }

            Action::SetThreshold(value) => {
                self.threshold = value;
                Vec::new()
            }

            Action::ClearSelection => self
                .selection
                .reduce(selection::Action::Clear)
                .into_iter()
                .map(Effect::Selection)
                .collect(),

            Action::RunOcr => {
                if !self.has_image {
                    return vec![Effect::ShowWarning {
                        message: "Please load an image or start camera first".to_string(),
                    }];
                }
                vec![Effect::ExtractText {
                    roi: self.selection.committed(),
                }]
            }

            Action::RunOcrWithOverlay => {
                if !self.has_image {
                    return vec![Effect::ShowWarning {
                        message: "Please load an image first".to_string(),
                    }];
                }
                vec![Effect::ExtractWords {
                    roi: self.selection.committed(),
                }]
            }
        }
    }
}
