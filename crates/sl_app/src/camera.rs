/// Frame-poll period while capturing, in milliseconds.
pub const FRAME_PERIOD_MS: u64 = 30;

/// Capture device index opened on toggle.
pub const DEFAULT_DEVICE_INDEX: i32 = 0;

/// Camera lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No device held, no frame timer running.
    #[default]
    Idle,
    /// Device open, frame timer ticking.
    Capturing,
}

/// Input actions (pure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The single start/stop button was pressed.
    Toggle,
    /// Host successfully opened the capture device.
    DeviceOpened,
    /// Host failed to open the capture device; it has already reported the
    /// error to the user.
    DeviceOpenFailed,
}

/// Effects requested by the model (executed by the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Open the capture device; feed back `DeviceOpened` / `DeviceOpenFailed`.
    OpenDevice { index: i32 },
    /// Start the periodic frame-read timer.
    StartFrameTimer { period_ms: u64 },
    /// Stop the frame-read timer.
    StopFrameTimer,
    /// Release the capture device.
    ReleaseDevice,
}

/// Camera capture state machine.
///
/// The device itself is owned by the host; the model only decides when it is
/// opened and released, so the idle/capturing transitions stay guarded in one
/// place.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_capturing(&self) -> bool {
        self.phase == Phase::Capturing
    }

    /// Label for the toggle button, reflecting the current state.
    pub fn button_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "Start Camera",
            Phase::Capturing => "Stop Camera",
        }
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Toggle => match self.phase {
                // The phase flips only once the host confirms the device
                // opened, so a failed open leaves the model untouched.
                Phase::Idle => vec![Effect::OpenDevice {
                    index: DEFAULT_DEVICE_INDEX,
                }],
                Phase::Capturing => {
                    self.phase = Phase::Idle;
                    vec![Effect::StopFrameTimer, Effect::ReleaseDevice]
                }
            },

            Action::DeviceOpened => {
                self.phase = Phase::Capturing;
                vec![Effect::StartFrameTimer {
                    period_ms: FRAME_PERIOD_MS,
                }]
            }

            Action::DeviceOpenFailed => {
                self.phase = Phase::Idle;
                Vec::new()
            }
        }
    }
}
