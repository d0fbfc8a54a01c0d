/// Platform-neutral rectangle in pixel coordinates (origin + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectPx {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RectPx {
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Construct the normalized bounding box of two points.
    ///
    /// The origin is the component-wise minimum and the size the component-wise
    /// absolute difference, so the result is independent of drag direction.
    #[inline]
    pub fn from_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// True when either dimension is zero (a click without movement).
    #[inline]
    pub fn is_zero_sized(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Drag gesture phase.
///
/// The anchor lives inside `Dragging`, so a "dragging without an anchor"
/// state is unrepresentable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Dragging {
        anchor: (i32, i32),
        current: (i32, i32),
    },
}

/// Input actions (pure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Mouse pressed over the canvas.
    MouseDown { x: i32, y: i32 },
    /// Mouse moved. Only meaningful while dragging.
    MouseMove { x: i32, y: i32 },
    /// Mouse released; commits the gesture.
    MouseUp { x: i32, y: i32 },
    /// Discard the committed rectangle and any in-progress drag.
    Clear,
}

/// Effects requested by the model (executed by the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The provisional or committed outline changed; repaint the canvas.
    RequestRedraw,
}

/// Drag-to-select state machine.
///
/// Tracks a single in-progress rectangular gesture and the most recently
/// committed rectangle, both in display pixel coordinates.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
    committed: Option<RectPx>,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Committed rectangle from the last completed drag, if any.
    ///
    /// Zero-size rectangles are legal here; consumers treat them as "no
    /// effective selection" when cropping.
    pub fn committed(&self) -> Option<RectPx> {
        self.committed
    }

    /// In-progress rectangle for visual feedback while dragging.
    pub fn provisional(&self) -> Option<RectPx> {
        match self.phase {
            Phase::Idle => None,
            Phase::Dragging { anchor, current } => {
                Some(RectPx::from_points(anchor.0, anchor.1, current.0, current.1))
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::MouseDown { x, y } => {
                self.phase = Phase::Dragging {
                    anchor: (x, y),
                    current: (x, y),
                };
                Vec::new()
            }

            Action::MouseMove { x, y } => {
                // Moves without a press are ignored.
                if let Phase::Dragging { anchor, .. } = self.phase {
                    self.phase = Phase::Dragging {
                        anchor,
                        current: (x, y),
                    };
                    return vec![Effect::RequestRedraw];
                }
                Vec::new()
            }

            Action::MouseUp { x, y } => {
                if let Phase::Dragging { anchor, .. } = self.phase {
                    self.committed = Some(RectPx::from_points(anchor.0, anchor.1, x, y));
                    self.phase = Phase::Idle;
                    return vec![Effect::RequestRedraw];
                }
                Vec::new()
            }

            Action::Clear => {
                self.phase = Phase::Idle;
                self.committed = None;
                vec![Effect::RequestRedraw]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Effect, Model, Phase, RectPx};

    #[test]
    fn drag_commits_normalized_rect() {
        let mut m = Model::default();
        m.reduce(Action::MouseDown { x: 100, y: 100 });
        m.reduce(Action::MouseMove { x: 200, y: 150 });
        let eff = m.reduce(Action::MouseUp { x: 300, y: 200 });

        assert_eq!(m.committed(), Some(RectPx::new(100, 100, 200, 100)));
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(eff, vec![Effect::RequestRedraw]);
    }

    #[test]
    fn commit_is_independent_of_drag_direction() {
        let corners = [
            ((10, 20), (110, 220)),
            ((110, 20), (10, 220)),
            ((10, 220), (110, 20)),
            ((110, 220), (10, 20)),
        ];

        for (down, up) in corners {
            let mut m = Model::default();
            m.reduce(Action::MouseDown {
                x: down.0,
                y: down.1,
            });
            m.reduce(Action::MouseUp { x: up.0, y: up.1 });
            assert_eq!(m.committed(), Some(RectPx::new(10, 20, 100, 200)));
        }
    }

    #[test]
    fn release_without_movement_commits_zero_size_rect() {
        let mut m = Model::default();
        m.reduce(Action::MouseDown { x: 50, y: 60 });
        m.reduce(Action::MouseUp { x: 50, y: 60 });

        let rect = m.committed().unwrap();
        assert_eq!(rect, RectPx::new(50, 60, 0, 0));
        assert!(rect.is_zero_sized());
    }

    #[test]
    fn provisional_tracks_drag_and_clears_on_release() {
        let mut m = Model::default();
        assert_eq!(m.provisional(), None);

        m.reduce(Action::MouseDown { x: 0, y: 0 });
        m.reduce(Action::MouseMove { x: 40, y: 30 });
        assert_eq!(m.provisional(), Some(RectPx::new(0, 0, 40, 30)));
        assert!(m.is_dragging());

        m.reduce(Action::MouseUp { x: 40, y: 30 });
        assert_eq!(m.provisional(), None);
        assert!(!m.is_dragging());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut m = Model::default();
        let eff = m.reduce(Action::MouseMove { x: 5, y: 5 });
        assert!(eff.is_empty());
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.committed(), None);
    }

    #[test]
    fn clear_resets_committed_and_drag_state() {
        let mut m = Model::default();
        m.reduce(Action::MouseDown { x: 0, y: 0 });
        m.reduce(Action::MouseUp { x: 100, y: 100 });
        assert!(m.committed().is_some());

        let eff = m.reduce(Action::Clear);
        assert_eq!(m.committed(), None);
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(eff, vec![Effect::RequestRedraw]);
    }
}
