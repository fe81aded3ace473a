//! Capture state machine.

use std::fmt;

/// Phase of a capture run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    MeasuringPage,
    SingleShot,
    TiledCapture,
    Stitching,
    Done,
    Failed,
}

impl CaptureState {
    /// Whether `next` is a legal successor of this state.
    ///
    /// `Failed` is reachable from every non-terminal state. A failed run may
    /// re-enter `SingleShot` once as its fallback.
    pub fn can_transition_to(self, next: CaptureState) -> bool {
        use CaptureState::*;
        match (self, next) {
            (Idle, MeasuringPage) => true,
            (MeasuringPage, SingleShot | TiledCapture) => true,
            (TiledCapture, Stitching) => true,
            (SingleShot | Stitching, Done) => true,
            (Failed, SingleShot) => true,
            (Done | Failed, _) => false,
            (_, Failed) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CaptureState::Done | CaptureState::Failed)
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureState::Idle => "idle",
            CaptureState::MeasuringPage => "measuring_page",
            CaptureState::SingleShot => "single_shot",
            CaptureState::TiledCapture => "tiled_capture",
            CaptureState::Stitching => "stitching",
            CaptureState::Done => "done",
            CaptureState::Failed => "failed",
        };
        f.write_str(name)
    }
}
