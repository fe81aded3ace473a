//! Full-page screenshot capture.
//!
//! A [`FullPageCapturer`] drives a [`CaptureDevice`] through an explicit
//! state machine:
//!
//! - measure the page
//! - take a single shot, or scroll and capture viewport tiles one at a time
//! - stitch the tiles into one bounded JPEG
//!
//! Each run happens inside a [`CaptureSession`] that owns the cancellation
//! token and the scroll origin restored on teardown.
//!
//! [`CaptureDevice`]: stackscope_protocols::CaptureDevice

mod capturer;
mod encode;
mod plan;
mod retry;
mod session;
mod state;
mod stitch;

pub use capturer::{CapturedImage, FullPageCapturer};
pub use encode::{data_url, decode_data_url, encode_for_path};
pub use plan::CapturePlan;
pub use retry::RetryPolicy;
pub use session::{CaptureSession, SessionOutcome};
pub use state::CaptureState;
pub use stitch::{Tile, stitch_tiles};
