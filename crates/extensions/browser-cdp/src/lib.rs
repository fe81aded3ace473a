//! Chrome DevTools Protocol backend for stackscope.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │    stackscope   │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │  (user's browser)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Start Chrome with remote debugging enabled:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! A [`BrowserManager`] opens the page, [`PageSession::snapshot`] turns it
//! into a [`DomSnapshot`](stackscope_extract::DomSnapshot) for extraction,
//! and [`CdpCaptureDevice`] drives scrolling and viewport screenshots for
//! the full-page capturer.

pub mod cdp;
mod device;
mod load_retry;
pub mod manager;
mod snapshot;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use device::CdpCaptureDevice;
pub use manager::{BrowserError, BrowserManager, BrowserPage};
