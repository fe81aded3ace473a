//! DOM snapshot of a live page.
//!
//! One `Runtime.evaluate` serializes everything the extractors read into a
//! [`DomSnapshot`]; extraction then runs without further CDP traffic.

use serde_json::json;
use stackscope_extract::{DomSnapshot, fully_scanned_selector, probed_globals};
use tracing::{debug, warn};

use crate::cdp::{CdpError, PageSession};

/// Load the snapshot script (a function of `maxElements`, `probedGlobals`
/// and `fullyScannedSelector`).
fn snapshot_script() -> &'static str {
    include_str!("snapshot_script.js")
}

/// Expression invoking the snapshot script.
pub(crate) fn snapshot_expression(max_elements: usize) -> String {
    format!(
        "({})({}, {}, {})",
        snapshot_script().trim_end(),
        max_elements,
        json!(probed_globals()),
        json!(fully_scanned_selector())
    )
}

impl PageSession {
    /// Serialize the page into a [`DomSnapshot`].
    ///
    /// Keeps the first `max_elements` elements in document order plus every
    /// element matching [`fully_scanned_selector`] and its ancestors.
    pub async fn snapshot(&self, max_elements: usize) -> Result<DomSnapshot, CdpError> {
        let value = self.evaluate(&snapshot_expression(max_elements)).await?;
        let json = value.as_str().ok_or_else(|| {
            CdpError::InvalidResponse("Snapshot script returned no JSON".to_string())
        })?;
        let snapshot = DomSnapshot::from_json(json)?;
        if snapshot.skipped_elements > 0 {
            warn!(
                kept = snapshot.elements.len(),
                skipped = snapshot.skipped_elements,
                "Page exceeds the snapshot element cap; general scans see only the kept elements"
            );
        }

        debug!(
            url = %snapshot.url,
            elements = snapshot.elements.len(),
            style_sheets = snapshot.style_sheets.len(),
            "Captured DOM snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
