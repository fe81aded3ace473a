//! JavaScript evaluation.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;

use super::core::PageSession;

/// Message of a thrown exception, preferring the exception's description.
fn exception_message(details: &Value) -> String {
    details["exception"]["description"]
        .as_str()
        .or_else(|| details["text"].as_str())
        .unwrap_or("Unknown error")
        .to_string()
}

impl PageSession {
    /// Evaluate an expression and return its value by value, awaiting
    /// promises.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            return Err(CdpError::JavaScript(exception_message(exception)));
        }

        Ok(result["result"]["value"].clone())
    }
}
