// Type definitions for SlotKit Core

use serde::{Deserialize, Serialize};

/// Identifier of a symbol in the catalog (e.g. "cherry", "seven")
pub type SymbolId = String;

/// Result type for SlotKit operations
pub type Result<T> = std::result::Result<T, SlotError>;

/// Error types for SlotKit operations
///
/// Only construction-time problems are surfaced as errors. Anomalies on the
/// animation path (short result arrays, unknown symbol ids, timers firing
/// after removal) degrade gracefully and never reach the caller.
#[derive(Debug, thiserror::Error, Clone, Serialize, Deserialize)]
pub enum SlotError {
    #[error("Invalid rendering surface: {0}")]
    InvalidSurface(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// Convert Rust errors to JsValue for the WASM boundary
#[cfg(target_arch = "wasm32")]
impl From<SlotError> for wasm_bindgen::JsValue {
    fn from(err: SlotError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// How a symbol is displayed on a reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayRef {
    /// Inline text glyph (emoji or plain text)
    Glyph(String),
    /// Image URL rendered as an <img> tag
    Image(String),
}

impl DisplayRef {
    /// Classify a raw catalog value as glyph or image reference.
    ///
    /// Anything that looks like a URL or filename ("http..." or containing a
    /// dot) is treated as an image; everything else is an inline glyph.
    pub fn classify(value: &str) -> DisplayRef {
        if value.starts_with("http") || value.contains('.') {
            DisplayRef::Image(value.to_string())
        } else {
            DisplayRef::Glyph(value.to_string())
        }
    }
}

/// A symbol id paired with its resolved display reference, ready to mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    pub id: SymbolId,
    pub display: DisplayRef,
}

/// The visible window of one reel: top, middle, bottom
pub type ReelWindow = [SymbolId; 3];

/// Outcome of one completed spin, handed to the finished callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Final visible window of every reel, left to right
    pub windows: Vec<ReelWindow>,
    /// Whether the middle-row win condition matched
    pub win: bool,
    /// Completion timestamp in milliseconds since epoch
    pub completed_at: i64,
}
