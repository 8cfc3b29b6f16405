// SlotKit Core - Rust/WASM Implementation
// Copyright 2026 SlotKit Contributors
// Licensed under the Apache License, Version 2.0

//! # SlotKit Core (Rust/WASM)
//!
//! A reusable, themeable slot-machine widget for web pages, compiled to
//! WebAssembly. The caller supplies the results; SlotKit renders the reel
//! grid, animates staggered spins and reports completion.
//!
//! ## Architecture
//!
//! - **SymbolCatalog**: symbol id → glyph/image mapping, random filler source
//! - **Reel**: one animated column with a three-symbol visible window
//! - **Sequencer**: staggered per-reel timing, single-shot completion
//! - **SlotWidget**: configuration, bet state, spin lock, callbacks
//! - **DomSurface / SlotMachine** (wasm32 only): DOM rendering and the
//!   JavaScript-facing handle
//!
//! The core never touches the DOM directly: rendering goes through the
//! [`RenderSurface`] trait and every delay through the [`Scheduler`] trait,
//! so the whole spin pipeline runs under native tests with a manual clock.

// Module declarations
mod catalog;
mod config;
mod reel;
mod scheduler;
mod sequencer;
mod surface;
pub mod theme;
mod types;
mod utils;
mod widget;
mod win;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

// Re-exports
pub use catalog::SymbolCatalog;
pub use config::SlotConfig;
pub use reel::{Reel, ReelState, WINDOW_SIZE};
pub use scheduler::{ManualScheduler, Scheduler};
pub use sequencer::{SpinPlan, FILLER_SYMBOLS_PER_SPIN, WIN_LINE_DISPLAY_MS};
pub use surface::RenderSurface;
pub use theme::Theme;
pub use types::{DisplayRef, ReelWindow, ResolvedSymbol, Result, SlotError, SpinOutcome, SymbolId};
pub use widget::{SlotWidget, SpinFinishedFn, SpinRequestedFn};
pub use win::middle_row_wins;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
#[cfg(target_arch = "wasm32")]
pub use scheduler::TimeoutScheduler;
#[cfg(target_arch = "wasm32")]
pub use wasm::SlotMachine;

// WASM initialization
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Crate version, for feature detection from JavaScript
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
