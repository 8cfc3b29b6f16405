// Rendering surface abstraction
//
// The sequencer and controller only talk to this trait, so the whole spin
// pipeline is unit-testable without a browser. The DOM implementation lives
// in `dom` and is only compiled for wasm32.

use crate::theme::Theme;
use crate::types::ResolvedSymbol;

/// Everything the widget core needs from a rendering backend.
///
/// Implementations use interior mutability where needed; the core always
/// calls through a shared reference since scheduled closures hold the
/// surface alongside the widget state.
pub trait RenderSurface {
    /// Create `count` empty reel columns. Called once at construction.
    fn mount_reels(&self, count: usize);

    /// Replace the full strip content of one reel
    fn set_strip(&self, reel: usize, symbols: &[ResolvedSymbol]);

    /// Height of one symbol slot in pixels, measured from layout
    fn slot_size(&self) -> f64;

    /// Start the scroll transition of one reel to `offset_px` over
    /// `duration_ms` milliseconds
    fn begin_spin(&self, reel: usize, offset_px: f64, duration_ms: u32);

    /// Freeze the strip at its final offset, ending the transition
    fn end_spin(&self, reel: usize, offset_px: f64);

    /// Enable or disable the spin trigger while a spin is in flight
    fn set_spin_enabled(&self, enabled: bool);

    /// Update the displayed bet amount
    fn set_bet(&self, amount: u64);

    /// Update the displayed balance (presentation passthrough)
    fn set_balance(&self, amount: f64);

    /// Show the pulsing win line across the middle row
    fn show_win_line(&self);

    /// Remove the win line again
    fn hide_win_line(&self);

    /// Apply a theme's CSS custom properties wholesale
    fn apply_theme(&self, theme: &Theme);

    /// Tear down everything this surface rendered
    fn clear(&self);
}
