// Reel: one vertical strip of symbol slots

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::SymbolCatalog;
use crate::types::{ReelWindow, SymbolId};

/// Number of symbols visible in a reel window (top, middle, bottom)
pub const WINDOW_SIZE: usize = 3;

/// Animation state of a single reel: Idle -> Animating -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReelState {
    Idle,
    Animating,
}

/// One reel column. Owns its visible window and animation state.
///
/// Reels are created with the widget and persist for its lifetime; a spin
/// replaces the window via [`settle`](Self::settle) once the strip transition
/// has visually finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reel {
    visible: ReelWindow,
    state: ReelState,
}

impl Reel {
    /// Create a reel showing three random symbols from the catalog
    pub fn with_random_window<R: Rng + ?Sized>(catalog: &SymbolCatalog, rng: &mut R) -> Reel {
        let visible = [
            catalog.random_symbol_id(rng).clone(),
            catalog.random_symbol_id(rng).clone(),
            catalog.random_symbol_id(rng).clone(),
        ];
        Reel {
            visible,
            state: ReelState::Idle,
        }
    }

    pub fn with_window(window: ReelWindow) -> Reel {
        Reel {
            visible: window,
            state: ReelState::Idle,
        }
    }

    /// Snapshot of the currently visible symbols
    pub fn current_window(&self) -> &ReelWindow {
        &self.visible
    }

    pub fn is_animating(&self) -> bool {
        self.state == ReelState::Animating
    }

    /// Build the ordered strip content for one spin:
    /// current window ++ `filler_count` random symbols ++ final window.
    ///
    /// Length is always `WINDOW_SIZE + filler_count + WINDOW_SIZE`. Filler
    /// symbols are drawn independently, repeats allowed; they are cosmetic
    /// and never part of the result.
    pub fn build_spin_sequence<R: Rng + ?Sized>(
        &self,
        catalog: &SymbolCatalog,
        filler_count: usize,
        final_window: &ReelWindow,
        rng: &mut R,
    ) -> Vec<SymbolId> {
        let mut sequence = Vec::with_capacity(WINDOW_SIZE + filler_count + WINDOW_SIZE);
        sequence.extend(self.visible.iter().cloned());
        for _ in 0..filler_count {
            sequence.push(catalog.random_symbol_id(rng).clone());
        }
        sequence.extend(final_window.iter().cloned());
        sequence
    }

    /// Enter the Animating state. Only valid from Idle; the sequencer's
    /// global lock guarantees no reel is asked to animate twice.
    pub fn begin_animation(&mut self) {
        debug_assert_eq!(self.state, ReelState::Idle);
        self.state = ReelState::Animating;
    }

    /// Fix the visible window to the spin's final result and return to Idle.
    /// Called exactly once per spin, after the transition duration elapses.
    pub fn settle(&mut self, final_window: ReelWindow) {
        self.visible = final_window;
        self.state = ReelState::Idle;
    }
}
