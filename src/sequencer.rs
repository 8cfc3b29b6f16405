// Spin sequencer: staggered per-reel timing and single-shot completion
//
// One spin drives every reel through the same shape: mount the strip
// (current window + filler + final window), start the scroll after a per-reel
// stagger, settle the reel once its own transition has elapsed, and fire the
// global completion strictly after the last reel settles. The controller's
// `spinning` flag is held for the whole sequence, so a second spin request is
// dropped rather than queued.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::reel::WINDOW_SIZE;
use crate::surface::RenderSurface;
use crate::types::{ReelWindow, SpinOutcome};
use crate::widget::WidgetInner;
use crate::win;

/// Cosmetic symbols inserted between the old and the final window
pub const FILLER_SYMBOLS_PER_SPIN: usize = 20;

/// Delay before the first reel starts scrolling
pub const BASE_START_DELAY_MS: u32 = 100;
/// Additional start delay per reel index
pub const PER_REEL_START_STEP_MS: u32 = 50;
/// Scroll duration of the first reel
pub const BASE_DURATION_MS: u32 = 2_000;
/// Additional scroll duration per reel index; later reels settle later
pub const PER_REEL_DURATION_STEP_MS: u32 = 200;
/// Gap between a reel's transition end and its settle
pub const SETTLE_BUFFER_MS: u32 = 100;
/// Gap between the last transition end and the global completion step
pub const COMPLETION_BUFFER_MS: u32 = 500;
/// How long the win line stays visible
pub const WIN_LINE_DISPLAY_MS: u32 = 4_000;

/// Slot height used when the surface cannot measure its layout
pub const FALLBACK_SLOT_SIZE_PX: f64 = 120.0;

/// Timing of one reel within a spin, relative to the spin trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReelTiming {
    pub start_at_ms: u32,
    pub duration_ms: u32,
    pub settle_at_ms: u32,
}

impl ReelTiming {
    fn for_index(index: usize) -> ReelTiming {
        let index = index as u32;
        let start_at_ms = BASE_START_DELAY_MS + index * PER_REEL_START_STEP_MS;
        let duration_ms = BASE_DURATION_MS + index * PER_REEL_DURATION_STEP_MS;
        ReelTiming {
            start_at_ms,
            duration_ms,
            settle_at_ms: start_at_ms + duration_ms + SETTLE_BUFFER_MS,
        }
    }
}

/// Complete timing plan for one spin.
///
/// The completion deadline belongs to the last reel and is strictly after
/// every reel's settle, so the finished callback always observes fully
/// settled windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinPlan {
    pub reels: Vec<ReelTiming>,
    pub complete_at_ms: u32,
}

impl SpinPlan {
    pub fn new(reel_count: usize) -> SpinPlan {
        assert!(reel_count >= 1, "a spin needs at least one reel");
        let reels: Vec<ReelTiming> = (0..reel_count).map(ReelTiming::for_index).collect();
        let last = reels[reel_count - 1];
        SpinPlan {
            reels,
            complete_at_ms: last.start_at_ms + last.duration_ms + COMPLETION_BUFFER_MS,
        }
    }
}

/// Pad caller-supplied results up to `reel_count` windows.
///
/// Reels beyond the supplied entries reuse entry 0; this is the documented
/// fallback for short result arrays, not an error.
pub fn pad_results(results: &[ReelWindow], reel_count: usize) -> Vec<ReelWindow> {
    (0..reel_count)
        .map(|i| results.get(i).unwrap_or(&results[0]).clone())
        .collect()
}

/// Drive one full spin. Assumes the caller verified `results` is non-empty.
///
/// Returns without touching any state when a spin is already in flight or
/// the widget was removed (the requested callback runs unborrowed and may
/// have torn the widget down before results arrive).
pub(crate) fn run_spin<S: RenderSurface + 'static>(
    handle: &Rc<RefCell<WidgetInner<S>>>,
    results: &[ReelWindow],
) {
    let weak: Weak<RefCell<WidgetInner<S>>> = Rc::downgrade(handle);

    let mut guard = handle.borrow_mut();
    let inner = &mut *guard;
    if !inner.alive || inner.spinning || results.is_empty() {
        return;
    }
    inner.spinning = true;
    inner.surface.set_spin_enabled(false);

    let generation = inner.generation;
    let reel_count = inner.config.reel_count;
    let finals = pad_results(results, reel_count);
    let plan = SpinPlan::new(reel_count);
    let slot_size = {
        let measured = inner.surface.slot_size();
        if measured > 0.0 {
            measured
        } else {
            FALLBACK_SLOT_SIZE_PX
        }
    };

    for (index, timing) in plan.reels.iter().enumerate() {
        let final_window = finals[index].clone();
        let sequence = inner.reels[index].build_spin_sequence(
            &inner.config.symbols,
            FILLER_SYMBOLS_PER_SPIN,
            &final_window,
            &mut inner.rng,
        );
        inner.reels[index].begin_animation();

        let resolved: Vec<_> = sequence
            .iter()
            .map(|id| inner.config.symbols.resolve(id))
            .collect();
        inner.surface.set_strip(index, &resolved);
        inner.surface.end_spin(index, 0.0);

        // Scroll so the last three symbols land in the window
        let offset_px = -((sequence.len() - WINDOW_SIZE) as f64 * slot_size);

        let start = guarded(&weak, generation, {
            let duration_ms = timing.duration_ms;
            move |inner: &mut WidgetInner<S>| {
                inner.surface.begin_spin(index, offset_px, duration_ms);
            }
        });
        inner.scheduler.schedule_ms(timing.start_at_ms, start);

        let settle = guarded(&weak, generation, move |inner: &mut WidgetInner<S>| {
            inner.reels[index].settle(final_window);
            inner.surface.end_spin(index, offset_px);
        });
        inner.scheduler.schedule_ms(timing.settle_at_ms, settle);
    }

    let complete = completion_step(&weak, generation);
    inner.scheduler.schedule_ms(plan.complete_at_ms, complete);
}

/// Wrap a state mutation so it no-ops once the widget is removed.
///
/// Scheduled closures hold only a weak handle; a timer that fires after
/// removal (or for a stale generation) must not mutate anything.
fn guarded<S, F>(
    weak: &Weak<RefCell<WidgetInner<S>>>,
    generation: u64,
    body: F,
) -> Box<dyn FnOnce()>
where
    S: RenderSurface + 'static,
    F: FnOnce(&mut WidgetInner<S>) + 'static,
{
    let weak = weak.clone();
    Box::new(move || {
        let Some(handle) = weak.upgrade() else {
            return;
        };
        let mut guard = handle.borrow_mut();
        let inner = &mut *guard;
        if !inner.alive || inner.generation != generation {
            return;
        }
        body(inner);
    })
}

/// The single completion step: release the lock, evaluate the win condition
/// and invoke the finished callback exactly once.
fn completion_step<S: RenderSurface + 'static>(
    weak: &Weak<RefCell<WidgetInner<S>>>,
    generation: u64,
) -> Box<dyn FnOnce()> {
    let weak = weak.clone();
    Box::new(move || {
        let Some(handle) = weak.upgrade() else {
            return;
        };

        let (outcome, finished) = {
            let mut guard = handle.borrow_mut();
            let inner = &mut *guard;
            if !inner.alive || inner.generation != generation {
                return;
            }
            inner.spinning = false;
            inner.surface.set_spin_enabled(true);

            let windows: Vec<ReelWindow> = inner
                .reels
                .iter()
                .map(|reel| reel.current_window().clone())
                .collect();
            let win = win::middle_row_wins(&windows);
            if win {
                inner.surface.show_win_line();
                let hide = guarded(&weak, generation, |inner: &mut WidgetInner<S>| {
                    inner.surface.hide_win_line();
                });
                inner.scheduler.schedule_ms(WIN_LINE_DISPLAY_MS, hide);
            }
            let outcome = SpinOutcome {
                windows,
                win,
                completed_at: crate::utils::now(),
            };
            (outcome, inner.on_spin_finished.clone())
        };

        // Borrow released: the callback is free to trigger the next spin
        if let Some(finished) = finished {
            finished(&outcome);
        }
    })
}
