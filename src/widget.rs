// Widget controller: configuration, bet state, spin lock, callbacks

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::SlotConfig;
use crate::reel::{Reel, WINDOW_SIZE};
use crate::scheduler::Scheduler;
use crate::sequencer;
use crate::surface::RenderSurface;
use crate::types::{ReelWindow, Result, SpinOutcome, SymbolId};

/// Supplies the final windows for a spin; `None` or an empty list drops the
/// request silently
pub type SpinRequestedFn = Rc<dyn Fn() -> Option<Vec<Vec<SymbolId>>>>;

/// Invoked exactly once per completed spin, after every reel has settled
pub type SpinFinishedFn = Rc<dyn Fn(&SpinOutcome)>;

/// Mutable widget state shared with scheduled closures
pub(crate) struct WidgetInner<S: RenderSurface> {
    pub(crate) config: SlotConfig,
    pub(crate) surface: S,
    pub(crate) scheduler: Rc<dyn Scheduler>,
    pub(crate) reels: Vec<Reel>,
    pub(crate) rng: SmallRng,
    pub(crate) current_bet: u64,
    pub(crate) spinning: bool,
    pub(crate) alive: bool,
    /// Bumped on removal; scheduled closures compare against the value they
    /// captured and no-op on mismatch
    pub(crate) generation: u64,
    pub(crate) on_spin_requested: Option<SpinRequestedFn>,
    pub(crate) on_spin_finished: Option<SpinFinishedFn>,
}

/// The slot machine widget.
///
/// Owns its reels, timers and callbacks exclusively; instances are fully
/// independent and a handle stays safe to call after [`remove`](Self::remove)
/// (every operation becomes a no-op).
pub struct SlotWidget<S: RenderSurface + 'static> {
    inner: Rc<RefCell<WidgetInner<S>>>,
}

// Clones share the same widget; used by event listener closures
impl<S: RenderSurface + 'static> Clone for SlotWidget<S> {
    fn clone(&self) -> Self {
        SlotWidget {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: RenderSurface + 'static> SlotWidget<S> {
    /// Create a widget on the given surface.
    ///
    /// Validates the configuration, mounts the reel columns, applies the
    /// theme and seeds every reel with three random symbols. The bet starts
    /// at `min_bet`.
    pub fn new(surface: S, scheduler: Rc<dyn Scheduler>, config: SlotConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = SmallRng::from_entropy();
        let reels: Vec<Reel> = (0..config.reel_count)
            .map(|_| Reel::with_random_window(&config.symbols, &mut rng))
            .collect();

        surface.apply_theme(&config.theme);
        surface.mount_reels(config.reel_count);
        for (index, reel) in reels.iter().enumerate() {
            let resolved: Vec<_> = reel
                .current_window()
                .iter()
                .map(|id| config.symbols.resolve(id))
                .collect();
            surface.set_strip(index, &resolved);
        }
        surface.set_bet(config.min_bet);

        let inner = WidgetInner {
            current_bet: config.min_bet,
            config,
            surface,
            scheduler,
            reels,
            rng,
            spinning: false,
            alive: true,
            generation: 0,
            on_spin_requested: None,
            on_spin_finished: None,
        };
        Ok(SlotWidget {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Register the callback that supplies spin results. Replaces any
    /// previous registration; without one, `spin()` is a no-op.
    pub fn on_spin_requested(&self, callback: SpinRequestedFn) {
        let mut inner = self.inner.borrow_mut();
        if inner.alive {
            inner.on_spin_requested = Some(callback);
        }
    }

    /// Register the callback invoked once per completed spin
    pub fn on_spin_finished(&self, callback: SpinFinishedFn) {
        let mut inner = self.inner.borrow_mut();
        if inner.alive {
            inner.on_spin_finished = Some(callback);
        }
    }

    /// Trigger a spin.
    ///
    /// Asks the registered callback for results and hands them to the
    /// sequencer. No callback, a malformed result, or a spin already in
    /// flight all drop the request silently.
    pub fn spin(&self) {
        let requested = {
            let inner = self.inner.borrow();
            if !inner.alive || inner.spinning {
                return;
            }
            match &inner.on_spin_requested {
                Some(callback) => Rc::clone(callback),
                None => return,
            }
        };

        // Borrow released: the callback may inspect the widget
        let Some(raw) = requested() else {
            return;
        };
        let Some(results) = normalize_results(raw) else {
            return;
        };

        sequencer::run_spin(&self.inner, &results);
    }

    /// Step the bet up by the configured increment, clamped to `max_bet`
    pub fn increase_bet(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.alive {
            return;
        }
        let next = inner
            .current_bet
            .saturating_add(inner.config.bet_increment)
            .min(inner.config.max_bet);
        if next != inner.current_bet {
            inner.current_bet = next;
            inner.surface.set_bet(next);
        }
    }

    /// Step the bet down by the configured increment, clamped to `min_bet`
    pub fn decrease_bet(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.alive {
            return;
        }
        let next = inner
            .current_bet
            .saturating_sub(inner.config.bet_increment)
            .max(inner.config.min_bet);
        if next != inner.current_bet {
            inner.current_bet = next;
            inner.surface.set_bet(next);
        }
    }

    /// Jump straight to the maximum bet
    pub fn set_max_bet(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.alive {
            return;
        }
        let max = inner.config.max_bet;
        inner.current_bet = max;
        inner.surface.set_bet(max);
    }

    /// Update the displayed balance. Presentation passthrough only.
    pub fn set_balance(&self, amount: f64) {
        let inner = self.inner.borrow();
        if inner.alive {
            inner.surface.set_balance(amount);
        }
    }

    pub fn current_bet(&self) -> u64 {
        self.inner.borrow().current_bet
    }

    pub fn is_spinning(&self) -> bool {
        self.inner.borrow().spinning
    }

    /// Final windows of all reels, left to right
    pub fn windows(&self) -> Vec<ReelWindow> {
        self.inner
            .borrow()
            .reels
            .iter()
            .map(|reel| reel.current_window().clone())
            .collect()
    }

    /// Run a closure against the rendering surface (e.g. for event wiring)
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    /// Tear down the widget.
    ///
    /// Clears the surface, drops both callbacks and bumps the generation so
    /// any timers still pending from an in-flight spin fire as no-ops.
    /// Idempotent; every later call on the handle is a no-op.
    pub fn remove(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.alive {
            return;
        }
        inner.alive = false;
        inner.generation += 1;
        inner.spinning = false;
        inner.on_spin_requested = None;
        inner.on_spin_finished = None;
        inner.surface.clear();
    }
}

/// Shape-check raw callback results into fixed-size windows.
///
/// An empty outer list is malformed and drops the spin. Individual windows
/// are normalized to exactly three symbols: longer ones are truncated,
/// shorter non-empty ones repeat their last symbol, an empty one is
/// malformed.
fn normalize_results(raw: Vec<Vec<SymbolId>>) -> Option<Vec<ReelWindow>> {
    if raw.is_empty() {
        return None;
    }
    let mut windows = Vec::with_capacity(raw.len());
    for mut entry in raw {
        if entry.is_empty() {
            return None;
        }
        while entry.len() < WINDOW_SIZE {
            entry.push(entry.last().cloned().unwrap());
        }
        entry.truncate(WINDOW_SIZE);
        let window: ReelWindow = match entry.try_into() {
            Ok(window) => window,
            Err(_) => return None,
        };
        windows.push(window);
    }
    Some(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SymbolCatalog;
    use crate::scheduler::ManualScheduler;
    use crate::sequencer::{SpinPlan, WIN_LINE_DISPLAY_MS};
    use crate::surface::testing::{RecordingSurface, SurfaceCall};

    fn test_config(reel_count: usize) -> SlotConfig {
        SlotConfig {
            reel_count,
            ..SlotConfig::default()
        }
    }

    struct Fixture {
        widget: SlotWidget<RecordingSurface>,
        surface: RecordingSurface,
        scheduler: ManualScheduler,
    }

    fn fixture(config: SlotConfig) -> Fixture {
        let surface = RecordingSurface::new();
        let scheduler = ManualScheduler::new();
        let widget = SlotWidget::new(
            surface.clone(),
            Rc::new(scheduler.clone()),
            config,
        )
        .unwrap();
        Fixture {
            widget,
            surface,
            scheduler,
        }
    }

    fn fixed_results(windows: &[[&str; 3]]) -> SpinRequestedFn {
        let windows: Vec<Vec<SymbolId>> = windows
            .iter()
            .map(|w| w.iter().map(|s| s.to_string()).collect())
            .collect();
        Rc::new(move || Some(windows.clone()))
    }

    fn finish_counter(widget: &SlotWidget<RecordingSurface>) -> Rc<RefCell<Vec<SpinOutcome>>> {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outcomes);
        widget.on_spin_finished(Rc::new(move |outcome: &SpinOutcome| {
            sink.borrow_mut().push(outcome.clone());
        }));
        outcomes
    }

    #[test]
    fn test_construction_mounts_and_seeds_reels() {
        let f = fixture(test_config(3));

        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::MountReels(3))), 1);
        assert_eq!(
            f.surface.count(|c| matches!(c, SurfaceCall::SetStrip { .. })),
            3
        );
        assert_eq!(f.widget.current_bet(), 1);
        assert!(!f.widget.is_spinning());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let surface = RecordingSurface::new();
        let scheduler: Rc<dyn Scheduler> = Rc::new(ManualScheduler::new());
        let config = SlotConfig {
            symbols: SymbolCatalog::new(Vec::new()),
            ..SlotConfig::default()
        };
        assert!(SlotWidget::new(surface, scheduler, config).is_err());
    }

    #[test]
    fn test_spin_without_callback_is_noop() {
        let f = fixture(test_config(3));
        f.widget.spin();

        assert!(!f.widget.is_spinning());
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_spin_with_malformed_results_is_noop() {
        let f = fixture(test_config(3));
        f.widget.on_spin_requested(Rc::new(|| None));
        f.widget.spin();
        assert!(!f.widget.is_spinning());

        f.widget.on_spin_requested(Rc::new(|| Some(Vec::new())));
        f.widget.spin();
        assert!(!f.widget.is_spinning());

        f.widget
            .on_spin_requested(Rc::new(|| Some(vec![Vec::new()])));
        f.widget.spin();
        assert!(!f.widget.is_spinning());
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_spin_finishes_exactly_once() {
        let f = fixture(test_config(3));
        f.widget.on_spin_requested(fixed_results(&[
            ["apple", "bell", "cherry"],
            ["lemon", "bell", "star"],
            ["coin", "bell", "seven"],
        ]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        assert!(f.widget.is_spinning());

        f.scheduler.run_all();

        assert!(!f.widget.is_spinning());
        assert_eq!(outcomes.borrow().len(), 1);
        let outcome = &outcomes.borrow()[0];
        assert!(outcome.win);
        assert_eq!(outcome.windows.len(), 3);
        assert_eq!(outcome.windows[1][1], "bell");
    }

    #[test]
    fn test_completion_fires_after_every_settle() {
        let f = fixture(test_config(4));
        f.widget
            .on_spin_requested(fixed_results(&[["apple", "bell", "cherry"]]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        let plan = SpinPlan::new(4);

        // One tick before completion: every reel has settled, nothing fired
        f.scheduler.advance_to(u64::from(plan.complete_at_ms) - 1);
        assert!(outcomes.borrow().is_empty());
        assert_eq!(
            f.surface.count(|c| matches!(c, SurfaceCall::EndSpin { .. })),
            4 + 4 // one offset reset per reel at spin start, one per settle
        );
        assert!(f.widget.is_spinning());

        f.scheduler.advance_to(u64::from(plan.complete_at_ms));
        assert_eq!(outcomes.borrow().len(), 1);
        assert!(!f.widget.is_spinning());
    }

    #[test]
    fn test_second_spin_during_flight_is_dropped() {
        let f = fixture(test_config(3));
        let calls = Rc::new(RefCell::new(0));
        {
            let calls = Rc::clone(&calls);
            f.widget.on_spin_requested(Rc::new(move || {
                *calls.borrow_mut() += 1;
                Some(vec![vec![
                    "apple".to_string(),
                    "bell".to_string(),
                    "cherry".to_string(),
                ]])
            }));
        }
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        let pending_after_first = f.scheduler.pending();
        let bet_before = f.widget.current_bet();

        f.widget.spin(); // dropped: lock is held, callback not even invoked

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(f.scheduler.pending(), pending_after_first);
        assert_eq!(f.widget.current_bet(), bet_before);

        f.scheduler.run_all();
        assert_eq!(outcomes.borrow().len(), 1);
    }

    #[test]
    fn test_spin_allowed_again_after_completion() {
        let f = fixture(test_config(2));
        f.widget
            .on_spin_requested(fixed_results(&[["apple", "bell", "cherry"]]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        f.scheduler.run_all();
        f.widget.spin();
        f.scheduler.run_all();

        assert_eq!(outcomes.borrow().len(), 2);
    }

    #[test]
    fn test_short_results_padded_from_first_entry() {
        let f = fixture(test_config(5));
        f.widget.on_spin_requested(fixed_results(&[
            ["apple", "bell", "cherry"],
            ["lemon", "star", "coin"],
        ]));
        finish_counter(&f.widget);

        f.widget.spin();
        f.scheduler.run_all();

        let windows = f.widget.windows();
        assert_eq!(windows[0], ["apple", "bell", "cherry"].map(String::from));
        assert_eq!(windows[1], ["lemon", "star", "coin"].map(String::from));
        for padded in &windows[2..] {
            assert_eq!(padded, &["apple", "bell", "cherry"].map(String::from));
        }
    }

    #[test]
    fn test_unknown_symbols_render_without_failure() {
        let f = fixture(test_config(2));
        f.widget
            .on_spin_requested(fixed_results(&[["not-in-catalog", "also-missing", "apple"]]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        f.scheduler.run_all();

        assert_eq!(outcomes.borrow().len(), 1);
        assert_eq!(f.widget.windows()[0][0], "not-in-catalog");
    }

    #[test]
    fn test_bet_clamping_idempotent() {
        let f = fixture(SlotConfig {
            min_bet: 5,
            max_bet: 20,
            bet_increment: 10,
            ..test_config(3)
        });

        assert_eq!(f.widget.current_bet(), 5);
        f.widget.increase_bet();
        assert_eq!(f.widget.current_bet(), 15);
        f.widget.increase_bet();
        f.widget.increase_bet();
        f.widget.increase_bet();
        assert_eq!(f.widget.current_bet(), 20);

        f.widget.decrease_bet();
        assert_eq!(f.widget.current_bet(), 10);
        f.widget.decrease_bet();
        f.widget.decrease_bet();
        f.widget.decrease_bet();
        assert_eq!(f.widget.current_bet(), 5);

        f.widget.set_max_bet();
        assert_eq!(f.widget.current_bet(), 20);
    }

    #[test]
    fn test_no_win_line_on_losing_spin() {
        let f = fixture(test_config(2));
        f.widget.on_spin_requested(fixed_results(&[
            ["apple", "bell", "cherry"],
            ["apple", "star", "cherry"],
        ]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        f.scheduler.run_all();

        assert!(!outcomes.borrow()[0].win);
        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::ShowWinLine)), 0);
    }

    #[test]
    fn test_win_line_shown_then_hidden() {
        let f = fixture(test_config(2));
        f.widget.on_spin_requested(fixed_results(&[
            ["apple", "bell", "cherry"],
            ["lemon", "bell", "star"],
        ]));
        finish_counter(&f.widget);

        f.widget.spin();
        let complete_at = u64::from(SpinPlan::new(2).complete_at_ms);
        f.scheduler.advance_to(complete_at);

        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::ShowWinLine)), 1);
        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::HideWinLine)), 0);

        f.scheduler.advance_by(u64::from(WIN_LINE_DISPLAY_MS));
        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::HideWinLine)), 1);
    }

    #[test]
    fn test_remove_mid_spin_suppresses_pending_timers() {
        let f = fixture(test_config(3));
        f.widget
            .on_spin_requested(fixed_results(&[["apple", "bell", "cherry"]]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        assert!(f.scheduler.pending() > 0);

        f.widget.remove();
        let calls_at_removal = f.surface.calls().len();

        // Late timers must neither fire callbacks nor touch the surface
        f.scheduler.run_all();

        assert!(outcomes.borrow().is_empty());
        assert_eq!(f.surface.calls().len(), calls_at_removal);
    }

    #[test]
    fn test_remove_is_idempotent_and_disables_everything() {
        let f = fixture(test_config(2));
        f.widget.remove();
        f.widget.remove();

        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::Clear)), 1);

        let bet = f.widget.current_bet();
        f.widget.increase_bet();
        assert_eq!(f.widget.current_bet(), bet);

        f.widget
            .on_spin_requested(fixed_results(&[["apple", "bell", "cherry"]]));
        f.widget.spin();
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_remove_inside_requested_callback_drops_spin() {
        let f = fixture(test_config(3));
        {
            let widget = f.widget.clone();
            f.widget.on_spin_requested(Rc::new(move || {
                widget.remove();
                Some(vec![vec![
                    "apple".to_string(),
                    "bell".to_string(),
                    "cherry".to_string(),
                ]])
            }));
        }
        let outcomes = finish_counter(&f.widget);

        let calls_before = f.surface.calls().len();
        f.widget.spin();

        // The lock must not be taken on a torn-down widget
        assert!(!f.widget.is_spinning());
        assert_eq!(f.scheduler.pending(), 0);
        // Only the removal's clear touched the surface
        assert_eq!(f.surface.calls().len(), calls_before + 1);
        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::Clear)), 1);

        f.scheduler.run_all();
        assert!(outcomes.borrow().is_empty());
    }

    #[test]
    fn test_finished_callback_can_restart_spin() {
        let f = fixture(test_config(2));
        f.widget
            .on_spin_requested(fixed_results(&[["apple", "bell", "cherry"]]));

        let widget_inner = Rc::clone(&f.widget.inner);
        let restarted = Rc::new(RefCell::new(false));
        {
            let restarted = Rc::clone(&restarted);
            f.widget.on_spin_finished(Rc::new(move |_| {
                // Completion released the lock before invoking us
                assert!(!widget_inner.borrow().spinning);
                *restarted.borrow_mut() = true;
            }));
        }

        f.widget.spin();
        f.scheduler.run_all();
        assert!(*restarted.borrow());
    }

    #[test]
    fn test_scenario_three_reels_literal_inputs() {
        // create → spinPressed → spin → all timers elapse → finished once
        let f = fixture(SlotConfig {
            symbols: SymbolCatalog::new(vec![
                ("A".to_string(), "a".to_string()),
                ("B".to_string(), "b".to_string()),
            ]),
            ..test_config(3)
        });
        f.widget.on_spin_requested(fixed_results(&[
            ["A", "B", "A"],
            ["B", "B", "B"],
            ["A", "A", "B"],
        ]));
        let outcomes = finish_counter(&f.widget);

        f.widget.spin();
        f.scheduler.run_all();

        assert_eq!(outcomes.borrow().len(), 1);
        // Middle row is B, B, A: not all equal, so no win
        assert!(!outcomes.borrow()[0].win);
        assert_eq!(f.surface.count(|c| matches!(c, SurfaceCall::ShowWinLine)), 0);
    }

    #[test]
    fn test_normalize_results_shapes() {
        let to_vec = |ss: &[&str]| ss.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert!(normalize_results(Vec::new()).is_none());
        assert!(normalize_results(vec![Vec::new()]).is_none());

        // Short windows repeat their last symbol, long ones truncate
        let normalized = normalize_results(vec![to_vec(&["a"]), to_vec(&["a", "b", "c", "d"])])
            .unwrap();
        assert_eq!(normalized[0], ["a", "a", "a"].map(String::from));
        assert_eq!(normalized[1], ["a", "b", "c"].map(String::from));
    }
}
