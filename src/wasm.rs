// WASM public API: the JavaScript-facing widget handle
//
// Mirrors the shape of the classic JS library: render into an element or
// selector, register spinPressed/spinFinished callbacks, and drive bets and
// spins from page buttons or script.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::SlotConfig;
use crate::dom::DomSurface;
use crate::scheduler::TimeoutScheduler;
use crate::types::{SlotError, SpinOutcome};
use crate::widget::SlotWidget;

// Version information
#[wasm_bindgen]
pub fn version() -> String {
    crate::version()
}

// Health check for the WASM module
#[wasm_bindgen(js_name = healthCheck)]
pub fn health_check() -> bool {
    true
}

/// JavaScript handle to one slot machine instance
#[wasm_bindgen]
pub struct SlotMachine {
    widget: SlotWidget<DomSurface>,
    // Keeps button listeners alive for the widget's lifetime
    listeners: Vec<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl SlotMachine {
    /// Render a slot machine into `target` (an Element or a CSS selector).
    ///
    /// `options` is a plain object with the usual fields (`reelCount`,
    /// `minBet`, `maxBet`, `betIncrement`, `symbols`, `theme`, `logoUrl`);
    /// pass `undefined` for all defaults. Throws on an invalid target or
    /// configuration.
    #[wasm_bindgen(js_name = render)]
    pub fn render(target: JsValue, options: JsValue) -> Result<SlotMachine, JsValue> {
        let config: SlotConfig = if options.is_undefined() || options.is_null() {
            SlotConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| SlotError::SerializationError(e.to_string()))?
        };
        config.validate()?;

        let surface = if let Some(selector) = target.as_string() {
            DomSurface::mount_selector(&selector, &config)?
        } else {
            let element: Element = target.dyn_into().map_err(|_| {
                SlotError::InvalidSurface(
                    "target must be a DOM element or CSS selector".to_string(),
                )
            })?;
            DomSurface::mount(element, &config)?
        };

        let widget = SlotWidget::new(surface, Rc::new(TimeoutScheduler::new()), config)?;
        let mut machine = SlotMachine {
            widget,
            listeners: Vec::new(),
        };
        machine.bind_buttons();
        Ok(machine)
    }

    /// Register the callback that supplies final symbols per reel.
    ///
    /// The callback must return an array of arrays of symbol ids (one inner
    /// array of three per reel); any other return value drops the spin.
    #[wasm_bindgen(js_name = spinPressed)]
    pub fn spin_pressed(&self, callback: js_sys::Function) {
        self.widget.on_spin_requested(Rc::new(move || {
            let value = callback.call0(&JsValue::NULL).ok()?;
            serde_wasm_bindgen::from_value::<Vec<Vec<String>>>(value).ok()
        }));
    }

    /// Register the callback invoked once per completed spin. It receives
    /// `{ windows, win }` with the settled reel windows.
    #[wasm_bindgen(js_name = spinFinished)]
    pub fn spin_finished(&self, callback: js_sys::Function) {
        self.widget.on_spin_finished(Rc::new(move |outcome: &SpinOutcome| {
            let value =
                serde_wasm_bindgen::to_value(outcome).unwrap_or(JsValue::UNDEFINED);
            let _ = callback.call1(&JsValue::NULL, &value);
        }));
    }

    /// Programmatic spin trigger; same semantics as pressing the button
    #[wasm_bindgen(js_name = spin)]
    pub fn spin(&self) {
        self.widget.spin();
    }

    #[wasm_bindgen(js_name = increaseBet)]
    pub fn increase_bet(&self) {
        self.widget.increase_bet();
    }

    #[wasm_bindgen(js_name = decreaseBet)]
    pub fn decrease_bet(&self) {
        self.widget.decrease_bet();
    }

    #[wasm_bindgen(js_name = maxBet)]
    pub fn max_bet(&self) {
        self.widget.set_max_bet();
    }

    #[wasm_bindgen(js_name = currentBet)]
    pub fn current_bet(&self) -> f64 {
        self.widget.current_bet() as f64
    }

    #[wasm_bindgen(js_name = isSpinning)]
    pub fn is_spinning(&self) -> bool {
        self.widget.is_spinning()
    }

    /// Update the displayed balance; no game logic attached
    #[wasm_bindgen(js_name = setMoney)]
    pub fn set_money(&self, amount: f64) {
        self.widget.set_balance(amount);
    }

    /// Tear the widget down. The handle stays valid but every call becomes a
    /// no-op, and timers from an in-flight spin are suppressed.
    #[wasm_bindgen(js_name = remove)]
    pub fn remove(&mut self) {
        self.widget.remove();
        self.listeners.clear();
    }
}

impl SlotMachine {
    fn bind_buttons(&mut self) {
        let bindings: [(&str, Box<dyn Fn(&SlotWidget<DomSurface>)>); 4] = [
            ("spin-btn", Box::new(|w| w.spin())),
            ("bet-up", Box::new(|w| w.increase_bet())),
            ("bet-down", Box::new(|w| w.decrease_bet())),
            ("max-bet", Box::new(|w| w.set_max_bet())),
        ];

        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document,
            None => return,
        };

        for (name, action) in bindings {
            let id = self.widget.with_surface(|s| s.button_id(name));
            let Some(button) = document.get_element_by_id(&id) else {
                continue;
            };
            let widget = self.widget.clone();
            let closure = Closure::wrap(Box::new(move || action(&widget)) as Box<dyn FnMut()>);
            let _ = button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            self.listeners.push(closure);
        }
    }
}
