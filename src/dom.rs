// DOM rendering surface (browser only)
//
// Renders the widget markup into a caller-supplied element and implements
// the strip animation with CSS transforms. All element lookups are scoped by
// a per-instance id so multiple widgets can coexist on one page.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::SlotConfig;
use crate::sequencer::FALLBACK_SLOT_SIZE_PX;
use crate::surface::RenderSurface;
use crate::theme::Theme;
use crate::types::{DisplayRef, ResolvedSymbol, Result, SlotError};
use crate::utils::generate_instance_id;

const STYLE_TEMPLATE: &str = r#"
.{id}-container { font-family: 'Inter', -apple-system, sans-serif; height: 100%; width: 100%; display: flex; flex-direction: column; align-items: center; justify-content: center; background: var(--background); color: var(--text-primary); border: 1px solid var(--border-primary); border-radius: 16px; overflow: hidden; }
.{id}-header { display: flex; width: 100%; justify-content: space-between; align-items: center; padding: 16px 24px; background: var(--surface-secondary); border-bottom: 1px solid var(--border-primary); }
.{id}-balance { background: var(--accent-gradient); color: var(--text-on-accent); padding: 8px 16px; border-radius: 8px; font-weight: 600; white-space: nowrap; }
.{id}-logo { height: 64px; width: auto; }
.{id}-reels { display: flex; gap: 4px; background: rgba(0, 0, 0, 0.4); padding: 12px; border-radius: 8px; margin: 24px; position: relative; }
.{id}-reel { background: var(--surface-tertiary); border: 1px solid var(--border-secondary); border-radius: 6px; overflow: hidden; position: relative; width: 120px; height: 360px; }
.{id}-reel-strip { position: absolute; top: 0; left: 0; right: 0; display: flex; flex-direction: column; }
.{id}-symbol { height: 120px; width: 120px; display: flex; align-items: center; justify-content: center; font-size: 48px; border-bottom: 1px solid var(--border-secondary); background: var(--symbol-gradient); flex-shrink: 0; }
.{id}-symbol img { width: 80%; height: 80%; object-fit: contain; }
.{id}-controls { display: flex; gap: 16px; align-items: center; padding: 16px 24px; background: var(--surface-secondary); border-top: 1px solid var(--border-primary); width: 100%; justify-content: center; }
.{id}-bet-display { background: var(--surface-tertiary); padding: 8px 16px; border-radius: 8px; min-width: 80px; text-align: center; font-weight: 600; }
.{id}-btn { background: var(--accent-gradient); color: var(--text-on-accent); border: none; padding: 10px 18px; border-radius: 8px; font-weight: 600; cursor: pointer; }
.{id}-spin-btn { background: linear-gradient(135deg, #10b981 0%, #059669 100%); color: white; padding: 12px 32px; }
.{id}-spin-btn:disabled { background: linear-gradient(135deg, #6b7280, #4b5563); cursor: not-allowed; opacity: 0.7; }
.{id}-win-line { position: absolute; left: 0; right: 0; top: 50%; height: 4px; background: linear-gradient(90deg, transparent, var(--accent-color), transparent); animation: {id}-win-pulse 1s ease-in-out infinite; z-index: 3; box-shadow: 0 0 15px var(--accent-color); border-radius: 2px; }
@keyframes {id}-win-pulse { 0%, 100% { opacity: 0.5; transform: scaleY(1); } 50% { opacity: 1; transform: scaleY(1.5); } }
"#;

/// Browser rendering surface scoped to one host element
pub struct DomSurface {
    document: Document,
    container: Element,
    instance_id: String,
}

impl DomSurface {
    /// Bind a surface to a host element and render the widget chrome
    pub fn mount(container: Element, config: &SlotConfig) -> Result<DomSurface> {
        if !container.is_connected() {
            return Err(SlotError::InvalidSurface(
                "target element is not attached to the document".to_string(),
            ));
        }
        let document = container
            .owner_document()
            .ok_or_else(|| SlotError::InvalidSurface("target has no document".to_string()))?;

        let surface = DomSurface {
            document,
            container,
            instance_id: generate_instance_id(),
        };
        surface.render_chrome(config);
        Ok(surface)
    }

    /// Resolve a CSS selector against the page document
    pub fn mount_selector(selector: &str, config: &SlotConfig) -> Result<DomSurface> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SlotError::InvalidSurface("no document".to_string()))?;
        let container = document
            .query_selector(selector)
            .map_err(|_| SlotError::InvalidSurface(format!("bad selector: {selector}")))?
            .ok_or_else(|| {
                SlotError::InvalidSurface(format!("no element matches {selector}"))
            })?;
        DomSurface::mount(container, config)
    }

    fn render_chrome(&self, config: &SlotConfig) {
        let id = &self.instance_id;
        let style = STYLE_TEMPLATE.replace("{id}", id);
        let logo = match &config.logo_url {
            Some(url) => format!(r#"<img class="{id}-logo" src="{url}" alt="Logo">"#),
            None => String::new(),
        };
        let html = format!(
            r#"<style>{style}</style>
<div class="{id}-container">
  <div class="{id}-header">
    <div class="{id}-balance" id="{id}-balance">💰 0</div>
    {logo}
  </div>
  <div class="{id}-reels" id="{id}-reels"></div>
  <div class="{id}-controls">
    <button class="{id}-btn" id="{id}-bet-down">−</button>
    <div class="{id}-bet-display" id="{id}-bet-amount">{bet}</div>
    <button class="{id}-btn" id="{id}-bet-up">+</button>
    <button class="{id}-btn" id="{id}-max-bet">Max Bet</button>
    <button class="{id}-btn {id}-spin-btn" id="{id}-spin-btn">SPIN</button>
  </div>
</div>"#,
            bet = config.min_bet,
        );
        self.container.set_inner_html(&html);
    }

    fn by_id(&self, suffix: &str) -> Option<Element> {
        self.document
            .get_element_by_id(&format!("{}-{}", self.instance_id, suffix))
    }

    fn strip(&self, reel: usize) -> Option<HtmlElement> {
        self.by_id(&format!("strip-{reel}"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn symbol_html(&self, symbol: &ResolvedSymbol) -> String {
        let id = &self.instance_id;
        match &symbol.display {
            DisplayRef::Image(url) => format!(
                r#"<div class="{id}-symbol"><img src="{url}" alt="{alt}"></div>"#,
                alt = symbol.id
            ),
            DisplayRef::Glyph(glyph) => {
                format!(r#"<div class="{id}-symbol">{glyph}</div>"#)
            }
        }
    }

    /// The scoped element id of the spin button, for event wiring
    pub fn button_id(&self, name: &str) -> String {
        format!("{}-{}", self.instance_id, name)
    }
}

impl RenderSurface for DomSurface {
    fn mount_reels(&self, count: usize) {
        let Some(reels) = self.by_id("reels") else {
            return;
        };
        let id = &self.instance_id;
        let mut html = String::new();
        for index in 0..count {
            html.push_str(&format!(
                r#"<div class="{id}-reel"><div class="{id}-reel-strip" id="{id}-strip-{index}"></div></div>"#
            ));
        }
        reels.set_inner_html(&html);
    }

    fn set_strip(&self, reel: usize, symbols: &[ResolvedSymbol]) {
        let Some(strip) = self.strip(reel) else {
            web_sys::console::warn_1(&format!("slotkit: missing strip {reel}").into());
            return;
        };
        let html: String = symbols.iter().map(|s| self.symbol_html(s)).collect();
        strip.set_inner_html(&html);
    }

    fn slot_size(&self) -> f64 {
        self.strip(0)
            .and_then(|strip| strip.first_element_child())
            .and_then(|symbol| symbol.dyn_into::<HtmlElement>().ok())
            .map(|symbol| symbol.offset_height() as f64)
            .filter(|h| *h > 0.0)
            .unwrap_or(FALLBACK_SLOT_SIZE_PX)
    }

    fn begin_spin(&self, reel: usize, offset_px: f64, duration_ms: u32) {
        let Some(strip) = self.strip(reel) else {
            return;
        };
        let style = strip.style();
        let seconds = f64::from(duration_ms) / 1_000.0;
        let _ = style.set_property(
            "transition",
            &format!("transform {seconds}s cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
        );
        let _ = style.set_property("transform", &format!("translateY({offset_px}px)"));
    }

    fn end_spin(&self, reel: usize, offset_px: f64) {
        let Some(strip) = self.strip(reel) else {
            return;
        };
        let style = strip.style();
        let _ = style.set_property("transition", "none");
        let _ = style.set_property("transform", &format!("translateY({offset_px}px)"));
    }

    fn set_spin_enabled(&self, enabled: bool) {
        if let Some(button) = self.by_id("spin-btn") {
            if enabled {
                let _ = button.remove_attribute("disabled");
            } else {
                let _ = button.set_attribute("disabled", "disabled");
            }
        }
    }

    fn set_bet(&self, amount: u64) {
        if let Some(display) = self.by_id("bet-amount") {
            display.set_text_content(Some(&amount.to_string()));
        }
    }

    fn set_balance(&self, amount: f64) {
        if let Some(balance) = self.by_id("balance") {
            balance.set_text_content(Some(&format!("💰 {amount}")));
        }
    }

    fn show_win_line(&self) {
        let Some(reels) = self.by_id("reels") else {
            return;
        };
        let Ok(line) = self.document.create_element("div") else {
            return;
        };
        line.set_class_name(&format!("{}-win-line", self.instance_id));
        line.set_id(&format!("{}-win-line", self.instance_id));
        let _ = reels.append_child(&line);
    }

    fn hide_win_line(&self) {
        if let Some(line) = self.by_id("win-line") {
            line.remove();
        }
    }

    fn apply_theme(&self, theme: &Theme) {
        let Some(host) = self.container.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = host.style();
        for (name, value) in &theme.vars {
            let _ = style.set_property(name, value);
        }
    }

    fn clear(&self) {
        self.container.set_inner_html("");
    }
}
