//! Browser canvas and DOM helpers (wasm only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

use super::{CONFIG_ELEMENT_ID, CONTROLS_ELEMENT_ID, display_for_user_agent, load_config};
use crate::renderer::{Color, Surface, TextStyle};
use crate::settings::{DisplayClass, GameConfig};

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::translate(self, x as f64, y as f64).ok();
    }

    fn rotate(&mut self, angle: f32) {
        CanvasRenderingContext2d::rotate(self, angle as f64).ok();
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::move_to(self, x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::line_to(self, x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        // Negative radii throw; a zero-size arc draws nothing
        let radius = radius.max(0.0) as f64;
        CanvasRenderingContext2d::arc(self, x as f64, y as f64, radius, start as f64, end as f64)
            .ok();
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn clip(&mut self) {
        CanvasRenderingContext2d::clip(self);
    }

    fn fill(&mut self, color: Color) {
        self.set_fill_style_str(&color.css());
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self, color: Color, width: f32) {
        self.set_stroke_style_str(&color.css());
        self.set_line_width(width as f64);
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.set_fill_style_str(&color.css());
        CanvasRenderingContext2d::fill_rect(self, x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.set_fill_style_str(&style.color.css());
        self.set_font(&style.font());
        self.set_text_align(style.align.as_str());
        self.set_text_baseline(style.baseline.as_str());
        CanvasRenderingContext2d::fill_text(self, text, x as f64, y as f64).ok();
    }
}

/// 2D context of a canvas element
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Resize the canvas backing store to the window's inner size
pub fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0) as u32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

pub fn detect_display(window: &Window) -> DisplayClass {
    let ua = window.navigator().user_agent().unwrap_or_default();
    display_for_user_agent(&ua)
}

/// Defaults for the detected display, overlaid with the page's config blob
pub fn page_config(window: &Window, document: &Document) -> GameConfig {
    let json = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    load_config(json.as_deref(), detect_display(window))
}

/// Reveal the touch-button bar
pub fn show_touch_controls(document: &Document) {
    let Some(el) = document.get_element_by_id(CONTROLS_ELEMENT_ID) else {
        log::warn!("No #{} element for touch controls", CONTROLS_ELEMENT_ID);
        return;
    };
    if let Ok(el) = el.dyn_into::<HtmlElement>() {
        el.style().set_property("display", "flex").ok();
    }
}
