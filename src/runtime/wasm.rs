use crate::audio::WebAudioBackend;
use crate::card::PlayerCard;
use crate::config::PlayerConfig;
use crate::visual::{DrawSurface, Rgb};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// `DrawSurface` over a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn round_rect_path(&self, x: f64, y: f64, w: f64, h: f64, r: f64) -> Result<(), JsValue> {
        let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)?;
        ctx.arc_to(x + w, y + h, x, y + h, r)?;
        ctx.arc_to(x, y + h, x, y, r)?;
        ctx.arc_to(x, y, x + w, y, r)?;
        ctx.close_path();
        Ok(())
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, line_width: f64, color: Rgb) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        self.ctx.line_to(x1, y1);
        self.ctx.stroke();
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
        match self.round_rect_path(x, y, w, h, radius) {
            Ok(()) => self.ctx.fill(),
            Err(err) => log::warn!("round rect path failed: {:?}", err),
        }
    }
}

/// Browser-facing demo player. JS drives frames from its own
/// `requestAnimationFrame` loop by calling `frame()`.
#[wasm_bindgen]
pub struct WasmPlayerCard {
    card: PlayerCard<WebAudioBackend, CanvasSurface>,
}

#[wasm_bindgen]
impl WasmPlayerCard {
    /// `config` may be `undefined` for the default presentation constants.
    #[wasm_bindgen(constructor)]
    pub fn new(
        label: String,
        canvas: HtmlCanvasElement,
        color: &str,
        config: JsValue,
    ) -> Result<WasmPlayerCard, JsValue> {
        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config.validate().map_err(to_js)?;
        let color: Rgb = color.parse().map_err(to_js)?;
        let surface = CanvasSurface::new(&canvas)?;
        Ok(WasmPlayerCard {
            card: PlayerCard::new(label, WebAudioBackend::new(), surface, color, &config),
        })
    }

    /// Returns the new playing state. Throws if the browser has no audio.
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> Result<bool, JsValue> {
        self.card.toggle().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_playing(&mut self, playing: bool) -> Result<(), JsValue> {
        self.card.set_playing(playing).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.card.is_playing()
    }

    /// Deliver the pending frame. False when nothing was drawn, which tells
    /// the caller to stop requesting animation frames.
    #[wasm_bindgen]
    pub fn frame(&mut self) -> bool {
        match self.card.pending_frame() {
            Some(id) => self.card.on_frame(id),
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn offset(&self) -> f64 {
        self.card.visualizer().offset()
    }

    #[wasm_bindgen]
    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color: Rgb = color.parse().map_err(to_js)?;
        self.card.set_color(color);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.card.unmount();
    }
}
