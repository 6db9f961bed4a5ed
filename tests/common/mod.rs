// Shared helpers for the integration tests

#![allow(dead_code)]

use demoplayer::visual::{DrawSurface, Rgb};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect { x: f64, w: f64, color: Rgb },
    Line { x: f64, color: Rgb },
    RoundRect { x: f64, y: f64, w: f64, color: Rgb },
}

/// Draw calls survive the surface, so tests can look after unmount.
#[derive(Debug, Clone, Default)]
pub struct DrawLog(Rc<RefCell<Vec<DrawCall>>>);

impl DrawLog {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.0.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear))
            .count()
    }

    pub fn round_rects(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, DrawCall::RoundRect { .. }))
            .count()
    }

    /// Calls since the most recent clear.
    pub fn last_frame(&self) -> Vec<DrawCall> {
        let calls = self.0.borrow();
        let start = calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear))
            .unwrap_or(0);
        calls[start..].to_vec()
    }
}

pub struct RecordingSurface {
    log: DrawLog,
}

impl RecordingSurface {
    pub fn new() -> (Self, DrawLog) {
        let log = DrawLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f64 {
        600.0
    }

    fn height(&self) -> f64 {
        120.0
    }

    fn clear(&mut self) {
        self.log.0.borrow_mut().push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, x: f64, _y: f64, w: f64, _h: f64, color: Rgb) {
        self.log.0.borrow_mut().push(DrawCall::Rect { x, w, color });
    }

    fn stroke_line(&mut self, x0: f64, _y0: f64, _x1: f64, _y1: f64, _width: f64, color: Rgb) {
        self.log.0.borrow_mut().push(DrawCall::Line { x: x0, color });
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, _h: f64, _radius: f64, color: Rgb) {
        self.log
            .0
            .borrow_mut()
            .push(DrawCall::RoundRect { x, y, w, color });
    }
}

pub const AMBER: Rgb = Rgb::new(251, 191, 36);
