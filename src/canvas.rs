//! [`Render`] over any `embedded-graphics` draw target.
//!
//! Cells are drawn as `scale`×`scale` blocks offset by `origin`. Direct-draw
//! panels have no framebuffer to swap, so the canvas remembers which cells it
//! lit in the last frame and on [`present`](Render::present) only erases the
//! cells that went dark and fills the ones that lit up. Text frames wipe the
//! whole target instead.

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_10X20,
        },
    },
    prelude::*,
    primitives::Rectangle,
    text::{
        Baseline,
        Text,
    },
};
use heapless::Vec;

use crate::io::{
    Render,
    TextSize,
};

/// Distinct cells a single frame can light.
pub const MAX_LIT_CELLS: usize = 256;

pub struct Canvas<D: DrawTarget> {
    target: D,
    on: D::Color,
    off: D::Color,
    origin: Point,
    scale: u32,
    lit: Vec<Point, MAX_LIT_CELLS>,
    pending: Vec<Point, MAX_LIT_CELLS>,
    /// The target holds pixels outside `lit` (text, or whatever was there
    /// before the first frame) that only a full wipe removes.
    untracked: bool,
    overflowed: bool,
}

impl<D: DrawTarget> Canvas<D> {
    /// Wrap `target`, drawing lit cells in `on` over an `off` background.
    pub fn new(target: D, on: D::Color, off: D::Color) -> Self {
        Self {
            target,
            on,
            off,
            origin: Point::zero(),
            scale: 1,
            lit: Vec::new(),
            pending: Vec::new(),
            untracked: true,
            overflowed: false,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn to_pixels(&self, x: i32, y: i32) -> Point {
        self.origin + Point::new(x, y) * self.scale as i32
    }

    fn wipe(&mut self) {
        if self.target.clear(self.off).is_err() {
            error!("display clear failed");
        }
        self.lit.clear();
    }
}

fn fill_cell<D: DrawTarget>(
    target: &mut D,
    origin: Point,
    scale: u32,
    cell: Point,
    color: D::Color,
) -> bool {
    let area = Rectangle::new(origin + cell * scale as i32, Size::new_equal(scale));
    target.fill_solid(&area, color).is_ok()
}

impl<D: DrawTarget> Render for Canvas<D> {
    fn clear(&mut self) {
        if self.untracked {
            self.wipe();
            self.untracked = false;
        }
        self.pending.clear();
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        let cell = Point::new(x, y);
        if self.pending.contains(&cell) {
            return;
        }
        if self.pending.push(cell).is_err() && !self.overflowed {
            warn!("canvas full, dropping cells past {}", MAX_LIT_CELLS);
            self.overflowed = true;
        }
    }

    fn draw_text(&mut self, text: &str, position: (i32, i32), size: TextSize) {
        // Text replaces the cell frame outright.
        if !self.lit.is_empty() {
            self.wipe();
        }
        self.untracked = true;
        let font = match size {
            TextSize::Normal => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        };
        let style = MonoTextStyle::new(font, self.on);
        let anchor = self.to_pixels(position.0, position.1);
        if Text::with_baseline(text, anchor, style, Baseline::Top)
            .draw(&mut self.target)
            .is_err()
        {
            error!("text draw failed");
        }
    }

    fn present(&mut self) {
        let mut ok = true;
        for &cell in self.lit.iter().filter(|cell| !self.pending.contains(*cell)) {
            ok &= fill_cell(&mut self.target, self.origin, self.scale, cell, self.off);
        }
        for &cell in self.pending.iter().filter(|cell| !self.lit.contains(*cell)) {
            ok &= fill_cell(&mut self.target, self.origin, self.scale, cell, self.on);
        }
        if !ok {
            error!("cell draw failed");
        }
        core::mem::swap(&mut self.lit, &mut self.pending);
        self.pending.clear();
    }
}
