//! Off-screen pixel canvas drawn with half-block glyphs.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the `▀` foreground, the lower one as the background.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend from `a` to `b` with `t_256` in 0..=256.
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    fn color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

pub struct PixelBuf {
    w: usize,
    h: usize, // rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize, fill: Rgb) -> Self {
        Self {
            w,
            h,
            px: vec![fill; w * h],
        }
    }

    /// Canvas covering `area`, two pixels per cell vertically.
    pub fn for_area(area: Rect, fill: Rgb) -> Self {
        Self::new(area.width as usize, area.height as usize * 2, fill)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }
}

impl Widget for &PixelBuf {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = (self.h / 2).min(area.height as usize);
        let cols = self.w.min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                let cell = buf.get_mut(area.x + col as u16, area.y + row as u16);
                if top == bot {
                    cell.set_char(' ').set_bg(top.color());
                } else {
                    cell.set_char('\u{2580}') // ▀
                        .set_fg(top.color())
                        .set_bg(bot.color());
                }
            }
        }
    }
}
