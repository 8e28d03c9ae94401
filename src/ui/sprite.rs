//! Decoded images sampled by the renderer.

use super::pixel_buf::Rgb;
use flapper::assets::AssetSlot;
use flapper::Result;

/// Alpha below this is treated as transparent.
const ALPHA_CUTOFF: u8 = 128;

/// An RGBA image kept in memory for nearest-neighbour sampling.
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Sprite {
    /// Decode PNG/JPEG/GIF/BMP bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    #[cfg(test)]
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Colour at normalised coordinates (`u`, `v` in `[0, 1]`). `None` for
    /// transparent pixels or an empty image.
    pub fn sample(&self, u: f64, v: f64) -> Option<Rgb> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f64) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f64) as u32).min(self.height - 1);
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.rgba[i..i + 4];
        if p[3] < ALPHA_CUTOFF {
            return None;
        }
        Some(Rgb(p[0], p[1], p[2]))
    }
}

/// Decoded images for the three image slots. A missing entry means the
/// renderer uses its built-in palette.
#[derive(Debug, Clone, Default)]
pub struct Sprites {
    pub background: Option<Sprite>,
    pub bird: Option<Sprite>,
    pub pipe: Option<Sprite>,
}

impl Sprites {
    pub fn set(&mut self, slot: AssetSlot, sprite: Option<Sprite>) {
        match slot {
            AssetSlot::Background => self.background = sprite,
            AssetSlot::Bird => self.bird = sprite,
            AssetSlot::Pipe => self.pipe = sprite,
            AssetSlot::Music | AssetSlot::Ouch => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Sprite {
        // 2x2: red, green / blue, transparent
        Sprite::from_rgba(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 0, 0, 0, 0,
            ],
        )
    }

    #[test]
    fn test_sample_quadrants() {
        let s = checker();
        assert_eq!(s.sample(0.1, 0.1), Some(Rgb(255, 0, 0)));
        assert_eq!(s.sample(0.9, 0.1), Some(Rgb(0, 255, 0)));
        assert_eq!(s.sample(0.1, 0.9), Some(Rgb(0, 0, 255)));
        assert_eq!(s.sample(0.9, 0.9), None);
    }

    #[test]
    fn test_sample_clamps_edges() {
        let s = checker();
        assert_eq!(s.sample(1.0, 0.0), Some(Rgb(0, 255, 0)));
        assert_eq!(s.sample(-3.0, 0.0), Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(Sprite::from_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn test_audio_slots_ignored() {
        let mut sprites = Sprites::default();
        sprites.set(AssetSlot::Music, Some(checker()));
        assert!(sprites.background.is_none() && sprites.bird.is_none() && sprites.pipe.is_none());
        sprites.set(AssetSlot::Pipe, Some(checker()));
        assert!(sprites.pipe.is_some());
    }
}
