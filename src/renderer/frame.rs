//! Color matrix handed to the LED panel

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// 24-bit color, laid out as the panel expects it
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Linear blend, `t` clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let v = self.to_vec3().lerp(other.to_vec3(), t.clamp(0.0, 1.0)).round();
        Rgb::new(v.x as u8, v.y as u8, v.z as u8)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb::from_hex(0x000000);
    pub const WHITE: Rgb = Rgb::from_hex(0xffffff);
    pub const BLUE: Rgb = Rgb::from_hex(0x0000ff);
    pub const RED: Rgb = Rgb::from_hex(0xff0000);
    pub const BEIGE: Rgb = Rgb::from_hex(0xffee88);
    pub const BROWN: Rgb = Rgb::from_hex(0x85734d);
    pub const GOLD: Rgb = Rgb::from_hex(0xffaa00);

    pub const FIELD_GROWN: Rgb = BEIGE;
    pub const FIELD_MOWN: Rgb = BROWN;
    pub const HAYBALL: Rgb = GOLD;

    pub const MOWER_FRONT: Rgb = BLUE;
    pub const MOWER_BACK: Rgb = WHITE;
    pub const GATHERER_FRONT: Rgb = RED;
    pub const GATHERER_BACK: Rgb = WHITE;
}

/// Height x width matrix of colors, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Rgb>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![colors::BLACK; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1))
    }

    /// Raw RGB bytes, row-major, ready for an LED driver
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
