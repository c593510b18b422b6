use crate::{Channel, SettleStyle};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |i: usize, fallback: u8| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(fallback)
        };
        match s.len() {
            6 => Color(channel(0, 0), channel(2, 0), channel(4, 0), 255),
            8 => Color(channel(0, 0), channel(2, 0), channel(4, 0), channel(6, 255)),
            _ => Color::BLACK,
        }
    }
    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// The color a settle mark gives text drawn in `self`.
    ///
    /// Opacity scales alpha; brightness scales the RGB channels toward black.
    pub fn settled(self, style: &SettleStyle) -> Self {
        let k = style.value.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * k).round() as u8;
        match style.channel {
            Channel::Opacity => self.with_alpha(scale(self.3)),
            Channel::Brightness => Color(scale(self.0), scale(self.1), scale(self.2), self.3),
        }
    }

    /// Alpha-composite over an opaque `background`, for hosts without alpha.
    pub fn over(self, background: Color) -> Self {
        let a = self.3 as f32 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Color(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
            255,
        )
    }
}
