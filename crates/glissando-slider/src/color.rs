/// RGBA colour with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        match digits.len() {
            3 => {
                let nibble = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Some(Self::from_rgb_u8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::from_rgba_u8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const GREY: Color = Color(0.5, 0.5, 0.5, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#448aff"), Some(Color::from_rgb_u8(0x44, 0x8a, 0xff)));
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color::from_rgba_u8(0, 0, 0, 0x80))
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }
}
