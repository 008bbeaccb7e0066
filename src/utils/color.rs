use egui::Color32;

pub trait HexColor {
    /// Parse `#rrggbb` (leading `#` optional).
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;

    fn from_hex_or(hex: &str, fallback: Self) -> Self
    where
        Self: Sized,
    {
        Self::from_hex(hex).unwrap_or(fallback)
    }
}

impl HexColor for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
