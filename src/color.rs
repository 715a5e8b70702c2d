//! Color parsing for bar and border styling
//!
//! The descriptor stores colors as hex strings so the on-disk JSON stays
//! readable. Parsing happens only during validation; the host receives the
//! strings untouched.

/// Hex color in ARGB32 format (#AARRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(u32);

impl HexColor {
    /// Parse hex color string supporting multiple formats:
    /// - 6 digits: RRGGBB (full opacity assumed, becomes FFRRGGBB)
    /// - 8 digits: AARRGGBB (explicit alpha)
    /// - Optional '#' prefix supported but not required
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;

        // 6-digit values fit in 24 bits; prepend FF for full opacity
        let argb = if digits.len() == 6 {
            0xFF_00_00_00 | value
        } else {
            value
        };

        Some(Self(argb))
    }

    /// Get raw ARGB32 value
    pub fn argb32(self) -> u32 {
        self.0
    }

    /// Alpha channel (0-255)
    pub fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        // 8-digit format (AARRGGBB)
        assert_eq!(HexColor::parse("#7FFF0000"), Some(HexColor(0x7FFF0000)));
        assert_eq!(HexColor::parse("7FFF0000"), Some(HexColor(0x7FFF0000)));
        assert_eq!(HexColor::parse("FFFFFFFF"), Some(HexColor(0xFFFFFFFF)));

        // 6-digit format (RRGGBB) - should prepend FF for full opacity
        assert_eq!(HexColor::parse("#FF0000"), Some(HexColor(0xFFFF0000)));
        assert_eq!(HexColor::parse("#98971A"), Some(HexColor(0xFF98971A)));
        assert_eq!(HexColor::parse("1d2021"), Some(HexColor(0xFF1D2021)));

        // Invalid
        assert_eq!(HexColor::parse("invalid"), None);
        assert_eq!(HexColor::parse(""), None);
        assert_eq!(HexColor::parse("#FFF"), None);
    }

    #[test]
    fn test_alpha_channel() {
        assert_eq!(HexColor::parse("#7F123456").unwrap().alpha(), 0x7F);
        assert_eq!(HexColor::parse("#123456").unwrap().alpha(), 0xFF);
    }

    #[test]
    fn test_argb32() {
        assert_eq!(HexColor::parse("#000000").unwrap().argb32(), 0xFF000000);
    }
}
