//! Color normalization utilities.
//!
//! Imported cell colors arrive in whatever form the host's sheet parser
//! produced (`RRGGBB`, `#RRGGBB`, ARGB, short form); theme colors come from
//! the user's color pickers. Everything is normalized to lowercase `#rrggbb`
//! before it reaches the resolver or the renderer.

/// Normalize a hex color string to lowercase `#rrggbb`.
///
/// Accepts `rgb`, `rrggbb`, and `aarrggbb` (alpha stripped, spreadsheet
/// parsers emit ARGB), each with or without a leading `#`. Returns `None`
/// for anything else.
pub fn normalize_hex(input: &str) -> Option<String> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in hex.chars() {
                out.push(c.to_ascii_lowercase());
                out.push(c.to_ascii_lowercase());
            }
            Some(out)
        }
        6 => Some(format!("#{}", hex.to_ascii_lowercase())),
        8 => hex.get(2..).map(|rgb| format!("#{}", rgb.to_ascii_lowercase())),
        _ => None,
    }
}

/// Parse a normalized `#rrggbb` color into channels.
fn channels(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Composite a color toward black by `alpha` (0.0 = unchanged, 1.0 = black).
///
/// Used to derive the zebra-stripe shade from the background color: the
/// renderer deals only in opaque colors, so the stripe is pre-composited
/// instead of drawn as a translucent overlay.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn shade_toward_black(hex: &str, alpha: f32) -> String {
    let Some((r, g, b)) = channels(hex) else {
        return hex.to_string();
    };
    let alpha = alpha.clamp(0.0, 1.0);
    let scale = |v: u8| (f32::from(v) * (1.0 - alpha)).round() as u8;
    format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_rgb() {
        assert_eq!(normalize_hex("FF6B35").as_deref(), Some("#ff6b35"));
        assert_eq!(normalize_hex("#1A1A1A").as_deref(), Some("#1a1a1a"));
    }

    #[test]
    fn test_normalize_argb_strips_alpha() {
        // Sheet parsers emit ARGB (8 chars)
        assert_eq!(normalize_hex("FFFFFF00").as_deref(), Some("#ffff00"));
        assert_eq!(normalize_hex("#80FF0000").as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_normalize_short_form() {
        assert_eq!(normalize_hex("#fff").as_deref(), Some("#ffffff"));
        assert_eq!(normalize_hex("0a5").as_deref(), Some("#00aa55"));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_hex("not-a-color"), None);
        assert_eq!(normalize_hex("#12345"), None);
        assert_eq!(normalize_hex(""), None);
    }

    #[test]
    fn test_shade_toward_black() {
        assert_eq!(shade_toward_black("#ffffff", 0.0), "#ffffff");
        assert_eq!(shade_toward_black("#ffffff", 1.0), "#000000");
        // Unparseable input passes through unchanged
        assert_eq!(shade_toward_black("bogus", 0.5), "bogus");
    }
}
