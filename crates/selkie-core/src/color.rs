//! Minimal color handling for label-contrast decisions.
//!
//! Only `#rgb` / `#rrggbb` hex notation is understood; anything else (named colors, `rgb(...)`)
//! falls back to the dark default, which keeps the pipeline fail-soft on generative input.

pub const DARK_LABEL: &str = "#1e1e1e";
pub const LIGHT_LABEL: &str = "#ffffff";

#[derive(Debug, Clone, Copy)]
struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

fn parse_hex_rgb01(s: &str) -> Option<Rgb01> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb01 {
        r: (r as f64) / 255.0,
        g: (g as f64) / 255.0,
        b: (b as f64) / 255.0,
    })
}

fn relative_luminance(rgb: Rgb01) -> f64 {
    0.2126 * rgb.r + 0.7152 * rgb.g + 0.0722 * rgb.b
}

/// Label color readable against the given fill: light text on dark backgrounds, dark text
/// otherwise. Transparent, absent, or unparseable backgrounds get the dark default.
pub fn label_color_for_background(background: Option<&str>) -> &'static str {
    let Some(bg) = background else {
        return DARK_LABEL;
    };
    if bg.trim().eq_ignore_ascii_case("transparent") {
        return DARK_LABEL;
    }
    let Some(rgb) = parse_hex_rgb01(bg) else {
        return DARK_LABEL;
    };
    if relative_luminance(rgb) < 0.5 {
        LIGHT_LABEL
    } else {
        DARK_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_backgrounds_get_light_labels() {
        assert_eq!(label_color_for_background(Some("#000000")), LIGHT_LABEL);
        assert_eq!(label_color_for_background(Some("#1d3557")), LIGHT_LABEL);
        assert_eq!(label_color_for_background(Some("#333")), LIGHT_LABEL);
    }

    #[test]
    fn light_backgrounds_get_dark_labels() {
        assert_eq!(label_color_for_background(Some("#ffffff")), DARK_LABEL);
        assert_eq!(label_color_for_background(Some("#ffd166")), DARK_LABEL);
        assert_eq!(label_color_for_background(Some("#fff")), DARK_LABEL);
    }

    #[test]
    fn transparent_absent_and_garbage_fall_back_to_dark() {
        assert_eq!(label_color_for_background(None), DARK_LABEL);
        assert_eq!(label_color_for_background(Some("transparent")), DARK_LABEL);
        assert_eq!(label_color_for_background(Some("TRANSPARENT")), DARK_LABEL);
        assert_eq!(label_color_for_background(Some("cornflowerblue")), DARK_LABEL);
        assert_eq!(label_color_for_background(Some("#12345")), DARK_LABEL);
    }
}
