use eframe::egui::Color32;

pub const READY: Color32 = Color32::from_rgb(6, 214, 160);
pub const WAITING: Color32 = Color32::from_rgb(255, 190, 11);
pub const FLASH: Color32 = Color32::from_rgb(255, 209, 102);
pub const DANGER: Color32 = Color32::from_rgb(227, 43, 43);

/// Stable accent colour for a player, derived from the name alone so every
/// client paints the same player the same way.
pub fn player_color(name: &str) -> Color32 {
    let hash = name
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    hsl_to_color((hash % 360) as f32, 0.65, 0.55)
}

fn hsl_to_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match hue as u32 {
        0..60 => (c, x, 0.0),
        60..120 => (x, c, 0.0),
        120..180 => (0.0, c, x),
        180..240 => (0.0, x, c),
        240..300 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color32::from_rgb(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_color_is_stable() {
        assert_eq!(player_color("Ann"), player_color("Ann"));
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl_to_color(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_to_color(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
        assert_eq!(hsl_to_color(240.0, 1.0, 0.5), Color32::from_rgb(0, 0, 255));
    }
}
