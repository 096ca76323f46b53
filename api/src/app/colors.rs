//! Rating display colors
//!
//! Two pure mappings: an absolute rating to a judge-specific color band,
//! and a rating delta to a white-to-red/green background blend. Threshold
//! tables are fixed per judge, not runtime configuration.

use crate::domain::entities::OnlineJudge;
use crate::domain::ports::{Rgb, TextStyle};

/// Hex color band for an absolute rating on the given judge.
pub fn rating_color(judge: OnlineJudge, rating: i32) -> &'static str {
    match judge {
        OnlineJudge::Codeforces => codeforces_color(rating),
        OnlineJudge::AtCoder => atcoder_color(rating),
        OnlineJudge::Tlx => tlx_color(rating),
    }
}

fn codeforces_color(rating: i32) -> &'static str {
    match rating {
        i32::MIN..=0 => "#000000",
        1..=1199 => "#808080",
        1200..=1399 => "#008000",
        1400..=1599 => "#03a89e",
        1600..=1899 => "#0000ff",
        1900..=2099 => "#a000a0",
        2100..=2399 => "#ff8c00",
        _ => "#ff0000",
    }
}

fn atcoder_color(rating: i32) -> &'static str {
    match rating {
        i32::MIN..=0 => "#000000",
        1..=399 => "#808080",
        400..=799 => "#804000",
        800..=1199 => "#008000",
        1200..=1599 => "#00c0c0",
        1600..=1999 => "#0000ff",
        2000..=2399 => "#c0c000",
        2400..=2799 => "#ff8000",
        _ => "#ff0000",
    }
}

fn tlx_color(rating: i32) -> &'static str {
    match rating {
        i32::MIN..=0 => "#000000",
        1..=1649 => "#b7b7b7",
        1650..=1749 => "#70ad47",
        1750..=1999 => "#3c78d8",
        2000..=2199 => "#7030a0",
        2200..=2499 => "#f6b26b",
        _ => "#ff0000",
    }
}

/// Background blend for a rating delta: white at zero, saturating toward
/// pure red (loss) or green (gain) as the magnitude grows.
pub fn delta_color(delta: i32, intensity: f64) -> Rgb {
    if delta == 0 {
        return Rgb(255, 255, 255);
    }
    let alpha = (15.0 + 2.0 * delta.abs() as f64) / intensity;
    let (r, g, b) = if delta < 0 {
        (255.0, 0.0, 0.0)
    } else {
        (0.0, 255.0, 0.0)
    };
    let blend = |channel: f64| {
        ((1.0 - alpha) * 255.0 + alpha * channel + 0.5)
            .floor()
            .clamp(0.0, 255.0) as u8
    };
    Rgb(blend(r), blend(g), blend(b))
}

/// Text style for a handle cell: band-colored, bold once rated.
pub fn handle_text_style(judge: OnlineJudge, rating: i32) -> TextStyle {
    TextStyle {
        foreground: rating_color(judge, rating).to_string(),
        bold: rating > 0,
        underline: false,
    }
}
