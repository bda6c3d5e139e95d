//! Temperature-based presentation theme
//!
//! Maps the current temperature onto one of five mutually exclusive bands.
//! The band is a pure derived field of the application state; the UI reads
//! it locally to pick its accent color, with no process-wide side effect.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// One of five disjoint temperature classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeBand {
    Freezing,
    Cool,
    Moderate,
    Warm,
    Hot,
}

impl ThemeBand {
    /// Accent color the dashboard uses for this band
    pub fn accent_color(self) -> Color {
        match self {
            ThemeBand::Freezing => Color::White,
            ThemeBand::Cool => Color::Cyan,
            ThemeBand::Moderate => Color::Green,
            ThemeBand::Warm => Color::Yellow,
            ThemeBand::Hot => Color::Red,
        }
    }

    /// Short label shown next to the temperature
    pub fn label(self) -> &'static str {
        match self {
            ThemeBand::Freezing => "freezing",
            ThemeBand::Cool => "cool",
            ThemeBand::Moderate => "moderate",
            ThemeBand::Warm => "warm",
            ThemeBand::Hot => "hot",
        }
    }
}

/// Derive the theme band for a temperature in Celsius
///
/// Total over f64, with each band inclusive on its lower bound:
/// `(-inf, 0)`, `[0, 15)`, `[15, 25)`, `[25, 36)`, `[36, inf)`.
pub fn theme_for_temp(temp: f64) -> ThemeBand {
    if temp < 0.0 {
        ThemeBand::Freezing
    } else if temp < 15.0 {
        ThemeBand::Cool
    } else if temp < 25.0 {
        ThemeBand::Moderate
    } else if temp < 36.0 {
        ThemeBand::Warm
    } else {
        ThemeBand::Hot
    }
}
