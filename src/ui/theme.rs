use ratatui::style::{Color, Modifier, Style};

use crate::config::AppearanceConfig;
use crate::surface::StrokeCap;

/// Icon color (material green 500)
pub const TICK: Color = Color::Rgb(0x4C, 0xAF, 0x50);

/// Background color (material grey 400)
pub const BACKGROUND: Color = Color::Rgb(0xBD, 0xBD, 0xBD);

/// Colors used by the tick row and the hint bar
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub tick: Color,
    pub background: Color,
    pub cap: StrokeCap,
    pub hint_key: Style,
    pub hint_desc: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_colors(TICK, BACKGROUND, StrokeCap::default())
    }
}

impl Theme {
    pub fn from_config(appearance: &AppearanceConfig) -> Self {
        Self::with_colors(appearance.tick, appearance.background, appearance.stroke_cap)
    }

    fn with_colors(tick: Color, background: Color, cap: StrokeCap) -> Self {
        Self {
            tick,
            background,
            cap,
            hint_key: Style::default()
                .fg(tick)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
            hint_desc: Style::default().fg(Color::Gray).bg(Color::Black),
        }
    }
}
