use ratatui::style::Color;

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub running_color: Color,
    pub paused_color: Color,
    pub finished_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            running_color: Color::Rgb(136, 192, 255),
            paused_color: Color::Rgb(235, 203, 139),
            finished_color: Color::Rgb(163, 190, 140),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 100, 255),
        },
        "dracula" => Theme {
            running_color: Color::Rgb(189, 147, 249),
            paused_color: Color::Rgb(241, 250, 140),
            finished_color: Color::Rgb(80, 250, 123),
            border_color: Color::Rgb(200, 100, 255),
            accent_color: Color::Rgb(255, 0, 255),
        },
        "gruvbox" => Theme {
            running_color: Color::Rgb(254, 128, 25),
            paused_color: Color::Rgb(250, 189, 47),
            finished_color: Color::Rgb(184, 187, 38),
            border_color: Color::Rgb(255, 200, 100),
            accent_color: Color::Rgb(255, 150, 0),
        },
        "solarized" => Theme {
            running_color: Color::Rgb(42, 161, 152),
            paused_color: Color::Rgb(181, 137, 0),
            finished_color: Color::Rgb(133, 153, 0),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 200, 0),
        },
        _ => Theme {
            running_color: Color::Rgb(100, 181, 246),
            paused_color: Color::Yellow,
            finished_color: Color::Rgb(0, 255, 150),
            border_color: Color::Rgb(0, 200, 255),
            accent_color: Color::Rgb(255, 100, 0),
        },
    }
}

/// Name of the theme after (or before) `current` in [`THEMES`].
pub fn cycle(current: &str, forward: bool) -> &'static str {
    let idx = THEMES.iter().position(|&t| t == current).unwrap_or(0);
    let new_idx = if forward {
        (idx + 1) % THEMES.len()
    } else if idx == 0 {
        THEMES.len() - 1
    } else {
        idx - 1
    };
    THEMES[new_idx]
}
