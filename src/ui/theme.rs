use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_stale: Color,
    pub border: Color,
    pub cpu_color: Color,
    pub ram_color: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
}

impl Theme {
    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        }
    }

    fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Rgb(137, 180, 250),
            header_accent_fg: Color::Rgb(17, 17, 27),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            text_stale: Color::Rgb(249, 226, 175),
            border: Color::Rgb(88, 91, 112),
            cpu_color: Color::Rgb(166, 227, 161),
            ram_color: Color::Rgb(203, 166, 247),
            gauge_filled: Color::Rgb(137, 180, 250),
            gauge_unfilled: Color::Rgb(49, 50, 68),
            statusbar_bg: Color::Rgb(24, 24, 37),
            pill_key_bg: Color::Rgb(137, 180, 250),
            pill_key_fg: Color::Rgb(17, 17, 27),
            pill_desc_fg: Color::Rgb(205, 214, 244),
            surface_bg: Color::Rgb(30, 30, 46),
        }
    }

    fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Rgb(30, 102, 245),
            header_accent_fg: Color::Rgb(239, 241, 245),
            text_primary: Color::Rgb(76, 79, 105),
            text_secondary: Color::Rgb(108, 111, 133),
            text_stale: Color::Rgb(223, 142, 29),
            border: Color::Rgb(172, 176, 190),
            cpu_color: Color::Rgb(64, 160, 43),
            ram_color: Color::Rgb(136, 57, 239),
            gauge_filled: Color::Rgb(30, 102, 245),
            gauge_unfilled: Color::Rgb(204, 208, 218),
            statusbar_bg: Color::Rgb(230, 233, 239),
            pill_key_bg: Color::Rgb(30, 102, 245),
            pill_key_fg: Color::Rgb(239, 241, 245),
            pill_desc_fg: Color::Rgb(76, 79, 105),
            surface_bg: Color::Rgb(239, 241, 245),
        }
    }
}
