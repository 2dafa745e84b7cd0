use std::str::FromStr;

use tuirealm::ratatui::style::Color;

/// The persisted theme choice. Stored as `"dark"` / `"light"` under the
/// `theme` storage key.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "night" => Ok(Self::Dark),
            "light" | "day" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: BasePalette,
    pub severity: SeverityPalette,
}

#[derive(Debug, Clone, Copy)]
pub struct BasePalette {
    pub canvas: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub header: Color,
    pub accent: Color,
    pub danger: Color,
    pub selected_bg: Color,
    pub border: Color,
    pub input_bg: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct SeverityPalette {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                base: BasePalette {
                    canvas: Color::Rgb(36, 40, 56),
                    surface: Color::Rgb(36, 40, 56),
                    text: Color::White,
                    text_muted: Color::DarkGray,
                    header: Color::Cyan,
                    accent: Color::Magenta,
                    danger: Color::Red,
                    selected_bg: Color::Rgb(54, 48, 72),
                    border: Color::DarkGray,
                    input_bg: Color::Rgb(46, 50, 68),
                },
                severity: SeverityPalette {
                    success: Color::Green,
                    error: Color::Red,
                    warning: Color::Yellow,
                    info: Color::Cyan,
                },
            },
            ThemeMode::Light => Self {
                base: BasePalette {
                    canvas: Color::Rgb(246, 248, 252),
                    surface: Color::Rgb(255, 255, 255),
                    text: Color::Rgb(32, 38, 51),
                    text_muted: Color::Rgb(95, 105, 122),
                    header: Color::Rgb(37, 99, 235),
                    accent: Color::Rgb(2, 132, 199),
                    danger: Color::Rgb(185, 28, 28),
                    selected_bg: Color::Rgb(227, 237, 255),
                    border: Color::Rgb(196, 208, 224),
                    input_bg: Color::Rgb(241, 245, 249),
                },
                severity: SeverityPalette {
                    success: Color::Rgb(22, 163, 74),
                    error: Color::Rgb(185, 28, 28),
                    warning: Color::Rgb(202, 138, 4),
                    info: Color::Rgb(2, 132, 199),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(ThemeMode::from_str("dark"), Ok(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_str("Light"), Ok(ThemeMode::Light));
        assert_eq!(ThemeMode::from_str(" day "), Ok(ThemeMode::Light));
        assert_eq!(ThemeMode::from_str("night"), Ok(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_str("solarized"), Err(()));
        assert_eq!(ThemeMode::from_str(""), Err(()));
    }

    #[test]
    fn test_mode_default_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggled_is_involution() {
        for mode in ThemeMode::ALL {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for mode in ThemeMode::ALL {
            assert_eq!(ThemeMode::from_str(mode.as_str()), Ok(mode));
        }
    }
}
