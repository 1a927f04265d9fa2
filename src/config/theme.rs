use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

/// Which of the two palettes is active. Styling only; behavior is
/// identical in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme mode '{other}' (expected 'light' or 'dark')")),
        }
    }
}

/// Both palettes plus the active mode, as persisted in `theme.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    pub dark: Theme,
    pub light: Theme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            dark: Theme::dark(),
            light: Theme::light(),
        }
    }
}

impl ThemeConfig {
    pub fn active(&self) -> &Theme {
        match self.mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub focus: FocusStyle,
    pub borders: BorderStyle,
    pub search: SearchStyle,
    pub profile: ProfileStyle,
    pub repo_list: RepoListStyle,
    pub status_bar: StatusBarStyle,
    pub spinner: SpinnerThemeStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ThemeColors::default(),
            focus: FocusStyle::default(),
            borders: BorderStyle::default(),
            search: SearchStyle::default(),
            profile: ProfileStyle::default(),
            repo_list: RepoListStyle::default(),
            status_bar: StatusBarStyle::default(),
            spinner: SpinnerThemeStyle::default(),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            colors: ThemeColors {
                background: HexColor::new("#ffffff"),
                foreground: HexColor::new("#1f2328"),
                primary: HexColor::new("#0969da"),
                secondary: HexColor::new("#1a7f37"),
                accent: HexColor::new("#8250df"),
                success: HexColor::new("#1a7f37"),
                warning: HexColor::new("#9a6700"),
                error: HexColor::new("#cf222e"),
                muted: HexColor::new("#656d76"),
            },
            focus: FocusStyle {
                focused_border: HexColor::new("#0969da"),
                unfocused_border: HexColor::new("#d0d7de"),
                focused_title: HexColor::new("#8250df"),
                unfocused_title: HexColor::new("#656d76"),
                use_bold_focused: true,
                focus_indicator: "▶".to_string(),
            },
            borders: BorderStyle::default(),
            search: SearchStyle {
                input_fg: HexColor::new("#1f2328"),
                input_bg: HexColor::new("#f6f8fa"),
                placeholder_fg: HexColor::new("#656d76"),
                panel_bg: HexColor::new("#ffffff"),
                panel_border: HexColor::new("#0969da"),
                item_fg: HexColor::new("#1f2328"),
                item_bg: HexColor::new("#ffffff"),
                selected_fg: HexColor::new("#ffffff"),
                selected_bg: HexColor::new("#0969da"),
                empty_fg: HexColor::new("#656d76"),
                error_fg: HexColor::new("#cf222e"),
            },
            profile: ProfileStyle {
                heading_fg: HexColor::new("#0969da"),
                login_fg: HexColor::new("#8250df"),
                bio_fg: HexColor::new("#1f2328"),
                label_fg: HexColor::new("#656d76"),
                value_fg: HexColor::new("#1f2328"),
                link_fg: HexColor::new("#0969da"),
            },
            repo_list: RepoListStyle {
                name_fg: HexColor::new("#0969da"),
                description_fg: HexColor::new("#1f2328"),
                star_fg: HexColor::new("#9a6700"),
                fork_fg: HexColor::new("#656d76"),
                date_fg: HexColor::new("#656d76"),
                language_fg: HexColor::new("#1a7f37"),
                license_fg: HexColor::new("#9a6700"),
                link_fg: HexColor::new("#0969da"),
                selected_fg: HexColor::new("#ffffff"),
                selected_bg: HexColor::new("#0969da"),
                empty_fg: HexColor::new("#656d76"),
            },
            status_bar: StatusBarStyle {
                bg: HexColor::new("#f6f8fa"),
                key_fg: HexColor::new("#0969da"),
                hint_fg: HexColor::new("#656d76"),
                rate_ok_fg: HexColor::new("#1a7f37"),
                rate_low_fg: HexColor::new("#9a6700"),
                flash_info_fg: HexColor::new("#1f2328"),
                flash_error_fg: HexColor::new("#cf222e"),
            },
            spinner: SpinnerThemeStyle {
                default_style: "braille".to_string(),
                color: HexColor::new("#0969da"),
                loading_color: HexColor::new("#0969da"),
                error_color: HexColor::new("#cf222e"),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: HexColor,
    pub foreground: HexColor,
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
    pub success: HexColor,
    pub warning: HexColor,
    pub error: HexColor,
    pub muted: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: HexColor::new("#1a1b26"),
            foreground: HexColor::new("#c0caf5"),
            primary: HexColor::new("#7aa2f7"),
            secondary: HexColor::new("#9ece6a"),
            accent: HexColor::new("#bb9af7"),
            success: HexColor::new("#9ece6a"),
            warning: HexColor::new("#e0af68"),
            error: HexColor::new("#f7768e"),
            muted: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusStyle {
    pub focused_border: HexColor,
    pub unfocused_border: HexColor,
    pub focused_title: HexColor,
    pub unfocused_title: HexColor,
    pub use_bold_focused: bool,
    pub focus_indicator: String,
}

impl Default for FocusStyle {
    fn default() -> Self {
        Self {
            focused_border: HexColor::new("#7aa2f7"),
            unfocused_border: HexColor::new("#3b4261"),
            focused_title: HexColor::new("#bb9af7"),
            unfocused_title: HexColor::new("#565f89"),
            use_bold_focused: true,
            focus_indicator: "●".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub border_type: String,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            border_type: "rounded".to_string(),
        }
    }
}

/// Search input plus its suggestion popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchStyle {
    pub input_fg: HexColor,
    pub input_bg: HexColor,
    pub placeholder_fg: HexColor,
    pub panel_bg: HexColor,
    pub panel_border: HexColor,
    pub item_fg: HexColor,
    pub item_bg: HexColor,
    pub selected_fg: HexColor,
    pub selected_bg: HexColor,
    pub empty_fg: HexColor,
    pub error_fg: HexColor,
}

impl Default for SearchStyle {
    fn default() -> Self {
        Self {
            input_fg: HexColor::new("#c0caf5"),
            input_bg: HexColor::new("#24283b"),
            placeholder_fg: HexColor::new("#565f89"),
            panel_bg: HexColor::new("#1a1b26"),
            panel_border: HexColor::new("#7aa2f7"),
            item_fg: HexColor::new("#c0caf5"),
            item_bg: HexColor::new("#1a1b26"),
            selected_fg: HexColor::new("#1a1b26"),
            selected_bg: HexColor::new("#7aa2f7"),
            empty_fg: HexColor::new("#565f89"),
            error_fg: HexColor::new("#f7768e"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileStyle {
    pub heading_fg: HexColor,
    pub login_fg: HexColor,
    pub bio_fg: HexColor,
    pub label_fg: HexColor,
    pub value_fg: HexColor,
    pub link_fg: HexColor,
}

impl Default for ProfileStyle {
    fn default() -> Self {
        Self {
            heading_fg: HexColor::new("#7aa2f7"),
            login_fg: HexColor::new("#bb9af7"),
            bio_fg: HexColor::new("#c0caf5"),
            label_fg: HexColor::new("#565f89"),
            value_fg: HexColor::new("#c0caf5"),
            link_fg: HexColor::new("#7dcfff"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoListStyle {
    pub name_fg: HexColor,
    pub description_fg: HexColor,
    pub star_fg: HexColor,
    pub fork_fg: HexColor,
    pub date_fg: HexColor,
    pub language_fg: HexColor,
    pub license_fg: HexColor,
    pub link_fg: HexColor,
    pub selected_fg: HexColor,
    pub selected_bg: HexColor,
    pub empty_fg: HexColor,
}

impl Default for RepoListStyle {
    fn default() -> Self {
        Self {
            name_fg: HexColor::new("#7aa2f7"),
            description_fg: HexColor::new("#c0caf5"),
            star_fg: HexColor::new("#e0af68"),
            fork_fg: HexColor::new("#7dcfff"),
            date_fg: HexColor::new("#565f89"),
            language_fg: HexColor::new("#9ece6a"),
            license_fg: HexColor::new("#e0af68"),
            link_fg: HexColor::new("#7dcfff"),
            selected_fg: HexColor::new("#c0caf5"),
            selected_bg: HexColor::new("#364a82"),
            empty_fg: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBarStyle {
    pub bg: HexColor,
    pub key_fg: HexColor,
    pub hint_fg: HexColor,
    pub rate_ok_fg: HexColor,
    pub rate_low_fg: HexColor,
    pub flash_info_fg: HexColor,
    pub flash_error_fg: HexColor,
}

impl Default for StatusBarStyle {
    fn default() -> Self {
        Self {
            bg: HexColor::new("#24283b"),
            key_fg: HexColor::new("#7aa2f7"),
            hint_fg: HexColor::new("#565f89"),
            rate_ok_fg: HexColor::new("#9ece6a"),
            rate_low_fg: HexColor::new("#e0af68"),
            flash_info_fg: HexColor::new("#c0caf5"),
            flash_error_fg: HexColor::new("#f7768e"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerThemeStyle {
    pub default_style: String,
    pub color: HexColor,
    pub loading_color: HexColor,
    pub error_color: HexColor,
}

impl Default for SpinnerThemeStyle {
    fn default() -> Self {
        Self {
            default_style: "braille".to_string(),
            color: HexColor::new("#7dcfff"),
            loading_color: HexColor::new("#7aa2f7"),
            error_color: HexColor::new("#f7768e"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn to_color(&self) -> Color {
        self.parse_hex().unwrap_or(Color::Reset)
    }

    fn parse_hex(&self) -> Option<Color> {
        let hex = self.0.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_border.to_color()
        } else {
            self.focus.unfocused_border.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn title_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_title.to_color()
        } else {
            self.focus.unfocused_title.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn border_type(&self) -> BorderType {
        match self.borders.border_type.as_str() {
            "plain" => BorderType::Plain,
            "double" => BorderType::Double,
            "thick" => BorderType::Thick,
            _ => BorderType::Rounded,
        }
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.repo_list.selected_fg.to_color())
            .bg(self.repo_list.selected_bg.to_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let color = HexColor::new("#ff0000");
        assert_eq!(color.to_color(), Color::Rgb(255, 0, 0));

        let color = HexColor::new("#00ff00");
        assert_eq!(color.to_color(), Color::Rgb(0, 255, 0));

        let color = HexColor::new("#0000ff");
        assert_eq!(color.to_color(), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_invalid_hex_falls_back_to_reset() {
        assert_eq!(HexColor::new("#zzz").to_color(), Color::Reset);
        assert_eq!(HexColor::new("red").to_color(), Color::Reset);
    }

    #[test]
    fn test_default_mode_is_dark() {
        let config = ThemeConfig::default();
        assert_eq!(config.mode, ThemeMode::Dark);
        assert_eq!(config.active().name, "dark");
        assert_eq!(config.active().colors.background.as_str(), "#1a1b26");
    }

    #[test]
    fn test_toggle_flips_mode_only() {
        let mut config = ThemeConfig::default();
        config.toggle();
        assert_eq!(config.mode, ThemeMode::Light);
        assert_eq!(config.active().colors.background.as_str(), "#ffffff");
        config.toggle();
        assert_eq!(config.mode, ThemeMode::Dark);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("DARK".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("solarized".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_theme_config_toml_round_trip() {
        let config = ThemeConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ThemeConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.mode, config.mode);
        assert_eq!(parsed.light.name, "light");
    }

    #[test]
    fn test_partial_theme_file_fills_defaults() {
        let parsed: ThemeConfig = toml::from_str("mode = \"light\"\n").unwrap();
        assert_eq!(parsed.mode, ThemeMode::Light);
        assert_eq!(parsed.dark.colors.background.as_str(), "#1a1b26");
        assert_eq!(parsed.light.search.selected_bg.as_str(), "#0969da");
    }

    #[test]
    fn test_border_type_mapping() {
        let mut theme = Theme::dark();
        assert_eq!(theme.border_type(), BorderType::Rounded);
        theme.borders.border_type = "double".to_string();
        assert_eq!(theme.border_type(), BorderType::Double);
        theme.borders.border_type = "bogus".to_string();
        assert_eq!(theme.border_type(), BorderType::Rounded);
    }
}
