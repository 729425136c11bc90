//! Display theme names selectable per user.

pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";

/// All themes the frontend ships.
pub const VALID_THEMES: &[&str] = &[THEME_LIGHT, THEME_DARK];

/// Check whether a theme name is selectable.
pub fn is_valid_theme(name: &str) -> bool {
    VALID_THEMES.contains(&name)
}
