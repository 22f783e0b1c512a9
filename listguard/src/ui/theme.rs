//! Terminal colors for listguard output.
//!
//! Each logical piece of output (messages, diff lines, severities, the risk
//! score) maps to a `ThemeEntry`. A YAML theme file can override any entry
//! with one of the 16 named ANSI colors; entries it leaves out keep their
//! built-in color.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use listguard_core::Severity;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
    RuleName,
    SeverityLow,
    SeverityMedium,
    SeverityHigh,
    /// Risk score of zero.
    RiskClean,
    /// Non-zero risk at or below 40.
    RiskModerate,
    RiskHigh,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 15] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::DiffAdded,
        ThemeEntry::DiffRemoved,
        ThemeEntry::DiffHeader,
        ThemeEntry::RuleName,
        ThemeEntry::SeverityLow,
        ThemeEntry::SeverityMedium,
        ThemeEntry::SeverityHigh,
        ThemeEntry::RiskClean,
        ThemeEntry::RiskModerate,
        ThemeEntry::RiskHigh,
    ];

    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Low => ThemeEntry::SeverityLow,
            Severity::Medium => ThemeEntry::SeverityMedium,
            Severity::High => ThemeEntry::SeverityHigh,
        }
    }

    pub fn for_risk(risk_score: u8) -> Self {
        match risk_score {
            0 => ThemeEntry::RiskClean,
            1..=40 => ThemeEntry::RiskModerate,
            _ => ThemeEntry::RiskHigh,
        }
    }
}

/// A named ANSI color (e.g. "red", "brightgreen").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor(String);

#[derive(Debug, Clone)]
pub struct ParseThemeColorError(String);

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color '{}'; expected one of: {}.",
            self.0,
            COLOR_NAMES.join(", ")
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

const COLOR_NAMES: [&str; 16] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
    "brightblack", "brightred", "brightgreen", "brightyellow", "brightblue",
    "brightmagenta", "brightcyan", "brightwhite",
];

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if COLOR_NAMES.contains(&lower.as_str()) {
            Ok(ThemeColor(lower))
        } else {
            Err(ParseThemeColorError(s.to_string()))
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.0
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor(name.to_string())
    }

    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle { fg: Some(ThemeColor::named(name)) }
    }
}

static DEFAULT_THEME: Lazy<ThemeMap> = Lazy::new(|| {
    ThemeEntry::ALL
        .iter()
        .map(|&entry| {
            let color = match entry {
                ThemeEntry::Header | ThemeEntry::DiffHeader => "cyan",
                ThemeEntry::Success | ThemeEntry::DiffAdded | ThemeEntry::RiskClean => "green",
                ThemeEntry::Info => "blue",
                ThemeEntry::Warn | ThemeEntry::SeverityMedium | ThemeEntry::RiskModerate => "yellow",
                ThemeEntry::Error | ThemeEntry::DiffRemoved | ThemeEntry::SeverityHigh => "red",
                ThemeEntry::RiskHigh => "brightred",
                ThemeEntry::RuleName => "magenta",
                ThemeEntry::SeverityLow => "brightblack",
            };
            (entry, ThemeStyle::fg(color))
        })
        .collect()
});

pub fn default_theme_map() -> ThemeMap {
    DEFAULT_THEME.clone()
}

/// Loads `theme_path` over the defaults, or returns the defaults.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => load_from_file(path),
        None => Ok(default_theme_map()),
    }
}

pub fn load_from_file(path: &Path) -> Result<ThemeMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file {}", path.display()))?;
    let custom: ThemeMap = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

    let mut theme = default_theme_map();
    theme.extend(custom);
    Ok(theme)
}

/// The configured foreground color for `entry`, white when unset.
pub fn color_for(theme: &ThemeMap, entry: ThemeEntry) -> AnsiColors {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
        .unwrap_or(AnsiColors::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_named_colors() {
        assert!("red".parse::<ThemeColor>().is_ok());
        assert!("BrightGreen".parse::<ThemeColor>().is_ok());
        assert!("orange".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = default_theme_map();
        for entry in ThemeEntry::ALL {
            assert!(theme.contains_key(&entry), "{:?} missing", entry);
        }
        assert_eq!(color_for(&theme, ThemeEntry::DiffRemoved), AnsiColors::Red);
    }

    #[test]
    fn risk_and_severity_entries() {
        assert_eq!(ThemeEntry::for_risk(0), ThemeEntry::RiskClean);
        assert_eq!(ThemeEntry::for_risk(40), ThemeEntry::RiskModerate);
        assert_eq!(ThemeEntry::for_risk(60), ThemeEntry::RiskHigh);
        assert_eq!(ThemeEntry::for_severity(Severity::High), ThemeEntry::SeverityHigh);
    }

    #[test]
    fn theme_file_overrides_only_named_entries() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "diff_added:\n  fg: brightblue")?;
        let theme = load_from_file(file.path())?;
        assert_eq!(color_for(&theme, ThemeEntry::DiffAdded), AnsiColors::BrightBlue);
        assert_eq!(color_for(&theme, ThemeEntry::DiffRemoved), AnsiColors::Red);
        Ok(())
    }

    #[test]
    fn theme_file_rejects_unknown_color() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "header:\n  fg: orange")?;
        assert!(load_from_file(file.path()).is_err());
        Ok(())
    }
}
