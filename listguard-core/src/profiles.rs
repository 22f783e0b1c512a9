// File: listguard-core/src/profiles.rs

//! profiles.rs - Profile configuration, loading, and engine options.
//!
//! A profile is a named YAML overlay on top of the rule tables: it can turn
//! individual patterns on or off, change their severity, add replacements,
//! and choose how replacements are applied. This lets a dealer keep, say, a
//! strict profile for one marketplace and a relaxed one for another.
//!
//! license: MIT OR Apache-2.0

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{merge_rules, GuardConfig, Severity, SpamPattern};

/// Pass limit used by `--fixed-point` when no explicit value is configured.
pub const DEFAULT_MAX_PASSES: usize = 8;

/// Profiles shipped inside the binary, as (name, YAML).
const BUILTIN_PROFILES: &[(&str, &str)] = &[("strict", include_str!("../config/profiles/strict.yaml"))];

/// How the phrase-replacement passes are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReplacementMode {
    /// Each pattern runs once over the working text.
    #[default]
    SinglePass,
    /// The pattern passes repeat until the text stops changing, bounded by
    /// `max_passes`.
    FixedPoint { max_passes: usize },
}

impl ReplacementMode {
    pub fn fixed_point() -> Self {
        ReplacementMode::FixedPoint { max_passes: DEFAULT_MAX_PASSES }
    }
}

/// The top-level structure representing a profile.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "snake_case", default)]
pub struct ProfileConfig {
    pub profile_name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: String,
    pub rules: Vec<ProfileRule>,
    /// Patterns added to the rule tables; a name already present replaces
    /// that pattern in place.
    pub patterns: Vec<SpamPattern>,
    /// Extra or overriding replacement table entries.
    pub replacements: BTreeMap<String, String>,
    pub replacement_mode: Option<ReplacementMode>,
}

impl ProfileConfig {
    pub fn validate(&self, base_config: &GuardConfig) -> Result<()> {
        if self.version.trim().is_empty() {
            bail!("Profile '{}' validation failed: 'version' field cannot be empty.", self.profile_name);
        }

        let known: HashSet<&str> = base_config
            .patterns
            .iter()
            .chain(&self.patterns)
            .map(|p| p.name.as_str())
            .collect();
        for rule_override in &self.rules {
            if !known.contains(rule_override.name.as_str()) {
                bail!(
                    "Profile '{}' validation failed: pattern '{}' not found in the base configuration or the profile.",
                    self.profile_name,
                    rule_override.name
                );
            }
        }

        if let Some(ReplacementMode::FixedPoint { max_passes: 0 }) = self.replacement_mode {
            bail!("Profile '{}' validation failed: 'max_passes' must be greater than 0.", self.profile_name);
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub struct ProfileRule {
    pub name: String,
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileMeta {
    pub profile_name: String,
    pub version: String,
}

/// Runtime options for an engine, independent of the rule tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    pub replacement_mode: ReplacementMode,
    pub profile_meta: ProfileMeta,
}

impl EngineOptions {
    pub fn with_replacement_mode(mut self, mode: ReplacementMode) -> Self {
        self.replacement_mode = mode;
        self
    }
}

impl From<&ProfileConfig> for EngineOptions {
    fn from(profile: &ProfileConfig) -> Self {
        Self {
            replacement_mode: profile.replacement_mode.unwrap_or_default(),
            profile_meta: ProfileMeta {
                profile_name: profile.profile_name.clone(),
                version: profile.version.clone(),
            },
        }
    }
}

fn profile_dirs() -> Vec<PathBuf> {
    vec![
        dirs::home_dir().map(|p| p.join(".listguard").join("profiles")),
        dirs::config_dir().map(|p| p.join("listguard").join("profiles")),
        Some(PathBuf::from("./config")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn profile_candidate_paths(name: &str) -> Vec<PathBuf> {
    profile_dirs()
        .into_iter()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a profile from a direct file path, or by name from the profile directories.
pub fn load_profile_by_name(name_or_path: &str) -> Result<ProfileConfig> {
    debug!("Attempting to load profile from: '{}'", name_or_path);

    let path = Path::new(name_or_path);
    let found = if path.is_file() {
        debug!("Input is a valid file path. Loading directly from: {}", path.display());
        Some(path.to_path_buf())
    } else {
        profile_candidate_paths(name_or_path)
            .into_iter()
            .find(|p| p.exists())
    };

    if found.is_none() {
        if let Some(raw) = builtin_profile_yaml(name_or_path) {
            debug!("Using built-in profile '{}'.", name_or_path);
            return serde_yml::from_str(raw)
                .with_context(|| format!("parsing built-in profile '{}'", name_or_path));
        }
    }

    let path_to_load = found.with_context(|| {
        format!(
            "Profile '{}' not found. It is not a valid file path, and was not found in expected locations.",
            name_or_path
        )
    })?;

    let raw = fs::read_to_string(&path_to_load)
        .with_context(|| format!("reading profile file {}", path_to_load.display()))?;

    let cfg: ProfileConfig = serde_yml::from_str(&raw)
        .with_context(|| format!("parsing profile YAML {}", path_to_load.display()))?;

    debug!("Successfully loaded profile '{}'.", cfg.profile_name);
    Ok(cfg)
}

/// Applies a profile's overrides to a rule configuration.
pub fn apply_profile_to_config(profile: &ProfileConfig, config: GuardConfig) -> GuardConfig {
    debug!("Applying profile '{}' to rules.", profile.profile_name);

    // Limits stay at their defaults in the overlay, so merging leaves them alone.
    let overlay = GuardConfig {
        patterns: profile.patterns.clone(),
        replacements: profile.replacements.clone(),
        ..GuardConfig::default()
    };
    let mut config = merge_rules(config, Some(overlay));

    for rule_override in &profile.rules {
        match config.patterns.iter_mut().find(|p| p.name == rule_override.name) {
            Some(pattern) => {
                if let Some(enabled) = rule_override.enabled {
                    debug!("Applying enabled={} override for pattern '{}'", enabled, &rule_override.name);
                    pattern.enabled = Some(enabled);
                }
                if let Some(severity) = rule_override.severity {
                    debug!("Applying severity='{}' override for pattern '{}'", severity, &rule_override.name);
                    pattern.severity = severity;
                }
            }
            None => warn!(
                "Profile pattern '{}' not found in configuration. It will be ignored.",
                rule_override.name
            ),
        }
    }

    debug!("Finished applying profile. Final pattern count: {}", config.patterns.len());
    config
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile_name: String,
    pub display_name: Option<String>,
    pub version: String,
    pub description: Option<String>,
    pub path: Option<PathBuf>,
}

/// Lists parseable `*.yaml` profiles found in the profile directories.
/// Returns the YAML of a profile compiled into the binary, if `name` is one.
pub fn builtin_profile_yaml(name: &str) -> Option<&'static str> {
    BUILTIN_PROFILES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, raw)| *raw)
}

pub fn list_available_profiles() -> Vec<ProfileSummary> {
    let mut out: Vec<ProfileSummary> = BUILTIN_PROFILES
        .iter()
        .filter_map(|(name, raw)| match serde_yml::from_str::<ProfileConfig>(raw) {
            Ok(cfg) => Some(ProfileSummary {
                profile_name: cfg.profile_name,
                display_name: cfg.display_name,
                version: cfg.version,
                description: cfg.description,
                path: None,
            }),
            Err(e) => {
                warn!("Built-in profile '{}' failed to parse: {}", name, e);
                None
            }
        })
        .collect();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    for dir in profile_dirs() {
        let Ok(entries) = fs::read_dir(&dir) else {
            debug!("Candidate profile directory not found: {}", dir.display());
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") || !seen_paths.insert(path.clone()) {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(s) => match serde_yml::from_str::<ProfileConfig>(&s) {
                    // Rule files share the directory; only documents naming a profile count.
                    Ok(cfg) if !cfg.profile_name.is_empty() => out.push(ProfileSummary {
                        profile_name: cfg.profile_name,
                        display_name: cfg.display_name,
                        version: cfg.version,
                        description: cfg.description,
                        path: Some(path),
                    }),
                    Ok(_) => {}
                    Err(e) => warn!("Failed to parse YAML for profile at {}: {}", path.display(), e),
                },
                Err(e) => warn!("Failed to read profile file at '{}': {}", path.display(), e),
            }
        }
    }
    out
}
