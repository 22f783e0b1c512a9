//! compiler.rs - Manages the compilation and caching of spam-trigger rules.
//!
//! This module turns a `GuardConfig` into `CompiledRules`: regexes ordered by
//! category priority plus a lowercase-keyed replacement table. Compiled sets
//! are cached by config hash and shared through `Arc`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{Category, GuardConfig, LimitsConfig, Severity, SpamPattern, MAX_PATTERN_LENGTH};
use crate::errors::GuardError;

/// A single compiled spam pattern.
#[derive(Debug)]
pub struct CompiledRule {
    pub regex: Regex,
    pub name: String,
    pub category: Category,
    pub severity: Severity,
    /// Description reported in compliance issues (falls back to the pattern source).
    pub description: String,
    pub replace_with: Option<String>,
}

/// All enabled patterns in application order, plus the replacement table.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
    /// Lowercased trigger -> replacement.
    pub replacements: HashMap<String, String>,
    /// Replacement values that are themselves matched by some compiled rule.
    /// In single-pass mode these survive sanitization unchanged.
    pub retriggering_replacements: Vec<String>,
}

impl CompiledRules {
    /// The sanctioned replacement for a matched trigger, or the lowercased
    /// match when the table has no entry.
    pub fn replacement_for(&self, matched: &str) -> String {
        let lowered = matched.to_lowercase();
        match self.replacements.get(&lowered) {
            Some(replacement) => replacement.clone(),
            None => lowered,
        }
    }

    /// What `rule` substitutes for `matched`: its fixed text if it has one,
    /// otherwise the table lookup.
    pub fn rewrite(&self, rule: &CompiledRule, matched: &str) -> String {
        match &rule.replace_with {
            Some(fixed) => fixed.clone(),
            None => self.replacement_for(matched),
        }
    }
}

lazy_static! {
    /// Global cache of compiled rule sets keyed by a hash of the rule tables.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

/// Hashes the parts of the config that affect compilation.
fn hash_config(config: &GuardConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.patterns.hash(&mut hasher);
    config.replacements.hash(&mut hasher);
    config.limits.hash(&mut hasher);
    hasher.finish()
}

fn compile_pattern(pattern: &SpamPattern, limits: &LimitsConfig) -> Result<CompiledRule, GuardError> {
    if pattern.pattern.len() > MAX_PATTERN_LENGTH {
        return Err(GuardError::PatternLengthExceeded(
            pattern.name.clone(),
            pattern.pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(&pattern.regex_source(limits))
        .case_insensitive(pattern.case_insensitive)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| GuardError::RuleCompilationError(pattern.name.clone(), e))?;

    Ok(CompiledRule {
        regex,
        name: pattern.name.clone(),
        category: pattern.category,
        severity: pattern.severity,
        description: pattern.describe().to_string(),
        replace_with: pattern.replace_with.clone(),
    })
}

/// Compiles the enabled patterns of `config` into `CompiledRules`.
///
/// Patterns are stably sorted by category priority, so declaration order is
/// kept within a category. Every failing pattern is reported, not just the first.
pub fn compile_rules(config: &GuardConfig) -> Result<CompiledRules, GuardError> {
    debug!("Starting compilation of {} patterns.", config.patterns.len());

    let mut ordered: Vec<&SpamPattern> = config.patterns.iter().collect();
    ordered.sort_by_key(|p| p.category.priority());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for pattern in ordered {
        if !pattern.is_enabled() {
            debug!("Skipping disabled pattern '{}'.", pattern.name);
            continue;
        }
        match compile_pattern(pattern, &config.limits) {
            Ok(rule) => {
                log::debug!(
                    target: "listguard_core::sanitizer",
                    "Pattern '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(rule);
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(GuardError::Fatal(format!(
            "Failed to compile {} pattern(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    let replacements: HashMap<String, String> = config
        .replacements
        .iter()
        .map(|(trigger, replacement)| (trigger.to_lowercase(), replacement.clone()))
        .collect();

    let fixed_texts = compiled_rules.iter().filter_map(|r| r.replace_with.as_ref());
    let mut retriggering_replacements: Vec<String> = Vec::new();
    for replacement in replacements.values().chain(fixed_texts) {
        if let Some(rule) = compiled_rules.iter().find(|r| r.regex.is_match(replacement)) {
            warn!(
                "Replacement '{}' is itself matched by pattern '{}'; single-pass sanitizing leaves it in place.",
                replacement, rule.name
            );
            if !retriggering_replacements.contains(replacement) {
                retriggering_replacements.push(replacement.clone());
            }
        }
    }
    retriggering_replacements.sort();

    debug!(
        "Finished compiling patterns. Total compiled: {}.",
        compiled_rules.len()
    );
    Ok(CompiledRules {
        rules: compiled_rules,
        replacements,
        retriggering_replacements,
    })
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &GuardConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_rules(config)?);

    COMPILED_RULES_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}
