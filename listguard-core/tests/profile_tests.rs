// listguard-core/tests/profile_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use listguard_core::profiles::*;
use listguard_core::{validate_rules, Category, ComplianceEngine, GuardConfig, RegexEngine, Severity};

fn profile(rules: Vec<ProfileRule>) -> ProfileConfig {
    ProfileConfig {
        profile_name: "test_profile".to_string(),
        version: "v1.0".to_string(),
        rules,
        ..Default::default()
    }
}

#[test]
fn test_profile_validation_success() -> Result<()> {
    let base = GuardConfig::load_default_rules()?;
    let profile = profile(vec![ProfileRule {
        name: "shouting".to_string(),
        enabled: Some(false),
        severity: None,
    }]);
    profile.validate(&base)?;
    Ok(())
}

#[test]
fn test_profile_validation_unknown_pattern() -> Result<()> {
    let base = GuardConfig::load_default_rules()?;
    let profile = profile(vec![ProfileRule {
        name: "does_not_exist".to_string(),
        enabled: Some(true),
        severity: None,
    }]);
    let err = profile.validate(&base).unwrap_err().to_string();
    assert!(err.contains("pattern 'does_not_exist' not found"));
    Ok(())
}

#[test]
fn test_profile_validation_empty_version() -> Result<()> {
    let base = GuardConfig::load_default_rules()?;
    let mut profile = profile(Vec::new());
    profile.version = "  ".to_string();
    assert!(profile.validate(&base).is_err());
    Ok(())
}

#[test]
fn test_profile_validation_zero_passes() -> Result<()> {
    let base = GuardConfig::load_default_rules()?;
    let mut profile = profile(Vec::new());
    profile.replacement_mode = Some(ReplacementMode::FixedPoint { max_passes: 0 });
    assert!(profile.validate(&base).is_err());
    Ok(())
}

#[test]
fn test_apply_profile_disables_and_reweights() -> Result<()> {
    let base = GuardConfig::load_default_rules()?;
    let mut profile = profile(vec![
        ProfileRule { name: "shouting".to_string(), enabled: Some(false), severity: None },
        ProfileRule { name: "urgency".to_string(), enabled: None, severity: Some(Severity::High) },
        ProfileRule { name: "missing".to_string(), enabled: Some(false), severity: None },
    ]);
    profile.replacements.insert("hurry".to_string(), "no rush".to_string());

    let config = apply_profile_to_config(&profile, base);
    assert_eq!(config.find_pattern("shouting").unwrap().enabled, Some(false));
    assert_eq!(config.find_pattern("urgency").unwrap().severity, Severity::High);
    assert_eq!(config.replacements["hurry"], "no rush");

    let engine = RegexEngine::with_options(config, EngineOptions::from(&profile))?;
    assert_eq!(engine.sanitize("HURRY, CLEAN TITLE"), "no rush, CLEAN TITLE");

    let report = engine.analyze("HURRY, CLEAN TITLE");
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].category, Category::Urgency);
    assert_eq!(report.issues[0].severity, Severity::High);
    Ok(())
}

#[test]
fn test_load_profile_from_path() -> Result<()> {
    let yaml = r#"
profile_name: strict
display_name: "Strict marketplace"
version: "1.2"
rules:
  - name: emoji_run
    severity: high
replacements:
  buy now: "available now"
replacement_mode:
  mode: fixed_point
  max_passes: 4
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    let path = file.path().to_str().expect("utf-8 temp path");

    let profile = load_profile_by_name(path)?;
    assert_eq!(profile.profile_name, "strict");
    assert_eq!(profile.display_name.as_deref(), Some("Strict marketplace"));
    assert_eq!(profile.rules[0].severity, Some(Severity::High));
    assert_eq!(profile.replacement_mode, Some(ReplacementMode::FixedPoint { max_passes: 4 }));

    let options = EngineOptions::from(&profile);
    assert_eq!(options.replacement_mode, ReplacementMode::FixedPoint { max_passes: 4 });
    assert_eq!(options.profile_meta.profile_name, "strict");
    assert_eq!(options.profile_meta.version, "1.2");
    Ok(())
}

#[test]
fn test_load_missing_profile_fails() {
    let err = load_profile_by_name("no-such-profile-for-listguard-tests").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_profile_candidate_paths_use_yaml_extension() {
    let paths = profile_candidate_paths("strict");
    assert!(!paths.is_empty());
    assert!(paths.iter().all(|p| p.file_name().and_then(|n| n.to_str()) == Some("strict.yaml")));
}

#[test]
fn test_default_options_are_single_pass() {
    let profile = profile(Vec::new());
    assert_eq!(EngineOptions::from(&profile).replacement_mode, ReplacementMode::SinglePass);
    assert_eq!(EngineOptions::default().replacement_mode, ReplacementMode::SinglePass);
}

#[test]
fn test_profile_replacement_keys_are_lowercased() -> Result<()> {
    let base = GuardConfig::load_default_rules()?;
    let mut profile = profile(Vec::new());
    profile.replacements.insert("HURRY".to_string(), "no rush".to_string());
    profile.replacements.insert("Act Now".to_string(), "ask today".to_string());

    let config = apply_profile_to_config(&profile, base);
    assert_eq!(config.replacements["hurry"], "no rush");
    assert_eq!(config.replacements["act now"], "ask today");
    assert!(!config.replacements.contains_key("HURRY"));
    validate_rules(&config)?;

    let engine = RegexEngine::new(config)?;
    assert_eq!(engine.sanitize("hurry and act now"), "no rush and ask today");
    Ok(())
}

#[test]
fn test_profile_patterns_are_merged() -> Result<()> {
    let yaml = r#"
profile_name: contact
version: "1"
patterns:
  - name: phone_number
    category: contact-info
    pattern: "\\b\\d{3}-\\d{4}\\b"
    replace_with: "[phone]"
rules:
  - name: phone_number
    severity: high
"#;
    let profile: ProfileConfig = serde_yml::from_str(yaml)?;
    let base = GuardConfig::load_default_rules()?;
    profile.validate(&base)?;

    let config = apply_profile_to_config(&profile, base);
    assert_eq!(config.patterns.last().map(|p| p.name.as_str()), Some("phone_number"));
    assert_eq!(config.find_pattern("phone_number").unwrap().severity, Severity::High);

    let engine = RegexEngine::new(config)?;
    assert_eq!(engine.sanitize("call 555-1234"), "call [phone]");
    Ok(())
}

#[test]
fn test_builtin_strict_profile_is_listed_and_loadable() -> Result<()> {
    assert!(builtin_profile_yaml("strict").is_some());
    assert!(builtin_profile_yaml("lenient").is_none());

    let listed = list_available_profiles();
    let strict = listed
        .iter()
        .find(|p| p.profile_name == "strict" && p.path.is_none())
        .expect("built-in strict profile listed");
    assert_eq!(strict.version, "1.0");

    let profile = load_profile_by_name("strict")?;
    assert_eq!(profile.profile_name, "strict");
    Ok(())
}

fn strict_engine() -> Result<RegexEngine> {
    let yaml = builtin_profile_yaml("strict").expect("strict profile is built in");
    let profile: ProfileConfig = serde_yml::from_str(yaml)?;
    let base = GuardConfig::load_default_rules()?;
    profile.validate(&base)?;
    let config = apply_profile_to_config(&profile, base);
    validate_rules(&config)?;
    RegexEngine::with_options(config, EngineOptions::from(&profile))
}

#[test]
fn test_strict_profile_rewrites_contact_links_and_punctuation() -> Result<()> {
    let engine = strict_engine()?;
    let input = "Last chance! Call me at 555-123-4567, details at https://example.com/item ok???? Wow!!!!";
    assert_eq!(
        engine.sanitize(input),
        "opportunity! DM for details [DM for contact], details at [link removed for compliance] ok?? Wow!!"
    );
    assert_eq!(engine.sanitize("Rolex\n\n\n\n\nSubmariner"), "Rolex\n\nSubmariner");
    Ok(())
}

#[test]
fn test_strict_profile_rewrites_hype_phrases() -> Result<()> {
    let engine = strict_engine()?;
    assert_eq!(
        engine.sanitize("Fire sale, a steal at this price. Price is firm."),
        "priced to sell, a great value at this price. price reflects market value."
    );
    Ok(())
}

#[test]
fn test_strict_profile_analyze_reports_new_categories() -> Result<()> {
    let engine = strict_engine()?;
    let report = engine.analyze("Last chance! Call me at 555-123-4567 Wow!!!!");
    let categories: Vec<Category> = report.issues.iter().map(|i| i.category).collect();
    assert_eq!(categories, vec![Category::Urgency, Category::ContactInfo, Category::Punctuation]);
    assert_eq!(report.issues[1].rule_name, "contact_requests");
    assert_eq!(report.risk_score, 60);
    Ok(())
}
