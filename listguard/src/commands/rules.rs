//! `listguard rules`: show the rule tables after overrides are applied.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use crate::cli::RuleSource;
use crate::commands::resolve_rules;
use crate::ui::report_table;
use crate::ui::theme::ThemeMap;

pub fn run_rules(source: &RuleSource, theme: &ThemeMap) -> Result<()> {
    let (config, options) = resolve_rules(source)?;
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    if !options.profile_meta.profile_name.is_empty() {
        writeln!(
            writer,
            "Profile: {} (v{})",
            options.profile_meta.profile_name, options.profile_meta.version
        )?;
    }
    report_table::print_rules(&config, &mut writer, theme, supports_color)?;
    Ok(())
}
