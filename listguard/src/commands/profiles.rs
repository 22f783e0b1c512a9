//! `listguard profiles`: list built-in profiles and those found on disk.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use listguard_core::list_available_profiles;

use crate::commands::info_msg;
use crate::ui::theme::ThemeMap;

pub fn run_profiles(theme: &ThemeMap) -> Result<()> {
    let profiles = list_available_profiles();
    if profiles.is_empty() {
        info_msg("No profiles found. Place <name>.yaml files in ~/.listguard/profiles.", theme);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Name", "Version", "Description", "Path"]);
    for p in profiles {
        table.add_row(vec![
            p.display_name.unwrap_or(p.profile_name),
            p.version,
            p.description.unwrap_or_default(),
            p.path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
        ]);
    }
    println!("{}", table);
    Ok(())
}
