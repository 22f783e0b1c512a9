// listguard/src/ui/diff_viewer.rs
//! Line diff between the original listing and its sanitized form.

use diffy::{create_patch, Line as DiffLine};
use std::io::{self, Write};

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes a `-`/`+` diff of `original` against `sanitized`.
///
/// Removed lines use the `diff_removed` color and added lines `diff_added`.
/// Identical inputs produce a single "no changes" line.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("--- original", ThemeEntry::DiffHeader, theme, supports_color))?;
    writeln!(writer, "{}", paint("+++ sanitized", ThemeEntry::DiffHeader, theme, supports_color))?;

    if original == sanitized {
        return writeln!(writer, "No changes needed.");
    }

    let patch = create_patch(original, sanitized);
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    let text = format!("- {}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", paint(&text, ThemeEntry::DiffRemoved, theme, supports_color))?;
                }
                DiffLine::Insert(s) => {
                    let text = format!("+ {}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", paint(&text, ThemeEntry::DiffAdded, theme, supports_color))?;
                }
                DiffLine::Context(s) => writeln!(writer, "  {}", s.trim_end_matches('\n'))?,
            }
        }
    }
    Ok(())
}
