//! Output formatting for triage results

pub mod console;
pub mod formatter;
pub mod json;

/// Turn colored output off for the whole process.
///
/// When enabled, the terminal and the `NO_COLOR`/`CLICOLOR` environment
/// still decide.
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
