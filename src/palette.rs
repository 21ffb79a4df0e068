//! Color palette and styling for CLI output.
//!
//! Every styled string goes through one of the `fmt_*` helpers so that
//! `--color never` and non-TTY output stay plain.

use owo_colors::{OwoColorize, Style};

/// Style for component names, the primary identifier.
fn component_name() -> Style {
    Style::new().cyan().bold()
}

/// Style for section headings like "Dependencies:".
fn heading() -> Style {
    Style::new().white().bold()
}

/// Style for shell commands the user should run.
fn command() -> Style {
    Style::new().green().bold()
}

/// Style for de-emphasized detail.
fn description() -> Style {
    Style::new().dimmed()
}

/// Style for created or overwritten files.
fn status_ok() -> Style {
    Style::new().green()
}

/// Style for skipped files.
fn status_skipped() -> Style {
    Style::new().yellow()
}

/// Style for failures.
fn status_error() -> Style {
    Style::new().red()
}

/// Apply `style` to `text` when color is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format a component name.
pub fn fmt_component(name: &str, use_color: bool) -> String {
    paint(name, component_name(), use_color)
}

/// Format a section heading.
pub fn fmt_heading(text: &str, use_color: bool) -> String {
    paint(text, heading(), use_color)
}

/// Format a shell command.
pub fn fmt_command(text: &str, use_color: bool) -> String {
    paint(text, command(), use_color)
}

/// Format de-emphasized detail text.
pub fn fmt_description(text: &str, use_color: bool) -> String {
    paint(text, description(), use_color)
}

/// Format a success status label.
pub fn fmt_ok(text: &str, use_color: bool) -> String {
    paint(text, status_ok(), use_color)
}

/// Format a skipped status label.
pub fn fmt_skipped(text: &str, use_color: bool) -> String {
    paint(text, status_skipped(), use_color)
}

/// Format an error label.
pub fn fmt_error(text: &str, use_color: bool) -> String {
    paint(text, status_error(), use_color)
}
