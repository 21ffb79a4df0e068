//! Line diffs shown before overwriting an installed file.

use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context kept around each change.
const CONTEXT_LINES: usize = 2;

/// Render the changes between the installed file and the registry copy.
///
/// Returns `None` when the two texts are line-for-line identical.
pub fn overwrite_preview(existing: &str, incoming: &str, color: bool) -> Option<String> {
    let diff = TextDiff::from_lines(existing, incoming);
    let groups = diff.grouped_ops(CONTEXT_LINES);
    if groups.is_empty() {
        return None;
    }

    let mut output = String::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            output.push_str("  ...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                let line = format!("{sign} {}", change.value().trim_end_matches('\n'));
                let line = match (color, change.tag()) {
                    (true, ChangeTag::Delete) => line.red().to_string(),
                    (true, ChangeTag::Insert) => line.green().to_string(),
                    (true, ChangeTag::Equal) => line.dimmed().to_string(),
                    (false, _) => line,
                };
                output.push_str(&line);
                output.push('\n');
            }
        }
    }
    Some(output)
}
