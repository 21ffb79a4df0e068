//! Import path rewriting for installed component files.
//!
//! Registry sources import the shared utilities module as `../lib/utils` or
//! `../../lib/utils`. Both forms are replaced with `../../../lib/utils`, which
//! is where the helper sits relative to `src/components/ui/<name>/`. Only the
//! literal entries in [`REWRITE_TABLE`] are touched.

/// Ordered `(pattern, replacement)` pairs applied to every installed file.
///
/// Patterns include their quote characters so an already rewritten import
/// never matches again.
pub const REWRITE_TABLE: &[(&str, &str)] = &[
    ("\"../lib/utils\"", "\"../../../lib/utils\""),
    ("'../lib/utils'", "'../../../lib/utils'"),
    ("\"../../lib/utils\"", "\"../../../lib/utils\""),
    ("'../../lib/utils'", "'../../../lib/utils'"),
];

/// Result of rewriting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// Content with imports rewritten.
    pub content: String,
    /// Number of import strings that were replaced.
    pub replacements: usize,
}

/// Apply [`REWRITE_TABLE`] to `content` once.
pub fn rewrite_imports(content: &str) -> Rewritten {
    let mut output = content.to_string();
    let mut replacements = 0;
    for (pattern, replacement) in REWRITE_TABLE {
        let count = output.matches(pattern).count();
        if count > 0 {
            output = output.replace(pattern, replacement);
            replacements += count;
        }
    }
    Rewritten {
        content: output,
        replacements,
    }
}
