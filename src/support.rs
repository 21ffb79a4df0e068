//! Shared support files installed alongside components.

use std::{fs, path::Path};

use crate::{
    error::{Error, Result},
    registry::UTILS_ITEM,
    session::InstallSession,
};

/// Class-merging helper imported by every component.
const UTILS_SOURCE: &str = r#"import { type ClassValue, clsx } from "clsx"
import { twMerge } from "tailwind-merge"

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs))
}
"#;

/// Packages the utilities helper imports.
pub const UTILS_DEPENDENCIES: &[&str] = &["clsx", "tailwind-merge"];

/// What happened when the support file was ensured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportOutcome {
    /// The file was written now.
    Written,
    /// The file already existed on disk and was left alone.
    Present,
    /// The file was already handled earlier in this session.
    AlreadyAdded,
}

/// Make sure the utilities helper exists at `path`, at most once per session.
pub fn ensure_utils(session: &mut InstallSession, path: &Path) -> Result<SupportOutcome> {
    if session.has_support_file(UTILS_ITEM) {
        return Ok(SupportOutcome::AlreadyAdded);
    }

    let exists = path.try_exists().map_err(|error| Error::FileRead {
        path: path.to_path_buf(),
        source: error,
    })?;
    let outcome = if exists {
        SupportOutcome::Present
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| Error::FileWrite {
                path: parent.to_path_buf(),
                source: error,
            })?;
        }
        fs::write(path, UTILS_SOURCE).map_err(|error| Error::FileWrite {
            path: path.to_path_buf(),
            source: error,
        })?;
        SupportOutcome::Written
    };

    session.mark_support_file(UTILS_ITEM);
    Ok(outcome)
}
