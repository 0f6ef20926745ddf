//! Idempotent patching of aggregator files
//!
//! Aggregator files collect references to generated modules: a package
//! `__init__.py` re-exporting model classes, or the API router file that
//! registers every endpoint module. Each `ensure_*` function reads the file,
//! adds its entry when it is missing and rewrites the file only when the text
//! changed, so running generation twice leaves exactly one entry.
//!
//! Matching is textual: an entry counts as present when it occurs anywhere in
//! the file, even followed by a comment, as long as it is not part of a
//! longer name. An entry written differently by hand (extra spaces, aliases,
//! reordered keyword arguments) is not recognised as a duplicate. Files keep
//! their line-ending convention.

mod document;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use document::{AggregatorDocument, LineEnding, LineKind};

use crate::error::{IoResultExt, Result};

/// Result of one patch call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// File did not exist; skeleton written and entry inserted
    Created,
    /// Entry added to an existing file
    Inserted,
    /// Entry already present, file untouched
    Unchanged,
}

impl PatchOutcome {
    /// Whether the file on disk changed
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Skeleton used when an aggregator file does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregatorKind {
    /// Package `__init__.py` with a one-line docstring
    Package {
        /// Human title used in the docstring, e.g. `Models`
        title: String,
    },
    /// Router module defining an `APIRouter` collection
    Router {
        /// Name of the router variable, e.g. `api_router`
        collection: String,
    },
}

impl AggregatorKind {
    /// Package skeleton
    #[must_use]
    pub fn package(title: impl Into<String>) -> Self {
        Self::Package {
            title: title.into(),
        }
    }

    /// Router skeleton
    #[must_use]
    pub fn router(collection: impl Into<String>) -> Self {
        Self::Router {
            collection: collection.into(),
        }
    }

    /// Initial file contents
    #[must_use]
    pub fn skeleton(&self) -> String {
        match self {
            Self::Package { title } => format!("\"\"\"{title} package.\"\"\"\n"),
            Self::Router { collection } => {
                format!("from fastapi import APIRouter\n\n{collection} = APIRouter()\n")
            }
        }
    }
}

/// Make sure `from <module_ref> import <symbol>` appears in `file`
///
/// The import goes directly after the last top-level import. A file without
/// imports gets it appended, separated from earlier content by a blank line.
///
/// # Errors
///
/// Returns [`crate::ScaffoldError::Io`] if the file cannot be read or written.
pub fn ensure_import(
    file: &Path,
    kind: &AggregatorKind,
    module_ref: &str,
    symbol: &str,
) -> Result<PatchOutcome> {
    let entry = format!("from {module_ref} import {symbol}");
    let (mut doc, created) = load(file, kind)?;

    if doc.contains_entry(&entry) {
        return finish(file, &doc, created, false);
    }

    if let Some(index) = doc.last_import() {
        doc.insert_after(index, &entry, LineKind::Import);
    } else {
        if doc.ends_with_content() {
            doc.push("", LineKind::Other);
        }
        doc.push(&entry, LineKind::Import);
    }

    finish(file, &doc, created, true)
}

/// Make sure `statement` appears in the router file registered on `anchor`
///
/// Insertion point, in order of preference: after the last statement calling
/// a method on `anchor`, after the statement defining `anchor`, at end of file.
/// A missing file is created with the router skeleton for `anchor` first.
///
/// # Errors
///
/// Returns [`crate::ScaffoldError::Io`] if the file cannot be read or written.
pub fn ensure_registration(file: &Path, statement: &str, anchor: &str) -> Result<PatchOutcome> {
    let (mut doc, created) = load(file, &AggregatorKind::router(anchor))?;

    if doc.contains_entry(statement) {
        return finish(file, &doc, created, false);
    }

    match doc.last_call_on(anchor).or_else(|| doc.definition_of(anchor)) {
        Some(index) => doc.insert_after(index, statement, LineKind::Other),
        None => {
            debug!(file = %file.display(), anchor, "anchor not found, appending registration");
            doc.push(statement, LineKind::Other);
        }
    }

    finish(file, &doc, created, true)
}

/// Append `lines` to an existing file that does not mention `marker`
///
/// A missing file is left missing.
///
/// # Errors
///
/// Returns [`crate::ScaffoldError::Io`] if the file cannot be read or written.
pub fn ensure_requirement(file: &Path, marker: &str, lines: &str) -> Result<PatchOutcome> {
    if !file.exists() {
        return Ok(PatchOutcome::Unchanged);
    }

    let mut content = fs::read_to_string(file).at_path(file)?;
    if content.contains(marker) {
        return Ok(PatchOutcome::Unchanged);
    }

    let ending = LineEnding::detect(&content);
    if !content.is_empty() && !content.ends_with('\n') {
        content.push_str(ending.as_str());
    }
    match ending {
        LineEnding::Lf => content.push_str(lines),
        LineEnding::CrLf => content.push_str(&lines.replace('\n', "\r\n")),
    }
    fs::write(file, content).at_path(file)?;

    debug!(file = %file.display(), marker, "appended requirement");
    Ok(PatchOutcome::Inserted)
}

/// Add missing fields to a settings class, right after its `anchor` field
///
/// Each `(name, line)` pair whose `name` does not occur in the file is
/// inserted, indented like the anchor. A missing file, or one that does not
/// define `anchor`, is left untouched.
///
/// # Errors
///
/// Returns [`crate::ScaffoldError::Io`] if the file cannot be read or written.
pub fn ensure_settings(
    file: &Path,
    anchor: &str,
    fields: &[(&str, &str)],
) -> Result<PatchOutcome> {
    if !file.exists() {
        return Ok(PatchOutcome::Unchanged);
    }

    let text = fs::read_to_string(file).at_path(file)?;
    let mut doc = AggregatorDocument::parse(&text);

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(name, _)| !doc.contains_entry(name))
        .map(|(_, line)| *line)
        .collect();
    if missing.is_empty() {
        return Ok(PatchOutcome::Unchanged);
    }

    let Some((index, indent)) = doc.field_of(anchor) else {
        debug!(file = %file.display(), anchor, "settings anchor not found, leaving file alone");
        return Ok(PatchOutcome::Unchanged);
    };
    for (offset, line) in missing.iter().enumerate() {
        doc.insert_after(index + offset, &format!("{indent}{line}"), LineKind::Other);
    }

    finish(file, &doc, false, true)
}

fn load(file: &Path, kind: &AggregatorKind) -> Result<(AggregatorDocument, bool)> {
    if file.exists() {
        let text = fs::read_to_string(file).at_path(file)?;
        Ok((AggregatorDocument::parse(&text), false))
    } else {
        Ok((AggregatorDocument::parse(&kind.skeleton()), true))
    }
}

fn finish(
    file: &Path,
    doc: &AggregatorDocument,
    created: bool,
    inserted: bool,
) -> Result<PatchOutcome> {
    if !created && !inserted {
        return Ok(PatchOutcome::Unchanged);
    }

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    fs::write(file, doc.render()).at_path(file)?;

    let outcome = if created {
        PatchOutcome::Created
    } else {
        PatchOutcome::Inserted
    };
    debug!(file = %file.display(), ?outcome, "patched aggregator");
    Ok(outcome)
}
