//! Placeholder substitution and tree rendering

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::context::SubstitutionContext;
use super::node::{FileSource, TemplateNode};
use crate::error::{IoResultExt, Result, ScaffoldError};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("static regex")
});

static SEGMENT_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}$").expect("static regex")
});

/// Substitute every `{{ variable }}` placeholder in `text`
///
/// Text that does not match the placeholder grammar (Python f-string braces,
/// `${VAR}`, `{{ not valid }}`) passes through untouched. `template` names the
/// source in error messages.
///
/// # Errors
///
/// Returns [`ScaffoldError::UnresolvedVariable`] for the first placeholder
/// whose variable is missing from `ctx`.
///
/// # Examples
///
/// ```
/// use fastforge::template::{render_one, SubstitutionContext};
///
/// let ctx = SubstitutionContext::new().with("class_name", "Post");
/// let out = render_one("class {{ class_name }}(Base): {x}", &ctx, "model.py").unwrap();
/// assert_eq!(out, "class Post(Base): {x}");
/// ```
pub fn render_one(text: &str, ctx: &SubstitutionContext, template: &str) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(variable)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = ctx
            .get(variable.as_str())
            .ok_or_else(|| ScaffoldError::UnresolvedVariable {
                variable: variable.as_str().to_string(),
                template: template.to_string(),
            })?;
        output.push_str(&text[last..whole.start()]);
        output.push_str(value);
        last = whole.end();
    }

    output.push_str(&text[last..]);
    Ok(output)
}

/// Files produced by one render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTree {
    /// Directory the tree was rendered into
    pub root: PathBuf,
    /// Every file written, in render order
    pub files: Vec<PathBuf>,
}

/// Renders template trees onto the filesystem
#[derive(Debug, Clone)]
pub struct Renderer {
    marker_suffix: String,
}

impl Renderer {
    /// Create a renderer that treats names ending in `marker_suffix` as templates
    #[must_use]
    pub fn new(marker_suffix: impl Into<String>) -> Self {
        Self {
            marker_suffix: marker_suffix.into(),
        }
    }

    /// Marker suffix stripped from renderable file names
    #[must_use]
    pub fn marker_suffix(&self) -> &str {
        &self.marker_suffix
    }

    /// Render the children of `root` into `output_root`
    ///
    /// The root node's own name is ignored. `output_root` is created when
    /// missing; existing files inside it are overwritten.
    ///
    /// # Errors
    ///
    /// Fails on the first unresolved variable, non-UTF-8 template or I/O
    /// error. Files written before the failure are left in place.
    pub fn render(
        &self,
        root: &TemplateNode,
        output_root: &Path,
        ctx: &SubstitutionContext,
    ) -> Result<RenderedTree> {
        fs::create_dir_all(output_root).at_path(output_root)?;

        let mut files = Vec::new();
        for child in root.children() {
            self.render_into(child, output_root, ctx, &mut files)?;
        }

        Ok(RenderedTree {
            root: output_root.to_path_buf(),
            files,
        })
    }

    fn render_into(
        &self,
        node: &TemplateNode,
        parent: &Path,
        ctx: &SubstitutionContext,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        match node {
            TemplateNode::Directory { name, children } => {
                let path = parent.join(resolve_segment(name, ctx, parent)?);
                fs::create_dir_all(&path).at_path(&path)?;
                for child in children {
                    self.render_into(child, &path, ctx, files)?;
                }
                Ok(())
            }
            TemplateNode::File {
                name,
                source,
                renderable,
            } => {
                let output_name = if *renderable {
                    name.strip_suffix(self.marker_suffix.as_str()).unwrap_or(name)
                } else {
                    name.as_str()
                };
                let path = parent.join(resolve_segment(output_name, ctx, parent)?);

                if *renderable {
                    let text = read_text(source, name)?;
                    let rendered = render_one(&text, ctx, &template_label(source, name))?;
                    fs::write(&path, rendered).at_path(&path)?;
                } else {
                    copy_static(source, &path)?;
                }

                debug!(path = %path.display(), rendered = *renderable, "wrote file");
                files.push(path);
                Ok(())
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MARKER_SUFFIX)
    }
}

/// Variable named by a path segment consisting of exactly one placeholder
#[must_use]
pub fn segment_variable(segment: &str) -> Option<&str> {
    SEGMENT_PLACEHOLDER
        .captures(segment)
        .and_then(|captures| captures.get(1))
        .map(|variable| variable.as_str())
}

/// Resolve a path segment that consists of exactly one placeholder
fn resolve_segment<'a>(
    segment: &'a str,
    ctx: &'a SubstitutionContext,
    parent: &Path,
) -> Result<&'a str> {
    let Some(variable) = segment_variable(segment) else {
        return Ok(segment);
    };

    let value = ctx
        .get(variable)
        .ok_or_else(|| ScaffoldError::UnresolvedVariable {
            variable: variable.to_string(),
            template: parent.join(segment).display().to_string(),
        })?;

    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(ScaffoldError::InvalidTemplate {
            path: parent.join(segment),
            reason: format!("'{value}' is not a valid path segment"),
        });
    }
    Ok(value)
}

fn read_text<'a>(source: &'a FileSource, name: &str) -> Result<Cow<'a, str>> {
    match source {
        FileSource::Inline(bytes) => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| ScaffoldError::InvalidTemplate {
                path: PathBuf::from(name),
                reason: "template is not valid UTF-8".to_string(),
            }),
        FileSource::Disk(path) => {
            let bytes = fs::read(path).at_path(path)?;
            String::from_utf8(bytes)
                .map(Cow::Owned)
                .map_err(|_| ScaffoldError::InvalidTemplate {
                    path: path.clone(),
                    reason: "template is not valid UTF-8".to_string(),
                })
        }
    }
}

fn copy_static(source: &FileSource, destination: &Path) -> Result<()> {
    match source {
        FileSource::Inline(bytes) => fs::write(destination, bytes).at_path(destination),
        FileSource::Disk(path) => {
            let metadata = fs::metadata(path).at_path(path)?;
            let mut input = fs::File::open(path).at_path(path)?;
            let mut output = fs::File::create(destination).at_path(destination)?;
            io::copy(&mut input, &mut output).at_path(destination)?;
            metadata
                .modified()
                .and_then(|modified| output.set_modified(modified))
                .at_path(destination)?;
            drop(output);
            fs::set_permissions(destination, metadata.permissions()).at_path(destination)
        }
    }
}

fn template_label(source: &FileSource, name: &str) -> String {
    match source {
        FileSource::Inline(_) => name.to_string(),
        FileSource::Disk(path) => path.display().to_string(),
    }
}
