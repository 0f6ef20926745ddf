//! In-memory template tree

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Where a template file's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Contents held in memory (built-in templates)
    Inline(Cow<'static, [u8]>),
    /// Contents read from disk at render time
    Disk(PathBuf),
}

/// A node in a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    /// Directory with children sorted by name
    Directory {
        /// Directory name (may be a `{{ variable }}` placeholder)
        name: String,
        /// Child nodes
        children: Vec<TemplateNode>,
    },
    /// Template or static file
    File {
        /// File name as found in the template tree
        name: String,
        /// Contents
        source: FileSource,
        /// Whether the name carries the marker suffix
        renderable: bool,
    },
}

impl TemplateNode {
    /// Empty root directory
    #[must_use]
    pub const fn root() -> Self {
        Self::Directory {
            name: String::new(),
            children: Vec::new(),
        }
    }

    /// Node name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Directory { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// Children of a directory; empty for files
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Directory { children, .. } => children,
            Self::File { .. } => &[],
        }
    }

    /// Find a direct child directory by its literal name
    #[cfg(test)]
    #[must_use]
    pub fn child_dir(&self, name: &str) -> Option<&Self> {
        self.children()
            .iter()
            .find(|child| matches!(child, Self::Directory { .. }) && child.name() == name)
    }

    /// Find a direct child directory named by a single `{{ variable }}` placeholder
    ///
    /// Whitespace inside the braces is ignored, so `{{project_name}}` and
    /// `{{ project_name }}` both match `project_name`.
    #[must_use]
    pub fn placeholder_dir(&self, variable: &str) -> Option<&Self> {
        self.children().iter().find(|child| {
            matches!(child, Self::Directory { .. })
                && super::render::segment_variable(child.name()) == Some(variable)
        })
    }

    /// Number of files below this node
    #[cfg(test)]
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::File { .. } => 1,
            Self::Directory { children, .. } => children.iter().map(Self::file_count).sum(),
        }
    }

    /// Build a tree from `(relative path, contents)` pairs
    ///
    /// Paths use `/` separators. Intermediate directories are created as
    /// needed.
    #[must_use]
    pub fn from_embedded<P: AsRef<str>>(
        files: impl IntoIterator<Item = (P, &'static str)>,
        marker: &str,
    ) -> Self {
        let mut root = Self::root();
        for (path, contents) in files {
            let components: Vec<&str> = path
                .as_ref()
                .split('/')
                .filter(|c| !c.is_empty())
                .collect();
            let Some((file_name, dirs)) = components.split_last() else {
                continue;
            };
            let leaf = Self::File {
                name: (*file_name).to_string(),
                source: FileSource::Inline(Cow::Borrowed(contents.as_bytes())),
                renderable: is_renderable(file_name, marker),
            };
            root.insert(dirs, leaf);
        }
        root.sort();
        root
    }

    /// Load a template tree from a directory on disk
    ///
    /// The returned root node is unnamed; its children mirror the entries of
    /// `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidTemplate`] if `dir` is not a directory
    /// and [`ScaffoldError::Io`] if it cannot be walked.
    pub fn from_dir(dir: &Path, marker: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ScaffoldError::InvalidTemplate {
                path: dir.to_path_buf(),
                reason: "template root is not a directory".to_string(),
            });
        }

        let mut root = Self::root();
        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| walk_error(dir, err))?;
            let relative = entry
                .path()
                .strip_prefix(dir)
                .map_err(|_| ScaffoldError::InvalidTemplate {
                    path: entry.path().to_path_buf(),
                    reason: "entry escapes template root".to_string(),
                })?;

            let components: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let Some((name, dirs)) = components.split_last() else {
                continue;
            };
            let dirs: Vec<&str> = dirs.iter().map(String::as_str).collect();

            let node = if entry.file_type().is_dir() {
                Self::Directory {
                    name: name.clone(),
                    children: Vec::new(),
                }
            } else {
                Self::File {
                    name: name.clone(),
                    source: FileSource::Disk(entry.path().to_path_buf()),
                    renderable: is_renderable(name, marker),
                }
            };
            root.insert(&dirs, node);
        }
        root.sort();
        Ok(root)
    }

    fn insert(&mut self, dirs: &[&str], node: Self) {
        let Self::Directory { children, .. } = self else {
            return;
        };

        match dirs.split_first() {
            None => {
                let exists = children.iter().any(|c| c.name() == node.name());
                if !exists {
                    children.push(node);
                }
            }
            Some((head, rest)) => {
                let position = children
                    .iter()
                    .position(|c| matches!(c, Self::Directory { .. }) && c.name() == *head);
                let index = position.unwrap_or_else(|| {
                    children.push(Self::Directory {
                        name: (*head).to_string(),
                        children: Vec::new(),
                    });
                    children.len() - 1
                });
                children[index].insert(rest, node);
            }
        }
    }

    fn sort(&mut self) {
        if let Self::Directory { children, .. } = self {
            children.sort_by(|a, b| a.name().cmp(b.name()));
            children.iter_mut().for_each(Self::sort);
        }
    }
}

/// Whether a file name marks a renderable template
#[must_use]
pub fn is_renderable(name: &str, marker: &str) -> bool {
    !marker.is_empty() && name.len() > marker.len() && name.ends_with(marker)
}

fn walk_error(root: &Path, err: walkdir::Error) -> ScaffoldError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(source) => ScaffoldError::Io { path, source },
        None => ScaffoldError::InvalidTemplate {
            path,
            reason: "filesystem loop in template tree".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_embedded_builds_sorted_tree() {
        let tree = TemplateNode::from_embedded(
            [
                ("b.txt", "b"),
                ("app/models/__init__.py.tmpl", "\"\"\"{{ title_name }}\"\"\""),
                ("app/core/config.py", "x = 1"),
                ("a.md.tmpl", "# {{ name }}"),
            ],
            ".tmpl",
        );

        let names: Vec<&str> = tree.children().iter().map(TemplateNode::name).collect();
        assert_eq!(names, vec!["a.md.tmpl", "app", "b.txt"]);

        let app = tree.child_dir("app").unwrap();
        let app_names: Vec<&str> = app.children().iter().map(TemplateNode::name).collect();
        assert_eq!(app_names, vec!["core", "models"]);
        assert_eq!(tree.file_count(), 4);
    }

    #[test]
    fn test_renderable_flag() {
        assert!(is_renderable("main.py.tmpl", ".tmpl"));
        assert!(!is_renderable("main.py", ".tmpl"));
        assert!(!is_renderable(".tmpl", ".tmpl"));
        assert!(!is_renderable("main.py", ""));
    }

    #[test]
    fn test_from_dir_mirrors_filesystem() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("{{ project_name }}/app")).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("{{ project_name }}/main.py.tmpl"), "x").unwrap();
        fs::write(dir.path().join("{{ project_name }}/app/logo.png"), [0_u8, 159, 146]).unwrap();

        let tree = TemplateNode::from_dir(dir.path(), ".tmpl").unwrap();
        let wrapper = tree.child_dir("{{ project_name }}").unwrap();
        assert_eq!(tree.placeholder_dir("project_name"), Some(wrapper));
        assert_eq!(wrapper.file_count(), 2);
        assert!(tree.child_dir("empty").is_some());

        let main = wrapper
            .children()
            .iter()
            .find(|c| c.name() == "main.py.tmpl")
            .unwrap();
        assert!(matches!(main, TemplateNode::File { renderable: true, .. }));
    }

    #[test]
    fn test_from_dir_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            TemplateNode::from_dir(&file, ".tmpl"),
            Err(ScaffoldError::InvalidTemplate { .. })
        ));
    }
}
