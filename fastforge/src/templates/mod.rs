//! Templates compiled into the crate

pub mod components;
pub mod migration;
pub mod project;

use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_MARKER_SUFFIX;
use crate::error::ScaffoldError;
use crate::template::TemplateNode;

/// Project template kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Application skeleton with API router, settings and database session
    Basic,
    /// Basic plus tests, `.env.example` and Alembic migrations
    Standard,
    /// Standard plus Docker, packaging metadata, logging and security helpers
    Enterprise,
}

impl TemplateKind {
    /// Every kind, in order of increasing size
    pub const ALL: [Self; 3] = [Self::Basic, Self::Standard, Self::Enterprise];

    /// Name used on the command line and as the template sub-directory
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Enterprise => "enterprise",
        }
    }

    /// Whether creating a project of this kind also sets up migrations
    #[must_use]
    pub const fn includes_migrations(self) -> bool {
        matches!(self, Self::Standard | Self::Enterprise)
    }

    /// Built-in `(path, contents)` pairs for this kind
    #[must_use]
    pub fn files(self) -> Vec<(&'static str, &'static str)> {
        let layers: &[&[(&str, &str)]] = match self {
            Self::Basic => &[project::BASIC_FILES],
            Self::Standard => &[project::BASIC_FILES, project::STANDARD_FILES],
            Self::Enterprise => &[
                project::BASIC_FILES,
                project::STANDARD_FILES,
                project::ENTERPRISE_FILES,
            ],
        };
        layers.iter().flat_map(|files| files.iter().copied()).collect()
    }

    /// Built-in template tree, with template files carrying `marker`
    #[must_use]
    pub fn builtin_tree(self, marker: &str) -> TemplateNode {
        embedded_tree(&self.files(), marker)
    }

    fn available() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ScaffoldError::InvalidTemplateKind {
                kind: s.to_string(),
                available: Self::available(),
            })
    }
}

/// Migration scaffold tree
#[must_use]
pub fn migration_tree(marker: &str) -> TemplateNode {
    embedded_tree(migration::FILES, marker)
}

/// Build a tree from built-in files, re-suffixing templates for `marker`
fn embedded_tree(files: &[(&'static str, &'static str)], marker: &str) -> TemplateNode {
    TemplateNode::from_embedded(
        files.iter().map(|(path, contents)| {
            let path = path
                .strip_suffix(DEFAULT_MARKER_SUFFIX)
                .map_or_else(|| (*path).to_string(), |stem| format!("{stem}{marker}"));
            (path, *contents)
        }),
        marker,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("basic".parse::<TemplateKind>().unwrap(), TemplateKind::Basic);
        assert_eq!("standard".parse::<TemplateKind>().unwrap(), TemplateKind::Standard);
        assert_eq!(
            "enterprise".parse::<TemplateKind>().unwrap(),
            TemplateKind::Enterprise
        );
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let err = "premium".parse::<TemplateKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid template kind 'premium'. Available templates: basic, standard, enterprise"
        );
    }

    #[test]
    fn test_kinds_are_layered() {
        let basic = TemplateKind::Basic.files();
        let standard = TemplateKind::Standard.files();
        let enterprise = TemplateKind::Enterprise.files();

        assert!(basic.iter().all(|f| standard.contains(f)));
        assert!(standard.iter().all(|f| enterprise.contains(f)));
        assert!(basic.len() < standard.len() && standard.len() < enterprise.len());
    }

    #[test]
    fn test_builtin_tree_has_project_wrapper() {
        let tree = TemplateKind::Standard.builtin_tree(".tmpl");
        let wrapper = tree.child_dir("{{ project_name }}").unwrap();
        assert!(wrapper.child_dir("app").is_some());
        assert_eq!(tree.children().len(), 1);
    }

    #[test]
    fn test_builtin_tree_follows_custom_marker() {
        let tree = TemplateKind::Basic.builtin_tree(".j2");
        let wrapper = tree.child_dir("{{ project_name }}").unwrap();
        let main = wrapper
            .children()
            .iter()
            .find(|c| c.name() == "main.py.j2")
            .unwrap();
        assert!(matches!(main, TemplateNode::File { renderable: true, .. }));
    }

    #[test]
    fn test_migration_tree_layout() {
        let tree = migration_tree(".tmpl");
        assert_eq!(tree.file_count(), migration::FILES.len());
        assert!(tree.child_dir("migrations").unwrap().child_dir("versions").is_some());
    }
}
