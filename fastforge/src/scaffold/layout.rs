//! Resolved component locations inside a project

use std::path::{Component, Path, PathBuf};

use crate::config::LayoutSettings;

/// Component directories for one generation call
#[derive(Debug, Clone)]
pub struct AppLayout<'a> {
    app_dir: PathBuf,
    settings: &'a LayoutSettings,
}

impl<'a> AppLayout<'a> {
    /// Locate the application directory under `output_dir`
    ///
    /// Uses `output_dir/app` when that directory exists, otherwise treats
    /// `output_dir` itself as the application directory.
    #[must_use]
    pub fn resolve(output_dir: &Path, settings: &'a LayoutSettings) -> Self {
        let nested = output_dir.join("app");
        let app_dir = if nested.is_dir() {
            nested
        } else {
            output_dir.to_path_buf()
        };
        Self { app_dir, settings }
    }

    /// Application directory
    #[must_use]
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Model modules directory
    #[must_use]
    pub fn models_dir(&self) -> PathBuf {
        self.app_dir.join(&self.settings.models)
    }

    /// Schema modules directory
    #[must_use]
    pub fn schemas_dir(&self) -> PathBuf {
        self.app_dir.join(&self.settings.schemas)
    }

    /// Service modules directory
    #[must_use]
    pub fn services_dir(&self) -> PathBuf {
        self.app_dir.join(&self.settings.services)
    }

    /// Endpoint modules directory
    #[must_use]
    pub fn endpoints_dir(&self) -> PathBuf {
        self.app_dir.join(&self.settings.endpoints)
    }

    /// Router aggregator file
    #[must_use]
    pub fn router_file(&self) -> PathBuf {
        self.app_dir.join(&self.settings.router_file)
    }

    /// Router collection name
    #[must_use]
    pub fn router_name(&self) -> &str {
        &self.settings.router_name
    }

    /// Module path the router file uses to import endpoint modules
    ///
    /// Relative (`.endpoints`) when the endpoints package sits below the
    /// router file's directory, absolute (`app.api.endpoints`) otherwise.
    #[must_use]
    pub fn endpoints_module_ref(&self) -> String {
        let router_dir = self
            .settings
            .router_file
            .parent()
            .unwrap_or_else(|| Path::new(""));

        match self.settings.endpoints.strip_prefix(router_dir) {
            Ok(relative) => format!(".{}", dotted(relative)),
            Err(_) => format!("app.{}", dotted(&self.settings.endpoints)),
        }
    }
}

fn dotted(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}
