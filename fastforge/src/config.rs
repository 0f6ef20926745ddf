//! Generator configuration
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `fastforge.toml` in the project root, or an explicit file passed with
//!    `--config`
//! 3. Environment variables with the `FASTFORGE_` prefix, `__` for nesting
//!    (`FASTFORGE_LAYOUT__ROUTER_NAME=router`)
//!
//! # Example Configuration
//!
//! ```toml
//! # fastforge.toml
//! marker_suffix = ".tmpl"
//!
//! [templates]
//! dir = "./my-templates"   # contains basic/, standard/, enterprise/
//!
//! [layout]
//! models = "models"
//! schemas = "schemas"
//! services = "services"
//! endpoints = "api/api_v1/endpoints"
//! router_file = "api/api_v1/api.py"
//! router_name = "api_router"
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};

/// Default suffix marking a file as a template
pub const DEFAULT_MARKER_SUFFIX: &str = ".tmpl";

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "fastforge.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "FASTFORGE_";

/// Where project templates are loaded from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory with one sub-directory per template kind; built-in templates
    /// are used when unset
    pub dir: Option<PathBuf>,
}

/// Locations of generated components, relative to the application directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Model modules
    pub models: PathBuf,
    /// Request/response schema modules
    pub schemas: PathBuf,
    /// Service classes
    pub services: PathBuf,
    /// Endpoint routers
    pub endpoints: PathBuf,
    /// Module aggregating every endpoint router
    pub router_file: PathBuf,
    /// Name of the router collection inside `router_file`
    pub router_name: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            models: PathBuf::from("models"),
            schemas: PathBuf::from("schemas"),
            services: PathBuf::from("services"),
            endpoints: PathBuf::from("api/api_v1/endpoints"),
            router_file: PathBuf::from("api/api_v1/api.py"),
            router_name: "api_router".to_string(),
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// File-name suffix marking templates; stripped from rendered names
    pub marker_suffix: String,
    /// Template source settings
    pub templates: TemplateSettings,
    /// Generated component layout
    pub layout: LayoutSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_suffix: DEFAULT_MARKER_SUFFIX.to_string(),
            templates: TemplateSettings::default(),
            layout: LayoutSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration for a project root
    ///
    /// Reads `<root>/fastforge.toml` when present.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if a layer cannot be parsed.
    pub fn load(root: &Path) -> Result<Self> {
        Self::figment(&root.join(CONFIG_FILE_NAME))
            .extract()
            .map_err(|err| ScaffoldError::Config(Box::new(err)))
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the file does not exist and
    /// [`ScaffoldError::Config`] if a layer cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ScaffoldError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "configuration file not found"),
            ));
        }

        Self::figment(path)
            .extract()
            .map_err(|err| ScaffoldError::Config(Box::new(err)))
    }

    fn figment(file: &Path) -> Figment {
        let defaults = toml::to_string(&Self::default()).unwrap_or_default();
        let mut figment = Figment::new().merge(Toml::string(&defaults));

        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
    }
}
