//! # fastforge
//!
//! Scaffolding engine for FastAPI projects.
//!
//! fastforge renders project skeletons from template trees and generates
//! resource components (models, schemas, CRUD routers, services, Alembic
//! migrations) into an existing project. Generated modules are registered in
//! their package `__init__.py` or in the API router file; registration is
//! idempotent, so running a generator twice never duplicates an entry and
//! never clobbers hand-written code around it.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use fastforge::Scaffolder;
//!
//! # fn main() -> fastforge::Result<()> {
//! let scaffolder = Scaffolder::default();
//! let project = scaffolder.create_project("blog", Path::new("."), "standard")?;
//! scaffolder.generate_component("model", "post", &project.root)?;
//! scaffolder.generate_component("api", "post", &project.root)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`naming`]: user input to identifier, class, kebab and plural forms
//! - [`template`]: template trees and `{{ variable }}` rendering
//! - [`aggregator`]: idempotent import and router-registration patching
//! - [`scaffold`]: project and component orchestration
//! - [`templates`]: built-in project, component and migration templates
//! - [`config`]: layered configuration

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod naming;
pub mod scaffold;
pub mod template;
pub mod templates;

pub use config::GeneratorConfig;
pub use error::{Result, ScaffoldError};
pub use scaffold::{ComponentKind, GenerationReport, Scaffolder};
pub use templates::TemplateKind;
