//! Scaffold orchestration
//!
//! [`Scaffolder`] ties the pieces together: it normalizes the user's name,
//! renders project trees or single-file component templates, and patches the
//! aggregator files that reference generated modules.
//!
//! Every call is self-contained and returns a [`GenerationReport`] listing the
//! files written and the aggregators touched.

mod layout;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info, warn};

pub use layout::AppLayout;

use crate::aggregator::{
    ensure_import, ensure_registration, ensure_requirement, ensure_settings, AggregatorKind,
    PatchOutcome,
};
use crate::config::GeneratorConfig;
use crate::error::{IoResultExt, Result, ScaffoldError};
use crate::naming::{normalize, NameForms};
use crate::template::{render_one, RenderedTree, Renderer, SubstitutionContext, TemplateNode};
use crate::templates::{components, migration, migration_tree, TemplateKind};

/// Variable naming the project wrapper directory in a template tree
pub const PROJECT_WRAPPER_VARIABLE: &str = "project_name";

/// Component kinds accepted by [`Scaffolder::generate_component`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Table model plus request/response schemas
    Model,
    /// CRUD endpoint router registered in the API router
    Api,
    /// Service class
    Service,
    /// Alembic migration scaffold
    Migration,
}

impl ComponentKind {
    /// Every kind
    pub const ALL: [Self; 4] = [Self::Model, Self::Api, Self::Service, Self::Migration];

    /// Command-line name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Api => "api",
            Self::Service => "service",
            Self::Migration => "migration",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ScaffoldError::InvalidComponentKind {
                kind: s.to_string(),
                available: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

/// What one orchestrator call did on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Directory the operation worked in (the new project for `create`)
    pub root: PathBuf,
    /// Files written, in order
    pub files_written: Vec<PathBuf>,
    /// Aggregator files examined and what happened to each
    pub aggregators_updated: Vec<(PathBuf, PatchOutcome)>,
}

impl GenerationReport {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Self::default()
        }
    }

    fn record_patch(&mut self, file: PathBuf, outcome: PatchOutcome) {
        self.aggregators_updated.push((file, outcome));
    }

    fn absorb_render(&mut self, rendered: RenderedTree) {
        self.files_written.extend(rendered.files);
    }

    fn absorb(&mut self, other: Self) {
        self.files_written.extend(other.files_written);
        self.aggregators_updated.extend(other.aggregators_updated);
    }

    /// Aggregators whose contents changed
    pub fn changed_aggregators(&self) -> impl Iterator<Item = &(PathBuf, PatchOutcome)> {
        self.aggregators_updated
            .iter()
            .filter(|(_, outcome)| outcome.changed())
    }
}

/// Entry point for project and component generation
#[derive(Debug, Clone)]
pub struct Scaffolder {
    config: GeneratorConfig,
    renderer: Renderer,
}

impl Default for Scaffolder {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Scaffolder {
    /// Create a scaffolder with the given configuration
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let renderer = Renderer::new(config.marker_suffix.clone());
        Self { config, renderer }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Create a new project directory `target_dir/<identifier>`
    ///
    /// `kind` must be `basic`, `standard` or `enterprise`. The kind is
    /// validated and the template tree loaded before anything is written. If
    /// a later step fails the partially written project directory is removed.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::InvalidTemplateKind`] for an unknown kind
    /// - [`ScaffoldError::InvalidName`] for an unusable name
    /// - [`ScaffoldError::AlreadyExists`] if the destination exists; it is left
    ///   untouched
    /// - rendering and I/O errors from the template or migration steps
    pub fn create_project(
        &self,
        name: &str,
        target_dir: &Path,
        kind: &str,
    ) -> Result<GenerationReport> {
        let kind: TemplateKind = kind.parse()?;
        let forms = normalize(name)?;
        let destination = target_dir.join(&forms.identifier);

        if destination.exists() {
            return Err(ScaffoldError::AlreadyExists(destination));
        }

        let tree = self.project_tree(kind)?;
        info!(
            project = %forms.identifier,
            kind = %kind,
            destination = %destination.display(),
            "creating project"
        );

        match self.populate_project(kind, &forms, &tree, &destination) {
            Ok(report) => {
                info!(files = report.files_written.len(), "project created");
                Ok(report)
            }
            Err(err) => {
                if destination.exists() {
                    if let Err(cleanup) = fs::remove_dir_all(&destination) {
                        warn!(
                            destination = %destination.display(),
                            error = %cleanup,
                            "failed to remove partially created project"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    /// Generate a component inside an existing project
    ///
    /// `kind` must be `model`, `api`, `service` or `migration`. Existing
    /// component files are overwritten; aggregator entries are added at most
    /// once.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::InvalidComponentKind`] for an unknown kind
    /// - [`ScaffoldError::InvalidName`] for an unusable name
    /// - rendering and I/O errors
    pub fn generate_component(
        &self,
        kind: &str,
        name: &str,
        output_dir: &Path,
    ) -> Result<GenerationReport> {
        let kind: ComponentKind = kind.parse()?;
        let forms = normalize(name)?;

        if kind == ComponentKind::Migration {
            return self.generate_migration_scaffold(output_dir);
        }

        let layout = AppLayout::resolve(output_dir, &self.config.layout);
        let ctx = SubstitutionContext::for_component(&forms);
        let mut report = GenerationReport::new(layout.app_dir());

        info!(kind = %kind, name = %forms.identifier, app_dir = %layout.app_dir().display(), "generating component");

        match kind {
            ComponentKind::Model => generate_model(&forms, &layout, &ctx, &mut report)?,
            ComponentKind::Api => generate_api(&forms, &layout, &ctx, &mut report)?,
            ComponentKind::Service => generate_service(&forms, &layout, &ctx, &mut report)?,
            ComponentKind::Migration => {}
        }

        Ok(report)
    }

    /// Write the Alembic migration scaffold into `output_dir`
    ///
    /// Existing scaffold files are overwritten. `alembic` is appended to
    /// `requirements.txt` when that file exists and does not mention it, and
    /// `DB_ECHO` / `DB_CONNECT_ARGS` are added after `DATABASE_URL` in
    /// `app/core/config.py` when missing, since the scaffold's session module
    /// reads them.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from writing the scaffold or patching requirements
    /// and settings.
    pub fn generate_migration_scaffold(&self, output_dir: &Path) -> Result<GenerationReport> {
        let mut report = GenerationReport::new(output_dir);

        if output_dir.join("alembic.ini").exists() {
            warn!(dir = %output_dir.display(), "overwriting existing migration scaffold");
        }

        let tree = migration_tree(self.renderer.marker_suffix());
        let rendered = self
            .renderer
            .render(&tree, output_dir, &SubstitutionContext::new())?;
        report.absorb_render(rendered);

        let requirements = output_dir.join("requirements.txt");
        let outcome = ensure_requirement(
            &requirements,
            migration::REQUIREMENT_MARKER,
            migration::REQUIREMENT_BLOCK,
        )?;
        if requirements.exists() {
            report.record_patch(requirements, outcome);
        }

        let settings = output_dir.join(migration::SETTINGS_FILE);
        let outcome = ensure_settings(
            &settings,
            migration::SETTINGS_ANCHOR,
            migration::SETTINGS_FIELDS,
        )?;
        if settings.exists() {
            report.record_patch(settings, outcome);
        }

        info!(dir = %output_dir.display(), "migration scaffold written");
        Ok(report)
    }

    fn project_tree(&self, kind: TemplateKind) -> Result<TemplateNode> {
        match &self.config.templates.dir {
            Some(dir) => {
                let root = dir.join(kind.as_str());
                debug!(templates = %root.display(), "loading project templates from disk");
                TemplateNode::from_dir(&root, self.renderer.marker_suffix())
            }
            None => Ok(kind.builtin_tree(self.renderer.marker_suffix())),
        }
    }

    fn populate_project(
        &self,
        kind: TemplateKind,
        forms: &NameForms,
        tree: &TemplateNode,
        destination: &Path,
    ) -> Result<GenerationReport> {
        let ctx = SubstitutionContext::for_project(forms);
        let mut report = GenerationReport::new(destination);

        let contents = tree
            .placeholder_dir(PROJECT_WRAPPER_VARIABLE)
            .unwrap_or(tree);
        report.absorb_render(self.renderer.render(contents, destination, &ctx)?);

        if kind.includes_migrations() {
            report.absorb(self.generate_migration_scaffold(destination)?);
        }

        Ok(report)
    }
}

fn generate_model(
    forms: &NameForms,
    layout: &AppLayout<'_>,
    ctx: &SubstitutionContext,
    report: &mut GenerationReport,
) -> Result<()> {
    let models_dir = layout.models_dir();
    let file_name = format!("{}.py", forms.identifier);

    write_component(&models_dir.join(&file_name), components::MODEL, ctx, report)?;
    write_component(
        &layout.schemas_dir().join(&file_name),
        components::SCHEMA,
        ctx,
        report,
    )?;

    let init = models_dir.join("__init__.py");
    let outcome = ensure_import(
        &init,
        &AggregatorKind::package("Models"),
        &format!(".{}", forms.identifier),
        &forms.class_identifier,
    )?;
    report.record_patch(init, outcome);
    Ok(())
}

fn generate_api(
    forms: &NameForms,
    layout: &AppLayout<'_>,
    ctx: &SubstitutionContext,
    report: &mut GenerationReport,
) -> Result<()> {
    let endpoints_dir = layout.endpoints_dir();
    write_component(
        &endpoints_dir.join(format!("{}.py", forms.identifier)),
        components::API,
        ctx,
        report,
    )?;

    let package_init = endpoints_dir.join("__init__.py");
    if !package_init.exists() {
        fs::write(&package_init, "").at_path(&package_init)?;
        report.files_written.push(package_init);
    }

    let router_file = layout.router_file();
    let router_name = layout.router_name();
    let import = ensure_import(
        &router_file,
        &AggregatorKind::router(router_name),
        &layout.endpoints_module_ref(),
        &forms.identifier,
    )?;
    report.record_patch(router_file.clone(), import);

    let statement = format!(
        "{router_name}.include_router({id}.router, prefix=\"/{plural}\", tags=[\"{plural}\"])",
        id = forms.identifier,
        plural = forms.plural_identifier,
    );
    let registration = ensure_registration(&router_file, &statement, router_name)?;
    report.record_patch(router_file, registration);
    Ok(())
}

fn generate_service(
    forms: &NameForms,
    layout: &AppLayout<'_>,
    ctx: &SubstitutionContext,
    report: &mut GenerationReport,
) -> Result<()> {
    let services_dir = layout.services_dir();
    write_component(
        &services_dir.join(format!("{}_service.py", forms.identifier)),
        components::SERVICE,
        ctx,
        report,
    )?;

    let init = services_dir.join("__init__.py");
    let outcome = ensure_import(
        &init,
        &AggregatorKind::package("Services"),
        &format!(".{}_service", forms.identifier),
        &format!("{}Service", forms.class_identifier),
    )?;
    report.record_patch(init, outcome);
    Ok(())
}

/// Render a single-file template to `path`, creating parent directories
fn write_component(
    path: &Path,
    template: &str,
    ctx: &SubstitutionContext,
    report: &mut GenerationReport,
) -> Result<()> {
    let label = path
        .file_name()
        .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
    let rendered = render_one(template, ctx, &label)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    if path.exists() {
        warn!(path = %path.display(), "overwriting existing file");
    }

    fs::write(path, rendered).at_path(path)?;
    debug!(path = %path.display(), "wrote component");
    report.files_written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_component_kind() {
        assert_eq!("api".parse::<ComponentKind>().unwrap(), ComponentKind::Api);
        let err = "controller".parse::<ComponentKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown component kind 'controller'. Available kinds: model, api, service, migration"
        );
    }

    #[test]
    fn test_model_generation_without_app_dir() {
        let dir = tempdir().unwrap();
        let report = Scaffolder::default()
            .generate_component("model", "BlogPost", dir.path())
            .unwrap();

        let model = fs::read_to_string(dir.path().join("models/blog_post.py")).unwrap();
        assert!(model.contains("class BlogPost(BlogPostBase, table=True):"));
        assert!(model.contains("__tablename__ = \"blog_posts\""));

        let schema = fs::read_to_string(dir.path().join("schemas/blog_post.py")).unwrap();
        assert!(schema.contains("from app.models.blog_post import BlogPostBase"));
        assert!(!dir.path().join("schemas/__init__.py").exists());

        assert_eq!(report.files_written.len(), 2);
        assert_eq!(
            report.aggregators_updated,
            vec![(dir.path().join("models/__init__.py"), PatchOutcome::Created)]
        );
    }

    #[test]
    fn test_api_generation_registers_router() {
        let dir = tempdir().unwrap();
        let scaffolder = Scaffolder::default();
        scaffolder
            .generate_component("api", "category", dir.path())
            .unwrap();

        let router = fs::read_to_string(dir.path().join("api/api_v1/api.py")).unwrap();
        assert_eq!(
            router,
            "from fastapi import APIRouter\n\
             from .endpoints import category\n\
             \n\
             api_router = APIRouter()\n\
             api_router.include_router(category.router, prefix=\"/categories\", tags=[\"categories\"])\n"
        );
        assert!(dir.path().join("api/api_v1/endpoints/__init__.py").exists());

        let endpoint =
            fs::read_to_string(dir.path().join("api/api_v1/endpoints/category.py")).unwrap();
        assert!(endpoint.contains("@router.get(\"/{category_id}\", response_model=CategoryRead)"));
        assert!(endpoint.contains("def list_categories("));
    }

    #[test]
    fn test_service_generation() {
        let dir = tempdir().unwrap();
        Scaffolder::default()
            .generate_component("service", "order item", dir.path())
            .unwrap();

        let service = fs::read_to_string(dir.path().join("services/order_item_service.py")).unwrap();
        assert!(service.contains("class OrderItemService:"));
        let init = fs::read_to_string(dir.path().join("services/__init__.py")).unwrap();
        assert!(init.contains("from .order_item_service import OrderItemService"));
    }

    #[test]
    fn test_custom_layout_is_respected() {
        let dir = tempdir().unwrap();
        let mut config = GeneratorConfig::default();
        config.layout.services = PathBuf::from("domain");
        Scaffolder::new(config)
            .generate_component("service", "invoice", dir.path())
            .unwrap();
        assert!(dir.path().join("domain/invoice_service.py").exists());
    }

    #[test]
    fn test_invalid_component_kind_writes_nothing() {
        let dir = tempdir().unwrap();
        let err = Scaffolder::default()
            .generate_component("widget", "post", dir.path())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidComponentKind { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_migration_scaffold_patches_requirements_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("requirements.txt"), "fastapi\n").unwrap();
        let scaffolder = Scaffolder::default();

        let first = scaffolder.generate_migration_scaffold(dir.path()).unwrap();
        assert_eq!(first.files_written.len(), migration::FILES.len());
        assert!(dir.path().join("migrations/versions/__init__.py").exists());
        assert!(dir.path().join("app/db/base.py").exists());

        scaffolder.generate_migration_scaffold(dir.path()).unwrap();
        let requirements = fs::read_to_string(dir.path().join("requirements.txt")).unwrap();
        assert_eq!(requirements.matches("alembic").count(), 1);
    }

    #[test]
    fn test_migration_scaffold_adds_session_settings() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("app/core/config.py");
        fs::create_dir_all(config.parent().unwrap()).unwrap();
        fs::write(
            &config,
            "class Settings(BaseSettings):\n    DATABASE_URL: str = \"sqlite:///./x.db\"\n\n\nsettings = Settings()\n",
        )
        .unwrap();

        let report = Scaffolder::default()
            .generate_migration_scaffold(dir.path())
            .unwrap();

        let text = fs::read_to_string(&config).unwrap();
        assert!(text.contains(
            "    DATABASE_URL: str = \"sqlite:///./x.db\"\n    DB_ECHO: bool = False\n    DB_CONNECT_ARGS: dict = "
        ));
        assert!(report
            .aggregators_updated
            .contains(&(config.clone(), PatchOutcome::Inserted)));

        let again = Scaffolder::default()
            .generate_migration_scaffold(dir.path())
            .unwrap();
        assert_eq!(fs::read_to_string(&config).unwrap(), text);
        assert!(again
            .aggregators_updated
            .contains(&(config, PatchOutcome::Unchanged)));
    }

    #[test]
    fn test_quoted_names_stay_valid_python() {
        let dir = tempdir().unwrap();
        let scaffolder = Scaffolder::default();

        scaffolder
            .generate_component("model", r#"Post" {name}"#, dir.path())
            .unwrap();
        scaffolder
            .generate_component("api", r#"Post" {name}"#, dir.path())
            .unwrap();

        let model = fs::read_to_string(dir.path().join("models/post_name.py")).unwrap();
        assert!(model.contains(r#"description="Post\" {name} name""#));
        assert!(!model.contains(r#""Post" "#));

        let api = fs::read_to_string(dir.path().join("api/api_v1/endpoints/post_name.py")).unwrap();
        assert!(api.contains(r#"detail=f"Post Name {post_name_id} not found""#));
    }

    #[test]
    fn test_create_project_cleans_up_on_failure() {
        let templates = tempdir().unwrap();
        let basic = templates.path().join("basic/{{ project_name }}");
        fs::create_dir_all(&basic).unwrap();
        fs::write(basic.join("ok.txt"), "fine").unwrap();
        fs::write(basic.join("zz.py.tmpl"), "{{ undefined_variable }}").unwrap();

        let mut config = GeneratorConfig::default();
        config.templates.dir = Some(templates.path().to_path_buf());
        let out = tempdir().unwrap();

        let err = Scaffolder::new(config)
            .create_project("shop", out.path(), "basic")
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::UnresolvedVariable { .. }));
        assert!(!out.path().join("shop").exists());
    }

    #[test]
    fn test_create_project_from_unwrapped_template_dir() {
        let templates = tempdir().unwrap();
        let basic = templates.path().join("basic");
        fs::create_dir_all(basic.join("app")).unwrap();
        fs::write(basic.join("main.py.tmpl"), "# {{ project_title }}\n").unwrap();

        let mut config = GeneratorConfig::default();
        config.templates.dir = Some(templates.path().to_path_buf());
        let out = tempdir().unwrap();

        let report = Scaffolder::new(config)
            .create_project("my shop", out.path(), "basic")
            .unwrap();
        assert_eq!(report.root, out.path().join("my_shop"));
        assert_eq!(
            fs::read_to_string(out.path().join("my_shop/main.py")).unwrap(),
            "# My Shop\n"
        );
        assert!(out.path().join("my_shop/app").is_dir());
    }
}
