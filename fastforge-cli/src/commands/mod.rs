//! CLI command implementations

pub mod create;
pub mod generate;
pub mod migration;

pub use create::CreateCommand;
pub use generate::GenerateCommand;
pub use migration::MigrationCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::{style, Emoji};
use fastforge::aggregator::PatchOutcome;
use fastforge::{GenerationReport, GeneratorConfig};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

pub static SUCCESS: Emoji<'static, 'static> = Emoji("✓ ", "√ ");

/// Resolve `--output`, defaulting to the current directory
fn output_dir(output: Option<PathBuf>) -> Result<PathBuf> {
    match output {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

/// Load configuration from `--config` or from `root/fastforge.toml`
fn load_config(explicit: Option<&Path>, root: &Path) -> Result<GeneratorConfig> {
    let config = match explicit {
        Some(path) => GeneratorConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => GeneratorConfig::load(root).context("Failed to load configuration")?,
    };
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(message);
    Ok(spinner)
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// List written files and touched aggregators under `base`
fn print_report(report: &GenerationReport, base: &Path) {
    for file in &report.files_written {
        println!(
            "  {} {}",
            style("create").green(),
            display_relative(file, base)
        );
    }
    for (file, outcome) in &report.aggregators_updated {
        let label = match outcome {
            PatchOutcome::Created => style("create").green(),
            PatchOutcome::Inserted => style("update").yellow(),
            PatchOutcome::Unchanged => style("skip").dim(),
        };
        println!("  {label} {}", display_relative(file, base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_relative_strips_base() {
        let base = Path::new("/tmp/project");
        assert_eq!(
            display_relative(Path::new("/tmp/project/app/models/post.py"), base),
            Path::new("app/models/post.py").display().to_string()
        );
        assert_eq!(
            display_relative(Path::new("/elsewhere/file.py"), base),
            "/elsewhere/file.py"
        );
    }

    #[test]
    fn test_explicit_output_dir_is_kept() {
        let dir = output_dir(Some(PathBuf::from("somewhere"))).unwrap();
        assert_eq!(dir, PathBuf::from("somewhere"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(load_config(Some(&missing), temp.path()).is_err());
        assert!(load_config(None, temp.path()).is_ok());
    }
}
