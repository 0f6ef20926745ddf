//! Component generation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use fastforge::{GeneratorConfig, Scaffolder};

use super::{load_config, output_dir, print_report, SUCCESS};

/// Generate a model, API, service or migration scaffold in an existing project
pub struct GenerateCommand {
    kind: String,
    name: String,
    output_dir: PathBuf,
    config: GeneratorConfig,
}

impl GenerateCommand {
    /// Create a new command instance
    pub fn new(
        kind: String,
        name: String,
        output: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let output_dir = output_dir(output)?;
        let config = load_config(config_path.as_deref(), &output_dir)?;

        Ok(Self {
            kind,
            name,
            output_dir,
            config,
        })
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        println!(
            "{} {} {}",
            style("Generating").green().bold(),
            style(format!("{}:", self.kind)).bold(),
            style(&self.name).cyan().bold()
        );
        println!();

        let report = Scaffolder::new(self.config)
            .generate_component(&self.kind, &self.name, &self.output_dir)
            .with_context(|| format!("Failed to generate {} '{}'", self.kind, self.name))?;

        print_report(&report, &self.output_dir);
        println!();

        let changed = report.changed_aggregators().count();
        println!(
            "{}{} file(s) written, {} aggregator(s) updated",
            SUCCESS,
            style(report.files_written.len()).bold(),
            style(changed).bold()
        );

        Ok(())
    }
}
