//! Project creation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use fastforge::{GeneratorConfig, Scaffolder};

use super::{load_config, output_dir, print_report, spinner};

/// Create a new FastAPI project
pub struct CreateCommand {
    name: String,
    output_dir: PathBuf,
    template: String,
    config: GeneratorConfig,
}

impl CreateCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `name` - Free-form project name, normalized into a package identifier
    /// * `output` - Parent directory for the project (current directory if omitted)
    /// * `template` - Template kind: basic, standard or enterprise
    /// * `config_path` - Explicit configuration file
    pub fn new(
        name: String,
        output: Option<PathBuf>,
        template: String,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let output_dir = output_dir(output)?;
        let config = load_config(config_path.as_deref(), &output_dir)?;

        Ok(Self {
            name,
            output_dir,
            template,
            config,
        })
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("FastAPI project:").bold(),
            style(&self.name).cyan().bold()
        );
        println!();

        let spinner = spinner("Rendering project template...")?;
        let result = Scaffolder::new(self.config).create_project(
            &self.name,
            &self.output_dir,
            &self.template,
        );
        spinner.finish_and_clear();

        let report = result.with_context(|| format!("Failed to create project '{}'", self.name))?;

        print_report(&report, &report.root);
        println!();
        print_success(&report.root);

        Ok(())
    }
}

fn print_success(root: &std::path::Path) {
    let dir_name = root
        .file_name()
        .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());

    println!(
        "{}",
        style(format!("{}Project created successfully!", super::SUCCESS))
            .green()
            .bold()
    );
    println!();
    println!("{}", style("Next steps:").bold());
    println!("  {} cd {dir_name}", style("$").dim());
    println!("  {} pip install -r requirements.txt", style("$").dim());
    println!("  {} uvicorn main:app --reload", style("$").dim());
    println!();
    println!(
        "Then visit {} for the API docs",
        style("http://localhost:8000/docs").cyan()
    );
}
