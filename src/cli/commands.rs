use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use super::options::{parse_capability, parse_resource, parse_tool, GenerateOptions};
use crate::assets::{AssetStore, DirAssets, EmbeddedAssets};
use crate::error::Result;
use crate::generator::{scaffold, GenerationReport};
use crate::harness::{load_server_config, run_checks, CheckOptions};
use crate::project::{load_descriptor, Language, ProjectDescriptor};

/// Command-line interface for mcpcli
///
/// Scaffolds MCP server projects and pokes at running servers.
#[derive(Debug, Parser)]
#[command(name = "mcpcli", version)]
#[command(about = "Scaffold and test MCP servers", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level requested on the command line, if any.
    pub fn log_level(&self) -> Option<Level> {
        if self.verbose {
            Some(Level::DEBUG)
        } else if self.quiet {
            Some(Level::ERROR)
        } else {
            None
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new MCP server project
    Generate(GenerateArgs),
    /// Run checks against an MCP server
    Test(TestArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// MCP project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Programming language (go, java, javascript, python; golang and node are aliases)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Transport method (stdio, rest, websocket)
    #[arg(short, long)]
    pub transport: Option<String>,

    /// Include Docker support
    #[arg(short, long, default_value_t = false)]
    pub docker: bool,

    /// Include example resources and tools
    #[arg(short, long, default_value_t = false)]
    pub examples: bool,

    /// Output directory (defaults to the project name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output directory
    #[arg(short, long, default_value_t = false)]
    pub force: bool,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Project author
    #[arg(long)]
    pub author: Option<String>,

    /// Version of the generated project (default 0.1.0)
    #[arg(long = "project-version", value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Declare a tool; repeat for more
    #[arg(long = "tool", value_name = "NAME[:DESCRIPTION]")]
    pub tools: Vec<String>,

    /// Declare a resource (database, filesystem, time); repeat for more
    #[arg(long = "resource", value_name = "NAME[:TYPE]")]
    pub resources: Vec<String>,

    /// Declare a capability; repeat for more
    #[arg(long = "capability", value_name = "NAME[=BOOL]")]
    pub capabilities: Vec<String>,

    /// Read the project from a JSON, YAML or TOML descriptor; flags override it
    #[arg(long, value_name = "FILE")]
    pub descriptor: Option<PathBuf>,

    /// Read templates from this directory instead of the built-in set
    #[arg(long, env = "MCPCLI_TEMPLATE_DIR", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

impl GenerateArgs {
    /// Collect flags and the optional descriptor file into unvalidated options.
    pub fn to_options(&self) -> Result<GenerateOptions> {
        let base = self
            .descriptor
            .as_deref()
            .map(load_descriptor)
            .transpose()?;
        Ok(GenerateOptions {
            name: self.name.clone().unwrap_or_default(),
            language: self.language.clone().unwrap_or_default(),
            transport: self.transport.clone().unwrap_or_default(),
            docker: self.docker,
            examples: self.examples,
            output: self.output.clone(),
            force: self.force,
            description: self.description.clone().unwrap_or_default(),
            author: self.author.clone(),
            version: self.project_version.clone(),
            tools: self.tools.iter().map(|s| parse_tool(s)).collect::<Result<_>>()?,
            resources: self
                .resources
                .iter()
                .map(|s| parse_resource(s))
                .collect::<Result<_>>()?,
            capabilities: self
                .capabilities
                .iter()
                .map(|s| parse_capability(s))
                .collect::<Result<_>>()?,
            base,
        })
    }

    /// Template store selected by `--template-dir` / `MCPCLI_TEMPLATE_DIR`.
    pub fn assets(&self) -> Arc<dyn AssetStore> {
        match &self.template_dir {
            Some(dir) => Arc::new(DirAssets::new(dir)),
            None => Arc::new(EmbeddedAssets),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TestArgs {
    /// Server configuration or project descriptor to test against
    #[arg(short, long, default_value = "configs/mcp-config.json")]
    pub config: PathBuf,

    /// Run every check
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// List resources
    #[arg(long, default_value_t = false)]
    pub resources: bool,

    /// List tools
    #[arg(long, default_value_t = false)]
    pub tools: bool,
}

impl TestArgs {
    /// Check selection; no flag at all means every check.
    pub fn to_options(&self) -> CheckOptions {
        CheckOptions {
            config: self.config.clone(),
            all: self.all || !(self.resources || self.tools),
            resources: self.resources,
            tools: self.tools,
        }
    }
}

/// Run the parsed command line.
///
/// # Errors
///
/// Returns an error if:
/// - The options are invalid or the descriptor file cannot be read
/// - Generation fails (the output directory is rolled back first)
/// - The server under test cannot be reached, or a check fails
pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate(args) => {
            let mut options = args.to_options()?;
            let descriptor = options.validate()?;
            let report = scaffold(&descriptor, args.assets())
                .with_context(|| format!("failed to generate project {}", descriptor.name))?;
            print_summary(&descriptor, &report);
            Ok(())
        }
        Commands::Test(args) => {
            let options = args.to_options();
            let config = load_server_config(&options.config)
                .with_context(|| format!("failed to load config {}", options.config.display()))?;
            let report = run_checks(&options, &config)?;
            for outcome in &report.outcomes {
                if outcome.passed {
                    println!("✅ {}: {}", outcome.check, outcome.detail);
                } else {
                    println!("❌ {}: {}", outcome.check, outcome.detail);
                }
            }
            let failed = report.outcomes.iter().filter(|o| !o.passed).count();
            if failed > 0 {
                bail!("{failed} of {} checks failed", report.outcomes.len());
            }
            Ok(())
        }
    }
}

fn print_summary(descriptor: &ProjectDescriptor, report: &GenerationReport) {
    println!(
        "✅ Generated {} project {} in {} ({} files)",
        descriptor.language,
        descriptor.name,
        report.root.display(),
        report.file_count()
    );
    println!();
    println!("Next steps:");
    for step in next_steps(descriptor.language, &descriptor.name, &report.root) {
        println!("  {step}");
    }
}

/// Commands a user runs to build and start a freshly generated project.
pub fn next_steps(language: Language, name: &str, root: &Path) -> Vec<String> {
    let mut steps = vec![format!("cd {}", root.display())];
    match language {
        Language::Go => {
            steps.push("go mod tidy".to_string());
            steps.push("go run ./cmd/server".to_string());
        }
        Language::JavaScript => {
            steps.push("npm install".to_string());
            steps.push("node src/index.js".to_string());
        }
        Language::Java => {
            steps.push("mvn package".to_string());
            steps.push(format!("java -jar target/{name}-1.0.0.jar"));
        }
        Language::Python => {
            steps.push("pip install -e .".to_string());
            steps.push("python src/main.py".to_string());
        }
    }
    steps
}
