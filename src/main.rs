//! git-depgraph - Visualize which objects in a branch's history touch a file
//!
//! # Usage
//! ```bash
//! git-depgraph                              # Use ./config.json
//! git-depgraph -c other.json --open         # Render and open the image
//! git-depgraph --repo . --branch main \
//!     --target Cargo.toml --output graphs   # No config file needed
//! git-depgraph --dot-only                   # Keep the DOT file, skip rendering
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_depgraph::config::{Config, ConfigFile};
use git_depgraph::generate_dot;
use git_depgraph::render::Renderer;

const DEFAULT_CONFIG: &str = "config.json";

/// Render the part of a repository's object graph that touches a file
#[derive(Parser)]
#[command(name = "git-depgraph")]
#[command(about = "Visualize git objects that touch a given file", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Repository to read (work tree or bare)
    #[arg(long, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Branch whose history is walked
    #[arg(long)]
    branch: Option<String>,

    /// File name to look for in blob labels
    #[arg(long, value_name = "FILE")]
    target: Option<String>,

    /// Root directory for generated graphs
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Graphviz layout program
    #[arg(long, value_name = "PATH")]
    dot_program: Option<PathBuf>,

    /// Only write the DOT file, do not render it
    #[arg(long)]
    dot_only: bool,

    /// Cache decoded objects so shared history is read once
    #[arg(long)]
    memoize: bool,

    /// Open the rendered image after creating it
    #[arg(short, long)]
    open: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            repo_path: self.repo.clone(),
            branch: self.branch.clone(),
            target_file: self.target.clone(),
            graph_output_path: self.output.clone(),
            visualizer_program_path: self.dot_program.clone(),
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        // The default config file is optional when flags supply everything.
        let file = if self.config.exists() || self.config != PathBuf::from(DEFAULT_CONFIG) {
            ConfigFile::load(&self.config)?
        } else {
            ConfigFile::default()
        };
        Ok(file.merge(self.overrides()).resolve()?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ {}", e);
            eprintln!("  Config: {}", cli.config.display());
            std::process::exit(1);
        }
    };

    let dot = match generate_dot(&config, cli.memoize) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("✗ Failed to build graph: {}", e);
            eprintln!("  Repo:   {}", config.repo_path.display());
            eprintln!("  Branch: {}", config.branch);
            std::process::exit(1);
        }
    };

    let dot_path = config.dot_path();

    if cli.dot_only {
        Renderer::write_dot(&dot_path, &dot)?;
        println!("✓ DOT file created: {}", dot_path.display());
        return Ok(());
    }

    let image_path = config.image_path();
    let renderer = Renderer::new(&config.visualizer_program);
    if let Err(e) = renderer.render_to_image(&dot, &dot_path, &image_path) {
        eprintln!("✗ Failed to create PNG file: {}", e);
        if dot_path.exists() {
            eprintln!("  DOT file kept at {}", dot_path.display());
        }
        std::process::exit(1);
    }

    println!("✓ PNG file created: {}", image_path.display());

    if cli.open {
        if let Err(e) = open::that(&image_path) {
            eprintln!("  Warning: Could not open image: {}", e);
        }
    }

    Ok(())
}
