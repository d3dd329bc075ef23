use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dotnet_deptree::{
    ExtractOptions, ManifestKind, build_dep_tree_from_files, props_from_file,
    target_frameworks_from_files,
};

#[derive(Parser)]
#[command(name = "dotnet-deptree")]
#[command(about = "Dependency trees for .NET manifests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dependency tree of a manifest as JSON
    Tree {
        /// Path to project.json, packages.config or a project file
        #[arg(short, long)]
        file: PathBuf,

        /// Include development dependencies
        #[arg(long)]
        include_dev: bool,

        /// Props file (e.g. Directory.Build.props) supplying version properties
        #[arg(long)]
        props_file: Option<PathBuf>,

        /// JSON file with extraction options ({"includeDev": .., "props": {..}})
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the target frameworks of a manifest as JSON
    Frameworks {
        /// Path to project.json, packages.config or a project file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Profile manifest parsing (for use with cargo-flamegraph)
    ProfileParse {
        /// Path to the manifest to parse
        #[arg(short, long)]
        file: PathBuf,

        /// Number of iterations (for meaningful profiling)
        #[arg(short, long, default_value = "1000")]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Tree {
            file,
            include_dev,
            props_file,
            config,
        } => run_tree(&file, include_dev, props_file.as_deref(), config.as_deref()).await,
        Commands::Frameworks { file } => run_frameworks(&file).await,
        Commands::ProfileParse { file, iterations } => run_profile_parse(&file, iterations).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn load_options(
    include_dev: bool,
    props_file: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<ExtractOptions> {
    let mut options = match config {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            ExtractOptions::from_json(Some(value))
        }
        None => ExtractOptions::default(),
    };

    options.include_dev |= include_dev;

    if let Some(path) = props_file {
        let props = props_from_file(path).await?;
        tracing::info!("Loaded {} properties from {}", props.len(), path.display());
        // Props file values fill in whatever the config did not define.
        for (name, value) in props {
            options.props.entry(name).or_insert(value);
        }
    }

    Ok(options)
}

async fn run_tree(
    file: &Path,
    include_dev: bool,
    props_file: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let options = load_options(include_dev, props_file, config).await?;
    let tree = build_dep_tree_from_files(".", file, &options).await?;
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

async fn run_frameworks(file: &Path) -> anyhow::Result<()> {
    let frameworks = target_frameworks_from_files(".", file).await?;
    println!("{}", serde_json::to_string_pretty(&frameworks)?);
    Ok(())
}

async fn run_profile_parse(file: &Path, iterations: usize) -> anyhow::Result<()> {
    let kind = ManifestKind::detect(file)
        .with_context(|| format!("Unsupported file type: {}", file.display()))?;
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Error reading file {}", file.display()))?;

    eprintln!("Profiling parse operations for: {}", file.display());
    eprintln!("Iterations: {iterations}");
    eprintln!("File size: {} bytes", content.len());

    let parser = kind.parser();
    let options = ExtractOptions::default();
    let start = Instant::now();

    for _ in 0..iterations {
        std::hint::black_box(parser.parse(&content, &options)?);
    }

    let elapsed = start.elapsed();
    eprintln!("\nProfiling complete!");
    eprintln!("Total time: {elapsed:?}");
    eprintln!(
        "Average per iteration: {:?}",
        elapsed / iterations.max(1) as u32
    );

    Ok(())
}
