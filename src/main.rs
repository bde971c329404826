use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use lockgraph::export::json::JsonExporter;
use lockgraph::export::text::TextExporter;
use lockgraph::export::Exporter;
use lockgraph::graph::DependencyGraph;
use lockgraph::resolver;

#[derive(Parser)]
#[command(name = "lockgraph")]
#[command(version)]
#[command(about = "Normalize npm and yarn lockfiles into one resolved dependency graph", long_about = None)]
struct Cli {
    /// Project directory containing package.json and a lockfile
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Emit the full resolved graph as JSON
    #[arg(long)]
    json: bool,

    /// Reduce the graph to resolved edges before JSON emission
    #[arg(long)]
    simplify: bool,

    /// Keep name@version keys in the plain-text listing
    #[arg(long)]
    with_version: bool,

    /// Report circular dependency chains instead of the listing
    #[arg(long)]
    cycles: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let packages = resolver::resolve_dir(&cli.path)
        .with_context(|| format!("failed to resolve lockfiles in {}", cli.path.display()))?;

    let Some(packages) = packages else {
        eprintln!(
            "unable to find package-lock.json or yarn.lock in {}",
            cli.path.display()
        );
        return Ok(ExitCode::FAILURE);
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.cycles {
        let graph = DependencyGraph::from_package_list(&packages);
        let cycles = graph.detect_cycles();
        if cycles.is_empty() {
            writeln!(out, "no circular dependencies")?;
        }
        for cycle in cycles {
            writeln!(out, "{}", cycle.cycle_path())?;
        }
    } else if cli.json {
        JsonExporter {
            simplified: cli.simplify,
        }
        .export(&packages, &mut out)?;
    } else {
        TextExporter {
            with_versions: cli.with_version,
        }
        .export(&packages, &mut out)?;
    }

    Ok(ExitCode::SUCCESS)
}
