use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use raap_feasibility::config::{self, Config};
use raap_feasibility::cost::CostConfig;
use raap_feasibility::estimate::{EstimateRequest, EstimatorClient, SimulatorEstimate};
use raap_feasibility::output;
use raap_feasibility::project::{self, Project, ProjectStore};
use raap_feasibility::report::{build_report, FeasibilityReport};
use raap_feasibility::scoring::SampleRegistry;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every project with its class and overall score (default if no subcommand)
    List {
        /// Emit tab-separated values for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show the six-dimension score card for a project
    Score {
        /// Project id
        id: i64,
    },
    /// Show the modular vs. site-built cost comparison for a project
    Costs {
        /// Project id
        id: i64,
        /// Request a fresh estimate from the remote estimator
        #[arg(long)]
        fetch: bool,
    },
    /// Show scores and costs together
    Report {
        /// Project id
        id: i64,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
        /// Request a fresh estimate from the remote estimator
        #[arg(long)]
        fetch: bool,
    },
    /// Fetch simulator estimates for one or more projects
    Estimate {
        /// Project ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "raap-feasibility")]
#[command(about = "Feasibility scoring and cost comparison for modular construction", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file (defaults to ~/.config/raap-feasibility/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the project store (defaults to ~/.config/raap-feasibility/projects.json)
    #[arg(short, long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RAAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(EXIT_NETWORK);
    }

    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{}", e);
    }

    let command = cli.command.unwrap_or(Commands::List { tsv: false });
    let start_time = Instant::now();

    // `init` runs before config loading so it works without a config file
    if let Commands::Init { force } = command {
        let path = cli.config.clone().map(PathBuf::from).unwrap_or_else(config::get_config_path);
        if let Err(e) = config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate every section at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let store_path = cli
        .store
        .map(PathBuf::from)
        .or_else(|| config.store.clone())
        .unwrap_or_else(project::get_store_path);
    let store = match ProjectStore::load(&store_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Store error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let registry = SampleRegistry::from_config(&config.effective_scoring());
    let cost_config = config.effective_cost();
    let use_colors = output::should_use_colors();

    match command {
        Commands::List { tsv } => {
            if tsv {
                let reports: Vec<FeasibilityReport> = store
                    .projects()
                    .iter()
                    .map(|p| report_from_store(&store, p, None, &registry, &cost_config))
                    .collect();
                println!("{}", output::format_tsv(&reports));
            } else {
                let scored: Vec<output::ScoredProject> = store
                    .projects()
                    .iter()
                    .map(|p| output::ScoredProject::new(p, &registry))
                    .collect();
                println!("{}", output::format_project_list(&scored, use_colors));
            }

            tracing::debug!(
                projects = store.projects().len(),
                elapsed = ?start_time.elapsed(),
                "listed projects"
            );
        }
        Commands::Score { id } => {
            let project = find_project(&store, id);
            let scored = output::ScoredProject::new(project, &registry);
            println!("{} (#{})", project.name, project.id);
            println!("{}", output::format_score_card(&scored.scores, scored.class, use_colors));
        }
        Commands::Costs { id, fetch } => {
            let project = find_project(&store, id);
            let fetched = if fetch {
                Some(fetch_estimate(&config, project).await)
            } else {
                None
            };
            let report = report_from_store(&store, project, fetched.as_ref(), &registry, &cost_config);
            println!("{} (#{})", report.project_name, report.project_id);
            println!("{}", output::format_cost_section(&report, use_colors));
        }
        Commands::Report { id, json, fetch } => {
            let project = find_project(&store, id);
            let fetched = if fetch {
                Some(fetch_estimate(&config, project).await)
            } else {
                None
            };
            let report = report_from_store(&store, project, fetched.as_ref(), &registry, &cost_config);

            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to serialize report: {}", e);
                        std::process::exit(EXIT_DATA);
                    }
                }
            } else {
                println!("{}", output::format_report(&report, use_colors));
            }
        }
        Commands::Estimate { ids } => {
            let projects: Vec<&Project> = ids.iter().map(|id| find_project(&store, *id)).collect();
            let client = estimator_client(&config);

            let mut any_succeeded = false;
            for (id, result) in client.fetch_all(&projects).await {
                match result {
                    Ok(estimate) => {
                        any_succeeded = true;
                        if let Some(project) = store.project(id) {
                            println!("{}", output::format_estimate(project, &estimate, use_colors));
                            println!();
                        }
                    }
                    Err(e) => {
                        // Continue with other projects (partial failure)
                        eprintln!("Estimate failed for project #{}: {}", id, e);
                    }
                }
            }

            if !any_succeeded {
                eprintln!("All estimates failed. Check the estimator endpoint and your network connection.");
                std::process::exit(EXIT_NETWORK);
            }

            tracing::debug!(
                projects = projects.len(),
                elapsed = ?start_time.elapsed(),
                "fetched estimates"
            );
        }
        // Handled before config loading
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

fn find_project(store: &ProjectStore, id: i64) -> &Project {
    match store.project(id) {
        Some(p) => p,
        None => {
            eprintln!("No project with id {}", id);
            std::process::exit(EXIT_DATA);
        }
    }
}

/// Build a report, preferring a freshly fetched estimate over the stored one
fn report_from_store(
    store: &ProjectStore,
    project: &Project,
    fetched: Option<&SimulatorEstimate>,
    registry: &SampleRegistry,
    cost_config: &CostConfig,
) -> FeasibilityReport {
    let breakdowns = store.breakdowns_for(project.id);
    let estimate = fetched.or_else(|| store.estimate_for(project.id));
    build_report(project, &breakdowns, estimate, registry, cost_config)
}

fn estimator_client(config: &Config) -> EstimatorClient {
    match EstimatorClient::new(&config.effective_estimator()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Estimator error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

async fn fetch_estimate(config: &Config, project: &Project) -> SimulatorEstimate {
    let client = estimator_client(config);
    let request = EstimateRequest::from_project(project);

    tracing::debug!(project_id = project.id, endpoint = client.endpoint(), "requesting estimate");

    match client.fetch(&request).await {
        Ok(estimate) => estimate,
        Err(e) => {
            eprintln!("Estimate failed for project #{}: {}", project.id, e);
            std::process::exit(EXIT_NETWORK);
        }
    }
}
