//! Dashboard Agent CLI
//!
//! Terminal front-end for the dashboard assistant:
//! - Interactive chat with session switching
//! - One-shot dashboard requests
//! - Service status and industry trends
//! - Canned chart data lookup

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dashboard_agent::config::generate_default_config;
use dashboard_agent::view::{self, SUGGESTIONS};
use dashboard_agent::{
    classify, Config, DashboardAgent, HttpDashboardClient, LoggingConfig, SendOutcome, SessionId,
    VizType,
};

#[derive(Parser)]
#[command(name = "dashboard-agent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Conversational HR analytics dashboards")]
#[command(long_about = "Describe the dashboard you want and the assistant builds it.\nRefine it by replying, or start a new one from a suggestion.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dashboard service URL, overrides the config
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session (default)
    Chat,

    /// Request one dashboard and print it
    Ask {
        /// What the dashboard should show
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Check the dashboard service
    Status,

    /// Look up industry trends for a topic
    Trends {
        /// Topic, e.g. "attrition"
        #[arg(short, long)]
        topic: String,
        /// Industry to compare against
        #[arg(short, long, default_value = "general")]
        industry: String,
    },

    /// Print the canned data for a chart
    Classify {
        /// Chart type (bar, line, pie, donut)
        kind: String,
        /// Chart title
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.service.base_url = url;
    }
    init_logging(&config.logging)?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let agent = DashboardAgent::from_config(&config)?;
            run_chat(agent).await?;
        }

        Commands::Ask { prompt } => {
            let prompt = prompt.join(" ");
            let agent = DashboardAgent::from_config(&config)?;

            let outcome = agent.create_session(&prompt).await.map(|(_, outcome)| outcome);
            let series = agent.active_charts().await;
            print!("{}", view::render_screen(&agent.snapshot(), &series));

            if outcome != Some(SendOutcome::Answered) {
                std::process::exit(1);
            }
        }

        Commands::Status => {
            let client = HttpDashboardClient::new(config.client_config())?;

            println!("Dashboard Agent v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Service: {}", config.service.base_url);

            match client.health_check().await {
                Ok(health) => {
                    println!("Status: {}", health.status);
                    if let Some(model) = health.model {
                        println!("Model: {}", model);
                    }
                    if let Some(location) = health.location {
                        println!("Location: {}", location);
                    }
                }
                Err(e) => {
                    eprintln!("Service unreachable: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Trends { topic, industry } => {
            let client = HttpDashboardClient::new(config.client_config())?;

            match client.search_trends(&topic, &industry).await {
                Ok(trends) => {
                    println!("Trends for {} ({})", topic, industry);
                    println!();
                    println!("{}", trends.trends);
                }
                Err(e) => {
                    eprintln!("Trends lookup failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Classify { kind, title } => {
            let kind: VizType = kind.parse().unwrap_or(VizType::Unknown);
            let title = title.join(" ");

            let points = classify(kind, &title);
            if points.is_empty() {
                println!("No data for {} chart \"{}\"", kind, title);
            }
            for point in points {
                println!("{:<20} {}", point.name, point.value);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dashboard_agent={}", logging.level)));

    let writer = match &logging.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}

const HELP: &str = "\
Type a request to build a dashboard, or a reply to refine the current one.

  /new          start over from the suggestions
  /pick N       use suggestion N
  /list         list dashboards
  /open N       switch to dashboard N
  /delete N     delete dashboard N
  /help         show this help
  /quit         exit
";

async fn run_chat(agent: DashboardAgent) -> anyhow::Result<()> {
    print!("{}", view::render_landing());
    println!("Type /help for commands.");

    let renderer = tokio::spawn(render_replies(agent.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "/quit" | "/exit" => break,
            "/help" => print!("{}", HELP),
            "/new" => {
                agent.new_dashboard();
                print!("{}", view::render_suggestions());
            }
            "/list" => print!("{}", view::render_sidebar(&agent.snapshot())),
            "/pick" => match parse_position(arg, SUGGESTIONS.len()) {
                Some(index) => {
                    let agent = agent.clone();
                    tokio::spawn(async move {
                        agent.pick_suggestion(index).await;
                    });
                }
                None => println!("Pick a suggestion from 1 to {}", SUGGESTIONS.len()),
            },
            "/open" => {
                let state = agent.snapshot();
                match parse_position(arg, state.sessions.len()) {
                    Some(index) => print!("{}", open_session(&agent, state.sessions[index].id).await),
                    None => println!("No dashboard {}", arg),
                }
            }
            "/delete" => {
                let state = agent.snapshot();
                match parse_position(arg, state.sessions.len()) {
                    Some(index) => {
                        if let Some(session) = agent.delete_session(state.sessions[index].id) {
                            println!("Deleted \"{}\"", session.title);
                        }
                        print!("{}", view::render_sidebar(&agent.snapshot()));
                    }
                    None => println!("No dashboard {}", arg),
                }
            }
            _ if command.starts_with('/') => println!("Unknown command {}. Type /help.", command),
            _ => {
                if agent.store().is_awaiting_response() {
                    println!("Still waiting for the last reply.");
                    continue;
                }
                let agent = agent.clone();
                let text = line.to_string();
                tokio::spawn(async move {
                    if agent.submit_input(&text).await == SendOutcome::Busy {
                        println!("Still waiting for the last reply.");
                    }
                });
            }
        }
    }

    renderer.abort();
    Ok(())
}

/// Switch to a session and draw it. The session may have been evicted by a
/// background turn since the list was read.
async fn open_session(agent: &DashboardAgent, id: SessionId) -> String {
    match agent.select_session(id) {
        Ok(()) => {
            let series = agent.active_charts().await;
            view::render_screen(&agent.snapshot(), &series)
        }
        Err(e) => format!("{}\n", e),
    }
}

/// Redraw the active session whenever a reply lands
async fn render_replies(agent: DashboardAgent) {
    let mut rx = agent.subscribe();
    let mut pending = 0;

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();

        if state.pending_requests > pending {
            println!("{}", view::WAITING_INDICATOR);
        } else if state.pending_requests < pending {
            let series = agent.active_charts().await;
            print!("{}", view::render_screen(&state, &series));
        }
        pending = state.pending_requests;
    }
}

/// Parse a one-based position into an index below `len`
fn parse_position(arg: &str, len: usize) -> Option<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}
