use clap::{Parser, Subcommand};
use icefang_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "icefang", version, about = "Icefang calendar and task CLI")]
struct Cli {
    /// Owner id to read and write as (default: `user.owner_id` from config)
    #[arg(long, global = true)]
    owner: Option<String>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Month, week and day views
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Completion statistics
    Analytics {
        #[command(subcommand)]
        action: commands::analytics::AnalyticsAction,
    },
    /// Upcoming events and open tasks
    Dashboard(commands::dashboard::DashboardArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool, config_level: &str) {
    let filter = EnvFilter::try_from_env("ICEFANG_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_new(config_level).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let level = loaded
        .as_ref()
        .map_or("warn", |config| config.logging.level.as_str())
        .to_string();
    init_logging(cli.verbose, &level);
    let config = loaded.unwrap_or_else(|err| {
        tracing::warn!("using default configuration: {err}");
        Config::default()
    });

    let ctx = commands::Context {
        owner: cli.owner.unwrap_or_else(|| config.user.owner_id.clone()),
        config,
    };

    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action, &ctx),
        Commands::Calendar { action } => commands::calendar::run(action, &ctx),
        Commands::Task { action } => commands::task::run(action, &ctx),
        Commands::Analytics { action } => commands::analytics::run(action, &ctx),
        Commands::Dashboard(args) => commands::dashboard::run(args, &ctx),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
