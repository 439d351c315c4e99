use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use trip_planner::banner::{BannerInfo, print_banner, print_session_summary};
use trip_planner::client::http::HttpTransport;
use trip_planner::commands::{CommandRegistry, CommandResult, SessionInfo};
use trip_planner::config::{self, KEYS, Overrides, Settings};
use trip_planner::consts::default_db_path;
use trip_planner::logging;
use trip_planner::planner::Planner;
use trip_planner::spinner::Spinner;
use trip_planner::state::OverlapPolicy;
use trip_planner::trip::{Field, Shell};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShellArg {
    Web,
    Mobile,
}

impl From<ShellArg> for Shell {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Web => Shell::Web,
            ShellArg::Mobile => Shell::Mobile,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// A new request cancels the one in flight
    Latest,
    /// Requests race; the last reply to arrive wins
    Race,
}

impl From<PolicyArg> for OverlapPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Latest => OverlapPolicy::LatestIssued,
            PolicyArg::Race => OverlapPolicy::Race,
        }
    }
}

#[derive(Parser)]
#[command(name = "tripplan", version, about = "Plan a fishing trip from the terminal.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Which form to present (web collects four fields, mobile two)
    #[arg(short, long, value_enum, global = true)]
    shell: Option<ShellArg>,

    /// Base URL of the web backend; requests go to <base>/api/plan_trip
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Full endpoint URL, overriding the shell's default
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// What happens when a request starts while another is in flight
    #[arg(long, value_enum, global = true)]
    policy: Option<PolicyArg>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// SQLite settings database (use :memory: for ephemeral)
    #[arg(short, long, global = true)]
    db: Option<String>,

    /// Log requests and replies to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Send one request and print the reply
    Plan {
        /// Species (e.g., bass)
        #[arg(long, default_value = "")]
        species: String,
        /// State (e.g., Maine)
        #[arg(long, default_value = "")]
        state: String,
        /// Your city or ZIP (web only)
        #[arg(long, default_value = "")]
        from: String,
        /// Destination lake or town (web only)
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Read or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print one setting
    Get { key: String },
    /// Store a setting
    Set { key: String, value: String },
    /// Remove a setting
    Unset { key: String },
    /// Print every stored setting
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let db_path = settings_path(cli.db.as_deref())?;
    let settings = Settings::open(&db_path)?;

    if let Some(Command::Config { action }) = &cli.command {
        return handle_config(&settings, action);
    }

    let overrides = Overrides {
        shell: cli.shell.map(Shell::from),
        base_url: cli.base_url.clone(),
        endpoint: cli.endpoint.clone(),
        policy: cli.policy.map(OverlapPolicy::from),
        timeout: cli.timeout,
    };
    let resolved = config::resolve(&overrides, Some(&settings))?;
    let transport = Arc::new(HttpTransport::new(resolved.timeout)?);
    let mut planner = Planner::new(resolved.planner, transport);

    // One-shot mode
    if let Some(Command::Plan {
        species,
        state,
        from,
        to,
    }) = cli.command
    {
        planner.edit(Field::Species, species);
        planner.edit(Field::State, state);
        if planner.shell() == Shell::Web {
            planner.edit(Field::UserLocation, from);
            planner.edit(Field::DestinationName, to);
        } else if !from.is_empty() || !to.is_empty() {
            eprintln!("warning: --from and --to are ignored by the mobile shell");
        }
        plan_with_feedback(&mut planner).await;
        return Ok(());
    }

    let settings_label = if db_path == ":memory:" {
        "ephemeral".to_string()
    } else {
        db_path.clone()
    };

    print_banner(&BannerInfo {
        shell: planner.shell(),
        endpoint: planner.endpoint(),
        policy: planner.policy().as_str(),
        settings: &settings_label,
    });

    let registry = CommandRegistry::new();

    // REPL: async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\ntrip> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let info = SessionInfo {
            planner: &planner,
            settings: &settings_label,
        };
        match registry.dispatch(&line, &info).await {
            CommandResult::Handled => {}
            CommandResult::NotACommand => {
                println!("  fields are set with commands, e.g. /species bass");
                println!("  type /help for available commands");
            }
            CommandResult::Plan => plan_with_feedback(&mut planner).await,
            CommandResult::Reset => {
                planner.reset();
                println!("  ✓ form cleared");
            }
            CommandResult::Quit => break,
        }
    }

    print_session_summary(planner.submissions());
    Ok(())
}

/// Submit the form, spin while busy, print the rendered reply.
/// Ctrl+C cancels the request, not the program.
async fn plan_with_feedback(planner: &mut Planner) {
    let spinner = Spinner::follow(planner.subscribe());
    let mut handle = planner.submit();

    let interrupted = tokio::select! {
        _ = handle.settled() => false,
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            true
        }
    };

    spinner.stop().await;
    if interrupted {
        println!("interrupted");
    }
    let rendered = planner.render();
    if !rendered.is_empty() {
        println!("{rendered}");
    }
}

fn settings_path(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(path) = flag {
        return Ok(path.to_string());
    }
    let Some(path) = default_db_path() else {
        eprintln!("warning: cannot determine home directory, settings will not persist");
        return Ok(":memory:".to_string());
    };
    ensure_parent(&path)?;
    Ok(path.to_string_lossy().into_owned())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn handle_config(settings: &Settings, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => match settings.get(key)? {
            Some(value) => println!("{value}"),
            None => println!("(not set)"),
        },
        ConfigAction::Set { key, value } => {
            settings.set(key, value)?;
            println!("✓ {key} = {value}");
        }
        ConfigAction::Unset { key } => {
            settings.remove(key)?;
            println!("✓ {key} removed");
        }
        ConfigAction::List => {
            let stored = settings.list()?;
            if stored.is_empty() {
                println!("(no settings stored; known keys: {})", KEYS.join(", "));
            }
            for (key, value) in stored {
                println!("{key:<10} {value}");
            }
        }
    }
    Ok(())
}
