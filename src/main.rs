use chrono::{DateTime, Local};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use molboot::{load_palettes, Config, ScriptRepo, SessionHost};
use std::fs;
use std::io;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "molboot")]
#[command(author, version, about = "Startup bootstrap for molecular visualization sessions")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full startup sequence: repository sync, then palette load
    Startup,
    /// Clone or update the community script repository
    Sync {
        /// Check the remote even if the marker is fresh
        #[arg(long)]
        force: bool,
    },
    /// Download and register the ColorBrewer palettes
    Palettes {
        /// Override the palette source URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Show script repository and marker status
    Status,
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    let config = Config::load();

    match args.command.unwrap_or(Command::Startup) {
        Command::Startup => {
            let mut host = SessionHost::new();
            run_sync(&config, false, &mut host);
            if let Err(e) = run_palettes(&config, None, &mut host) {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        Command::Sync { force } => {
            let mut host = SessionHost::new();
            run_sync(&config, force, &mut host);
        }
        Command::Palettes { url } => {
            let mut host = SessionHost::new();
            if let Err(e) = run_palettes(&config, url.as_deref(), &mut host) {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        Command::Status => print_status(&config),
        Command::Completion { shell } => {
            let mut cmd = Args::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }
}

fn script_repo(config: &Config, force: bool) -> ScriptRepo {
    // --force behaves like the zero-interval "always check" variant for
    // a single run.
    let interval = if force {
        Duration::ZERO
    } else {
        config.check_interval()
    };
    ScriptRepo::new(
        config.repo_dir(),
        config.repo.url.clone(),
        config.marker_path(),
        interval,
    )
}

/// Repository sync never fails the process: offline sessions still start.
fn run_sync(config: &Config, force: bool, host: &mut SessionHost) {
    let repo = script_repo(config, force);
    repo.sync();
    repo.register(host, &config.repo.modules_env_var);
}

fn run_palettes(
    config: &Config,
    url: Option<&str>,
    host: &mut SessionHost,
) -> Result<(), molboot::PaletteError> {
    let url = url.unwrap_or(&config.palette.url);
    let count = load_palettes(host, url)?;
    println!(
        "{} {} palette colors registered for this session.",
        "ok:".green().bold(),
        count
    );
    Ok(())
}

fn print_status(config: &Config) {
    let repo = script_repo(config, false);

    println!("Script repository: {}", repo.dir().display());
    if repo.dir().is_dir() {
        println!("  clone: present");
    } else {
        println!("  clone: missing (next sync will clone)");
    }

    match fs::metadata(repo.marker_path()).and_then(|m| m.modified()) {
        Ok(modified) => {
            let when: DateTime<Local> = modified.into();
            println!("  last checked: {}", when.format("%Y-%m-%d %H:%M:%S"));
        }
        Err(_) => println!("  last checked: never"),
    }

    println!(
        "  check due: {}",
        if repo.should_check() { "yes" } else { "no" }
    );
    println!("Palette source: {}", config.palette.url);
}
