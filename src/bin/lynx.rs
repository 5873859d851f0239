//! LynxPrompt command line interface
//!
//! Pairs this machine with a LynxPrompt account through the browser
//! sign-in flow and works with the resulting API token.

use clap::{Parser, Subcommand};
use lynxprompt_rs::core::models::user::UserSummary;
use lynxprompt_rs::sdk::{CliAuthPoll, LynxClient};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8090";

/// Seconds between pairing polls
const POLL_INTERVAL_SECS: u64 = 2;

#[derive(Parser)]
#[command(name = "lynx")]
#[command(version, about = "LynxPrompt command line interface", long_about = None)]
struct Cli {
    /// Base URL of the LynxPrompt service
    #[arg(long, env = "LYNXPROMPT_URL", default_value = DEFAULT_BASE_URL, global = true)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in by pairing this machine with your account
    Login,
    /// Remove the stored credentials
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Check service reachability and token validity
    Status,
    /// List blueprints visible to you
    Blueprints,
}

/// What `login` stores on disk
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    token: String,
    user: UserSummary,
}

fn credentials_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Home directory not found"))?;
    Ok(home.join(".lynxprompt").join("credentials.json"))
}

fn load_credentials() -> anyhow::Result<Option<StoredCredentials>> {
    let path = credentials_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Write credentials readable by the owner only
fn save_credentials(credentials: &StoredCredentials) -> anyhow::Result<PathBuf> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(credentials)?)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(path)
}

fn delete_credentials() -> anyhow::Result<bool> {
    let path = credentials_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Best-effort browser launch; the URL is printed regardless
fn open_in_browser(url: &str) {
    let launcher = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    };
    let _ = std::process::Command::new(launcher).arg(url).spawn();
}

async fn run_login(base_url: &str) -> anyhow::Result<()> {
    let client = LynxClient::new(base_url)?;
    let init = client.init_cli_auth().await?;

    println!("To sign in, open this URL in your browser:");
    println!();
    println!("  {}", init.auth_url);
    println!();
    open_in_browser(&init.auth_url);
    println!("Waiting for confirmation...");

    loop {
        if chrono::Utc::now() >= init.expires_at {
            anyhow::bail!("Pairing timed out. Run `lynx login` to try again.");
        }
        tokio::time::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;

        match client.poll_cli_auth(&init.session_id).await? {
            CliAuthPoll::Pending => continue,
            CliAuthPoll::Expired => {
                anyhow::bail!("Pairing session expired. Run `lynx login` to try again.");
            }
            CliAuthPoll::Completed { token, user } => {
                let Some(token) = token else {
                    anyhow::bail!(
                        "The pairing token was already collected elsewhere. Run `lynx login` again."
                    );
                };
                let path = save_credentials(&StoredCredentials {
                    token,
                    user: user.clone(),
                })?;
                println!("Signed in as {} <{}>.", user.name, user.email);
                println!("Token stored in {}.", path.display());
                return Ok(());
            }
        }
    }
}

fn run_logout() -> anyhow::Result<()> {
    if delete_credentials()? {
        println!("Signed out. Stored credentials removed.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

fn run_whoami() -> anyhow::Result<()> {
    let Some(credentials) = load_credentials()? else {
        anyhow::bail!("Not signed in. Run `lynx login` first.");
    };

    println!(
        "{} <{}>",
        credentials.user.name, credentials.user.email
    );
    println!("Plan:  {}", credentials.user.plan);
    if credentials.token.len() >= 4 {
        println!("Token: ****{}", &credentials.token[credentials.token.len() - 4..]);
    }
    Ok(())
}

async fn run_status(base_url: &str) -> anyhow::Result<()> {
    let client = LynxClient::new(base_url)?;
    let health = client.health().await?;

    println!("Service:  {} ({})", health.status, base_url);
    println!("Database: {}", health.database);
    println!("Version:  {}", health.version);

    match load_credentials()? {
        Some(credentials) => {
            let email = credentials.user.email.clone();
            let client = client.with_token(credentials.token);
            match client.list_blueprints().await {
                Ok(_) => println!("Token:    valid ({})", email),
                Err(e) if e.is_auth_error() => {
                    println!("Token:    rejected, run `lynx login` again")
                }
                Err(e) => println!("Token:    check failed: {}", e),
            }
        }
        None => println!("Token:    not signed in"),
    }
    Ok(())
}

async fn run_blueprints(base_url: &str) -> anyhow::Result<()> {
    let Some(credentials) = load_credentials()? else {
        anyhow::bail!("Not signed in. Run `lynx login` first.");
    };
    let client = LynxClient::new(base_url)?.with_token(credentials.token);

    let blueprints = client.list_blueprints().await?;
    if blueprints.is_empty() {
        println!("No blueprints yet.");
        return Ok(());
    }
    for blueprint in blueprints {
        println!(
            "{}  {:8}  {}",
            blueprint.id,
            blueprint.visibility.as_str(),
            blueprint.slug
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login => run_login(&cli.url).await,
        Commands::Logout => run_logout(),
        Commands::Whoami => run_whoami(),
        Commands::Status => run_status(&cli.url).await,
        Commands::Blueprints => run_blueprints(&cli.url).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
