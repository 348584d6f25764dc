//! CLI module for the hbnb command-line client.
//!
//! Public subcommands mirror the listing site:
//! - `login` / `logout` / `status` / `register` - session management
//! - `places list` / `places show <id>` - browse listings and details
//! - `reviews add <place>` - post a review
//!
//! `admin ...` subcommands mirror the admin console, and `config check`
//! validates the configuration file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::admin::AdminConsole;
use crate::config::Config;
use crate::listing::{browse_places, LoadOutcome, PlaceDetailPage, PriceFilter, ResourceList};
use crate::models::{Amenity, NewAmenity, NewUser, Place, Review, User};
use crate::session::{Affordance, Gate, SessionManager, SessionStatus};
use crate::ui::{Console, TerminalUi, View};
use crate::ClientState;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(author, version, about = "Command-line client for the HBnB rental listing API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hbnb.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API base URL, including the version prefix
    #[arg(long, env = "HBNB_API_URL")]
    pub api_url: Option<String>,

    /// Where the session token is stored
    #[arg(long, env = "HBNB_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the access token
    Login(Credentials),

    /// Forget the stored access token
    Logout,

    /// Show whether a session is stored and what it claims
    Status,

    /// Create a new (non-admin) account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HBNB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Browse places
    #[command(subcommand)]
    Places(PlacesCommands),

    /// Review commands
    #[command(subcommand)]
    Reviews(ReviewsCommands),

    /// Admin console commands
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(clap::Args, Debug)]
pub struct Credentials {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "HBNB_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum PlacesCommands {
    /// List places, optionally capped by nightly price
    List {
        /// Maximum price per night, or "all"
        #[arg(long, default_value = "all")]
        max_price: PriceFilter,
    },
    /// Show a place with its reviews
    Show { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ReviewsCommands {
    /// Review a place
    Add {
        place: String,
        #[arg(long)]
        text: String,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Log in as an administrator
    Login(Credentials),
    /// Log out of the admin console
    Logout,
    /// Show dashboard counters
    Stats,
    #[command(subcommand)]
    Users(AdminUsersCommands),
    #[command(subcommand)]
    Places(AdminPlacesCommands),
    #[command(subcommand)]
    Reviews(AdminReviewsCommands),
    #[command(subcommand)]
    Amenities(AdminAmenitiesCommands),
}

#[derive(Subcommand, Debug)]
pub enum AdminUsersCommands {
    List,
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HBNB_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// Grant admin privileges
        #[arg(long)]
        admin: bool,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AdminPlacesCommands {
    List,
    Show { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AdminReviewsCommands {
    List,
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AdminAmenitiesCommands {
    List,
    Create { name: String },
    Delete { id: String },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

/// Apply CLI overrides on top of the loaded configuration
pub fn effective_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        config.session.file = path.clone();
    }
    config
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, config: Config) -> Result<()> {
    if let Commands::Config(ConfigCommands::Check) = &cli.command {
        return cmd_config_check(cli);
    }

    let config = effective_config(cli, config);
    let ui = Arc::new(TerminalUi::new(cli.yes));
    let state = ClientState::from_config(&config, ui).context("Failed to create HTTP client")?;

    match &cli.command {
        Commands::Login(creds) => {
            SessionManager::new(&state)
                .login(Console::Public, &creds.email, &creds.password)
                .await?;
        }
        Commands::Logout => SessionManager::new(&state).logout(Console::Public)?,
        Commands::Status => cmd_status(&state),
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            let draft = NewUser {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone(),
                password: password.clone(),
                is_admin: false,
            };
            SessionManager::new(&state).register(draft).await?;
        }
        Commands::Places(PlacesCommands::List { max_price }) => {
            let (outcome, _) = browse_places(&state, *max_price).await;
            check_outcome(outcome)?;
        }
        Commands::Places(PlacesCommands::Show { id }) => {
            let detail = PlaceDetailPage::new(&state).load(id).await;
            if detail.place.is_none() {
                anyhow::bail!("Place {} could not be loaded", id);
            }
        }
        Commands::Reviews(ReviewsCommands::Add { place, text, rating }) => {
            let gate = SessionManager::new(&state).require_auth(&View::AddReview(place.clone()));
            if gate == Gate::Redirected {
                anyhow::bail!("Login required");
            }
            PlaceDetailPage::new(&state)
                .submit_review(place, text, rating)
                .await?;
        }
        Commands::Admin(command) => run_admin(&state, command).await?,
        Commands::Config(ConfigCommands::Check) => unreachable!("handled above"),
    }

    Ok(())
}

async fn run_admin(state: &ClientState, command: &AdminCommands) -> Result<()> {
    let console = AdminConsole::new(state);

    match command {
        AdminCommands::Login(creds) => {
            let session = SessionManager::new(state);
            if session.require_auth(&View::AdminLogin) == Gate::Redirected {
                return Ok(());
            }
            session
                .login(Console::Admin, &creds.email, &creds.password)
                .await?;
        }
        AdminCommands::Logout => SessionManager::new(state).logout(Console::Admin)?,
        AdminCommands::Stats => {
            if console.dashboard().await.is_none() {
                anyhow::bail!("Dashboard statistics unavailable");
            }
        }
        AdminCommands::Users(AdminUsersCommands::List) => {
            let page = gated::<User>(&console, View::AdminUsers)?;
            check_outcome(page.load().await)?;
        }
        AdminCommands::Users(AdminUsersCommands::Create {
            first_name,
            last_name,
            email,
            password,
            admin,
        }) => {
            let page = gated::<User>(&console, View::AdminUsers)?;
            page.create(&NewUser {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone(),
                password: password.clone(),
                is_admin: *admin,
            })
            .await?;
        }
        AdminCommands::Users(AdminUsersCommands::Delete { id }) => {
            let page = gated::<User>(&console, View::AdminUsers)?;
            page.delete(id).await?;
        }
        AdminCommands::Places(AdminPlacesCommands::List) => {
            let page = gated::<Place>(&console, View::AdminPlaces)?;
            check_outcome(page.load().await)?;
        }
        AdminCommands::Places(AdminPlacesCommands::Show { id }) => {
            gated::<Place>(&console, View::AdminPlaces)?;
            let detail = PlaceDetailPage::for_console(state, Console::Admin)
                .load(id)
                .await;
            if detail.place.is_none() {
                anyhow::bail!("Place {} could not be loaded", id);
            }
        }
        AdminCommands::Reviews(AdminReviewsCommands::List) => {
            let page = gated::<Review>(&console, View::AdminReviews)?;
            check_outcome(page.load().await)?;
        }
        AdminCommands::Reviews(AdminReviewsCommands::Delete { id }) => {
            let page = gated::<Review>(&console, View::AdminReviews)?;
            page.delete(id).await?;
        }
        AdminCommands::Amenities(AdminAmenitiesCommands::List) => {
            let page = gated::<Amenity>(&console, View::AdminAmenities)?;
            check_outcome(page.load().await)?;
        }
        AdminCommands::Amenities(AdminAmenitiesCommands::Create { name }) => {
            let page = gated::<Amenity>(&console, View::AdminAmenities)?;
            page.create(&NewAmenity { name: name.clone() }).await?;
        }
        AdminCommands::Amenities(AdminAmenitiesCommands::Delete { id }) => {
            let page = gated::<Amenity>(&console, View::AdminAmenities)?;
            page.delete(id).await?;
        }
    }

    Ok(())
}

fn gated<'a, R: crate::listing::Resource>(
    console: &AdminConsole<'a>,
    view: View,
) -> Result<ResourceList<'a, R>> {
    console
        .page::<R>(view)
        .ok_or_else(|| anyhow::anyhow!("Admin login required"))
}

fn check_outcome(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Rendered(_) | LoadOutcome::Empty => Ok(()),
        LoadOutcome::Failed => anyhow::bail!("Request failed"),
        LoadOutcome::SessionExpired => anyhow::bail!("Session expired"),
    }
}

/// Display the stored session
fn cmd_status(state: &ClientState) {
    let session = SessionManager::new(state);
    println!(
        "{}",
        render_status(state.api.base_url(), &session.status(), session.affordance())
    );
}

fn render_status(base_url: &str, status: &SessionStatus, affordance: Affordance) -> String {
    let mut lines = vec![
        String::new(),
        "=== HBnB Session ===".to_string(),
        String::new(),
        format!("API:        {}", base_url),
    ];

    if status.logged_in {
        lines.push("Session:    logged in".to_string());
        match &status.claims {
            Some(claims) => {
                lines.push(format!(
                    "User:       {}",
                    claims.subject().unwrap_or_else(|| "-".to_string())
                ));
                lines.push(format!(
                    "Admin:      {} (unverified claim)",
                    if claims.is_admin { "Yes" } else { "No" }
                ));
                if let Some(exp) = claims.expires_at() {
                    lines.push(format!("Expires:    {}", exp.to_rfc3339()));
                }
            }
            None => lines.push("Token:      opaque (no readable claims)".to_string()),
        }
    } else {
        lines.push("Session:    not logged in".to_string());
    }

    let next = match affordance {
        Affordance::Login => format!("log in with '{}'", View::Login.command()),
        Affordance::Logout => "log out with 'hbnb logout'".to_string(),
    };
    lines.push(format!("Next:       {}", next));
    lines.push(String::new());
    lines.join("\n")
}

/// Validate configuration file
fn cmd_config_check(cli: &Cli) -> Result<()> {
    let config_path = &cli.config;

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("Defaults will be used.");
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            let config = effective_config(cli, config);
            println!("[OK] Configuration file is valid!");
            println!();
            println!("=== Configuration Summary ===");
            println!();
            println!("API:");
            println!("  Base URL:     {}", config.api.base_url);
            println!("  Timeout:      {}s", config.api.timeout_secs);
            println!();
            println!("Session:");
            println!("  File:         {}", config.session.file.display());
            println!("  Lifetime:     {}s", config.session.ttl_secs);
            println!();
            println!("Logging:");
            println!("  Level:        {}", config.logging.level);
            println!();

            if !config.api.base_url.starts_with("https://") {
                println!("Warnings:");
                println!("  [!] API base URL is not HTTPS - credentials travel in plaintext");
                println!();
            }

            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid!");
            println!();
            println!("Error: {:#}", e);
            println!();
            anyhow::bail!("Invalid configuration file");
        }
    }
}
