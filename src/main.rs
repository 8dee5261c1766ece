mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use campus_events_core::config::CampusConfig;
use campus_events_core::session::SessionManager;
use campus_events_core::store::FileStore;
use campus_events_core::user::SessionUser;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "campus-events")]
#[command(about = "Create, browse and RSVP to campus events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// "student" or "faculty"
        #[arg(long)]
        role: Option<String>,
    },
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Create a new event
    New {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// workshop, club-meeting, hackathon, seminar, social, sports or other
        #[arg(short, long)]
        category: Option<String>,

        /// Leave out for unlimited
        #[arg(long)]
        max_attendees: Option<String>,
    },
    /// List upcoming events
    Events {
        /// Only show events whose title or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category slug, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Only show events you created
        #[arg(long)]
        organizing: bool,
    },
    /// Join an event, or cancel if already attending
    Rsvp { event_id: String },
    /// List upcoming events you are attending
    Rsvps,
    /// Show config and data paths, or change settings
    Config {
        /// Directory for users, the session and events
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Log level used when RUST_LOG is not set
        #[arg(long)]
        log_level: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CampusConfig::load().context("Could not load configuration")?;
    logging::init(&config.log_level)?;
    tracing::debug!(?config, "loaded configuration");

    let data_path = config.data_path();
    let mut store = FileStore::open(&data_path)
        .with_context(|| format!("Could not open data directory {}", data_path.display()))?;
    tracing::debug!(data_path = %data_path.display(), "opened store");

    match cli.command {
        Commands::Signup { name, email, role } => {
            commands::auth::signup(&mut store, name, email, role)
        }
        Commands::Login { email } => commands::auth::login(&mut store, email),
        Commands::Logout => commands::auth::logout(&mut store),
        Commands::Whoami => commands::auth::whoami(&mut store),
        Commands::New {
            title,
            description,
            date,
            time,
            location,
            category,
            max_attendees,
        } => {
            let user = require_user(&mut store)?;
            let form = commands::new::EventForm {
                title,
                description,
                date,
                time,
                location,
                category,
                max_attendees,
            };
            commands::new::run(&mut store, &user, form)
        }
        Commands::Events {
            search,
            category,
            organizing,
        } => {
            let user = require_user(&mut store)?;
            commands::events::run(&mut store, &user, &search, &category, organizing)
        }
        Commands::Rsvp { event_id } => {
            let user = require_user(&mut store)?;
            commands::rsvp::run(&mut store, &user, &event_id)
        }
        Commands::Rsvps => {
            let user = require_user(&mut store)?;
            commands::rsvp::list(&mut store, &user)
        }
        Commands::Config {
            data_dir,
            log_level,
        } => commands::config::run(config, data_dir, log_level),
    }
}

fn require_user(store: &mut FileStore) -> Result<SessionUser> {
    let sessions = SessionManager::restore(store);

    match sessions.current_user() {
        Some(user) => {
            tracing::debug!(user_id = %user.id, "session active");
            Ok(user.clone())
        }
        None => anyhow::bail!(
            "Not logged in.\n\n\
            Log in with:\n  \
            campus-events login\n\n\
            Or create an account with:\n  \
            campus-events signup"
        ),
    }
}
