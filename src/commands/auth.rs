use anyhow::Result;
use campus_events_core::session::SessionManager;
use campus_events_core::store::FileStore;
use campus_events_core::user::Role;
use dialoguer::Select;
use owo_colors::OwoColorize;

use super::{prompt_password, prompt_text};
use crate::render::Render;

pub fn signup(
    store: &mut FileStore,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => prompt_text("  Name")?,
    };

    let email = match email {
        Some(e) => e,
        None => prompt_text("  Email")?,
    };

    let role = match role {
        Some(r) => r.parse::<Role>()?,
        None => prompt_role()?,
    };

    let password = prompt_password("  Password: ")?;

    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Name, email and password are all required");
    }

    let mut sessions = SessionManager::restore(store);

    if !sessions.signup(&name, &email, &password, role)? {
        anyhow::bail!("An account with {} already exists. Try `campus-events login`.", email);
    }

    println!("{}", format!("  Welcome, {}!", name).green());
    Ok(())
}

pub fn login(store: &mut FileStore, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt_text("  Email")?,
    };
    let password = prompt_password("  Password: ")?;

    let mut sessions = SessionManager::restore(store);

    if !sessions.login(&email, &password)? {
        anyhow::bail!("Invalid email or password");
    }

    if let Some(user) = sessions.current_user() {
        println!("{}", format!("  Welcome back, {}!", user.name).green());
    }
    Ok(())
}

pub fn logout(store: &mut FileStore) -> Result<()> {
    let mut sessions = SessionManager::restore(store);
    sessions.logout()?;

    println!("  Logged out");
    Ok(())
}

pub fn whoami(store: &mut FileStore) -> Result<()> {
    let sessions = SessionManager::restore(store);

    match sessions.current_user() {
        Some(user) => println!("  {}", user.render()),
        None => println!("  {}", "Not logged in".dimmed()),
    }
    Ok(())
}

fn prompt_role() -> Result<Role> {
    let items: Vec<String> = Role::ALL.iter().map(|r| r.to_string()).collect();

    let selection = Select::new()
        .with_prompt("  Role")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Role::ALL[selection])
}
