pub mod auth;
pub mod config;
pub mod events;
pub mod new;
pub mod rsvp;

use anyhow::{Context, Result};
use dialoguer::Input;

/// Prompt for a required line of text, re-asking until it is not blank.
pub fn prompt_text(prompt: &str) -> Result<String> {
    loop {
        let value: String = Input::new().with_prompt(prompt).interact_text()?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
}

pub fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).context("Failed to read password")
}
