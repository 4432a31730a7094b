//! Interactive prompts (dialoguer).

use dialoguer::{Input, Password, Select};

use ucprov_axl::AxlCredentials;

use crate::error::{CliError, CliResult};

/// Top-level menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ProvisionSingle,
    ProvisionBulk,
    Quit,
}

/// Prompt for the AXL username and password at startup.
///
/// This is the only prompt whose failure ends the process; everything after
/// it returns to the menu on error.
pub fn prompt_credentials() -> CliResult<AxlCredentials> {
    let username: String = Input::new()
        .with_prompt("AXL username")
        .interact_text()
        .map_err(|e| CliError::Credentials(e.to_string()))?;
    if username.trim().is_empty() {
        return Err(CliError::Credentials("username must not be empty".into()));
    }

    let password = Password::new()
        .with_prompt("AXL password")
        .interact()
        .map_err(|e| CliError::Credentials(e.to_string()))?;

    Ok(AxlCredentials::new(username.trim(), &password))
}

pub fn prompt_menu() -> CliResult<MenuChoice> {
    let choice = Select::new()
        .with_prompt("Select an action")
        .items(&[
            "Provision single user",
            "Bulk provision from CSV",
            "Quit",
        ])
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => MenuChoice::ProvisionSingle,
        1 => MenuChoice::ProvisionBulk,
        _ => MenuChoice::Quit,
    })
}

pub fn prompt_user_id() -> CliResult<String> {
    Ok(Input::new()
        .with_prompt("User ID to provision")
        .interact_text()?)
}

pub fn prompt_csv_path() -> CliResult<String> {
    Ok(Input::new()
        .with_prompt("Path to CSV file")
        .interact_text()?)
}
