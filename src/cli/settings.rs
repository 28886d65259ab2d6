//! The `settings` CLI commands, for inspecting and editing the settings file
use crate::settings::{Settings, get_settings_file_path};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

/// Subcommands for settings
#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Edit the program settings file
    Edit,
    /// Get the path to where the settings file is read from
    Path,
    /// Show the settings currently in effect
    Show,
    /// Write the contents of a placeholder `settings.toml` to the console
    DumpDefault,
}

impl SettingsSubcommands {
    /// Execute the supplied settings subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Edit => handle_edit_command()?,
            Self::Path => println!("{}", get_settings_file_path().display()),
            Self::Show => print!("{}", effective_settings()?),
            Self::DumpDefault => print!("{}", Settings::default_file_contents()),
        }

        Ok(())
    }
}

/// Create a placeholder settings file if there isn't one already.
///
/// # Returns
///
/// True if a new file was written.
fn ensure_settings_file_exists(file_path: &Path) -> Result<bool> {
    if file_path.is_file() {
        return Ok(false);
    }

    if let Some(dir_path) = file_path.parent() {
        fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
    }
    fs::write(file_path, Settings::default_file_contents())
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    Ok(true)
}

/// Handle the `edit` command.
///
/// The file is read back afterwards so that mistakes are reported straight away rather than on
/// the next run.
fn handle_edit_command() -> Result<()> {
    let file_path = get_settings_file_path();
    if ensure_settings_file_exists(&file_path)? {
        println!("Created new settings file: {}", file_path.display());
    }

    println!("Opening settings file for editing: {}", file_path.display());
    edit::edit_file(&file_path)?;

    Settings::load().context("The edited settings file is invalid")?;
    println!("Settings saved.");

    Ok(())
}

/// The settings in effect, as TOML
fn effective_settings() -> Result<String> {
    let settings = Settings::load().context("Failed to load settings.")?;
    Ok(toml::to_string(&settings)?)
}
