//! Code related to the demo sites and the CLI commands for interacting with them.
use super::{RunOpts, handle_run_command};
use crate::settings::Settings;
use anyhow::{Context, Result, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the demo sites
static DEMOS_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/demos");

/// Name of the site file inside each demo folder
const SITE_FILE_NAME: &str = "site.toml";

/// The available subcommands for managing demo sites.
#[derive(Subcommand)]
pub enum DemoSubcommands {
    /// List available demos.
    List,
    /// Provide information about the specified demo.
    Info {
        /// The name of the demo.
        name: String,
    },
    /// Extract a demo site to a new directory.
    Extract {
        /// The name of the demo to extract.
        name: String,
        /// The destination folder for the demo.
        new_path: Option<PathBuf>,
    },
    /// Run a demo.
    Run {
        /// The name of the demo to run.
        name: String,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
}

impl DemoSubcommands {
    /// Execute the supplied demo subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_demo_list_command(),
            Self::Info { name } => handle_demo_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_demo_extract_command(&name, dest.as_deref())?,
            Self::Run { name, opts } => handle_demo_run_command(&name, opts, None)?,
        }

        Ok(())
    }
}

/// The names of all available demos
pub fn demo_names() -> impl Iterator<Item = &'static str> {
    DEMOS_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// Handle the `demo list` command.
fn handle_demo_list_command() {
    for name in demo_names() {
        println!("{name}");
    }
}

/// Handle the `demo info` command.
fn handle_demo_info_command(name: &str) -> Result<()> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    let readme = DEMOS_DIR
        .get_file(path)
        .context("Demo not found.")?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")?;

    println!("{readme}");

    Ok(())
}

/// Handle the `demo extract` command
fn handle_demo_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_demo(name, dest)
}

/// Extract the specified demo to a new directory
fn extract_demo(name: &str, new_path: &Path) -> Result<()> {
    let sub_dir = DEMOS_DIR.get_dir(name).context("Demo not found.")?;

    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir(new_path)?;
    for entry in sub_dir.entries() {
        if let DirEntry::File(f) = entry {
            let file_name = f.path().file_name().context("Invalid file in demo")?;
            fs::write(new_path.join(file_name), f.contents())?;
        }
    }

    Ok(())
}

/// Handle the `demo run` command.
///
/// Unless another folder is given, results are written to a folder named after the demo.
pub fn handle_demo_run_command(
    name: &str,
    mut opts: RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let demo_path = temp_dir.path().join(name);
    extract_demo(name, &demo_path)?;

    if opts.output_dir.is_none() {
        opts.output_dir = Some(crate::output::get_output_dir(Path::new(name))?);
    }
    handle_run_command(&demo_path.join(SITE_FILE_NAME), &opts, settings)
}
