//! The command line interface for rainwise.
use crate::city::CityLookup;
use crate::engine::Engine;
use crate::input::load_reference_data;
use crate::input::site::read_site;
use crate::log;
use crate::output::{create_output_directory, get_output_dir, write_result};
use crate::result::{CalculationResult, SystemDesign};
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod demo;
use demo::DemoSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for rainwise.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// Folder containing reference data to use instead of the built-in data
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Design a system for a site.
    Run {
        /// Path to the site file.
        site_file: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Validate a site file.
    Validate {
        /// Path to the site file.
        site_file: PathBuf,
        /// Folder containing reference data to use instead of the built-in data
        #[arg(long)]
        reference_dir: Option<PathBuf>,
    },
    /// List the cities in the reference data.
    Cities {
        /// Folder containing reference data to use instead of the built-in data
        #[arg(long)]
        reference_dir: Option<PathBuf>,
    },
    /// Manage demo sites.
    Demo {
        /// The available subcommands for managing demo sites.
        #[command(subcommand)]
        subcommand: DemoSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { site_file, opts } => handle_run_command(&site_file, &opts, None),
            Self::Validate {
                site_file,
                reference_dir,
            } => handle_validate_command(&site_file, reference_dir.as_deref(), None),
            Self::Cities { reference_dir } => handle_cities_command(reference_dir.as_deref()),
            Self::Demo { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start rainwise
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ rainwise --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn settings_or_load(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Handle the `run` command.
pub fn handle_run_command(
    site_file: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(site_file)?;
        &pathbuf
    };

    // The overwrite setting can be switched on by command-line argument
    let allow_overwrite = opts.overwrite || settings.overwrite;
    let overwrite = create_output_directory(output_path, allow_overwrite).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    // Initialise program logger
    log::init(&settings.log_level, Some(output_path))
        .context("Failed to initialise logging.")?;

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder was overwritten");
    }

    let reference_dir = settings.reference_dir(opts.reference_dir.as_deref());
    let reference = load_reference_data(reference_dir).context("Failed to load reference data.")?;

    let site = read_site(site_file).context("Failed to load site.")?;
    info!("Loaded site from {}", site_file.display());
    info!("Output folder: {}", output_path.display());

    let result = Engine::new(reference)
        .calculate(&site)
        .context("Calculation failed.")?;
    log_summary(&result);

    write_result(output_path, &result).context("Failed to write results.")?;
    info!("Calculation complete!");

    Ok(())
}

/// Write the key figures of a result to the log
fn log_summary(result: &CalculationResult) {
    info!(
        "Designed {} system for '{}' using rainfall data for {}, {} ({:.0} mm a year)",
        result.mode(),
        result.site_name,
        result.city,
        result.state,
        result.annual_rainfall().value()
    );
    info!("Annual potential: {:.0} L", result.potential.annual.value());

    match &result.design {
        SystemDesign::Harvesting(design) => {
            info!(
                "Tank capacity: {:.0} L, covering {:.1}% of annual demand",
                design.tank.capacity.value(),
                design.coverage_percentage
            );
        }
        SystemDesign::Recharge(design) => {
            info!(
                "Recharge pit: {:.1} m x {:.1} m x {:.2} m deep",
                design.pit.side.value(),
                design.pit.side.value(),
                design.pit.depth.value()
            );
            if let Some(trench) = &design.trench {
                info!(
                    "Recharge trenches: {} x {:.2} m",
                    trench.count,
                    trench.length.value()
                );
            }
        }
    }

    info!(
        "Cost ({} budget): {:.0} INR, payback period {:.1} years",
        result.budget,
        result.budget_cost().value(),
        result.cost.payback_period.value()
    );
    info!(
        "Feasibility: {} (score {})",
        result.feasibility.level, result.feasibility.score
    );
    for warning in &result.feasibility.warnings {
        warn!("{warning}");
    }
}

/// Handle the `validate` command.
pub fn handle_validate_command(
    site_file: &Path,
    reference_dir: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;

    // Initialise program logger (we won't save log files when running the validate command)
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let reference = load_reference_data(settings.reference_dir(reference_dir))
        .context("Failed to load reference data.")?;

    // Load/validate the site
    let site = read_site(site_file).context("Failed to validate site.")?;
    let common = site.common();
    let city = reference
        .cities
        .resolve(&common.location, &common.pincode)?;
    info!(
        "Site '{}' is valid and will use reference data for {}",
        common.name, city.name
    );

    Ok(())
}

/// Handle the `cities` command.
fn handle_cities_command(reference_dir: Option<&Path>) -> Result<()> {
    let settings = settings_or_load(None)?;
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let reference = load_reference_data(settings.reference_dir(reference_dir))
        .context("Failed to load reference data.")?;
    for city in reference.iter_cities() {
        println!(
            "{} ({}): {:.0} mm a year",
            city.name,
            city.state,
            city.annual_rainfall().value()
        );
    }

    Ok(())
}
