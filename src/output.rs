//! The module responsible for writing calculation results to disk.
//!
//! Three CSV files are written to the output folder:
//!
//! * `monthly.csv` - rainfall and potential for each month
//! * `summary.csv` - one row per calculated quantity, with its unit
//! * `notes.csv` - the recommendations and warnings from the feasibility assessment
use crate::month::MONTHS;
use crate::result::{CalculationResult, HarvestingDesign, RechargeDesign, SystemDesign};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The root folder in which site-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "rainwise_results";

/// The output file name for monthly values
pub const MONTHLY_FILE_NAME: &str = "monthly.csv";

/// The output file name for the summary of results
pub const SUMMARY_FILE_NAME: &str = "summary.csv";

/// The output file name for recommendations and warnings
pub const NOTES_FILE_NAME: &str = "notes.csv";

/// Unit used for money in output files
const CURRENCY: &str = "INR";

/// Get the output folder for the specified site file.
///
/// This is a folder named after the site file (without its extension) inside
/// [`OUTPUT_DIRECTORY_ROOT`].
pub fn get_output_dir(site_file: &Path) -> Result<PathBuf> {
    let site_name = site_file
        .file_stem()
        .context("Site file path has no file name")?
        .to_str()
        .context("Invalid chars in site file name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, site_name].iter().collect())
}

/// Create a new output directory, if it doesn't already exist.
///
/// An existing directory which contains files is only reused if `allow_overwrite` is true, in
/// which case its contents are deleted.
///
/// # Returns
///
/// True if an existing directory's contents were deleted, false otherwise.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if output_dir.is_dir() {
        if fs::read_dir(output_dir)?.next().is_none() {
            // Already exists and is empty
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace its \
            contents or set overwrite = true in settings.toml."
        );
        fs::remove_dir_all(output_dir)?;
        fs::create_dir_all(output_dir)?;
        return Ok(true);
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(false)
}

/// Represents a row in the monthly values CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct MonthlyRow {
    month: String,
    rainfall_mm: f64,
    potential_litres: f64,
}

/// Represents a row in the summary CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SummaryRow {
    parameter: String,
    value: String,
    unit: String,
}

impl SummaryRow {
    /// A row containing text, with no unit
    fn text<T: ToString>(parameter: &str, value: T) -> Self {
        Self {
            parameter: parameter.to_string(),
            value: value.to_string(),
            unit: String::new(),
        }
    }

    /// A row containing a number, written to the given number of decimal places
    fn quantity(parameter: &str, value: f64, decimals: usize, unit: &str) -> Self {
        Self {
            parameter: parameter.to_string(),
            value: format!("{value:.decimals$}"),
            unit: unit.to_string(),
        }
    }
}

/// The kind of note in the notes CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum NoteKind {
    Recommendation,
    Warning,
}

/// Represents a row in the notes CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct NoteRow {
    kind: NoteKind,
    message: String,
}

/// Rows for the summary file which only apply to harvesting systems
fn harvesting_rows(design: &HarvestingDesign) -> Vec<SummaryRow> {
    let tank = &design.tank;
    vec![
        SummaryRow::quantity("annual_demand", design.annual_demand.value(), 0, "L"),
        SummaryRow::quantity("coverage", design.coverage_percentage, 1, "%"),
        SummaryRow::quantity("first_flush_volume", design.first_flush_volume.value(), 0, "L"),
        SummaryRow::quantity("tank_capacity", tank.capacity.value(), 0, "L"),
        SummaryRow::quantity("tank_height", tank.height.value(), 2, "m"),
        SummaryRow::quantity("tank_diameter", tank.diameter.value(), 2, "m"),
        SummaryRow::quantity("annual_savings", design.annual_savings.value(), 0, CURRENCY),
    ]
}

/// Rows for the summary file which only apply to recharge systems
fn recharge_rows(design: &RechargeDesign) -> Vec<SummaryRow> {
    let pit = &design.pit;
    let mut rows = vec![
        SummaryRow::text("aquifer_type", &design.aquifer_type),
        SummaryRow::quantity("recharge_volume", design.recharge_volume.value(), 0, "L"),
        SummaryRow::quantity("pit_side", pit.side.value(), 1, "m"),
        SummaryRow::quantity("pit_depth", pit.depth.value(), 2, "m"),
        SummaryRow::quantity("pit_volume", pit.volume().value(), 1, "m3"),
    ];

    if let Some(trench) = &design.trench {
        rows.extend([
            SummaryRow::text("trench_count", trench.count),
            SummaryRow::quantity("trench_length", trench.length.value(), 2, "m"),
            SummaryRow::quantity("trench_width", trench.width.value(), 2, "m"),
            SummaryRow::quantity("trench_depth", trench.depth.value(), 2, "m"),
            SummaryRow::quantity("trench_total_length", trench.total_length.value(), 1, "m"),
        ]);
    }

    if let Some(borewell) = &design.borewell {
        let rejuvenation = &borewell.rejuvenation;
        rows.extend([
            SummaryRow::text("borewell_count", borewell.count),
            SummaryRow::quantity("borewell_recharge_rate", borewell.capacity.value(), 0, "L/h"),
            SummaryRow::text("rejuvenation_recommended", rejuvenation.recommended),
            SummaryRow::text("rejuvenation_method", rejuvenation.method),
            SummaryRow::text(
                "rejuvenation_expected_improvement",
                rejuvenation.expected_improvement,
            ),
        ]);
    }

    rows.push(SummaryRow::quantity(
        "groundwater_benefit",
        design.groundwater_benefit.value(),
        1,
        "m3/year",
    ));

    rows
}

/// All rows for the summary file
fn summary_rows(result: &CalculationResult) -> Vec<SummaryRow> {
    let mut rows = vec![
        SummaryRow::text("site_name", &result.site_name),
        SummaryRow::text("mode", result.mode()),
        SummaryRow::text("city", &result.city),
        SummaryRow::text("state", &result.state),
        SummaryRow::quantity("annual_rainfall", result.annual_rainfall().value(), 0, "mm"),
        SummaryRow::quantity("annual_potential", result.potential.annual.value(), 0, "L"),
    ];

    rows.extend(match &result.design {
        SystemDesign::Harvesting(design) => harvesting_rows(design),
        SystemDesign::Recharge(design) => recharge_rows(design),
    });

    let cost = &result.cost;
    rows.extend([
        SummaryRow::quantity("cost_low", cost.system_cost.low.value(), 0, CURRENCY),
        SummaryRow::quantity("cost_medium", cost.system_cost.medium.value(), 0, CURRENCY),
        SummaryRow::quantity("cost_high", cost.system_cost.high.value(), 0, CURRENCY),
        SummaryRow::text("budget", result.budget),
        SummaryRow::quantity("budget_cost", result.budget_cost().value(), 0, CURRENCY),
        SummaryRow::quantity("annual_maintenance", cost.annual_maintenance.value(), 0, CURRENCY),
        SummaryRow::quantity("lifecycle_cost", cost.lifecycle_cost.value(), 0, CURRENCY),
        SummaryRow::quantity("payback_period", cost.payback_period.value(), 1, "years"),
        SummaryRow::text("feasibility_score", result.feasibility.score),
        SummaryRow::text("feasibility_level", result.feasibility.level),
    ]);

    rows
}

/// An object for writing calculation results to file
pub struct DataWriter {
    monthly_writer: csv::Writer<File>,
    summary_writer: csv::Writer<File>,
    notes_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name: &str| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        Ok(Self {
            monthly_writer: new_writer(MONTHLY_FILE_NAME)?,
            summary_writer: new_writer(SUMMARY_FILE_NAME)?,
            notes_writer: new_writer(NOTES_FILE_NAME)?,
        })
    }

    /// Write a result to all output files
    pub fn write_result(&mut self, result: &CalculationResult) -> Result<()> {
        self.write_monthly(result)?;
        self.write_summary(result)?;
        self.write_notes(result)?;

        Ok(())
    }

    /// Write rainfall and potential for each month
    fn write_monthly(&mut self, result: &CalculationResult) -> Result<()> {
        for month in MONTHS {
            let row = MonthlyRow {
                month: month.to_string(),
                rainfall_mm: result.monthly_rainfall[month.index()].value(),
                potential_litres: result.potential.monthly[month.index()].value(),
            };
            self.monthly_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write the summary of results
    fn write_summary(&mut self, result: &CalculationResult) -> Result<()> {
        for row in summary_rows(result) {
            self.summary_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write recommendations followed by warnings
    fn write_notes(&mut self, result: &CalculationResult) -> Result<()> {
        let feasibility = &result.feasibility;
        let notes = feasibility
            .recommendations
            .iter()
            .map(|message| (NoteKind::Recommendation, message))
            .chain(
                feasibility
                    .warnings
                    .iter()
                    .map(|message| (NoteKind::Warning, message)),
            );
        for (kind, message) in notes {
            self.notes_writer.serialize(NoteRow {
                kind,
                message: message.clone(),
            })?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.monthly_writer.flush()?;
        self.summary_writer.flush()?;
        self.notes_writer.flush()?;

        Ok(())
    }
}

/// Write a result to CSV files in the given folder
pub fn write_result(output_path: &Path, result: &CalculationResult) -> Result<()> {
    let mut writer = DataWriter::create(output_path)?;
    writer.write_result(result)?;
    writer.flush()
}
