//! Code for loading program settings.
use crate::get_rainwise_config_dir;
use crate::input::read_toml;
use crate::log::{DEFAULT_LOG_LEVEL, parse_log_level};
use anyhow::{Context, Result, ensure};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

const DEFAULT_SETTINGS_FILE_HEADER: &str = "# This file contains the program settings for rainwise.
# Uncomment a line to change its value.
";

/// Default log level for program
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    let mut path = get_rainwise_config_dir();
    path.push(SETTINGS_FILE_NAME);

    path
}

/// Program settings from config file
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// The default program log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether to overwrite output files by default
    #[serde(default)]
    pub overwrite: bool,
    /// Folder containing cities.csv and coefficients.toml to use instead of the built-in data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            overwrite: false,
            reference_data_dir: None,
        }
    }
}

impl Settings {
    /// Read the contents of the settings file.
    ///
    /// If the file is not present, default values for settings will be used
    ///
    /// # Returns
    ///
    /// The program settings as a `Settings` struct or an error if the file is invalid
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read from the specified path, falling back to defaults if the file doesn't exist
    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        let settings: Settings = read_toml(file_path)?;
        settings
            .check()
            .with_context(|| format!("Invalid settings in {}", file_path.display()))?;

        Ok(settings)
    }

    /// Check that the log level is known and that the reference data folder, if any, exists
    fn check(&self) -> Result<()> {
        parse_log_level(&self.log_level)?;
        if let Some(dir) = &self.reference_data_dir {
            ensure!(
                dir.is_dir(),
                "reference_data_dir {} is not a folder",
                dir.display()
            );
        }

        Ok(())
    }

    /// The folder to load reference data from.
    ///
    /// A folder given on the command line takes precedence over the settings file. `None` means
    /// the built-in reference data should be used.
    pub fn reference_dir<'a>(&'a self, from_command_line: Option<&'a Path>) -> Option<&'a Path> {
        from_command_line.or(self.reference_data_dir.as_deref())
    }

    /// The contents of the default settings file
    pub fn default_file_contents() -> String {
        let settings_raw = toml::to_string(&Settings::default())
            .expect("Could not convert settings to TOML");

        // Iterate through the generated TOML, commenting out lines and adding docs
        let mut out = DEFAULT_SETTINGS_FILE_HEADER.to_string();
        for line in settings_raw.split('\n') {
            if let Some(last) = line.find('=') {
                let field = line[..last].trim();

                // Use doc comment to document parameter. All fields should have doc comments.
                let docs = Settings::get_field_docs(field).expect("Missing doc comment for field");
                for line in docs.split('\n') {
                    write!(&mut out, "\n# # {}\n", line.trim()).unwrap();
                }

                writeln!(&mut out, "# {}", line.trim()).unwrap();
            }
        }

        // Optional settings with no default are not serialised, so document them separately
        let docs = Settings::get_field_docs("reference_data_dir")
            .expect("Missing doc comment for field");
        write!(&mut out, "\n# # {docs}\n# reference_data_dir = \"\"\n").unwrap();

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_settings_load_from_path_no_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME); // NB: doesn't exist
        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_load_from_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);

        let data_dir = dir.path().join("my_data");
        std::fs::create_dir(&data_dir).unwrap();

        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "log_level = \"warn\"").unwrap();
            writeln!(file, "reference_data_dir = {:?}", data_dir.to_str().unwrap()).unwrap();
        }

        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings {
                log_level: "warn".to_string(),
                overwrite: false,
                reference_data_dir: Some(data_dir),
            }
        );
    }

    #[rstest]
    #[case("log_level = \"loud\"")]
    #[case("reference_data_dir = \"/no/such/folder\"")]
    fn test_settings_load_from_path_check_fails(#[case] contents: &str) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&file_path, contents).unwrap();
        assert!(
            Settings::load_from_path(&file_path)
                .unwrap_err()
                .to_string()
                .starts_with("Invalid settings in")
        );
    }

    #[test]
    fn test_reference_dir() {
        let settings = Settings {
            reference_data_dir: Some(PathBuf::from("from_settings")),
            ..Settings::default()
        };
        assert_eq!(
            settings.reference_dir(Some(Path::new("from_cli"))),
            Some(Path::new("from_cli"))
        );
        assert_eq!(
            settings.reference_dir(None),
            Some(Path::new("from_settings"))
        );
        assert_eq!(Settings::default().reference_dir(None), None);
    }

    #[test]
    fn test_settings_load_from_path_invalid() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&file_path, "overwrite = \"sometimes\"").unwrap();
        assert!(Settings::load_from_path(&file_path).is_err());
    }

    #[test]
    fn test_default_file_contents() {
        let contents = Settings::default_file_contents();
        assert!(contents.contains("# log_level = \"info\""));
        assert!(contents.contains("# overwrite = false"));
        assert!(contents.contains("# reference_data_dir"));

        // Every line is a comment, so the file parses to the defaults
        let settings: Settings = toml::from_str(&contents).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
