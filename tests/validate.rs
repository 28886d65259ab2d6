//! Integration tests for the `validate` command.
use rainwise::cli::handle_validate_command;
use rainwise::log::is_logger_initialised;
use rainwise::settings::Settings;
use std::fs;
use tempfile::tempdir;

const SITE: &str = r#"
mode = "harvesting"
name = "Validation test"
location = "Koramangala, Bengaluru"
pincode = "560034"
soil_type = "clayey"
groundwater_depth = 25.0
budget = "low"

[harvesting]
roof_area = 80.0
roof_material = "tiles"
environment = "residential"
occupants = 3
purpose = "domestic"
"#;

/// An integration test for the `validate` command.
///
/// We also check that the logger is initialised after it is run.
#[test]
fn test_handle_validate_command() {
    unsafe { std::env::set_var("RAINWISE_LOG_LEVEL", "off") };

    let dir = tempdir().unwrap();
    let site_file = dir.path().join("site.toml");
    fs::write(&site_file, SITE).unwrap();

    assert!(!is_logger_initialised());

    handle_validate_command(&site_file, None, Some(Settings::default())).unwrap();

    assert!(is_logger_initialised());

    // Second time will fail because the logging is already initialised
    assert_eq!(
        handle_validate_command(&site_file, None, Some(Settings::default()))
            .unwrap_err()
            .chain()
            .next()
            .unwrap()
            .to_string(),
        "Failed to initialise logging."
    );
}
