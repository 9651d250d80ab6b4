use crate::data::AppSettings;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    init_dir(&dir, &mut std::io::stdout())
}

/// Initializes `dir` and reports it on `out`. Auto-init passes stderr so
/// that stdout stays reserved for the picked date.
pub(crate) fn init_dir<W: std::io::Write>(dir: &Path, out: &mut W) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    run_in_dir(dir)?;
    writeln!(out, "Data files initialized successfully.")?;
    Ok(())
}

/// Writes the default config.yaml into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    info!(dir = %dir.display(), "wrote default config.yaml");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::WeekStart;
    use tempfile::TempDir;

    #[test]
    fn test_run_in_dir_creates_config() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        assert!(tmp.path().join("config.yaml").exists(), "config.yaml missing");
    }

    #[test]
    fn test_config_yaml_contains_settings() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        let content = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
        assert!(content.contains("settings"), "config.yaml missing 'settings' key");
        assert!(content.contains("week_start: sunday"), "config.yaml missing week_start");
        assert!(content.contains("weekday_labels"), "config.yaml missing weekday_labels");
    }

    #[test]
    fn test_config_yaml_loads_back_as_defaults() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        let settings = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.week_start, WeekStart::Sunday);
    }

    #[test]
    fn test_init_dir_creates_missing_dir_and_reports_on_writer() {
        let tmp = TempDir::new().unwrap();
        let fresh = tmp.path().join("fresh");
        let mut banner = Vec::new();
        init_dir(&fresh, &mut banner).unwrap();
        assert!(fresh.join("config.yaml").exists());
        assert_eq!(
            String::from_utf8(banner).unwrap(),
            "Data files initialized successfully.\n"
        );
    }

    #[test]
    fn test_show_json_stays_parseable_after_init() {
        use crate::calc::DisplayedMonth;
        use crate::cmd::show::write_month_json;

        let tmp = TempDir::new().unwrap();
        let fresh = tmp.path().join("fresh");
        let mut stderr = Vec::new();
        let mut stdout = Vec::new();
        init_dir(&fresh, &mut stderr).unwrap();
        let settings = AppSettings::load_from(&fresh).unwrap();
        write_month_json(DisplayedMonth::new(2025, 7).unwrap(), &settings, &mut stdout).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 35);
        assert!(!String::from_utf8(stdout).unwrap().contains("initialized"));
    }

    #[test]
    fn test_run_in_dir_overwrites_existing_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.yaml"), "settings:\n  week_start: friday\n").unwrap();
        run_in_dir(tmp.path()).unwrap();
        let settings = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(settings.week_start, WeekStart::Sunday);
    }
}
