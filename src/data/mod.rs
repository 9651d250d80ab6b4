pub mod app_settings;
pub mod persistence;

pub use app_settings::AppSettings;
