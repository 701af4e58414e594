//! Runtime settings.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then environment variables such as
//! `STATUSLIGHT__BUZZER__MIN_INTERVAL=1.5`.
//!
//! ```toml
//! [led]
//! rate_hz = 5.0
//! battery_timeout = 5.0
//! arm_timeout = 5.0
//!
//! [buzzer]
//! rate_hz = 10.0
//! min_interval = 2.0
//! source_timeout = 2.0
//! low_cell_voltage = 3.5
//!
//! [buttons]
//! gpios = [17, 27]
//! guard_time = 1.0
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use statuslight_core::{BuzzerConfig, LedConfig};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STATUSLIGHT";

/// Settings as read from the configuration sources, before validation.
///
/// Durations are seconds, rates are Hz.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub led: LedSettings,
    pub buzzer: BuzzerSettings,
    pub buttons: ButtonSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedSettings {
    pub rate_hz: f64,
    pub battery_timeout: f64,
    pub arm_timeout: f64,
}

impl Default for LedSettings {
    fn default() -> Self {
        Self {
            rate_hz: 5.0,
            battery_timeout: 5.0,
            arm_timeout: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuzzerSettings {
    pub rate_hz: f64,
    pub min_interval: f64,
    pub source_timeout: f64,
    pub low_cell_voltage: f32,
}

impl Default for BuzzerSettings {
    fn default() -> Self {
        Self {
            rate_hz: 10.0,
            min_interval: 2.0,
            source_timeout: 2.0,
            low_cell_voltage: 3.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonSettings {
    /// GPIOs wired to buttons, in button index order. Required.
    pub gpios: Vec<u8>,
    pub guard_time: f64,
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            gpios: Vec::new(),
            guard_time: 1.0,
        }
    }
}

/// Validated settings, converted to the types the nodes use.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub led: LedConfig,
    pub led_period: Duration,
    pub buzzer: BuzzerConfig,
    pub buzzer_period: Duration,
    pub gpios: Vec<u8>,
    pub guard_time: Duration,
}

impl Settings {
    /// Load settings from `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    /// Load settings from `path` (if given) and an explicit environment source.
    pub fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Check every value and convert to [`AppConfig`].
    pub fn validate(&self) -> Result<AppConfig> {
        let led_period = period("led.rate_hz", self.led.rate_hz)?;
        let buzzer_period = period("buzzer.rate_hz", self.buzzer.rate_hz)?;

        let led = LedConfig {
            battery_timeout: seconds("led.battery_timeout", self.led.battery_timeout)?,
            arm_timeout: seconds("led.arm_timeout", self.led.arm_timeout)?,
        };

        if !self.buzzer.low_cell_voltage.is_finite() {
            bail!("buzzer.low_cell_voltage must be a finite number");
        }
        let buzzer = BuzzerConfig {
            min_interval: seconds("buzzer.min_interval", self.buzzer.min_interval)?,
            source_timeout: seconds("buzzer.source_timeout", self.buzzer.source_timeout)?,
            low_cell_voltage: self.buzzer.low_cell_voltage,
        };

        if self.buttons.gpios.is_empty() {
            bail!("Required setting buttons.gpios is not set");
        }
        let mut seen = BTreeSet::new();
        for gpio in &self.buttons.gpios {
            if !seen.insert(*gpio) {
                bail!("GPIO {} is listed more than once in buttons.gpios", gpio);
            }
        }

        Ok(AppConfig {
            led,
            led_period,
            buzzer,
            buzzer_period,
            gpios: self.buttons.gpios.clone(),
            guard_time: seconds("buttons.guard_time", self.buttons.guard_time)?,
        })
    }
}

/// The environment source for `STATUSLIGHT__SECTION__KEY` variables.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("buttons.gpios")
}

fn seconds(key: &str, value: f64) -> Result<Duration> {
    if !(value.is_finite() && value > 0.0) {
        bail!("{} must be a positive number of seconds, got {}", key, value);
    }
    Duration::try_from_secs_f64(value).with_context(|| format!("{} is out of range", key))
}

fn period(key: &str, rate_hz: f64) -> Result<Duration> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        bail!("{} must be a positive rate, got {}", key, rate_hz);
    }
    seconds(key, 1.0 / rate_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> Environment {
        environment().source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_any_source() {
        let settings = Settings::load_with(None, no_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.led.rate_hz, 5.0);
        assert_eq!(settings.buzzer.rate_hz, 10.0);
        assert_eq!(settings.buzzer.low_cell_voltage, 3.5);
        assert_eq!(settings.buttons.guard_time, 1.0);
    }

    #[test]
    fn test_missing_gpios_fail_validation() {
        let settings = Settings::default();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("buttons.gpios"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            [buzzer]
            min_interval = 1.5

            [buttons]
            gpios = [17, 27]
            "#,
        );
        let settings = Settings::load_with(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.buzzer.min_interval, 1.5);
        assert_eq!(settings.buzzer.source_timeout, 2.0);
        assert_eq!(settings.buttons.gpios, vec![17, 27]);

        let config = settings.validate().unwrap();
        assert_eq!(config.buzzer.min_interval, Duration::from_millis(1500));
        assert_eq!(config.led_period, Duration::from_millis(200));
        assert_eq!(config.buzzer_period, Duration::from_millis(100));
        assert_eq!(config.guard_time, Duration::from_secs(1));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file(
            r#"
            [led]
            battery_timeout = 3.0

            [buttons]
            gpios = [17]
            "#,
        );
        let settings = Settings::load_with(
            Some(file.path()),
            env(&[
                ("STATUSLIGHT__LED__BATTERY_TIMEOUT", "4.5"),
                ("STATUSLIGHT__BUTTONS__GPIOS", "5,6"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.led.battery_timeout, 4.5);
        assert_eq!(settings.buttons.gpios, vec![5, 6]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load_with(Some(Path::new("/nonexistent/statuslight.toml")), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let mut settings = Settings::default();
        settings.buttons.gpios = vec![17];
        assert!(settings.validate().is_ok());

        settings.led.rate_hz = 0.0;
        assert!(settings.validate().is_err());

        settings.led.rate_hz = 5.0;
        settings.buzzer.min_interval = -1.0;
        assert!(settings.validate().is_err());

        settings.buzzer.min_interval = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_gpios() {
        let mut settings = Settings::default();
        settings.buttons.gpios = vec![17, 27, 17];
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("GPIO 17"));
    }
}
