use crate::prelude::*;
use crate::vedirect::{ProfileName, ScaleOverrides, ScaleProfile};

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use serde_yaml;

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which firmware resolution the connected device transmits at
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub profile: ProfileName,

    /// Per-quantity divisor overrides applied on top of `profile`
    #[serde(default)]
    pub scales: ScaleOverrides,

    #[serde(default = "Config::default_loglevel")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: ProfileName::default(),
            scales: ScaleOverrides::default(),
            loglevel: Self::default_loglevel(),
        }
    }
}

impl Config {
    pub fn new(file: String) -> Result<Self> {
        info!("Reading configuration from {}", file);
        let content = std::fs::read_to_string(&file)
            .map_err(|err| anyhow!("config.rs:error reading {}: {}", file, err))?;

        Self::from_yaml(&content)
    }

    /// Reads `file` when given, otherwise returns the defaults.
    pub fn load(file: Option<&str>) -> Result<Self> {
        match file {
            Some(file) => Self::new(file.to_string()),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // an empty document deserializes as unit, not as an empty mapping
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn log_summary(&self) {
        let scales = self.scale_profile();
        info!("Configuration:");
        info!("  Profile: {}", self.profile);
        info!("    Voltage divisor: {}", scales.voltage);
        info!("    Current divisor: {}", scales.current);
        info!("    Input voltage divisor: {}", scales.input_voltage);
        info!("    Load current divisor: {}", scales.load_current);
        info!("    Energy divisor: {}", scales.energy);
        info!("    Firmware divisor: {}", scales.firmware);
        info!("  Log Level: {}", self.loglevel);
    }

    fn validate(&self) -> Result<()> {
        self.scales.validate()?;

        if self.loglevel.trim().is_empty() {
            bail!("loglevel cannot be empty");
        }

        Ok(())
    }

    pub fn profile(&self) -> ProfileName {
        self.profile
    }

    pub fn set_profile(&mut self, profile: ProfileName) {
        self.profile = profile;
    }

    pub fn loglevel(&self) -> &str {
        &self.loglevel
    }

    /// The selected profile with any `scales` overrides applied.
    pub fn scale_profile(&self) -> ScaleProfile {
        ScaleProfile::named(self.profile).with_overrides(&self.scales)
    }

    fn default_loglevel() -> String {
        "info".to_string()
    }
}
