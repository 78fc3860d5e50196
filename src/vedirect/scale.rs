use crate::prelude::*;

use serde::Deserialize;

/// Numeric quantities whose fixed-point resolution differs between firmware
/// generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Voltage,
    Current,
    InputVoltage,
    LoadCurrent,
    Energy,
    Firmware,
}

/// Named built-in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileName {
    /// mV / mA, energy in 0.01 kWh
    #[default]
    Fine,
    /// 10 mV / 10 mA, energy in 0.01 kWh
    Coarse,
}

impl std::str::FromStr for ProfileName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fine" => Ok(Self::Fine),
            "coarse" => Ok(Self::Coarse),
            _ => bail!("unknown scale profile {:?} (expected fine or coarse)", s),
        }
    }
}

impl std::fmt::Display for ProfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fine => write!(f, "fine"),
            Self::Coarse => write!(f, "coarse"),
        }
    }
}

/// Per-quantity divisors applied to raw integers. A divisor of 1000 is a
/// scale factor of 0.001; dividing keeps results correctly rounded, so
/// `12340 / 1000` is exactly `12.34`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleProfile {
    pub voltage: f64,
    pub current: f64,
    pub input_voltage: f64,
    pub load_current: f64,
    pub energy: f64,
    pub firmware: f64,
}

impl ScaleProfile {
    pub const FINE: Self = Self {
        voltage: 1000.0,
        current: 1000.0,
        input_voltage: 1000.0,
        load_current: 1000.0,
        energy: 100.0,
        firmware: 100.0,
    };

    pub const COARSE: Self = Self {
        voltage: 100.0,
        current: 100.0,
        input_voltage: 100.0,
        load_current: 100.0,
        energy: 100.0,
        firmware: 100.0,
    };

    pub fn named(name: ProfileName) -> Self {
        match name {
            ProfileName::Fine => Self::FINE,
            ProfileName::Coarse => Self::COARSE,
        }
    }

    pub fn divisor(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Voltage => self.voltage,
            Quantity::Current => self.current,
            Quantity::InputVoltage => self.input_voltage,
            Quantity::LoadCurrent => self.load_current,
            Quantity::Energy => self.energy,
            Quantity::Firmware => self.firmware,
        }
    }

    pub fn apply(&self, quantity: Quantity, raw: f64) -> f64 {
        raw / self.divisor(quantity)
    }

    /// Returns a copy with any overridden divisors replaced.
    pub fn with_overrides(mut self, overrides: &ScaleOverrides) -> Self {
        let pairs = [
            (&mut self.voltage, overrides.voltage),
            (&mut self.current, overrides.current),
            (&mut self.input_voltage, overrides.input_voltage),
            (&mut self.load_current, overrides.load_current),
            (&mut self.energy, overrides.energy),
            (&mut self.firmware, overrides.firmware),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self
    }
}

impl Default for ScaleProfile {
    fn default() -> Self {
        Self::FINE
    }
}

/// Optional divisor overrides, as read from the `scales` config section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleOverrides {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub input_voltage: Option<f64>,
    pub load_current: Option<f64>,
    pub energy: Option<f64>,
    pub firmware: Option<f64>,
}

impl ScaleOverrides {
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("voltage", self.voltage),
            ("current", self.current),
            ("input_voltage", self.input_voltage),
            ("load_current", self.load_current),
            ("energy", self.energy),
            ("firmware", self.firmware),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    bail!("scales.{} must be a positive divisor, got {}", name, value);
                }
            }
        }
        Ok(())
    }
}
