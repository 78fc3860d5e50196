use crate::error::{DecodeError, ParseError};
use crate::vedirect::scale::{Quantity, ScaleProfile};
use crate::vedirect::tables::{self, EnumTable};

use serde::Serialize;

/// A decoded measurement value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Label(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Label(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Label(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub code: String,
    pub name: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    PassThrough,
    ScaledInt(Quantity),
    ScaledFloat(Quantity),
    Integer,
    Lookup(&'static EnumTable),
    // "0" is On, anything else Off
    OnWhenZero,
}

fn rule_for(code: &str) -> Option<(&'static str, Rule)> {
    use Quantity::*;
    use Rule::*;

    let rule = match code {
        "PID" => ("Product ID", PassThrough),
        "SER#" => ("Serial number", PassThrough),
        "FW" => ("Firmware version", ScaledInt(Firmware)),

        "V" => ("Channel 1 voltage (V)", ScaledInt(Voltage)),
        "V2" => ("Channel 2 voltage (V)", ScaledInt(Voltage)),
        "V3" => ("Channel 3 voltage (V)", ScaledInt(Voltage)),
        "VS" => ("Auxiliary voltage (V)", ScaledInt(Voltage)),
        "I" => ("Channel 1 current (A)", ScaledInt(Current)),
        "I2" => ("Channel 2 current (A)", ScaledInt(Current)),
        "I3" => ("Channel 3 current (A)", ScaledInt(Current)),
        "VPV" => ("Input Voltage (V)", ScaledInt(InputVoltage)),
        "PPV" => ("Input power (W)", Integer),
        "IL" => ("Load output actual current", ScaledInt(LoadCurrent)),
        "P" => ("Instantaneous power (W)", Integer),
        "T" => ("Battery temperature (°C)", Integer),

        "H17" => ("Discharged energy (kWh)", ScaledFloat(Energy)),
        "H18" => ("Charged energy (kWh)", ScaledFloat(Energy)),
        "H19" => ("Yield total (kWh)", ScaledFloat(Energy)),
        "H20" => ("Yield today (kWh)", ScaledFloat(Energy)),
        "H21" => ("Maximum power today (W)", Integer),
        "H22" => ("Yield yesterday (kWh)", ScaledFloat(Energy)),
        "H23" => ("Maximum power yesterday (W)", Integer),
        "HSDS" => ("Day sequence number", Integer),

        "CS" => ("Operation state", Lookup(&tables::OPERATION_STATE)),
        "MPPT" => ("Tracker operation mode", Lookup(&tables::TRACKER_MODE)),
        "OR" => ("Off reason", Lookup(&tables::OFF_REASON)),
        "ERR" => ("Error code", Lookup(&tables::ERROR_CODE)),
        "LOAD" => ("Load output status", OnWhenZero),

        _ => return None,
    };

    Some(rule)
}

/// Translates single VE.Direct fields using a fixed scale profile.
///
/// The decoder holds no state beyond its profile; it is `Copy` and may be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDecoder {
    profile: ScaleProfile,
}

impl FieldDecoder {
    pub fn new(profile: ScaleProfile) -> Self {
        Self { profile }
    }

    /// Decode one field.
    ///
    /// Returns `Ok(None)` for a code with no rule, and `Err` when the value
    /// of a numeric field does not parse.
    pub fn decode(&self, code: &str, raw: &str) -> Result<Option<DecodedField>, DecodeError> {
        let Some((name, rule)) = rule_for(code) else {
            return Ok(None);
        };

        let value = match rule {
            Rule::PassThrough => Value::from(raw),
            Rule::ScaledInt(quantity) => {
                let n = parse_int(code, raw)?;
                Value::Float(self.profile.apply(quantity, n as f64))
            }
            Rule::ScaledFloat(quantity) => {
                let n = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|err| DecodeError::new(code, raw, err))?;
                // NaN and inf parse, but have no JSON number form
                if !n.is_finite() {
                    return Err(DecodeError::new(code, raw, ParseError::NonFinite));
                }
                Value::Float(self.profile.apply(quantity, n))
            }
            Rule::Integer => Value::Integer(parse_int(code, raw)?),
            Rule::Lookup(table) => Value::from(table.lookup(raw)),
            Rule::OnWhenZero => Value::from(if raw == "0" { "On" } else { "Off" }),
        };

        Ok(Some(DecodedField {
            code: code.to_string(),
            name,
            value,
        }))
    }
}

fn parse_int(code: &str, raw: &str) -> Result<i64, DecodeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|err| DecodeError::new(code, raw, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fine() -> FieldDecoder {
        FieldDecoder::new(ScaleProfile::FINE)
    }

    fn coarse() -> FieldDecoder {
        FieldDecoder::new(ScaleProfile::COARSE)
    }

    fn value(decoder: &FieldDecoder, code: &str, raw: &str) -> Value {
        decoder.decode(code, raw).unwrap().unwrap().value
    }

    #[test]
    fn pass_through_is_verbatim() {
        let field = fine().decode("SER#", " HQ1234ABCDE").unwrap().unwrap();
        assert_eq!(field.name, "Serial number");
        assert_eq!(field.code, "SER#");
        assert_eq!(field.value, Value::Label(" HQ1234ABCDE".to_string()));
        assert_eq!(value(&fine(), "PID", "0xA053"), Value::from("0xA053"));
    }

    #[test]
    fn scaled_integers_follow_profile() {
        assert_eq!(value(&fine(), "V", "12340"), Value::Float(12.34));
        assert_eq!(value(&fine(), "I", "-230"), Value::Float(-0.23));
        assert_eq!(value(&coarse(), "V", "1234"), Value::Float(12.34));
        assert_eq!(value(&coarse(), "IL", "50"), Value::Float(0.5));
        assert_eq!(value(&fine(), "VPV", "35000"), Value::Float(35.0));
        assert_eq!(value(&fine(), "FW", "159"), Value::Float(1.59));
    }

    #[test]
    fn yields_are_hundredths_of_kwh() {
        assert_eq!(value(&fine(), "H19", "12345"), Value::Float(123.45));
        assert_eq!(value(&fine(), "H20", "5"), Value::Float(0.05));
        assert_eq!(value(&coarse(), "H22", "100"), Value::Float(1.0));
    }

    #[test]
    fn plain_integers_are_unscaled() {
        assert_eq!(value(&fine(), "PPV", "87"), Value::Integer(87));
        assert_eq!(value(&coarse(), "H21", "312"), Value::Integer(312));
        assert_eq!(value(&fine(), "HSDS", "17"), Value::Integer(17));
        assert_eq!(value(&fine(), "T", "-5"), Value::Integer(-5));
    }

    #[test]
    fn numeric_fields_tolerate_whitespace() {
        assert_eq!(value(&fine(), "PPV", " 87\r"), Value::Integer(87));
    }

    #[test]
    fn enum_fields_resolve_labels() {
        assert_eq!(value(&fine(), "CS", "3"), Value::from("Bulk"));
        assert_eq!(value(&fine(), "CS", "999"), Value::from("Unknown"));
        assert_eq!(value(&fine(), "MPPT", "1"), Value::from("Voltage or current limited"));
        assert_eq!(value(&fine(), "OR", "0x00000001"), Value::from("No input power"));
        assert_eq!(value(&fine(), "ERR", "0"), Value::from("No error"));
    }

    #[test]
    fn load_output_sense_is_inverted() {
        assert_eq!(value(&fine(), "LOAD", "0"), Value::from("On"));
        assert_eq!(value(&fine(), "LOAD", "1"), Value::from("Off"));
        assert_eq!(value(&fine(), "LOAD", ""), Value::from("Off"));
        assert_eq!(value(&fine(), "LOAD", "ON"), Value::from("Off"));
    }

    #[test]
    fn unknown_code_is_not_an_error() {
        assert_eq!(fine().decode("XYZ", "foo"), Ok(None));
    }

    #[test]
    fn bad_numbers_carry_code_value_and_cause() {
        let err = fine().decode("V", "12.5V").unwrap_err();
        assert_eq!(err.code, "V");
        assert_eq!(err.raw, "12.5V");
        assert!(matches!(err.cause, ParseError::Int(_)));
        assert!(std::error::Error::source(&err).is_some());

        let err = fine().decode("H19", "").unwrap_err();
        assert!(matches!(err.cause, ParseError::Float(_)));
    }

    #[test]
    fn non_finite_totals_are_rejected() {
        for raw in ["NaN", "nan", "inf", "-infinity", "1e400"] {
            let err = fine().decode("H19", raw).unwrap_err();
            assert_eq!(err.cause, ParseError::NonFinite, "{}", raw);
            assert_eq!(err.raw, raw);
        }
        assert_eq!(value(&fine(), "H19", "1e3"), Value::Float(10.0));
    }

    #[test]
    fn extra_channel_voltages() {
        let field = fine().decode("V2", "12800").unwrap().unwrap();
        assert_eq!(field.name, "Channel 2 voltage (V)");
        assert_eq!(field.value, Value::Float(12.8));
        assert_eq!(value(&fine(), "V3", "-50"), Value::Float(-0.05));
        assert_eq!(value(&coarse(), "V3", "1280"), Value::Float(12.8));

        let field = fine().decode("VS", "12650").unwrap().unwrap();
        assert_eq!(field.name, "Auxiliary voltage (V)");
        assert_eq!(field.value, Value::Float(12.65));
    }

    #[test]
    fn extra_channel_currents() {
        let field = fine().decode("I2", "1500").unwrap().unwrap();
        assert_eq!(field.name, "Channel 2 current (A)");
        assert_eq!(field.value, Value::Float(1.5));

        let field = coarse().decode("I3", "-150").unwrap().unwrap();
        assert_eq!(field.name, "Channel 3 current (A)");
        assert_eq!(field.value, Value::Float(-1.5));
    }

    #[test]
    fn power_and_temperature_are_plain() {
        let field = fine().decode("P", "-120").unwrap().unwrap();
        assert_eq!(field.name, "Instantaneous power (W)");
        assert_eq!(field.value, Value::Integer(-120));

        let field = coarse().decode("T", "23").unwrap().unwrap();
        assert_eq!(field.name, "Battery temperature (°C)");
        assert_eq!(field.value, Value::Integer(23));
        assert!(fine().decode("T", "---").is_err());
    }

    #[test]
    fn charged_and_discharged_energy() {
        let field = fine().decode("H17", "4521").unwrap().unwrap();
        assert_eq!(field.name, "Discharged energy (kWh)");
        assert_eq!(field.value, Value::Float(45.21));

        let field = coarse().decode("H18", "5010").unwrap().unwrap();
        assert_eq!(field.name, "Charged energy (kWh)");
        assert_eq!(field.value, Value::Float(50.1));
    }

    #[test]
    fn enum_and_label_fields_never_fail() {
        for code in ["PID", "SER#", "CS", "MPPT", "OR", "ERR", "LOAD"] {
            assert!(fine().decode(code, "\u{0}garbage").is_ok(), "{}", code);
        }
    }
}
