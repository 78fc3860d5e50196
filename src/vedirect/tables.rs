/// Label returned for any code a table does not list.
pub const UNKNOWN: &str = "Unknown";

/// A fixed mapping from a coded value, as transmitted, to a readable label.
///
/// Lookups match the raw value as a whole string; nothing is parsed or
/// decomposed, so `"0x00000003"` in the off-reason table is simply unknown
/// rather than a union of two reasons.
#[derive(Debug)]
pub struct EnumTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl EnumTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total lookup: a miss yields [`UNKNOWN`].
    pub fn lookup(&self, code: &str) -> &'static str {
        self.entries
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, label)| *label)
            .unwrap_or(UNKNOWN)
    }
}

// CS
pub static OPERATION_STATE: EnumTable = EnumTable::new(
    "operation state",
    &[
        ("0", "Off"),
        ("2", "Fault"),
        ("3", "Bulk"),
        ("4", "Absorption"),
        ("5", "Float"),
        ("7", "Equalize (manual)"),
        ("245", "Starting-up"),
        ("247", "Auto equalize / Recondition"),
        ("252", "External Control"),
    ],
);

// MPPT
pub static TRACKER_MODE: EnumTable = EnumTable::new(
    "tracker mode",
    &[
        ("0", "Off"),
        ("1", "Voltage or current limited"),
        ("2", "MPP Tracker active"),
    ],
);

// OR
pub static OFF_REASON: EnumTable = EnumTable::new(
    "off reason",
    &[
        ("0x00000001", "No input power"),
        ("0x00000002", "Switched off (power switch)"),
        ("0x00000004", "Switched off (device mode register)"),
        ("0x00000008", "Remote input"),
        ("0x00000010", "Protection active"),
        ("0x00000020", "Paygo"),
        ("0x00000040", "BMS"),
        ("0x00000080", "Engine shutdown detection"),
        ("0x00000100", "Analysing input voltage"),
    ],
);

// ERR
pub static ERROR_CODE: EnumTable = EnumTable::new(
    "error code",
    &[
        ("0", "No error"),
        ("2", "Battery voltage too high"),
        ("17", "Charger temperature too high"),
        ("18", "Charger over current"),
        ("19", "Charger current reversed"),
        ("20", "Bulk time limit exceeded"),
        ("21", "Current sensor issue (sensor bias/sensor broken)"),
        ("26", "Terminals overheated"),
        ("28", "Converter issue (dual converter models only)"),
        ("33", "Input voltage too high (solar panel)"),
        ("34", "Input current too high (solar panel)"),
        ("38", "Input shutdown (due to excessive battery voltage)"),
        ("39", "Input shutdown (due to current flow during off mode)"),
        ("65", "Lost communication with one of devices"),
        ("66", "Synchronised charging device configuration issue"),
        ("67", "BMS connection lost"),
        ("68", "Network misconfigured"),
        ("116", "Factory calibration data lost"),
        ("117", "Invalid/incompatible firmware"),
        ("119", "User settings invalid"),
    ],
);
