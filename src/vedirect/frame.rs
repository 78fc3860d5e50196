use crate::prelude::*;
use crate::vedirect::field::{FieldDecoder, Value};
use crate::vedirect::scale::ScaleProfile;

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// One polling cycle's field codes and their raw values, as delivered by the
/// frame reader (already checksum-validated).
pub type RawFrame = HashMap<String, String>;

/// Decoded measurements of one frame, keyed by display name, or by raw code
/// for fields that have no decoding rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Per-frame tallies, mostly for log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub decoded: usize,
    pub unknown: usize,
    /// unknown codes dropped because a decoded field already uses the name
    pub shadowed: usize,
    pub failed: usize,
}

/// Applies a [`FieldDecoder`] to every field of a frame.
///
/// Each field is decided on its own: decoded fields land under their display
/// name, unknown codes are kept verbatim under the code unless a decoded
/// field already holds that name, and fields that fail to parse are dropped.
/// None of these fails the frame; all but the first are reported through
/// `log` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameNormalizer {
    decoder: FieldDecoder,
}

impl FrameNormalizer {
    pub fn new(decoder: FieldDecoder) -> Self {
        Self { decoder }
    }

    pub fn with_profile(profile: ScaleProfile) -> Self {
        Self::new(FieldDecoder::new(profile))
    }

    pub fn normalize(&self, frame: &RawFrame) -> Record {
        self.normalize_with_stats(frame).0
    }

    pub fn normalize_with_stats(&self, frame: &RawFrame) -> (Record, FrameStats) {
        let mut record = BTreeMap::new();
        let mut unknown = Vec::new();
        let mut stats = FrameStats::default();

        for (code, raw) in frame {
            match self.decoder.decode(code, raw) {
                Ok(Some(field)) => {
                    record.insert(field.name.to_string(), field.value);
                    stats.decoded += 1;
                }
                Ok(None) => unknown.push((code, raw)),
                Err(err) => {
                    warn!(
                        "failed to decode field [code={}, value={:?}]: {}",
                        err.code, err.raw, err.cause
                    );
                    stats.failed += 1;
                }
            }
        }

        // display names win over unknown codes spelled the same way, whatever
        // order the frame iterates in
        for (code, raw) in unknown {
            match record.entry(code.clone()) {
                Entry::Vacant(entry) => {
                    warn!("unknown field [code={}, value={:?}]", code, raw);
                    entry.insert(Value::Label(raw.clone()));
                    stats.unknown += 1;
                }
                Entry::Occupied(_) => {
                    warn!(
                        "unknown field [code={}, value={:?}] clashes with a decoded field name, dropped",
                        code, raw
                    );
                    stats.shadowed += 1;
                }
            }
        }

        debug!(
            "normalized frame: {} decoded, {} unknown, {} shadowed, {} failed",
            stats.decoded, stats.unknown, stats.shadowed, stats.failed
        );

        (Record(record), stats)
    }
}
