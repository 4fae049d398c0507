//! Wire encoding of the configuration
//!
//! Configurations travel between coordinator and worker as JSON. Decoding
//! writes the payload over the receiving configuration, so keys the payload
//! omits keep their current values, and re-runs tag expansion so a received
//! configuration points at local paths.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::tags::{expand_special_tags, SystemHome};
use crate::domain::error::CodecError;
use crate::domain::models::Config;
use crate::domain::ports::HomeDirectory;

impl Config {
    /// Serialize the configuration for transmission.
    ///
    /// Encoding plain data does not fail in practice; if it does, the error is
    /// logged and an empty payload is returned.
    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|err| {
            warn!(error = %err, "failed to encode configuration");
            Vec::new()
        })
    }

    /// Overlay the configuration decoded from `data` onto this one.
    ///
    /// See [`Config::decode_with_home`].
    pub fn decode(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.decode_with_home(data, &SystemHome)
    }

    /// Overlay the configuration decoded from `data` onto this one.
    ///
    /// Keys present in the payload overwrite the matching fields; absent keys
    /// and `null` values leave fields as they are, and a bare `null` payload
    /// changes nothing. Keys match field names exactly first, then
    /// case-insensitively, so `Worker.Network.Zone` reaches the same field as
    /// `worker.network.zone`.
    ///
    /// On success the configuration is marked loaded. A malformed payload
    /// leaves `self` untouched. Tags are expanded in both cases, and a
    /// malformed payload is reported before an expansion failure.
    pub fn decode_with_home(
        &mut self,
        data: &[u8],
        home: &dyn HomeDirectory,
    ) -> Result<(), CodecError> {
        let decoded = match self.overlaid_with(data) {
            Ok(mut config) => {
                config.loaded = true;
                *self = config;
                debug!(bytes = data.len(), "configuration decoded");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to decode configuration");
                Err(CodecError::Malformed(err))
            }
        };

        let expanded = expand_special_tags(self, home);
        decoded?;
        expanded.map_err(CodecError::from)
    }

    fn overlaid_with(&self, data: &[u8]) -> serde_json::Result<Self> {
        let patch: Value = serde_json::from_slice(data)?;
        if !(patch.is_object() || patch.is_null()) {
            return Err(serde::de::Error::custom(format!(
                "expected a configuration object, found `{patch}`"
            )));
        }

        let mut merged = serde_json::to_value(self)?;
        overlay(&mut merged, patch);
        serde_json::from_value(merged)
    }
}

fn overlay(base: &mut Value, patch: Value) {
    match (base, patch) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                let key = matching_key(base, key);
                overlay(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}

fn matching_key(fields: &Map<String, Value>, key: String) -> String {
    if fields.contains_key(&key) {
        return key;
    }
    fields
        .keys()
        .find(|field| field.eq_ignore_ascii_case(&key))
        .cloned()
        .unwrap_or(key)
}
