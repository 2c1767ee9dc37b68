//! JSON save format: the full stop list plus a metadata block.
//!
//! ```json
//! {
//!   "colorStops": [ { "position": 0.0, "color": "#000000" }, ... ],
//!   "metadata": { "version": "1.0", "name": "custom_colormap", "created": "2026-01-01T00:00:00Z" }
//! }
//! ```

use chrono::{DateTime, Utc};
use colormap_types::{ColorStop, ColormapError, Result, Rgb};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::colormap::Colormap;
use crate::constants::{DEFAULT_COLORMAP_NAME, INTERCHANGE_VERSION};

/// Descriptive block stored next to the stops
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    /// Version of the file format
    #[serde(default = "default_version")]
    pub version: String,
    /// Human-readable colormap name
    #[serde(default = "default_name")]
    pub name: String,
    /// When the file was written
    #[serde(default = "Utc::now", with = "rfc3339")]
    pub created: DateTime<Utc>,
}

fn default_version() -> String {
    INTERCHANGE_VERSION.to_string()
}

fn default_name() -> String {
    DEFAULT_COLORMAP_NAME.to_string()
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: default_name(),
            created: Utc::now(),
        }
    }
}

/// Parsed or ready-to-write interchange file.
///
/// Only [`InterchangeDocument::parse`] reads one, so every loaded document
/// has passed the stop and version checks.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeDocument {
    pub color_stops: Vec<ColorStop>,
    pub metadata: Metadata,
}

impl InterchangeDocument {
    /// Parse interchange text, checking shape field by field so each failure
    /// maps to a precise error.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| ColormapError::MalformedInterchange(format!("invalid JSON: {}", e)))?;

        let object = root.as_object().ok_or_else(|| {
            ColormapError::MalformedInterchange("top level is not an object".to_string())
        })?;

        let entries = object
            .get("colorStops")
            .ok_or_else(|| {
                ColormapError::MalformedInterchange("missing \"colorStops\" field".to_string())
            })?
            .as_array()
            .ok_or_else(|| {
                ColormapError::MalformedInterchange("\"colorStops\" is not a list".to_string())
            })?;

        let color_stops = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| parse_stop(i, entry))
            .collect::<Result<Vec<_>>>()?;

        let metadata = match object.get("metadata") {
            None | Some(Value::Null) => Metadata::default(),
            Some(value) => Metadata::deserialize(value).map_err(|e| {
                ColormapError::MalformedInterchange(format!("invalid metadata: {}", e))
            })?,
        };

        if metadata.version != INTERCHANGE_VERSION {
            return Err(ColormapError::MalformedInterchange(format!(
                "unsupported version \"{}\", expected \"{}\"",
                metadata.version, INTERCHANGE_VERSION
            )));
        }

        debug!(
            "Parsed interchange document '{}' with {} stops",
            metadata.name,
            color_stops.len()
        );
        Ok(Self {
            color_stops,
            metadata,
        })
    }

    /// Pretty-printed JSON text
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ColormapError::MalformedInterchange(e.to_string()))
    }
}

fn parse_stop(index: usize, entry: &Value) -> Result<ColorStop> {
    let malformed =
        |what: &str| ColormapError::MalformedInterchange(format!("stop {}: {}", index, what));

    let position = entry
        .get("position")
        .ok_or_else(|| malformed("missing \"position\""))?
        .as_f64()
        .ok_or_else(|| malformed("\"position\" is not a number"))?;

    let color = entry
        .get("color")
        .ok_or_else(|| malformed("missing \"color\""))?
        .as_str()
        .ok_or_else(|| malformed("\"color\" is not a string"))?;

    Ok(ColorStop::new(position, Rgb::from_hex(color)?))
}

impl Colormap {
    /// Snapshot for saving, stamped with the current time
    pub fn to_interchange(&self, name: &str) -> InterchangeDocument {
        self.to_interchange_at(name, Utc::now())
    }

    pub fn to_interchange_at(&self, name: &str, created: DateTime<Utc>) -> InterchangeDocument {
        InterchangeDocument {
            color_stops: self.stops().to_vec(),
            metadata: Metadata {
                version: INTERCHANGE_VERSION.to_string(),
                name: name.to_string(),
                created,
            },
        }
    }

    /// Build a new colormap from a loaded document.
    ///
    /// The stop list is taken as-is (no merge, no re-sort) but must satisfy
    /// the collection invariants.
    pub fn from_interchange(document: &InterchangeDocument) -> Result<Self> {
        Colormap::from_stops(document.color_stops.clone())
    }

    /// Parse text and build the colormap in one step
    pub fn from_interchange_str(text: &str) -> Result<(Self, Metadata)> {
        let document = InterchangeDocument::parse(text)?;
        let colormap = Colormap::from_interchange(&document)?;
        Ok((colormap, document.metadata))
    }
}

mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
