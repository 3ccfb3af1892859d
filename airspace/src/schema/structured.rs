// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Mapping of the structured national feed into the unified schema.
//!
//! The feed is a GeoJSON feature collection whose properties nest the
//! vertical limits and the frequency:
//!
//! ```json
//! {
//!   "class": "D",
//!   "type": "CTR",
//!   "name": "LYON",
//!   "upperCeiling": { "value": 35, "unit": "FL", "referenceDatum": "STD" },
//!   "lowerCeiling": { "value": "GND" },
//!   "frequency": { "value": "120.450", "name": "LYON TOUR" }
//! }
//! ```

use geojson::{JsonObject, JsonValue};
use serde::Deserialize;
use uuid::Uuid;

use super::{AirspaceClassification, AirspaceType};
use crate::altitude::Limit;
use crate::block::Properties;

/// A vertical limit of the structured feed.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct VerticalLimit {
    pub value: Option<JsonValue>,
    pub unit: Option<String>,
    #[serde(rename = "referenceDatum")]
    pub reference_datum: Option<String>,
}

impl VerticalLimit {
    /// Writes the limit in the OpenAir notation.
    ///
    /// ```
    /// use airspace::VerticalLimit;
    /// use serde_json::json;
    ///
    /// let limit: VerticalLimit = serde_json::from_value(json!({
    ///     "value": 3500, "unit": "FT", "referenceDatum": "AMSL"
    /// })).unwrap();
    /// assert_eq!(limit.to_openair().as_deref(), Some("3500FT MSL"));
    /// ```
    pub fn to_openair(&self) -> Option<String> {
        let value = self.value.as_ref().map(stringify)?;

        let (Some(datum), Some(unit)) = (&self.reference_datum, &self.unit) else {
            return match value.as_str() {
                "UNLIMITED" | "UNLTD" => Some("UNLIMITED".to_string()),
                "GND" | "SFC" => Some("GND".to_string()),
                _ => None,
            };
        };

        Some(match datum.as_str() {
            "STD" => format!("FL{value}"),
            "AMSL" => format!("{value}{unit} MSL"),
            "AGL" => format!("{value}{unit} GND"),
            "SFC" => "GND".to_string(),
            _ if value == "GND" => "GND".to_string(),
            datum => format!("{value}{unit} {datum}"),
        })
    }
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct Frequency {
    pub value: Option<JsonValue>,
    pub name: Option<String>,
}

/// The properties of one feature of the structured feed.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct StructuredFeature {
    pub class: Option<String>,
    #[serde(rename = "type")]
    pub source_type: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "upperCeiling")]
    pub upper_ceiling: Option<VerticalLimit>,
    #[serde(rename = "lowerCeiling")]
    pub lower_ceiling: Option<VerticalLimit>,
    pub frequency: Option<Frequency>,
}

impl StructuredFeature {
    pub fn from_json(properties: &JsonObject) -> Result<Self, serde_json::Error> {
        serde_json::from_value(JsonValue::Object(properties.clone()))
    }

    /// Derives the unified type.
    ///
    /// Lower airspaces (`LTA`) of class E are class E regardless of their
    /// type. Gliding sectors and recreational areas are named by their
    /// type before the class is considered.
    pub fn airspace_type(&self) -> Option<AirspaceType> {
        let class = self.class.as_deref();
        let source_type = self.source_type.as_deref();
        let name = self.name.as_deref().unwrap_or_default();

        if class == Some("E") && name.starts_with("LTA ") {
            return Some(AirspaceType::Class(AirspaceClassification::E));
        }

        match source_type {
            Some("GSEC") => return Some(AirspaceType::GlidingSector),
            Some("AERIAL_SPORTING_RECREATIONAL") => return Some(AirspaceType::Activity),
            _ => {}
        }

        if let Some(class) = class.and_then(AirspaceClassification::from_letter) {
            return Some(AirspaceType::Class(class));
        }

        source_type.map(AirspaceType::remap)
    }

    /// Reshapes the feature into the unified schema with a fresh `AI`.
    pub fn to_properties(&self) -> Properties {
        let frequency = self.frequency.as_ref();

        Properties {
            class: self.class.clone(),
            name: self.name.clone(),
            ceiling: self
                .upper_ceiling
                .as_ref()
                .and_then(VerticalLimit::to_openair)
                .map(|s| Limit::normalize(&s)),
            floor: self
                .lower_ceiling
                .as_ref()
                .and_then(VerticalLimit::to_openair)
                .map(|s| Limit::normalize(&s)),
            source_type: self.source_type.clone(),
            frequency: frequency.and_then(|f| f.value.as_ref()).map(stringify),
            station: frequency.and_then(|f| f.name.clone()),
            identifier: Some(Uuid::new_v4().to_string()),
            airspace_type: self.airspace_type(),
            ..Default::default()
        }
    }
}

fn stringify(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        // 35.0 is written as 35
        JsonValue::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        value => value.to_string(),
    }
}
