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

use std::collections::BTreeMap;

use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use log::warn;
use openair::{Coordinate, Direction};
use serde::{Deserialize, Serialize};

use crate::altitude::Limit;
use crate::geom;
use crate::schema::AirspaceType;
use crate::Options;

/// A symbolic geometry element of an airspace boundary.
///
/// The center of curves is the last `V X=` of the section. It is `None` when
/// no center was declared and such a primitive reconstructs to nothing.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Primitive {
    Point(Coordinate),
    Circle {
        center: Option<Coordinate>,
        /// Radius in nautical miles.
        radius: f64,
    },
    Arc {
        center: Option<Coordinate>,
        /// Radius in nautical miles.
        radius: f64,
        /// Start angle in degrees from true north.
        start: f64,
        /// End angle in degrees from true north.
        end: f64,
        direction: Direction,
    },
    ArcByPoints {
        center: Option<Coordinate>,
        start: Coordinate,
        end: Coordinate,
        direction: Direction,
    },
}

/// The properties of an airspace in the unified schema.
///
/// Each recognized key is a field. Other `A*` metadata is kept in
/// [`other`](Self::other).
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Properties {
    /// `AC` class as written in the feed.
    pub class: Option<String>,
    /// `AN`
    pub name: Option<String>,
    /// `AH`
    pub ceiling: Option<Limit>,
    /// `AL`
    pub floor: Option<Limit>,
    /// `AY` type as written in the feed.
    pub source_type: Option<String>,
    /// `AF`
    pub frequency: Option<String>,
    /// `AG`
    pub station: Option<String>,
    /// `AI`
    pub identifier: Option<String>,
    /// `V X` in canonical form.
    pub center: Option<String>,
    /// `V D`
    pub direction: Option<Direction>,
    /// The unified `type`.
    pub airspace_type: Option<AirspaceType>,
    pub other: BTreeMap<String, String>,
}

impl Properties {
    /// Sets the metadata directive `name` to the uppercased `content`.
    ///
    /// Ceiling and floor are normalized.
    pub fn set(&mut self, name: &str, content: &str) {
        let value = content.to_uppercase();

        match name {
            "AC" => self.class = Some(value),
            "AN" => self.name = Some(value),
            "AH" => self.ceiling = Some(Limit::normalize(content)),
            "AL" => self.floor = Some(Limit::normalize(content)),
            "AY" => self.source_type = Some(value),
            "AF" => self.frequency = Some(value),
            "AG" => self.station = Some(value),
            "AI" => self.identifier = Some(value),
            _ => {
                self.other.insert(name.to_string(), value);
            }
        }
    }

    pub fn upper_limit_meters(&self) -> Option<f64> {
        self.ceiling.as_ref().and_then(Limit::meters)
    }

    pub fn lower_limit_meters(&self) -> Option<f64> {
        self.floor.as_ref().and_then(Limit::meters)
    }

    /// Returns the properties as GeoJSON object.
    ///
    /// Absent values are left out.
    pub fn to_json(&self) -> JsonObject {
        let mut json = JsonObject::new();

        let mut put = |key: &str, value: Option<JsonValue>| {
            if let Some(value) = value {
                json.insert(key.to_string(), value);
            }
        };

        put("AC", self.class.clone().map(JsonValue::from));
        put("AN", self.name.clone().map(JsonValue::from));
        put("AH", self.ceiling.as_ref().map(|l| l.to_string().into()));
        put("AL", self.floor.as_ref().map(|l| l.to_string().into()));
        put("AY", self.source_type.clone().map(JsonValue::from));
        put("AF", self.frequency.clone().map(JsonValue::from));
        put("AG", self.station.clone().map(JsonValue::from));
        put("AI", self.identifier.clone().map(JsonValue::from));
        put("V X", self.center.clone().map(JsonValue::from));
        put("V D", self.direction.map(|d| d.to_string().into()));

        for (key, value) in &self.other {
            put(key, Some(value.clone().into()));
        }

        put("type", self.airspace_type.as_ref().map(|t| t.to_string().into()));
        put("upperLimitMeters", self.upper_limit_meters().map(JsonValue::from));
        put("lowerLimitMeters", self.lower_limit_meters().map(JsonValue::from));

        json
    }
}

/// One airspace section with its properties and boundary primitives.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct AirspaceBlock {
    /// Line of the `AC` directive that opened the section.
    pub line: usize,
    pub properties: Properties,
    pub primitives: Vec<Primitive>,
}

impl AirspaceBlock {
    /// Reconstructs the boundary geometry.
    pub fn geometry(&self, options: &Options) -> Option<geo::Geometry<f64>> {
        let geometry = geom::combine(&self.primitives, options);

        if geometry.is_none() && !self.primitives.is_empty() {
            warn!(
                "airspace {} at line {} has no geometry",
                self.properties.name.as_deref().unwrap_or("without name"),
                self.line
            );
        }

        geometry
    }

    pub fn to_feature(&self, options: &Options) -> Feature {
        Feature {
            bbox: None,
            geometry: self
                .geometry(options)
                .map(|g| Geometry::new(Value::from(&g))),
            id: None,
            properties: Some(self.properties.to_json()),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::Altitude;

    #[test]
    fn sets_metadata() {
        let mut props = Properties::default();
        props.set("AC", "d");
        props.set("AN", "Bremen ctr");
        props.set("AH", "fl 65");
        props.set("AL", "sfc");
        props.set("AT", "52:00:00 N 008:00:00 E");

        assert_eq!(props.class.as_deref(), Some("D"));
        assert_eq!(props.name.as_deref(), Some("BREMEN CTR"));
        assert_eq!(props.ceiling, Some(Limit::Standard(Altitude::Fl(65))));
        assert_eq!(props.floor, Some(Limit::Standard(Altitude::Gnd)));
        assert_eq!(
            props.other.get("AT").map(String::as_str),
            Some("52:00:00 N 008:00:00 E")
        );
    }

    #[test]
    fn omits_absent_values() {
        let mut props = Properties::default();
        props.set("AC", "R");
        props.set("AH", "UNL");
        props.airspace_type = Some(AirspaceType::Restricted);

        let json = props.to_json();
        assert_eq!(json.get("AC"), Some(&JsonValue::from("R")));
        assert_eq!(json.get("AH"), Some(&JsonValue::from("UNLIMITED")));
        assert_eq!(json.get("type"), Some(&JsonValue::from("RESTRICTED")));
        assert!(!json.contains_key("AN"));
        assert!(!json.contains_key("upperLimitMeters"));
        assert!(!json.contains_key("lowerLimitMeters"));
    }
}
