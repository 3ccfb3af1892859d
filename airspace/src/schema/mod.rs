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

//! Unified airspace type taxonomy.
//!
//! Each source has its own vocabulary for the kind of an airspace. The
//! primary OpenAir feeds name it by the class `AC` or the type `AY`, the
//! structured feed by a class and a type property. Both are mapped to one
//! [`AirspaceType`] which is written as the `type` property.

mod structured;

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::block::Properties;

pub use structured::{StructuredFeature, VerticalLimit};

/// ICAO airspace classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum AirspaceClassification {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl AirspaceClassification {
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            "G" => Some(Self::G),
            _ => None,
        }
    }
}

/// The unified `type` of an airspace.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum AirspaceType {
    Class(AirspaceClassification),
    Prohibited,
    Danger,
    Restricted,
    /// Aerial sporting and recreational activity.
    Activity,
    GlidingSector,
    /// Any other type of the source, e.g. `CTR` or `FIS_SECTOR`.
    Other(String),
}

impl AirspaceType {
    /// Maps a class letter or a source type to the taxonomy.
    ///
    /// ```
    /// use airspace::{AirspaceClassification, AirspaceType};
    ///
    /// assert_eq!(AirspaceType::remap("OFR"), AirspaceType::Prohibited);
    /// assert_eq!(AirspaceType::remap("C"), AirspaceType::Class(AirspaceClassification::C));
    /// assert_eq!(AirspaceType::remap("TMZ"), AirspaceType::Other("TMZ".to_string()));
    /// ```
    pub fn remap(s: &str) -> Self {
        if let Some(class) = AirspaceClassification::from_letter(s) {
            return Self::Class(class);
        }

        match s {
            "P" | "OFR" | "PROHIBITED" => Self::Prohibited,
            "Q" | "DANGER" => Self::Danger,
            "R" | "RESTRICTED" => Self::Restricted,
            "ASRA" | "ACTIVITY" => Self::Activity,
            "GSEC" | "GLIDING_SECTOR" => Self::GlidingSector,
            s => Self::Other(s.to_string()),
        }
    }

    /// Derives the type of an OpenAir section.
    ///
    /// A class other than `UNC` is the type. An unclassified section takes
    /// its type from `AY`.
    pub fn from_openair(properties: &Properties) -> Option<Self> {
        let source = match properties.class.as_deref() {
            Some(class) if class != "UNC" => class,
            _ => match properties.source_type.as_deref()? {
                "OVERFLIGHT_RESTRICTION" => "PROHIBITED",
                ay => ay,
            },
        };

        Some(Self::remap(source))
    }
}

impl Display for AirspaceClassification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AirspaceClassification::A => write!(f, "A"),
            AirspaceClassification::B => write!(f, "B"),
            AirspaceClassification::C => write!(f, "C"),
            AirspaceClassification::D => write!(f, "D"),
            AirspaceClassification::E => write!(f, "E"),
            AirspaceClassification::F => write!(f, "F"),
            AirspaceClassification::G => write!(f, "G"),
        }
    }
}

impl Display for AirspaceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AirspaceType::Class(class) => write!(f, "{class}"),
            AirspaceType::Prohibited => write!(f, "PROHIBITED"),
            AirspaceType::Danger => write!(f, "DANGER"),
            AirspaceType::Restricted => write!(f, "RESTRICTED"),
            AirspaceType::Activity => write!(f, "ACTIVITY"),
            AirspaceType::GlidingSector => write!(f, "GLIDING_SECTOR"),
            AirspaceType::Other(s) => write!(f, "{s}"),
        }
    }
}
