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

//! Vertical limits of an airspace.
//!
//! Feeds write ceilings and floors in many spellings, e.g. `FL 095`,
//! `3500 ft AMSL` or `SFC`. They are normalized into a closed set of
//! formats:
//!
//! | Format       | Example    |
//! |--------------|------------|
//! | `FL<n>`      | `FL95`     |
//! | `GND`        | `GND`      |
//! | `UNLIMITED`  | `UNLIMITED`|
//! | `<n>FT MSL`  | `3500FT MSL` |
//! | `<n>M MSL`   | `900M MSL` |
//! | `<n>FT GND`  | `1000FT GND` |
//! | `<n>M GND`   | `300M GND` |
//!
//! Anything else is kept as written, uppercased with collapsed whitespace.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

const FEET_IN_METER: f64 = 0.3048;

/// Unit of a linear altitude.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Unit {
    Feet,
    Meters,
}

/// Reference a linear altitude is measured from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Reference {
    Msl,
    Gnd,
}

/// An altitude in one of the standard formats.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Altitude {
    /// Flight level in hundreds of feet.
    Fl(u32),
    Gnd,
    Unlimited,
    Linear {
        value: u32,
        unit: Unit,
        reference: Reference,
    },
}

impl Altitude {
    /// Returns the altitude in meters.
    ///
    /// Flight levels are converted without pressure correction and
    /// [`Altitude::Unlimited`] has no value.
    pub fn meters(&self) -> Option<f64> {
        match self {
            Self::Fl(n) => Some(*n as f64 * 100.0 * FEET_IN_METER),
            Self::Gnd => Some(0.0),
            Self::Unlimited => None,
            Self::Linear {
                value,
                unit: Unit::Feet,
                ..
            } => Some(*value as f64 * FEET_IN_METER),
            Self::Linear {
                value,
                unit: Unit::Meters,
                ..
            } => Some(*value as f64),
        }
    }

    /// Parses the altitude from text with all whitespace removed.
    fn from_compact(s: &str, default_reference: Option<Reference>) -> Option<Self> {
        match s {
            "GND" => return Some(Self::Gnd),
            "UNLIMITED" | "UNL" | "UNLTD" => return Some(Self::Unlimited),
            _ => {}
        }

        if let Some(level) = s.strip_prefix("FL") {
            return digits(level).map(Self::Fl);
        }

        let split = s.find(|c: char| !c.is_ascii_digit())?;
        let value = digits(&s[..split])?;

        let (unit, rest) = if let Some(rest) = s[split..].strip_prefix("FT") {
            (Unit::Feet, rest)
        } else if let Some(rest) = s[split..].strip_prefix('M') {
            (Unit::Meters, rest)
        } else {
            return None;
        };

        let reference = match rest {
            "MSL" => Reference::Msl,
            "GND" => Reference::Gnd,
            "" => default_reference?,
            _ => return None,
        };

        Some(Self::Linear {
            value,
            unit,
            reference,
        })
    }
}

fn digits(s: &str) -> Option<u32> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl FromStr for Altitude {
    type Err = String;

    /// Parses an altitude in one of the standard formats.
    ///
    /// A linear altitude needs its reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.split_whitespace().collect();
        Self::from_compact(&compact.to_uppercase(), None).ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fl(n) => write!(f, "FL{n}"),
            Self::Gnd => write!(f, "GND"),
            Self::Unlimited => write!(f, "UNLIMITED"),
            Self::Linear {
                value,
                unit,
                reference,
            } => {
                let unit = match unit {
                    Unit::Feet => "FT",
                    Unit::Meters => "M",
                };
                let reference = match reference {
                    Reference::Msl => "MSL",
                    Reference::Gnd => "GND",
                };
                write!(f, "{value}{unit} {reference}")
            }
        }
    }
}

/// A normalized ceiling or floor.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Limit {
    Standard(Altitude),
    /// A limit that fits none of the standard formats.
    NonStandard(String),
}

impl Limit {
    /// Normalizes a free-form limit.
    ///
    /// ```
    /// use airspace::Limit;
    ///
    /// assert_eq!(Limit::normalize("FL 095").to_string(), "FL95");
    /// assert_eq!(Limit::normalize("3500 ft amsl").to_string(), "3500FT MSL");
    /// assert_eq!(Limit::normalize("1000ft").to_string(), "1000FT GND");
    /// assert_eq!(Limit::normalize("SFC").to_string(), "GND");
    /// assert!(!Limit::normalize("NOTAM").is_standard());
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let s = raw
            .trim()
            .to_uppercase()
            .replace("AMSL", "MSL")
            .replace("AGL", "GND")
            .replace("SFC", "GND");

        let compact: String = s.split_whitespace().collect();

        match Altitude::from_compact(&compact, Some(Reference::Gnd)) {
            Some(altitude) => Self::Standard(altitude),
            None => {
                let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
                warn!("non-standard altitude \"{s}\"");
                Self::NonStandard(s)
            }
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard(_))
    }

    pub fn meters(&self) -> Option<f64> {
        match self {
            Self::Standard(altitude) => altitude.meters(),
            Self::NonStandard(_) => None,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(altitude) => write!(f, "{altitude}"),
            Self::NonStandard(s) => write!(f, "{s}"),
        }
    }
}

/// Converts an altitude in a standard format to meters.
///
/// ```
/// use airspace::convert_to_meters;
///
/// assert!((convert_to_meters("FL195").unwrap() - 5943.6).abs() < 1e-6);
/// assert_eq!(convert_to_meters("GND"), Some(0.0));
/// assert_eq!(convert_to_meters("UNLIMITED"), None);
/// ```
pub fn convert_to_meters(altitude: &str) -> Option<f64> {
    altitude.parse::<Altitude>().ok()?.meters()
}
