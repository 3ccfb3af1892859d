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

//! Structural and numeric validation of single directives.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, Grammar};
use crate::error::Error;
use crate::line::{Directive, DirectiveKind};

/// The direction an arc is drawn in, as viewed from above.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// `+`
    #[default]
    Clockwise,
    /// `-`
    CounterClockwise,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Self::Clockwise),
            "-" => Ok(Self::CounterClockwise),
            value => Err(Error::InvalidDirection {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => write!(f, "+"),
            Self::CounterClockwise => write!(f, "-"),
        }
    }
}

/// A `V` assignment.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variable {
    Direction(Direction),
    Center(Coordinate),
}

impl Variable {
    pub fn parse(content: &str, grammar: Grammar) -> Result<Self, Error> {
        let (name, value) = content
            .split_once('=')
            .ok_or_else(|| Error::SyntaxError {
                directive: "V".to_string(),
                reason: "missing \"=\"".to_string(),
            })?;

        match name.trim() {
            "D" => value.parse().map(Self::Direction),
            "X" => Coordinate::parse_with(value.trim(), grammar).map(Self::Center),
            name => Err(Error::UnknownVariable {
                name: name.to_string(),
            }),
        }
    }
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Grammar::Strict)
    }
}

/// Payload of a `DA` directive.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ArcSpec {
    /// Radius in nautical miles.
    pub radius: f64,
    /// Start angle in degrees from true north.
    pub start: f64,
    /// End angle in degrees from true north.
    pub end: f64,
}

impl FromStr for ArcSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [radius, start, end] = parts.as_slice() else {
            return Err(Error::SyntaxError {
                directive: "DA".to_string(),
                reason: format!(
                    "expected radius, start and end angle but found {} value(s)",
                    parts.len()
                ),
            });
        };

        let radius = parse_real!("DA", radius, "radius")?;
        let start = parse_real!("DA", start, "start angle")?;
        let end = parse_real!("DA", end, "end angle")?;

        if radius <= 0.0 {
            return Err(Error::InvalidRadius { value: radius });
        }

        for (field, value) in [("start angle", start), ("end angle", end)] {
            if !(0.0..=360.0).contains(&value) {
                return Err(Error::InvalidAngle { field, value });
            }
        }

        Ok(Self { radius, start, end })
    }
}

/// Payload of a `DB` directive.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ArcEnds {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl ArcEnds {
    pub fn parse(content: &str, grammar: Grammar) -> Result<Self, Error> {
        let parts: Vec<&str> = content.split(',').map(str::trim).collect();
        let [start, end] = parts.as_slice() else {
            return Err(Error::SyntaxError {
                directive: "DB".to_string(),
                reason: format!(
                    "expected two coordinates separated by a comma but found {}",
                    parts.len()
                ),
            });
        };

        let at = |index: usize| {
            move |e: Error| match e {
                Error::InvalidCoordinate {
                    coordinate, fault, ..
                } => Error::InvalidCoordinate {
                    coordinate,
                    fault,
                    index: Some(index),
                },
                e => e,
            }
        };

        Ok(Self {
            start: Coordinate::parse_with(start, grammar).map_err(at(1))?,
            end: Coordinate::parse_with(end, grammar).map_err(at(2))?,
        })
    }
}

/// Parses the radius of a `DC` directive in nautical miles.
pub fn parse_radius(content: &str) -> Result<f64, Error> {
    let radius = parse_real!("DC", content, "radius")?;

    if radius <= 0.0 {
        Err(Error::InvalidRadius { value: radius })
    } else {
        Ok(radius)
    }
}

/// Validates one directive.
///
/// The free-form `A*` metadata always passes.
///
/// ```
/// use openair::{validate, Directive, Error};
///
/// assert!(validate(&Directive::new(1, "DC", "2.5")).is_ok());
/// assert_eq!(
///     validate(&Directive::new(2, "DC", "-1")),
///     Err(Error::InvalidRadius { value: -1.0 })
/// );
/// ```
pub fn validate(directive: &Directive) -> Result<(), Error> {
    let content = directive.content.as_str();

    match directive.kind() {
        kind if kind.is_metadata() => Ok(()),
        DirectiveKind::Point => content.parse::<Coordinate>().map(|_| ()),
        DirectiveKind::ArcByPoints => ArcEnds::parse(content, Grammar::Strict).map(|_| ()),
        DirectiveKind::Circle => parse_radius(content).map(|_| ()),
        DirectiveKind::Arc => content.parse::<ArcSpec>().map(|_| ()),
        DirectiveKind::Variable => content.parse::<Variable>().map(|_| ()),
        _ => Err(Error::unknown_directive(directive.name.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoordinateFault;

    fn check(name: &str, content: &str) -> Result<(), Error> {
        validate(&Directive::new(1, name, content))
    }

    #[test]
    fn metadata_passes() {
        assert_eq!(check("AC", "D"), Ok(()));
        assert_eq!(check("AN", "anything * goes"), Ok(()));
        assert_eq!(check("AX", ""), Ok(()));
    }

    #[test]
    fn unknown_directive() {
        let error = check("DY", "48:00:00 N 002:00:00 E").unwrap_err();

        assert!(error.is_unknown_directive());
        assert!(matches!(error, Error::SyntaxError { directive, .. } if directive == "DY"));
    }

    #[test]
    fn point() {
        assert_eq!(check("DP", "48:00:00 N 002:00:00 E"), Ok(()));
        assert!(matches!(
            check("DP", "48:00:00 N 190:00:00 E"),
            Err(Error::InvalidCoordinate {
                fault: CoordinateFault::OutOfRange { field: "longitude degrees", .. },
                index: None,
                ..
            })
        ));
    }

    #[test]
    fn arc_by_points() {
        assert_eq!(
            check("DB", "48:00:00 N 002:00:00 E , 48:10:00 N 002:10:00 E"),
            Ok(())
        );
        assert!(matches!(
            check("DB", "48:00:00 N 002:00:00 E"),
            Err(Error::SyntaxError { .. })
        ));
        assert!(matches!(
            check("DB", "48:00:00 N 002:00:00 E, 48:10:00 N"),
            Err(Error::InvalidCoordinate { index: Some(2), .. })
        ));
        assert!(matches!(
            check("DB", "48:0:00 N 002:00:00 E, 48:10:00 N 002:10:00 E"),
            Err(Error::InvalidCoordinate { index: Some(1), .. })
        ));
    }

    #[test]
    fn circle() {
        assert_eq!(check("DC", "5"), Ok(()));
        assert_eq!(check("DC", "0"), Err(Error::InvalidRadius { value: 0.0 }));
        assert!(matches!(check("DC", "five"), Err(Error::SyntaxError { .. })));
    }

    #[test]
    fn arc() {
        let arc: ArcSpec = "10, 270, 90".parse().expect("arc should parse");
        assert_eq!(
            arc,
            ArcSpec {
                radius: 10.0,
                start: 270.0,
                end: 90.0
            }
        );

        assert!(matches!(check("DA", "10,270"), Err(Error::SyntaxError { .. })));
        assert!(matches!(check("DA", "10,x,90"), Err(Error::SyntaxError { .. })));
        assert_eq!(check("DA", "-2,0,90"), Err(Error::InvalidRadius { value: -2.0 }));
        assert_eq!(
            check("DA", "2,0,361"),
            Err(Error::InvalidAngle {
                field: "end angle",
                value: 361.0
            })
        );
        assert_eq!(check("DA", "2,0,360"), Ok(()));
    }

    #[test]
    fn variables() {
        assert_eq!(check("V", "D=+"), Ok(()));
        assert_eq!(check("V", "D = -"), Ok(()));
        assert_eq!(check("V", "X=48:00:00 N 002:00:00 E"), Ok(()));
        assert_eq!(
            check("V", "D=x"),
            Err(Error::InvalidDirection {
                value: "x".to_string()
            })
        );
        assert_eq!(
            check("V", "W=2"),
            Err(Error::UnknownVariable {
                name: "W".to_string()
            })
        );
        assert!(matches!(check("V", "X 48:00:00 N"), Err(Error::SyntaxError { .. })));
        assert_eq!(
            "X=48:00:00 N 002:00:00 E".parse::<Variable>(),
            Ok(Variable::Center(Coordinate::new(48.0, 2.0)))
        );
    }
}
