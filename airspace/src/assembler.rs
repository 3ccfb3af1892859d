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


//! Assembly of corrected OpenAir directives into airspace blocks.

use log::{debug, trace, warn};
use openair::{
    canonical, canonicalize, parse_radius, validate, ArcEnds, ArcSpec, Coordinate, Diagnostic,
    Direction, Directive, DirectiveKind, Error, Grammar,
};

use crate::block::{AirspaceBlock, Primitive};
use crate::schema::AirspaceType;

/// The blocks of one OpenAir source and the problems met on the way.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Assembly {
    pub blocks: Vec<AirspaceBlock>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Groups directives into [airspace blocks].
///
/// Every `AC` opens a new block and resets the center and direction. Curves
/// take the center and direction that are current when they are pushed.
///
/// Each directive is validated in its canonical form first. A directive that
/// fails is reported and contributes nothing, so every coordinate of the
/// assembled blocks is within the decimal degree bounds.
///
/// ```
/// use airspace::Assembler;
/// use openair::Directives;
///
/// let text = "AC D\nAN TEST\nDP 48:00:00 N 002:00:00 E\n";
/// let assembly = Assembler::assemble(Directives::new(text));
///
/// assert_eq!(assembly.blocks.len(), 1);
/// assert_eq!(assembly.blocks[0].properties.name.as_deref(), Some("TEST"));
/// ```
///
/// [airspace blocks]: AirspaceBlock
#[derive(Debug, Default)]
pub struct Assembler {
    block: Option<AirspaceBlock>,
    center: Option<Coordinate>,
    direction: Direction,
    assembly: Assembly,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles all `directives` at once.
    pub fn assemble<I>(directives: I) -> Assembly
    where
        I: IntoIterator<Item = Directive>,
    {
        let mut assembler = Self::new();
        directives.into_iter().for_each(|d| assembler.push(&d));
        assembler.finish()
    }

    pub fn push(&mut self, directive: &Directive) {
        trace!("assembling {directive}");

        let kind = directive.kind();

        if kind == DirectiveKind::Class {
            self.close();
            self.center = None;
            self.direction = Direction::default();
            self.block = Some(AirspaceBlock {
                line: directive.line,
                ..Default::default()
            });
        }

        let Some(block) = self.block.as_mut() else {
            warn!(
                "ignoring {} at line {} before the first AC",
                directive.name, directive.line
            );
            return;
        };

        if let Err(e) = Self::check(directive) {
            if directive.is_center() {
                // a broken center must not be used by later curves
                self.center = None;
                block.properties.center = directive.assignment().map(|(_, v)| canonicalize(v));
            }

            self.add_error(directive.line, e);
            return;
        }

        let result = match kind {
            _ if kind.is_metadata() => {
                block.properties.set(&directive.name, &directive.content);
                Ok(())
            }
            DirectiveKind::Variable => {
                Self::assign(block, &mut self.center, &mut self.direction, directive)
            }
            DirectiveKind::Point => Coordinate::parse_lenient(&directive.content)
                .map(|c| block.primitives.push(Primitive::Point(c))),
            DirectiveKind::Circle => parse_radius(&directive.content).map(|radius| {
                block.primitives.push(Primitive::Circle {
                    center: self.center,
                    radius,
                })
            }),
            DirectiveKind::Arc => directive.content.parse::<ArcSpec>().map(|arc| {
                block.primitives.push(Primitive::Arc {
                    center: self.center,
                    radius: arc.radius,
                    start: arc.start,
                    end: arc.end,
                    direction: self.direction,
                })
            }),
            DirectiveKind::ArcByPoints => ArcEnds::parse(&directive.content, Grammar::Lenient)
                .map(|ends| {
                    block.primitives.push(Primitive::ArcByPoints {
                        center: self.center,
                        start: ends.start,
                        end: ends.end,
                        direction: self.direction,
                    })
                }),
            _ => Err(Error::unknown_directive(directive.name.as_str())),
        };

        if let Err(e) = result {
            self.add_error(directive.line, e);
        }
    }

    // Validates the directive as the strict grammar would after canonicalization.
    fn check(directive: &Directive) -> Result<(), Error> {
        match Directive::parse(directive.line, &canonical(directive)) {
            Some(normalized) => validate(&normalized),
            None => validate(directive),
        }
    }

    // Applies a `V` assignment to the registers and properties.
    fn assign(
        block: &mut AirspaceBlock,
        center: &mut Option<Coordinate>,
        direction: &mut Direction,
        directive: &Directive,
    ) -> Result<(), Error> {
        match directive.assignment() {
            Some(("X", value)) => {
                block.properties.center = Some(canonicalize(value));
                *center = None;
                *center = Some(Coordinate::parse_lenient(value)?);
                Ok(())
            }
            Some(("D", value)) => {
                *direction = value.parse()?;
                block.properties.direction = Some(*direction);
                Ok(())
            }
            Some((name, _)) => Err(Error::UnknownVariable {
                name: name.to_string(),
            }),
            None => Err(Error::SyntaxError {
                directive: directive.name.clone(),
                reason: "missing \"=\"".to_string(),
            }),
        }
    }

    fn close(&mut self) {
        if let Some(mut block) = self.block.take() {
            block.properties.airspace_type = AirspaceType::from_openair(&block.properties);
            trace!(
                "closing airspace {} with {} primitive(s)",
                block.properties.name.as_deref().unwrap_or_default(),
                block.primitives.len()
            );
            self.assembly.blocks.push(block);
        }
    }

    fn add_error(&mut self, line: usize, e: Error) {
        let diagnostic = Diagnostic::new(line, e);
        debug!("{diagnostic}");
        self.assembly.diagnostics.push(diagnostic);
    }

    /// Closes the open block and returns everything assembled.
    pub fn finish(mut self) -> Assembly {
        self.close();
        debug!(
            "assembled {} airspace(s) with {} diagnostic(s)",
            self.assembly.blocks.len(),
            self.assembly.diagnostics.len()
        );
        self.assembly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openair::{CoordinateFault, Directives};

    use crate::altitude::{Altitude, Limit};
    use crate::schema::AirspaceClassification;

    const CENTER: Coordinate = Coordinate {
        latitude: 48.0,
        longitude: 2.0,
    };

    #[test]
    fn assembles_sections() {
        let text = "\
AC D
AN Test ctr
AH fl 65
AL sfc
DP 48:00:00 N 002:00:00 E
DP 48:00:00 N 003:00:00 E
DP 49:00:00 N 003:00:00 E

AC R
AN ED-R 1
V X=48:00:00 N 002:00:00 E
DC 5
";
        let assembly = Assembler::assemble(Directives::new(text));
        assert!(assembly.diagnostics.is_empty());
        assert_eq!(assembly.blocks.len(), 2);

        let ctr = &assembly.blocks[0];
        assert_eq!(ctr.line, 1);
        assert_eq!(ctr.properties.name.as_deref(), Some("TEST CTR"));
        assert_eq!(ctr.properties.ceiling, Some(Limit::Standard(Altitude::Fl(65))));
        assert_eq!(ctr.properties.floor, Some(Limit::Standard(Altitude::Gnd)));
        assert_eq!(
            ctr.properties.airspace_type,
            Some(AirspaceType::Class(AirspaceClassification::D))
        );
        assert_eq!(ctr.primitives.len(), 3);

        let restricted = &assembly.blocks[1];
        assert_eq!(restricted.line, 9);
        assert_eq!(
            restricted.properties.center.as_deref(),
            Some("48:00:00 N 002:00:00 E")
        );
        assert_eq!(restricted.properties.airspace_type, Some(AirspaceType::Restricted));
        assert_eq!(
            restricted.primitives,
            vec![Primitive::Circle {
                center: Some(CENTER),
                radius: 5.0
            }]
        );
    }

    #[test]
    fn curves_take_current_registers() {
        let text = "\
AC Q
V D=-
V X=48:00:00 N 002:00:00 E
DA 2, 270, 90
DB 48:01:00 N 002:00:00 E, 47:59:00 N 002:00:00 E
";
        let assembly = Assembler::assemble(Directives::new(text));
        let block = &assembly.blocks[0];

        assert_eq!(block.properties.direction, Some(Direction::CounterClockwise));
        assert_eq!(
            block.primitives[0],
            Primitive::Arc {
                center: Some(CENTER),
                radius: 2.0,
                start: 270.0,
                end: 90.0,
                direction: Direction::CounterClockwise,
            }
        );
        assert!(matches!(
            block.primitives[1],
            Primitive::ArcByPoints {
                center: Some(_),
                direction: Direction::CounterClockwise,
                ..
            }
        ));
    }

    #[test]
    fn class_resets_registers() {
        let text = "\
AC R
V D=-
V X=48:00:00 N 002:00:00 E
AC R
DC 1
DA 1, 0, 90
";
        let assembly = Assembler::assemble(Directives::new(text));
        let block = &assembly.blocks[1];

        assert_eq!(
            block.primitives,
            vec![
                Primitive::Circle {
                    center: None,
                    radius: 1.0
                },
                Primitive::Arc {
                    center: None,
                    radius: 1.0,
                    start: 0.0,
                    end: 90.0,
                    direction: Direction::Clockwise,
                }
            ]
        );
    }

    #[test]
    fn reports_and_skips_broken_payloads() {
        let text = "\
AN ORPHAN
AC D
DP somewhere
DC -1
DA 1, 400, 0
V X=nowhere
DC 2
XX what
";
        let assembly = Assembler::assemble(Directives::new(text));

        assert_eq!(assembly.blocks.len(), 1);
        assert_eq!(
            assembly.blocks[0].primitives,
            vec![Primitive::Circle {
                center: None,
                radius: 2.0
            }]
        );
        assert_eq!(assembly.blocks[0].properties.center.as_deref(), Some("nowhere"));

        let lines: Vec<_> = assembly.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, [3, 4, 5, 6, 8]);
        assert!(matches!(
            assembly.diagnostics[1].error,
            Error::InvalidRadius { .. }
        ));
        assert!(matches!(
            assembly.diagnostics[2].error,
            Error::InvalidAngle { .. }
        ));
    }

    #[test]
    fn rejects_coordinates_out_of_bounds() {
        let text = "\
AC R
V X=48:00:00 N 002:00:00 E
DP 95:00:00 N 002:00:00 E
DP 48:00:00 N 200:00:00 E
DP 90:30:00 S 002:00:00 E
DB 48:00:00 N 002:00:00 E, 48:00:00 N 181:00:00 W
V X=48:00:00 N 190:00:00 E
DC 2
DP 48:0:0N 3:0:0E
";
        let assembly = Assembler::assemble(Directives::new(text));
        let block = &assembly.blocks[0];

        assert_eq!(
            block.primitives,
            vec![
                Primitive::Circle {
                    center: None,
                    radius: 2.0
                },
                Primitive::Point(Coordinate::new(48.0, 3.0)),
            ]
        );
        assert_eq!(block.properties.center.as_deref(), Some("48:00:00 N 190:00:00 E"));

        let lines: Vec<_> = assembly.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, [3, 4, 5, 6, 7]);
        assert!(assembly.diagnostics.iter().all(|d| matches!(
            d.error,
            Error::InvalidCoordinate {
                fault: CoordinateFault::OutOfRange { .. },
                ..
            }
        )));
    }

    #[test]
    fn invalid_direction_keeps_previous() {
        let text = "AC R\nV D=-\nV D=x\nV X=48:00:00 N 002:00:00 E\nDA 1, 0, 90\n";
        let assembly = Assembler::assemble(Directives::new(text));

        assert_eq!(assembly.diagnostics.len(), 1);
        assert!(matches!(
            assembly.blocks[0].primitives[0],
            Primitive::Arc {
                direction: Direction::CounterClockwise,
                ..
            }
        ));
    }

    #[test]
    fn unclassified_takes_feed_type() {
        let text = "AC UNC\nAY overflight_restriction\nAN PARK\n";
        let assembly = Assembler::assemble(Directives::new(text));

        assert_eq!(
            assembly.blocks[0].properties.airspace_type,
            Some(AirspaceType::Prohibited)
        );
        assert_eq!(assembly.blocks[0].primitives, vec![]);
    }
}
