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

//! Repair of the `V` lines in front of arcs.
//!
//! An arc (`DA`) or an arc between points (`DB`) needs a direction `V D=`
//! followed by a center `V X=`. Feeds often swap the two lines or omit the
//! direction when it didn't change. The [`Corrector`] walks the directive
//! stream with two states. While [`State::Scanning`] directives pass
//! unchanged. A `V` switches to [`State::InVBlock`] which collects the run of
//! `V` lines until the first other directive decides how the run is emitted.

use std::mem;

use log::{debug, trace};

use crate::error::{Diagnostic, Error};
use crate::line::{Directive, DirectiveKind};
use crate::validate::Direction;

/// The corrected directives of one file.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Correction {
    pub directives: Vec<Directive>,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of swapped `V X=` and `V D=` pairs.
    pub inversions: usize,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub enum State {
    #[default]
    Scanning,
    InVBlock(Vec<Directive>),
}

/// Block corrector state machine.
///
/// ```
/// use openair::{Corrector, Directive};
///
/// let mut corrector = Corrector::new();
/// corrector.push(Directive::new(1, "V", "X=48:00:00 N 002:00:00 E"));
/// corrector.push(Directive::new(2, "DB", "48:10:00 N 002:00:00 E, 47:50:00 N 002:00:00 E"));
///
/// let correction = corrector.finish();
/// assert_eq!(correction.directives[0].to_string(), "V D=+");
/// assert_eq!(correction.directives.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Corrector {
    state: State,
    direction: Direction,
    correction: Correction,
}

impl Corrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corrects the whole directive stream of one file.
    pub fn correct<I>(directives: I) -> Correction
    where
        I: IntoIterator<Item = Directive>,
    {
        let mut corrector = Self::new();
        for directive in directives {
            corrector.push(directive);
        }
        corrector.finish()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// The direction that is carried into a lone `V X=`.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn push(&mut self, directive: Directive) {
        let kind = directive.kind();

        match mem::take(&mut self.state) {
            State::Scanning => self.scan(directive),
            State::InVBlock(mut block) if kind == DirectiveKind::Variable => {
                self.direction = carried_direction(&directive, self.direction);
                block.push(directive);
                self.state = State::InVBlock(block);
            }
            State::InVBlock(block) if kind.is_curve() => {
                self.emit_block(block, &directive);
                self.emit(directive);
            }
            State::InVBlock(block) => {
                self.add_error(&block, Error::IncompleteVBlock { count: block.len() });
                self.emit_all(block);
                self.scan(directive);
            }
        }
    }

    /// Flushes a pending block and returns the correction.
    pub fn finish(mut self) -> Correction {
        if let State::InVBlock(block) = mem::take(&mut self.state) {
            self.add_error(&block, Error::IncompleteVBlock { count: block.len() });
            self.emit_all(block);
        }

        debug!(
            "corrected {} directives with {} inversion(s) and {} error(s)",
            self.correction.directives.len(),
            self.correction.inversions,
            self.correction.diagnostics.len()
        );

        self.correction
    }

    fn scan(&mut self, directive: Directive) {
        match directive.kind() {
            DirectiveKind::Class => {
                self.direction = Direction::Clockwise;
                self.emit(directive);
            }
            DirectiveKind::Variable => {
                self.direction = carried_direction(&directive, self.direction);
                self.state = State::InVBlock(vec![directive]);
            }
            _ => self.emit(directive),
        }
    }

    fn emit_block(&mut self, mut block: Vec<Directive>, terminator: &Directive) {
        if terminator.kind() == DirectiveKind::Circle {
            self.emit_all(block);
            return;
        }

        match block.len() {
            1 => {
                let v = &block[0];
                if v.is_center() {
                    trace!("line {}: adding V D={} before {}", v.line, self.direction, terminator.name);
                    let d = Directive::new(v.line, "V", format!("D={}", self.direction));
                    self.emit(d);
                } else {
                    self.add_error(
                        &block,
                        Error::InvalidSingleVBlock {
                            terminator: terminator.name.clone(),
                            found: v.to_string(),
                        },
                    );
                }
            }
            2 => {
                if block[0].is_center() && block[1].is_direction() {
                    trace!("line {}: swapping V X= and V D=", block[0].line);
                    block.swap(0, 1);
                    self.correction.inversions += 1;
                }

                if block[0].is_direction() && block[1].is_center() {
                    self.direction = carried_direction(&block[0], self.direction);
                } else {
                    self.add_error(
                        &block,
                        Error::InvalidVBlockOrder {
                            first: block[0].to_string(),
                            second: block[1].to_string(),
                        },
                    );
                }
            }
            count => self.add_error(&block, Error::TooManyVLines { count }),
        }

        self.emit_all(block);
    }

    fn emit(&mut self, directive: Directive) {
        self.correction.directives.push(directive);
    }

    fn emit_all(&mut self, block: Vec<Directive>) {
        self.correction.directives.extend(block);
    }

    fn add_error(&mut self, block: &[Directive], error: Error) {
        let line = block.first().map(|d| d.line).unwrap_or_default();
        self.correction.diagnostics.push(Diagnostic::new(line, error));
    }
}

/// Returns the direction of a `V D=` or the current one otherwise.
fn carried_direction(directive: &Directive, current: Direction) -> Direction {
    match directive.assignment() {
        Some(("D", value)) => value.parse().unwrap_or(current),
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: &str = "X=48:00:00 N 002:00:00 E";
    const VX: &str = "V X=48:00:00 N 002:00:00 E";
    const DB: &str = "48:10:00 N 002:00:00 E, 47:50:00 N 002:00:00 E";

    fn directives(lines: &[(&str, &str)]) -> Vec<Directive> {
        lines
            .iter()
            .enumerate()
            .map(|(i, (name, content))| Directive::new(i + 1, *name, *content))
            .collect()
    }

    fn rendered(correction: &Correction) -> Vec<String> {
        correction
            .directives
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn swaps_inverted_block() {
        let c = Corrector::correct(directives(&[
            ("AC", "D"),
            ("V", X),
            ("V", "D=+"),
            ("DA", "10,0,90"),
        ]));

        assert_eq!(rendered(&c), vec!["AC D", "V D=+", VX, "DA 10,0,90"]);
        assert_eq!(c.inversions, 1);
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn adds_direction_to_lone_center() {
        let c = Corrector::correct(directives(&[("AC", "D"), ("V", X), ("DB", DB)]));

        assert_eq!(rendered(&c)[1..3], ["V D=+", VX]);
        assert_eq!(c.directives[1].line, 2);
        assert_eq!(c.inversions, 0);
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn carries_direction_until_next_class() {
        let c = Corrector::correct(directives(&[
            ("AC", "D"),
            ("V", "D=-"),
            ("V", X),
            ("DA", "10,0,90"),
            ("V", X),
            ("DB", DB),
            ("AC", "R"),
            ("V", X),
            ("DB", DB),
        ]));

        let lines = rendered(&c);
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[4], "V D=-");
        assert_eq!(lines[7], "AC R");
        assert_eq!(lines[8], "V D=+");
    }

    #[test]
    fn circle_blocks_pass_unchanged() {
        let c = Corrector::correct(directives(&[("V", X), ("DC", "5")]));
        assert_eq!(rendered(&c), vec![VX, "DC 5"]);
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn incomplete_block() {
        let c = Corrector::correct(directives(&[
            ("V", X),
            ("DP", "48:00:00 N 002:00:00 E"),
            ("V", "D=+"),
        ]));

        assert_eq!(c.directives.len(), 3);
        assert_eq!(
            c.diagnostics,
            vec![
                Diagnostic::new(1, Error::IncompleteVBlock { count: 1 }),
                Diagnostic::new(3, Error::IncompleteVBlock { count: 1 }),
            ]
        );
    }

    #[test]
    fn invalid_blocks() {
        let c = Corrector::correct(directives(&[("V", "D=-"), ("DB", DB)]));
        assert_eq!(rendered(&c)[0], "V D=-");
        assert_eq!(c.directives.len(), 2);
        assert!(matches!(
            c.diagnostics[0].error,
            Error::InvalidSingleVBlock { ref terminator, .. } if terminator == "DB"
        ));

        let c = Corrector::correct(directives(&[("V", X), ("V", X), ("DA", "1,0,90")]));
        assert_eq!(c.inversions, 0);
        assert!(matches!(
            c.diagnostics[0].error,
            Error::InvalidVBlockOrder { .. }
        ));

        let c = Corrector::correct(directives(&[
            ("V", "D=+"),
            ("V", "D=-"),
            ("V", X),
            ("DA", "1,0,90"),
        ]));
        assert_eq!(c.directives.len(), 4);
        assert_eq!(
            c.diagnostics,
            vec![Diagnostic::new(1, Error::TooManyVLines { count: 3 })]
        );
    }

    #[test]
    fn states() {
        let mut corrector = Corrector::new();
        assert_eq!(corrector.state(), &State::Scanning);

        corrector.push(Directive::new(1, "V", "D=-"));
        assert!(matches!(corrector.state(), State::InVBlock(block) if block.len() == 1));
        assert_eq!(corrector.direction(), Direction::CounterClockwise);

        corrector.push(Directive::new(2, "AC", "D"));
        assert_eq!(corrector.state(), &State::Scanning);
        assert_eq!(corrector.direction(), Direction::Clockwise);
    }
}
