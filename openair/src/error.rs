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

use std::error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Why a coordinate was rejected.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CoordinateFault {
    /// The text doesn't follow the grammar at the byte `position`.
    Syntax {
        position: usize,
        expected: &'static str,
    },
    /// A degree, minute or second value is out of its range.
    OutOfRange {
        field: &'static str,
        value: f64,
        bound: &'static str,
    },
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Error {
    /// The line has no directive, the directive is unknown or its payload
    /// doesn't have the expected shape.
    SyntaxError {
        directive: String,
        reason: String,
    },
    InvalidCoordinate {
        coordinate: String,
        fault: CoordinateFault,
        /// Which coordinate of a multi-coordinate payload failed (1-based).
        index: Option<usize>,
    },
    InvalidRadius {
        value: f64,
    },
    InvalidAngle {
        field: &'static str,
        value: f64,
    },
    InvalidDirection {
        value: String,
    },
    UnknownVariable {
        name: String,
    },
    /// A run of `V` lines that isn't terminated by `DA`, `DB` or `DC`.
    IncompleteVBlock {
        count: usize,
    },
    /// A lone `V` line before an arc that isn't a center assignment.
    InvalidSingleVBlock {
        terminator: String,
        found: String,
    },
    /// Two `V` lines before an arc that aren't a direction and a center.
    InvalidVBlockOrder {
        first: String,
        second: String,
    },
    TooManyVLines {
        count: usize,
    },
    UnreadableEncoding {
        attempted: Vec<&'static str>,
    },
}

const UNKNOWN_DIRECTIVE: &str = "unknown directive";

impl Error {
    /// Returns the syntax error for a directive `name` OpenAir doesn't define.
    pub fn unknown_directive(name: impl Into<String>) -> Self {
        Self::SyntaxError {
            directive: name.into(),
            reason: UNKNOWN_DIRECTIVE.to_string(),
        }
    }

    /// Returns `true` if this error was created by [`Error::unknown_directive`].
    pub fn is_unknown_directive(&self) -> bool {
        matches!(self, Self::SyntaxError { reason, .. } if reason == UNKNOWN_DIRECTIVE)
    }
}

impl fmt::Display for CoordinateFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { position, expected } => {
                write!(f, "expected {expected} at position {position}")
            }
            Self::OutOfRange {
                field,
                value,
                bound,
            } => write!(f, "{field} is {value} but must be {bound}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SyntaxError { directive, reason } if directive.is_empty() => {
                write!(f, "syntax error: {reason}")
            }
            Self::SyntaxError { directive, reason } => {
                write!(f, "syntax error in {directive}: {reason}")
            }
            Self::InvalidCoordinate {
                coordinate,
                fault,
                index: Some(i),
            } => write!(f, "invalid coordinate {i} \"{coordinate}\": {fault}"),
            Self::InvalidCoordinate {
                coordinate,
                fault,
                index: None,
            } => write!(f, "invalid coordinate \"{coordinate}\": {fault}"),
            Self::InvalidRadius { value } => {
                write!(f, "radius should be positive but is {value}")
            }
            Self::InvalidAngle { field, value } => {
                write!(f, "{field} should be between 0 and 360 but is {value}")
            }
            Self::InvalidDirection { value } => {
                write!(f, "direction is \"{value}\" but should be + or -")
            }
            Self::UnknownVariable { name } => write!(f, "unknown variable \"{name}\""),
            Self::IncompleteVBlock { count } => write!(
                f,
                "{count} V line(s) not terminated by a geometry directive (DA, DB or DC)"
            ),
            Self::InvalidSingleVBlock { terminator, found } => write!(
                f,
                "single V line before {terminator} should be V X= but is \"{found}\""
            ),
            Self::InvalidVBlockOrder { first, second } => write!(
                f,
                "expected V D= then V X= but found \"{first}\" then \"{second}\""
            ),
            Self::TooManyVLines { count } => {
                write!(f, "expected 1 or 2 V lines before the arc but found {count}")
            }
            Self::UnreadableEncoding { attempted } => {
                write!(f, "input is not readable as {}", attempted.join(", "))
            }
        }
    }
}

impl error::Error for Error {}

/// An error located at a line of the input.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    pub error: Error,
}

impl Diagnostic {
    pub fn new(line: usize, error: Error) -> Self {
        Self { line, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

impl error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}
