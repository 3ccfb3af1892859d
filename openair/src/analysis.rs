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

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{CoordinateFault, Diagnostic, Error};
use crate::line::Directives;
use crate::validate::validate;

/// Category a diagnostic is counted in.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ErrorCategory {
    CoordinateSyntax,
    LatitudeRange,
    LongitudeRange,
    Radius,
    Angle,
    Direction,
    UnknownVariable,
    UnknownDirective,
    Syntax,
    Block,
    Encoding,
}

impl From<&Error> for ErrorCategory {
    fn from(error: &Error) -> Self {
        match error {
            error if error.is_unknown_directive() => Self::UnknownDirective,
            Error::SyntaxError { .. } => Self::Syntax,
            Error::InvalidCoordinate { fault, .. } => match fault {
                CoordinateFault::Syntax { .. } => Self::CoordinateSyntax,
                CoordinateFault::OutOfRange { field, .. } if field.starts_with("latitude") => {
                    Self::LatitudeRange
                }
                CoordinateFault::OutOfRange { .. } => Self::LongitudeRange,
            },
            Error::InvalidRadius { .. } => Self::Radius,
            Error::InvalidAngle { .. } => Self::Angle,
            Error::InvalidDirection { .. } => Self::Direction,
            Error::UnknownVariable { .. } => Self::UnknownVariable,
            Error::IncompleteVBlock { .. }
            | Error::InvalidSingleVBlock { .. }
            | Error::InvalidVBlockOrder { .. }
            | Error::TooManyVLines { .. } => Self::Block,
            Error::UnreadableEncoding { .. } => Self::Encoding,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CoordinateSyntax => "coordinate syntax",
            Self::LatitudeRange => "latitude range",
            Self::LongitudeRange => "longitude range",
            Self::Radius => "radius",
            Self::Angle => "angle",
            Self::Direction => "direction",
            Self::UnknownVariable => "unknown variable",
            Self::UnknownDirective => "unknown directive",
            Self::Syntax => "syntax",
            Self::Block => "variable block",
            Self::Encoding => "encoding",
        };
        write!(f, "{s}")
    }
}

/// Validation report of one OpenAir text.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    /// Number of directive lines.
    pub lines: usize,
    /// Number of directive lines without error.
    pub valid_lines: usize,
    /// Number of occurrences per directive name.
    pub directives: BTreeMap<String, usize>,
    pub errors: BTreeMap<ErrorCategory, usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Validates every directive of the text.
    pub fn analyze(text: &str) -> Self {
        let mut report = Self::default();

        for directive in Directives::new(text) {
            report.lines += 1;
            *report.directives.entry(directive.name.clone()).or_default() += 1;

            match validate(&directive) {
                Ok(()) => report.valid_lines += 1,
                Err(e) => report.add_error(Diagnostic::new(directive.line, e)),
            }
        }

        report
    }

    pub fn add_error(&mut self, diagnostic: Diagnostic) {
        *self
            .errors
            .entry(ErrorCategory::from(&diagnostic.error))
            .or_default() += 1;
        self.diagnostics.push(diagnostic);
    }

    /// The directive names found.
    pub fn names(&self) -> BTreeSet<&str> {
        self.directives.keys().map(String::as_str).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
