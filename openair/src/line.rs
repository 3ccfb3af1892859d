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

use std::fmt;
use std::str::Lines;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns `true` if the line is blank or a comment.
pub fn is_comment_or_empty(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('*')
}

/// Splits a raw line into its directive name and content.
///
/// Everything after the first `*` is a comment and dropped. The name is the
/// first space separated token and the content the trimmed remainder.
/// Returns `("", "")` for blank and comment lines.
///
/// ```
/// use openair::classify;
///
/// assert_eq!(classify("AN  ED-R 146 * Berlin"), ("AN", "ED-R 146"));
/// assert_eq!(classify("* AC D"), ("", ""));
/// ```
pub fn classify(line: &str) -> (&str, &str) {
    let payload = match line.find('*') {
        Some(i) => &line[..i],
        None => line,
    };
    let payload = payload.trim();

    match payload.split_once(' ') {
        Some((name, content)) => (name.trim(), content.trim()),
        None => (payload, ""),
    }
}

/// The meaning of a directive name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectiveKind {
    /// `AC` airspace class which opens a new airspace section.
    Class,
    /// `AN` airspace name.
    Name,
    /// `AH` upper limit.
    Ceiling,
    /// `AL` lower limit.
    Floor,
    /// `AY` airspace type of the feed.
    Type,
    /// `AF` frequency.
    Frequency,
    /// `AG` ground station name.
    Station,
    /// Any other `A*` metadata.
    Meta,
    /// `DP` polygon point.
    Point,
    /// `DB` arc between two points.
    ArcByPoints,
    /// `DC` circle.
    Circle,
    /// `DA` arc by radius and angles.
    Arc,
    /// `V` variable assignment.
    Variable,
    Unknown,
}

impl DirectiveKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "AC" => Self::Class,
            "AN" => Self::Name,
            "AH" => Self::Ceiling,
            "AL" => Self::Floor,
            "AY" => Self::Type,
            "AF" => Self::Frequency,
            "AG" => Self::Station,
            n if n.starts_with('A') => Self::Meta,
            "DP" => Self::Point,
            "DB" => Self::ArcByPoints,
            "DC" => Self::Circle,
            "DA" => Self::Arc,
            "V" => Self::Variable,
            _ => Self::Unknown,
        }
    }

    /// Returns `true` for the free-form `A*` metadata directives.
    pub fn is_metadata(&self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Name
                | Self::Ceiling
                | Self::Floor
                | Self::Type
                | Self::Frequency
                | Self::Station
                | Self::Meta
        )
    }

    /// Returns `true` for `DA`, `DB` and `DC`, which may terminate a block
    /// of `V` lines.
    pub fn is_curve(&self) -> bool {
        matches!(self, Self::Arc | Self::ArcByPoints | Self::Circle)
    }
}

/// One directive of an OpenAir file.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Directive {
    /// 1-based line number in the source.
    pub line: usize,
    pub name: String,
    pub content: String,
}

impl Directive {
    pub fn new(line: usize, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            line,
            name: name.into(),
            content: content.into(),
        }
    }

    /// Classifies the raw `text` found at `line`.
    ///
    /// Returns `None` for blank and comment lines.
    pub fn parse(line: usize, text: &str) -> Option<Self> {
        match classify(text) {
            ("", _) => None,
            (name, content) => Some(Self::new(line, name, content)),
        }
    }

    pub fn kind(&self) -> DirectiveKind {
        DirectiveKind::from_name(&self.name)
    }

    /// Returns the variable name and its value of a `V` directive.
    ///
    /// Both are trimmed, e.g. `V X = 48:00:00 N 002:00:00 E` returns
    /// `("X", "48:00:00 N 002:00:00 E")`.
    pub fn assignment(&self) -> Option<(&str, &str)> {
        if self.kind() != DirectiveKind::Variable {
            return None;
        }

        self.content
            .split_once('=')
            .map(|(name, value)| (name.trim(), value.trim()))
    }

    /// Returns `true` if this is a `V X=` center assignment.
    pub fn is_center(&self) -> bool {
        matches!(self.assignment(), Some(("X", _)))
    }

    /// Returns `true` if this is a `V D=` direction assignment.
    pub fn is_direction(&self) -> bool {
        matches!(self.assignment(), Some(("D", _)))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.content.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.content)
        }
    }
}

/// Iterator over the directives of an OpenAir text.
///
/// Blank and comment lines are skipped but still counted, so that each
/// [`Directive::line`] refers to the line in the original text.
///
/// ```
/// use openair::Directives;
///
/// let text = "* restricted area\nAC R\n\nAN ED-R 146\n";
/// let names: Vec<_> = Directives::new(text).map(|d| d.name).collect();
/// assert_eq!(names, ["AC", "AN"]);
/// ```
pub struct Directives<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> Directives<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }
}

impl Iterator for Directives<'_> {
    type Item = Directive;

    fn next(&mut self) -> Option<Self::Item> {
        for text in self.lines.by_ref() {
            self.line += 1;

            if let Some(directive) = Directive::parse(self.line, text) {
                return Some(directive);
            }
        }

        None
    }
}
