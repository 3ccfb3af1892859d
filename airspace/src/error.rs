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

use openair::Diagnostic;

#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// An OpenAir line of the named source was rejected.
    OpenAir {
        source: String,
        diagnostic: Diagnostic,
    },
    /// The structured feed isn't a GeoJSON feature collection.
    InvalidGeoJson { source: String, reason: String },
    /// The named source couldn't be decoded with any encoding.
    UnreadableEncoding {
        source: String,
        attempted: Vec<&'static str>,
    },
}

impl Error {
    /// Attaches the source name to an OpenAir error.
    pub fn openair(source: &str, e: openair::Error) -> Self {
        match e {
            openair::Error::UnreadableEncoding { attempted } => Self::UnreadableEncoding {
                source: source.to_string(),
                attempted,
            },
            e => Self::OpenAir {
                source: source.to_string(),
                diagnostic: Diagnostic::new(0, e),
            },
        }
    }

    /// Returns the name of the source the error occurred in.
    pub fn source_name(&self) -> &str {
        match self {
            Self::OpenAir { source, .. }
            | Self::InvalidGeoJson { source, .. }
            | Self::UnreadableEncoding { source, .. } => source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAir { source, diagnostic } => write!(f, "{source}: {diagnostic}"),
            Self::InvalidGeoJson { source, reason } => {
                write!(f, "{source}: invalid GeoJSON: {reason}")
            }
            Self::UnreadableEncoding { source, attempted } => {
                write!(f, "{source}: not readable as {}", attempted.join(", "))
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::OpenAir { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}

impl From<(&str, Diagnostic)> for Error {
    fn from((source, diagnostic): (&str, Diagnostic)) -> Self {
        Self::OpenAir {
            source: source.to_string(),
            diagnostic,
        }
    }
}

impl From<(&str, geojson::Error)> for Error {
    fn from((source, e): (&str, geojson::Error)) -> Self {
        Self::InvalidGeoJson {
            source: source.to_string(),
            reason: e.to_string(),
        }
    }
}
