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

//! OpenAir airspace notation parser.
//!
//! This crate reads the line oriented OpenAir format: it classifies lines
//! into [`Directive`]s, validates their payloads, renders them in canonical
//! form and repairs the `V` variable lines in front of arcs. Building
//! airspaces and geometries out of the directives is left to callers.
//!
//! # Examples
//!
//! Validate and correct a restricted area whose arc has its center and
//! direction swapped:
//!
//! ```
//! use openair::{canonical, Corrector, Directives, Report};
//!
//! let text = "\
//! AC R
//! AN ED-R 146
//! V X=52:30:00 N 013:20:00 E
//! V D=-
//! DA 5,0,90
//! ";
//!
//! let report = Report::analyze(text);
//! assert!(report.is_valid());
//!
//! let correction = Corrector::correct(Directives::new(text));
//! assert_eq!(correction.inversions, 1);
//! assert_eq!(canonical(&correction.directives[2]), "V D=-");
//! ```

#[macro_use]
mod macros;

mod analysis;
mod coordinate;
mod corrector;
mod decode;
mod error;
mod format;
mod line;
mod validate;

pub use analysis::{ErrorCategory, Report};
pub use coordinate::{canonicalize, Angle, Coordinate, Dms, Grammar};
pub use corrector::{Correction, Corrector, State};
pub use decode::{decode, decode_with, Encoding};
pub use error::{CoordinateFault, Diagnostic, Error};
pub use format::{canonical, render};
pub use line::{classify, is_comment_or_empty, Directive, DirectiveKind, Directives};
pub use validate::{parse_radius, validate, ArcEnds, ArcSpec, Direction, Variable};
