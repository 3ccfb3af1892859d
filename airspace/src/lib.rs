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


//! Conversion of airspace feeds into one GeoJSON feature collection.
//!
//! OpenAir files are decoded, their `V` lines corrected by the [`openair`]
//! crate and their sections assembled into [`AirspaceBlock`]s. The symbolic
//! boundary of each block is reconstructed into a geometry and its
//! properties are normalized into a unified schema. The structured national
//! GeoJSON feed is reshaped into the same schema. All features pass a filter
//! before they are collected.
//!
//! # Examples
//!
//! ```
//! use airspace::CollectionBuilder;
//! use geojson::JsonValue;
//!
//! let openair = b"\
//! AC D
//! AN BREMEN CTR
//! AH 2500ft msl
//! AL GND
//! DP 53:00:00 N 008:40:00 E
//! DP 53:10:00 N 008:50:00 E
//! DP 53:00:00 N 009:00:00 E
//!
//! AC UNC
//! AY FIR
//! AN BREMEN FIR
//! DP 53:00:00 N 008:00:00 E
//! ";
//!
//! let mut builder = CollectionBuilder::new();
//! builder.add_file("de_asp.txt", openair);
//!
//! let collection = builder.build();
//! assert_eq!(collection.features.len(), 1);
//!
//! let properties = collection.features[0].properties.as_ref().unwrap();
//! assert_eq!(properties["type"], JsonValue::from("D"));
//! assert_eq!(properties["AH"], JsonValue::from("2500FT MSL"));
//! assert_eq!(properties["lowerLimitMeters"], JsonValue::from(0.0));
//! ```

mod altitude;
mod assembler;
mod block;
mod collection;
mod error;
pub mod geom;
mod options;
mod schema;

pub use altitude::{convert_to_meters, Altitude, Limit, Reference, Unit};
pub use assembler::{Assembler, Assembly};
pub use block::{AirspaceBlock, Primitive, Properties};
pub use collection::{retain, CollectionBuilder, FilterStats, Source};
pub use error::Error;
pub use options::Options;
pub use schema::{AirspaceClassification, AirspaceType, StructuredFeature, VerticalLimit};
