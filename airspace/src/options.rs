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

use serde::{Deserialize, Serialize};

/// Constants and filter keys of the conversion.
///
/// The sampling constants are empirical. They can be loaded from JSON where
/// missing fields keep their default:
///
/// ```
/// use airspace::Options;
///
/// let options: Options = serde_json::from_str(r#"{ "arc_step_deg": 2.5 }"#).unwrap();
/// assert_eq!(options.arc_step_deg, 2.5);
/// assert_eq!(options.circle_min_segments, 36);
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Angle between two interpolated arc points in degrees.
    pub arc_step_deg: f64,
    /// Minimum number of vertices of a circle.
    pub circle_min_segments: usize,
    /// Vertices of a circle per nautical mile of radius.
    pub circle_segments_per_nm: f64,
    /// Upper bound on the vertices of one circle or arc.
    pub max_segments: usize,
    /// Features whose `AY` contains this text are dropped.
    pub excluded_type: String,
    /// The only `AY` kept from a sector feed.
    pub sector_type: String,
    /// Marker in a file name that identifies a sector feed.
    pub sector_file_marker: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            arc_step_deg: 5.0,
            circle_min_segments: 36,
            circle_segments_per_nm: 36.0,
            max_segments: 10_000,
            excluded_type: "FIR".to_string(),
            sector_type: "FIS_SECTOR".to_string(),
            sector_file_marker: "fr_asp".to_string(),
        }
    }
}
