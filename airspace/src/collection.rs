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


//! Filtering and aggregation of features from several sources.

use std::fmt;

use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};
use log::{debug, warn};
use openair::{Corrector, Directives};

use crate::assembler::Assembler;
use crate::error::Error;
use crate::schema::StructuredFeature;
use crate::Options;

/// The kind of feed a group of features comes from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Source {
    /// A generic OpenAir feed.
    OpenAir,
    /// The OpenAir feed of French sectors, of which only the sectors are
    /// kept.
    FranceSector,
    /// The structured national GeoJSON feed.
    Structured,
}

impl Source {
    /// Detects the source from a file name.
    ///
    /// ```
    /// use airspace::{Options, Source};
    ///
    /// let options = Options::default();
    /// assert_eq!(Source::detect("FR_ASP_2026.txt", &options), Source::FranceSector);
    /// assert_eq!(Source::detect("airspace.geojson", &options), Source::Structured);
    /// assert_eq!(Source::detect("de_asp.txt", &options), Source::OpenAir);
    /// ```
    pub fn detect(file_name: &str, options: &Options) -> Self {
        let name = file_name.to_lowercase();

        if name.ends_with(".geojson") || name.ends_with(".json") {
            Self::Structured
        } else if !options.sector_file_marker.is_empty()
            && name.contains(&options.sector_file_marker.to_lowercase())
        {
            Self::FranceSector
        } else {
            Self::OpenAir
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAir => write!(f, "OpenAir"),
            Self::FranceSector => write!(f, "France sectors"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Counts of the filtered features.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct FilterStats {
    pub kept: usize,
    /// Dropped for their excluded type, e.g. `FIR`.
    pub excluded: usize,
    /// Dropped from a sector feed for not being a sector.
    pub not_sector: usize,
}

/// Returns `true` if the feature survives the filter of its source.
pub fn retain(feature: &Feature, source: Source, options: &Options) -> bool {
    filter(feature, source, options).is_none()
}

enum Drop {
    Excluded,
    NotSector,
}

fn filter(feature: &Feature, source: Source, options: &Options) -> Option<Drop> {
    let source_type = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("AY"))
        .and_then(JsonValue::as_str);

    if let Some(ay) = source_type {
        if !options.excluded_type.is_empty() && ay.contains(options.excluded_type.as_str()) {
            return Some(Drop::Excluded);
        }
    }

    if source == Source::FranceSector && source_type != Some(options.sector_type.as_str()) {
        return Some(Drop::NotSector);
    }

    None
}

/// Factory that collects the features of several sources into one
/// [feature collection].
///
/// Features keep the order in which their sources were added. Problems of a
/// source never abort the collection but are kept as [errors].
///
/// ```
/// use airspace::CollectionBuilder;
///
/// let mut builder = CollectionBuilder::new();
/// builder.add_openair("de.txt", b"AC D\nAN TEST\nDP 48:00:00 N 002:00:00 E\n");
///
/// assert!(builder.errors().is_empty());
/// assert_eq!(builder.build().features.len(), 1);
/// ```
///
/// [feature collection]: FeatureCollection
/// [errors]: Self::errors
#[derive(Debug, Default)]
pub struct CollectionBuilder {
    options: Options,
    features: Vec<Feature>,
    stats: FilterStats,
    errors: Vec<Error>,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn build(self) -> FeatureCollection {
        debug!(
            "collected {} feature(s), {} excluded, {} outside of sectors",
            self.stats.kept, self.stats.excluded, self.stats.not_sector
        );

        if !self.errors.is_empty() {
            warn!("{} problem(s) while collecting airspaces", self.errors.len());
        }

        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: None,
        }
    }

    /// Adds a file of any source, detected from its `name`.
    pub fn add_file(&mut self, name: &str, bytes: &[u8]) {
        match Source::detect(name, &self.options) {
            Source::Structured => match openair::decode(bytes) {
                Ok((text, _)) => self.add_structured(name, &text),
                Err(e) => self.add_error(Error::openair(name, e)),
            },
            _ => self.add_openair(name, bytes),
        }
    }

    /// Decodes and adds an OpenAir file.
    pub fn add_openair(&mut self, name: &str, bytes: &[u8]) {
        match openair::decode(bytes) {
            Ok((text, encoding)) => {
                debug!("decoded {name} as {encoding}");
                self.add_openair_text(name, &text);
            }
            Err(e) => self.add_error(Error::openair(name, e)),
        }
    }

    /// Adds an OpenAir text.
    ///
    /// The `V` lines are corrected before the sections are assembled and
    /// converted to features.
    pub fn add_openair_text(&mut self, name: &str, text: &str) {
        let source = match Source::detect(name, &self.options) {
            Source::FranceSector => Source::FranceSector,
            _ => Source::OpenAir,
        };

        let correction = Corrector::correct(Directives::new(text));
        if correction.inversions > 0 {
            debug!("{name}: inverted {} V block(s)", correction.inversions);
        }

        let assembly = Assembler::assemble(correction.directives);
        debug!("{name}: {} airspace(s)", assembly.blocks.len());

        for diagnostic in correction
            .diagnostics
            .into_iter()
            .chain(assembly.diagnostics)
        {
            self.add_error((name, diagnostic));
        }

        for block in &assembly.blocks {
            let feature = block.to_feature(&self.options);
            self.add_feature(feature, source);
        }
    }

    /// Adds a structured GeoJSON feature collection.
    ///
    /// The geometry of each feature is kept and its properties are reshaped
    /// into the unified schema.
    pub fn add_structured(&mut self, name: &str, json: &str) {
        let collection = match json.parse::<GeoJson>() {
            Ok(GeoJson::FeatureCollection(collection)) => collection,
            Ok(_) => {
                self.add_error(Error::InvalidGeoJson {
                    source: name.to_string(),
                    reason: "expected a feature collection".to_string(),
                });
                return;
            }
            Err(e) => {
                self.add_error((name, e));
                return;
            }
        };

        debug!("{name}: {} structured feature(s)", collection.features.len());

        for feature in collection.features {
            let properties = feature.properties.unwrap_or_default();

            let structured = match StructuredFeature::from_json(&properties) {
                Ok(structured) => structured,
                Err(e) => {
                    self.add_error(Error::InvalidGeoJson {
                        source: name.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let feature = Feature {
                bbox: None,
                geometry: feature.geometry,
                id: None,
                properties: Some(structured.to_properties().to_json()),
                foreign_members: None,
            };

            self.add_feature(feature, Source::Structured);
        }
    }

    /// Adds the `feature` if it passes the filter of its `source`.
    pub fn add_feature(&mut self, feature: Feature, source: Source) {
        match filter(&feature, source, &self.options) {
            None => {
                self.stats.kept += 1;
                self.features.push(feature);
            }
            Some(Drop::Excluded) => self.stats.excluded += 1,
            Some(Drop::NotSector) => self.stats.not_sector += 1,
        }
    }

    pub fn add_error<E>(&mut self, e: E)
    where
        E: Into<Error>,
    {
        self.errors.push(e.into());
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::JsonObject;

    fn feature(ay: Option<&str>) -> Feature {
        let mut properties = JsonObject::new();
        if let Some(ay) = ay {
            properties.insert("AY".to_string(), ay.into());
        }

        Feature {
            properties: Some(properties),
            ..Default::default()
        }
    }

    #[test]
    fn fir_is_always_dropped() {
        let options = Options::default();

        for source in [Source::OpenAir, Source::FranceSector, Source::Structured] {
            assert!(!retain(&feature(Some("FIR")), source, &options));
            assert!(!retain(&feature(Some("FIR_SECTOR")), source, &options));
        }

        assert!(retain(&feature(Some("TMA")), Source::OpenAir, &options));
        assert!(retain(&feature(None), Source::OpenAir, &options));
    }

    #[test]
    fn sector_feed_keeps_sectors_only() {
        let options = Options::default();

        assert!(retain(&feature(Some("FIS_SECTOR")), Source::FranceSector, &options));
        assert!(!retain(&feature(Some("TMA")), Source::FranceSector, &options));
        assert!(!retain(&feature(None), Source::FranceSector, &options));
    }

    #[test]
    fn counts_dropped_features() {
        let mut builder = CollectionBuilder::new();
        builder.add_feature(feature(Some("FIR")), Source::OpenAir);
        builder.add_feature(feature(Some("TMA")), Source::FranceSector);
        builder.add_feature(feature(Some("FIS_SECTOR")), Source::FranceSector);

        assert_eq!(
            builder.stats(),
            FilterStats {
                kept: 1,
                excluded: 1,
                not_sector: 1
            }
        );
        assert_eq!(builder.build().features.len(), 1);
    }

    #[test]
    fn filter_keys_are_configurable() {
        let options = Options {
            excluded_type: "CTA".to_string(),
            ..Default::default()
        };

        assert!(retain(&feature(Some("FIR")), Source::OpenAir, &options));
        assert!(!retain(&feature(Some("CTA")), Source::OpenAir, &options));
    }

    #[test]
    fn rejects_other_geojson() {
        let mut builder = CollectionBuilder::new();
        builder.add_structured("point.geojson", r#"{"type": "Point", "coordinates": [2, 48]}"#);
        builder.add_structured("broken.geojson", "{");

        assert_eq!(builder.errors().len(), 2);
        assert_eq!(builder.errors()[0].source_name(), "point.geojson");
        assert!(matches!(builder.errors()[1], Error::InvalidGeoJson { .. }));
    }
}
