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


use airspace::{CollectionBuilder, Error, Options, Source};
use geojson::{JsonValue, Value};

const OPENAIR: &str = "\
* German airspaces
AC D
AN Bremen ctr
AH 2500ft msl
AL sfc
DP 53:00:00 N 008:40:00 E
DP 53:10:00 N 008:50:00 E
DP 53:00:00 N 009:00:00 E

AC UNC
AY FIR
AN BREMEN FIR
DP 53:00:00 N 008:00:00 E

AC R
AN ED-R 146
AH FL 95
AL GND
V X=52:30:00 N 013:20:00 E
V D=-
DA 5,0,90
DP 52:30:00 N 013:20:00 E

AC Q
AN ED-D 1
AH 3000FT MSL
AL GND
V X=52:00:00N 13:00:00E
DC 2
";

const FRANCE: &str = "\
AC UNC
AY FIS_SECTOR
AN PARIS INFO
DP 49:00:00 N 002:00:00 E
DP 49:00:00 N 003:00:00 E
DP 48:00:00 N 003:00:00 E

AC D
AY TMA
AN PARIS TMA
DP 49:00:00 N 002:00:00 E
";

const STRUCTURED: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[4.8, 45.7], [5.0, 45.7], [5.0, 45.9], [4.8, 45.7]]]
      },
      "properties": {
        "class": "D",
        "type": "CTR",
        "name": "LTA LYON",
        "upperCeiling": { "value": 35, "unit": "FL", "referenceDatum": "STD" },
        "lowerCeiling": { "value": "GND" },
        "frequency": { "value": "120.450", "name": "LYON TOUR" }
      }
    },
    {
      "type": "Feature",
      "geometry": null,
      "properties": { "class": "G", "type": "FIR", "name": "FRANCE" }
    }
  ]
}"#;

fn ring(value: &Value) -> &Vec<Vec<f64>> {
    match value {
        Value::Polygon(rings) => &rings[0],
        value => panic!("expected polygon but got {value:?}"),
    }
}

#[test]
fn polygon_of_points() {
    let mut builder = CollectionBuilder::new();
    builder.add_openair_text(
        "de_asp.txt",
        "AC D\nDP 48:00:00 N 002:00:00 E\nDP 48:01:00 N 002:01:00 E\nDP 48:00:00 N 002:02:00 E\n",
    );

    let collection = builder.build();
    assert_eq!(collection.features.len(), 1);

    let feature = &collection.features[0];
    let properties = feature.properties.as_ref().expect("properties should be set");
    assert_eq!(properties["type"], JsonValue::from("D"));

    let geometry = feature.geometry.as_ref().expect("geometry should be set");
    let ring = ring(&geometry.value);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring[0], vec![2.0, 48.0]);
    assert_eq!(ring[3], ring[0]);
}

#[test]
fn converts_openair_feed() {
    let mut builder = CollectionBuilder::new();
    builder.add_openair("de_asp.txt", OPENAIR.as_bytes());

    assert!(builder.errors().is_empty(), "{:?}", builder.errors());
    assert_eq!(builder.stats().excluded, 1);

    let collection = builder.build();
    let names: Vec<_> = collection
        .features
        .iter()
        .map(|f| f.properties.as_ref().unwrap()["AN"].clone())
        .collect();
    assert_eq!(names, ["BREMEN CTR", "ED-R 146", "ED-D 1"]);

    let ctr = collection.features[0].properties.as_ref().unwrap();
    assert_eq!(ctr["AH"], JsonValue::from("2500FT MSL"));
    assert_eq!(ctr["AL"], JsonValue::from("GND"));
    assert!((ctr["upperLimitMeters"].as_f64().unwrap() - 762.0).abs() < 1e-9);

    // the arc is drawn with the corrected direction and joined with the point
    let restricted = &collection.features[1];
    let properties = restricted.properties.as_ref().unwrap();
    assert_eq!(properties["type"], JsonValue::from("RESTRICTED"));
    assert_eq!(properties["V D"], JsonValue::from("-"));
    assert_eq!(properties["V X"], JsonValue::from("52:30:00 N 013:20:00 E"));
    assert!((properties["upperLimitMeters"].as_f64().unwrap() - 2895.6).abs() < 1e-9);

    let restricted_ring = ring(&restricted.geometry.as_ref().unwrap().value);
    assert!(restricted_ring.len() > 36);
    assert_eq!(restricted_ring.first(), restricted_ring.last());

    let danger = &collection.features[2];
    assert_eq!(
        danger.properties.as_ref().unwrap()["V X"],
        JsonValue::from("52:00:00 N 013:00:00 E")
    );
    assert_eq!(ring(&danger.geometry.as_ref().unwrap().value).len(), 73);
}

#[test]
fn keeps_only_france_sectors() {
    let mut builder = CollectionBuilder::new();
    builder.add_file("FR_ASP_2026.txt", FRANCE.as_bytes());

    let stats = builder.stats();
    assert_eq!(stats.kept, 1);
    assert_eq!(stats.not_sector, 1);

    let collection = builder.build();
    let properties = collection.features[0].properties.as_ref().unwrap();
    assert_eq!(properties["AN"], JsonValue::from("PARIS INFO"));
    assert_eq!(properties["type"], JsonValue::from("FIS_SECTOR"));
}

#[test]
fn merges_structured_feed() {
    let mut builder = CollectionBuilder::new();
    builder.add_file("de_asp.txt", OPENAIR.as_bytes());
    builder.add_file("france.geojson", STRUCTURED.as_bytes());

    assert!(builder.errors().is_empty(), "{:?}", builder.errors());

    let collection = builder.build();
    assert_eq!(collection.features.len(), 4);

    let lyon = &collection.features[3];
    let properties = lyon.properties.as_ref().unwrap();
    assert_eq!(properties["type"], JsonValue::from("D"));
    assert_eq!(properties["AY"], JsonValue::from("CTR"));
    assert_eq!(properties["AH"], JsonValue::from("FL35"));
    assert_eq!(properties["AL"], JsonValue::from("GND"));
    assert_eq!(properties["AF"], JsonValue::from("120.450"));
    assert_eq!(properties["AG"], JsonValue::from("LYON TOUR"));
    assert!(properties["AI"].as_str().is_some_and(|ai| ai.len() == 36));
    assert!((properties["upperLimitMeters"].as_f64().unwrap() - 1066.8).abs() < 1e-9);

    assert_eq!(ring(&lyon.geometry.as_ref().unwrap().value).len(), 4);
}

#[test]
fn reports_problems_per_source() {
    let broken = "\
AC R
AN BROKEN
V X=52:30:00 N 013:20:00 E
V X=52:31:00 N 013:20:00 E
V D=+
DA 5,0,90
DP nowhere
";

    let mut builder = CollectionBuilder::new();
    builder.add_openair_text("broken.txt", broken);
    builder.add_structured("broken.geojson", "[]");

    let errors = builder.errors();
    assert!(errors.len() >= 3, "{errors:?}");
    assert!(errors
        .iter()
        .take(errors.len() - 1)
        .all(|e| matches!(e, Error::OpenAir { source, .. } if source == "broken.txt")));
    assert!(matches!(errors.last(), Some(Error::InvalidGeoJson { .. })));

    // the section survives with what could be reconstructed
    assert_eq!(builder.build().features.len(), 1);
}

#[test]
fn reports_coordinates_out_of_bounds() {
    let text = "\
AC D
AN OUT OF BOUNDS
DP 95:00:00 N 002:00:00 E
DP 48:00:00 N 200:00:00 E
DP 48:00:00 N 003:00:00 E
";

    let mut builder = CollectionBuilder::new();
    builder.add_openair_text("de.txt", text);

    let lines: Vec<_> = builder
        .errors()
        .iter()
        .map(|e| match e {
            Error::OpenAir { diagnostic, .. } => diagnostic.line,
            e => panic!("expected an OpenAir error but got {e:?}"),
        })
        .collect();
    assert_eq!(lines, [3, 4]);

    let collection = builder.build();
    let geometry = collection.features[0].geometry.as_ref().unwrap();
    assert_eq!(geometry.value, Value::MultiPoint(vec![vec![3.0, 48.0]]));
}

#[test]
fn huge_circle_is_limited() {
    let mut builder = CollectionBuilder::new();
    builder.add_openair_text("de.txt", "AC D\nV X=48:00:00 N 002:00:00 E\nDC 1e18\n");

    assert!(builder.errors().is_empty());

    let max_segments = builder.options().max_segments;
    let collection = builder.build();
    let geometry = collection.features[0].geometry.as_ref().unwrap();
    assert_eq!(ring(&geometry.value).len(), max_segments + 1);
}

#[test]
fn custom_options() {
    let options: Options = serde_json::from_str(r#"{ "circle_min_segments": 72 }"#).unwrap();

    let mut builder = CollectionBuilder::new().with_options(options);
    builder.add_openair_text("de.txt", "AC D\nV X=48:00:00 N 002:00:00 E\nDC 1\n");

    let collection = builder.build();
    let geometry = collection.features[0].geometry.as_ref().unwrap();
    assert_eq!(ring(&geometry.value).len(), 73);
}

#[test]
fn detects_sources() {
    let options = Options::default();
    assert_eq!(Source::detect("fr_asp.txt", &options), Source::FranceSector);
    assert_eq!(Source::detect("France.GeoJSON", &options), Source::Structured);
    assert_eq!(Source::detect("openair.txt", &options), Source::OpenAir);
}
