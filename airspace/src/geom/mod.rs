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

//! Reconstruction of boundary primitives into GeoJSON geometries.

use std::f64::consts::PI;

use geo::{
    Bearing, Coord, Destination, Distance, Geometry, HaversineMeasure, LineString, MultiPoint,
    Point, Polygon,
};
use log::warn;
use openair::{Coordinate, Direction};

use crate::block::Primitive;
use crate::Options;

/// Sphere on which one nautical mile is one minute of arc.
///
/// Distances on it are measured in nautical miles.
const NM_SPHERE: HaversineMeasure = HaversineMeasure::new(60.0 * 180.0 / PI);

// geo uses (x, y) = (longitude, latitude)
fn coord(c: Coordinate) -> Coord<f64> {
    Coord {
        x: c.longitude,
        y: c.latitude,
    }
}

fn point(c: Coordinate) -> Point<f64> {
    Point::from(coord(c))
}

/// Returns `count` segments bounded by `min` and [`Options::max_segments`].
///
/// Counts that don't fit are limited to the maximum.
fn segment_count(count: f64, min: usize, options: &Options) -> usize {
    // saturates and maps NaN to zero
    let count = (count as usize).max(min);

    if count > options.max_segments {
        warn!("limiting {count} segments to {}", options.max_segments);
        options.max_segments
    } else {
        count
    }
}

/// Approximates a circle by a closed ring.
///
/// The circle is drawn in the plane of longitude and latitude with a
/// latitude radius of one degree per 60 nautical miles. The longitude radius
/// is stretched by the latitude of the center.
pub fn circle(center: Coordinate, radius: f64, options: &Options) -> Polygon<f64> {
    let r_lat = radius / 60.0;
    let cos_lat = center.latitude.to_radians().cos();
    let r_lon = if cos_lat != 0.0 { r_lat / cos_lat } else { 0.0 };

    let num_points = segment_count(
        radius * options.circle_segments_per_nm,
        options.circle_min_segments,
        options,
    );

    let mut coords = Vec::with_capacity(num_points.saturating_add(1));

    for i in 0..num_points {
        let angle = (360.0 / num_points as f64 * i as f64).to_radians();
        coords.push(Coord {
            x: center.longitude + r_lon * angle.cos(),
            y: center.latitude + r_lat * angle.sin(),
        });
    }

    // close the circle
    if let Some(first) = coords.first() {
        coords.push(*first);
    }

    Polygon::new(LineString::from(coords), vec![])
}

/// Returns the signed sweep from the `start` to the `end` bearing in
/// degrees.
///
/// A clockwise sweep is never negative and a counter-clockwise sweep never
/// positive.
fn calculate_arc_sweep(start: f64, end: f64, direction: Direction) -> f64 {
    let diff = end - start;

    match direction {
        Direction::Clockwise if diff < 0.0 => diff + 360.0,
        Direction::CounterClockwise if diff > 0.0 => diff - 360.0,
        _ => diff,
    }
}

/// Interpolates the arc around `center` from `start` to `end`.
///
/// The radius is the distance of `start`. Both ends are kept as given.
pub fn arc_by_points(
    center: Coordinate,
    start: Coordinate,
    end: Coordinate,
    direction: Direction,
    options: &Options,
) -> LineString<f64> {
    let center = point(center);
    let radius = NM_SPHERE.distance(center, point(start));
    let start_bearing = NM_SPHERE.bearing(center, point(start));
    let end_bearing = NM_SPHERE.bearing(center, point(end));

    let sweep = calculate_arc_sweep(start_bearing, end_bearing, direction);
    let num_segments = if options.arc_step_deg > 0.0 {
        segment_count(sweep.abs() / options.arc_step_deg, 2, options)
    } else {
        2
    };

    let mut coords = Vec::with_capacity(num_segments.saturating_add(1));
    coords.push(coord(start));

    for i in 1..num_segments {
        let fraction = i as f64 / num_segments as f64;
        let bearing = start_bearing + fraction * sweep;

        coords.push(NM_SPHERE.destination(center, bearing, radius).0);
    }

    coords.push(coord(end));

    LineString::from(coords)
}

/// Interpolates the arc of `radius` nautical miles from the `start` to the
/// `end` angle in degrees.
pub fn arc(
    center: Coordinate,
    radius: f64,
    start: f64,
    end: f64,
    direction: Direction,
    options: &Options,
) -> LineString<f64> {
    let endpoint = |angle: f64| {
        let p = NM_SPHERE.destination(point(center), angle, radius);
        Coordinate::new(p.y(), p.x())
    };

    arc_by_points(center, endpoint(start), endpoint(end), direction, options)
}

/// Reconstructs one primitive.
///
/// Returns `None` for curves without center.
pub fn reconstruct(primitive: &Primitive, options: &Options) -> Option<Geometry<f64>> {
    match *primitive {
        Primitive::Point(c) => Some(Point::from(coord(c)).into()),
        Primitive::Circle { center, radius } => {
            center.map(|center| circle(center, radius, options).into())
        }
        Primitive::Arc {
            center,
            radius,
            start,
            end,
            direction,
        } => center.map(|center| arc(center, radius, start, end, direction, options).into()),
        Primitive::ArcByPoints {
            center,
            start,
            end,
            direction,
        } => center.map(|center| arc_by_points(center, start, end, direction, options).into()),
    }
}

/// Combines the primitives of one airspace into its geometry.
///
/// A single curve is used as is. Otherwise the coordinates of all
/// primitives are joined into a polygon, or a multi point if there are
/// fewer than three. A circle among several primitives replaces everything
/// before it and ends the boundary.
pub fn combine(primitives: &[Primitive], options: &Options) -> Option<Geometry<f64>> {
    if let [primitive] = primitives {
        match reconstruct(primitive, options) {
            Some(Geometry::Point(_)) | None => {}
            geometry => return geometry,
        }
    }

    let mut coords: Vec<Coord<f64>> = Vec::new();

    for primitive in primitives {
        match reconstruct(primitive, options) {
            Some(Geometry::Point(p)) => coords.push(p.0),
            Some(Geometry::LineString(line)) => coords.extend(line.0),
            Some(Geometry::Polygon(polygon)) => {
                coords = polygon.exterior().0.clone();
                break;
            }
            _ => {}
        }
    }

    match coords.len() {
        0 => None,
        1 | 2 => Some(MultiPoint::from(coords).into()),
        _ => {
            // close the polygon
            if coords.first() != coords.last() {
                coords.push(coords[0]);
            }
            Some(Polygon::new(LineString::from(coords), vec![]).into())
        }
    }
}
