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

//! Degree-minute-second coordinate grammar.
//!
//! OpenAir writes coordinates as `DD:MM:SS[.frac] N DDD:MM:SS[.frac] E`. Two
//! grammars are implemented by the same scanner:
//!
//! - [`Grammar::Strict`] is used to validate input. Latitude degrees and
//!   minutes have exactly two digits, longitude degrees one to three. The
//!   degree, minute and second values are bounds checked.
//! - [`Grammar::Lenient`] accepts whatever the canonical renderer can
//!   reformat: surrounding whitespace, one to three degree digits and one or
//!   two minute digits on both halves, no bounds.
//!
//! Seconds may be `60`. Several feeds round seconds up instead of carrying
//! into the minutes and the value is accepted as is.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoordinateFault, Error};

/// Coordinate value in decimal degrees.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// Latitude in the range from -90° (south) to 90° (north).
    pub latitude: f64,

    /// Longitude in the range from -180° (west) to 180° (east).
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses a coordinate with the given grammar.
    pub fn parse_with(s: &str, grammar: Grammar) -> Result<Self, Error> {
        Dms::parse(s, grammar).map(|dms| dms.to_coordinate())
    }

    /// Parses a coordinate with the lenient grammar and without bounds.
    ///
    /// This accepts every coordinate [`canonicalize`] can render.
    pub fn parse_lenient(s: &str) -> Result<Self, Error> {
        Self::parse_with(s, Grammar::Lenient)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parses and validates a coordinate with the strict grammar.
    ///
    /// ```
    /// use openair::Coordinate;
    ///
    /// let c: Coordinate = "53:30:00 N 009:59:60 E".parse().unwrap();
    /// assert_eq!(c.latitude, 53.5);
    /// assert!((c.longitude - 10.0).abs() < 1e-9);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, Grammar::Strict)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({0}, {1})", self.latitude, self.longitude)
    }
}

/// The grammar a coordinate is scanned with.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Grammar {
    Strict,
    Lenient,
}

/// One half of a coordinate as written.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Angle {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
    pub hemisphere: char,
}

impl Angle {
    pub fn to_decimal(&self) -> f64 {
        let decimal =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;

        match self.hemisphere {
            'S' | 'W' => -decimal,
            _ => decimal,
        }
    }
}

/// A coordinate in degrees, minutes and seconds.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Dms {
    pub latitude: Angle,
    pub longitude: Angle,
}

impl Dms {
    /// Scans `s` with the given grammar.
    pub fn parse(s: &str, grammar: Grammar) -> Result<Self, Error> {
        let fail = |fault| Error::InvalidCoordinate {
            coordinate: s.to_string(),
            fault,
            index: None,
        };

        let mut scanner = Scanner::new(s);
        let strict = grammar == Grammar::Strict;

        if !strict {
            scanner.skip_whitespace();
        }

        let latitude = scanner
            .angle(if strict { (2, 2) } else { (1, 3) }, strict, &['N', 'S'])
            .map_err(fail)?;

        if scanner.skip_whitespace() == 0 {
            return Err(fail(scanner.expected("whitespace")));
        }

        let longitude = scanner
            .angle((1, 3), strict, &['E', 'W'])
            .map_err(fail)?;

        if !strict {
            scanner.skip_whitespace();
        }

        if !scanner.at_end() {
            return Err(fail(scanner.expected("end of coordinate")));
        }

        let dms = Self {
            latitude,
            longitude,
        };

        if strict {
            dms.check_bounds().map_err(fail)?;
        }

        Ok(dms)
    }

    fn check_bounds(&self) -> Result<(), CoordinateFault> {
        let out_of_range = |field, value, bound| CoordinateFault::OutOfRange {
            field,
            value,
            bound,
        };

        let lat = &self.latitude;
        let lon = &self.longitude;

        if lat.degrees > 90 {
            Err(out_of_range("latitude degrees", lat.degrees as f64, "between 0 and 90"))
        } else if lat.minutes >= 60 {
            Err(out_of_range("latitude minutes", lat.minutes as f64, "less than 60"))
        } else if lat.seconds > 60.0 {
            Err(out_of_range("latitude seconds", lat.seconds, "at most 60"))
        } else if lon.degrees > 180 {
            Err(out_of_range("longitude degrees", lon.degrees as f64, "between 0 and 180"))
        } else if lon.minutes >= 60 {
            Err(out_of_range("longitude minutes", lon.minutes as f64, "less than 60"))
        } else if lon.seconds > 60.0 {
            Err(out_of_range("longitude seconds", lon.seconds, "at most 60"))
        } else if lat.to_decimal().abs() > 90.0 {
            Err(out_of_range("latitude", lat.to_decimal(), "between -90 and 90"))
        } else if lon.to_decimal().abs() > 180.0 {
            Err(out_of_range("longitude", lon.to_decimal(), "between -180 and 180"))
        } else {
            Ok(())
        }
    }

    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude.to_decimal(),
            longitude: self.longitude.to_decimal(),
        }
    }
}

impl fmt::Display for Dms {
    /// Renders the canonical `DD:MM:SS H DDD:MM:SS H` form.
    ///
    /// Seconds are rounded half to even.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = &self.latitude;
        let lon = &self.longitude;

        write!(
            f,
            "{:02}:{:02}:{:02} {} {:03}:{:02}:{:02} {}",
            lat.degrees,
            lat.minutes,
            lat.seconds.round_ties_even() as u32,
            lat.hemisphere,
            lon.degrees,
            lon.minutes,
            lon.seconds.round_ties_even() as u32,
            lon.hemisphere
        )
    }
}

/// Re-renders a coordinate in canonical form.
///
/// Input that doesn't match the lenient grammar is returned with its
/// whitespace collapsed.
///
/// ```
/// use openair::canonicalize;
///
/// assert_eq!(canonicalize("48:50:8.5N 7:2:5.7E"), "48:50:08 N 007:02:06 E");
/// assert_eq!(canonicalize("  not   a coordinate "), "not a coordinate");
/// ```
pub fn canonicalize(s: &str) -> String {
    match Dms::parse(s, Grammar::Lenient) {
        Ok(dms) => dms.to_string(),
        Err(_) => collapse_whitespace(s),
    }
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expected(&self, expected: &'static str) -> CoordinateFault {
        CoordinateFault::Syntax {
            position: self.pos,
            expected,
        }
    }

    /// Skips whitespace and returns how many bytes were skipped.
    fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Reads between `min` and `max` digits.
    fn digits(
        &mut self,
        (min, max): (usize, usize),
        expected: &'static str,
    ) -> Result<&'a str, CoordinateFault> {
        let start = self.pos;
        while self.pos - start < max && self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }

        let n = self.pos - start;
        if n < min || self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos = start;
            return Err(self.expected(expected));
        }

        // only ASCII digits were consumed
        Ok(std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default())
    }

    fn byte(&mut self, byte: u8, expected: &'static str) -> Result<(), CoordinateFault> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn angle(
        &mut self,
        degree_digits: (usize, usize),
        strict: bool,
        hemispheres: &[char],
    ) -> Result<Angle, CoordinateFault> {
        let degrees = self.digits(degree_digits, "degrees")?;
        self.byte(b':', "\":\" after degrees")?;
        let minutes = self.digits(if strict { (2, 2) } else { (1, 2) }, "minutes")?;
        self.byte(b':', "\":\" after minutes")?;
        let seconds_start = self.pos;
        self.digits((1, 2), "seconds")?;

        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.digits((1, usize::MAX), "fraction of seconds")?;
        }

        let seconds = std::str::from_utf8(&self.bytes[seconds_start..self.pos]).unwrap_or("0");

        self.skip_whitespace();

        let hemisphere = match self.peek().map(char::from) {
            Some(c) if hemispheres.contains(&c) => {
                self.pos += 1;
                c
            }
            _ => {
                return Err(self.expected(if hemispheres[0] == 'N' {
                    "N or S"
                } else {
                    "E or W"
                }))
            }
        };

        Ok(Angle {
            // the digit counts keep these within their types
            degrees: degrees.parse().unwrap_or_default(),
            minutes: minutes.parse().unwrap_or_default(),
            seconds: seconds.parse().unwrap_or_default(),
            hemisphere,
        })
    }
}
