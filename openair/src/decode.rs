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

//! Decoding of OpenAir bytes.
//!
//! Feeds are published in UTF-8 or one of the western single byte encodings.
//! The encodings are tried in a fixed order and the first one that decodes
//! the whole input wins.

use std::fmt;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Windows-1252 code points of the bytes 0x80 to 0x9F. The five undefined
/// bytes are `None`.
const WINDOWS_1252: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// A text encoding OpenAir input is decoded with.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Encoding {
    Utf8,
    Windows1252,
    /// ISO-8859-1, which maps every byte.
    Latin1,
}

impl Encoding {
    /// The order in which encodings are tried by [`decode`].
    pub const PREFERENCE: [Encoding; 3] = [Self::Utf8, Self::Windows1252, Self::Latin1];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Windows1252 => "Windows-1252",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Decodes all bytes or returns `None` if a byte sequence isn't valid
    /// in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).ok()
            }
            Self::Windows1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => WINDOWS_1252[(b - 0x80) as usize],
                    _ => Some(char::from(b)),
                })
                .collect(),
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decodes the bytes with the first encoding of [`Encoding::PREFERENCE`]
/// that succeeds.
///
/// ```
/// use openair::{decode, Encoding};
///
/// // "Zürich" in Windows-1252
/// let (text, encoding) = decode(b"AN Z\xFCrich").unwrap();
/// assert_eq!(text, "AN Zürich");
/// assert_eq!(encoding, Encoding::Windows1252);
/// ```
pub fn decode(bytes: &[u8]) -> Result<(String, Encoding), Error> {
    decode_with(bytes, &Encoding::PREFERENCE)
}

/// Decodes the bytes with the first of the given encodings that succeeds.
pub fn decode_with(bytes: &[u8], encodings: &[Encoding]) -> Result<(String, Encoding), Error> {
    for encoding in encodings {
        if let Some(text) = encoding.decode(bytes) {
            debug!("decoded {} bytes as {encoding}", bytes.len());
            return Ok((text, *encoding));
        }
    }

    Err(Error::UnreadableEncoding {
        attempted: encodings.iter().map(Encoding::name).collect(),
    })
}
