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

/// Parses a trimmed real number or returns a `SyntaxError` for the directive.
macro_rules! parse_real {
    ($directive:expr, $s:expr, $what:expr) => {{
        let s: &str = $s.trim();
        s.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| $crate::Error::SyntaxError {
                directive: $directive.to_string(),
                reason: format!("{} is not a number: \"{}\"", $what, s),
            })
    }};
}
