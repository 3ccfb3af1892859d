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

use crate::coordinate::{canonicalize, collapse_whitespace};
use crate::line::{classify, is_comment_or_empty, Directive, DirectiveKind};

/// Renders the directive in canonical form.
///
/// ```
/// use openair::{canonical, Directive};
///
/// let v = Directive::new(1, "V", "X = 48:0:0N 2:0:0E");
/// assert_eq!(canonical(&v), "V X=48:00:00 N 002:00:00 E");
/// ```
pub fn canonical(directive: &Directive) -> String {
    let content = &directive.content;

    let content = match directive.kind() {
        DirectiveKind::Point => canonicalize(content),
        DirectiveKind::ArcByPoints => content
            .split(',')
            .map(|c| canonicalize(c.trim()))
            .collect::<Vec<_>>()
            .join(", "),
        DirectiveKind::Arc => content
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(", "),
        DirectiveKind::Variable => match directive.assignment() {
            Some(("X", value)) => format!("X={}", canonicalize(value)),
            Some(("D", value)) => format!("D={value}"),
            _ => collapse_whitespace(content),
        },
        _ => collapse_whitespace(content),
    };

    if content.is_empty() {
        directive.name.clone()
    } else {
        format!("{} {}", directive.name, content)
    }
}

/// Renders a whole OpenAir text in canonical form.
///
/// Comment and blank lines are kept with their whitespace collapsed. Every
/// `AC` but the first is preceded by a blank line.
pub fn render(text: &str) -> String {
    let mut lines = Vec::new();
    let mut first = true;

    for (i, line) in text.lines().enumerate() {
        if is_comment_or_empty(line) {
            lines.push(collapse_whitespace(line));
            continue;
        }

        let (name, content) = classify(line);
        let directive = Directive::new(i + 1, name, content);

        if directive.kind() == DirectiveKind::Class && !first {
            lines.push(String::new());
        }

        lines.push(canonical(&directive));
        first = false;
    }

    lines.join("\n")
}
