// Copyright 2025 Chris Custine
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

//! Popup content attached to rendered features.
//!
//! A popup is kept as structured lines so that the desktop surface can show
//! plain text while [`Popup::to_html`] produces the rich-text form. Feature
//! property values are untrusted and are always escaped in the HTML form.

use chrono::{Local, TimeZone};
use std::fmt::{self, Write as _};

/// One line of popup text: `label: value suffix`.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLine {
    pub label: Option<&'static str>,
    pub value: String,
    pub suffix: Option<&'static str>,
}

impl PopupLine {
    #[must_use]
    pub fn labeled(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label: Some(label),
            value: value.into(),
            suffix: None,
        }
    }

    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
            suffix: None,
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = Some(suffix);
        self
    }

    fn write_to(&self, out: &mut String, escape: bool) {
        if let Some(label) = self.label {
            out.push_str(label);
            out.push_str(": ");
        }
        if escape {
            out.push_str(&escape_html(&self.value));
        } else {
            out.push_str(&self.value);
        }
        if let Some(suffix) = self.suffix {
            out.push(' ');
            out.push_str(suffix);
        }
    }
}

impl fmt::Display for PopupLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, false);
        f.write_str(&out)
    }
}

/// Informational text shown when a rendered shape is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub heading: PopupLine,
    /// Horizontal rule between heading and body.
    pub rule: bool,
    pub lines: Vec<PopupLine>,
}

impl Popup {
    #[must_use]
    pub fn new(heading: PopupLine) -> Self {
        Self {
            heading,
            rule: false,
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self) -> Self {
        self.rule = true;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: PopupLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Plain text, one line per row.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = self.heading.to_string();
        for line in &self.lines {
            out.push('\n');
            line.write_to(&mut out, false);
        }
        out
    }

    /// Rich-text form with every interpolated value escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::from("<h3>");
        self.heading.write_to(&mut out, true);
        out.push_str("</h3>");
        if self.rule {
            out.push_str("<hr>");
        }
        for line in &self.lines {
            out.push_str("<p>");
            line.write_to(&mut out, true);
            out.push_str("</p>");
        }
        out
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format an epoch-millisecond timestamp in the given time zone, e.g.
/// `3/14/2024, 9:26:53 PM`. Returns `None` for out-of-range timestamps.
#[must_use]
pub fn format_event_time<Tz>(epoch_ms: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let time = tz.timestamp_millis_opt(epoch_ms).single()?;
    let mut out = String::new();
    write!(out, "{}", time.format("%-m/%-d/%Y, %-I:%M:%S %p")).ok()?;
    Some(out)
}

/// [`format_event_time`] in the machine's local time zone.
#[must_use]
pub fn local_event_time(epoch_ms: i64) -> Option<String> {
    format_event_time(epoch_ms, &Local)
}
