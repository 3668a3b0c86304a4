//! Docstring dialects and input style detection.
//!
//! Three tag dialects share one marker scheme (a prefix glued onto the
//! key name) while Google and numpydoc group their content under
//! section headers. Detection first counts tag markers, then falls
//! back to scoring line shapes for the section and groups dialects.

use anyhow::{bail, Result};

use crate::section;

/// The docstring dialects the converter reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Javadoc,
    Rest,
    Cstyle,
    Groups,
    Google,
    Numpydoc,
    /// Input only. Nothing but the description is extracted.
    Unknown,
}

/// Tag markers of one tag dialect.
///
/// The `return` and `raise` tags accept a plural alias, listed longest
/// first so the longer form wins when both match at the same spot.
#[derive(Debug, Clone, Copy)]
pub struct TagMarkers {
    pub param: &'static str,
    pub ptype: &'static str,
    /// Marker written for the return tag in generated output.
    pub ret: &'static str,
    pub rtype: &'static str,
    /// Marker written for the raise tag in generated output.
    pub raises: &'static str,
    pub return_aliases: [&'static str; 2],
    pub raise_aliases: [&'static str; 2],
    /// Separator between a tag and the following description.
    pub sep: &'static str,
    /// Markers counted during detection, one per dialect key.
    count_markers: [&'static str; 6],
}

impl TagMarkers {
    /// Every marker that can open a tag line, for end-of-element scans.
    pub fn all(&self) -> [&'static str; 7] {
        [
            self.param,
            self.ptype,
            self.rtype,
            self.return_aliases[0],
            self.return_aliases[1],
            self.raise_aliases[0],
            self.raise_aliases[1],
        ]
    }
}

pub static JAVADOC_MARKERS: TagMarkers = TagMarkers {
    param: "@param",
    ptype: "@type",
    ret: "@return",
    rtype: "@rtype",
    raises: "@raise",
    return_aliases: ["@returns", "@return"],
    raise_aliases: ["@raises", "@raise"],
    sep: ":",
    count_markers: ["@param", "@type", "@returns", "@return", "@rtype", "@raise"],
};

pub static REST_MARKERS: TagMarkers = TagMarkers {
    param: ":param",
    ptype: ":type",
    ret: ":returns",
    rtype: ":rtype",
    raises: ":raises",
    return_aliases: [":returns", ":return"],
    raise_aliases: [":raises", ":raise"],
    sep: ":",
    count_markers: [":param", ":type", ":returns", ":returns", ":rtype", ":raises"],
};

pub static CSTYLE_MARKERS: TagMarkers = TagMarkers {
    param: "\\param",
    ptype: "\\type",
    ret: "\\return",
    rtype: "\\rtype",
    raises: "\\raise",
    return_aliases: ["\\returns", "\\return"],
    raise_aliases: ["\\raises", "\\raise"],
    sep: " ",
    count_markers: ["\\param", "\\type", "\\returns", "\\return", "\\rtype", "\\raise"],
};

/// Keywords opening a groups style parameter block.
pub static GROUPS_PARAM_KEYWORDS: [&str; 4] = ["params", "args", "parameters", "arguments"];
/// Keywords opening a groups style return block.
pub static GROUPS_RETURN_KEYWORDS: [&str; 2] = ["returns", "return"];
/// Keywords opening a groups style raises block.
pub static GROUPS_RAISE_KEYWORDS: [&str; 4] = ["raises", "exceptions", "raise", "exception"];

impl Style {
    pub fn from_name(name: &str) -> Result<Style> {
        match name {
            "javadoc" => Ok(Style::Javadoc),
            "reST" => Ok(Style::Rest),
            "cstyle" => Ok(Style::Cstyle),
            "groups" => Ok(Style::Groups),
            "google" => Ok(Style::Google),
            "numpydoc" => Ok(Style::Numpydoc),
            other => bail!("unknown docstring style: {other}"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::Javadoc => "javadoc",
            Style::Rest => "reST",
            Style::Cstyle => "cstyle",
            Style::Groups => "groups",
            Style::Google => "google",
            Style::Numpydoc => "numpydoc",
            Style::Unknown => "unknown",
        }
    }

    /// Tag markers of this dialect, when it is a tag dialect.
    pub fn markers(self) -> Option<&'static TagMarkers> {
        match self {
            Style::Javadoc => Some(&JAVADOC_MARKERS),
            Style::Rest => Some(&REST_MARKERS),
            Style::Cstyle => Some(&CSTYLE_MARKERS),
            _ => None,
        }
    }

    pub fn is_tag(self) -> bool {
        self.markers().is_some()
    }

    /// Detect the dialect of a docstring body.
    ///
    /// Tag dialects are ranked by how many of their markers occur in
    /// the text, first of equals winning in javadoc, reST, cstyle
    /// order. Without any tag marker the lines are scored against the
    /// section header shapes and the groups keywords.
    pub fn detect(data: &str) -> Style {
        let ranking = [
            (Style::Javadoc, &JAVADOC_MARKERS),
            (Style::Rest, &REST_MARKERS),
            (Style::Cstyle, &CSTYLE_MARKERS),
        ];
        let mut best = Style::Unknown;
        let mut best_count = 0usize;
        for (style, markers) in ranking {
            let count: usize = markers
                .count_markers
                .iter()
                .map(|marker| data.matches(marker).count())
                .sum();
            if count > best_count {
                best = style;
                best_count = count;
            }
        }
        if best_count > 0 {
            return best;
        }

        let mut found_groups = 0usize;
        let mut found_google = 0usize;
        let mut found_numpy = 0usize;
        let mut found_numpy_sep = 0usize;
        for line in data.trim().lines() {
            for keywords in [
                &GROUPS_PARAM_KEYWORDS[..],
                &GROUPS_RETURN_KEYWORDS[..],
                &GROUPS_RAISE_KEYWORDS[..],
            ] {
                if section::isin_start(keywords, line) {
                    found_groups += 1;
                }
            }
            for name in section::google().names() {
                if section::isin_start(&[name], line) {
                    found_google += 1;
                }
            }
            for name in section::numpydoc().names() {
                if section::isin_start(&[name], line) {
                    found_numpy += 1;
                }
            }
            let stripped = line.trim();
            if !stripped.is_empty() && stripped.chars().all(|c| c == '-') {
                found_numpy_sep += 1;
            } else if section::isin(&section::NUMPYDOC_KEYWORDS, line) {
                found_numpy += 1;
            }
        }
        if found_numpy > 0 && found_numpy_sep > 0 {
            Style::Numpydoc
        } else if found_google > 0 && found_google >= found_groups {
            Style::Google
        } else if found_groups > 0 {
            Style::Groups
        } else {
            Style::Unknown
        }
    }
}
