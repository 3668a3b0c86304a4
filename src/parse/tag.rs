//! Extraction for the tag dialects, javadoc, reST and cstyle.
//!
//! Tags sit at the start of a line. Parameters are collected line by
//! line so their order survives, while the return and raise parts are
//! located by scanning for marker positions the way the text flows.

use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

use crate::model::{Diagnostic, RaiseEntry};
use crate::style::TagMarkers;

static RE_FIRST_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\W*(\w+)").unwrap());
static RE_RAISE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([\w.]+)").unwrap());

/// Upper bound on scan rounds. A scan that does not advance is a bug,
/// this turns it into an error instead of a hang.
const MAX_SCAN_ROUNDS: usize = 10_000;

// -- Marker scanning ----------------------------------------------------------

fn at_line_start(data: &str, idx: usize) -> bool {
    let prefix = &data[..idx];
    prefix.trim_end_matches([' ', '\t']).ends_with('\n') || prefix.trim().is_empty()
}

/// Earliest line starting occurrence of any alias. On a shared
/// position the first listed alias wins, so longer forms go first.
fn find_marker(data: &str, aliases: &[&str]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for alias in aliases {
        let hit = data
            .match_indices(alias)
            .map(|(i, _)| i)
            .find(|&i| at_line_start(data, i));
        if let Some(i) = hit {
            match best {
                Some((seen, _)) if seen <= i => {}
                _ => best = Some((i, alias.len())),
            }
        }
    }
    best
}

/// Position of the next tag of any kind, for bounding descriptions.
pub fn next_marker_index(data: &str, markers: &TagMarkers) -> Option<usize> {
    find_marker(data, &markers.all()).map(|(idx, _)| idx)
}

// -- Parameters ---------------------------------------------------------------

/// Raw fields of one documented parameter.
#[derive(Debug, Default, Clone)]
pub struct TagEntry {
    /// Type named by a separate type tag.
    pub ptype: Option<String>,
    /// Type squeezed into the param tag itself, `:param str name:`.
    pub type_in_param: Option<String>,
    pub description: Option<String>,
}

enum Following {
    Param(String),
    PtypeOf(String),
    Other,
}

fn entry_mut<'a>(
    entries: &'a mut Vec<(String, TagEntry)>,
    name: &str,
) -> &'a mut TagEntry {
    if let Some(pos) = entries.iter().position(|(n, _)| n == name) {
        return &mut entries[pos].1;
    }
    entries.push((name.to_string(), TagEntry::default()));
    let last = entries.len() - 1;
    &mut entries[last].1
}

fn split_tag_line<'a>(line: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    line.split_once(sep)
}

fn parse_param_line(
    line: &str,
    markers: &TagMarkers,
    entries: &mut Vec<(String, TagEntry)>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Following {
    let rest = line.replacen(markers.param, "", 1);
    let rest = rest.trim();
    let Some((left, right)) = split_tag_line(rest, markers.sep) else {
        diagnostics.push(Diagnostic::new(format!(
            "malformed parameter tag, missing {:?} separator: {line:?}",
            markers.sep
        )));
        return Following::Other;
    };
    let words: Vec<&str> = left.split_whitespace().collect();
    let (type_in_param, name) = match words.as_slice() {
        [name] => (None, (*name).to_string()),
        [ptype, name] => (Some((*ptype).to_string()), (*name).to_string()),
        _ => {
            diagnostics.push(Diagnostic::new(format!(
                "could not read the parameter name in tag: {line:?}"
            )));
            return Following::Other;
        }
    };
    let description = {
        let trimmed = right.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };
    let entry = entry_mut(entries, &name);
    if type_in_param.is_some() {
        entry.type_in_param = type_in_param;
    }
    entry.description = description;
    Following::Param(name)
}

fn parse_type_line(
    line: &str,
    markers: &TagMarkers,
    entries: &mut Vec<(String, TagEntry)>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Following {
    let rest = line.replacen(markers.ptype, "", 1);
    let rest = rest.trim();
    let Some((left, right)) = split_tag_line(rest, markers.sep) else {
        diagnostics.push(Diagnostic::new(format!(
            "malformed type tag, missing {:?} separator: {line:?}",
            markers.sep
        )));
        return Following::Other;
    };
    let name = left.trim().to_string();
    if name.is_empty() {
        diagnostics.push(Diagnostic::new(format!(
            "could not read the parameter name in type tag: {line:?}"
        )));
        return Following::Other;
    }
    let ptype = right.trim();
    let entry = entry_mut(entries, &name);
    entry.ptype = if ptype.is_empty() {
        None
    } else {
        Some(ptype.to_string())
    };
    Following::PtypeOf(name)
}

/// Walk the docstring line by line and collect every parameter tag,
/// keeping the order of first appearance. Indented lines below a
/// param or type tag continue that parameter's description.
pub fn extract_params(
    data: &str,
    markers: &TagMarkers,
) -> (Vec<(String, TagEntry)>, Vec<Diagnostic>) {
    let mut entries: Vec<(String, TagEntry)> = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current = Following::Other;
    let other_tags: Vec<&str> = markers
        .raise_aliases
        .iter()
        .chain(markers.return_aliases.iter())
        .copied()
        .chain([markers.rtype])
        .collect();
    for line in data.lines() {
        let stripped = line.trim();
        if stripped.starts_with(markers.param) {
            current = parse_param_line(stripped, markers, &mut entries, &mut diagnostics);
        } else if stripped.starts_with(markers.ptype) {
            current = parse_type_line(stripped, markers, &mut entries, &mut diagnostics);
        } else if other_tags.iter().any(|tag| stripped.starts_with(tag)) {
            current = Following::Other;
        } else if let Following::Param(name) | Following::PtypeOf(name) = &current {
            if let Some(pos) = entries.iter().position(|(n, _)| n == name) {
                let desc = entries[pos].1.description.take().unwrap_or_default();
                entries[pos].1.description = Some(format!("{desc}\n{line}"));
            }
        }
    }
    (entries, diagnostics)
}

// -- Return -------------------------------------------------------------------

fn return_description_span(data: &str, markers: &TagMarkers) -> Option<(usize, Option<usize>)> {
    let (idx, len) = find_marker(data, &markers.return_aliases)?;
    let tail = &data[idx + len..];
    let word = RE_FIRST_WORD.captures(tail)?.get(1)?;
    let start = idx + len + word.start();
    let end = next_marker_index(&data[start..], markers).map(|e| start + e);
    Some((start, end))
}

fn return_type_span(data: &str, markers: &TagMarkers) -> Option<(usize, Option<usize>)> {
    let (_, desc_end) = return_description_span(data, markers)?;
    let desc_end = desc_end?;
    let idx = next_marker_index(&data[desc_end..], markers)?;
    if !data[desc_end + idx..].starts_with(markers.rtype) {
        return None;
    }
    let after = desc_end + idx + markers.rtype.len();
    let word = RE_FIRST_WORD.captures(&data[after..])?.get(1)?;
    let start = after + word.start();
    let end = next_marker_index(&data[start..], markers).map(|e| start + e);
    Some((start, end))
}

/// Return description and type, when tagged.
///
/// The type tag only counts when it directly follows the return
/// description, which is how these tags are written in practice.
pub fn extract_return(data: &str, markers: &TagMarkers) -> (Option<String>, Option<String>) {
    let text = return_description_span(data, markers).map(|(start, end)| match end {
        Some(end) => data[start..end].trim_end().to_string(),
        None => data[start..].trim_end().to_string(),
    });
    let rtype = return_type_span(data, markers).map(|(start, end)| match end {
        Some(end) => data[start..end].trim_end().to_string(),
        None => data[start..].trim_end().to_string(),
    });
    (text, rtype)
}

// -- Raises -------------------------------------------------------------------

/// Collect every raise tag with its exception name and description.
pub fn extract_raises(
    data: &str,
    markers: &TagMarkers,
) -> Result<(Vec<RaiseEntry>, Vec<Diagnostic>)> {
    let mut raises = Vec::new();
    let mut diagnostics = Vec::new();
    let mut rest = data;
    let mut rounds = 0usize;
    loop {
        rounds += 1;
        if rounds > MAX_SCAN_ROUNDS {
            bail!("raise tag scan did not finish after {MAX_SCAN_ROUNDS} rounds");
        }
        let Some((idx, len)) = find_marker(rest, &markers.raise_aliases) else {
            break;
        };
        let after = idx + len;
        let Some(name) = RE_RAISE_NAME
            .captures(rest[after..].trim_start())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
        else {
            diagnostics.push(Diagnostic::new(format!(
                "could not read the exception name after {:?}",
                &rest[idx..after]
            )));
            rest = &rest[after..];
            continue;
        };
        let name_start = match rest[after..].find(name) {
            Some(pos) => after + pos,
            None => {
                rest = &rest[after..];
                continue;
            }
        };
        let prev = name_start + name.len();
        let next = next_marker_index(&rest[prev..], markers);
        let mut description = String::new();
        if let Some(word) = RE_FIRST_WORD.captures(&rest[prev..]).and_then(|c| c.get(1)) {
            let bound = next.unwrap_or(rest.len() - prev);
            if word.start() < bound {
                description = rest[prev + word.start()..prev + bound].trim().to_string();
            }
        }
        raises.push(RaiseEntry {
            name: Some(name.to_string()),
            description,
        });
        match next {
            Some(n) => rest = &rest[prev + n..],
            None => break,
        }
    }
    Ok((raises, diagnostics))
}
