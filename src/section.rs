//! Section based docstring vocabulary, Google and numpydoc.
//!
//! Both dialects organize content under named sections, Google with a
//! `Header:` line and numpydoc with a header underlined by dashes.
//! This module locates sections, splits their bodies into entries and
//! renders section headers back out. The small text helpers at the
//! bottom are shared with detection and the groups parser.

use crate::model::{DocParam, RaiseEntry, ReturnEntry};

/// Keywords that mark a line as numpydoc flavored even without a
/// section underline nearby.
pub(crate) static NUMPYDOC_KEYWORDS: [&str; 4] =
    [":math:", ".. math::", "see also", ".. image::"];

/// Sections carried over verbatim when converting out of numpydoc.
static UNMANAGED_KEYS: [&str; 7] = ["also", "ref", "note", "other", "example", "method", "attr"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Google,
    Numpydoc,
}

/// Vocabulary and line layout of one section dialect.
#[derive(Debug)]
pub struct SectionTools {
    kind: SectionKind,
    /// Section key to lowercase section name.
    keys: &'static [(&'static str, &'static str)],
    /// Section names in table order.
    names: &'static [&'static str],
    /// Section key to rendered header title.
    headers: &'static [(&'static str, &'static str)],
}

static GOOGLE: SectionTools = SectionTools {
    kind: SectionKind::Google,
    keys: &[
        ("attr", "attributes"),
        ("param", "args"),
        ("raise", "raises"),
        ("return", "returns"),
        ("yield", "yields"),
    ],
    names: &["attributes", "args", "raises", "returns", "yields"],
    headers: &[("param", "Args"), ("return", "Returns"), ("raise", "Raises")],
};

static NUMPYDOC: SectionTools = SectionTools {
    kind: SectionKind::Numpydoc,
    keys: &[
        ("also", "see also"),
        ("attr", "attributes"),
        ("example", "examples"),
        ("method", "methods"),
        ("note", "notes"),
        ("other", "other parameters"),
        ("param", "parameters"),
        ("raise", "raises"),
        ("ref", "references"),
        ("return", "returns"),
    ],
    names: &[
        "see also",
        "attributes",
        "examples",
        "methods",
        "notes",
        "other parameters",
        "parameters",
        "raises",
        "references",
        "returns",
    ],
    headers: &[("param", "Parameters"), ("return", "Returns"), ("raise", "Raises")],
};

pub fn google() -> &'static SectionTools {
    &GOOGLE
}

pub fn numpydoc() -> &'static SectionTools {
    &NUMPYDOC
}

impl SectionTools {
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    fn section_name(&self, key: &str) -> Option<&'static str> {
        self.keys.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Lines taken by a section header, the underline included.
    fn header_lines(&self) -> usize {
        match self.kind {
            SectionKind::Google => 1,
            SectionKind::Numpydoc => 2,
        }
    }

    /// Index of the next section header within `lines`.
    ///
    /// Google accepts any `name:` line. Numpydoc wants the name
    /// underlined by dashes on the following line, except at the very
    /// end of the text where a bare trailing name is accepted too.
    pub fn next_section_start(&self, lines: &[&str]) -> Option<usize> {
        match self.kind {
            SectionKind::Google => lines.iter().position(|line| {
                let lowered = line.trim().to_lowercase();
                self.names.iter().any(|name| lowered == format!("{name}:"))
            }),
            SectionKind::Numpydoc => {
                let mut start: Option<usize> = None;
                for (i, line) in lines.iter().enumerate() {
                    if start.is_some() {
                        let stripped = line.trim();
                        if !stripped.is_empty() && stripped.chars().all(|c| c == '-') {
                            return start;
                        }
                        start = None;
                    }
                    if isin_alone(self.names, line) {
                        start = Some(i);
                    }
                }
                start
            }
        }
    }

    /// Line index where the named section starts, if present.
    fn section_key_line(&self, lines: &[&str], key: &str) -> Option<usize> {
        let name = self.section_name(key)?;
        let wanted = match self.kind {
            SectionKind::Google => format!("{name}:"),
            SectionKind::Numpydoc => name.to_string(),
        };
        let mut init = 0usize;
        while init <= lines.len() {
            let start = self.next_section_start(lines.get(init..).unwrap_or(&[]))?;
            init += start;
            if lines[init].trim().to_lowercase() == wanted {
                return Some(init);
            }
            init += 1;
        }
        None
    }

    /// Character index of the first section header, for splitting the
    /// description off the front of a docstring.
    pub fn section_start_index(&self, data: &str) -> Option<usize> {
        let lines: Vec<&str> = data.lines().collect();
        let start = self.next_section_start(&lines)?;
        Some(lines[..start].iter().map(|l| l.len() + 1).sum())
    }

    /// Entries of the named section, in order of appearance.
    pub fn list_key(&self, data: &str, key: &str) -> Vec<DocParam> {
        let lines: Vec<&str> = data.lines().collect();
        let Some(init) = self.section_key_line(&lines, key) else {
            return Vec::new();
        };
        let Some(start) = self.next_section_start(lines.get(init..).unwrap_or(&[])) else {
            return Vec::new();
        };
        let spaces = leading_spaces(lines[init + start]);
        let end = self.next_section_start(lines.get(init + start + 1..).unwrap_or(&[]));
        let content_start = init + start + self.header_lines();
        let content_end = match end {
            Some(e) => init + e,
            None => lines.len(),
        };
        let content = lines.get(content_start..content_end).unwrap_or(&[]);
        match self.kind {
            SectionKind::Google => google_entries(spaces, content),
            SectionKind::Numpydoc => numpydoc_entries(spaces, content),
        }
    }

    pub fn return_list(&self, data: &str) -> Vec<ReturnEntry> {
        self.list_key(data, "return")
            .into_iter()
            .map(|entry| match entry.ptype {
                None => ReturnEntry {
                    name: None,
                    description: entry.description.trim().to_string(),
                    rtype: entry.name,
                },
                Some(ptype) => ReturnEntry {
                    name: entry.name,
                    description: entry.description,
                    rtype: Some(ptype),
                },
            })
            .collect()
    }

    pub fn raise_list(&self, data: &str) -> Vec<RaiseEntry> {
        self.list_key(data, "raise")
            .into_iter()
            .map(|entry| RaiseEntry {
                name: entry.name,
                description: entry.description,
            })
            .collect()
    }

    /// Sections outside the managed set, dedented and concatenated so
    /// they can be re-emitted after the generated content.
    pub fn raw_not_managed(&self, data: &str, excluded: &[String]) -> String {
        let elems: Vec<&str> = UNMANAGED_KEYS
            .iter()
            .filter_map(|key| self.section_name(key))
            .collect();
        let excluded: Vec<&str> = excluded
            .iter()
            .filter_map(|key| self.section_name(key))
            .collect();
        let lines: Vec<&str> = data.lines().collect();
        let mut raw = String::new();
        let mut init = 0usize;
        while init <= lines.len() {
            let Some(start) = self.next_section_start(lines.get(init..).unwrap_or(&[])) else {
                break;
            };
            init += start;
            if isin_alone(&elems, lines[init]) && !isin_alone(&excluded, lines[init]) {
                let spaces = leading_spaces(lines[init]);
                let upto = match self.next_section_start(lines.get(init + 1..).unwrap_or(&[])) {
                    Some(e) => init + e,
                    None => lines.len(),
                };
                let section: Vec<String> = lines
                    .get(init..upto)
                    .unwrap_or(&[])
                    .iter()
                    .map(|line| line.replacen(spaces, "", 1).trim_end().to_string())
                    .collect();
                raw.push_str(&section.join("\n"));
                raw.push('\n');
            }
            init += 2;
        }
        raw
    }

    /// Rendered header for the named section.
    pub fn key_section_header(&self, key: &str, spaces: &str) -> String {
        let Some((_, title)) = self.headers.iter().find(|(k, _)| *k == key) else {
            return String::new();
        };
        match self.kind {
            SectionKind::Google => format!("{spaces}{title}:\n"),
            SectionKind::Numpydoc => {
                format!("{spaces}{title}\n{spaces}{}\n", "-".repeat(title.len()))
            }
        }
    }
}

/// Entry splitter for a numpydoc section body. A line at the section
/// column opens an entry, `name : type`, and deeper lines accumulate
/// into its description.
fn numpydoc_entries(spaces: &str, lines: &[&str]) -> Vec<DocParam> {
    let mut entries = Vec::new();
    let mut parse_key = false;
    let mut key: Option<String> = None;
    let mut ptype: Option<String> = None;
    let mut desc = String::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let curr_spaces = leading_spaces(line);
        if curr_spaces.len() == spaces.len() {
            if parse_key {
                entries.push(DocParam {
                    name: key.clone(),
                    description: desc.clone(),
                    ptype: ptype.clone(),
                });
            }
            match line.split_once(':') {
                Some((left, right)) => {
                    key = Some(left.trim().to_string());
                    ptype = Some(right.trim().to_string());
                }
                None => {
                    key = Some(line.trim().to_string());
                    ptype = None;
                }
            }
            desc = String::new();
            parse_key = true;
        } else {
            let mut text = (*line).to_string();
            if curr_spaces.len() > spaces.len() {
                text = text.replacen(spaces, "", 1);
            }
            if !desc.is_empty() {
                desc.push('\n');
            }
            desc.push_str(&text);
        }
    }
    if parse_key {
        entries.push(DocParam {
            name: key,
            description: desc,
            ptype,
        });
    }
    entries
}

/// Entry splitter for a Google section body. The column of the first
/// content line sets the entry column, `name (type): desc` opens an
/// entry and everything else accumulates into the description.
fn google_entries(spaces: &str, lines: &[&str]) -> Vec<DocParam> {
    let mut entries = Vec::new();
    let mut parse_key = false;
    let mut key: Option<String> = None;
    let mut ptype: Option<String> = None;
    let mut desc = String::new();
    let mut param_spaces = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let curr_spaces = leading_spaces(line).len();
        if param_spaces == 0 {
            param_spaces = curr_spaces;
        }
        if curr_spaces == param_spaces && line.contains(':') {
            if parse_key {
                entries.push(DocParam {
                    name: key.clone(),
                    description: desc.clone(),
                    ptype: ptype.clone(),
                });
            }
            let (left, right) = match line.split_once(':') {
                Some((left, right)) => (left, right),
                None => (*line, ""),
            };
            let mut name = left.trim().to_string();
            ptype = None;
            if name.contains('(') && name.contains(')') {
                let tstart = name.find('(').map(|i| i + 1).unwrap_or(0);
                let mut tend = name.find(')').unwrap_or(name.len());
                if let Some(comma) = name.find(',') {
                    tend = comma;
                }
                let inner = if tstart <= tend { &name[tstart..tend] } else { "" };
                ptype = Some(inner.trim().to_string());
                name = name[..tstart - 1].trim().to_string();
            }
            key = Some(name);
            desc = right.trim().to_string();
            parse_key = true;
        } else {
            let mut text = (*line).to_string();
            if curr_spaces > spaces.len() {
                text = text.replacen(spaces, "", 1);
            }
            if !desc.is_empty() {
                desc.push('\n');
            }
            desc.push_str(&text);
        }
    }
    if parse_key || !desc.is_empty() {
        entries.push(DocParam {
            name: key,
            description: desc,
            ptype,
        });
    }
    entries
}

// -- Text helpers -------------------------------------------------------------

/// Leading whitespace of a line.
pub(crate) fn leading_spaces(data: &str) -> &str {
    &data[..data.len() - data.trim_start().len()]
}

/// True when the stripped, lowercased line equals one of `elems`.
pub(crate) fn isin_alone(elems: &[&str], line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    elems.iter().any(|e| lowered == e.to_lowercase())
}

/// True when the lowercased line starts with one of `elems`.
pub(crate) fn isin_start(elems: &[&str], line: &str) -> bool {
    let lowered = line.trim_start().to_lowercase();
    elems.iter().any(|e| lowered.starts_with(e))
}

/// True when the lowercased line contains one of `elems`.
pub(crate) fn isin(elems: &[&str], line: &str) -> bool {
    let lowered = line.to_lowercase();
    elems.iter().any(|e| lowered.contains(e))
}
