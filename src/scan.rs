//! Python source scanner and rewriter.
//!
//! Finds every `def` and `class` header in a source file together
//! with the docstring sitting under it, runs each pair through the
//! conversion pipeline and splices the rendered docstrings back into
//! the original lines.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::Config;
use crate::engine::DocComment;
use crate::model::{Diagnostic, ElementKind, Rendered, Scope};

// A colon ends the header, optionally trailed by a quote-free comment.
static RE_HEADER_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#":(\s*#[^'"]*)?$"#).unwrap());

/// Where an element's docstring sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Docstring spans these line indexes, both inclusive.
    Existing(usize, usize),
    /// No docstring; the element header ends on this line.
    Missing(usize),
}

/// One scanned element, ready to render.
#[derive(Debug)]
pub struct ScannedElement {
    pub comment: DocComment,
    pub location: Location,
}

/// A scanned source file with its elements.
#[derive(Debug)]
pub struct SourceFile {
    /// File stem, used when a module docstring gets inserted.
    stem: String,
    lines: Vec<String>,
    elements: Vec<ScannedElement>,
}

impl SourceFile {
    pub fn read(path: &str, config: &Config) -> Result<SourceFile> {
        let source =
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        let stem = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("stdin");
        SourceFile::from_source(stem, &source, config)
    }

    /// Scan already-loaded source. `stem` names the module for the
    /// optional file comment.
    pub fn from_source(stem: &str, source: &str, config: &Config) -> Result<SourceFile> {
        let lines: Vec<String> = source.split_inclusive('\n').map(str::to_string).collect();
        let mut elements = scan(&lines, config)?;
        if config.init2class {
            promote_init(&mut elements);
        }
        Ok(SourceFile {
            stem: stem.to_string(),
            lines,
            elements,
        })
    }

    pub fn elements(&self) -> &[ScannedElement] {
        &self.elements
    }

    /// Produce the converted source. Elements that had a docstring get
    /// their span replaced, elements without one get the rendered text
    /// inserted right after the header line.
    pub fn rewrite(&self, config: &Config) -> Rendered {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut out: Vec<String> = Vec::new();
        if config.file_comment && !has_module_docstring(&self.lines) {
            out.push(format!("{0}\n{1}\n{0}\n", config.quotes, self.stem));
        }
        let mut last = 0;
        for element in &self.elements {
            let end = match element.location {
                Location::Missing(line) => {
                    out.extend_from_slice(&self.lines[last..=line]);
                    line
                }
                Location::Existing(start, end) => {
                    out.extend_from_slice(&self.lines[last..start]);
                    end
                }
            };
            let rendered = element.comment.generate(config);
            diagnostics.extend(rendered.diagnostics);
            out.extend(rendered.text.lines().map(|l| format!("{l}\n")));
            last = end + 1;
        }
        if last < self.lines.len() {
            out.extend_from_slice(&self.lines[last..]);
        }
        Rendered {
            text: out.concat(),
            diagnostics,
        }
    }
}

struct Slot {
    elem_raw: String,
    spaces: String,
    location: Location,
    docs_raw: Option<String>,
    before_lim: String,
}

/// Line scan for element headers and their docstrings.
///
/// A header may continue over several lines until its closing colon.
/// After the header the scanner waits for a docstring; any other
/// non-blank statement cancels the wait. A quote prefix like `r` is
/// cut off and remembered separately.
fn scan(lines: &[String], config: &Config) -> Result<Vec<ScannedElement>> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut reading_element = false;
    let mut reading_docs: Option<&'static str> = None;
    let mut waiting_docs = false;
    let mut elem = String::new();
    let mut spaces = String::new();
    let mut raw = String::new();
    let mut before_lim = String::new();
    let mut start = 0usize;

    for (i, ln) in lines.iter().enumerate() {
        let l = ln.trim();
        let mut header_ended = false;
        if reading_element {
            elem.push_str(l);
            if l.ends_with(':') {
                reading_element = false;
                header_ended = true;
            }
        } else if reading_docs.is_none() && is_element_start(l) {
            let name = element_name(l);
            if !config.scope_allowed(Scope::of(&name)) {
                // A skipped method's docstring must not be taken for
                // its class's, so the wait ends here.
                waiting_docs = false;
                continue;
            }
            elem = l.to_string();
            spaces = leading_whitespace(ln);
            if RE_HEADER_END.is_match(l) {
                header_ended = true;
            } else {
                reading_element = true;
            }
        }
        if header_ended {
            waiting_docs = true;
            slots.push(Slot {
                elem_raw: elem.clone(),
                spaces: spaces.clone(),
                location: Location::Missing(i),
                docs_raw: None,
                before_lim: String::new(),
            });
            continue;
        }
        if waiting_docs && (l.contains("\"\"\"") || l.contains("'''")) {
            if reading_docs.is_none() && !starts_docstring(l) {
                waiting_docs = false;
            } else if reading_docs.is_none() {
                start = i;
                let lim = delimiter_of(l);
                reading_docs = Some(lim);
                before_lim.clear();
                let mut line = ln.clone();
                if !l.starts_with(lim) {
                    if let (Some(idx), Some(abs)) = (l.find(lim), ln.find(lim)) {
                        before_lim = l[..idx].to_string();
                        line = format!("{}{}", &ln[..abs - idx], &ln[abs..]);
                    }
                }
                raw = line;
                if l.matches(lim).count() == 2 {
                    attach_docs(&mut slots, start, i, &mut raw, &mut before_lim);
                    reading_docs = None;
                    waiting_docs = false;
                }
            } else if let Some(lim) = reading_docs {
                raw.push_str(ln);
                if l.contains(lim) {
                    attach_docs(&mut slots, start, i, &mut raw, &mut before_lim);
                    reading_docs = None;
                    waiting_docs = false;
                }
            }
        } else if waiting_docs && !l.is_empty() && reading_docs.is_none() {
            waiting_docs = false;
        } else if reading_docs.is_some() {
            raw.push_str(ln);
        }
    }

    let mut kept = slots;
    if config.convert_only {
        kept.retain(|slot| slot.docs_raw.is_some());
    }
    let mut elements = Vec::with_capacity(kept.len());
    for slot in kept {
        let comment = DocComment::new(
            &slot.elem_raw,
            slot.docs_raw.as_deref(),
            &slot.spaces,
            &slot.before_lim,
            config,
        )?;
        elements.push(ScannedElement {
            comment,
            location: slot.location,
        });
    }
    Ok(elements)
}

fn attach_docs(
    slots: &mut [Slot],
    start: usize,
    end: usize,
    raw: &mut String,
    before_lim: &mut String,
) {
    if let Some(slot) = slots.last_mut() {
        slot.location = Location::Existing(start, end);
        slot.docs_raw = Some(std::mem::take(raw));
        slot.before_lim = std::mem::take(before_lim);
    }
}

fn is_element_start(l: &str) -> bool {
    l.starts_with("async def ") || l.starts_with("def ") || l.starts_with("class ")
}

fn element_name(l: &str) -> String {
    let rest = l
        .strip_prefix("async def ")
        .or_else(|| l.strip_prefix("def "))
        .or_else(|| l.strip_prefix("class "))
        .unwrap_or(l);
    rest.trim()
        .split(|c| c == '(' || c == ':')
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

fn leading_whitespace(ln: &str) -> String {
    ln[..ln.len() - ln.trim_start().len()].to_string()
}

/// True when the line opens a docstring, allowing up to two `r`, `u`
/// or `f` prefix characters before the quotes.
fn starts_docstring(l: &str) -> bool {
    let bytes = l.as_bytes();
    let mut skip = 0;
    while skip < 2 && skip < bytes.len() && matches!(bytes[skip], b'r' | b'u' | b'f') {
        skip += 1;
    }
    l[skip..].starts_with("\"\"\"") || l[skip..].starts_with("'''")
}

/// Of the two delimiters, the one appearing first on the line wins.
fn delimiter_of(l: &str) -> &'static str {
    match (l.find("\"\"\""), l.find("'''")) {
        (Some(double), Some(single)) if double < single => "\"\"\"",
        (Some(_), Some(_)) => "'''",
        (None, Some(_)) => "'''",
        _ => "\"\"\"",
    }
}

/// When the first class has no docstring but its `__init__` does, the
/// two change places: the `__init__` content is rendered at the class
/// position and the generated class one-liner takes the `__init__`
/// position.
fn promote_init(elements: &mut [ScannedElement]) -> bool {
    let mut class_idx = None;
    let mut init_idx = None;
    for (i, element) in elements.iter().enumerate() {
        if class_idx.is_none() {
            if element.comment.element.kind == ElementKind::Class {
                class_idx = Some(i);
            }
        } else if element.comment.element.name == "__init__" {
            init_idx = Some(i);
            break;
        }
    }
    let (Some(class_idx), Some(init_idx)) = (class_idx, init_idx) else {
        return false;
    };
    if !matches!(elements[class_idx].location, Location::Missing(_))
        || !matches!(elements[init_idx].location, Location::Existing(_, _))
    {
        return false;
    }
    let (head, tail) = elements.split_at_mut(init_idx);
    let class_slot = &mut head[class_idx];
    let init_slot = &mut tail[0];
    std::mem::swap(
        &mut class_slot.comment.out_spaces,
        &mut init_slot.comment.out_spaces,
    );
    std::mem::swap(&mut class_slot.comment, &mut init_slot.comment);
    true
}

/// Module docstring check for the file comment option. Blank lines,
/// encoding comments, plain comments and imports may precede it.
fn has_module_docstring(lines: &[String]) -> bool {
    let mut in_docstring = false;
    let mut delimiter = "";
    for ln in lines {
        let stripped = ln.trim();
        if stripped.is_empty() {
            continue;
        }
        let lower = stripped.to_lowercase();
        if stripped.starts_with('#') && (lower.contains("coding") || lower.contains("encoding")) {
            continue;
        }
        if stripped.starts_with("import ") || stripped.starts_with("from ") {
            continue;
        }
        if in_docstring {
            if stripped.contains(delimiter) {
                return true;
            }
            continue;
        }
        if starts_docstring(stripped) {
            let lim = delimiter_of(stripped);
            if stripped.matches(lim).count() >= 2 {
                return true;
            }
            in_docstring = true;
            delimiter = lim;
            continue;
        }
        if is_element_start(stripped) {
            return false;
        }
        if !stripped.starts_with('#') {
            return false;
        }
    }
    false
}
