//! Merging what the docstring says with what the signature knows.
//!
//! The signature is the ground truth for which parameters exist and,
//! by default, for their types. The docstring contributes the prose.
//! Documented parameters missing from the signature are dropped, with
//! a diagnostic naming each one.

use crate::config::Config;
use crate::model::{
    is_truthy, Diagnostic, Element, ElementKind, OutParam, ParsedComment, RaiseEntry, ReturnDoc,
};
use crate::section;
use crate::signature;
use crate::style::Style;

/// The content a docstring is generated from.
#[derive(Debug, Default, Clone)]
pub struct Merged {
    /// Description as documented, stripped. Empty when none existed.
    pub description: String,
    pub has_existing_description: bool,
    pub params: Vec<OutParam>,
    pub ret: ReturnDoc,
    pub rtype: Option<String>,
    pub raises: Vec<RaiseEntry>,
    /// Unmanaged numpydoc sections, re-emitted after the content.
    pub post: String,
    pub doctests: String,
}

pub fn merge(
    element: &Element,
    input: &ParsedComment,
    style_in: Style,
    style_out: Style,
    config: &Config,
) -> (Merged, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut merged = Merged {
        description: input.description.trim().to_string(),
        has_existing_description: input.has_description(),
        doctests: input.doctests.clone(),
        ..Merged::default()
    };
    merge_params(element, input, config, &mut merged, &mut diagnostics);
    merge_return(element, input, style_out, config, &mut merged);
    merged.raises = merge_raises(input, style_in, style_out, config);
    if style_in == Style::Numpydoc {
        merged.post = section::numpydoc().raw_not_managed(&input.raw, &config.numpydoc_excluded);
    }
    (merged, diagnostics)
}

/// Walk the signature parameters in order and attach the documented
/// description and type to each. The signature type wins unless the
/// priority is turned around in the config.
fn merge_params(
    element: &Element,
    input: &ParsedComment,
    config: &Config,
    merged: &mut Merged,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for param in &element.params {
        let mut ptype = param.ptype.clone().filter(|t| !t.is_empty());
        let default = param
            .default
            .clone()
            .filter(|d| !d.is_empty())
            .map(|d| signature::normalize_default(&d));
        let mut description = String::new();
        let documented = input
            .params
            .iter()
            .filter(|doc| doc.name.as_deref() == Some(param.name.as_str()))
            .last();
        if let Some(doc) = documented {
            description = doc.description.clone();
            if !is_truthy(ptype.as_deref())
                || (!config.hint_type_priority && is_truthy(doc.ptype.as_deref()))
            {
                ptype = doc.ptype.clone();
            }
        }
        merged.params.push(OutParam {
            name: param.name.clone(),
            description,
            ptype,
            default,
        });
    }
    if element.kind == ElementKind::Function {
        for doc in &input.params {
            if let Some(name) = &doc.name {
                if !element.params.iter().any(|p| &p.name == name) {
                    diagnostics.push(Diagnostic::new(format!(
                        "documented parameter {name:?} is not in the signature, dropping it"
                    )));
                }
            }
        }
    }
}

fn merge_return(
    element: &Element,
    input: &ParsedComment,
    style_out: Style,
    config: &Config,
    merged: &mut Merged,
) {
    let sectioned_out = matches!(
        style_out,
        Style::Groups | Style::Numpydoc | Style::Google
    );
    match &input.ret {
        ReturnDoc::Entries(entries) if !sectioned_out => {
            // tag outputs hold a single return line, so only the first
            // entry survives, its name folded into the text
            if let Some(first) = entries.first() {
                let text = match &first.name {
                    Some(name) => format!("{name}-> {}", first.description),
                    None => first.description.clone(),
                };
                merged.ret = ReturnDoc::Text(text);
                merged.rtype = first.rtype.clone();
            }
        }
        other => {
            merged.ret = other.clone();
            merged.rtype = input.rtype.clone();
        }
    }
    if (config.hint_rtype_priority || !is_truthy(merged.rtype.as_deref()))
        && is_truthy(element.rtype.as_deref())
    {
        merged.rtype = element.rtype.clone();
    }
}

fn merge_raises(
    input: &ParsedComment,
    style_in: Style,
    style_out: Style,
    config: &Config,
) -> Vec<RaiseEntry> {
    if input.raises.is_empty() {
        return Vec::new();
    }
    let keep = style_out != Style::Numpydoc
        || style_in == Style::Numpydoc
        || !config.numpydoc_excluded.iter().any(|key| key == "raise");
    if keep {
        input.raises.clone()
    } else {
        Vec::new()
    }
}
