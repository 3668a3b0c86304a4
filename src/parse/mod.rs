//! Docstring extraction, one entry point across all input dialects.

pub mod groups;
pub mod tag;

use anyhow::Result;

use crate::config::Config;
use crate::model::{is_truthy, Diagnostic, DocParam, RaiseEntry, ReturnDoc};
use crate::section;
use crate::style::Style;

/// Everything extracted from one docstring body.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Leading free text, up to the first tag or section.
    pub description: String,
    pub params: Vec<DocParam>,
    pub ret: ReturnDoc,
    pub rtype: Option<String>,
    pub raises: Vec<RaiseEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extract the documented facts from a dedented docstring body.
///
/// An unknown style yields only a description. The whole body counts
/// as description then, nothing is lost.
pub fn extract(data: &str, style: Style, config: &Config) -> Result<Extraction> {
    let mut out = Extraction::default();
    if let Some(markers) = style.markers() {
        let (entries, diagnostics) = tag::extract_params(data, markers);
        out.diagnostics.extend(diagnostics);
        for (name, entry) in entries {
            let mut ptype = entry.ptype;
            if config.rst_type_in_param_priority && is_truthy(entry.type_in_param.as_deref()) {
                ptype = entry.type_in_param;
            }
            out.params.push(DocParam {
                name: Some(name),
                description: entry.description.unwrap_or_default(),
                ptype,
            });
        }
        let (text, rtype) = tag::extract_return(data, markers);
        if let Some(text) = text {
            out.ret = ReturnDoc::Text(text);
        }
        out.rtype = rtype;
        let (raises, diagnostics) = tag::extract_raises(data, markers)?;
        out.raises = raises;
        out.diagnostics.extend(diagnostics);
    } else {
        match style {
            Style::Numpydoc => {
                let tools = section::numpydoc();
                out.params = tools.list_key(data, "param");
                out.ret = ReturnDoc::Entries(tools.return_list(data));
                out.raises = tools.raise_list(data);
            }
            Style::Google => {
                let tools = section::google();
                out.params = tools.list_key(data, "param");
                out.ret = ReturnDoc::Entries(tools.return_list(data));
                out.raises = tools.raise_list(data);
            }
            Style::Groups => {
                out.params = groups::extract_params(data);
                if let Some(text) = groups::extract_return(data) {
                    out.ret = ReturnDoc::Text(text);
                }
                out.raises = groups::extract_raises(data);
            }
            _ => {}
        }
    }
    out.description = description_of(data, style);
    Ok(out)
}

fn description_of(data: &str, style: Style) -> String {
    let idx = match style {
        Style::Groups => groups::group_start_index(data),
        Style::Google => section::google().section_start_index(data),
        Style::Numpydoc => section::numpydoc().section_start_index(data),
        Style::Unknown => None,
        _ => style
            .markers()
            .and_then(|markers| tag::next_marker_index(data, markers)),
    };
    match idx {
        Some(i) => data[..i].to_string(),
        None => data.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_docstring_is_fully_extracted() {
        let data = "Greets someone.\n\n\
            :param str name: who to greet\n\
            :param punct: trailing punctuation\n\
            :returns: the greeting\n\
            :rtype: str\n\
            :raises ValueError: on empty names\n";
        let out = extract(data, Style::Rest, &Config::default()).unwrap();
        assert_eq!(out.description, "Greets someone.\n\n");
        assert_eq!(out.params.len(), 2);
        assert_eq!(out.params[0].name.as_deref(), Some("name"));
        assert_eq!(out.params[0].ptype.as_deref(), Some("str"));
        assert_eq!(out.params[1].ptype, None);
        assert_eq!(out.ret, ReturnDoc::Text("the greeting".to_string()));
        assert_eq!(out.rtype.as_deref(), Some("str"));
        assert_eq!(out.raises.len(), 1);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn tag_dialects_extract_the_same_facts() {
        let config = Config::default();
        let javadoc = "Greets someone.\n\n\
            @param name: who to greet\n\
            @raise ValueError: on empty names\n";
        let rest = "Greets someone.\n\n\
            :param name: who to greet\n\
            :raises ValueError: on empty names\n";
        let a = extract(javadoc, Style::Javadoc, &config).unwrap();
        let b = extract(rest, Style::Rest, &config).unwrap();
        assert_eq!(a.description, b.description);
        assert_eq!(a.params, b.params);
        assert_eq!(a.raises, b.raises);
    }

    #[test]
    fn inline_type_obeys_the_priority_flag() {
        let data = ":param str name: who to greet\n";
        let mut config = Config::default();
        config.rst_type_in_param_priority = false;
        let out = extract(data, Style::Rest, &config).unwrap();
        assert_eq!(out.params[0].ptype, None);
    }

    #[test]
    fn google_docstring_produces_entries() {
        let data = "Adds numbers.\n\n\
            Args:\n\
            \x20   a (int): left operand\n\
            \x20   b (int): right operand\n\n\
            Returns:\n\
            \x20   int: their sum\n";
        let out = extract(data, Style::Google, &Config::default()).unwrap();
        assert_eq!(out.params.len(), 2);
        assert_eq!(out.params[0].ptype.as_deref(), Some("int"));
        match &out.ret {
            ReturnDoc::Entries(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].name, None);
                assert_eq!(entries[0].rtype.as_deref(), Some("int"));
                assert_eq!(entries[0].description, "their sum");
            }
            other => panic!("expected entries, got {other:?}"),
        }
        assert_eq!(out.description, "Adds numbers.\n\n");
    }

    #[test]
    fn unknown_style_keeps_everything_as_description() {
        let data = "Nothing tagged here.\nJust text.\n";
        let out = extract(data, Style::Unknown, &Config::default()).unwrap();
        assert_eq!(out.description, data);
        assert!(out.params.is_empty());
        assert_eq!(out.ret, ReturnDoc::Absent);
    }
}
