//! Numpydoc section rendering.
//!
//! Headers are underlined with dashes. Parameters put `name : type`
//! on one line with the description indented below, and the return
//! section can carry several named entries.

use crate::config::Config;
use crate::model::{OutParam, RaiseEntry, ReturnDoc};
use crate::render::{default_echo, with_space, Strategy};
use crate::section;

pub struct NumpydocStrategy;

impl Strategy for NumpydocStrategy {
    fn params_section(&self, params: &[OutParam], config: &Config, spaces: &str) -> String {
        let mut raw = String::from("\n");
        if config.skip_empty && params.is_empty() {
            return raw;
        }
        let indent = config.indent_unit();
        let prefix = format!("{spaces}{indent}");
        raw.push_str(&section::numpydoc().key_section_header("param", spaces));
        for param in params {
            raw.push_str(&format!("{spaces}{} :", param.name));
            if let Some(ptype) = param.ptype.as_deref().filter(|t| !t.is_empty()) {
                raw.push_str(&format!(" {ptype}"));
            }
            raw.push('\n');
            let desc = with_space(&param.description, &prefix, true, config.indent_empty_lines);
            raw.push_str(&format!("{prefix}{}", desc.trim()));
            raw.push_str(&default_echo(param, config));
            raw.push('\n');
        }
        raw
    }

    fn return_section(
        &self,
        ret: &ReturnDoc,
        rtype: Option<&str>,
        _params: &[OutParam],
        config: &Config,
        spaces: &str,
    ) -> String {
        let mut raw = String::new();
        if config.skip_empty && !ret.is_present() {
            return raw;
        }
        raw.push('\n');
        let indent = config.indent_unit();
        let prefix = format!("{spaces}{indent}");
        raw.push_str(&section::numpydoc().key_section_header("return", spaces));
        // The literal word "type" stands in when no type is known.
        let rtype = rtype.filter(|t| !t.is_empty()).unwrap_or("type");
        match ret {
            ReturnDoc::Entries(entries) => {
                for entry in entries {
                    let ertype = entry.rtype.as_deref().unwrap_or("");
                    raw.push_str(spaces);
                    if let Some(name) = entry.name.as_deref().filter(|n| !n.is_empty()) {
                        raw.push_str(&format!("{name} : "));
                    }
                    let desc =
                        with_space(&entry.description, &prefix, true, config.indent_empty_lines);
                    raw.push_str(&format!("{ertype}\n{prefix}{}\n", desc.trim()));
                }
            }
            ReturnDoc::Text(text) => {
                let desc = with_space(text, &prefix, true, config.indent_empty_lines);
                raw.push_str(&format!("{spaces}{rtype}\n{prefix}{}\n", desc.trim()));
            }
            ReturnDoc::Absent => {}
        }
        raw
    }

    fn raises_section(
        &self,
        raises: &[RaiseEntry],
        _params: &[OutParam],
        _ret: &ReturnDoc,
        config: &Config,
        spaces: &str,
    ) -> String {
        let mut raw = String::new();
        if config.skip_empty && raises.is_empty() {
            return raw;
        }
        if config.numpydoc_excluded.iter().any(|key| key == "raise") {
            return raw;
        }
        raw.push('\n');
        if !raises.is_empty() {
            let indent = config.indent_unit();
            let prefix = format!("{spaces}{indent}");
            raw.push_str(&section::numpydoc().key_section_header("raise", spaces));
            for entry in raises {
                raw.push_str(&format!("{spaces}{}\n", entry.name.as_deref().unwrap_or("")));
                let desc =
                    with_space(&entry.description, &prefix, true, config.indent_empty_lines);
                raw.push_str(&format!("{prefix}{}\n", desc.trim()));
            }
            raw.push('\n');
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReturnEntry;

    fn param(name: &str, desc: &str, ptype: Option<&str>, default: Option<&str>) -> OutParam {
        OutParam {
            name: name.to_string(),
            description: desc.to_string(),
            ptype: ptype.map(str::to_string),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn params_render_name_colon_type_blocks() {
        let params = vec![
            param("first", "the input", Some("int"), None),
            param("second", "", None, Some("5")),
        ];
        let out = NumpydocStrategy.params_section(&params, &Config::default(), "    ");
        assert_eq!(
            out,
            "\n    Parameters\n    ----------\n    first : int\n        the input\n    \
             second :\n        (Default value = 5)\n"
        );
    }

    #[test]
    fn return_text_falls_back_to_type_word() {
        let config = Config::default();
        let ret = ReturnDoc::Text("the square".to_string());
        let out = NumpydocStrategy.return_section(&ret, Some("int"), &[], &config, "");
        assert_eq!(out, "\nReturns\n-------\nint\n    the square\n");
        let out = NumpydocStrategy.return_section(&ret, None, &[], &config, "");
        assert_eq!(out, "\nReturns\n-------\ntype\n    the square\n");
    }

    #[test]
    fn return_entries_keep_their_names() {
        let ret = ReturnDoc::Entries(vec![ReturnEntry {
            name: Some("total".to_string()),
            description: "sum of items".to_string(),
            rtype: Some("float".to_string()),
        }]);
        let out = NumpydocStrategy.return_section(&ret, None, &[], &Config::default(), "");
        assert_eq!(out, "\nReturns\n-------\ntotal : float\n    sum of items\n");
    }

    #[test]
    fn raises_section_and_exclusion() {
        let raises = vec![RaiseEntry {
            name: Some("IOError".to_string()),
            description: "on disk trouble".to_string(),
        }];
        let config = Config::default();
        let out = NumpydocStrategy.raises_section(&raises, &[], &ReturnDoc::Absent, &config, "");
        assert_eq!(out, "\nRaises\n------\nIOError\n    on disk trouble\n\n");
        let excluded = Config {
            numpydoc_excluded: vec!["raise".to_string()],
            ..Config::default()
        };
        let out =
            NumpydocStrategy.raises_section(&raises, &[], &ReturnDoc::Absent, &excluded, "");
        assert_eq!(out, "");
        let out = NumpydocStrategy.raises_section(&[], &[], &ReturnDoc::Absent, &config, "");
        assert_eq!(out, "\n");
    }
}
