//! Google section rendering.
//!
//! Content is grouped under `Args:`, `Returns:` and `Raises:` headers
//! with every entry indented one level below the header. Parameter
//! types ride along in parentheses after the name.

use crate::config::Config;
use crate::model::{OutParam, RaiseEntry, ReturnDoc};
use crate::render::{default_echo, with_space, Strategy};
use crate::section;

pub struct GoogleStrategy;

impl Strategy for GoogleStrategy {
    fn params_section(&self, params: &[OutParam], config: &Config, spaces: &str) -> String {
        let mut raw = String::from("\n");
        if config.skip_empty && params.is_empty() {
            return raw;
        }
        let indent = config.indent_unit();
        raw.push_str(&section::google().key_section_header("param", spaces));
        for param in params {
            raw.push_str(&format!("{spaces}{indent}{}", param.name));
            if let Some(ptype) = param.ptype.as_deref().filter(|t| !t.is_empty()) {
                raw.push_str(&format!(" ({ptype}"));
                if param.default.is_some() {
                    raw.push_str(", optional");
                }
                raw.push(')');
            }
            let desc = with_space(&param.description, spaces, true, config.indent_empty_lines);
            raw.push_str(&format!(": {}", desc.trim()));
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
        raw.push_str(&section::google().key_section_header("return", spaces));
        match ret {
            ReturnDoc::Entries(entries) => {
                for entry in entries {
                    let rtype = entry.rtype.as_deref().unwrap_or("");
                    let desc =
                        with_space(&entry.description, &prefix, true, config.indent_empty_lines);
                    raw.push_str(&format!("{prefix}{rtype}: {}\n", desc.trim()));
                }
            }
            ReturnDoc::Text(text) => {
                let desc = with_space(text, &prefix, true, config.indent_empty_lines);
                match rtype.filter(|t| !t.is_empty()) {
                    Some(rtype) => raw.push_str(&format!("{prefix}{rtype}: {}\n", desc.trim())),
                    None => raw.push_str(&format!("{prefix}{}\n", desc.trim())),
                }
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
        raw.push('\n');
        let indent = config.indent_unit();
        // The raises header always goes out, entries or not.
        raw.push_str(&section::google().key_section_header("raise", spaces));
        for entry in raises {
            raw.push_str(&format!("{spaces}{indent}"));
            if let Some(name) = entry.name.as_deref() {
                raw.push_str(&format!("{name}: "));
            }
            if !entry.description.is_empty() {
                raw.push_str(entry.description.trim());
            }
            raw.push('\n');
        }
        raw.push('\n');
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
    fn params_with_types_and_optional_flag() {
        let params = vec![
            param("first", "the first value", Some("int"), None),
            param("second", "the second", Some("str"), Some("'x'")),
            param("third", "the third", None, None),
        ];
        let out = GoogleStrategy.params_section(&params, &Config::default(), "    ");
        assert_eq!(
            out,
            "\n    Args:\n        first (int): the first value\n        \
             second (str, optional): the second (Default value = 'x')\n        \
             third: the third\n"
        );
    }

    #[test]
    fn return_text_with_and_without_type() {
        let config = Config::default();
        let ret = ReturnDoc::Text("the result".to_string());
        let out = GoogleStrategy.return_section(&ret, Some("bool"), &[], &config, "");
        assert_eq!(out, "\nReturns:\n    bool: the result\n");
        let out = GoogleStrategy.return_section(&ret, None, &[], &config, "");
        assert_eq!(out, "\nReturns:\n    the result\n");
    }

    #[test]
    fn return_entries_carry_their_own_types() {
        let ret = ReturnDoc::Entries(vec![
            ReturnEntry {
                name: Some("count".to_string()),
                description: "items seen".to_string(),
                rtype: Some("int".to_string()),
            },
            ReturnEntry {
                name: None,
                description: "a flag".to_string(),
                rtype: None,
            },
        ]);
        let out = GoogleStrategy.return_section(&ret, None, &[], &Config::default(), "");
        assert_eq!(out, "\nReturns:\n    int: items seen\n    : a flag\n");
    }

    #[test]
    fn raises_header_survives_empty_list() {
        let config = Config::default();
        let out = GoogleStrategy.raises_section(&[], &[], &ReturnDoc::Absent, &config, "");
        assert_eq!(out, "\nRaises:\n\n");
        let raises = vec![RaiseEntry {
            name: Some("KeyError".to_string()),
            description: "missing entry".to_string(),
        }];
        let out = GoogleStrategy.raises_section(&raises, &[], &ReturnDoc::Absent, &config, "");
        assert_eq!(out, "\nRaises:\n    KeyError: missing entry\n\n");
    }

    #[test]
    fn multi_line_description_is_reflowed() {
        let params = vec![param("x", "first line\n        second line", None, None)];
        let out = GoogleStrategy.params_section(&params, &Config::default(), "");
        assert_eq!(out, "\nArgs:\n    x: first line\nsecond line\n");
    }
}
