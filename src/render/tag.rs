//! Tag dialect section rendering for javadoc, reST and cstyle.
//!
//! One line per entry, the tag key followed by the name and the
//! dialect separator. Types get their own tag lines when type tags
//! are enabled, and a bare type tag can be stubbed out for parameters
//! whose type is unknown.

use crate::config::Config;
use crate::model::{is_truthy, OutParam, RaiseEntry, ReturnDoc};
use crate::render::{default_echo, with_space, Strategy};
use crate::style::TagMarkers;

pub struct TagStrategy {
    markers: &'static TagMarkers,
}

impl TagStrategy {
    pub fn new(markers: &'static TagMarkers) -> Self {
        TagStrategy { markers }
    }

    /// Separator written between a tag and the following text. The
    /// colon gets a space glued on, the cstyle space stays bare.
    fn sep(&self) -> String {
        if self.markers.sep == " " {
            self.markers.sep.to_string()
        } else {
            format!("{} ", self.markers.sep)
        }
    }
}

impl Strategy for TagStrategy {
    fn params_section(&self, params: &[OutParam], config: &Config, spaces: &str) -> String {
        let mut raw = String::from("\n");
        if config.skip_empty && params.is_empty() {
            return raw;
        }
        let sep = self.sep();
        for param in params {
            let desc = with_space(&param.description, spaces, false, config.indent_empty_lines);
            raw.push_str(&format!(
                "{spaces}{} {}{sep}{}",
                self.markers.param,
                param.name,
                desc.trim()
            ));
            raw.push_str(&default_echo(param, config));
            let ptype = param.ptype.as_deref().unwrap_or("");
            if config.type_tags && !ptype.is_empty() {
                raw.push_str(&format!(
                    "\n{spaces}{} {}{sep}{ptype}",
                    self.markers.ptype, param.name
                ));
            } else if config.type_stub && ptype.is_empty() {
                raw.push_str(&format!("\n{spaces}{} {}{sep}", self.markers.ptype, param.name));
            }
            raw.push('\n');
        }
        raw
    }

    fn return_section(
        &self,
        ret: &ReturnDoc,
        rtype: Option<&str>,
        params: &[OutParam],
        config: &Config,
        spaces: &str,
    ) -> String {
        let mut raw = String::new();
        let desc = match ret {
            ReturnDoc::Text(text) if !text.is_empty() => Some(text.as_str()),
            ReturnDoc::Entries(entries) => entries.first().map(|e| e.description.as_str()),
            _ => None,
        };
        // An annotation with type tags off still gets a bare return line.
        if config.skip_empty && desc.is_none() && !(is_truthy(rtype) && !config.type_tags) {
            return raw;
        }
        let sep = self.sep();
        if let Some(desc) = desc {
            if params.is_empty() {
                raw.push('\n');
            }
            let body = with_space(desc.trim_end(), spaces, false, config.indent_empty_lines);
            raw.push_str(&format!("{spaces}{}{sep}{}\n", self.markers.ret, body.trim()));
        } else if is_truthy(rtype) && !config.type_tags {
            if params.is_empty() {
                raw.push('\n');
            }
            raw.push_str(&format!("{spaces}{}{sep}\n", self.markers.ret));
        }
        if config.type_tags {
            if let Some(rtype) = rtype.filter(|t| !t.is_empty()) {
                if params.is_empty() {
                    raw.push('\n');
                }
                raw.push_str(&format!(
                    "{spaces}{}{sep}{}\n",
                    self.markers.rtype,
                    rtype.trim_end()
                ));
            }
        }
        raw
    }

    fn raises_section(
        &self,
        raises: &[RaiseEntry],
        params: &[OutParam],
        ret: &ReturnDoc,
        config: &Config,
        spaces: &str,
    ) -> String {
        let mut raw = String::new();
        if config.skip_empty && raises.is_empty() {
            return raw;
        }
        let sep = self.sep();
        if !raises.is_empty() {
            if params.is_empty() && !ret.is_present() {
                raw.push('\n');
            }
            for entry in raises {
                raw.push_str(&format!("{spaces}{} ", self.markers.raises));
                if let Some(name) = entry.name.as_deref() {
                    raw.push_str(name);
                    raw.push_str(&sep);
                }
                if !entry.description.is_empty() {
                    let body =
                        with_space(&entry.description, spaces, false, config.indent_empty_lines);
                    raw.push_str(body.trim());
                }
                raw.push('\n');
            }
        }
        raw.push('\n');
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{CSTYLE_MARKERS, JAVADOC_MARKERS, REST_MARKERS};

    fn param(name: &str, desc: &str, ptype: Option<&str>, default: Option<&str>) -> OutParam {
        OutParam {
            name: name.to_string(),
            description: desc.to_string(),
            ptype: ptype.map(str::to_string),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn rest_params_with_type_and_default() {
        let params = vec![
            param("first", "the first", Some("str"), None),
            param("second", "", None, Some("3")),
        ];
        let out = TagStrategy::new(&REST_MARKERS).params_section(
            &params,
            &Config::default(),
            "    ",
        );
        assert_eq!(
            out,
            "\n    :param first: the first\n    :type first: str\n    \
             :param second: (Default value = 3)\n"
        );
    }

    #[test]
    fn type_stub_fills_in_missing_types() {
        let params = vec![
            param("first", "the first", Some("str"), None),
            param("second", "", None, None),
        ];
        let config = Config {
            type_stub: true,
            ..Config::default()
        };
        let out = TagStrategy::new(&REST_MARKERS).params_section(&params, &config, "    ");
        assert_eq!(
            out,
            "\n    :param first: the first\n    :type first: str\n    \
             :param second: \n    :type second: \n"
        );
    }

    #[test]
    fn javadoc_and_cstyle_markers() {
        let params = vec![param("x", "the value", None, None)];
        let config = Config::default();
        let javadoc = TagStrategy::new(&JAVADOC_MARKERS).params_section(&params, &config, "");
        assert_eq!(javadoc, "\n@param x: the value\n");
        let cstyle = TagStrategy::new(&CSTYLE_MARKERS).params_section(&params, &config, "");
        assert_eq!(cstyle, "\n\\param x the value\n");
    }

    #[test]
    fn return_blank_line_between_tags_without_params() {
        let strategy = TagStrategy::new(&REST_MARKERS);
        let config = Config::default();
        let ret = ReturnDoc::Text("the sum".to_string());
        let out = strategy.return_section(&ret, Some("int"), &[], &config, "    ");
        assert_eq!(out, "\n    :returns: the sum\n\n    :rtype: int\n");
        let params = vec![param("x", "", None, None)];
        let out = strategy.return_section(&ret, Some("int"), &params, &config, "    ");
        assert_eq!(out, "    :returns: the sum\n    :rtype: int\n");
    }

    #[test]
    fn bare_return_line_when_type_tags_are_off() {
        let config = Config {
            type_tags: false,
            ..Config::default()
        };
        let out = TagStrategy::new(&REST_MARKERS).return_section(
            &ReturnDoc::Absent,
            Some("int"),
            &[],
            &config,
            "    ",
        );
        assert_eq!(out, "\n    :returns: \n");
    }

    #[test]
    fn raises_with_and_without_names() {
        let raises = vec![
            RaiseEntry {
                name: Some("ValueError".to_string()),
                description: "bad input".to_string(),
            },
            RaiseEntry {
                name: None,
                description: "whenever".to_string(),
            },
        ];
        let out = TagStrategy::new(&REST_MARKERS).raises_section(
            &raises,
            &[],
            &ReturnDoc::Absent,
            &Config::default(),
            "",
        );
        assert_eq!(out, "\n:raises ValueError: bad input\n:raises whenever\n\n");
    }

    #[test]
    fn skip_empty_quiets_missing_sections() {
        let strategy = TagStrategy::new(&REST_MARKERS);
        let config = Config {
            skip_empty: true,
            ..Config::default()
        };
        assert_eq!(strategy.params_section(&[], &config, ""), "\n");
        assert_eq!(
            strategy.return_section(&ReturnDoc::Absent, None, &[], &config, ""),
            ""
        );
        assert_eq!(
            strategy.raises_section(&[], &[], &ReturnDoc::Absent, &config, ""),
            ""
        );
    }
}
