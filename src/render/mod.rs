//! Per dialect rendering of merged docstring content.
//!
//! Every output dialect implements the same three section renderers so
//! the builder can splice parameter, return and raises blocks without
//! knowing the target layout. The returned blocks carry their own
//! leading and trailing blank line conventions, which differ between
//! the dialects.

pub mod builder;
pub mod google;
pub mod groups;
pub mod numpydoc;
pub mod tag;

use crate::config::Config;
use crate::model::{OutParam, RaiseEntry, ReturnDoc};
use crate::style::{Style, REST_MARKERS};

/// Renders the content sections of one output dialect.
pub trait Strategy {
    fn params_section(&self, params: &[OutParam], config: &Config, spaces: &str) -> String;
    fn return_section(
        &self,
        ret: &ReturnDoc,
        rtype: Option<&str>,
        params: &[OutParam],
        config: &Config,
        spaces: &str,
    ) -> String;
    fn raises_section(
        &self,
        raises: &[RaiseEntry],
        params: &[OutParam],
        ret: &ReturnDoc,
        config: &Config,
        spaces: &str,
    ) -> String;
}

/// Create the section renderer for the given output dialect.
pub fn create_strategy(style: Style) -> Box<dyn Strategy> {
    match style {
        Style::Numpydoc => Box::new(numpydoc::NumpydocStrategy),
        Style::Google => Box::new(google::GoogleStrategy),
        Style::Groups => Box::new(groups::GroupsStrategy),
        other => Box::new(tag::TagStrategy::new(other.markers().unwrap_or(&REST_MARKERS))),
    }
}

/// Joins a text block back together with every line after the first
/// prefixed for continuation. Section dialects strip a continuation
/// line before re-indenting it, tag dialects keep it as written.
/// Blank continuation lines stay empty unless blank line indenting is
/// on.
pub(crate) fn with_space(
    text: &str,
    prefix: &str,
    lstrip: bool,
    indent_empty_lines: bool,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if i == 0 {
            lines.push(line.to_string());
            continue;
        }
        let stripped = line.trim_start();
        if stripped.is_empty() && !indent_empty_lines {
            lines.push(String::new());
        } else if lstrip {
            lines.push(format!("{prefix}{stripped}"));
        } else {
            lines.push(format!("{prefix}{line}"));
        }
    }
    lines.join("\n")
}

/// `(Default value = ...)` suffix for a parameter line.
///
/// Nothing is echoed when the description already mentions a default
/// in any casing. The separating space is only written when a
/// description precedes the suffix.
pub(crate) fn default_echo(param: &OutParam, config: &Config) -> String {
    let Some(default) = param.default.as_deref() else {
        return String::new();
    };
    if !config.show_default_value || param.description.to_lowercase().contains("default") {
        return String::new();
    }
    let space = if param.description.trim().is_empty() { "" } else { " " };
    format!("{space}(Default value = {default})")
}
