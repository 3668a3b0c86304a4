//! Converter configuration.
//!
//! A single flat struct covers both sides of the pipeline. Everything
//! has a default so the library can be driven with `Config::default()`
//! and the command line only overrides what it exposes.

use crate::model::Scope;
use crate::style::Style;

/// Options controlling detection, parsing and rendering.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dialect the generated docstrings are written in.
    pub output_style: Style,
    /// Forced input dialect. When unset each docstring is detected on
    /// its own.
    pub input_style: Option<Style>,
    /// Triple quotes used for generated docstrings.
    pub quotes: String,
    /// Width of one indentation level inside a docstring.
    pub indent: usize,
    /// Leave out sections that have no content.
    pub skip_empty: bool,
    /// Put an auto-generated description on the opening quote line.
    pub first_line: bool,
    /// Leave a trailing space where the user should write text.
    pub trailing_space: bool,
    /// Always start the description on the line after the quotes.
    pub description_on_new_line: bool,
    /// Append `(Default value = ...)` to parameter descriptions.
    pub show_default_value: bool,
    /// Indent blank continuation lines instead of leaving them empty.
    pub indent_empty_lines: bool,
    /// Write type tags for parameters and return values.
    pub type_tags: bool,
    /// Write an empty type tag for parameters without a known type.
    pub type_stub: bool,
    /// A signature type annotation beats a docstring type.
    pub hint_type_priority: bool,
    /// A signature return annotation beats a docstring rtype.
    pub hint_rtype_priority: bool,
    /// In reST input, a type written inside the param tag beats a
    /// separate type tag.
    pub rst_type_in_param_priority: bool,
    /// Section keys never rendered in numpydoc output.
    pub numpydoc_excluded: Vec<String>,
    /// Method scopes to process. Empty means everything.
    pub method_scope: Vec<Scope>,
    /// Move an `__init__` docstring up to its class when the class has
    /// none.
    pub init2class: bool,
    /// Insert a module docstring when the file has none.
    pub file_comment: bool,
    /// Only touch elements that already have a docstring.
    pub convert_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_style: Style::Rest,
            input_style: None,
            quotes: "\"\"\"".to_string(),
            indent: 4,
            skip_empty: false,
            first_line: false,
            trailing_space: true,
            description_on_new_line: false,
            show_default_value: true,
            indent_empty_lines: true,
            type_tags: true,
            type_stub: false,
            hint_type_priority: true,
            hint_rtype_priority: true,
            rst_type_in_param_priority: true,
            numpydoc_excluded: Vec::new(),
            method_scope: Vec::new(),
            init2class: false,
            file_comment: false,
            convert_only: false,
        }
    }
}

impl Config {
    /// The space appended where the user is expected to fill text in.
    pub fn trailing(&self) -> &'static str {
        if self.trailing_space {
            " "
        } else {
            ""
        }
    }

    /// One indentation level inside a docstring.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent)
    }

    /// True when the given method scope passes the configured filter.
    pub fn scope_allowed(&self, scope: Scope) -> bool {
        self.method_scope.is_empty() || self.method_scope.contains(&scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.output_style, Style::Rest);
        assert_eq!(cfg.input_style, None);
        assert_eq!(cfg.quotes, "\"\"\"");
        assert_eq!(cfg.indent, 4);
        assert!(cfg.type_tags);
        assert!(!cfg.type_stub);
        assert_eq!(cfg.trailing(), " ");
    }

    #[test]
    fn scope_filter() {
        let mut cfg = Config::default();
        assert!(cfg.scope_allowed(Scope::Private));
        cfg.method_scope = vec![Scope::Public];
        assert!(cfg.scope_allowed(Scope::Public));
        assert!(!cfg.scope_allowed(Scope::Private));
    }
}
