//! Conversion pipeline for one element.
//!
//! A `DocComment` pairs the parsed signature of a `def` or `class`
//! with the docstring found under it. Construction strips the quotes,
//! cuts out doctests, settles the input dialect and extracts the
//! documented facts. `generate` merges those facts with the signature
//! and renders the replacement docstring.

use anyhow::Result;

use crate::config::Config;
use crate::merge;
use crate::model::{Diagnostic, Element, ParsedComment, Rendered};
use crate::parse;
use crate::render::builder::CommentBuilder;
use crate::signature;
use crate::style::Style;

/// One element's docstring, parsed and ready to re-render.
#[derive(Debug)]
pub struct DocComment {
    pub element: Element,
    /// Indentation of the `def` or `class` line.
    pub spaces: String,
    /// Indentation the docstring body is placed at.
    pub out_spaces: String,
    pub input: ParsedComment,
    pub style_in: Style,
    pub before_lim: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocComment {
    /// Parse an element and its docstring.
    ///
    /// `docs_raw` is the docstring with its quotes still on, `None`
    /// when the element has none. `before_lim` carries a quote prefix
    /// such as `r` or `u`. The input dialect is detected from the text
    /// unless the config pins one.
    pub fn new(
        elem_raw: &str,
        docs_raw: Option<&str>,
        spaces: &str,
        before_lim: &str,
        config: &Config,
    ) -> Result<DocComment> {
        let (element, mut diagnostics) = signature::parse(elem_raw);
        let out_spaces = output_spaces(spaces);
        let style_in = match (config.input_style, docs_raw) {
            (Some(style), _) => style,
            (None, Some(raw)) if !raw.is_empty() => Style::detect(raw),
            _ => Style::Unknown,
        };
        let mut input = ParsedComment::default();
        if let Some(docs_raw) = docs_raw {
            let stripped = strip_quotes(docs_raw);
            let (body, doctests) = split_doctests(stripped, &out_spaces);
            let extraction = parse::extract(&dedent(&body, &out_spaces), style_in, config)?;
            diagnostics.extend(extraction.diagnostics);
            input = ParsedComment {
                description: extraction.description,
                params: extraction.params,
                ret: extraction.ret,
                rtype: extraction.rtype,
                raises: extraction.raises,
                doctests,
                raw: body,
            };
        }
        Ok(DocComment {
            element,
            spaces: spaces.to_string(),
            out_spaces,
            input,
            style_in,
            before_lim: before_lim.to_string(),
            diagnostics,
        })
    }

    /// Merge the docstring with the signature and render the
    /// replacement text, indentation and quotes included.
    pub fn generate(&self, config: &Config) -> Rendered {
        let (merged, merge_diagnostics) = merge::merge(
            &self.element,
            &self.input,
            self.style_in,
            config.output_style,
            config,
        );
        let builder = CommentBuilder {
            kind: self.element.kind,
            element_name: self.element.name.clone(),
            description: merged.description,
            has_existing_description: merged.has_existing_description,
            params: merged.params,
            ret: merged.ret,
            rtype: merged.rtype,
            raises: merged.raises,
            post: merged.post,
            doctests: merged.doctests,
            spaces: self.out_spaces.clone(),
            before_lim: self.before_lim.clone(),
        };
        let mut diagnostics = self.diagnostics.clone();
        diagnostics.extend(merge_diagnostics);
        Rendered {
            text: builder.build(config),
            diagnostics,
        }
    }
}

/// Docstring indentation derived from the indentation of the def
/// line. Tab indented code gets one more tab, four-space aligned code
/// four more spaces, anything else two.
fn output_spaces(spaces: &str) -> String {
    if spaces.contains('\t') {
        format!("{spaces}\t")
    } else if spaces.len() % 4 == 0 {
        format!("{spaces}    ")
    } else {
        format!("{spaces}  ")
    }
}

/// One layer of quotes comes off, whatever is inside stays.
fn strip_quotes(raw: &str) -> String {
    let mut data = raw.trim();
    if data.starts_with("\"\"\"") || data.starts_with("'''") {
        data = &data[3..];
    }
    if data.ends_with("\"\"\"") || data.ends_with("'''") {
        data = &data[..data.len() - 3];
    }
    data.to_string()
}

/// Line span of the next doctest block. A block starts at a `>>>`
/// line and runs until a blank line or the end of the text.
fn doctest_indexes(data: &str) -> Option<(usize, usize)> {
    let mut start = None;
    let mut end = 0;
    for (i, line) in data.lines().enumerate() {
        if start.is_some() {
            if line.trim().is_empty() {
                break;
            }
            end = i;
        } else if line.trim_start().starts_with(">>>") {
            start = Some(i);
            end = i;
        }
    }
    start.map(|s| (s, end))
}

/// Cut every doctest block out of the body. The blocks pass through
/// to the output unconverted, so they leave the text before any
/// dialect parsing happens.
fn split_doctests(body: String, out_spaces: &str) -> (String, String) {
    let mut raw = body;
    let mut blocks = String::new();
    while let Some((start, end)) = doctest_indexes(&raw) {
        let lines: Vec<&str> = raw.lines().collect();
        if !blocks.is_empty() {
            blocks.push('\n');
        }
        blocks.push_str(&lines[start..=end].join("\n"));
        blocks.push('\n');
        raw = [&lines[..start], &lines[end + 1..]].concat().join("\n");
    }
    let doctests = if blocks.is_empty() {
        String::new()
    } else {
        dedent(&blocks, out_spaces)
    };
    (raw, doctests)
}

/// Undo the docstring indentation line by line. Only the first
/// occurrence of the indent run goes, embedded runs stay.
fn dedent(text: &str, out_spaces: &str) -> String {
    text.lines()
        .map(|line| line.trim_end().replacen(out_spaces, "", 1))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn javadoc_turns_into_rest() {
        let config = Config::default();
        let docs = "\"\"\"Says hello.\n\n    @param name: who to greet\n    @return: nothing\n    \"\"\"";
        let comment = DocComment::new("def hello(name):", Some(docs), "", "", &config).unwrap();
        assert_eq!(comment.style_in, Style::Javadoc);
        let out = comment.generate(&config);
        assert_eq!(
            out.text,
            "    \"\"\"\n    Says hello.\n\n    :param name: who to greet\n    :returns: nothing\n\n    \"\"\""
        );
    }

    #[test]
    fn javadoc_turns_into_numpydoc() {
        let config = Config {
            output_style: Style::Numpydoc,
            ..Config::default()
        };
        let docs = "\"\"\"computes square\n\n    @param x: the input\n    @return: the square\n    @rtype: int\n    \"\"\"";
        let comment =
            DocComment::new("def f(x: int) -> int:", Some(docs), "", "", &config).unwrap();
        assert_eq!(comment.style_in, Style::Javadoc);
        let out = comment.generate(&config);
        assert_eq!(
            out.text,
            "    \"\"\"\n    computes square\n\n    Parameters\n    ----------\n    x : int\n        \
             the input\n\n    Returns\n    -------\n    int\n        the square\n\n    \"\"\""
        );
    }

    #[test]
    fn rendered_output_parses_back_to_the_same_text() {
        let config = Config::default();
        let docs = "\"\"\"Says hello.\n\n    @param name: who to greet\n    @return: nothing\n    \"\"\"";
        let first = DocComment::new("def hello(name):", Some(docs), "", "", &config).unwrap();
        let rendered = first.generate(&config).text;
        let second =
            DocComment::new("def hello(name):", Some(&rendered), "", "", &config).unwrap();
        assert_eq!(second.style_in, Style::Rest);
        assert_eq!(second.generate(&config).text, rendered);
    }

    #[test]
    fn doctests_survive_the_conversion_untouched() {
        let config = Config::default();
        let docs =
            "\"\"\"Counts.\n\n    >>> count()\n    1\n\n    :param x: value\n    \"\"\"";
        let comment = DocComment::new("def count(x):", Some(docs), "", "", &config).unwrap();
        assert_eq!(comment.input.doctests, ">>> count()\n1");
        let out = comment.generate(&config);
        assert_eq!(
            out.text,
            "    \"\"\"\n    Counts.\n\n    :param x: value\n\n    >>> count()\n    1\n    \"\"\""
        );
    }

    #[test]
    fn missing_docstring_yields_a_generated_one() {
        let config = Config::default();
        let comment = DocComment::new("def process_queue():", None, "", "", &config).unwrap();
        assert_eq!(comment.style_in, Style::Unknown);
        let out = comment.generate(&config);
        assert_eq!(out.text, "    \"\"\"Process queue\"\"\"");
    }

    #[test]
    fn configured_input_style_skips_detection() {
        let mut config = Config::default();
        config.input_style = Some(Style::Rest);
        let docs = "\"\"\"Text.\n\n    @param name: ignored marker\n    \"\"\"";
        let comment = DocComment::new("def f(name):", Some(docs), "", "", &config).unwrap();
        assert_eq!(comment.style_in, Style::Rest);
    }

    #[test]
    fn indentation_follows_the_def_line() {
        assert_eq!(output_spaces(""), "    ");
        assert_eq!(output_spaces("    "), "        ");
        assert_eq!(output_spaces("   "), "     ");
        assert_eq!(output_spaces("\t"), "\t\t");
    }

    #[test]
    fn quotes_come_off_once() {
        assert_eq!(strip_quotes("\"\"\"abc\"\"\""), "abc");
        assert_eq!(strip_quotes("'''abc'''"), "abc");
        assert_eq!(strip_quotes("  \"\"\"abc\"\"\"  "), "abc");
        assert_eq!(strip_quotes("\"\"\"\"\"\""), "");
        assert_eq!(strip_quotes("\"\"\""), "");
    }

    #[test]
    fn doctest_blocks_are_cut_at_blank_lines() {
        let body = "Counts.\n\n>>> count()\n1\n\nTrailing text.".to_string();
        let (raw, doctests) = split_doctests(body, "    ");
        assert_eq!(raw, "Counts.\n\n\nTrailing text.");
        assert_eq!(doctests, ">>> count()\n1");
    }
}
