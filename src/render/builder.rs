//! Docstring assembly.
//!
//! The builder receives the merged content for one element and
//! stitches the final text together: opening quotes, description
//! placement, the dialect sections, trailing blocks and the closing
//! quotes. Elements without a usable description get one generated
//! from their name.

use crate::config::Config;
use crate::model::{is_truthy, ElementKind, OutParam, RaiseEntry, ReturnDoc};
use crate::render::{create_strategy, with_space};

/// Merged content and placement facts for one docstring.
#[derive(Debug, Default, Clone)]
pub struct CommentBuilder {
    pub kind: ElementKind,
    pub element_name: String,
    /// Description taken from the input docstring.
    pub description: String,
    /// True when the input docstring carried a non-blank description.
    pub has_existing_description: bool,
    pub params: Vec<OutParam>,
    pub ret: ReturnDoc,
    pub rtype: Option<String>,
    pub raises: Vec<RaiseEntry>,
    /// Unmanaged numpydoc sections re-emitted after the content.
    pub post: String,
    /// Doctest blocks re-emitted last.
    pub doctests: String,
    /// Indentation the generated docstring is placed at.
    pub spaces: String,
    /// Quote prefix such as `r` or `u`, kept from the input.
    pub before_lim: String,
}

impl CommentBuilder {
    /// Build the full docstring, quotes and indentation included.
    pub fn build(&self, config: &Config) -> String {
        let stored = self.effective_description();
        let mut desc = stored.trim().to_string();

        if !self.has_sections() {
            if !desc.is_empty() && desc.contains('\n') && !self.has_existing_description {
                desc = desc.split_whitespace().collect::<Vec<&str>>().join(" ");
            }
            if desc.is_empty() || !desc.contains('\n') {
                return self.single_line(&desc, config);
            }
            return self.multi_line(&stored, config);
        }

        let strategy = create_strategy(config.output_style);
        let mut raw = self.opening(config);
        raw.push_str(&self.description_block(&stored));
        raw.push_str(&strategy.params_section(&self.params, config, &self.spaces));
        raw.push_str(&strategy.return_section(
            &self.ret,
            self.rtype.as_deref(),
            &self.params,
            config,
            &self.spaces,
        ));
        raw.push_str(&strategy.raises_section(
            &self.raises,
            &self.params,
            &self.ret,
            config,
            &self.spaces,
        ));
        raw.push_str(&self.trailing_blocks());
        self.close(raw, config)
    }

    /// Description that ends up in the docstring. Without an existing
    /// one the element name is turned into a starter.
    fn effective_description(&self) -> String {
        if self.has_existing_description {
            self.description.clone()
        } else {
            name_as_description(self.kind, &self.element_name)
        }
    }

    /// Doctests and unmanaged sections count too: they can only be
    /// re-emitted through the sectioned layout.
    fn has_sections(&self) -> bool {
        !self.params.is_empty()
            || self.ret.is_present()
            || is_truthy(self.rtype.as_deref())
            || !self.raises.is_empty()
            || !self.post.is_empty()
            || !self.doctests.is_empty()
    }

    fn opening(&self, config: &Config) -> String {
        format!("{}{}{}", self.spaces, self.before_lim, config.quotes)
    }

    /// Docstring indentation glued onto every line after the first.
    fn reindented(&self, text: &str) -> String {
        with_space(text, &self.spaces, false, true)
    }

    fn single_line(&self, desc: &str, config: &Config) -> String {
        let mut raw = self.opening(config);
        let auto = !self.has_existing_description;
        if auto && self.kind == ElementKind::Class {
            // Class names stay on one line between spaces, whatever
            // the placement options say.
            raw.push(' ');
            raw.push_str(desc);
            raw.push(' ');
            raw.push_str(&config.quotes);
        } else if config.description_on_new_line {
            raw.push('\n');
            raw.push_str(&self.spaces);
            raw.push_str(if desc.is_empty() { config.trailing() } else { desc });
            raw.push('\n');
            raw.push_str(&self.spaces);
            raw.push_str(&config.quotes);
        } else if auto && config.first_line {
            raw.push_str(if desc.is_empty() { config.trailing() } else { desc });
            if self.element_name == "__init__" {
                raw.push_str("\n\n");
            } else {
                raw.push('\n');
            }
            raw.push_str(&self.spaces);
            raw.push_str(&config.quotes);
        } else {
            raw.push_str(if desc.is_empty() { config.trailing() } else { desc });
            raw.push_str(&config.quotes);
        }
        raw.trim_end().to_string()
    }

    fn multi_line(&self, stored: &str, config: &Config) -> String {
        let mut raw = self.opening(config);
        if !config.first_line {
            raw.push('\n');
            raw.push_str(&self.spaces);
        }
        let body = self.reindented(stored);
        if self.has_existing_description {
            raw.push_str(body.trim_end());
        } else {
            raw.push_str(body.trim());
        }
        raw.push('\n');
        if raw.matches(config.quotes.as_str()).count() == 1 {
            raw.push_str(&self.spaces);
            raw.push_str(&config.quotes);
        }
        raw.trim_end().to_string()
    }

    /// Description part of a sectioned docstring, always on its own
    /// line below the quotes.
    fn description_block(&self, stored: &str) -> String {
        let mut block = String::from("\n");
        block.push_str(&self.spaces);
        let body = self.reindented(stored);
        if self.has_existing_description {
            block.push_str(body.trim_end());
        } else {
            block.push_str(body.trim());
        }
        block.push('\n');
        block
    }

    fn trailing_blocks(&self) -> String {
        let mut block = String::new();
        if !self.post.is_empty() {
            block.push_str(&self.spaces);
            block.push_str(self.reindented(&self.post).trim());
            block.push('\n');
        }
        if !self.doctests.is_empty() {
            block.push_str(&self.spaces);
            block.push_str(self.reindented(&self.doctests).trim());
            block.push('\n');
        }
        block
    }

    /// No extra quotes when the body already contains a quote run.
    fn close(&self, mut raw: String, config: &Config) -> String {
        if raw.matches(config.quotes.as_str()).count() == 1 {
            raw.push_str(&self.spaces);
            raw.push_str(&config.quotes);
        }
        raw.trim_end().to_string()
    }
}

/// Turn an element name into a starter description.
///
/// Function names are split on underscores and camel case boundaries,
/// joined with spaces and capitalized. Dunder names collapse to one
/// word, `__init__` becoming "Initialize". Class and module names are
/// kept as written.
pub fn name_as_description(kind: ElementKind, name: &str) -> String {
    match kind {
        ElementKind::Function => function_name_description(name),
        ElementKind::Class | ElementKind::Module => name.to_string(),
    }
}

fn function_name_description(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    if let Some(inner) = name.strip_prefix("__").and_then(|n| n.strip_suffix("__")) {
        if inner.is_empty() {
            return name.to_string();
        }
        if inner == "init" {
            return "Initialize".to_string();
        }
        return capitalize(inner);
    }
    let mut words: Vec<String> = Vec::new();
    for part in name.split('_') {
        let mut current = String::new();
        for (i, ch) in part.chars().enumerate() {
            if ch.is_uppercase() && i > 0 && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    if words.is_empty() {
        return name.to_string();
    }
    capitalize(&words.join(" "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str().to_lowercase()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> CommentBuilder {
        CommentBuilder::default()
    }

    #[test]
    fn names_become_descriptions() {
        assert_eq!(
            name_as_description(ElementKind::Function, "hello_world"),
            "Hello world"
        );
        assert_eq!(
            name_as_description(ElementKind::Function, "UserAccountManager"),
            "User account manager"
        );
        assert_eq!(
            name_as_description(ElementKind::Function, "__init__"),
            "Initialize"
        );
        assert_eq!(name_as_description(ElementKind::Function, "__str__"), "Str");
        assert_eq!(name_as_description(ElementKind::Function, "func1"), "Func1");
        assert_eq!(
            name_as_description(ElementKind::Class, "RocketLauncher"),
            "RocketLauncher"
        );
    }

    #[test]
    fn generated_docstring_for_plain_signature() {
        let mut b = builder();
        b.element_name = "greet".to_string();
        b.params = vec![
            OutParam {
                name: "name".to_string(),
                description: String::new(),
                ptype: None,
                default: None,
            },
            OutParam {
                name: "greeting".to_string(),
                description: String::new(),
                ptype: None,
                default: Some("\"hi\"".to_string()),
            },
        ];
        let text = b.build(&Config::default());
        assert_eq!(
            text,
            "\"\"\"\nGreet\n\n:param name: \n:param greeting: (Default value = \"hi\")\n\n\"\"\""
        );
    }

    #[test]
    fn one_line_auto_description() {
        let mut b = builder();
        b.element_name = "run".to_string();
        assert_eq!(b.build(&Config::default()), "\"\"\"Run\"\"\"");
        let config = Config {
            first_line: true,
            ..Config::default()
        };
        assert_eq!(b.build(&config), "\"\"\"Run\n\"\"\"");
    }

    #[test]
    fn init_gets_a_spacer_line() {
        let mut b = builder();
        b.element_name = "__init__".to_string();
        b.spaces = "    ".to_string();
        let config = Config {
            first_line: true,
            ..Config::default()
        };
        assert_eq!(b.build(&config), "    \"\"\"Initialize\n\n    \"\"\"");
    }

    #[test]
    fn class_description_stays_between_spaces() {
        let mut b = builder();
        b.kind = ElementKind::Class;
        b.element_name = "Rocket".to_string();
        assert_eq!(b.build(&Config::default()), "\"\"\" Rocket \"\"\"");
        let config = Config {
            description_on_new_line: true,
            ..Config::default()
        };
        assert_eq!(b.build(&config), "\"\"\" Rocket \"\"\"");
    }

    #[test]
    fn existing_one_liner_keeps_its_shape() {
        let mut b = builder();
        b.element_name = "work".to_string();
        b.description = "Does things.".to_string();
        b.has_existing_description = true;
        assert_eq!(b.build(&Config::default()), "\"\"\"Does things.\"\"\"");
    }

    #[test]
    fn existing_multi_line_description_is_preserved() {
        let mut b = builder();
        b.element_name = "work".to_string();
        b.description = "First line.\n\n    More detail.".to_string();
        b.has_existing_description = true;
        b.spaces = "    ".to_string();
        assert_eq!(
            b.build(&Config::default()),
            "    \"\"\"\n    First line.\n    \n        More detail.\n    \"\"\""
        );
    }

    #[test]
    fn description_on_new_line_closes_below() {
        let mut b = builder();
        b.element_name = "work".to_string();
        b.description = "Does things.".to_string();
        b.has_existing_description = true;
        let config = Config {
            description_on_new_line: true,
            ..Config::default()
        };
        assert_eq!(b.build(&config), "\"\"\"\nDoes things.\n\"\"\"");
    }

    #[test]
    fn sections_are_spliced_in_order() {
        let mut b = builder();
        b.element_name = "total".to_string();
        b.description = "Sums.".to_string();
        b.has_existing_description = true;
        b.params = vec![OutParam {
            name: "x".to_string(),
            description: "the x".to_string(),
            ptype: None,
            default: None,
        }];
        b.post = "Notes\n-----\nCareful.".to_string();
        b.doctests = ">>> f(1)\n2".to_string();
        assert_eq!(
            b.build(&Config::default()),
            "\"\"\"\nSums.\n\n:param x: the x\n\nNotes\n-----\nCareful.\n>>> f(1)\n2\n\"\"\""
        );
    }

    #[test]
    fn doctests_alone_force_the_sectioned_layout() {
        let mut b = builder();
        b.element_name = "square".to_string();
        b.description = "Squares.".to_string();
        b.has_existing_description = true;
        b.doctests = ">>> f(2)\n4".to_string();
        assert_eq!(
            b.build(&Config::default()),
            "\"\"\"\nSquares.\n\n\n>>> f(2)\n4\n\"\"\""
        );
    }

    #[test]
    fn embedded_quote_run_suppresses_the_closing_quotes() {
        let mut b = builder();
        b.element_name = "work".to_string();
        b.description = "First\n\"\"\"\nLast".to_string();
        b.has_existing_description = true;
        let text = b.build(&Config::default());
        assert!(text.starts_with("\"\"\"\nFirst"));
        assert!(text.ends_with("Last"));
    }
}
