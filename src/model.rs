//! Data model shared by the signature parser, the docstring parser and
//! the renderers.
//!
//! Everything in here is plain data. The engine fills these structs in
//! from the input source and the render side only reads them, so none
//! of the types carry behavior beyond small convenience checks.

use anyhow::{bail, Result};

/// One parameter taken from a `def` signature.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Type annotation, if the signature carries one.
    pub ptype: Option<String>,
    /// Default value, if the signature carries one.
    pub default: Option<String>,
}

/// Kind of statement a docstring is attached to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    #[default]
    Function,
    Class,
    Module,
}

/// A `def` or `class` statement with the facts read from its signature.
#[derive(Debug, Default, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub params: Vec<Param>,
    /// Return annotation after `->`, if any.
    pub rtype: Option<String>,
}

/// One parameter as read from the input docstring.
///
/// The name can be missing: Google sections may carry description
/// fragments that never had a `name:` line of their own.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocParam {
    pub name: Option<String>,
    pub description: String,
    pub ptype: Option<String>,
}

/// One entry of a sectioned return block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReturnEntry {
    pub name: Option<String>,
    pub description: String,
    pub rtype: Option<String>,
}

/// Return information read from the input docstring.
///
/// Tag dialects produce free text while section dialects produce a list
/// of entries. `Absent` means no return marker was found at all, which
/// is not the same thing as an empty description.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ReturnDoc {
    #[default]
    Absent,
    Text(String),
    Entries(Vec<ReturnEntry>),
}

impl ReturnDoc {
    /// True when there is anything to render. Empty text and an empty
    /// entry list both count as missing.
    pub fn is_present(&self) -> bool {
        match self {
            ReturnDoc::Absent => false,
            ReturnDoc::Text(text) => !text.is_empty(),
            ReturnDoc::Entries(entries) => !entries.is_empty(),
        }
    }
}

/// One entry of a raises block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RaiseEntry {
    pub name: Option<String>,
    pub description: String,
}

/// Everything extracted from one input docstring.
#[derive(Debug, Default, Clone)]
pub struct ParsedComment {
    /// Leading free-text description, dedented.
    pub description: String,
    pub params: Vec<DocParam>,
    pub ret: ReturnDoc,
    /// Return type from an rtype tag. Section dialects never set it.
    pub rtype: Option<String>,
    pub raises: Vec<RaiseEntry>,
    /// Doctest blocks, already dedented. They are cut out of `raw`
    /// before anything else is parsed and pass through untouched.
    pub doctests: String,
    /// Input text with doctests removed, still carrying its original
    /// indentation.
    pub raw: String,
}

impl ParsedComment {
    /// True when the input carried a non-blank description.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// A parameter after merging docstring text with signature facts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutParam {
    pub name: String,
    pub description: String,
    pub ptype: Option<String>,
    pub default: Option<String>,
}

/// A non-fatal problem found while parsing or merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Diagnostic { message: message.into() }
    }
}

/// A generated docstring together with the diagnostics collected on
/// the way there.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Full docstring text including quotes and indentation.
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// True when an optional text value is present and non-empty.
pub(crate) fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Visibility of a method, judged from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Public,
    Protected,
    Private,
}

impl Scope {
    /// Dunder names count as public, `__x` as private and `_x` as
    /// protected.
    pub fn of(name: &str) -> Scope {
        if name.starts_with("__") && name.ends_with("__") {
            Scope::Public
        } else if name.starts_with("__") {
            Scope::Private
        } else if name.starts_with('_') {
            Scope::Protected
        } else {
            Scope::Public
        }
    }

    pub fn from_name(name: &str) -> Result<Scope> {
        match name {
            "public" => Ok(Scope::Public),
            "protected" => Ok(Scope::Protected),
            "private" => Ok(Scope::Private),
            other => bail!("unknown method scope: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_doc_presence() {
        assert!(!ReturnDoc::Absent.is_present());
        assert!(!ReturnDoc::Text(String::new()).is_present());
        assert!(!ReturnDoc::Entries(Vec::new()).is_present());
        assert!(ReturnDoc::Text("the value".into()).is_present());
        assert!(ReturnDoc::Entries(vec![ReturnEntry::default()]).is_present());
    }

    #[test]
    fn scope_of_names() {
        assert_eq!(Scope::of("run"), Scope::Public);
        assert_eq!(Scope::of("_helper"), Scope::Protected);
        assert_eq!(Scope::of("__hidden"), Scope::Private);
        assert_eq!(Scope::of("__init__"), Scope::Public);
    }

    #[test]
    fn scope_from_name_rejects_unknown() {
        assert!(Scope::from_name("private").is_ok());
        assert!(Scope::from_name("friend").is_err());
    }
}
