//! Signature splitting for `def` and `class` statements.
//!
//! Takes the accumulated statement text, one logical line ending with
//! a colon, and pulls out the element kind, its name, the parameter
//! list with annotations and defaults, and the annotated return type.

use crate::model::{Diagnostic, Element, ElementKind, Param};

fn closing(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        '\'' => Some('\''),
        '"' => Some('"'),
        _ => None,
    }
}

/// Split a statement into an element description.
///
/// Lines that are neither a `def` nor a `class` statement produce an
/// empty function element.
pub fn parse(raw: &str) -> (Element, Vec<Diagnostic>) {
    let l = raw.trim();
    let mut element = Element::default();
    let mut diagnostics = Vec::new();
    if !l.starts_with("async def ") && !l.starts_with("def ") && !l.starts_with("class ") {
        return (element, diagnostics);
    }
    let l = if l.starts_with("def") {
        element.kind = ElementKind::Function;
        l.replace("def ", "")
    } else if l.starts_with("async") {
        element.kind = ElementKind::Function;
        l.replace("async def ", "")
    } else {
        element.kind = ElementKind::Class;
        l.replace("class ", "")
    };
    element.name = match l.find('(') {
        Some(idx) => l[..idx].trim().to_string(),
        None => l.trim_end_matches(':').trim().to_string(),
    };
    if element.kind == ElementKind::Function {
        let cleaned = remove_signature_comment(&l);
        let (params, rtype) = extract_signature_elements(&cleaned, &mut diagnostics);
        element.params = params
            .into_iter()
            .filter(|p| !p.name.is_empty() && p.name != "self" && p.name != "cls")
            .collect();
        element.rtype = rtype;
    }
    (element, diagnostics)
}

/// Drop a trailing `#` comment, unless the hash sits inside brackets
/// or a string literal.
fn remove_signature_comment(txt: &str) -> String {
    let mut ret = String::new();
    let mut inside: Option<char> = None;
    for c in txt.chars() {
        let in_block = match inside {
            Some(open) => closing(open) != Some(c),
            None => false,
        };
        if in_block || (inside.is_none() && closing(c).is_some()) {
            if inside.is_none() {
                inside = Some(c);
            }
            ret.push(c);
            continue;
        }
        if inside.is_some() {
            inside = None;
            ret.push(c);
            continue;
        }
        if c == '#' {
            break;
        }
        ret.push(c);
    }
    ret
}

#[derive(Default)]
struct RawParam {
    param: String,
    ptype: String,
    default: String,
}

impl RawParam {
    fn into_param(self) -> Param {
        let none_if_empty = |s: String| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        };
        Param {
            name: self.param.trim().to_string(),
            ptype: none_if_empty(self.ptype),
            default: none_if_empty(self.default),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Reading {
    Param,
    AfterParam,
    Type,
    AfterType,
    Default,
    AfterDefault,
}

impl Reading {
    fn is_after(self) -> bool {
        matches!(
            self,
            Reading::AfterParam | Reading::AfterType | Reading::AfterDefault
        )
    }
}

/// Character walk over the parameter list between the outermost
/// parentheses. Brackets and quotes protect their content, commas
/// split parameters, a colon opens the annotation and an equals sign
/// the default value.
fn extract_signature_elements(
    txt: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Vec<Param>, Option<String>) {
    let open = txt.find('(');
    let close = txt.rfind(')');
    let colon = txt.rfind(':');
    let rtype = match (close, colon) {
        (Some(c), Some(e)) if e > c => {
            let cleaned = txt[c + 1..e]
                .replace(' ', "")
                .replace('\t', "")
                .replace("->", "");
            let cleaned = cleaned.trim().to_string();
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        }
        _ => None,
    };
    let body = match (open, close) {
        (Some(o), Some(c)) if c > o => &txt[o + 1..c],
        _ => "",
    };

    let mut elems: Vec<RawParam> = vec![RawParam::default()];
    let mut reading = Reading::Param;
    let mut inside: Option<char> = None;
    for c in body.chars() {
        let in_block = match inside {
            Some(open) => closing(open) != Some(c),
            None => false,
        };
        if in_block || (inside.is_none() && closing(c).is_some()) {
            let fresh = inside.is_none();
            if fresh {
                inside = Some(c);
            }
            match reading {
                Reading::Type => {
                    if let Some(current) = elems.last_mut() {
                        current.ptype.push(c);
                    }
                }
                Reading::Default => {
                    if let Some(current) = elems.last_mut() {
                        current.default.push(c);
                    }
                }
                _ => {
                    if fresh {
                        diagnostics.push(Diagnostic::new(format!(
                            "unexpected nested {c:?} in signature while reading a parameter name"
                        )));
                    }
                }
            }
            continue;
        }
        if inside.is_some() {
            inside = None;
        }
        let current = match elems.last_mut() {
            Some(current) => current,
            None => continue,
        };
        match reading {
            Reading::Param => {
                if !matches!(c, ':' | ' ' | ',' | '=') {
                    current.param.push(c);
                } else if (c == ' ' && !current.param.is_empty()) || c != ' ' {
                    reading = Reading::AfterParam;
                }
            }
            Reading::Type => {
                if !matches!(c, ',' | '=') {
                    current.ptype.push(c);
                } else {
                    reading = Reading::AfterType;
                }
            }
            Reading::Default => {
                if c != ',' {
                    current.default.push(c);
                } else {
                    reading = Reading::AfterDefault;
                }
            }
            _ => {}
        }
        if reading.is_after() {
            if reading == Reading::AfterParam && c == ':' {
                reading = Reading::Type;
            } else if c == ',' {
                elems.push(RawParam::default());
                reading = Reading::Param;
            } else if c == '=' {
                reading = Reading::Default;
            }
        }
    }
    (elems.into_iter().map(RawParam::into_param).collect(), rtype)
}

/// Triple quoted default values collapse to single quoted ones so
/// they fit on a documentation line.
pub fn normalize_default(value: &str) -> String {
    let wrapped = |q: &str| value.starts_with(q) && value.ends_with(q);
    if wrapped("\"\"\"") || wrapped("'''") {
        let inner = if value.len() >= 6 {
            &value[3..value.len() - 3]
        } else {
            ""
        };
        return format!("'{inner}'");
    }
    value.replace("\"\"\"", "'").replace("'''", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_parameters() {
        let (elem, diags) = parse("def func(param1, param2='default val'):");
        assert!(diags.is_empty());
        assert_eq!(elem.kind, ElementKind::Function);
        assert_eq!(elem.name, "func");
        assert_eq!(elem.rtype, None);
        assert_eq!(elem.params.len(), 2);
        assert_eq!(elem.params[0].name, "param1");
        assert_eq!(elem.params[0].ptype, None);
        assert_eq!(elem.params[0].default, None);
        assert_eq!(elem.params[1].name, "param2");
        assert_eq!(elem.params[1].default.as_deref(), Some("'default val'"));
    }

    #[test]
    fn annotations_and_return_type() {
        let (elem, _) = parse("def f(x: int, y: Tuple[int, str] = None) -> bool:");
        assert_eq!(elem.params[0].ptype.as_deref(), Some("int"));
        assert_eq!(elem.params[1].ptype.as_deref(), Some("Tuple[int, str]"));
        assert_eq!(elem.params[1].default.as_deref(), Some("None"));
        assert_eq!(elem.rtype.as_deref(), Some("bool"));
    }

    #[test]
    fn self_and_cls_are_dropped() {
        let (elem, _) = parse("def method(self, value):");
        assert_eq!(elem.params.len(), 1);
        assert_eq!(elem.params[0].name, "value");
        let (elem, _) = parse("def build(cls):");
        assert!(elem.params.is_empty());
    }

    #[test]
    fn class_statement_keeps_only_the_name() {
        let (elem, _) = parse("class Foo(Base, metaclass=Meta):");
        assert_eq!(elem.kind, ElementKind::Class);
        assert_eq!(elem.name, "Foo");
        assert!(elem.params.is_empty());
        assert_eq!(elem.rtype, None);
    }

    #[test]
    fn async_def_is_a_function() {
        let (elem, _) = parse("async def fetch(url):");
        assert_eq!(elem.kind, ElementKind::Function);
        assert_eq!(elem.name, "fetch");
        assert_eq!(elem.params[0].name, "url");
    }

    #[test]
    fn trailing_comment_is_ignored() {
        let (elem, _) = parse("def f(a, b=2):  # builds the thing");
        assert_eq!(elem.params.len(), 2);
        let (elem, _) = parse("def f(tag='#keep'):");
        assert_eq!(elem.params[0].default.as_deref(), Some("'#keep'"));
    }

    #[test]
    fn brackets_protect_commas() {
        let (elem, _) = parse("def f(x={'a': 1}, y=(1, 2), z=foo(3, 4)):");
        assert_eq!(elem.params.len(), 3);
        assert_eq!(elem.params[0].default.as_deref(), Some("{'a': 1}"));
        assert_eq!(elem.params[1].default.as_deref(), Some("(1, 2)"));
        assert_eq!(elem.params[2].default.as_deref(), Some("foo(3, 4)"));
    }

    #[test]
    fn spaced_return_annotation_is_compacted() {
        let (elem, _) = parse("def f(a) ->  Dict [str, int] :");
        assert_eq!(elem.rtype.as_deref(), Some("Dict[str,int]"));
    }

    #[test]
    fn normalize_default_collapses_triple_quotes() {
        assert_eq!(normalize_default("\"\"\"text\"\"\""), "'text'");
        assert_eq!(normalize_default("'''text'''"), "'text'");
        assert_eq!(normalize_default("42"), "42");
    }
}
