//! Extraction for the legacy groups dialect.
//!
//! A group opens with a bare keyword line such as `Parameters:` and
//! runs until the next keyword line. Items are free form, usually
//! `name - description`, so they are fished out with small patterns.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{DocParam, RaiseEntry};
use crate::style::{GROUPS_PARAM_KEYWORDS, GROUPS_RAISE_KEYWORDS, GROUPS_RETURN_KEYWORDS};

static RE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*(\w+)[\W\s]+(\w[\s\w]+)").unwrap());
static RE_ITEM_DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*([\w.]+)[\W\s]+(\w[\s\w]+)").unwrap());
static RE_NAME_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\W*(\w+)\W*").unwrap());

/// Index of the first line that is exactly one of the keywords, with
/// or without a trailing colon.
fn group_key_line(lines: &[&str], keywords: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let lowered = line.trim().to_lowercase();
        keywords
            .iter()
            .any(|kw| lowered == *kw || lowered == format!("{kw}:"))
    })
}

fn group_line(lines: &[&str]) -> Option<usize> {
    [
        &GROUPS_PARAM_KEYWORDS[..],
        &GROUPS_RETURN_KEYWORDS[..],
        &GROUPS_RAISE_KEYWORDS[..],
    ]
    .iter()
    .filter_map(|keywords| group_key_line(lines, keywords))
    .min()
}

/// Character index of the first group keyword, bounding the leading
/// description.
pub fn group_start_index(data: &str) -> Option<usize> {
    let lines: Vec<&str> = data.lines().collect();
    let idx = group_line(&lines)?;
    Some(lines[..idx].iter().map(|l| l.len() + 1).sum())
}

fn group_body<'a>(lines: &'a [&'a str], keywords: &[&str]) -> Option<&'a [&'a str]> {
    let idx = group_key_line(lines, keywords)?;
    let body = lines.get(idx + 1..).unwrap_or(&[]);
    let end = group_line(body).unwrap_or(body.len());
    Some(&body[..end])
}

pub fn extract_params(data: &str) -> Vec<DocParam> {
    let lines: Vec<&str> = data.lines().collect();
    let Some(body) = group_body(&lines, &GROUPS_PARAM_KEYWORDS) else {
        return Vec::new();
    };
    let mut params = Vec::new();
    for line in body {
        let stripped = line.trim();
        let item = match RE_ITEM.captures(stripped) {
            Some(caps) => Some((
                caps[1].trim().to_string(),
                caps[2].trim().to_string(),
            )),
            None => RE_NAME_ONLY
                .captures(stripped)
                .map(|caps| (caps[1].trim().to_string(), String::new())),
        };
        if let Some((name, description)) = item {
            if !name.is_empty() {
                params.push(DocParam {
                    name: Some(name),
                    description,
                    ptype: None,
                });
            }
        }
    }
    params
}

pub fn extract_raises(data: &str) -> Vec<RaiseEntry> {
    let lines: Vec<&str> = data.lines().collect();
    let Some(body) = group_body(&lines, &GROUPS_RAISE_KEYWORDS) else {
        return Vec::new();
    };
    let mut raises = Vec::new();
    for line in body {
        let stripped = line.trim();
        let item = match RE_ITEM_DOTTED.captures(stripped) {
            Some(caps) => Some((
                caps[1].trim().to_string(),
                caps[2].trim().to_string(),
            )),
            None => RE_NAME_ONLY
                .captures(stripped)
                .map(|caps| (caps[1].trim().to_string(), String::new())),
        };
        if let Some((name, description)) = item {
            if !name.is_empty() {
                raises.push(RaiseEntry {
                    name: Some(name),
                    description,
                });
            }
        }
    }
    raises
}

/// Return text of the group, present as soon as the keyword line is.
pub fn extract_return(data: &str) -> Option<String> {
    let lines: Vec<&str> = data.lines().collect();
    let body = group_body(&lines, &GROUPS_RETURN_KEYWORDS)?;
    Some(body.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "My description.\n\n\
        Parameters:\n\
        \x20   first - the first param\n\
        \x20   second - the second one\n\n\
        Returns:\n\
        \x20   the result\n\n\
        Raises:\n\
        \x20   my.mod.Error - on bad input\n";

    #[test]
    fn params_come_from_the_parameters_group() {
        let params = extract_params(DOC);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name.as_deref(), Some("first"));
        assert_eq!(params[0].description, "the first param");
        assert_eq!(params[0].ptype, None);
        assert_eq!(params[1].name.as_deref(), Some("second"));
    }

    #[test]
    fn return_group_joins_its_lines() {
        assert_eq!(extract_return(DOC).as_deref(), Some("the result"));
        assert_eq!(extract_return("no groups at all\n"), None);
    }

    #[test]
    fn raises_keep_dotted_names() {
        let raises = extract_raises(DOC);
        assert_eq!(raises.len(), 1);
        assert_eq!(raises[0].name.as_deref(), Some("my.mod.Error"));
        assert_eq!(raises[0].description, "on bad input");
    }

    #[test]
    fn description_runs_until_the_first_group() {
        let idx = group_start_index(DOC).unwrap();
        assert!(DOC[idx..].starts_with("Parameters:"));
        assert_eq!(group_start_index("plain text\n"), None);
    }

    #[test]
    fn keyword_must_stand_alone() {
        let doc = "returns the number of items\n\nReturns:\n    a count\n";
        assert_eq!(extract_return(doc).as_deref(), Some("a count"));
    }
}
