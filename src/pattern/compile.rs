use super::{CompiledPattern, Param};
use crate::error::Error;

use std::fmt::Write as _;
use std::sync::Arc;

use regex::Regex;
use smallvec::SmallVec;

const SLASH: char = '/';
const COLON: char = ':';
const WILDCARD: &str = "*";

const SEGMENT_REGEX: &str = "[^/]+";
const WILDCARD_REGEX: &str = ".*?";

const GROUP_PREFIX: &str = "__nuclear_mux_";

enum Piece<'t> {
    Literal(&'t str),
    Param { name: &'t str, regex: Option<&'t str> },
}

impl CompiledPattern {
    /// Compiles a path template.
    ///
    /// A template starts with `/` and may contain placeholders written as
    /// `{name}`, `{name:regex}`, `{*}` or `{*:regex}`. A single trailing `/`
    /// is ignored; the compiled pattern always accepts an optional trailing
    /// `/` on the path.
    pub fn compile(template: &str) -> Result<Self, Error> {
        if template.is_empty() {
            return Err(Error::EmptyTemplate);
        }
        if !template.starts_with(SLASH) {
            return Err(Error::MissingLeadingSlash(template.into()));
        }

        let depth = template.matches(SLASH).count();
        let body = template.strip_suffix(SLASH).unwrap_or(template);

        let pieces = parse(body, template)?;

        let mut source = String::with_capacity(body.len() * 2 + 8);
        source.push('^');

        let mut canonical = String::with_capacity(body.len() + 1);
        let mut params: Vec<Param> = Vec::new();
        let mut wildcard = false;

        for piece in &pieces {
            match *piece {
                Piece::Literal(s) => {
                    source.push_str(&regex::escape(s));
                    canonical.push_str(s);
                }
                Piece::Param { name, regex } => {
                    if name.is_empty() {
                        return Err(Error::EmptyParamName(template.into()));
                    }
                    if wildcard {
                        return Err(Error::WildcardNotLast(template.into()));
                    }
                    if params.iter().any(|p| &*p.name == name) {
                        return Err(Error::DuplicateParam {
                            template: template.into(),
                            name: name.into(),
                        });
                    }

                    let is_wildcard = name == WILDCARD;
                    let pattern = match regex {
                        Some(re) => {
                            Regex::new(re).map_err(|e| Error::invalid_regex(template, e))?;
                            re
                        }
                        None if is_wildcard => WILDCARD_REGEX,
                        None => SEGMENT_REGEX,
                    };

                    let idx = params.len();
                    let _ = write!(source, "(?P<{}{}>{})", GROUP_PREFIX, idx, pattern);
                    let _ = match regex {
                        Some(re) => write!(canonical, "{{{}:{}}}", name, re),
                        None => write!(canonical, "{{{}}}", name),
                    };

                    wildcard |= is_wildcard;
                    params.push(Param {
                        name: Arc::from(name),
                        group: 0,
                        wildcard: is_wildcard,
                    });
                }
            }
        }

        source.push_str("/?$");

        let regex = Regex::new(&source).map_err(|e| Error::invalid_regex(template, e))?;

        // resolve group indices once, user regexes may carry their own groups
        for (group, name) in regex.capture_names().enumerate() {
            let idx = name
                .and_then(|n| n.strip_prefix(GROUP_PREFIX))
                .and_then(|n| n.parse::<usize>().ok());
            if let Some(p) = idx.and_then(|i| params.get_mut(i)) {
                p.group = group;
            }
        }

        let normalized: Box<str> = if body.is_empty() {
            "/".into()
        } else {
            body.into()
        };
        let first_param = normalized.find('{');
        if canonical.is_empty() {
            canonical.push(SLASH);
        }

        Ok(Self {
            template: normalized,
            canonical: canonical.into(),
            regex,
            params: params.into_boxed_slice(),
            depth,
            wildcard,
            first_param,
        })
    }
}

fn parse<'t>(body: &'t str, template: &str) -> Result<SmallVec<[Piece<'t>; 8]>, Error> {
    let bytes = body.as_bytes();
    let mut pieces: SmallVec<[Piece<'t>; 8]> = SmallVec::new();

    let mut lit_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                if lit_start < i {
                    pieces.push(Piece::Literal(&body[lit_start..i]));
                }

                let mut level: usize = 1;
                let mut j = i + 1;
                while j < bytes.len() {
                    match bytes[j] {
                        b'{' => level += 1,
                        b'}' => {
                            level -= 1;
                            if level == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    j += 1;
                }
                if level != 0 {
                    return Err(Error::UnbalancedBraces(template.into()));
                }

                pieces.push(parse_param(&body[i + 1..j]));
                i = j + 1;
                lit_start = i;
            }
            b'}' => return Err(Error::UnbalancedBraces(template.into())),
            _ => i += 1,
        }
    }

    if lit_start < bytes.len() {
        pieces.push(Piece::Literal(&body[lit_start..]));
    }

    Ok(pieces)
}

fn parse_param(inner: &str) -> Piece<'_> {
    match inner.find(COLON) {
        Some(pos) => {
            let regex = inner[pos + 1..].trim();
            Piece::Param {
                name: inner[..pos].trim(),
                regex: if regex.is_empty() { None } else { Some(regex) },
            }
        }
        None => Piece::Param {
            name: inner.trim(),
            regex: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(t: &str) -> CompiledPattern {
        match CompiledPattern::compile(t) {
            Ok(p) => p,
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn anchored_source() {
        let p = compile("/users/{id}");
        assert_eq!(
            p.regex().as_str(),
            "^/users/(?P<__nuclear_mux_0>[^/]+)/?$"
        );

        let p = compile("/a.b/");
        assert_eq!(p.regex().as_str(), "^/a\\.b/?$");
        assert_eq!(p.template(), "/a.b");
        assert_eq!(p.depth(), 2);
    }

    #[test]
    fn root() {
        let p = compile("/");
        assert_eq!(p.template(), "/");
        assert_eq!(p.depth(), 1);
        assert!(p.is_match(""));
        assert!(p.is_match("/"));
        assert!(!p.is_match("/a"));
    }

    #[test]
    fn trimmed_placeholder() {
        let p = compile("/posts/{ year : \\d{4} }");
        let names: Vec<&str> = p.param_names().collect();
        assert_eq!(names, ["year"]);
        assert!(p.is_match("/posts/2020"));
        assert!(!p.is_match("/posts/20"));
    }

    #[test]
    fn canonical_form() {
        assert_eq!(compile("/u/{ id }/").canonical(), "/u/{id}");
        assert_eq!(compile("/u/{id:}").canonical(), "/u/{id}");
        assert_eq!(
            compile("/p/{ year : \\d{4} }").canonical(),
            "/p/{year:\\d{4}}"
        );
        assert_eq!(compile("/").canonical(), "/");
        assert_eq!(compile("/u/{ id }").template(), "/u/{ id }");
    }

    #[test]
    fn group_indices_skip_user_groups() {
        let p = compile("/files/{name:(a|b)+}/{*:.*\\.(css|js)}");
        let caps = p.captures("/files/abba/x/y.css").unwrap();
        assert_eq!(&*caps, &[("name", "abba"), ("*", "x/y.css")]);
    }

    #[test]
    fn rejects_malformed() {
        let err = |t: &str| CompiledPattern::compile(t).unwrap_err();

        assert!(matches!(err(""), Error::EmptyTemplate));
        assert!(matches!(err("users"), Error::MissingLeadingSlash(_)));
        assert!(matches!(err("/users/{}"), Error::EmptyParamName(_)));
        assert!(matches!(err("/users/{ :\\d+}"), Error::EmptyParamName(_)));
        assert!(matches!(err("/users/{id"), Error::UnbalancedBraces(_)));
        assert!(matches!(err("/users/id}"), Error::UnbalancedBraces(_)));
        assert!(matches!(err("/u/{id:\\d{2}"), Error::UnbalancedBraces(_)));
        assert!(matches!(err("/{*}/{id}"), Error::WildcardNotLast(_)));
        assert!(matches!(err("/u/{id:(}"), Error::InvalidRegex { .. }));
        assert!(matches!(err("/u/{id:a)(b}"), Error::InvalidRegex { .. }));
        assert!(matches!(
            err("/u/{id}/p/{id}"),
            Error::DuplicateParam { .. }
        ));
    }
}
