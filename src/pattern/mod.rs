mod captures;
mod compile;
mod order;

pub use self::captures::Captures;
pub use self::order::specificity;

use std::sync::Arc;

use regex::Regex;

/// The compiled form of a path template.
///
/// A pattern is built once by [`CompiledPattern::compile`] and never changes
/// afterwards. Cloning is cheap: the regex program is reference counted.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: Box<str>,
    canonical: Box<str>,
    regex: Regex,
    params: Box<[Param]>,
    depth: usize,
    wildcard: bool,
    first_param: Option<usize>,
}

/// A named capture of a [`CompiledPattern`].
#[derive(Debug, Clone)]
pub struct Param {
    name: Arc<str>,
    group: usize,
    wildcard: bool,
}

impl CompiledPattern {
    /// The normalized template: the input with a single trailing `/` removed.
    /// The root template stays `/`.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The normalized template with placeholder contents trimmed and empty
    /// regexes dropped. Two templates with equal canonical forms match the
    /// same paths.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The anchored regex used for matching.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.params.iter().map(Param::name)
    }

    /// Number of `/` in the template as it was written, before trimming.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Byte offset of the first `{` in the normalized template.
    pub fn first_param(&self) -> Option<usize> {
        self.first_param
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches `path` and yields the captured parameters in template order.
    pub fn captures<'s, 'p>(&'s self, path: &'p str) -> Option<Captures<'s, 'p>> {
        let caps = self.regex.captures(path)?;
        let mut captures = Captures::new();
        for param in self.params.iter() {
            let value: &'p str = match caps.get(param.group) {
                Some(m) => &path[m.start()..m.end()],
                None => &path[path.len()..],
            };
            let value = if param.wildcard {
                value.strip_suffix('/').unwrap_or(value)
            } else {
                value
            };
            captures.push(&param.name, value);
        }
        Some(captures)
    }
}

impl Param {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }
}
