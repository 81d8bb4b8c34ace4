use crate::pattern::{Captures, Param};

use std::iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator};
use std::str::FromStr;
use std::sync::Arc;

use http::Request;

/// Path parameters bound to a request.
///
/// The mux stores one `Params` in the request extensions once the middleware
/// chain has run and the route is looked up, right before the handler runs.
/// Read it back with [`RequestExt`].
#[derive(Debug, Clone)]
pub struct Params {
    path: Option<String>,
    offset: Vec<(Arc<str>, usize, usize)>, // (name, start, end)
}

// borrowed by requests without bound params; a const would not promote
static UNBOUND: Params = Params::EMPTY;

impl Default for Params {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Params {
    pub const EMPTY: Params = Params {
        path: None,
        offset: Vec::new(),
    };

    pub fn get(&self, name: &str) -> Option<&str> {
        let path = self.path.as_ref()?;
        self.offset
            .iter()
            .find_map(|&(ref n, s, e)| some_if(&**n == name, || &path[s..e]))
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn len(&self) -> usize {
        self.offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offset.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            path: self.path.as_deref(),
            offset: self.offset.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Params {
    /// `caps` must come from matching `path` against the pattern owning
    /// `params`.
    pub(crate) fn new(path: &str, params: &[Param], caps: &Captures<'_, '_>) -> Self {
        let base = path.as_ptr() as usize;
        let offset: Vec<(Arc<str>, usize, usize)> = params
            .iter()
            .zip(caps.iter())
            .map(|(param, &(_, value))| {
                let start = (value.as_ptr() as usize) - base;
                let end = start + value.len();
                (Arc::clone(param.shared_name()), start, end)
            })
            .collect();
        let path = some_if(!offset.is_empty(), || path.to_owned());
        Self { path, offset }
    }
}

/// Keyed access to the path parameters of a dispatched request.
pub trait RequestExt {
    fn params(&self) -> &Params;

    fn param(&self, name: &str) -> Option<&str> {
        self.params().get(name)
    }
}

impl<B> RequestExt for Request<B> {
    fn params(&self) -> &Params {
        self.extensions().get::<Params>().unwrap_or(&UNBOUND)
    }
}

#[inline(always)]
fn some_if<T>(cond: bool, f: impl FnOnce() -> T) -> Option<T> {
    if cond {
        Some(f())
    } else {
        None
    }
}

pub struct Iter<'a> {
    path: Option<&'a str>,
    offset: std::slice::Iter<'a, (Arc<str>, usize, usize)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let &(ref n, s, e) = self.offset.next()?;
        let path = self.path?;
        Some((&**n, &path[s..e]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offset.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let &(ref n, s, e) = self.offset.next_back()?;
        let path = self.path?;
        Some((&**n, &path[s..e]))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.offset.len()
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::CompiledPattern;

    #[test]
    fn bound_from_captures() {
        let pattern = CompiledPattern::compile("/u/{uid}/p/{pid:\\d+}").unwrap();
        let path = "/u/alice/p/42/";
        let caps = pattern.captures(path).unwrap();
        let params = Params::new(path, pattern.params(), &caps);

        assert_eq!(params.get("uid"), Some("alice"));
        assert_eq!(params.parse::<u32>("pid"), Some(Ok(42)));
        assert_eq!(params.get("nope"), None);

        let all: Vec<_> = params.iter().collect();
        assert_eq!(all, [("uid", "alice"), ("pid", "42")]);
        assert_eq!(params.iter().rev().next(), Some(("pid", "42")));
    }

    #[test]
    fn missing_extension_reads_empty() {
        let req = Request::new(());
        assert!(req.params().is_empty());
        assert_eq!(req.param("id"), None);
        assert!(Params::default().is_empty());
        assert_eq!(Params::EMPTY.iter().next(), None);
    }
}
