use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Parameters captured by a successful match, in template order.
///
/// Names borrow from the pattern, values borrow from the matched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures<'s, 'p> {
    buf: SmallVec<[(&'s str, &'p str); 8]>,
}

impl<'s, 'p> Captures<'s, 'p> {
    pub fn get(&self, name: &str) -> Option<&'p str> {
        self.buf
            .iter()
            .find_map(|&(k, v)| if name == k { Some(v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }
}

impl<'s, 'p> Deref for Captures<'s, 'p> {
    type Target = [(&'s str, &'p str)];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl<'s, 'p> IntoIterator for Captures<'s, 'p> {
    type Item = (&'s str, &'p str);
    type IntoIter = smallvec::IntoIter<[(&'s str, &'p str); 8]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'s, 'p> Captures<'s, 'p> {
    pub(super) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub(super) fn push(&mut self, name: &'s str, value: &'p str) {
        self.buf.push((name, value))
    }
}
