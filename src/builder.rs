use crate::error::Error;
use crate::handler::Handler;
use crate::method::IntoMethod;
use crate::route::{Route, RouteBuilder};

use std::fmt;
use std::sync::Arc;

use http::Method;
use tracing::debug;

const SLASH: char = '/';

/// Collects routes without dispatching them.
///
/// A builder may carry a prefix, applied to every route added to it and to
/// every route it includes. A [`Mux`](crate::Mux) or another builder takes
/// the collected routes with `include`.
pub struct RouterBuilder<B> {
    prefix: Option<Box<str>>,
    routes: Vec<Route<B>>,
}

impl<B> Default for RouterBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a builder and runs `f` on it.
pub fn router<B>(f: impl FnOnce(&mut RouterBuilder<B>)) -> RouterBuilder<B> {
    let mut builder = RouterBuilder::new();
    f(&mut builder);
    builder
}

/// Creates a prefixed builder and runs `f` on it.
///
/// # Panics
/// Panics if `prefix` is not a valid prefix, see [`RouterBuilder::try_with_prefix`].
pub fn prefix_router<B>(prefix: &str, f: impl FnOnce(&mut RouterBuilder<B>)) -> RouterBuilder<B> {
    let mut builder = RouterBuilder::with_prefix(prefix);
    f(&mut builder);
    builder
}

impl<B> RouterBuilder<B> {
    pub fn new() -> Self {
        Self {
            prefix: None,
            routes: Vec::new(),
        }
    }

    pub fn with_prefix(prefix: &str) -> Self {
        match Self::try_with_prefix(prefix) {
            Ok(b) => b,
            Err(e) => panic!("{}", e),
        }
    }

    /// A prefix starts with `/` and is at least two bytes long. A trailing
    /// `/` is dropped.
    pub fn try_with_prefix(prefix: &str) -> Result<Self, Error> {
        if !prefix.starts_with(SLASH) || prefix.len() < 2 {
            return Err(Error::InvalidPrefix(prefix.into()));
        }
        let prefix = prefix.strip_suffix(SLASH).unwrap_or(prefix);
        Ok(Self {
            prefix: Some(prefix.into()),
            routes: Vec::new(),
        })
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn routes(&self) -> std::slice::Iter<'_, Route<B>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn route(
        &mut self,
        method: impl IntoMethod,
        template: &str,
        handler: impl Handler<B> + 'static,
    ) -> RouteBuilder<'_, B> {
        match self.try_route(method, template, handler) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_route(
        &mut self,
        method: impl IntoMethod,
        template: &str,
        handler: impl Handler<B> + 'static,
    ) -> Result<RouteBuilder<'_, B>, Error> {
        let method = method.into_method()?;
        let template = self.effective_template(template)?;
        let route = Route::from_shared(method, &template, Arc::new(handler))?;
        self.routes.push(route);
        let last = self.routes.len() - 1;
        Ok(RouteBuilder::new(&mut self.routes[last]))
    }

    /// Moves every route of `other` into this builder, in order. This
    /// builder's prefix, if any, is prepended to each of them.
    pub fn include(&mut self, other: RouterBuilder<B>) -> &mut Self {
        if let Err(e) = self.try_include(other) {
            panic!("{}", e);
        }
        self
    }

    pub fn try_include(&mut self, other: RouterBuilder<B>) -> Result<&mut Self, Error> {
        debug!(
            prefix = ?self.prefix,
            child_prefix = ?other.prefix,
            count = other.routes.len(),
            "include router"
        );
        self.routes.reserve(other.routes.len());
        for route in other.routes {
            let route = match self.prefix {
                Some(ref prefix) => route.prefixed(prefix)?,
                None => route,
            };
            self.routes.push(route);
        }
        Ok(self)
    }

    /// Builds a child with `prefix`, runs `f` on it and includes it.
    pub fn nest(&mut self, prefix: &str, f: impl FnOnce(&mut RouterBuilder<B>)) -> &mut Self {
        let child = prefix_router(prefix, f);
        self.include(child)
    }

    pub fn try_nest(
        &mut self,
        prefix: &str,
        f: impl FnOnce(&mut RouterBuilder<B>),
    ) -> Result<&mut Self, Error> {
        let mut child = Self::try_with_prefix(prefix)?;
        f(&mut child);
        self.try_include(child)
    }
}

impl<B> RouterBuilder<B> {
    fn effective_template(&self, template: &str) -> Result<String, Error> {
        if template.is_empty() {
            return Err(Error::EmptyTemplate);
        }
        if !template.starts_with(SLASH) {
            return Err(Error::MissingLeadingSlash(template.into()));
        }
        let mut effective = match self.prefix {
            Some(ref prefix) if template == "/" => String::from(&**prefix),
            Some(ref prefix) => format!("{}{}", prefix, template),
            None => template.to_owned(),
        };
        if effective.len() > 2 && effective.ends_with(SLASH) {
            effective.pop();
        }
        Ok(effective)
    }
}

impl<B> fmt::Debug for RouterBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("prefix", &self.prefix)
            .field("routes", &self.routes)
            .finish()
    }
}

impl<B> IntoIterator for RouterBuilder<B> {
    type Item = Route<B>;
    type IntoIter = std::vec::IntoIter<Route<B>>;
    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl<'a, B> IntoIterator for &'a RouterBuilder<B> {
    type Item = &'a Route<B>;
    type IntoIter = std::slice::Iter<'a, Route<B>>;
    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

macro_rules! define_method {
    ($name:ident, $method:ident) => {
        pub fn $name(
            &mut self,
            template: &str,
            handler: impl Handler<B> + 'static,
        ) -> RouteBuilder<'_, B> {
            self.route(Method::$method, template, handler)
        }
    };
}

impl<B> RouterBuilder<B> {
    define_method!(get, GET);
    define_method!(post, POST);
    define_method!(put, PUT);
    define_method!(delete, DELETE);
    define_method!(head, HEAD);
    define_method!(options, OPTIONS);
    define_method!(connect, CONNECT);
    define_method!(patch, PATCH);
    define_method!(trace, TRACE);
}
