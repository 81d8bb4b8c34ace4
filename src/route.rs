use crate::context::Context;
use crate::error::Error;
use crate::flags::Flag;
use crate::handler::{Handler, SharedHandler};
use crate::method::IntoMethod;
use crate::pattern::{Captures, CompiledPattern};

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use http::{Method, Request, Response};

/// A method, a compiled template and the handler serving it.
pub struct Route<B> {
    method: Method,
    pattern: CompiledPattern,
    handler: SharedHandler<B>,
    flags: Vec<Flag>,
}

impl<B> Route<B> {
    pub fn new(
        method: impl IntoMethod,
        template: &str,
        handler: impl Handler<B> + 'static,
    ) -> Result<Self, Error> {
        Self::from_shared(method.into_method()?, template, Arc::new(handler))
    }

    pub(crate) fn from_shared(
        method: Method,
        template: &str,
        handler: SharedHandler<B>,
    ) -> Result<Self, Error> {
        let pattern = CompiledPattern::compile(template)?;
        Ok(Self {
            method,
            pattern,
            handler,
            flags: Vec::new(),
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn Handler<B> {
        &*self.handler
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn matches<'s, 'p>(&'s self, path: &'p str) -> Option<Captures<'s, 'p>> {
        self.pattern.captures(path)
    }

    pub fn handle(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        self.handler.handle(cx, req)
    }
}

impl<B> Route<B> {
    /// Recompiles this route under `prefix`. A root route maps to exactly
    /// the prefix.
    pub(crate) fn prefixed(self, prefix: &str) -> Result<Self, Error> {
        let template = match self.template() {
            "/" => prefix.to_owned(),
            t => format!("{}{}", prefix, t),
        };
        let pattern = CompiledPattern::compile(&template)?;
        Ok(Self { pattern, ..self })
    }

    pub(crate) fn push_flag(&mut self, flag: Flag) {
        self.flags.push(flag)
    }
}

impl<B> fmt::Debug for Route<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template())
            .field("flags", &self.flags.len())
            .finish()
    }
}

/// Attaches flags to a route that was just registered.
pub struct RouteBuilder<'a, B> {
    route: &'a mut Route<B>,
}

impl<'a, B> RouteBuilder<'a, B> {
    pub(crate) fn new(route: &'a mut Route<B>) -> Self {
        Self { route }
    }

    pub fn flag<T: Any + Send + Sync>(self, flag: T) -> Self {
        self.route.push_flag(Arc::new(flag));
        self
    }

    pub fn flags<I>(self, flags: I) -> Self
    where
        I: IntoIterator<Item = Flag>,
    {
        for flag in flags {
            self.route.push_flag(flag);
        }
        self
    }

    pub fn route(&self) -> &Route<B> {
        self.route
    }
}
