mod dispatch;

use crate::builder::RouterBuilder;
use crate::error::Error;
use crate::handler::{Handler, SharedHandler};
use crate::method::IntoMethod;
use crate::middleware::{Middleware, SharedMiddleware};
use crate::pattern::specificity;
use crate::route::{Route, RouteBuilder};

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;
use tracing::debug;

/// The dispatch table.
///
/// Routes are kept in one list per method, ordered from most to least
/// specific (see [`specificity`]). Configure a mux, then share it: once
/// configured it only needs `&self` to serve requests.
pub struct Mux<B> {
    method_map: HashMap<Method, Vec<Route<B>>>,
    not_found: Option<SharedHandler<B>>,
    middleware: Vec<SharedMiddleware<B>>,
}

impl<B> Default for Mux<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Mux<B> {
    pub fn new() -> Self {
        Self {
            method_map: HashMap::new(),
            not_found: None,
            middleware: Vec::new(),
        }
    }

    /// Creates a mux holding the routes of every builder.
    ///
    /// # Panics
    /// Panics if two builders register the same route.
    pub fn with_routers<I>(routers: I) -> Self
    where
        I: IntoIterator<Item = RouterBuilder<B>>,
    {
        let mut mux = Self::new();
        for router in routers {
            mux.include(router);
        }
        mux
    }

    /// Appends a middleware. The first appended runs outermost.
    pub fn wrap(&mut self, middleware: impl Middleware<B> + 'static) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn not_found(&mut self, handler: impl Handler<B> + 'static) -> &mut Self {
        self.not_found = Some(Arc::new(handler));
        self
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
        let route = Route::new(method, template, handler)?;
        let route = self.insert(route)?;
        Ok(RouteBuilder::new(route))
    }

    pub fn include(&mut self, router: RouterBuilder<B>) -> &mut Self {
        if let Err(e) = self.try_include(router) {
            panic!("{}", e);
        }
        self
    }

    /// Registers every route of `router`. Stops at the first duplicate;
    /// routes registered before it stay registered.
    pub fn try_include(&mut self, router: RouterBuilder<B>) -> Result<&mut Self, Error> {
        for route in router {
            self.insert(route)?;
        }
        Ok(self)
    }

    /// Every route, grouped by method in unspecified order. Within a group
    /// routes appear in dispatch order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<B>> + '_ {
        self.method_map.values().flat_map(|list| list.iter())
    }

    /// Routes of one method in dispatch order.
    pub fn routes_for(&self, method: &Method) -> std::slice::Iter<'_, Route<B>> {
        self.method_map
            .get(method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
    }

    pub fn len(&self) -> usize {
        self.method_map.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B> Mux<B> {
    fn insert(&mut self, route: Route<B>) -> Result<&mut Route<B>, Error> {
        let list = self
            .method_map
            .entry(route.method().clone())
            .or_insert_with(Vec::new);

        let canonical = route.pattern().canonical();
        if list.iter().any(|r| r.pattern().canonical() == canonical) {
            return Err(Error::DuplicateRoute {
                method: route.method().clone(),
                template: route.template().into(),
            });
        }

        let pos = list
            .partition_point(|r| specificity(r.pattern(), route.pattern()) != Ordering::Greater);

        debug!(
            method = %route.method(),
            template = route.template(),
            position = pos,
            "register route"
        );

        list.insert(pos, route);
        Ok(&mut list[pos])
    }
}

impl<B> fmt::Debug for Mux<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mux")
            .field("routes", &self.method_map)
            .field("not_found", &self.not_found.is_some())
            .field("middleware", &self.middleware.len())
            .finish()
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

impl<B> Mux<B> {
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
