use super::Mux;

use crate::context::Context;
use crate::handler::Handler;
use crate::middleware::Next;
use crate::params::Params;
use crate::pattern::Captures;
use crate::route::Route;

use http::{Method, Request, Response};
use tracing::trace;

impl<B> Mux<B> {
    /// The first route of `method`, in dispatch order, matching `path`.
    pub fn find<'s, 'p>(
        &'s self,
        method: &Method,
        path: &'p str,
    ) -> Option<(&'s Route<B>, Captures<'s, 'p>)> {
        self.method_map
            .get(method)?
            .iter()
            .find_map(|route| route.matches(path).map(|caps| (route, caps)))
    }

    /// Runs the middleware chain. Its last step looks up the route for the
    /// request as the middleware left it, binds the parameters and calls the
    /// route's handler.
    ///
    /// Without a matching route the chain ends in the not-found handler, or
    /// in `None` when there is none.
    pub fn handle(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        Next::new(&self.middleware, self).run(cx, req)
    }

    pub(crate) fn dispatch(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        let (route, params) = {
            let path = req.uri().path();
            match self.find(req.method(), path) {
                Some((route, caps)) => {
                    let params = Params::new(path, route.pattern().params(), &caps);
                    (Some(route), params)
                }
                None => (None, Params::default()),
            }
        };

        trace!(
            method = %req.method(),
            path = req.uri().path(),
            route = route.map(Route::template),
            "dispatch"
        );

        req.extensions_mut().insert(params);

        match route {
            Some(route) => route.handle(cx, req),
            None => self.not_found.as_ref()?.handle(cx, req),
        }
    }
}

impl<B> Handler<B> for Mux<B> {
    fn handle(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        Mux::handle(self, cx, req)
    }
}
