use crate::context::Context;
use crate::mux::Mux;
use crate::route::Route;

use std::marker::PhantomData;
use std::sync::Arc;

use http::{Request, Response};

/// Intercepts a request on its way to the handler.
///
/// A middleware either calls [`Next::run`] to continue, or returns a
/// response of its own to short-circuit the rest of the chain.
pub trait Middleware<B>: Send + Sync {
    fn call(&self, cx: &Context, req: &mut Request<B>, next: Next<'_, B>) -> Option<Response<B>>;
}

pub type SharedMiddleware<B> = Arc<dyn Middleware<B>>;

impl<B, F> Middleware<B> for F
where
    F: Fn(&Context, &mut Request<B>, Next<'_, B>) -> Option<Response<B>> + Send + Sync,
{
    fn call(&self, cx: &Context, req: &mut Request<B>, next: Next<'_, B>) -> Option<Response<B>> {
        (self)(cx, req, next)
    }
}

/// A middleware made from a closure, see [`middleware_fn`].
pub struct MiddlewareFn<B, F> {
    f: F,
    _body: PhantomData<fn(B)>,
}

/// Wraps a closure as a [`Middleware`] without annotating its arguments.
pub fn middleware_fn<B, F>(f: F) -> MiddlewareFn<B, F>
where
    F: Fn(&Context, &mut Request<B>, Next<'_, B>) -> Option<Response<B>> + Send + Sync,
{
    MiddlewareFn {
        f,
        _body: PhantomData,
    }
}

impl<B, F> Middleware<B> for MiddlewareFn<B, F>
where
    F: Fn(&Context, &mut Request<B>, Next<'_, B>) -> Option<Response<B>> + Send + Sync,
{
    fn call(&self, cx: &Context, req: &mut Request<B>, next: Next<'_, B>) -> Option<Response<B>> {
        (self.f)(cx, req, next)
    }
}

/// The rest of the chain: the remaining middleware, then the dispatcher.
///
/// The dispatcher looks the route up from the request as it arrives there,
/// so middleware may rewrite the method or URI to change which route runs.
/// Without a match it calls the not-found handler, or ends with `None`.
pub struct Next<'a, B> {
    stack: &'a [SharedMiddleware<B>],
    mux: &'a Mux<B>,
}

impl<'a, B> Next<'a, B> {
    pub(crate) fn new(stack: &'a [SharedMiddleware<B>], mux: &'a Mux<B>) -> Self {
        Self { stack, mux }
    }

    /// The route `req` would be dispatched to in its current form.
    ///
    /// This is a preview: if later middleware rewrites the request, the
    /// dispatcher may select a different route.
    pub fn route(&self, req: &Request<B>) -> Option<&'a Route<B>> {
        let mux = self.mux;
        mux.find(req.method(), req.uri().path())
            .map(|(route, _)| route)
    }

    /// Number of middleware left before the dispatcher.
    pub fn remaining(&self) -> usize {
        self.stack.len()
    }

    pub fn run(self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        match self.stack.split_first() {
            Some((middleware, rest)) => {
                let next = Next {
                    stack: rest,
                    mux: self.mux,
                };
                middleware.call(cx, req, next)
            }
            None => self.mux.dispatch(cx, req),
        }
    }
}
