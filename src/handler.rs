use crate::context::Context;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use http::{Request, Response};

/// Serves a request.
///
/// Returning `None` is the null response: nothing was produced, and the
/// outer layer decides what to send.
pub trait Handler<B>: Send + Sync {
    fn handle(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>>;
}

pub type SharedHandler<B> = Arc<dyn Handler<B>>;

impl<B, F> Handler<B> for F
where
    F: Fn(&Context, &mut Request<B>) -> Option<Response<B>> + Send + Sync,
{
    fn handle(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        (self)(cx, req)
    }
}

/// A handler made from a closure, see [`handler_fn`].
pub struct HandlerFn<B, F> {
    f: F,
    _body: PhantomData<fn(B)>,
}

/// Wraps a closure as a [`Handler`].
///
/// Closures passed here get their argument types from the bound, so they do
/// not need annotations.
pub fn handler_fn<B, F>(f: F) -> HandlerFn<B, F>
where
    F: Fn(&Context, &mut Request<B>) -> Option<Response<B>> + Send + Sync,
{
    HandlerFn {
        f,
        _body: PhantomData,
    }
}

impl<B, F> Handler<B> for HandlerFn<B, F>
where
    F: Fn(&Context, &mut Request<B>) -> Option<Response<B>> + Send + Sync,
{
    fn handle(&self, cx: &Context, req: &mut Request<B>) -> Option<Response<B>> {
        (self.f)(cx, req)
    }
}

impl<B, F> fmt::Debug for HandlerFn<B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish()
    }
}
