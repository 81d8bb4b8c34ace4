use super::{Request, Response};
use crate::context::Context;
use crate::mux::Mux;

use std::convert::Infallible;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

use hyper::service::Service;
use hyper::{Body, StatusCode};

/// Serves a [`Mux`] through hyper.
///
/// Each request gets a fresh [`Context`]. A `None` response becomes an
/// empty `404 Not Found`. Clones share the same mux.
#[derive(Debug)]
pub struct MuxService {
    mux: Arc<Mux<Body>>,
}

impl Clone for MuxService {
    fn clone(&self) -> Self {
        Self {
            mux: Arc::clone(&self.mux),
        }
    }
}

impl MuxService {
    pub fn new(mux: Mux<Body>) -> Self {
        Self::from_shared(Arc::new(mux))
    }

    pub fn from_shared(mux: Arc<Mux<Body>>) -> Self {
        Self { mux }
    }

    pub fn mux(&self) -> &Mux<Body> {
        &self.mux
    }

    /// Dispatches one request.
    pub fn serve(&self, mut req: Request) -> Response {
        let cx = Context::new();
        match self.mux.handle(&cx, &mut req) {
            Some(res) => res,
            None => not_found(),
        }
    }
}

impl Service<Request> for MuxService {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        ready(Ok(self.serve(req)))
    }
}

impl Mux<Body> {
    pub fn into_service(self) -> MuxService {
        MuxService::new(self)
    }
}

fn not_found() -> Response {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = StatusCode::NOT_FOUND;
    res
}
