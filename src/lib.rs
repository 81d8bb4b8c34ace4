//! An HTTP request multiplexer.
//!
//! Routes are written as path templates such as `/users/{id}`,
//! `/posts/{year:\d{4}}/{slug}` or `/static/{*}`, compiled to anchored
//! regexes, and kept in per-method lists ordered from most to least
//! specific. A [`Mux`] picks the first matching route, binds its parameters
//! onto the request and runs the middleware chain around the handler.

#![forbid(unsafe_code)]

mod builder;
mod context;
mod error;
mod flags;
mod handler;
mod method;
mod middleware;
mod mux;
mod mux_macro;
mod params;
mod pattern;
mod route;

#[cfg(feature = "hyper-service")]
mod hyper_service;

pub use self::builder::{prefix_router, router, RouterBuilder};
pub use self::context::{CancelToken, Context};
pub use self::error::Error;
pub use self::flags::{flags_of_type, Flag, FlagsOfType};
pub use self::handler::{handler_fn, Handler, HandlerFn, SharedHandler};
pub use self::method::IntoMethod;
pub use self::middleware::{middleware_fn, Middleware, MiddlewareFn, Next, SharedMiddleware};
pub use self::mux::Mux;
pub use self::params::{Iter as ParamsIter, Params, RequestExt};
pub use self::pattern::{specificity, Captures, CompiledPattern, Param};
pub use self::route::{Route, RouteBuilder};

#[cfg(feature = "hyper-service")]
pub use self::hyper_service::MuxService;

pub use http::Method;
