#![forbid(unsafe_code)]

mod service;

pub use self::service::MuxService;

pub type Request = hyper::Request<hyper::Body>;
pub type Response = hyper::Response<hyper::Body>;
