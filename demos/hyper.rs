use nuclear_mux::{mux, prefix_router, Context, MuxService, RequestExt};

use std::convert::Infallible as Never;

use hyper::service::make_service_fn;
use hyper::{Body, Request, Response, Server, StatusCode};

fn not_found(_: &Context, req: &mut Request<Body>) -> Option<Response<Body>> {
    println!("{} {} -> 404", req.method(), req.uri().path());
    let mut res = Response::new(Body::from("404 Not Found"));
    *res.status_mut() = StatusCode::NOT_FOUND;
    Some(res)
}

fn hello(_: &Context, req: &mut Request<Body>) -> Option<Response<Body>> {
    let name = req.param("name")?;
    Some(Response::new(Body::from(format!("hello, {}!", name))))
}

fn file(_: &Context, req: &mut Request<Body>) -> Option<Response<Body>> {
    let path = req.param("*")?;
    Some(Response::new(Body::from(format!("access file: {}", path))))
}

#[tokio::main]
async fn main() {
    let api = prefix_router("/v1", |r| {
        r.get("/file/{*}", file);
    });

    let service: MuxService = mux! {
        GET "/hello/{name}" => hello,
        @ "/api" => api;
        _ => not_found
    }
    .into_service();

    let make = make_service_fn(move |_| {
        let service = service.clone();
        async move { Ok::<_, Never>(service) }
    });

    let addr = ([127, 0, 0, 1], 3000).into();

    let server = Server::bind(&addr).serve(make);

    println!("Server is listening on: http://{}", addr);
    println!("hello: http://{}/hello/world", addr);
    println!("api: http://{}/api/v1/file/path/to/public/file", addr);
    println!("404: http://{}/other/path", addr);
    println!();

    if let Err(e) = server.await {
        eprintln!("server error: {}", e);
    }
}
