use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use nuclear_mux::{handler_fn, CompiledPattern, Context, Handler, Method, Mux};

use http::{Request, Response};

fn ok() -> impl Handler<()> + 'static {
    handler_fn(|_, _| Some(Response::new(())))
}

fn pattern_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern-compile");

    group.bench_function("typed-params", |b| {
        b.iter(|| CompiledPattern::compile("/posts/{year:\\d{4}}/{slug:[^/]+}").unwrap())
    });
}

fn mux_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("mux-find");

    group.bench_function("single-route", |b| {
        let mut mux: Mux<()> = Mux::new();
        mux.get("/hello/{name}", ok());
        b.iter(|| mux.find(&Method::GET, "/hello/world").is_some())
    });

    group.bench_function("last-of-many", |b| {
        let mut mux: Mux<()> = Mux::new();
        for i in 0..64 {
            mux.get(&format!("/static/{}/page", i), ok());
        }
        mux.get("/u/{id}", ok());
        b.iter(|| mux.find(&Method::GET, "/u/42").is_some())
    });
}

fn mux_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("mux-handle");

    group.bench_function("params-and-middleware", |b| {
        let mut mux: Mux<()> = Mux::new();
        mux.wrap(nuclear_mux::middleware_fn(|cx, req, next| next.run(cx, req)));
        mux.get("/users/{id}", ok());
        let cx = Context::new();
        b.iter_batched_ref(
            || Request::builder().uri("/users/42").body(()).unwrap(),
            |req| mux.handle(&cx, req),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, pattern_compile, mux_find, mux_handle);
criterion_main!(benches);
