use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Method;
use janus::{CompiledPattern, Response, Router};

fn build_router() -> Router {
    let mut router = Router::new();
    let patterns = [
        "/users",
        "/users/:userId",
        "/users/:userId/posts",
        "/users/:userId/posts/:postId",
        "/products",
        "/products/in-stock",
        "/products/:id",
        "/todos",
        "/todos/:id",
        "/health",
    ];
    for pattern in patterns {
        router
            .route(Method::GET, pattern, |req, _next| async move {
                req.context
                    .set_response(Response::json(200, serde_json::Value::Null));
                Ok(())
            })
            .expect("register");
    }
    router
}

fn bench_match(c: &mut Criterion) {
    let compiled = CompiledPattern::compile("/users/:userId/posts/:postId").expect("compile");
    c.bench_function("match_url", |b| {
        b.iter(|| black_box(compiled.match_url(black_box("/users/42/posts/7?format=json"))))
    });
}

fn bench_sorted_view(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("sorted_handlers_cached", |b| {
        b.iter(|| black_box(router.handlers().len()))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let router = build_router();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");
    c.bench_function("dispatch", |b| {
        b.iter(|| {
            runtime
                .block_on(router.dispatch("GET", black_box("/users/42/posts/7")))
                .expect("dispatch")
        })
    });
}

criterion_group!(benches, bench_match, bench_sorted_view, bench_dispatch);
criterion_main!(benches);
