use std::hint::black_box;

use bencher::ROUTE_PATTERNS;
use bencher::criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use plain_web::{Request, Response, Router, handler_fn};

fn build_router() -> Router {
    ROUTE_PATTERNS
        .iter()
        .fold(Router::builder(), |builder, (method, pattern)| {
            builder.route(*method, *pattern, handler_fn(|_req: &Request, _resp: &mut Response| {}))
        })
        .static_prefix("/uploads/", handler_fn(|_req: &Request, _resp: &mut Response| {}))
        .build()
}

fn benchmark_router_lookup(criterion: &mut Criterion) {
    let router = build_router();
    let mut group = criterion.benchmark_group("router_at");

    let lookups = [
        ("exact", "GET", "/api/employees/search"),
        ("param", "DELETE", "/api/employees/42"),
        ("two_params", "GET", "/api/departments/rnd/employees/42"),
        ("prefix", "GET", "/uploads/avatars/42.png"),
        ("miss", "PATCH", "/api/employees/42"),
    ];

    for (name, method, path) in lookups {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(method, path), |b, (method, path)| {
            b.iter(|| black_box(router.at(method, path).map(|route_match| route_match.params().len())));
        });
    }

    group.finish();
}

criterion_group!(router, benchmark_router_lookup);
criterion_main!(router);
