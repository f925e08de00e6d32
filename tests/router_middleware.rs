mod common;

use branch_router::{Body, Handler, Middleware, Router};
use common::{body, call, echo_trace, tag};
use http::{Method, Request, Response, StatusCode};
use std::panic::{AssertUnwindSafe, catch_unwind};

#[test]
fn router_when_global_and_route_middleware_then_global_runs_outermost() {
    let mut router = Router::with_middleware(None, [tag("g1"), tag("g2")]);
    router
        .handle_with(Method::GET, "/chain", echo_trace, [tag("r1")])
        .unwrap();
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/chain")), "g1>g2>r1");
}

#[test]
fn router_when_global_middleware_added_late_then_only_later_routes_get_it() {
    let mut router = Router::new(None);
    router.get("/early", echo_trace).unwrap();
    router.use_global([tag("late")]);
    router.get("/later", echo_trace).unwrap();
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/early")), "");
    assert_eq!(body(&call(&router, Method::GET, "/later")), "late");
}

#[test]
fn router_when_use_middleware_on_prefix_then_whole_subtree_is_wrapped() {
    let mut router = Router::new(None);
    router.get("/a", echo_trace).unwrap();
    router.get("/a/b", echo_trace).unwrap();
    router.get("/a/{id}/c", echo_trace).unwrap();
    router.get("/z", echo_trace).unwrap();
    router
        .handle_with(Method::GET, "/a/b/d", echo_trace, [tag("route")])
        .unwrap();

    let updated = router
        .use_middleware(None, "/a", [tag("secure")])
        .expect("pattern should parse");
    assert_eq!(updated, 4);
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/a")), "secure");
    assert_eq!(body(&call(&router, Method::GET, "/a/b")), "secure");
    assert_eq!(body(&call(&router, Method::GET, "/a/9/c")), "secure");
    // Applied middleware lands inside what the route already carried.
    assert_eq!(body(&call(&router, Method::GET, "/a/b/d")), "route>secure");
    assert_eq!(body(&call(&router, Method::GET, "/z")), "");
}

#[test]
fn router_when_use_middleware_filtered_by_method_then_other_trees_untouched() {
    let mut router = Router::new(None);
    router.get("/items", echo_trace).unwrap();
    router.post("/items", echo_trace).unwrap();

    let updated = router
        .use_middleware(Some(&Method::POST), "/items", [tag("auth")])
        .unwrap();
    assert_eq!(updated, 1);
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/items")), "");
    assert_eq!(body(&call(&router, Method::POST, "/items")), "auth");
}

#[test]
fn router_when_use_middleware_addresses_nothing_then_no_route_changes() {
    let mut router = Router::new(None);
    router.get("/items", echo_trace).unwrap();

    let updated = router
        .use_middleware(None, "/missing/branch", [tag("x")])
        .unwrap();
    assert_eq!(updated, 0);
    assert_eq!(router.route_count(), 1);
}

#[test]
fn router_when_use_middleware_targets_wildcard_then_matches_structurally() {
    let mut router = Router::new(None);
    router.get("/users/{id}/posts", echo_trace).unwrap();
    router.get("/users/{id}/likes", echo_trace).unwrap();

    let updated = router
        .use_middleware(None, "/users/{id}/posts", [tag("owner")])
        .unwrap();
    assert_eq!(updated, 1);
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/users/1/posts")), "owner");
    assert_eq!(body(&call(&router, Method::GET, "/users/1/likes")), "");
}

#[test]
fn router_when_middleware_short_circuits_then_handler_never_runs() {
    let deny = Middleware::from_fn(|_req: Request<Body>, _next: &dyn Handler| {
        let mut res = Response::new(Body::from_static(b"denied"));
        *res.status_mut() = StatusCode::FORBIDDEN;
        res
    });

    let mut router = Router::new(None);
    router
        .handle_with(
            Method::GET,
            "/admin",
            |_req: Request<Body>| -> Response<Body> { panic!("handler must not run") },
            [deny],
        )
        .unwrap();
    let router = router.seal();

    let res = call(&router, Method::GET, "/admin");
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body(&res), "denied");
}

#[test]
fn router_when_recover_middleware_installed_then_handler_panic_becomes_500() {
    let recover = Middleware::from_fn(|req: Request<Body>, next: &dyn Handler| {
        match catch_unwind(AssertUnwindSafe(|| next.call(req))) {
            Ok(res) => res,
            Err(_) => {
                let mut res = Response::new(Body::from_static(b"recovered"));
                *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                res
            }
        }
    });

    let mut router = Router::with_middleware(None, [recover]);
    router
        .get("/boom", |_req: Request<Body>| -> Response<Body> {
            panic!("handler failure")
        })
        .unwrap();
    let router = router.seal();

    let res = call(&router, Method::GET, "/boom");
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(&res), "recovered");
}

#[test]
fn router_when_route_matched_twice_then_composed_chain_is_reused() {
    let mut router = Router::with_middleware(None, [tag("once")]);
    router.get("/cached", echo_trace).unwrap();
    let router = router.seal();

    let first = router.find(&Method::GET, "/cached").unwrap();
    let second = router.find(&Method::GET, "/cached").unwrap();
    assert!(std::sync::Arc::ptr_eq(&first.handler, &second.handler));
}
