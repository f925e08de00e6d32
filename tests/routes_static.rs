mod common;

use branch_router::{Router, RouterError};
use common::{body, call, text};
use http::{Method, StatusCode};

#[test]
fn router_when_root_registered_then_matches_slash() {
    let mut router = Router::new(None);
    router.get("/", text("root")).expect("root should register");
    let router = router.seal();

    let res = call(&router, Method::GET, "/");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res), "root");
}

#[test]
fn router_when_static_routes_nested_then_each_resolves_to_its_handler() {
    let mut router = Router::new(None);
    router.get("/users", text("users")).unwrap();
    router.get("/users/active", text("active")).unwrap();
    router.get("/user/settings", text("settings")).unwrap();
    router.post("/users", text("create")).unwrap();
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/users")), "users");
    assert_eq!(body(&call(&router, Method::GET, "/users/active")), "active");
    assert_eq!(body(&call(&router, Method::GET, "/user/settings")), "settings");
    assert_eq!(body(&call(&router, Method::POST, "/users")), "create");
}

#[test]
fn router_when_static_and_wildcard_siblings_then_static_wins() {
    let mut router = Router::new(None);
    router.get("/users/{id}", text("by-id")).unwrap();
    router.get("/users/new", text("form")).unwrap();
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/users/new")), "form");
    assert_eq!(body(&call(&router, Method::GET, "/users/42")), "by-id");
}

#[test]
fn router_when_intermediate_node_has_no_route_then_find_fails() {
    let mut router = Router::new(None);
    router.get("/a/b/c", text("deep")).unwrap();
    let router = router.seal();

    assert!(router.find(&Method::GET, "/a/b/c").is_ok());
    match router.find(&Method::GET, "/a/b") {
        Err(RouterError::RouteNotFound { method, path }) => {
            assert_eq!(method, Method::GET);
            assert_eq!(path, "/a/b");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn router_when_path_runs_past_leaf_then_not_found() {
    let mut router = Router::new(None);
    router.get("/docs", text("docs")).unwrap();
    let router = router.seal();

    let res = call(&router, Method::GET, "/docs/extra");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn router_when_pattern_has_empty_segments_then_they_are_ignored() {
    let mut router = Router::new(None);
    router.get("//reports//daily/", text("daily")).unwrap();
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/reports/daily")), "daily");
}

#[test]
fn router_when_method_shorthands_used_then_each_tree_is_separate() {
    let mut router = Router::new(None);
    router.put("/item", text("put")).unwrap();
    router.delete("/item", text("delete")).unwrap();
    router.patch("/item", text("patch")).unwrap();
    router.head("/item", text("head")).unwrap();
    router.connect("/item", text("connect")).unwrap();
    router.trace("/item", text("trace")).unwrap();
    router.options_route("/item", text("options")).unwrap();
    assert_eq!(router.route_count(), 7);
    let router = router.seal();

    for (method, expected) in [
        (Method::PUT, "put"),
        (Method::DELETE, "delete"),
        (Method::PATCH, "patch"),
        (Method::HEAD, "head"),
        (Method::CONNECT, "connect"),
        (Method::TRACE, "trace"),
        (Method::OPTIONS, "options"),
    ] {
        assert_eq!(body(&call(&router, method, "/item")), expected);
    }
}

#[test]
fn router_when_static_path_is_percent_encoded_then_it_still_matches() {
    let mut router = Router::new(None);
    router.get("/caf\u{e9}/menu", text("menu")).unwrap();
    router.put("/my docs", text("docs")).unwrap();
    let router = router.seal();

    assert_eq!(body(&call(&router, Method::GET, "/caf%C3%A9/menu")), "menu");
    assert_eq!(body(&call(&router, Method::PUT, "/my%20docs")), "docs");

    let res = call(&router, Method::GET, "/my%20docs");
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(router.allowed(&Method::GET, "/my%20docs").as_deref(), Some("PUT, OPTIONS"));
}
