mod common;

use branch_router::{Body, Router};
use common::{body, call, echo_params};
use http::{Method, Request, Response};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn literal_route() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..4).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #[test]
    fn router_when_literal_routes_registered_then_each_resolves_to_itself(
        routes in prop::collection::btree_set(literal_route(), 1..12),
    ) {
        let mut router = Router::new(None);
        for route in &routes {
            let name = route.clone();
            router
                .get(route, move |_req: Request<Body>| Response::new(Body::from(name.clone())))
                .unwrap();
        }
        prop_assert_eq!(router.route_count(), routes.len());
        let router = router.seal();

        for route in &routes {
            let res = call(&router, Method::GET, route);
            prop_assert_eq!(body(&res), route.as_str());
        }
    }

    #[test]
    fn router_when_wildcard_matched_then_captures_whole_segment(value in "[A-Za-z0-9_.~-]{1,24}") {
        let mut router = Router::new(None);
        router.get("/items/{id}/detail", echo_params).unwrap();
        let router = router.seal();

        let res = call(&router, Method::GET, &format!("/items/{value}/detail"));
        prop_assert_eq!(body(&res), format!("id={value}"));
    }

    #[test]
    fn router_when_route_mounted_then_matches_like_direct_registration(
        prefix in literal_route(),
        route in literal_route(),
    ) {
        let mut sub = Router::new(None);
        sub.get(&route, echo_params).unwrap();
        let mut mounted = Router::new(None);
        mounted.mount(&prefix, sub).unwrap();
        let mounted = mounted.seal();

        let path = format!("{prefix}{route}");
        prop_assert!(mounted.find(&Method::GET, &path).is_ok());
    }

    #[test]
    fn router_when_allowed_computed_then_request_method_is_never_listed(
        methods in prop::collection::btree_set(0usize..5, 1..5),
        requested in 0usize..5,
    ) {
        let all = [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH];
        let mut router = Router::new(None);
        for idx in &methods {
            router.handle(all[*idx].clone(), "/r", echo_params).unwrap();
        }
        let router = router.seal();

        let registered: BTreeSet<usize> = methods.iter().copied().filter(|idx| *idx != requested).collect();
        match router.allowed(&all[requested], "/r") {
            Some(allow) => {
                let listed: Vec<&str> = allow.split(", ").collect();
                prop_assert!(!listed.contains(&all[requested].as_str()));
                prop_assert_eq!(listed.last().copied(), Some("OPTIONS"));
                prop_assert_eq!(listed.len(), registered.len() + 1);
            }
            None => prop_assert!(registered.is_empty()),
        }
    }
}
