#![allow(dead_code)]

use branch_router::{Body, Handler, Middleware, Params, RouterReadOnly};
use http::{HeaderValue, Method, Request, Response};

pub fn text(body: &'static str) -> impl Handler {
    move |_req: Request<Body>| Response::new(Body::from_static(body.as_bytes()))
}

/// Answers with the matched params as `key=value` pairs joined by `&`.
pub fn echo_params(req: Request<Body>) -> Response<Body> {
    let rendered = Params::from_request(&req)
        .map(|params| {
            params
                .iter()
                .map(|param| format!("{}={}", param.key, param.value))
                .collect::<Vec<_>>()
                .join("&")
        })
        .unwrap_or_default();
    Response::new(Body::from(rendered))
}

/// Answers with the `x-trace` header the middleware left on the request.
pub fn echo_trace(req: Request<Body>) -> Response<Body> {
    let trace = req
        .headers()
        .get("x-trace")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Response::new(Body::from(trace))
}

/// Appends `name` to the request's `x-trace` header before calling on.
pub fn tag(name: &'static str) -> Middleware {
    Middleware::from_fn(move |mut req: Request<Body>, next: &dyn Handler| {
        let trail = match req.headers().get("x-trace").and_then(|v| v.to_str().ok()) {
            Some(existing) => format!("{existing}>{name}"),
            None => name.to_string(),
        };
        req.headers_mut()
            .insert("x-trace", HeaderValue::from_str(&trail).expect("ascii trail"));
        next.call(req)
    })
}

pub fn request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::new())
        .expect("request should build")
}

pub fn body(res: &Response<Body>) -> &str {
    std::str::from_utf8(res.body()).expect("utf-8 body")
}

pub fn call(router: &RouterReadOnly, method: Method, path: &str) -> Response<Body> {
    router.dispatch(request(method, path))
}
