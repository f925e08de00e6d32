use http::header::{ALLOW, CONTENT_TYPE, HeaderValue, X_CONTENT_TYPE_OPTIONS};
use http::{Request, Response, StatusCode};

use super::{Resolution, RouterReadOnly};
use crate::types::Body;

const NOT_FOUND_BODY: &str = "404 page not found\n";
const NOT_ALLOWED_BODY: &str = "Method Not Allowed\n";
const SERVER_ERROR_BODY: &str = "Internal Server Error\n";

impl RouterReadOnly {
    /// Runs one request to completion.
    ///
    /// A matched route receives the request with its [`crate::Params`] in
    /// the request extensions. Everything else ends in exactly one of the
    /// fallbacks: the `OPTIONS` answer, the file server, 405 or 404.
    #[tracing::instrument(
        level = "trace",
        skip(self, req),
        fields(method = %req.method(), path = %req.uri().path())
    )]
    pub fn dispatch(&self, mut req: Request<Body>) -> Response<Body> {
        let resolution = self.resolve(req.method(), req.uri().path());

        match resolution {
            Resolution::Found(found) => {
                req.extensions_mut().insert(found.params);
                found.handler.call(req)
            }
            Resolution::Options { allow } => {
                tracing::event!(tracing::Level::TRACE, operation = "options", allow = %allow);
                let mut res = Response::new(Body::new());
                set_allow(&mut res, &allow);
                res
            }
            Resolution::StaticFile => self.serve_file(req),
            Resolution::NotAllowed { allow } => {
                tracing::event!(tracing::Level::TRACE, operation = "not_allowed", allow = %allow);
                let mut res = match &self.not_allowed {
                    Some(handler) => handler.call(req),
                    None => plain_text(StatusCode::METHOD_NOT_ALLOWED, NOT_ALLOWED_BODY),
                };
                if !res.headers().contains_key(ALLOW) {
                    set_allow(&mut res, &allow);
                }
                res
            }
            Resolution::NotFound => self.serve_not_found(req),
        }
    }

    fn serve_file(&self, req: Request<Body>) -> Response<Body> {
        let Some(server) = self.file_server.as_ref() else {
            return self.serve_not_found(req);
        };

        match server.serve(req.uri().path()) {
            Ok(Some(res)) => res,
            Ok(None) => self.serve_not_found(req),
            Err(err) => {
                tracing::event!(
                    tracing::Level::WARN,
                    operation = "serve_file",
                    path = %req.uri().path(),
                    error = %err
                );
                plain_text(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY)
            }
        }
    }

    fn serve_not_found(&self, req: Request<Body>) -> Response<Body> {
        tracing::event!(tracing::Level::TRACE, operation = "not_found", path = %req.uri().path());
        match &self.not_found {
            Some(handler) => handler.call(req),
            None => plain_text(StatusCode::NOT_FOUND, NOT_FOUND_BODY),
        }
    }
}

fn plain_text(status: StatusCode, body: &'static str) -> Response<Body> {
    let mut res = Response::new(Body::from_static(body.as_bytes()));
    *res.status_mut() = status;
    let headers = res.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    res
}

fn set_allow(res: &mut Response<Body>, allow: &str) {
    // Method names are header tokens, so this only fails on extension
    // methods carrying bytes a header value cannot hold.
    if let Ok(value) = HeaderValue::from_str(allow) {
        res.headers_mut().insert(ALLOW, value);
    }
}
