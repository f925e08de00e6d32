use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::Body;

/// Static-file fallback for `GET` requests that matched no route.
#[derive(Debug, Clone)]
pub struct FileServer {
    root: PathBuf,
    strip_prefix: Option<String>,
}

impl FileServer {
    /// Serves files below `root`. With `strip` set, request paths must start
    /// with `/<root>/` and that prefix is removed before resolving.
    pub fn new(root: impl AsRef<Path>, strip: bool) -> Self {
        let root = root.as_ref().to_path_buf();
        let strip_prefix = strip.then(|| {
            let trimmed = root.to_string_lossy().trim_matches('/').to_string();
            format!("/{trimmed}/")
        });
        Self { root, strip_prefix }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto the filesystem. Returns `None` when the
    /// strip prefix is missing or the path tries to leave the root.
    ///
    /// `%XX` escapes are decoded before the path is split, so an encoded
    /// `..` or separator is refused like a literal one.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
        let relative = match &self.strip_prefix {
            Some(prefix) => decoded.strip_prefix(prefix.as_str())?,
            None => &*decoded,
        };

        let mut resolved = self.root.clone();
        for part in relative.split('/') {
            match part {
                "" | "." => {}
                ".." => return None,
                part if part.contains(['\\', '\0']) => return None,
                part => resolved.push(part),
            }
        }
        Some(resolved)
    }

    /// Reads the file behind `request_path`. Missing files and directories
    /// yield `Ok(None)`.
    ///
    /// The whole file is read into one buffer, which suits small static
    /// assets. Large downloads belong behind a streaming handler.
    /// `Content-Type` is guessed from the extension and falls back to
    /// `application/octet-stream`.
    pub fn serve(&self, request_path: &str) -> io::Result<Option<Response<Body>>> {
        let Some(path) = self.resolve(request_path) else {
            return Ok(None);
        };

        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        if metadata.is_dir() {
            return Ok(None);
        }

        let contents = std::fs::read(&path)?;
        let length = contents.len();
        let mut res = Response::new(Body::from(contents));
        *res.status_mut() = StatusCode::OK;
        let headers = res.headers_mut();
        headers.insert(CONTENT_TYPE, content_type(&path));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        Ok(Some(res))
    }
}

fn content_type(path: &Path) -> HeaderValue {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}
