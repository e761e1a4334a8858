//! HTTP response handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime::types::{HTML, PLAIN};

/// A rendered page. It depends on the request's `Accept` header, so caches
/// must key on it.
pub fn respond_page(request: Request, body: String) -> Result<()> {
    let headers = [
        header("Content-Type", HTML)?,
        header("Vary", "Accept")?,
        header("Cache-Control", "no-cache")?,
    ];
    send(request, 200, &headers, body.into_bytes())
}

/// A file from the output dir.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);
    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    send(request, 200, &[header("Content-Type", content_type)?], body)
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send(
        request,
        404,
        &[header("Content-Type", PLAIN)?],
        b"404 Not Found".to_vec(),
    )
}

pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    send(
        request,
        405,
        &[header("Content-Type", PLAIN)?, header("Allow", "GET, HEAD")?],
        b"405 Method Not Allowed".to_vec(),
    )
}

/// Server shutting down.
pub fn respond_unavailable(request: Request) -> Result<()> {
    send(
        request,
        503,
        &[header("Content-Type", PLAIN)?],
        b"503 Service Unavailable".to_vec(),
    )
}

/// Only GET and HEAD are served.
pub fn is_read_request(request: &Request) -> bool {
    matches!(request.method(), Method::Get | Method::Head)
}

/// Value of the first header named `name`, case-insensitively.
pub fn header_value<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// tiny_http leaves the body out for HEAD requests.
fn send(request: Request, status: u16, headers: &[Header], body: Vec<u8>) -> Result<()> {
    let response = headers.iter().cloned().fold(
        Response::from_data(body).with_status_code(StatusCode(status)),
        |response, h| response.with_header(h),
    );
    request.respond(response)?;
    Ok(())
}

fn header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|_| anyhow!("invalid header {}: {}", key, value))
}
