//! Development server.
//!
//! Assets are built once up front. Pages are rendered per request with an
//! `AcceptProbe`, so the image source matches what the requesting browser
//! declares. A page request that names no image type gets `<picture>`, as
//! in the static build. Everything else is served from the output dir.

mod lifecycle;
mod path;
mod response;

pub use lifecycle::setup_shutdown_handler;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tiny_http::{Request, Server};

use crate::config::SiteConfig;
use crate::image::AcceptProbe;
use crate::log;
use crate::page::{Route, Site};

use super::build::prepare_site;

/// Worker threads answering requests.
const REQUEST_THREADS: usize = 4;

struct ServeState {
    site: Site,
    output: PathBuf,
}

/// Build assets, bind, and answer requests until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let (site, progress) = prepare_site(config, 0)?;
    progress.finish();
    let state = Arc::new(ServeState {
        site,
        output: config.build.output.clone(),
    });

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    run_request_loop(&server, state)
}

fn run_request_loop(server: &Server, state: Arc<ServeState>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let state = Arc::clone(&state);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &state) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

fn handle_request(request: Request, state: &ServeState) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !response::is_read_request(&request) {
        return response::respond_method_not_allowed(request);
    }

    let url_path = path::request_path(request.url());
    crate::debug!("serve"; "{} {}", request.method(), url_path);

    if let Some(route) = Route::from_url(&url_path) {
        let accept = response::header_value(&request, "Accept").unwrap_or_default();
        let probe = AcceptProbe::from_header(accept);
        let body = state.site.render(route, &probe);
        return response::respond_page(request, body);
    }

    match path::resolve_path(&url_path, &state.output) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::test_support::site_with;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::thread;

    const CHROME_ACCEPT: &str = "text/html,application/xhtml+xml,image/avif,image/webp,*/*;q=0.8";
    const LEGACY_ACCEPT: &str = "text/html,image/png,image/jpeg,*/*;q=0.8";
    const SAFARI_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

    /// Serve `count` requests on a background thread.
    fn start(dir: &std::path::Path, count: usize) -> SocketAddr {
        let site = site_with(dir, Some("hello"), None);
        let state = ServeState {
            site,
            output: dir.join("public"),
        };
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        thread::spawn(move || {
            for _ in 0..count {
                let request = server.recv().unwrap();
                handle_request(request, &state).unwrap();
            }
        });
        addr
    }

    fn request(addr: SocketAddr, method: &str, path: &str, accept: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nAccept: {accept}\r\nConnection: close\r\n\r\n"
        )
        .unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }

    #[test]
    fn test_page_source_follows_accept_header() {
        let dir = tempfile::tempdir().unwrap();
        let addr = start(dir.path(), 3);

        let modern = request(addr, "GET", "/", CHROME_ACCEPT);
        assert!(modern.starts_with("HTTP/1.1 200"));
        assert!(modern.contains("Vary: Accept"));
        assert!(modern.contains(".webp\" alt=\"Profile\""));
        assert!(!modern.contains("<picture>"));

        let legacy = request(addr, "GET", "/about/", LEGACY_ACCEPT);
        assert!(legacy.contains(".png\" alt=\"Profile\""));
        assert!(!legacy.contains(".webp"));

        let silent = request(addr, "GET", "/", SAFARI_ACCEPT);
        assert!(silent.contains("<picture><source srcset=\"/assets/avatar-"));
        assert!(silent.contains("type=\"image/webp\""));
    }

    #[test]
    fn test_static_files_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let addr = start(dir.path(), 3);

        let assets = dir.path().join("public/assets");
        let webp = std::fs::read_dir(&assets)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .find(|name| name.ends_with(".webp"))
            .unwrap();

        let file = request(addr, "GET", &format!("/assets/{webp}"), "*/*");
        assert!(file.starts_with("HTTP/1.1 200"));
        assert!(file.contains("Content-Type: image/webp"));

        let missing = request(addr, "GET", "/nope.png", "*/*");
        assert!(missing.starts_with("HTTP/1.1 404"));

        let post = request(addr, "POST", "/", "*/*");
        assert!(post.starts_with("HTTP/1.1 405"));
    }
}
