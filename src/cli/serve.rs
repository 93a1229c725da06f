//! Development server: build with drafts, then serve the output directory.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::config::SiteConfig;
use crate::core::{BuildMode, UrlPath, is_shutdown, register_server};
use crate::utils::mime::{self, types};
use crate::{debug, log};

use super::build::build_site;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Request handler threads.
const WORKERS: usize = 4;

/// Build in development mode and serve until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    build_site(config, BuildMode::DEVELOPMENT, false)?;

    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    run_request_loop(&server, &config.build.output)
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(tiny_http::Server, SocketAddr)> {
    let mut last_err = None;
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match tiny_http::Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow!(
        "failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

fn run_request_loop(server: &tiny_http::Server, root: &Path) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKERS)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        if is_shutdown() {
            break;
        }
        let root = root.to_path_buf();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &root) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, root: &Path) -> Result<()> {
    if is_shutdown() {
        return send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec());
    }
    if !matches!(request.method(), Method::Get | Method::Head) {
        return send_body(request, 405, types::PLAIN, b"405 Method Not Allowed".to_vec());
    }

    debug!("serve"; "{} {}", request.method(), request.url());

    match resolve_path(request.url(), root) {
        Some(path) => respond_file(request, &path),
        None => respond_not_found(request, root),
    }
}

/// Resolve a request URL to a file below `root`, using `index.html` for
/// directories. Anything escaping `root` resolves to nothing.
fn resolve_path(url: &str, root: &Path) -> Option<PathBuf> {
    let route = UrlPath::from_browser(url);
    let mut local = root.to_path_buf();
    for segment in route.as_str().split('/').filter(|s| !s.is_empty()) {
        if segment == ".." || segment.contains('\\') {
            return None;
        }
        local.push(segment);
    }

    let canonical = local.canonicalize().ok()?;
    let root = root.canonicalize().ok()?;
    if !canonical.starts_with(&root) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }
    let index = canonical.join("index.html");
    index.is_file().then_some(index)
}

fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);
    if request.method() == &Method::Head {
        return send_head(request, 200, content_type);
    }
    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with the built `404.html`, or plain text when it is missing.
fn respond_not_found(request: Request, root: &Path) -> Result<()> {
    let page = root.join("404.html");
    if request.method() == &Method::Head {
        let content_type = if page.is_file() { types::HTML } else { types::PLAIN };
        return send_head(request, 404, content_type);
    }

    match fs::read(&page) {
        Ok(body) => send_body(request, 404, types::HTML, body),
        Err(_) => send_body(request, 404, types::PLAIN, b"404 Not Found".to_vec()),
    }
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status)).with_header(content_type_header(content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &'static str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(content_type_header(content_type)?);
    request.respond(response)?;
    Ok(())
}

fn content_type_header(value: &'static str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header value: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/docker-ci")).unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::write(root.join("blog/docker-ci/index.html"), "post").unwrap();
        fs::write(root.join("assets/quire.css"), "css").unwrap();
        dir
    }

    #[test]
    fn test_resolve_routes_and_files() {
        let dir = site();
        let root = dir.path();

        let home = resolve_path("/", root).unwrap();
        assert!(home.ends_with("index.html"));

        let post = resolve_path("/blog/docker-ci", root).unwrap();
        assert!(post.ends_with("blog/docker-ci/index.html"));

        let css = resolve_path("/assets/quire.css?v=1", root).unwrap();
        assert!(css.ends_with("assets/quire.css"));
        assert_eq!(mime::from_path(&css), types::CSS);
    }

    #[test]
    fn test_resolve_rejects_missing_and_traversal() {
        let dir = site();
        let root = dir.path().join("blog");

        assert_eq!(resolve_path("/nope/", &root), None);
        assert_eq!(resolve_path("/../index.html", &root), None);
        assert_eq!(resolve_path("/%2e%2e/index.html", &root), None);
    }
}
