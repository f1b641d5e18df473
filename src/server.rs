//! Static asset server: serves the page, its scripts, and the GeoJSON
//! datasets over HTTP GET on one fixed port. No dynamic routes, no
//! request bodies.

use std::path::{Component, Path, PathBuf};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use tracing::{debug, info};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone)]
struct ServerConfig {
    root: PathBuf,
}

/// Resolve a request path to a file under `root`.
///
/// `/` maps to `index.html`. Any parent-directory or absolute component
/// rejects the whole path, so requests can never escape the root.
pub fn resolve(root: &Path, req_path: &str) -> Option<PathBuf> {
    let trimmed = req_path.trim_start_matches('/');
    let rel = if trimmed.is_empty() { "index.html" } else { trimmed };

    let mut out = root.to_path_buf();
    for part in Path::new(rel).components() {
        match part {
            Component::Normal(seg) => out.push(seg),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(out)
}

/// Content type by file extension
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") | Some("geojson") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

async fn asset(req: HttpRequest, config: web::Data<ServerConfig>) -> HttpResponse {
    let Some(path) = resolve(&config.root, req.path()) else {
        debug!("rejected path {}", req.path());
        return HttpResponse::NotFound().body("not found");
    };

    match std::fs::read(&path) {
        Ok(body) => HttpResponse::Ok().content_type(content_type(&path)).body(body),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("missing asset {}", path.display());
            HttpResponse::NotFound().body("not found")
        }
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

/// Run the server until interrupted. Bind failure aborts startup with a
/// clear message.
pub async fn run(root: PathBuf, port: u16) -> Result<()> {
    let config = web::Data::new(ServerConfig { root });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .default_service(web::get().to(asset))
    })
    .bind(("0.0.0.0", port))
    .with_context(|| format!("failed to bind port {port}"))?;

    info!("Server is running! View it at: http://localhost:{port}");
    server.run().await.context("server terminated abnormally")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_serves_index() {
        let resolved = resolve(Path::new("/srv/site"), "/").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn nested_paths_stay_under_root() {
        let resolved = resolve(Path::new("/srv/site"), "/data/regions.geojson").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/site/data/regions.geojson"));
    }

    #[test]
    fn traversal_is_rejected() {
        let root = Path::new("/srv/site");
        assert!(resolve(root, "/../etc/passwd").is_none());
        assert!(resolve(root, "/data/../../secret").is_none());
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("data/x.geojson")), "application/json");
        assert_eq!(content_type(Path::new("public/co2_icon.svg")), "image/svg+xml");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
