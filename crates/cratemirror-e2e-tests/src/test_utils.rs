use axum::Router;
use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use cratemirror_lib::cli::MirrorCommand;
use eyre::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

/// What the test registry answers for one crate version.
#[derive(Clone, Debug)]
pub enum ServedCrate {
    /// 200 with a `Content-Length` header
    Archive(Vec<u8>),
    /// 200 streamed in chunks without a `Content-Length` header
    Chunked(Vec<Vec<u8>>),
    /// An error status without a body
    Status(u16),
}

#[derive(Default)]
struct RegistryState {
    crates: HashMap<(String, String), ServedCrate>,
    requests: Mutex<Vec<String>>,
}

/// A crate registry exposing only the archive download endpoint.
///
/// Versions that were not registered answer 404.
pub struct TestRegistry {
    url: Url,
    state: Arc<RegistryState>,
}

impl TestRegistry {
    pub async fn spawn(crates: &[(&str, &str, ServedCrate)]) -> Result<Self> {
        let state = Arc::new(RegistryState {
            crates: crates
                .iter()
                .map(|(name, version, served)| {
                    ((name.to_string(), version.to_string()), served.clone())
                })
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let url = Url::parse(&format!("http://{addr}"))?;

        let router = Router::new()
            .route(
                "/api/v1/crates/{name}/{version}/download",
                get(serve_download),
            )
            .with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { url, state })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `name/version` of every download request, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn serve_download(
    State(state): State<Arc<RegistryState>>,
    UrlPath((name, version)): UrlPath<(String, String)>,
) -> Response<Body> {
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{name}/{version}"));

    match state.crates.get(&(name, version)) {
        Some(ServedCrate::Archive(body)) => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "application/gzip")
            .header(CONTENT_LENGTH, body.len())
            .body(Body::from(body.clone()))
            .unwrap(),
        Some(ServedCrate::Chunked(chunks)) => {
            let chunks = chunks.clone().into_iter().map(Ok::<_, std::io::Error>);
            Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "application/gzip")
                .body(Body::from_stream(futures::stream::iter(chunks)))
                .unwrap()
        }
        Some(ServedCrate::Status(code)) => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_registry() -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}"))?)
}

pub fn archive_bytes(name: &str, version: &str) -> Vec<u8> {
    format!("{name}-{version}.crate contents").into_bytes()
}

pub fn write_lockfile(dir: &Path, packages: &[(&str, &str)]) -> Result<PathBuf> {
    let mut content = String::from("# This file is automatically @generated by Cargo.\nversion = 4\n");
    for (name, version) in packages {
        content.push_str(&format!(
            "\n[[package]]\nname = \"{name}\"\nversion = \"{version}\"\nsource = \"registry+https://github.com/rust-lang/crates.io-index\"\n"
        ));
    }

    let path = dir.join("Cargo.lock");
    std::fs::write(&path, content)?;
    Ok(path)
}

pub fn mirror_command(lockfile: &Path, registry: &Url, output_dir: &Path) -> MirrorCommand {
    MirrorCommand {
        lockfile_path: lockfile.to_string_lossy().into_owned(),
        repo: Some(registry.to_string()),
        output_dir: Some(output_dir.to_string_lossy().into_owned()),
        ..Default::default()
    }
}

pub fn mirrored_archive(output_dir: &Path, name: &str, version: &str) -> PathBuf {
    output_dir
        .join("api")
        .join("v1")
        .join("crates")
        .join(name)
        .join(version)
        .join("download")
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("cratemirror_lib=debug,cratemirror_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
