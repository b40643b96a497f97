use super::types::{FetchError, FetchResult};
use crate::error::CrateMirrorError;
use crate::progress::archive_progress_bar;
use futures::StreamExt;
use indicatif::MultiProgress;
use reqwest::StatusCode;
use std::future::Future;
use url::Url;

const USER_AGENT: &str = concat!("cratemirror/", env!("CARGO_PKG_VERSION"));

/// Retrieves a single archive.
///
/// Any HTTP response is a successful fetch at this layer; only a request that
/// never produced a complete response is an error.
pub trait ArchiveFetcher {
    fn fetch(
        &self,
        url: &Url,
        label: &str,
    ) -> impl Future<Output = Result<FetchResult, FetchError>> + Send;
}

pub struct HttpArchiveFetcher {
    client: reqwest::Client,
    progress: MultiProgress,
}

impl HttpArchiveFetcher {
    pub fn new(progress: MultiProgress) -> Result<Self, CrateMirrorError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, progress })
    }
}

impl ArchiveFetcher for HttpArchiveFetcher {
    async fn fetch(&self, url: &Url, label: &str) -> Result<FetchResult, FetchError> {
        tracing::trace!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(url = %url, status = status.as_u16(), "Registry did not return the archive");
            return Ok(FetchResult::status(status.as_u16()));
        }

        let progress_bar = self
            .progress
            .add(archive_progress_bar(label, response.content_length()));

        let mut payload = Vec::new();
        let mut stream = response.bytes_stream();
        let streamed = loop {
            let Some(chunk) = stream.next().await else {
                break Ok(());
            };
            match chunk {
                Ok(chunk) => {
                    payload.extend_from_slice(&chunk);
                    progress_bar.inc(chunk.len() as u64);
                }
                Err(err) => break Err(FetchError::from(err)),
            }
        };
        progress_bar.finish_and_clear();
        streamed?;

        tracing::trace!(url = %url, bytes = payload.len(), "Archive received");
        Ok(FetchResult::ok(payload))
    }
}
