use crate::archive::extract_archive;
use crate::credentials::Credentials;
use crate::error::{DatasetError, Result};
use crate::DatasetClient;
use reqwest::{Client, Response, StatusCode};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const DEFAULT_ENDPOINT: &str = "https://www.kaggle.com/api/v1";

/// Helper to create [`KaggleApi`] with all the options.
#[derive(Debug)]
pub struct KaggleApiBuilder {
    endpoint: String,
    credentials: Option<Credentials>,
}

impl Default for KaggleApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KaggleApiBuilder {
    /// Default builder, credentials are looked up when [`Self::build`] is called
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: None,
        }
    }

    /// Changes the API root, mostly useful to point at a proxy
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use these credentials instead of the ones found in the environment
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Consumes the builder, fails if no credentials can be found
    pub fn build(self) -> Result<KaggleApi> {
        let credentials = match self.credentials {
            Some(credentials) => credentials,
            None => Credentials::from_env()?,
        };
        let client = Client::builder()
            .user_agent(concat!("kaggle-datasets/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(KaggleApi {
            endpoint: self.endpoint.trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }
}

/// Authenticated client for the Kaggle public API.
#[derive(Debug, Clone)]
pub struct KaggleApi {
    endpoint: String,
    credentials: Credentials,
    client: Client,
}

impl KaggleApi {
    /// Client with default settings and credentials from the environment.
    pub fn from_env() -> Result<Self> {
        KaggleApiBuilder::new().build()
    }

    /// Download URL of a dataset archive. The identifier is used verbatim.
    pub fn url(&self, id: &str) -> String {
        format!("{}/datasets/download/{id}", self.endpoint)
    }
}

/// Local name of the archive for `id`: its last path segment plus `.zip`.
fn archive_name(id: &str) -> String {
    let slug = id.rsplit('/').next().unwrap_or(id);
    format!("{slug}.zip")
}

fn check_status(id: &str, status: StatusCode) -> Result<()> {
    match status {
        status if status.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DatasetError::Authentication(
            format!("{status} while requesting {id}"),
        )),
        StatusCode::NOT_FOUND => Err(DatasetError::NotFound(id.to_string())),
        status => Err(DatasetError::Status {
            id: id.to_string(),
            status,
        }),
    }
}

impl DatasetClient for KaggleApi {
    async fn fetch_and_extract(&self, id: &str, destination: &Path) -> Result<()> {
        let url = self.url(id);
        tracing::debug!(%url, "requesting archive");
        let mut response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.key))
            .send()
            .await?;
        check_status(id, response.status())?;

        let archive = destination.join(archive_name(id));
        let written = match save_body(&mut response, &archive).await {
            Ok(written) => written,
            Err(err) => {
                if let Err(cleanup) = std::fs::remove_file(&archive) {
                    tracing::debug!(%cleanup, "could not remove partial archive");
                }
                return Err(err);
            }
        };
        tracing::debug!(archive = %archive.display(), bytes = written, "archive saved");

        extract_archive(&archive, destination)
    }
}

/// Streams the response body into `path`, returning the number of bytes written.
async fn save_body(response: &mut Response, path: &Path) -> Result<usize> {
    let mut file = File::create(path)?;
    let mut written = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)?;
        written += chunk.len();
    }
    file.flush()?;
    Ok(written)
}
