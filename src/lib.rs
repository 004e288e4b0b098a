#![deny(missing_docs)]
//! This crate fetches the [Kaggle](https://www.kaggle.com/datasets) datasets used by the test
//! suite and unpacks them under `test/data/kaggle`.
//!
//! Each dataset is described by a [`DatasetDescriptor`]; a [`Fetcher`] walks the list in order,
//! creating one folder per dataset and handing the actual download to a [`DatasetClient`].
//! The production client is [`KaggleApi`].
//!
//! Downloads are sequential and stop at the first error.
use std::io::Write;
use std::path::Path;
use tracing::instrument;

mod api;
mod archive;
mod credentials;
mod descriptor;
mod error;

pub use api::{KaggleApi, KaggleApiBuilder};
pub use archive::extract_archive;
pub use credentials::Credentials;
pub use descriptor::{default_data_dir, default_datasets, DatasetDescriptor};
pub use error::{DatasetError, ErrorKind, Result};

/// Something able to download a dataset archive and unpack it.
#[allow(async_fn_in_trait)]
pub trait DatasetClient {
    /// Download `id` and extract its content into `destination`, which already exists.
    /// No archive should be left behind on success.
    async fn fetch_and_extract(&self, id: &str, destination: &Path) -> Result<()>;
}

/// Downloads lists of datasets, reporting progress on a writer.
pub struct Fetcher<C> {
    client: C,
}

impl<C: DatasetClient> Fetcher<C> {
    /// Wrap a client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Download a single dataset into `destination`.
    #[instrument(
        level = "info",
        skip_all,
        fields(id = %id, destination = %destination.display())
    )]
    pub async fn fetch<W: Write>(&self, id: &str, destination: &Path, out: &mut W) -> Result<()> {
        writeln!(out, "Downloading {id} to {}...", destination.display())?;
        self.client.fetch_and_extract(id, destination).await?;
        writeln!(out, "Successfully downloaded {id}.")?;
        Ok(())
    }

    /// Download every dataset into `data_dir/<folder>`, in order.
    ///
    /// Existing folders are reused. The first failure is returned and the remaining datasets
    /// are not attempted.
    pub async fn run<W: Write>(
        &self,
        data_dir: &Path,
        datasets: &[DatasetDescriptor],
        out: &mut W,
    ) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        for dataset in datasets {
            let destination = data_dir.join(&dataset.folder);
            std::fs::create_dir_all(&destination)?;
            self.fetch(&dataset.id, &destination, out).await?;
            tracing::info!(id = %dataset.id, folder = %dataset.folder, "dataset ready");
        }
        writeln!(out, "All specified Kaggle datasets downloaded.")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Writes a small csv in place of the real archive content.
    #[derive(Default)]
    struct FakeClient {
        calls: RefCell<Vec<String>>,
        fail: Option<(&'static str, fn(String) -> DatasetError)>,
    }

    impl FakeClient {
        fn failing_on(id: &'static str, error: fn(String) -> DatasetError) -> Self {
            Self {
                fail: Some((id, error)),
                ..Self::default()
            }
        }
    }

    impl DatasetClient for FakeClient {
        async fn fetch_and_extract(&self, id: &str, destination: &Path) -> Result<()> {
            self.calls.borrow_mut().push(id.to_string());
            if let Some((failing, error)) = self.fail {
                if failing == id {
                    return Err(error(id.to_string()));
                }
            }
            std::fs::write(destination.join("data.csv"), format!("{id}\n"))?;
            Ok(())
        }
    }

    fn status_error(id: String) -> DatasetError {
        DatasetError::Status {
            id,
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn descriptors() -> Vec<DatasetDescriptor> {
        vec![
            DatasetDescriptor::new("a/b", "x"),
            DatasetDescriptor::new("c/d", "y"),
        ]
    }

    fn is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn run_populates_every_folder_in_order() {
        let base = tempdir().unwrap();
        let out_dir = base.path().join("out");
        let fetcher = Fetcher::new(FakeClient::default());
        let mut output = Vec::new();

        fetcher
            .run(&out_dir, &descriptors(), &mut output)
            .await
            .unwrap();

        for folder in ["x", "y"] {
            assert!(!is_empty(&out_dir.join(folder)));
        }
        assert_eq!(*fetcher.client.calls.borrow(), vec!["a/b", "c/d"]);
        let expected = format!(
            "Downloading a/b to {}...\n\
             Successfully downloaded a/b.\n\
             Downloading c/d to {}...\n\
             Successfully downloaded c/d.\n\
             All specified Kaggle datasets downloaded.\n",
            out_dir.join("x").display(),
            out_dir.join("y").display(),
        );
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[tokio::test]
    async fn run_twice_reuses_folders() {
        let base = tempdir().unwrap();
        let fetcher = Fetcher::new(FakeClient::default());

        fetcher
            .run(base.path(), &descriptors(), &mut std::io::sink())
            .await
            .unwrap();
        fetcher
            .run(base.path(), &descriptors(), &mut std::io::sink())
            .await
            .unwrap();

        assert_eq!(fetcher.client.calls.borrow().len(), 4);
        assert!(base.path().join("x/data.csv").exists());
        assert!(base.path().join("y/data.csv").exists());
    }

    #[tokio::test]
    async fn first_failure_stops_the_run() {
        let base = tempdir().unwrap();
        let mut datasets = descriptors();
        datasets.push(DatasetDescriptor::new("e/f", "z"));
        let fetcher = Fetcher::new(FakeClient::failing_on("c/d", DatasetError::NotFound));
        let mut output = Vec::new();

        let err = fetcher
            .run(base.path(), &datasets, &mut output)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(*fetcher.client.calls.borrow(), vec!["a/b", "c/d"]);
        assert!(base.path().join("x/data.csv").exists());
        assert!(is_empty(&base.path().join("y")));
        assert!(!base.path().join("z").exists());

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Downloading").count(), 2);
        assert!(output.contains("Successfully downloaded a/b."));
        assert!(!output.contains("Successfully downloaded c/d."));
        assert!(!output.contains("All specified"));
    }

    #[tokio::test]
    async fn client_errors_propagate_unchanged() {
        let cases: [(fn(String) -> DatasetError, ErrorKind); 2] = [
            (DatasetError::Authentication, ErrorKind::Authentication),
            (status_error, ErrorKind::Network),
        ];
        for (error, kind) in cases {
            let base = tempdir().unwrap();
            let fetcher = Fetcher::new(FakeClient::failing_on("a/b", error));
            let err = fetcher
                .run(base.path(), &descriptors(), &mut std::io::sink())
                .await
                .unwrap_err();
            assert_eq!(err.kind(), kind);
            assert_eq!(*fetcher.client.calls.borrow(), vec!["a/b"]);
        }
    }

    #[tokio::test]
    async fn unusable_data_dir_is_a_filesystem_error() {
        let base = tempdir().unwrap();
        let occupied = base.path().join("kaggle");
        std::fs::write(&occupied, b"not a directory").unwrap();
        let fetcher = Fetcher::new(FakeClient::default());

        let err = fetcher
            .run(&occupied, &descriptors(), &mut std::io::sink())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert!(fetcher.client.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn fetch_reports_around_the_download() {
        let base = tempdir().unwrap();
        let fetcher = Fetcher::new(FakeClient::default());
        let mut output = Vec::new();

        fetcher
            .fetch("a/b", base.path(), &mut output)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("Downloading a/b to {}...", base.path().display()),
                "Successfully downloaded a/b.".to_string(),
            ]
        );
    }
}
