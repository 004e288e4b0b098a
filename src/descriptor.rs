use std::path::PathBuf;

/// A remote dataset and the local folder it is unpacked into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDescriptor {
    /// The canonical `owner/name` identifier on Kaggle.
    pub id: String,
    /// Folder name under the data directory.
    pub folder: String,
}

impl DatasetDescriptor {
    /// Pair an identifier with its destination folder.
    pub fn new(id: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            folder: folder.into(),
        }
    }
}

const DEFAULT_DATASETS: [(&str, &str); 3] = [
    ("fedesoriano/stroke-prediction-dataset", "stroke_prediction"),
    (
        "rupakroy/credit-score-classification-dataset",
        "credit_score",
    ),
    (
        "mysarahmad/bank-marketing-campaign-dataset",
        "bank_marketing",
    ),
];

/// The datasets the test suite depends on, in download order.
pub fn default_datasets() -> Vec<DatasetDescriptor> {
    DEFAULT_DATASETS
        .iter()
        .map(|(id, folder)| DatasetDescriptor::new(*id, *folder))
        .collect()
}

/// `test/data/kaggle` under the project root.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test")
        .join("data")
        .join("kaggle")
}
