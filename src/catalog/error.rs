use thiserror::Error;

/// Failure to obtain the item list from the remote endpoint.
#[derive(Debug, Error)]
pub enum NetworkError {
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("endpoint answered {0}")]
  Status(reqwest::StatusCode),
  #[error("could not decode item list: {0}")]
  Payload(#[from] serde_json::Error),
  #[error("invalid endpoint url: {0}")]
  InvalidUrl(#[from] url::ParseError),
}

/// Failure in the persisted key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("sqlite: {0}")]
  Sqlite(#[from] rusqlite::Error),
  #[error("cache lock poisoned")]
  Poisoned,
  #[error("could not encode cache entry: {0}")]
  Encode(serde_json::Error),
  #[error("could not create cache directory {path}: {source}")]
  Directory {
    path: String,
    #[source]
    source: std::io::Error,
  },
}
