#![warn(clippy::pedantic)]

pub mod config;
pub mod encode;
pub mod error;
pub mod fs;
pub mod id;
pub mod store;

pub use config::StoreConfig;
pub use encode::{encode_data_uri, mime_for_path, read_and_encode};
pub use error::StoreError;
pub use fs::{OsFs, VaultFs};
pub use store::BlobStore;
