pub mod config;
pub mod fs;
pub mod services;
pub mod upload;


pub use config::Config;
pub use fs::{Filesystem, StdFilesystem};
pub use services::storage::Storage;
pub use upload::{DiskUpload, Upload};
