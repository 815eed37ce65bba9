//! Shared constants used across ZenCode crates.

/// Default API port for ZenCode.
pub const DEFAULT_PORT: u16 = 8000;

/// Default maximum code size accepted by the API layer.
pub const DEFAULT_MAX_CODE_SIZE: usize = 10 * 1024 * 1024;

/// Default timeout for a single key-value store call, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Path segment under which shared code is served.
pub const SHARE_PATH_SEGMENT: &str = "share";

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";
