//! Shared constants for seamart.

/// Items requested per feed page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for a page size accepted from configuration or flags.
pub const MAX_PAGE_SIZE: u32 = 100;

/// First page of any paginated listing (pages are 1-based).
pub const FIRST_PAGE: u32 = 1;

/// Key under which the whole basket array is stored.
pub const BASKET_STORAGE_KEY: &str = "basket";

/// Locale used when a localized name lacks the requested one.
pub const FALLBACK_LOCALE: &str = "en";

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File name of the on-device key-value database.
pub const DATABASE_FILE_NAME: &str = "seamart.db";
