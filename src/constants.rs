//! Application constants and configuration

/// Index URL used on first launch, matching the companion static server.
pub const DEFAULT_INDEX_URL: &str = "http://localhost:8000/images/";

/// Extensions accepted from the directory listing (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// Placeholder geometry reserved for a card before its image arrives.
/// These are layout dimensions only, never shown as image metadata.
pub const PLACEHOLDER_WIDTH: f32 = 600.0;
pub const PLACEHOLDER_HEIGHT: f32 = 400.0;

/// How far ahead of the viewport (logical pixels) a card may be before
/// its image load is scheduled.
pub const LAZY_LOAD_MARGIN: f32 = 100.0;

pub const APP_NAME: &str = "Index Gallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
