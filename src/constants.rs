pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Extension given to every recompressed output, whatever the source format.
pub const OUTPUT_EXTENSION: &str = "jpg";
pub const THUMBNAIL_SUFFIX: &str = "_thumb";

/// Binary megabyte, the unit used for the disk-space-saved summary line.
pub const BYTES_PER_MB: u64 = 1_048_576;
