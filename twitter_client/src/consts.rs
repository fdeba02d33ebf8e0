pub const REST_API: &str = "https://api.twitter.com/1.1";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// API error codes meaning the requested object does not exist or cannot be seen:
/// no such user (50), suspended (63), no such page (8, 34), no status with that id (144).
pub const NOT_FOUND_CODES: &[u32] = &[8, 34, 50, 63, 144];
pub const RATE_LIMIT_CODE: u32 = 88;
