pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request";
pub const UNAUTHORIZED: &str = "HTTP/1.1 401 Unauthorized";
pub const NOT_FOUND: &str = "HTTP/1.1 404 Not Found";
pub const INTERNAL_ERROR: &str = "HTTP/1.1 500 Internal Server Error";

pub const TOPUP_PATH_PREFIX: &str = "/api/admin/users/";
pub const TOPUP_PATH_SUFFIX: &str = "/topup";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7879";
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
pub const MAX_HEAD_BYTES: usize = 16 * 1024;
