pub const APPLICATION_NAME: &str = "inpaint-client";

pub const INPAINT_ENDPOINT_PATH: &str = "/api/inpaint";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_ACCEPT_HEADER: &str = "application/json";

pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_REQUEST_ID: &str = "x-request-id";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const SETTINGS_DIR_NAME: &str = "inpaint-client";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "inpainted.png";

pub const MAX_ERROR_BODY_CHARS: usize = 2048;
