// src/config/consts.rs

// Drive search
pub const DEFAULT_SEARCH: &str = "Blood sugar";

// Local state
pub const LOG_FILE: &str = ".store/debug.log";
pub const CREDENTIALS_FILE: &str = "mycreds.txt";
pub const CLIENT_SECRETS_FILE: &str = "client_secrets.json";

// OAuth (installed-app flow with loopback redirect)
pub const REDIRECT_PORT: u16 = 8080;
pub const REDIRECT_PORT_FALLBACK_OFFSET: u16 = 10;
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";
pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

// Drive API
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
pub const ROOT_QUERY: &str = "'root' in parents and trashed=false";
pub const PAGE_SIZE: u32 = 1000;

// Net
pub const USER_AGENT: &str = concat!("bg_plot/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Export
pub const DEFAULT_OUT_DIR: &str = "output";
pub const DEFAULT_FILE_STEM: &str = "readings";

// Chart: 11 x 8.5 in at 100 dpi
pub const CHART_WIDTH: u32 = 1100;
pub const CHART_HEIGHT: u32 = 850;
pub const CHART_TITLE: &str = "Blood Glucose and Weight";
pub const AXIS_MARGIN: f64 = 0.1;

// Reference bands (mg/dL)
pub const HIGH_BAND: (f64, f64) = (120.0, 220.0);
pub const NORMAL_BAND: (f64, f64) = (80.0, 120.0);

// Source tables
pub const WEIGHT_MATCH: &str = "Weight";
pub const GLUCOSE_MATCH: &str = "Concentration";
pub const COL_TIME: &str = "Date/Time";
pub const COL_WEIGHT: &str = "Weight";
pub const COL_CONCENTRATION: &str = "Concentration";
pub const COL_EVENT: &str = "Event";
pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";
