pub static VERSION: &str = env!("CARGO_PKG_VERSION");
pub static NAME: &str = "navproxy";

pub const DEFAULT_CODEUNIT: &str = "TestNavWs";
pub const DEFAULT_GREETING_COMPANY: &str = "MOTORFORUM DRAMMEN";
pub const DEFAULT_TIMEOUT_MINUTES: u64 = 60;
pub const MAX_TIMEOUT_MINUTES: u64 = 7 * 24 * 60;
pub const DEFAULT_POLL_RETRIES: u32 = 10;
pub const DEFAULT_POLL_DELAY_MILLIS: u64 = 500;
