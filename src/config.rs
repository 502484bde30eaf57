//! Configuration constants and utilities for userline
//!
//! Where the profile file lives, which server a blank profile talks to, and
//! the environment variables that override both.

/// Default profile file path for userline
pub const DEFAULT_PROFILE_PATH: &str = "~/.userline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "USERLINE_PROFILE_PATH";

/// Environment variable holding the log filter (e.g. `debug`, `userline=trace`)
pub const LOG_LEVEL_ENV_VAR: &str = "USERLINE_LOG_LEVEL";

/// Profile used when `--profile` is not given
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Server used when no profile supplies one
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Collection endpoint shared by create and list
pub const USERS_ENDPOINT: &str = "/api/users";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}
