use std::{env, fs};

use tracing::error;

/// Reads a secret, preferring a file named by `file_env_var_name` over the
/// plain `env_var_name` variable. Blank values count as missing.
pub fn get_secret(file_env_var_name: &str, env_var_name: &str) -> Option<String> {
    let value = if let Ok(secret_file_path) = env::var(file_env_var_name) {
        // Found a file path, try to read the file
        match fs::read_to_string(&secret_file_path) {
            Ok(content) => Some(content),
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                None
            }
        }
    } else {
        env::var(env_var_name).ok()
    };

    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
