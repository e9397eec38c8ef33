/// Base HTTP client construction shared by the API clients
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("tokendash/", env!("CARGO_PKG_VERSION"));

/// Build a client with a whole-request timeout
///
/// Requests are never retried; a timeout surfaces as a transport error.
pub fn build_http_client(timeout: Duration) -> Result<Client, String> {
    if timeout.is_zero() {
        return Err("Timeout must be greater than zero".to_string());
    }

    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(build_http_client(Duration::ZERO).is_err());
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }
}
