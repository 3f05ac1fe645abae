//! Single-attempt HTTP GET into memory.
//!
//! Uses the curl crate (libcurl). Both the catalog loader and the download agent
//! go through [`get_bytes`]; neither retries.

use crate::config::HttpConfig;
use std::time::Duration;

/// Error returned by a GET: curl failure or non-2xx status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Performs a GET and returns the full response body.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking` if
/// used from async code.
pub fn get_bytes(url: &str, opts: &HttpConfig) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(opts.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(opts.timeout_secs))?;
    easy.useragent(concat!("mgen/", env!("CARGO_PKG_VERSION")))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        tracing::debug!("GET {} returned HTTP {}", url, code);
        return Err(FetchError::Http(code));
    }

    tracing::debug!("GET {} -> {} bytes", url, body.len());
    Ok(body)
}
