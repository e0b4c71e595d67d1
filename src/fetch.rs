// Getting document bytes from disk or over HTTP
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::types::{Result, SdsError};

/// How far into the file the `%PDF` marker may appear. Some producers
/// prepend junk before the header.
pub const SIGNATURE_WINDOW: usize = 1024;

const USER_AGENT: &str = concat!("sds-parser/", env!("CARGO_PKG_VERSION"));

pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SIGNATURE_WINDOW)];
    head.windows(4).any(|w| w == b"%PDF")
}

pub fn ensure_pdf(bytes: &[u8], origin: &str) -> Result<()> {
    if looks_like_pdf(bytes) {
        Ok(())
    } else {
        Err(SdsError::NotPdf {
            origin: origin.to_string(),
        })
    }
}

pub fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|source| SdsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    ensure_pdf(&bytes, &path.display().to_string())?;
    Ok(bytes)
}

pub fn fetch_pdf(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    info!("fetching {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(SdsError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes()?.to_vec();
    debug!("fetched {} bytes from {}", bytes.len(), url);
    ensure_pdf(&bytes, url)?;
    Ok(bytes)
}
