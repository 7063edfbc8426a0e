//! Client for the central highscore server. The protocol is a fixed GET API:
//! one request fetches the top-N lists of every category, another submits a
//! single entry. Both are best-effort with a short timeout and no retry; a
//! slow server stalls the caller for at most the configured timeout.

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use crate::config::GameConfig;
use crate::highscore::HighscoreEntry;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http client unavailable")]
    ClientUnavailable,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("malformed response line: {0:?}")]
    MalformedLine(String),
}

pub struct RemoteStore {
    base_url: String,
    client: Option<reqwest::blocking::Client>,
}

impl RemoteStore {
    pub fn new(config: &GameConfig) -> Self {
        RemoteStore::with_endpoint(&config.server_addr, &config.server_path, config.timeout)
    }

    pub fn with_endpoint(addr: &str, path: &str, timeout: Duration) -> Self {
        // The configured path carries the fixed "?game=TLS&" query prefix;
        // reqwest appends further parameters itself.
        let base_url = format!("http://{}{}", addr, path.trim_end_matches('&'));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .ok();
        RemoteStore { base_url, client }
    }

    /// Fetch the server's top-`top` lists for every category.
    pub fn fetch_top(
        &self,
        top: usize,
    ) -> Result<BTreeMap<String, Vec<HighscoreEntry>>, RemoteError> {
        let client = self.client.as_ref().ok_or(RemoteError::ClientUnavailable)?;
        let response = client
            .get(&self.base_url)
            .query(&[("top", top.to_string())])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        parse_fetch_body(&response.text()?, top)
    }

    /// Submit one placed entry. The switch trace travels as a single
    /// underscore-joined `instance` parameter, mirroring how [`parse_fetch_body`]
    /// splits it back apart.
    pub fn upload(
        &self,
        category: &str,
        name: &str,
        switch_trace: &[String],
        score: i64,
    ) -> Result<(), RemoteError> {
        let client = self.client.as_ref().ok_or(RemoteError::ClientUnavailable)?;
        let instance = switch_trace.join("_");
        let points = score.to_string();
        let response = client
            .get(&self.base_url)
            .query(&[
                ("category", category),
                ("name", name),
                ("instance", instance.as_str()),
                ("points", points.as_str()),
            ])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Parse the fetch response body: one line per category, the category name
/// separated from a colon-joined entry list by whitespace, each entry a
/// `name,trace,score` triple. Rows are padded to `top` slots; anything
/// malformed fails the whole fetch so the caller falls back to local data.
pub fn parse_fetch_body(
    body: &str,
    top: usize,
) -> Result<BTreeMap<String, Vec<HighscoreEntry>>, RemoteError> {
    let mut rows = BTreeMap::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(category), Some(values)) = (parts.next(), parts.next()) else {
            return Err(RemoteError::MalformedLine(line.to_string()));
        };
        let mut row = vec![HighscoreEntry::sentinel(); top];
        for (idx, item) in values.split(':').enumerate().take(top) {
            let fields: Vec<&str> = item.split(',').collect();
            let &[name, trace, score] = fields.as_slice() else {
                return Err(RemoteError::MalformedLine(line.to_string()));
            };
            let score = score
                .parse::<f64>()
                .map_err(|_| RemoteError::MalformedLine(line.to_string()))?;
            let switch_trace = if trace.is_empty() {
                Vec::new()
            } else {
                trace.split('_').map(str::to_string).collect()
            };
            row[idx] = HighscoreEntry::new(name, switch_trace, score as i64);
        }
        rows.insert(category.to_string(), row);
    }
    Ok(rows)
}
