//! Minimal scanner for the flat XML files the simulator writes (statistics,
//! tripinfo, tlsstate). These files carry one element per record with all
//! data in attributes; a full XML parser buys nothing here. Elements whose
//! tag is not requested, closing tags and comments are skipped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One scanned element: its tag and the `key="value"` attribute pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlRecord {
    pub tag: String,
    pub attrs: HashMap<String, String>,
}

impl XmlRecord {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attribute parsed as a number. A missing or non-numeric attribute is
    /// `None`; callers decide whether that skips the record or fails the run.
    pub fn num(&self, name: &str) -> Option<f64> {
        self.attr(name)?.trim().parse::<f64>().ok()
    }
}

/// Scan a file for elements with one of the requested tags, in document
/// order. An unreadable file yields an empty list.
pub fn scan_records(path: &Path, tags: &[&str]) -> Vec<XmlRecord> {
    match fs::read_to_string(path) {
        Ok(raw) => scan_records_str(&raw, tags),
        Err(err) => {
            log::debug!("cannot read {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Scan already-loaded text for elements with one of the requested tags.
pub fn scan_records_str(raw: &str, tags: &[&str]) -> Vec<XmlRecord> {
    let mut records = Vec::new();
    for chunk in raw.split('<').skip(1) {
        let name_len = chunk
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .count();
        if name_len == 0 {
            continue;
        }
        let name = &chunk[..name_len];
        if !tags.contains(&name) {
            continue;
        }
        let tail = &chunk[name_len..];
        if !tail.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
            continue;
        }
        let body = tail.split('>').next().unwrap_or("").trim_end_matches('/');
        records.push(XmlRecord {
            tag: name.to_string(),
            attrs: parse_attrs(body),
        });
    }
    records
}

fn parse_attrs(body: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut rest = body;
    loop {
        rest = rest.trim_start();
        let Some(eq) = rest.find('=') else { break };
        let name = rest[..eq].trim();
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '.' || c == '-');
        if !valid_name {
            break;
        }
        let Some(quoted) = rest[eq + 1..].trim_start().strip_prefix('"') else {
            break;
        };
        let Some(end) = quoted.find('"') else { break };
        attrs.insert(name.to_string(), quoted[..end].to_string());
        rest = &quoted[end + 1..];
    }
    attrs
}
