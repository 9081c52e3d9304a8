use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::http_client::http_client;
use crate::state::SeasonRecord;

pub const PLAYERS_PATH: &str = "/api/players";
pub const PLAYER_STATS_PATH: &str = "/api/player_stats";

/// Where the provider thread gets its data from.
pub trait StatsSource {
    fn fetch_players(&self) -> Result<Vec<String>>;
    fn fetch_player_stats(&self, name: &str) -> Result<Vec<SeasonRecord>>;
}

#[derive(Debug, Clone)]
pub struct StatsApi {
    base_url: String,
    timeout: Duration,
}

impl StatsApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            timeout: config.http_timeout,
        }
    }

    pub fn players_url(&self) -> String {
        format!("{}{PLAYERS_PATH}", self.base_url)
    }

    pub fn player_stats_url(&self, name: &str) -> String {
        format!(
            "{}{PLAYER_STATS_PATH}?name={}",
            self.base_url,
            encode_component(name)
        )
    }

    fn get_body(&self, url: &str) -> Result<String> {
        let client = http_client(self.timeout)?;
        let resp = client.get(url).send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("http {}: {}", status, body));
        }
        Ok(body)
    }
}

impl StatsSource for StatsApi {
    fn fetch_players(&self) -> Result<Vec<String>> {
        let body = self.get_body(&self.players_url())?;
        parse_players_json(&body)
    }

    fn fetch_player_stats(&self, name: &str) -> Result<Vec<SeasonRecord>> {
        let body = self.get_body(&self.player_stats_url(name))?;
        parse_player_stats_json(&body)
    }
}

pub fn parse_players_json(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw.trim()).context("invalid players json")
}

#[derive(Debug, Deserialize)]
struct WireSeasonRecord {
    #[serde(rename = "Season")]
    season: Value,
    #[serde(rename = "PTS")]
    pts: Value,
}

pub fn parse_player_stats_json(raw: &str) -> Result<Vec<SeasonRecord>> {
    let rows: Vec<WireSeasonRecord> =
        serde_json::from_str(raw.trim()).context("invalid player stats json")?;

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let season = scalar_to_string(&row.season)
                .with_context(|| format!("row {idx}: Season is not a string or number"))?;
            let pts = scalar_to_string(&row.pts)
                .with_context(|| format!("row {idx}: PTS is not a string or number"))?;
            Ok(SeasonRecord { season, pts })
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Percent-encodes a query component the way `encodeURIComponent` does:
/// everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` becomes `%XX`.
pub fn encode_component(raw: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    out
}
