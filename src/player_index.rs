use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

pub const BASE_URL: &str = "https://www.basketball-reference.com";
pub const PLAYERS_URL: &str = "https://www.basketball-reference.com/players/";
pub const DEFAULT_OUTPUT: &str = "active_players.txt";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/115.0 Safari/537.36";
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPlayer {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

pub fn fetch_active_players(client: &Client, policy: RetryPolicy) -> Result<Vec<IndexedPlayer>> {
    let html = fetch_with_retry(
        policy,
        || {
            let resp = client
                .get(PLAYERS_URL)
                .header(USER_AGENT, BROWSER_USER_AGENT)
                .send()
                .context("request failed")?;
            let status = resp.status().as_u16();
            let body = resp.text().context("failed reading body")?;
            Ok((status, body))
        },
        |attempt, delay| {
            eprintln!(
                "[WARN] 429 Too Many Requests (attempt {attempt}), retrying after {}s",
                delay.as_secs()
            );
            thread::sleep(delay);
        },
    )?;
    Ok(parse_active_players(&html))
}

/// Retries only on 429; any other non-success status fails straight away.
pub fn fetch_with_retry<F, W>(policy: RetryPolicy, mut fetch: F, mut wait: W) -> Result<String>
where
    F: FnMut() -> Result<(u16, String)>,
    W: FnMut(u32, Duration),
{
    for attempt in 1..=policy.attempts {
        let (status, body) = fetch()?;
        match status {
            200..=299 => return Ok(body),
            STATUS_TOO_MANY_REQUESTS => {
                if attempt < policy.attempts {
                    wait(attempt, policy.delay);
                }
            }
            other => bail!("http {other} from players page"),
        }
    }
    bail!("failed to fetch page after retries due to rate limiting")
}

/// Collects links inside `<div id="players_*">` blocks whose trailing text
/// carries the `*` active marker.
pub fn parse_active_players(html: &str) -> Vec<IndexedPlayer> {
    let lc = html.to_ascii_lowercase();
    let mut players = Vec::new();
    let mut from = 0;

    while let Some(rel) = lc[from..].find("<div") {
        let start = from + rel;
        let Some(open_end) = lc[start..].find('>').map(|i| start + i) else {
            break;
        };
        let is_players_block = attr_value(&html[start..=open_end], "id")
            .is_some_and(|id| id.starts_with("players_"));
        if !is_players_block {
            from = open_end + 1;
            continue;
        }
        let Some(close) = matching_div_close(&lc, open_end + 1) else {
            break;
        };
        collect_marked_links(&html[open_end + 1..close], &mut players);
        from = close;
    }

    players
}

fn matching_div_close(lc: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let next_open = lc[pos..].find("<div").map(|i| pos + i);
        let next_close = lc[pos..].find("</div").map(|i| pos + i)?;
        match next_open {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + 4;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + 5;
            }
        }
    }
}

fn collect_marked_links(block: &str, out: &mut Vec<IndexedPlayer>) {
    let lc = block.to_ascii_lowercase();
    let mut from = 0;

    while let Some(rel) = lc[from..].find("<a") {
        let start = from + rel;
        // Skip <abbr>, <article> and friends.
        let is_anchor = lc[start + 2..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c.is_ascii_whitespace());
        if !is_anchor {
            from = start + 2;
            continue;
        }
        let Some(open_end) = lc[start..].find('>').map(|i| start + i) else {
            break;
        };
        let Some(close) = lc[open_end..].find("</a>").map(|i| open_end + i) else {
            break;
        };
        let after = close + "</a>".len();
        let tail_end = lc[after..].find('<').map(|i| after + i).unwrap_or(block.len());
        let tail = &block[after..tail_end];

        if tail.contains('*') {
            let href = attr_value(&block[start..=open_end], "href").unwrap_or_default();
            let name = normalize_ws(&decode_entities(&strip_tags(&block[open_end + 1..close])));
            if !href.is_empty() && !name.is_empty() {
                out.push(IndexedPlayer {
                    name,
                    url: format!("{BASE_URL}{href}"),
                });
            }
        }
        from = after;
    }
}

fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lc = tag.to_ascii_lowercase();
    let needle = format!("{name}=");
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&needle) {
        let idx = from + rel;
        let boundary = idx == 0 || lc.as_bytes()[idx - 1].is_ascii_whitespace();
        let value_start = idx + needle.len();
        if !boundary {
            from = value_start;
            continue;
        }
        let rest = &tag[value_start..];
        let value = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => rest[1..].split(q).next().unwrap_or_default(),
            _ => rest
                .split(|c: char| c.is_ascii_whitespace() || c == '>')
                .next()
                .unwrap_or_default(),
        };
        return Some(value.to_string());
    }
    None
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn format_index(players: &[IndexedPlayer]) -> String {
    let mut out = String::new();
    for player in players {
        let _ = writeln!(out, "{} | {}", player.name, player.url);
    }
    out
}

pub fn write_index(path: &Path, players: &[IndexedPlayer]) -> Result<()> {
    fs::write(path, format_index(players))
        .with_context(|| format!("write player index {}", path.display()))
}
