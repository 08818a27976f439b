use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;

use super::protocol::{parse_info, parse_new, parse_play, Info, Play};
use super::GameServer;
use crate::error::ProtocolError;
use crate::game::Board;

/// Check that `input` is an absolute http(s) URL and give it a trailing
/// slash so endpoint names can be appended.
pub fn normalize_url(input: &str) -> Result<String, ProtocolError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|_| ProtocolError::InvalidUrl(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ProtocolError::InvalidUrl(trimmed.to_string()));
    }
    let mut normalized = url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

/// Blocking HTTP client for the game server.
pub struct WebClient {
    http: Client,
    base_url: String,
    pid: Option<String>,
}

impl WebClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ProtocolError> {
        let base_url = normalize_url(url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(WebClient {
            http,
            base_url,
            pid: None,
        })
    }

    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, ProtocolError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {url} {query:?}");
        let body = self
            .http
            .get(&url)
            .query(query)
            .send()?
            .error_for_status()?
            .text()?;
        debug!("response: {body}");
        Ok(body)
    }
}

impl GameServer for WebClient {
    fn info(&mut self) -> Result<Info, ProtocolError> {
        let info = parse_info(&self.get("info", &[])?)?;
        info!(
            "server {} offers a {}x{} board with strategies {:?}",
            self.base_url, info.width, info.height, info.strategies
        );
        Ok(info)
    }

    fn new_game(&mut self, strategy: &str) -> Result<(), ProtocolError> {
        let pid = parse_new(&self.get("new/", &[("strategy", strategy)])?)?;
        info!("started game {pid} against {strategy}");
        self.pid = Some(pid);
        Ok(())
    }

    fn play(&mut self, slot: usize, board: &Board) -> Result<Play, ProtocolError> {
        let pid = self.pid.as_deref().ok_or(ProtocolError::NoGame)?;
        let slot_param = slot.to_string();
        let body = self.get("play", &[("pid", pid), ("move", &slot_param)])?;
        parse_play(&body, board, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_slash() {
        assert_eq!(
            normalize_url("http://example.com/c4").unwrap(),
            "http://example.com/c4/"
        );
        assert_eq!(
            normalize_url(" https://example.com/c4/ ").unwrap(),
            "https://example.com/c4/"
        );
    }

    #[test]
    fn normalize_rejects_non_urls() {
        assert!(matches!(
            normalize_url("not a url"),
            Err(ProtocolError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_url("ftp://example.com/"),
            Err(ProtocolError::InvalidUrl(_))
        ));
    }

    #[test]
    fn play_without_game_is_rejected() {
        let mut client = WebClient::new("http://localhost:1/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:1/");
        assert!(client.pid.is_none());
        let err = client.play(0, &Board::default()).unwrap_err();
        assert!(matches!(err, ProtocolError::NoGame));
    }
}
