// API client module: a small blocking HTTP client for the HvZ service.
// Every call goes through `send`, which validates the status before the
// body is decoded (or, for `request_unit`, dropped unread).

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::credentials::ApiKey;
use crate::error::{HvzError, Result};
use crate::models::{
    AntivirusReceipt, GameStatus, InfectionPage, InfectionReceipt, Mission, MissionsResponse,
    Player, PlayerPage, Profile, ProfileResponse, Rule, RulesResponse, Teams, ValidTime,
};
use crate::validate;

pub const DEFAULT_BASE_URL: &str = "https://hvz.rit.edu/api/v1";

/// Holds a reqwest blocking client and the base URL of the service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Form fields for `register_infection`. Coordinates are only sent when
/// present.
#[derive(Debug, Clone)]
pub struct InfectionReport {
    pub human: String,
    pub zombie: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl InfectionReport {
    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![("human", self.human.as_str()), ("zombie", self.zombie.as_str())];
        if let Some(lat) = &self.latitude {
            form.push(("latitude", lat.as_str()));
        }
        if let Some(lon) = &self.longitude {
            form.push(("longitude", lon.as_str()));
        }
        form
    }
}

impl ApiClient {
    /// Create a client for `base_url`; a trailing slash is ignored.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hvz-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and decode the JSON body into `T`.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        form: Option<&[(&str, &str)]>,
    ) -> Result<T> {
        let body = self.send(method, path, query, form)?;
        serde_json::from_str(&body).map_err(HvzError::Decode)
    }

    /// Issue one request for its status only; a successful body is
    /// discarded without being parsed.
    pub fn request_unit(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        form: Option<&[(&str, &str)]>,
    ) -> Result<()> {
        self.send(method, path, query, form).map(|_| ())
    }

    // Send, validate the status, and hand back the raw body.
    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        form: Option<&[(&str, &str)]>,
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "sending request");
        let mut req = self.client.request(method, &url).query(query);
        if let Some(form) = form {
            req = req.form(form);
        }
        let res = req.send().map_err(HvzError::Transport)?;
        let status = res.status();
        let body = res.text().map_err(HvzError::Transport)?;
        debug!(%status, bytes = body.len(), "received response");
        validate::check(status, &body)?;
        Ok(body)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.request(Method::GET, path, query, None)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, key: &ApiKey, form: &[(&str, &str)]) -> Result<T> {
        self.request(Method::POST, path, &[("apikey", key.as_str())], Some(form))
    }

    /// Ask the service whether `key` is valid. The body is not inspected.
    pub fn test_key(&self, key: &ApiKey) -> Result<()> {
        self.request_unit(Method::GET, "test/key", &[("apikey", key.as_str())], None)
    }

    pub fn rules(&self) -> Result<Vec<Rule>> {
        self.get::<RulesResponse>("rules", &[]).map(|r| r.rulesets)
    }

    pub fn missions(&self, key: &ApiKey) -> Result<Vec<Mission>> {
        self.get::<MissionsResponse>("missions", &[("apikey", key.as_str())])
            .map(|r| r.missions)
    }

    pub fn register_infection(&self, key: &ApiKey, report: &InfectionReport) -> Result<InfectionReceipt> {
        self.post("register_infection", key, &report.form())
    }

    pub fn antivirus(&self, key: &ApiKey, antivirus: &str, zombie: &str) -> Result<AntivirusReceipt> {
        self.post("antivirus", key, &[("antivirus", antivirus), ("zombie", zombie)])
    }

    pub fn antivirus_valid(&self) -> Result<bool> {
        self.get::<ValidTime>("antivirus/valid_time", &[]).map(|v| v.result)
    }

    pub fn profile(&self, key: &ApiKey) -> Result<Profile> {
        self.get::<ProfileResponse>("profile", &[("apikey", key.as_str())])
            .map(|r| r.profile)
    }

    pub fn set_clan(&self, key: &ApiKey, clan: &str) -> Result<()> {
        self.request_unit(
            Method::POST,
            "profile/clan",
            &[("apikey", key.as_str())],
            Some(&[("clan", clan)][..]),
        )
    }

    pub fn status(&self) -> Result<GameStatus> {
        self.get("status", &[])
    }

    pub fn teams(&self) -> Result<Teams> {
        self.get("status/teams", &[])
    }

    pub fn player(&self, id: &str) -> Result<Player> {
        self.get(&format!("player/{id}"), &[])
    }

    pub fn players_page(&self, cursor: u32, sort: &str) -> Result<PlayerPage> {
        self.get(&format!("players/{cursor}"), &[("sort", sort)])
    }

    /// Search has no cursor; the same request is repeated while the
    /// server reports more results.
    pub fn search_players(&self, term: &str) -> Result<PlayerPage> {
        self.get("players/search", &[("term", term)])
    }

    pub fn infections_page(&self, cursor: u32) -> Result<InfectionPage> {
        self.get(&format!("infections/{cursor}"), &[])
    }
}
