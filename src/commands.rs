// One function per HvZ operation.
//
// Inputs arrive already resolved; output goes to the given writer. A
// failing request returns its error without printing, so anything
// written before the failure stays on screen and `main` reports the rest.

use std::fmt::Display;
use std::io::Write;

use chrono::TimeZone;
use tracing::info;

use crate::api::{ApiClient, InfectionReport};
use crate::credentials::{ApiKey, CredentialStore};
use crate::error::{HvzError, Result};
use crate::models::Page;
use crate::pagination::collect_all;
use crate::render::{self, Renderer, NO_PLAYERS_MESSAGE};
use crate::ui::page_spinner;

/// Everything an operation needs: the service, the key file and the
/// presenter.
pub struct Session<Tz: TimeZone> {
    pub api: ApiClient,
    pub credentials: CredentialStore,
    pub renderer: Renderer<Tz>,
    /// Show a spinner while fetching paginated listings.
    pub progress: bool,
}

impl<Tz> Session<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Validate `raw` with the service, then store it. The stored key is
    /// left alone if the service rejects the new one.
    pub fn set_api_key<W: Write>(&self, out: &mut W, raw: &str) -> Result<()> {
        let key = ApiKey::parse(raw).ok_or_else(|| HvzError::MissingInput("API key".into()))?;
        self.api.test_key(&key)?;
        self.credentials.save(&key)?;
        info!(path = %self.credentials.path().display(), "API key updated");
        writeln!(out, "APIkey Set Successfully!").map_err(HvzError::from)
    }

    pub fn rules<W: Write>(&self, out: &mut W) -> Result<()> {
        for rule in self.api.rules()? {
            render::rule(out, &rule)?;
        }
        Ok(())
    }

    pub fn missions<W: Write>(&self, out: &mut W) -> Result<()> {
        let key = self.credentials.load()?;
        for mission in self.api.missions(&key)? {
            render::mission(out, &mission)?;
        }
        Ok(())
    }

    pub fn infect<W: Write>(&self, out: &mut W, report: &InfectionReport) -> Result<()> {
        let key = self.credentials.load()?;
        let receipt = self.api.register_infection(&key, report)?;
        writeln!(out, "{} has infected {}!", receipt.zombie_name, receipt.human_name).map_err(HvzError::from)
    }

    pub fn antivirus<W: Write>(&self, out: &mut W, antivirus: &str, zombie: &str) -> Result<()> {
        let key = self.credentials.load()?;
        let receipt = self.api.antivirus(&key, antivirus, zombie)?;
        writeln!(out, "{} has used an antivirus!", receipt.zombie_name).map_err(HvzError::from)
    }

    pub fn antivirus_valid<W: Write>(&self, out: &mut W) -> Result<()> {
        let line = if self.api.antivirus_valid()? {
            "An Antivirus CAN be used at this time"
        } else {
            "An Antivirus CAN NOT be used at this time"
        };
        writeln!(out, "{line}").map_err(HvzError::from)
    }

    pub fn profile<W: Write>(&self, out: &mut W) -> Result<()> {
        let key = self.credentials.load()?;
        let profile = self.api.profile(&key)?;
        self.renderer.profile(out, &profile).map_err(HvzError::from)
    }

    pub fn set_clan<W: Write>(&self, out: &mut W, clan: &str) -> Result<()> {
        let key = self.credentials.load()?;
        self.api.set_clan(&key, clan)?;
        writeln!(out, "Clan Successfully Set!").map_err(HvzError::from)
    }

    pub fn status<W: Write>(&self, out: &mut W) -> Result<()> {
        let status = self.api.status()?;
        let teams = self.api.teams()?;
        self.renderer.status(out, &status, &teams).map_err(HvzError::from)
    }

    pub fn player_info<W: Write>(&self, out: &mut W, player_id: &str) -> Result<()> {
        let player = self.api.player(player_id)?;
        self.renderer.player(out, &player).map_err(HvzError::from)
    }

    pub fn list_players<W: Write>(&self, out: &mut W, sort: &str) -> Result<()> {
        let players = self.collect("players", |cursor| self.api.players_page(cursor, sort))?;
        for player in &players {
            self.renderer.player(out, player)?;
        }
        Ok(())
    }

    /// Prints every match, or the no-players message when there are none.
    pub fn find_player<W: Write>(&self, out: &mut W, name: &str) -> Result<()> {
        let players = self.collect("matching players", |_| self.api.search_players(name))?;
        for player in &players {
            self.renderer.player(out, player)?;
        }
        if players.is_empty() {
            writeln!(out, "{NO_PLAYERS_MESSAGE}")?;
        }
        Ok(())
    }

    pub fn list_infections<W: Write>(&self, out: &mut W) -> Result<()> {
        let infections = self.collect("infections", |cursor| self.api.infections_page(cursor))?;
        for infection in &infections {
            self.renderer.infection(out, infection)?;
        }
        Ok(())
    }

    fn collect<P, F>(&self, what: &str, fetch: F) -> Result<Vec<P::Item>>
    where
        P: Page,
        F: FnMut(u32) -> Result<P>,
    {
        let spinner = self.progress.then(|| page_spinner(what));
        let result = collect_all(fetch, |page, total| {
            if let Some(spinner) = &spinner {
                spinner.set_message(format!("Fetching {what}... page {} ({total} so far)", page + 1));
            }
        });
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result
    }
}
