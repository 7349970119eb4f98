// Text presenters for service records.
//
// Every presenter writes to an `io::Write` so commands can target stdout
// and tests can target a buffer. Timestamps are rendered in the
// presenter's time zone: `Local` for the binary, `Utc` in tests.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{Local, TimeZone};
use serde_json::Value;

use crate::models::{
    Badge, GameState, GameStatus, HumanId, Infection, Mission, Player, Profile, Rule, Teams,
};

pub const NO_GAME_MESSAGE: &str = "No game available in the near future!";
pub const NO_PLAYERS_MESSAGE: &str = "No Players Found!";
const PRE_GAME_SUFFIX: &str = " Until Game Starts!";
const IN_GAME_SUFFIX: &str = " Remaining in the game!";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Renderer<Tz: TimeZone> {
    tz: Tz,
}

impl Renderer<Local> {
    pub fn local() -> Self {
        Renderer { tz: Local }
    }
}

impl<Tz> Renderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(tz: Tz) -> Self {
        Renderer { tz }
    }

    /// `YYYY-MM-DD HH:MM:SS` in the renderer's zone. Out-of-range values
    /// fall back to the raw number.
    pub fn timestamp(&self, secs: i64) -> String {
        match self.tz.timestamp_opt(secs, 0).single() {
            Some(t) => t.format(TIME_FORMAT).to_string(),
            None => secs.to_string(),
        }
    }

    pub fn player<W: Write>(&self, w: &mut W, p: &Player) -> io::Result<()> {
        self.player_header(w, p)?;
        writeln!(w, "Zombie Attributes")?;
        writeln!(w, "\tHumans Tagged: {}", p.humans_tagged)?;
        writeln!(w, "---")
    }

    pub fn profile<W: Write>(&self, w: &mut W, profile: &Profile) -> io::Result<()> {
        let p = &profile.player;
        writeln!(w, "ID: {}", plain(&p.id))?;
        writeln!(w, "APIkey: {}", profile.apikey)?;
        writeln!(w, "Name: {}", p.fullname)?;
        writeln!(w, "Email: {}", profile.email)?;
        self.player_details(w, p)?;
        writeln!(w, "Zombie Attributes")?;
        writeln!(w, "\tID: {}", profile.zombie_id)?;
        writeln!(w, "\tHumans Tagged: {}", p.humans_tagged)?;
        if !profile.infections.is_empty() {
            writeln!(w, "Infections")?;
            for infection in &profile.infections {
                self.infection(w, infection)?;
            }
        }
        writeln!(w, "Human IDs:")?;
        for id in &profile.human_ids {
            human_id(w, id)?;
        }
        Ok(())
    }

    pub fn infection<W: Write>(&self, w: &mut W, i: &Infection) -> io::Result<()> {
        writeln!(w, "\tID: {}", plain(&i.id))?;
        writeln!(w, "\tHuman: {}", i.human)?;
        writeln!(w, "\tTime: {}", self.timestamp(i.time))
    }

    /// Game status followed by team counts. When no game is scheduled only
    /// the fixed message is written.
    pub fn status<W: Write>(&self, w: &mut W, status: &GameStatus, teams: &Teams) -> io::Result<()> {
        let game = match (&status.status, &status.game) {
            (GameState::NoGame, _) | (_, None) => return writeln!(w, "{NO_GAME_MESSAGE}"),
            (_, Some(game)) => game,
        };
        writeln!(w, "Game Start: {}", self.timestamp(game.start))?;
        writeln!(w, "Game End: {}", self.timestamp(game.end))?;
        let suffix = if status.status == GameState::PreGame {
            PRE_GAME_SUFFIX
        } else {
            IN_GAME_SUFFIX
        };
        writeln!(w, "{}{}", duration(game.time.diff), suffix)?;
        writeln!(w, "Humans: {}", teams.humans)?;
        writeln!(w, "Zombies: {}", teams.zombies)
    }

    fn player_header<W: Write>(&self, w: &mut W, p: &Player) -> io::Result<()> {
        writeln!(w, "ID: {}", plain(&p.id))?;
        writeln!(w, "Name: {}", p.fullname)?;
        self.player_details(w, p)
    }

    // Clan, team, badges and avatar; shared by both player views.
    fn player_details<W: Write>(&self, w: &mut W, p: &Player) -> io::Result<()> {
        if let Some(clan) = &p.clan {
            writeln!(w, "Clan: {clan}")?;
        }
        writeln!(w, "Team: {}", p.team)?;
        if !p.badges.is_empty() {
            writeln!(w, "Badges:")?;
            for b in &p.badges {
                badge(w, b)?;
            }
        }
        if let Some(avatar) = &p.avatar {
            writeln!(w, "Avatar: {avatar}")?;
        }
        Ok(())
    }
}

pub fn mission<W: Write>(w: &mut W, m: &Mission) -> io::Result<()> {
    writeln!(w, "{}", m.title)?;
    writeln!(w, "{}", m.team)?;
    writeln!(w, "{}", m.post_date)?;
    writeln!(w, "{}", m.body)
}

pub fn rule<W: Write>(w: &mut W, r: &Rule) -> io::Result<()> {
    writeln!(w, "{}", r.title)?;
    writeln!(w, "{}", r.body)
}

fn badge<W: Write>(w: &mut W, b: &Badge) -> io::Result<()> {
    writeln!(w, "\tTitle: {}", b.name)?;
    writeln!(w, "\tID: {}", plain(&b.id))?;
    writeln!(w, "\tDescription: {}", b.description)
}

fn human_id<W: Write>(w: &mut W, id: &HumanId) -> io::Result<()> {
    let active = if id.active { "True" } else { "False" };
    writeln!(w, "{} Active: {}", id.id_string, active)
}

/// `HH:MM:SS` for a number of seconds. Hours are not wrapped at 24.
pub fn duration(secs: i64) -> String {
    let secs = secs.unsigned_abs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

// Ids arrive as numbers or strings; strings print without quotes.
fn plain(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn render(f: impl FnOnce(&Renderer<Utc>, &mut Vec<u8>) -> io::Result<()>) -> String {
        let renderer = Renderer::new(Utc);
        let mut out = Vec::new();
        f(&renderer, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn status(value: serde_json::Value) -> GameStatus {
        serde_json::from_value(value).unwrap()
    }

    const TEAMS: Teams = Teams { humans: 40, zombies: 12 };

    #[test]
    fn duration_formats_hours_minutes_seconds() {
        assert_eq!(duration(3600), "01:00:00");
        assert_eq!(duration(3725), "01:02:05");
        assert_eq!(duration(93600), "26:00:00");
        assert_eq!(duration(-59), "00:00:59");
    }

    #[test]
    fn no_game_prints_only_the_message() {
        let s = status(json!({"status": "no-game"}));
        let out = render(|r, w| r.status(w, &s, &TEAMS));
        assert_eq!(out, "No game available in the near future!\n");
    }

    #[test]
    fn no_game_ignores_game_block() {
        let s = status(json!({
            "status": "no-game",
            "game": {"start": 0, "end": 0, "time": {"diff": 0}}
        }));
        let out = render(|r, w| r.status(w, &s, &TEAMS));
        assert!(!out.contains("Game Start"));
    }

    #[test]
    fn pre_game_counts_down_to_start() {
        let s = status(json!({
            "status": "pre-game",
            "game": {"start": 1700000000, "end": 1700600000, "time": {"diff": 3600}}
        }));
        let out = render(|r, w| r.status(w, &s, &TEAMS));
        assert_eq!(
            out,
            "Game Start: 2023-11-14 22:13:20\n\
             Game End: 2023-11-21 20:53:20\n\
             01:00:00 Until Game Starts!\n\
             Humans: 40\n\
             Zombies: 12\n"
        );
    }

    #[test]
    fn in_game_shows_remaining_time() {
        let s = status(json!({
            "status": "in-game",
            "game": {"start": "1700000000", "end": "1700600000", "time": {"diff": "3600"}}
        }));
        let out = render(|r, w| r.status(w, &s, &TEAMS));
        assert!(out.contains("01:00:00 Remaining in the game!\n"));
    }

    #[test]
    fn infection_is_tab_indented() {
        let i: Infection =
            serde_json::from_value(json!({"id": 3, "human": "Bob", "time": 0})).unwrap();
        let out = render(|r, w| r.infection(w, &i));
        assert_eq!(out, "\tID: 3\n\tHuman: Bob\n\tTime: 1970-01-01 00:00:00\n");
    }

    #[test]
    fn player_without_optional_fields() {
        let p: Player = serde_json::from_value(json!({
            "id": 9, "fullname": "Cat", "clan": null, "team": "zombie",
            "badges": [], "avatar": null, "humansTagged": 4
        }))
        .unwrap();
        let out = render(|r, w| r.player(w, &p));
        assert_eq!(
            out,
            "ID: 9\nName: Cat\nTeam: zombie\nZombie Attributes\n\tHumans Tagged: 4\n---\n"
        );
    }

    #[test]
    fn player_with_clan_badges_and_avatar() {
        let p: Player = serde_json::from_value(json!({
            "id": "9", "fullname": "Cat", "clan": "Night Owls", "team": "human",
            "badges": [{"id": 1, "name": "First Blood", "description": "Tagged early"}],
            "avatar": "cat.png", "humansTagged": 0
        }))
        .unwrap();
        let out = render(|r, w| r.player(w, &p));
        assert!(out.starts_with("ID: 9\nName: Cat\nClan: Night Owls\nTeam: human\n"));
        assert!(out.contains("Badges:\n\tTitle: First Blood\n\tID: 1\n\tDescription: Tagged early\n"));
        assert!(out.contains("Avatar: cat.png\n"));
    }

    #[test]
    fn profile_includes_private_fields() {
        let p: Profile = serde_json::from_value(json!({
            "id": 7, "apikey": "abc", "fullname": "Ann", "email": "ann@example.com",
            "clan": null, "team": "human", "badges": [], "avatar": null,
            "zombieId": "Z-7", "humansTagged": 1,
            "infections": [{"id": 11, "human": "Dan", "time": 0}],
            "humanIds": [{"id_string": "H-1", "active": true}, {"id_string": "H-2", "active": false}]
        }))
        .unwrap();
        let out = render(|r, w| r.profile(w, &p));
        assert_eq!(
            out,
            "ID: 7\nAPIkey: abc\nName: Ann\nEmail: ann@example.com\nTeam: human\n\
             Zombie Attributes\n\tID: Z-7\n\tHumans Tagged: 1\n\
             Infections\n\tID: 11\n\tHuman: Dan\n\tTime: 1970-01-01 00:00:00\n\
             Human IDs:\nH-1 Active: True\nH-2 Active: False\n"
        );
    }

    #[test]
    fn mission_and_rule_dump_fields() {
        let m = Mission {
            title: "Escort".into(),
            team: "human".into(),
            post_date: "2024-04-01".into(),
            body: "Walk the VIP".into(),
        };
        let mut out = Vec::new();
        mission(&mut out, &m).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Escort\nhuman\n2024-04-01\nWalk the VIP\n");

        let r = Rule { title: "Safe zones".into(), body: "Dorms".into() };
        let mut out = Vec::new();
        rule(&mut out, &r).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Safe zones\nDorms\n");
    }
}
