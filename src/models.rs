// Response shapes consumed by the client. Only the fields that are
// rendered are declared; serde ignores everything else the service sends.

use serde::{Deserialize, Deserializer};

/// Epoch seconds delivered either as a JSON number or a numeric string.
fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v.trunc() as i64),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {s:?}"))),
    }
}

/// A non-negative count delivered as a JSON number or a numeric string.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid count: {s:?}"))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Badge {
    pub id: serde_json::Value,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Infection {
    pub id: serde_json::Value,
    pub human: String,
    #[serde(deserialize_with = "epoch_seconds")]
    pub time: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HumanId {
    pub id_string: String,
    pub active: bool,
}

/// Public view of a player, as returned by `player/<id>` and the listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: serde_json::Value,
    pub fullname: String,
    #[serde(default)]
    pub clan: Option<String>,
    pub team: String,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "count")]
    pub humans_tagged: u64,
}

/// The authenticated player's own profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(flatten)]
    pub player: Player,
    pub apikey: String,
    pub email: String,
    pub zombie_id: String,
    #[serde(default)]
    pub infections: Vec<Infection>,
    #[serde(default)]
    pub human_ids: Vec<HumanId>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mission {
    pub title: String,
    pub team: String,
    pub post_date: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct MissionsResponse {
    pub missions: Vec<Mission>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct RulesResponse {
    pub rulesets: Vec<Rule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    NoGame,
    PreGame,
    InGame,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameTime {
    #[serde(deserialize_with = "epoch_seconds")]
    pub diff: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Game {
    #[serde(deserialize_with = "epoch_seconds")]
    pub start: i64,
    #[serde(deserialize_with = "epoch_seconds")]
    pub end: i64,
    pub time: GameTime,
}

/// `game` is absent (or null) when no game is scheduled.
#[derive(Debug, Clone, Deserialize)]
pub struct GameStatus {
    pub status: GameState,
    #[serde(default)]
    pub game: Option<Game>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Teams {
    #[serde(deserialize_with = "count")]
    pub humans: u64,
    #[serde(deserialize_with = "count")]
    pub zombies: u64,
}

#[derive(Debug, Deserialize)]
pub struct InfectionReceipt {
    pub zombie_name: String,
    pub human_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AntivirusReceipt {
    pub zombie_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidTime {
    pub result: bool,
}

/// One page of a paginated listing.
pub trait Page {
    type Item;

    /// Whether the server has more pages after this one.
    fn continues(&self) -> bool;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Debug, Deserialize)]
pub struct PlayerPage {
    pub continues: bool,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Page for PlayerPage {
    type Item = Player;

    fn continues(&self) -> bool {
        self.continues
    }

    fn into_items(self) -> Vec<Player> {
        self.players
    }
}

#[derive(Debug, Deserialize)]
pub struct InfectionPage {
    pub continues: bool,
    #[serde(default)]
    pub infections: Vec<Infection>,
}

impl Page for InfectionPage {
    type Item = Infection;

    fn continues(&self) -> bool {
        self.continues
    }

    fn into_items(self) -> Vec<Infection> {
        self.infections
    }
}
