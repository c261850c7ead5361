use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Conference row, the grouping used for standings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Conference {
    pub id: i64,
    pub name: String,
}

/// Team as shown in the standings table
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct StandingsTeam {
    pub id: i64,
    pub name: String,
    pub games_played: i64,
    pub wins: i64,
    pub losses: i64,
    pub overtime_losses: i64,
    pub points: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub position: i64,
}

/// A conference with its teams nested in standings order
#[derive(Debug, Serialize, Deserialize)]
pub struct ConferenceStandings {
    pub id: i64,
    pub name: String,
    pub teams: Vec<StandingsTeam>,
}

/// Team as listed for editing: no rank, but the owning conference.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdminTeam {
    pub id: i64,
    pub name: String,
    pub games_played: i64,
    pub wins: i64,
    pub losses: i64,
    pub overtime_losses: i64,
    pub points: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub conference_id: Option<i64>,
}

/// Match joined with both team names. `match_date` serializes as an
/// ISO-8601 string, or null when unscheduled.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub match_date: Option<NaiveDateTime>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Regulation {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub order_index: i64,
}

// Response envelopes

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub conferences: Vec<ConferenceStandings>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegulationsResponse {
    pub regulations: Vec<Regulation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub teams: Vec<AdminTeam>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Whatever a route produced; serialized as the bare envelope.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Standings(StandingsResponse),
    Matches(MatchesResponse),
    Regulations(RegulationsResponse),
    Teams(TeamsResponse),
    Success(SuccessResponse),
}

impl Payload {
    pub fn success() -> Self {
        Payload::Success(SuccessResponse { success: true })
    }
}

// Request bodies. Every field is optional; the handlers substitute the
// documented defaults and otherwise pass values through unchecked.

/// Body of `admin/teams` POST
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamUpdate {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub games_played: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub overtime_losses: Option<i64>,
    pub points: Option<i64>,
    pub goals_for: Option<i64>,
    pub goals_against: Option<i64>,
}

/// Body of `admin/matches` POST
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewMatch {
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub match_date: Option<String>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: Option<String>,
}

pub const DEFAULT_MATCH_STATUS: &str = "scheduled";

impl NewMatch {
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_MATCH_STATUS)
    }

    pub fn match_date(&self) -> Result<Option<NaiveDateTime>, ApiError> {
        match self.match_date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_match_date(raw)
                .map(Some)
                .ok_or_else(|| ApiError::InvalidMatchDate(raw.to_string())),
        }
    }
}

/// Accepts the shapes a browser `datetime-local` input or an API client is
/// likely to send. Offsets are normalised to UTC.
fn parse_match_date(raw: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    if let Some(parsed) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(parsed);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Body of `admin/regulations` POST
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewRegulation {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order_index: Option<i64>,
}

/// Body of `admin/regulations` PUT
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegulationUpdate {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub order_index: Option<i64>,
}
