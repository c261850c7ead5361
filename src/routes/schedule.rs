use sqlx::sqlite::SqliteConnection;

use crate::db;
use crate::error::ApiError;
use crate::models::{MatchesResponse, NewMatch, Payload};

/// schedule GET, admin/matches GET - all matches, latest first
pub async fn get_matches(conn: &mut SqliteConnection) -> Result<Payload, ApiError> {
    let matches = db::get_matches(conn).await?;
    tracing::debug!(count = matches.len(), "loaded matches");

    Ok(Payload::Matches(MatchesResponse { matches }))
}

/// admin/matches POST - add a match
pub async fn create_match(
    conn: &mut SqliteConnection,
    body: NewMatch,
) -> Result<Payload, ApiError> {
    let match_date = body.match_date()?;

    let result = db::insert_match(conn, &body, match_date).await?;

    tracing::info!(
        match_id = result.last_insert_rowid(),
        home_team_id = ?body.home_team_id,
        away_team_id = ?body.away_team_id,
        status = body.status(),
        "match created"
    );

    Ok(Payload::success())
}
