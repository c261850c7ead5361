use sqlx::sqlite::SqliteConnection;

use crate::db;
use crate::error::ApiError;
use crate::models::{ConferenceStandings, Payload, StandingsResponse};

/// standings GET - every conference with its teams in table order
pub async fn get_standings(conn: &mut SqliteConnection) -> Result<Payload, ApiError> {
    let conferences_rows = db::get_conferences(conn).await?;

    let mut conferences = Vec::with_capacity(conferences_rows.len());
    for conference in conferences_rows {
        let teams = db::get_conference_standings(conn, conference.id).await?;
        tracing::debug!(conference_id = conference.id, teams = teams.len(), "loaded conference");

        conferences.push(ConferenceStandings {
            id: conference.id,
            name: conference.name,
            teams,
        });
    }

    Ok(Payload::Standings(StandingsResponse { conferences }))
}
