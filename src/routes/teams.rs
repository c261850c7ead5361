use sqlx::sqlite::SqliteConnection;

use crate::db;
use crate::error::ApiError;
use crate::models::{Payload, TeamUpdate, TeamsResponse};

/// admin/teams GET - every team grouped by conference
pub async fn get_teams(conn: &mut SqliteConnection) -> Result<Payload, ApiError> {
    let teams = db::get_admin_teams(conn).await?;
    tracing::debug!(count = teams.len(), "loaded teams");

    Ok(Payload::Teams(TeamsResponse { teams }))
}

/// admin/teams POST - overwrite a team's name and stats.
///
/// Points are stored as given; nothing is derived from wins and losses.
pub async fn update_team(
    conn: &mut SqliteConnection,
    body: TeamUpdate,
) -> Result<Payload, ApiError> {
    let result = db::update_team(conn, &body).await?;

    if result.rows_affected() == 0 {
        tracing::warn!(team_id = ?body.id, "team update matched no rows");
    } else {
        tracing::info!(team_id = ?body.id, "team updated");
    }

    Ok(Payload::success())
}
