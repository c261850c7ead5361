use sqlx::sqlite::SqliteConnection;

use crate::db;
use crate::error::ApiError;
use crate::models::{NewRegulation, Payload, RegulationUpdate, RegulationsResponse};

/// regulations GET, admin/regulations GET - documents in display order
pub async fn get_regulations(conn: &mut SqliteConnection) -> Result<Payload, ApiError> {
    let regulations = db::get_regulations(conn).await?;
    tracing::debug!(count = regulations.len(), "loaded regulations");

    Ok(Payload::Regulations(RegulationsResponse { regulations }))
}

/// admin/regulations POST
pub async fn create_regulation(
    conn: &mut SqliteConnection,
    body: NewRegulation,
) -> Result<Payload, ApiError> {
    let result = db::insert_regulation(conn, &body).await?;

    tracing::info!(regulation_id = result.last_insert_rowid(), "regulation created");

    Ok(Payload::success())
}

/// admin/regulations PUT
pub async fn update_regulation(
    conn: &mut SqliteConnection,
    body: RegulationUpdate,
) -> Result<Payload, ApiError> {
    let result = db::update_regulation(conn, &body).await?;

    if result.rows_affected() == 0 {
        tracing::warn!(regulation_id = ?body.id, "regulation update matched no rows");
    } else {
        tracing::info!(regulation_id = ?body.id, "regulation updated");
    }

    Ok(Payload::success())
}
