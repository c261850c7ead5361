//! Routing table for the dispatch function.
//!
//! A request is identified by the `endpoint` query parameter plus the HTTP
//! method. Read endpoints that exist both publicly and under `admin/` share
//! a single route so they can never drift apart.

use serde::de::DeserializeOwned;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use crate::error::ApiError;
use crate::models::Payload;

pub mod regulations;
pub mod schedule;
pub mod standings;
pub mod teams;

/// Endpoint used when the request names none.
pub const DEFAULT_ENDPOINT: &str = "standings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Standings,
    Schedule,
    Regulations,
    AdminTeams,
    UpdateTeam,
    CreateMatch,
    CreateRegulation,
    UpdateRegulation,
}

impl Route {
    /// Look up the route for an `(endpoint, method)` pair. Matching is exact.
    pub fn resolve(endpoint: &str, method: &str) -> Option<Route> {
        let route = match (endpoint, method) {
            ("standings", "GET") => Route::Standings,
            ("schedule", "GET") | ("admin/matches", "GET") => Route::Schedule,
            ("regulations", "GET") | ("admin/regulations", "GET") => Route::Regulations,
            ("admin/teams", "GET") => Route::AdminTeams,
            ("admin/teams", "POST") => Route::UpdateTeam,
            ("admin/matches", "POST") => Route::CreateMatch,
            ("admin/regulations", "POST") => Route::CreateRegulation,
            ("admin/regulations", "PUT") => Route::UpdateRegulation,
            _ => return None,
        };
        Some(route)
    }

    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Route::UpdateTeam
                | Route::CreateMatch
                | Route::CreateRegulation
                | Route::UpdateRegulation
        )
    }

    /// Run the route against an open connection. Mutations run inside one
    /// transaction that is committed only when the route succeeds.
    pub async fn run(
        self,
        conn: &mut SqliteConnection,
        body: Option<&str>,
    ) -> Result<Payload, ApiError> {
        if !self.is_mutation() {
            return self.execute(conn, body).await;
        }

        let mut tx = conn.begin().await?;
        let payload = self.execute(&mut tx, body).await?;
        tx.commit().await?;
        Ok(payload)
    }

    async fn execute(
        self,
        conn: &mut SqliteConnection,
        body: Option<&str>,
    ) -> Result<Payload, ApiError> {
        match self {
            Route::Standings => standings::get_standings(conn).await,
            Route::Schedule => schedule::get_matches(conn).await,
            Route::Regulations => regulations::get_regulations(conn).await,
            Route::AdminTeams => teams::get_teams(conn).await,
            Route::UpdateTeam => teams::update_team(conn, parse_body(body)?).await,
            Route::CreateMatch => schedule::create_match(conn, parse_body(body)?).await,
            Route::CreateRegulation => {
                regulations::create_regulation(conn, parse_body(body)?).await
            }
            Route::UpdateRegulation => {
                regulations::update_regulation(conn, parse_body(body)?).await
            }
        }
    }
}

/// Decode a JSON request body. A missing or blank body reads as `{}`.
pub fn parse_body<T: DeserializeOwned + Default>(body: Option<&str>) -> Result<T, ApiError> {
    match body.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(raw) => Ok(serde_json::from_str(raw)?),
    }
}
