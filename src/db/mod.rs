use sqlx::sqlite::{SqliteConnection, SqliteQueryResult};
use sqlx::Connection;
use chrono::NaiveDateTime;
use crate::models::*;

/// Table definitions the queries below are written against.
pub const SCHEMA: &str = include_str!("schema.sql");

/// Open a fresh connection. Callers own it and must `close()` it.
pub async fn connect(database_url: &str) -> Result<SqliteConnection, sqlx::Error> {
    SqliteConnection::connect(database_url).await
}

/// Create any missing tables. Safe to run repeatedly.
pub async fn create_schema(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(&mut *conn).await?;
    Ok(())
}

/// Bring a database up to [`SCHEMA`] on its own short-lived connection.
pub async fn ensure_schema(database_url: &str) -> Result<(), sqlx::Error> {
    let mut conn = connect(database_url).await?;
    let result = create_schema(&mut conn).await;
    conn.close().await?;
    result
}

// Standings queries
pub async fn get_conferences(
    conn: &mut SqliteConnection,
) -> Result<Vec<Conference>, sqlx::Error> {
    sqlx::query_as::<_, Conference>(
        r#"SELECT id, name FROM conferences ORDER BY id"#
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn get_conference_standings(
    conn: &mut SqliteConnection,
    conference_id: i64,
) -> Result<Vec<StandingsTeam>, sqlx::Error> {
    sqlx::query_as::<_, StandingsTeam>(
        r#"SELECT id, name, games_played, wins, losses, overtime_losses,
                  points, goals_for, goals_against, position
           FROM teams
           WHERE conference_id = ?
           ORDER BY position, points DESC"#
    )
    .bind(conference_id)
    .fetch_all(&mut *conn)
    .await
}

// Schedule queries
pub async fn get_matches(conn: &mut SqliteConnection) -> Result<Vec<MatchRow>, sqlx::Error> {
    sqlx::query_as::<_, MatchRow>(
        r#"SELECT m.id, ht.name AS home_team, at.name AS away_team,
                  m.match_date, m.home_score, m.away_score, m.status
           FROM matches m
           JOIN teams ht ON m.home_team_id = ht.id
           JOIN teams at ON m.away_team_id = at.id
           ORDER BY m.match_date DESC NULLS FIRST"#
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn insert_match(
    conn: &mut SqliteConnection,
    body: &NewMatch,
    match_date: Option<NaiveDateTime>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO matches
               (home_team_id, away_team_id, match_date, home_score, away_score, status)
           VALUES (?, ?, ?, ?, ?, ?)"#
    )
    .bind(body.home_team_id)
    .bind(body.away_team_id)
    .bind(match_date)
    .bind(body.home_score)
    .bind(body.away_score)
    .bind(body.status())
    .execute(&mut *conn)
    .await
}

// Regulation queries
pub async fn get_regulations(
    conn: &mut SqliteConnection,
) -> Result<Vec<Regulation>, sqlx::Error> {
    sqlx::query_as::<_, Regulation>(
        r#"SELECT id, title, content, order_index FROM regulations ORDER BY order_index"#
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn insert_regulation(
    conn: &mut SqliteConnection,
    body: &NewRegulation,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO regulations (title, content, order_index) VALUES (?, ?, ?)"#
    )
    .bind(body.title.as_deref())
    .bind(body.content.as_deref())
    .bind(body.order_index.unwrap_or(0))
    .execute(&mut *conn)
    .await
}

pub async fn update_regulation(
    conn: &mut SqliteConnection,
    body: &RegulationUpdate,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"UPDATE regulations
           SET title = ?, content = ?, order_index = ?
           WHERE id = ?"#
    )
    .bind(body.title.as_deref())
    .bind(body.content.as_deref())
    .bind(body.order_index.unwrap_or(0))
    .bind(body.id)
    .execute(&mut *conn)
    .await
}

// Team administration
pub async fn get_admin_teams(
    conn: &mut SqliteConnection,
) -> Result<Vec<AdminTeam>, sqlx::Error> {
    sqlx::query_as::<_, AdminTeam>(
        r#"SELECT id, name, games_played, wins, losses, overtime_losses,
                  points, goals_for, goals_against, conference_id
           FROM teams
           ORDER BY conference_id, position"#
    )
    .fetch_all(&mut *conn)
    .await
}

/// Overwrite one team's name and stats. Absent numbers are written as 0.
pub async fn update_team(
    conn: &mut SqliteConnection,
    body: &TeamUpdate,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"UPDATE teams
           SET name = ?, games_played = ?, wins = ?, losses = ?,
               overtime_losses = ?, points = ?, goals_for = ?, goals_against = ?
           WHERE id = ?"#
    )
    .bind(body.name.as_deref())
    .bind(body.games_played.unwrap_or(0))
    .bind(body.wins.unwrap_or(0))
    .bind(body.losses.unwrap_or(0))
    .bind(body.overtime_losses.unwrap_or(0))
    .bind(body.points.unwrap_or(0))
    .bind(body.goals_for.unwrap_or(0))
    .bind(body.goals_against.unwrap_or(0))
    .bind(body.id)
    .execute(&mut *conn)
    .await
}
