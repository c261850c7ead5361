//! Shared fixtures: a throwaway SQLite file with the league schema.
#![allow(dead_code)]

use std::collections::HashMap;

use league_api::{db, Context, Event};
use sqlx::Connection;
use tempfile::TempDir;

pub const SEED: &str = r#"
INSERT INTO conferences (id, name) VALUES (2, 'Eastern');
INSERT INTO conferences (id, name) VALUES (1, 'Western');

INSERT INTO teams (id, name, games_played, wins, losses, overtime_losses, points, goals_for, goals_against, position, conference_id)
VALUES
    (1, 'Sharks', 12, 9, 2, 2, 20, 40, 28, 2, 1),
    (2, 'Bears',  12, 12, 0, 1, 25, 51, 20, 1, 1),
    (3, 'Wolves', 12, 14, 1, 2, 30, 47, 25, 2, 1),
    (4, 'Eagles', 11, 8, 3, 2, 18, 33, 30, 1, 2),
    (5, 'Hawks',  11, 6, 5, 0, 12, 29, 31, 2, 2);

INSERT INTO matches (id, home_team_id, away_team_id, match_date, home_score, away_score, status)
VALUES
    (1, 1, 2, '2025-01-10 19:00:00', 3, 2, 'finished'),
    (2, 3, 4, '2025-02-01 18:30:00', NULL, NULL, 'scheduled'),
    (3, 5, 1, NULL, NULL, NULL, 'scheduled');

INSERT INTO regulations (id, title, content, order_index)
VALUES
    (1, 'Overtime', 'Five minutes of three-on-three.', 2),
    (2, 'Points', 'Two points for a win, one for an overtime loss.', 0),
    (3, 'Shootout', 'Three rounds, then sudden death.', 1);
"#;

pub struct TestDb {
    pub url: String,
    _dir: TempDir,
}

impl TestDb {
    /// Empty schema, no rows.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("league.db").display());

        let mut conn = db::connect(&url).await.expect("open test database");
        db::create_schema(&mut conn).await.expect("create schema");
        conn.close().await.expect("close setup connection");

        Self { url, _dir: dir }
    }

    /// Schema plus the fixture league in [`SEED`].
    pub async fn seeded() -> Self {
        let test_db = Self::empty().await;
        test_db.execute(SEED).await;
        test_db
    }

    pub async fn execute(&self, sql: &str) {
        let mut conn = db::connect(&self.url).await.expect("open test database");
        sqlx::raw_sql(sql).execute(&mut conn).await.expect("run fixture sql");
        conn.close().await.expect("close fixture connection");
    }

    pub async fn fetch_one<T>(&self, sql: &str) -> T
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
    {
        let mut conn = db::connect(&self.url).await.expect("open test database");
        let row = sqlx::query_as::<_, T>(sql)
            .fetch_one(&mut conn)
            .await
            .expect("fetch fixture row");
        conn.close().await.expect("close fixture connection");
        row
    }
}

pub fn event(method: &str, endpoint: &str, body: Option<&str>) -> Event {
    Event {
        http_method: Some(method.to_string()),
        query_string_parameters: Some(HashMap::from([(
            "endpoint".to_string(),
            endpoint.to_string(),
        )])),
        body: body.map(str::to_string),
    }
}

pub fn context() -> Context {
    Context {
        request_id: "test".to_string(),
    }
}
