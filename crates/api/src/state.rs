use sqlx::PgPool;

/// Shared application state: constructed once in `main` and cloned into
/// every handler. There is no other in-process state; everything mutable
/// lives in the database.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            http: reqwest::Client::new(),
        }
    }
}
