//! Database gateway: backend selection, per-request connections, typed row
//! access, and insert-id retrieval that works the same on PostgreSQL and MySQL.

use std::time::Duration;

use sea_orm::sea_query::{Alias, InsertStatement};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    FromQueryResult, Statement, Value,
};
use tracing::{debug, error};

use crate::config::DatabaseTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    MySql,
}

impl Backend {
    pub fn db_backend(self) -> DbBackend {
        match self {
            Backend::Postgres => DbBackend::Postgres,
            Backend::MySql => DbBackend::MySql,
        }
    }

    pub fn from_db_backend(backend: DbBackend) -> Option<Self> {
        match backend {
            DbBackend::Postgres => Some(Backend::Postgres),
            DbBackend::MySql => Some(Backend::MySql),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Postgres => "PostgreSQL",
            Backend::MySql => "MySQL",
        }
    }

    /// Bind marker for the `n`th (1-based) parameter of a hand-written statement.
    pub fn placeholder(self, n: usize) -> String {
        match self {
            Backend::Postgres => format!("${n}"),
            Backend::MySql => "?".to_string(),
        }
    }
}

/// Collects bound values for a hand-written statement and hands out the
/// matching placeholders in order.
#[derive(Debug)]
pub struct Params {
    backend: Backend,
    values: Vec<Value>,
}

impl Params {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            values: Vec::new(),
        }
    }

    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        self.backend.placeholder(self.values.len())
    }

    pub fn into_statement(self, sql: String) -> Statement {
        Statement::from_sql_and_values(self.backend.db_backend(), sql, self.values)
    }
}

/// Opens connections to the configured backend. Cheap to clone; holds no
/// connection itself.
#[derive(Debug, Clone)]
pub struct Gateway {
    target: DatabaseTarget,
    connect_timeout: Duration,
}

impl Gateway {
    pub fn new(target: DatabaseTarget, connect_timeout: Duration) -> Self {
        Self {
            target,
            connect_timeout,
        }
    }

    pub fn backend(&self) -> Backend {
        self.target.backend()
    }

    /// A single-connection handle, dropped by the caller when the request ends.
    pub async fn try_connect(&self) -> Result<DatabaseConnection, DbErr> {
        let mut options = ConnectOptions::new(self.target.url());
        options
            .max_connections(1)
            .min_connections(0)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .sqlx_logging(false);

        debug!(backend = self.backend().name(), "opening database connection");
        Database::connect(options).await
    }

    /// Like [`Gateway::try_connect`] but logs the failure and yields `None`.
    pub async fn connect(&self) -> Option<DatabaseConnection> {
        match self.try_connect().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!(backend = self.backend().name(), "Database connection error: {}", e);
                None
            }
        }
    }
}

/// The [`Backend`] behind `conn`, or an error for drivers this crate does not speak.
pub fn backend_of<C: ConnectionTrait>(conn: &C) -> Result<Backend, DbErr> {
    let db_backend = conn.get_database_backend();
    Backend::from_db_backend(db_backend)
        .ok_or_else(|| DbErr::Custom(format!("unsupported database backend: {:?}", db_backend)))
}

pub async fn fetch_all<T, C>(conn: &C, statement: Statement) -> Result<Vec<T>, DbErr>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    T::find_by_statement(statement).all(conn).await
}

pub async fn fetch_one<T, C>(conn: &C, statement: Statement) -> Result<Option<T>, DbErr>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    T::find_by_statement(statement).one(conn).await
}

/// Execute `insert` and return the generated primary key.
///
/// PostgreSQL gets a `RETURNING <id_column>` clause; MySQL reports the
/// auto-increment value through the driver. The id column is always named by
/// the caller.
pub async fn insert_and_get_id<C>(
    conn: &C,
    mut insert: InsertStatement,
    id_column: &str,
) -> Result<i32, DbErr>
where
    C: ConnectionTrait,
{
    let db_backend = conn.get_database_backend();

    match backend_of(conn)? {
        Backend::Postgres => {
            insert.returning_col(Alias::new(id_column));
            let row = conn
                .query_one(db_backend.build(&insert))
                .await?
                .ok_or(DbErr::RecordNotInserted)?;
            row.try_get::<i32>("", id_column)
        }
        Backend::MySql => {
            let result = conn.execute(db_backend.build(&insert)).await?;
            let id = result.last_insert_id();
            i32::try_from(id)
                .map_err(|_| DbErr::Custom(format!("inserted {id_column} {id} does not fit in i32")))
        }
    }
}
