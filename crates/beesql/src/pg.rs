//! PostgreSQL executor over `tokio-postgres`.
//!
//! Statements are sent with the simple query protocol, so the rendered SQL
//! runs exactly as built and every column comes back as text.

use crate::config::DbConfig;
use crate::error::BeeResult;
use crate::executor::Executor;
use crate::row::{Row, RowSet};
use crate::value::Value;
use tokio::runtime::{Builder, Runtime};
use tokio_postgres::{NoTls, SimpleQueryMessage};

/// Blocking PostgreSQL executor.
///
/// Each call opens a connection, runs the statement and closes the
/// connection again. It drives its own current-thread runtime, so it must
/// not be called from inside another tokio runtime.
pub struct PgExecutor {
    config: tokio_postgres::Config,
    runtime: Runtime,
}

impl PgExecutor {
    pub fn new(cfg: &DbConfig) -> BeeResult<Self> {
        let mut config = tokio_postgres::Config::new();
        match &cfg.unix_socket {
            Some(socket) => set_socket(&mut config, socket),
            None => {
                config.host(cfg.host.as_str());
            }
        }
        if let Some(port) = cfg.effective_port() {
            config.port(port);
        }
        if let Some(db_name) = &cfg.db_name {
            config.dbname(db_name.as_str());
        }
        if let Some(user) = &cfg.username {
            config.user(user.as_str());
        }
        if let Some(password) = &cfg.password {
            config.password(password.as_str());
        }
        Self::with_config(config)
    }

    /// Build from a libpq-style URL or key/value string.
    pub fn from_url(url: &str) -> BeeResult<Self> {
        Self::with_config(url.parse()?)
    }

    fn with_config(config: tokio_postgres::Config) -> BeeResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { config, runtime })
    }

    async fn run(&self, sql: &str) -> BeeResult<RowSet> {
        let (client, connection) = self.config.connect(NoTls).await?;
        let task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(target: "beesql.sql", error = %e, "postgres connection closed with error");
            }
        });

        let messages = client.simple_query(sql).await;
        drop(client);
        // The connection future finishes once the client is gone.
        connection_finished(task.await);

        Ok(messages?
            .into_iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::Row(row) => Some(row),
                _ => None,
            })
            .map(|row| {
                let cells = row
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        let value = row
                            .get(i)
                            .map_or(Value::Null, |text| Value::Text(text.to_string()));
                        (column.name().to_string(), value)
                    })
                    .collect();
                Row::new(cells)
            })
            .collect())
    }
}

/// Report how the connection task ended; `false` if it panicked or was cancelled.
fn connection_finished(result: Result<(), tokio::task::JoinError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(target: "beesql.sql", error = %e, "postgres connection task failed");
            false
        }
    }
}

#[cfg(unix)]
fn set_socket(config: &mut tokio_postgres::Config, socket: &std::path::Path) {
    config.host_path(socket);
}

#[cfg(not(unix))]
fn set_socket(config: &mut tokio_postgres::Config, _socket: &std::path::Path) {
    config.host("localhost");
}

impl Executor for PgExecutor {
    fn execute(&self, sql: &str) -> BeeResult<RowSet> {
        self.runtime.block_on(self.run(sql))
    }
}

impl std::fmt::Debug for PgExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgExecutor")
            .field("hosts", &self.config.get_hosts())
            .field("dbname", &self.config.get_dbname())
            .finish_non_exhaustive()
    }
}
