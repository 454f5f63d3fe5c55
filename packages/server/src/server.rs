use std::net::SocketAddr;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::AppConfig;
use crate::database::init_db;
use crate::state::AppState;

/// A running API server: the listener task plus the database connection it
/// serves from. Dropping it leaves the task running; call [`Server::stop`].
pub struct Server {
    addr: SocketAddr,
    db: DatabaseConnection,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Connect to the configured database, sync the schema and start serving.
    pub async fn start(config: AppConfig) -> anyhow::Result<Self> {
        let db = init_db(&config.database)
            .await
            .context("Failed to initialize database")?;
        Self::start_with_db(config, db).await
    }

    /// Start serving on an already connected database.
    pub async fn start_with_db(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        let bind = (config.server.host.as_str(), config.server.port);
        let listener = TcpListener::bind(bind)
            .await
            .with_context(|| format!("Failed to bind {}:{}", bind.0, bind.1))?;
        let addr = listener.local_addr()?;

        let mode = config.blog.mode;
        let app = crate::build_router(AppState {
            db: db.clone(),
            config,
        });

        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await
        });

        info!(%addr, ?mode, "Blog API listening");
        Ok(Self {
            addr,
            db,
            shutdown,
            task,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Stop accepting connections, wait for in-flight requests, then close the
    /// database connection.
    pub async fn stop(self) -> anyhow::Result<()> {
        info!("Closing server");
        let _ = self.shutdown.send(());
        self.task
            .await
            .context("Server task panicked")?
            .context("Server terminated with an error")?;
        self.db
            .close()
            .await
            .context("Failed to close database connection")?;
        info!("Server stopped");
        Ok(())
    }
}
