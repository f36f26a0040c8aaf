#![allow(dead_code)]

use lifeline_sos::db::{self, DbPool};
use lifeline_sos::routes::{router, AppState};
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub struct TestApp {
    pub base_url: String,
    pub pool: DbPool,
    pub server: JoinHandle<()>,
    _dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(true).await
}

pub async fn spawn_app_with(allow_realert: bool) -> TestApp {
    let dir = tempfile::tempdir().expect("create tempdir");
    let db_path = dir.path().join("lifeline.db");
    let pool = db::init_pool(&format!("sqlite://{}", db_path.display()))
        .await
        .expect("init db");

    let state = AppState {
        pool: pool.clone(),
        allow_realert,
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("local addr");

    let server = tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("server");
    });

    TestApp {
        base_url: format!("http://{}", addr),
        pool,
        server,
        _dir: dir,
    }
}
