use log::info;
use std::time::Duration;

pub mod core;
#[cfg(feature = "server")]
pub mod server;

use crate::api::core::{Endpoint, PrivilegeApi};
use crate::config::Config;
use crate::connector::DriverConnector;
use crate::core::OperationResult;

/// 按配置创建驱动连接器
pub fn driver_connector(config: &Config) -> DriverConnector {
    DriverConnector::new(Duration::from_secs(config.database.connect_timeout_secs))
}

/// 启动 HTTP 服务，收到退出信号后优雅关闭
#[cfg(feature = "server")]
pub async fn start_service(config: Config) -> anyhow::Result<()> {
    use crate::api::server::{create_router, AppState, HttpServer};
    use std::sync::Arc;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);

    let server = Arc::new(HttpServer::new(driver_connector(&config)));
    let app = create_router(AppState::new(server), request_timeout);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP 服务已启动: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP 服务已关闭");
    Ok(())
}

/// 在本地直接执行单个端点，不经过 HTTP
pub async fn execute_call(
    config: &Config,
    endpoint: Endpoint,
    body: serde_json::Value,
) -> OperationResult {
    let api = PrivilegeApi::new(driver_connector(config));
    info!("执行端点: {}", endpoint);
    endpoint.dispatch(&api, body).await
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
