use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::handler::{self, AppState};

/// 构建路由
pub fn build_router(config: AppConfig) -> Router {
    let max_upload_bytes = config.max_upload_bytes;

    Router::new()
        .route("/", get(handler::index).post(handler::upload))
        .route("/health", get(handler::health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}

/// 启动 Web 服务
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    // 上传目录不存在时创建
    std::fs::create_dir_all(&config.upload_dir)
        .with_context(|| format!("创建上传目录失败: {}", config.upload_dir.display()))?;

    let bind = config.bind.clone();
    let upload_dir = config.upload_dir.clone();
    let max_upload_bytes = config.max_upload_bytes;
    let app = build_router(config);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .context(format!("绑定地址失败: {}", bind))?;

    info!("Web 服务器启动在: http://{}", bind);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("可用端点:");
    info!("  • 上传页面: GET  http://{}/", bind);
    info!("  • 上传解析: POST http://{}/", bind);
    info!("  • 健康检查: GET  http://{}/health", bind);
    info!("  • 上传目录: {}", upload_dir.display());
    info!("  • 大小上限: {} 字节", max_upload_bytes);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    axum::serve(listener, app)
        .await
        .context("启动服务器失败")?;

    Ok(())
}
