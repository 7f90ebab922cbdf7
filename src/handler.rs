use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::flash::Flash;
use crate::gif_analyzer::{GifAnalyzer, ScanOptions};
use crate::page::render_index;
use crate::summary::SummaryView;
use crate::upload;

pub const MSG_NO_FILE_PART: &str = "请求中不包含文件";
pub const MSG_NO_SELECTED_FILE: &str = "未选择文件";
pub const MSG_NOT_ALLOWED: &str = "只允许上传GIF格式的文件。";
pub const MSG_UNEXPECTED: &str = "发生意外错误，请重试。";

pub fn parse_failed_message(filename: &str) -> String {
    format!("文件 \"{}\" 解析失败。请确认是否为有效的GIF文件。", filename)
}

/// 各个 Handler 共享的状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// 上传页面（GET /）
pub async fn index(headers: HeaderMap) -> Response {
    let flash = Flash::from_headers(&headers);
    let html = Html(render_index(flash.as_ref(), None));

    match flash {
        // 消息只显示一次
        Some(_) => ([(header::SET_COOKIE, Flash::clear_cookie())], html).into_response(),
        None => html.into_response(),
    }
}

/// 处理上传的 GIF（POST /）
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("请求不是 multipart/form-data: {}", rejection.body_text());
            return redirect_with(Flash::error(MSG_NO_FILE_PART));
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return redirect_with(Flash::error(MSG_NO_FILE_PART)),
            Err(e) => return multipart_failure(e),
        };
        if field.name() == Some("file") {
            return analyze_upload(&state, field).await;
        }
    }
}

/// 校验、保存并解析上传的文件字段
async fn analyze_upload(state: &AppState, field: Field<'_>) -> Response {
    // 没有 filename 参数的 file 字段不是文件上传
    let original_name = match field.file_name() {
        Some(name) => name.to_string(),
        None => return redirect_with(Flash::error(MSG_NO_FILE_PART)),
    };
    if original_name.is_empty() {
        return redirect_with(Flash::error(MSG_NO_SELECTED_FILE));
    }
    if !upload::allowed_file(&original_name) {
        info!("拒绝非GIF文件: {}", original_name);
        return redirect_with(Flash::error(MSG_NOT_ALLOWED));
    }

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => return multipart_failure(e),
    };

    let filename = upload::storage_name(&original_name);
    let request_dir = upload::request_dir(&state.config.upload_dir);
    if let Err(e) = tokio::fs::create_dir_all(&request_dir).await {
        error!("创建上传目录失败 {}: {}", request_dir.display(), e);
        return redirect_with(Flash::error(MSG_UNEXPECTED));
    }
    let filepath = upload::upload_path(&request_dir, &filename);
    if let Err(e) = tokio::fs::write(&filepath, &data).await {
        error!("保存上传文件失败 {}: {}", filepath.display(), e);
        remove_request_dir(&request_dir).await;
        return redirect_with(Flash::error(MSG_UNEXPECTED));
    }
    info!("📥 已保存上传文件: {} ({} 字节)", filepath.display(), data.len());

    let options = ScanOptions::web(state.config.zero_delay_fallback_ms);
    let analyze_path = filepath.clone();
    let result = tokio::task::spawn_blocking(move || {
        GifAnalyzer::new(options).analyze_file(&analyze_path)
    })
    .await;

    if !state.config.keep_uploads {
        remove_request_dir(&request_dir).await;
    }

    match result {
        Ok(Ok(summary)) => {
            let view = SummaryView::new(filename, &summary);
            Html(render_index(None, Some(&view))).into_response()
        }
        Ok(Err(e)) if e.is_invalid_input() => {
            warn!("解析失败 {}: {}", filename, e);
            redirect_with(Flash::error(parse_failed_message(&filename)))
        }
        Ok(Err(e)) => {
            error!("解析 {} 时发生意外错误: {}", filename, e);
            redirect_with(Flash::error(MSG_UNEXPECTED))
        }
        Err(e) => {
            error!("解析任务异常退出 {}: {}", filename, e);
            redirect_with(Flash::error(MSG_UNEXPECTED))
        }
    }
}

async fn remove_request_dir(request_dir: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(request_dir).await {
        warn!("删除上传目录失败 {}: {}", request_dir.display(), e);
    }
}

/// 健康检查 Handler
pub async fn health_check() -> &'static str {
    "OK"
}

fn redirect_with(flash: Flash) -> Response {
    ([(header::SET_COOKIE, flash.set_cookie())], Redirect::to("/")).into_response()
}

fn multipart_failure(err: MultipartError) -> Response {
    let status = err.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("上传文件超过大小限制");
        return (status, err.body_text()).into_response();
    }
    warn!("读取上传数据失败: {}", err.body_text());
    redirect_with(Flash::error(MSG_UNEXPECTED))
}
