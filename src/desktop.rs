use std::path::Path;

use crate::error::GifError;
use crate::gif_analyzer::{GifAnalyzer, ScanOptions};

pub const WINDOW_TITLE: &str = "GIF 信息计数器";
pub const PICK_BUTTON: &str = "选择GIF文件";
pub const DIALOG_TITLE: &str = "请选择GIF文件";
/// 启动时标签中的文本
pub const INITIAL_TEXT: &str = "请点击按钮选择GIF文件。";
/// 取消文件选择后标签中的文本
pub const NO_FILE_TEXT: &str = "未选择文件。";

/// 根据文件选择结果计算新的标签文本
///
/// 桌面模式不检查格式、不替换 0 时长，没有帧时显示 0。
pub fn label_for_selection(selected: Option<&Path>) -> Result<String, GifError> {
    match selected {
        Some(path) => {
            let summary = GifAnalyzer::new(ScanOptions::desktop()).analyze_file(path)?;
            Ok(summary.desktop_report())
        }
        None => Ok(NO_FILE_TEXT.to_string()),
    }
}

/// 用系统原生对话框运行桌面模式，直到用户退出
#[cfg(feature = "desktop")]
pub fn run() {
    use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
    use tracing::{error, info};

    let mut label = INITIAL_TEXT.to_string();
    loop {
        let choice = MessageDialog::new()
            .set_title(WINDOW_TITLE)
            .set_description(label.as_str())
            .set_buttons(MessageButtons::OkCancelCustom(
                PICK_BUTTON.to_string(),
                "退出".to_string(),
            ))
            .show();

        let pick = match choice {
            MessageDialogResult::Ok | MessageDialogResult::Yes => true,
            MessageDialogResult::Custom(text) => text == PICK_BUTTON,
            _ => false,
        };
        if !pick {
            info!("桌面模式退出");
            return;
        }

        let selected = FileDialog::new()
            .set_title(DIALOG_TITLE)
            .add_filter("GIF files", &["gif"])
            .pick_file();

        match label_for_selection(selected.as_deref()) {
            Ok(text) => label = text,
            Err(e) => {
                error!("解析GIF失败: {}", e);
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title(WINDOW_TITLE)
                    .set_description(e.to_string())
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
        }
    }
}
