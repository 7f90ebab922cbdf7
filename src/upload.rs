use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// 允许上传的扩展名
pub const ALLOWED_EXTENSIONS: &[&str] = &["gif"];

/// 检查上传文件的扩展名是否被允许
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// 把客户端提供的文件名转换成可以安全落盘的文件名
///
/// 先做 NFKD 分解并丢弃非 ASCII 字符（`café` 变成 `cafe`），
/// 路径分隔符 `/` 和 `\` 当作空白，按空白切分后用 `_` 连接，
/// 只保留 ASCII 字母、数字以及 `_`、`.`、`-`，最后去掉首尾的 `.` 和 `_`。
/// 结果为空时返回 None。
pub fn secure_filename(filename: &str) -> Option<String> {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 决定上传文件的保存名；无法得到安全文件名时用随机名
pub fn storage_name(filename: &str) -> String {
    secure_filename(filename).unwrap_or_else(|| format!("{}.gif", uuid::Uuid::new_v4()))
}

/// 为一次上传分配独立的子目录，同名文件的并发上传互不覆盖
pub fn request_dir(upload_dir: &Path) -> PathBuf {
    upload_dir.join(uuid::Uuid::new_v4().to_string())
}

/// 上传文件在请求目录中的完整路径
pub fn upload_path(request_dir: &Path, stored_name: &str) -> PathBuf {
    request_dir.join(stored_name)
}
