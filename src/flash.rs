use axum::http::{header, HeaderMap};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

/// 保存 flash 消息的 cookie 名
pub const FLASH_COOKIE: &str = "flash";

/// 一次性提示消息，在重定向之后显示一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: "error".to_string(),
            message: message.into(),
        }
    }

    /// 编码成 cookie 值：`category:message`，整体做百分号编码
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.category, self.message);
        utf8_percent_encode(&raw, NON_ALPHANUMERIC).to_string()
    }

    pub fn decode(value: &str) -> Option<Self> {
        let raw = percent_decode_str(value).decode_utf8().ok()?;
        let (category, message) = raw.split_once(':')?;
        Some(Self {
            category: category.to_string(),
            message: message.to_string(),
        })
    }

    /// 写入 flash 的 Set-Cookie 头
    pub fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode()
        )
    }

    /// 清除 flash 的 Set-Cookie 头
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", FLASH_COOKIE)
    }

    /// 从请求的 Cookie 头中取出 flash 消息
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, value)| Self::decode(value))
    }
}
