use gif::DecodingError;
use image::ImageFormat;
use thiserror::Error;

/// GIF 解析过程中的错误
#[derive(Error, Debug)]
pub enum GifError {
    #[error("读取文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("无法识别的图像格式")]
    Unrecognized,

    #[error("文件不是GIF格式（检测到 {0:?}）")]
    NotGif(ImageFormat),

    #[error("GIF解码失败: {0}")]
    Decode(#[from] DecodingError),

    #[error("无法从GIF中读取任何帧")]
    NoFrames,
}

impl GifError {
    /// 是否属于"文件本身无效"的错误（区别于 I/O 等意外错误）
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, GifError::Io(_))
    }
}
