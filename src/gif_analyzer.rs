use gif::{ColorOutput, DecodeOptions, DecodingError};
use image::ImageFormat;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::GifError;
use crate::summary::GifSummary;

/// 跳过帧像素数据时使用的缓冲区大小
const SKIP_CHUNK: usize = 4096;

/// 网页模式下，帧时长缺失或为 0 时使用的默认值（10fps）
pub const DEFAULT_ZERO_DELAY_FALLBACK_MS: u32 = 100;

/// 解析选项，区分桌面模式与网页模式的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// 解码前先嗅探文件头，确认是GIF
    pub verify_format: bool,
    /// 帧时长为 0 时替换成的值（毫秒），None 表示按 0 累加
    pub zero_delay_fallback_ms: Option<u32>,
    /// 一帧都没读到时报错；否则返回 (0, 0)
    pub require_frames: bool,
}

impl ScanOptions {
    /// 桌面模式：不检查格式，不替换 0 时长，没有帧时返回空结果
    pub fn desktop() -> Self {
        Self {
            verify_format: false,
            zero_delay_fallback_ms: None,
            require_frames: false,
        }
    }

    /// 网页模式：检查格式，替换 0 时长，没有帧时报错
    pub fn web(zero_delay_fallback_ms: u32) -> Self {
        Self {
            verify_format: true,
            zero_delay_fallback_ms: Some(zero_delay_fallback_ms),
            require_frames: true,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::web(DEFAULT_ZERO_DELAY_FALLBACK_MS)
    }
}

/// GIF 解析器，逐帧累加播放时长
pub struct GifAnalyzer {
    options: ScanOptions,
}

impl GifAnalyzer {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// 解析本地文件
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<GifSummary, GifError> {
        let path = path.as_ref();
        debug!("打开GIF文件: {}", path.display());
        let file = File::open(path)?;
        let summary = self.analyze_reader(BufReader::new(file))?;
        info!(
            "📊 [GIF解析] {}: {:.2}秒, {} 帧",
            path.display(),
            summary.total_duration_seconds,
            summary.frame_count
        );
        Ok(summary)
    }

    /// 解析任意可读的数据源
    pub fn analyze_reader<R: BufRead>(&self, mut reader: R) -> Result<GifSummary, GifError> {
        if self.options.verify_format {
            let header = reader.fill_buf()?;
            match image::guess_format(header) {
                Ok(ImageFormat::Gif) => {}
                Ok(other) => return Err(GifError::NotGif(other)),
                Err(_) => return Err(GifError::Unrecognized),
            }
        }

        // 只读帧头，不合成画布；像素数据按块跳过，内存占用与画布尺寸无关
        let mut options = DecodeOptions::new();
        options.set_color_output(ColorOutput::Indexed);
        let mut decoder = options.read_info(reader)?;

        let mut total_ms: u64 = 0;
        let mut frame_count: usize = 0;
        let mut chunk = [0u8; SKIP_CHUNK];
        loop {
            let delay_cs = match decoder.next_frame_info() {
                Ok(Some(frame)) => frame.delay,
                Ok(None) => break,
                // 帧与帧之间数据用完（例如缺少结束符）视为序列结束
                Err(e) if frame_count > 0 && is_unexpected_eof(&e) => {
                    debug!("在第 {} 帧之后遇到文件结尾，按序列结束处理", frame_count);
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            // 帧内数据被截断仍然是解码错误
            while decoder.fill_buffer(&mut chunk)? {}

            let mut delay_ms = u64::from(delay_cs) * 10;
            if delay_ms == 0 {
                if let Some(fallback) = self.options.zero_delay_fallback_ms {
                    delay_ms = u64::from(fallback);
                }
            }
            total_ms += delay_ms;
            frame_count += 1;
        }

        if frame_count == 0 && self.options.require_frames {
            return Err(GifError::NoFrames);
        }

        Ok(GifSummary::new(total_ms as f64 / 1000.0, frame_count))
    }
}

fn is_unexpected_eof(err: &DecodingError) -> bool {
    matches!(err, DecodingError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

/// 按给定选项解析一个GIF文件
pub fn analyze_gif(path: impl AsRef<Path>, options: ScanOptions) -> Result<GifSummary, GifError> {
    GifAnalyzer::new(options).analyze_file(path)
}
