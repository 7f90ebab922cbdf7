use serde::{Serialize, Serializer, ser::SerializeStruct};

/// 一个GIF文件的播放信息
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GifSummary {
    /// 总播放时长（秒）
    pub total_duration_seconds: f64,
    /// 帧数
    pub frame_count: usize,
}

impl GifSummary {
    pub fn new(total_duration_seconds: f64, frame_count: usize) -> Self {
        Self {
            total_duration_seconds,
            frame_count,
        }
    }

    /// 帧率；时长为 0 时返回 0，避免除零
    pub fn fps(&self) -> f64 {
        if self.total_duration_seconds > 0.0 {
            self.frame_count as f64 / self.total_duration_seconds
        } else {
            0.0
        }
    }

    /// 桌面模式下标签中显示的文本
    pub fn desktop_report(&self) -> String {
        format!(
            "播放时长:   {} 秒\n帧数:       {} 帧\nFPS:        {:.0} fps",
            self.total_duration_seconds,
            self.frame_count,
            self.fps()
        )
    }
}

impl Serialize for GifSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GifSummary", 3)?;
        state.serialize_field("total_duration_seconds", &self.total_duration_seconds)?;
        state.serialize_field("frame_count", &self.frame_count)?;
        state.serialize_field("fps", &self.fps())?;
        state.end()
    }
}

/// 网页结果区块中显示的数据（已格式化）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub filename: String,
    /// 保留两位小数
    pub duration: String,
    pub frames: usize,
    /// 保留一位小数
    pub fps: String,
}

impl SummaryView {
    pub fn new(filename: impl Into<String>, summary: &GifSummary) -> Self {
        Self {
            filename: filename.into(),
            duration: format!("{:.2}", summary.total_duration_seconds),
            frames: summary.frame_count,
            fps: format!("{:.1}", summary.fps()),
        }
    }
}
