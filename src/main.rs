use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
#[cfg(feature = "desktop")]
use gif_timecount::desktop;
use gif_timecount::{config::ConfigLoader, start_web_server, GifAnalyzer, PartialConfig, ScanOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GIF 信息计数器 - 统计GIF的播放时长、帧数和帧率
#[derive(Parser, Debug)]
#[command(name = "gif-timecount")]
#[command(about = "GIF 信息计数器：统计播放时长、帧数和 FPS", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 解析本地GIF文件并输出结果（与桌面模式规则相同）
    Inspect {
        /// 输入GIF文件路径
        #[arg(short, long)]
        input: PathBuf,

        /// 以 JSON 格式输出
        #[arg(long)]
        json: bool,
    },
    /// 桌面模式：通过系统对话框选择GIF并显示结果
    #[cfg(feature = "desktop")]
    Desktop,
    /// Web 服务模式：启动上传表单
    Serve {
        /// 监听地址（也可通过环境变量 GIF_TIMECOUNT_BIND 设置）
        #[arg(short, long)]
        bind: Option<String>,

        /// 配置文件路径（可选，支持 .ini 格式）
        /// 优先级：命令行参数 > 环境变量 > 配置文件 > 默认值
        #[arg(long)]
        config: Option<PathBuf>,

        /// 上传文件保存目录
        #[arg(long)]
        upload_dir: Option<PathBuf>,

        /// 解析完成后保留上传的文件
        #[arg(long)]
        keep_uploads: bool,
    },
    /// 生成默认配置文件
    InitConfig {
        /// 输出路径
        #[arg(short, long, default_value = "gif-timecount.ini")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Inspect { input, json } => {
            init_logging("warn");

            let summary = GifAnalyzer::new(ScanOptions::desktop())
                .analyze_file(&input)
                .with_context(|| format!("解析GIF失败: {}", input.display()))?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("序列化结果失败")?
                );
            } else {
                println!("{}", summary.desktop_report());
            }
        }
        #[cfg(feature = "desktop")]
        Commands::Desktop => {
            init_logging("info");
            desktop::run();
        }
        Commands::Serve {
            bind,
            config: config_file,
            upload_dir,
            keep_uploads,
        } => {
            let cli = PartialConfig {
                bind,
                upload_dir,
                keep_uploads: keep_uploads.then_some(true),
                ..Default::default()
            };
            let config = ConfigLoader::load_config(config_file.as_deref(), cli)
                .context("加载配置失败")?;

            init_logging(&config.log_level);
            tracing::debug!("使用配置: {:?}", config);

            start_web_server(config).await?;
        }
        Commands::InitConfig { output } => {
            ConfigLoader::create_default_config(&output)
                .with_context(|| format!("生成配置文件失败: {}", output.display()))?;
            println!("已生成配置文件: {}", output.display());
        }
    }

    Ok(())
}

/// 初始化日志；RUST_LOG 优先于传入的默认级别
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
