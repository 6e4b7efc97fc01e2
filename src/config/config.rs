use clap::{Args, Parser, Subcommand};
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use crate::models::placement::{HorizontalAnchor, PositionMode, VerticalAnchor};
use crate::models::zip::ArchiveCompression;

pub const DEFAULT_LOGO_DIR: &str = "saved_logos";
pub const DEFAULT_WIDTH: u32 = 250;
pub const DEFAULT_WORKERS: usize = 3;
pub const WIDTH_RANGE: RangeInclusive<u32> = 50..=1000;
pub const MARGIN_RANGE: RangeInclusive<u32> = 0..=100;
pub const WORKERS_RANGE: RangeInclusive<usize> = 1..=5;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "logo_overlay",
    about = "批次為影片燒錄 Logo 並打包成 ZIP",
    long_about = "從 Logo 庫選擇或直接指定 Logo 圖片，設定位置與大小後，以 ffmpeg 批次為多支影片加上 Logo，成功的輸出會打包成單一 ZIP 檔案。\n不帶任何參數執行時進入互動模式。使用 `--help` 查看詳細用法。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(long, global = true, default_value = DEFAULT_LOGO_DIR)]
    pub library: PathBuf,
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,
    #[arg(long, global = true, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// 批次處理影片並輸出 ZIP
    Process(ProcessArgs),
    /// 擷取第一秒的畫面預覽 Logo 位置
    Preview(PreviewArgs),
    /// 管理 Logo 庫
    Logo {
        #[command(subcommand)]
        action: LogoCommand,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum LogoCommand {
    List,
    Add {
        file: PathBuf,
        #[arg(long, default_value = "MyLogo")]
        name: String,
    },
    Delete {
        name: String,
    },
}

#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct LogoArgs {
    /// Logo 圖片路徑
    #[arg(long)]
    pub logo: Option<PathBuf>,
    /// Logo 庫中的檔名
    #[arg(long)]
    pub logo_name: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct OverlayArgs {
    #[command(flatten)]
    pub logo: LogoArgs,
    #[arg(long, value_enum, default_value = "preset")]
    pub position: PositionMode,
    #[arg(long, value_enum, default_value = "bottom")]
    pub vertical: VerticalAnchor,
    #[arg(long, value_enum, default_value = "left")]
    pub horizontal: HorizontalAnchor,
    #[arg(long, default_value_t = 20)]
    pub margin: u32,
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<i64>,
    /// Logo 寬度（像素），高度依比例縮放
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,
}

#[derive(Args, Clone, Debug)]
pub struct ProcessArgs {
    #[arg(required = true, num_args = 1..)]
    pub videos: Vec<PathBuf>,
    #[command(flatten)]
    pub overlay: OverlayArgs,
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, default_value = "*", value_delimiter = ',')]
    pub include: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    #[arg(long, value_enum, default_value = "stored")]
    pub compression: ArchiveCompression,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Args, Clone, Debug)]
pub struct PreviewArgs {
    pub video: PathBuf,
    #[command(flatten)]
    pub overlay: OverlayArgs,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

pub fn validate_input_path(input: &Path) -> io::Result<&Path> {
    if !input.exists() {
        log::error!("輸入路徑不存在：{}", input.display());
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input.display())
        ));
    }
    Ok(input)
}

pub fn validate_input_paths(inputs: &[PathBuf]) -> io::Result<()> {
    if inputs.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "未指定任何影片"));
    }
    for input in inputs {
        validate_input_path(input)?;
    }
    Ok(())
}

pub fn validate_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> io::Result<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} 必須介於 {} 與 {} 之間，收到 {}", name, range.start(), range.end(), value)
        ));
    }
    Ok(value)
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_file_patterns(include: &[String], exclude: &Option<Vec<String>>) -> io::Result<()> {
    for pattern in include {
        if !is_valid_pattern(pattern) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的包含模式: {}", pattern)));
        }
    }
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if !is_valid_pattern(pattern) {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", pattern)));
            }
        }
    }
    Ok(())
}
