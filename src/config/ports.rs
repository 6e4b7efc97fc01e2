use std::io;
use std::path::PathBuf;
use crate::models::placement::Placement;
use crate::models::zip::ArchiveCompression;

/// Logo 來源：Logo 庫中的名稱，或直接指定的圖片檔
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    Library(String),
    File(PathBuf),
}

// 批次設定，封裝一次處理所需的全部參數
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub videos: Vec<PathBuf>,
    pub logo: LogoSource,
    pub placement: Placement,
    pub width: u32,
    pub workers: usize,
    pub output: PathBuf,
    pub include: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub compression: ArchiveCompression,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<BatchConfig>;
}
