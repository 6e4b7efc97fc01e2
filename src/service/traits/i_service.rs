use std::io;
use std::path::PathBuf;
use crate::models::file::{VideoCollectInput, VideoCollectOutput};
use crate::models::job::{Job, Outcome};
use crate::models::zip::{ArchiveInput, ArchiveOutput};

// File 服務接口，負責收集待處理影片
pub trait FileServiceTrait: Send + Sync {
    /// 收集符合條件的影片
    /// # 參數
    /// - input: 影片路徑（檔案或目錄）與包含/排除模式
    /// # 回傳
    /// - 成功時返回排序後的影片清單與總大小，失敗時返回 IO 錯誤
    fn collect_videos(&self, input: VideoCollectInput) -> io::Result<VideoCollectOutput>;
}

// 影片轉換接口，包裝外部媒體工具
pub trait VideoConverterTrait: Send + Sync {
    /// 在派發任何工作前確認外部工具可用，回傳其版本資訊
    fn probe(&self) -> io::Result<String>;

    /// 處理單一工作；失敗以 `Outcome::Failure` 回傳，不得 panic
    fn convert(&self, job: &Job) -> Outcome<PathBuf>;
}

// Zip 服務接口，負責打包成功的輸出
pub trait ArchiveServiceTrait: Send + Sync {
    fn create_archive(&self, input: ArchiveInput) -> io::Result<ArchiveOutput>;
}
