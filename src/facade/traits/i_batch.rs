use std::io;
use crate::models::batch::BatchReport;

// Facade 接口，負責協調整個批次流程
pub trait BatchFacadeTrait {
    /// 依配置執行一次完整批次
    /// # 回傳
    /// - 至少一支影片成功時返回批次報告；ffmpeg 無法使用或全部失敗時返回錯誤
    fn execute_batch(&self) -> io::Result<BatchReport>;
}
