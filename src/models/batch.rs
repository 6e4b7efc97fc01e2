use crate::models::job::JobFailure;
use crate::models::zip::ArchiveOutput;

#[derive(Debug)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<JobFailure>,
    pub archive: ArchiveOutput,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "成功 {}/{} 支影片，ZIP：{}",
            self.succeeded,
            self.total,
            self.archive.path.display()
        )
    }
}
