use std::io;
use std::path::{Path, PathBuf};
use log::{error, info, warn};
use crate::config::ports::{BatchConfig, ConfigPort, LogoSource};
use crate::facade::traits::i_batch::BatchFacadeTrait;
use crate::models::batch::BatchReport;
use crate::models::file::VideoCollectInput;
use crate::models::job::Job;
use crate::models::placement::overlay_expression;
use crate::models::zip::ArchiveInput;
use crate::service::config_service::ConfigService;
use crate::service::file::plan_destinations;
use crate::service::library::LogoLibrary;
use crate::service::runner::{effective_workers, run_batch};
use crate::service::traits::i_service::{ArchiveServiceTrait, FileServiceTrait, VideoConverterTrait};
use crate::utils::utils::create_progress_bar;

pub struct BatchFacade {
    config_service: ConfigService,
    library: LogoLibrary,
    converter: Box<dyn VideoConverterTrait>,
    file_service: Box<dyn FileServiceTrait>,
    archive_service: Box<dyn ArchiveServiceTrait>,
}

impl BatchFacade {
    pub fn new(
        config_port: Box<dyn ConfigPort>,
        library: LogoLibrary,
        converter: Box<dyn VideoConverterTrait>,
        file_service: Box<dyn FileServiceTrait>,
        archive_service: Box<dyn ArchiveServiceTrait>,
    ) -> Self {
        BatchFacade {
            config_service: ConfigService::new(config_port),
            library,
            converter,
            file_service,
            archive_service,
        }
    }

    fn resolve_logo(&self, logo: &LogoSource) -> io::Result<PathBuf> {
        match logo {
            LogoSource::Library(name) => self.library.resolve(name),
            LogoSource::File(path) => {
                if !path.is_file() {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("Logo 檔案 '{}' 不存在", path.display())
                    ));
                }
                Ok(path.clone())
            }
        }
    }
}

impl BatchFacadeTrait for BatchFacade {
    fn execute_batch(&self) -> io::Result<BatchReport> {
        let config = self.config_service.get_config()?;

        // 先確認 ffmpeg 可用，避免每個工作各自失敗一次
        let version = self.converter.probe().map_err(|e| {
            error!("ffmpeg 無法使用：{}", e);
            e
        })?;
        info!("使用 {}", version);

        let collected = self.file_service.collect_videos(VideoCollectInput {
            paths: config.videos.clone(),
            include_patterns: config.include.clone(),
            exclude_patterns: config.exclude.clone(),
        })?;
        if collected.videos.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "沒有符合條件的影片可處理"));
        }

        let logo = self.resolve_logo(&config.logo)?;
        let staging = tempfile::Builder::new().prefix("logo_overlay_").tempdir()?;
        let jobs = plan_jobs(&config, &collected.videos, &logo, staging.path());
        let total = jobs.len();

        info!(
            "開始處理 {} 支影片，Logo：{}，位置：{}，寬度：{} px，並行數：{}",
            total,
            logo.display(),
            config.placement.describe(),
            config.width,
            effective_workers(config.workers, total)
        );

        let converter = self.converter.as_ref();
        let progress = create_progress_bar(total as u64, config.no_progress);
        progress.set_message(format!("處理 {} 支影片", total));
        let outcome = run_batch(
            &jobs,
            config.workers,
            |job| converter.convert(job),
            |completed, total| progress.update(completed, total),
        )?;
        progress.finish(outcome.successes.len(), total);

        for failure in &outcome.failures {
            if let Some(job) = jobs.get(failure.index) {
                warn!("影片 {} 未完成：{}", job.source.display(), failure.reason);
            }
        }

        if outcome.all_failed() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("全部 {} 支影片處理失敗", total)
            ));
        }

        let archive = self.archive_service.create_archive(ArchiveInput {
            files: outcome.successes.clone(),
            output: config.output.clone(),
            compression: config.compression,
        })?;

        Ok(BatchReport {
            total,
            succeeded: outcome.successes.len(),
            failures: outcome.failures,
            archive,
        })
    }
}

/// 為每支影片建立一個工作，輸出放在暫存目錄
pub fn plan_jobs(config: &BatchConfig, videos: &[PathBuf], logo: &Path, staging: &Path) -> Vec<Job> {
    let overlay = overlay_expression(&config.placement);
    videos
        .iter()
        .zip(plan_destinations(videos, staging))
        .enumerate()
        .map(|(index, (source, destination))| Job {
            index,
            source: source.clone(),
            destination,
            logo: logo.to_path_buf(),
            width: config.width,
            overlay: overlay.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::placement::{HorizontalAnchor, Placement, VerticalAnchor};
    use crate::models::zip::ArchiveCompression;

    #[test]
    fn jobs_share_overlay_and_keep_submission_index() {
        let config = BatchConfig {
            videos: vec![],
            logo: LogoSource::File(PathBuf::from("logo.png")),
            placement: Placement::preset(VerticalAnchor::Top, HorizontalAnchor::Right, 15),
            width: 300,
            workers: 3,
            output: PathBuf::from("out.zip"),
            include: vec!["*".to_string()],
            exclude: None,
            compression: ArchiveCompression::Stored,
            no_progress: true,
        };
        let videos = vec![PathBuf::from("a.mp4"), PathBuf::from("b.mov")];
        let jobs = plan_jobs(&config, &videos, Path::new("logo.png"), Path::new("stage"));

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].index, 1);
        assert_eq!(jobs[1].source, PathBuf::from("b.mov"));
        assert_eq!(jobs[1].destination, PathBuf::from("stage/branded_b.mov"));
        assert!(jobs.iter().all(|j| j.overlay == "main_w-overlay_w-15:15" && j.width == 300));
    }
}
