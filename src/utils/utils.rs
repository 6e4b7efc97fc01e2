use std::io;
use std::path::PathBuf;
use std::time::Instant;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn set_message(&self, msg: String) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(msg);
    }

    /// 由批次執行器的進度回呼驅動，每完成一支影片呼叫一次
    pub fn update(&self, completed: usize, total: usize) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 { completed as f64 / elapsed * 60.0 } else { 0.0 };
        self.pb.set_message(format!(
            "處理中：{}/{} 支影片，速度：{:.1} 支/分鐘",
            completed, total, speed
        ));
        self.pb.set_position(completed as u64);
    }

    pub fn finish(&self, succeeded: usize, total: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，成功 {}/{} 支影片，耗時 {:.1} 秒",
            succeeded,
            total,
            self.start.elapsed().as_secs_f64()
        ));
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// 預設的 ZIP 輸出路徑，以時間戳區分每次批次
pub fn default_archive_path() -> PathBuf {
    PathBuf::from(format!("branded_videos_{}.zip", Local::now().format("%Y%m%d%H%M%S")))
}

/// 僅保留英數字元，作為 Logo 庫中的檔名
pub fn sanitize_logo_name(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// 萬用字元只支援 `*`，整個檔名必須符合
pub fn wildcard_to_regex(pattern: &str) -> String {
    format!("^{}$", regex::escape(pattern).replace("\\*", ".*"))
}

pub fn create_regex_sets(include: &[String], exclude: &[String]) -> io::Result<(RegexSet, RegexSet)> {
    let include_set = RegexSet::new(include.iter().map(|p| wildcard_to_regex(p)))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的包含模式: {}", e)))?;
    let exclude_set = RegexSet::new(exclude.iter().map(|p| wildcard_to_regex(p)))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", e)))?;
    Ok((include_set, exclude_set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_only_alphanumerics() {
        assert_eq!(sanitize_logo_name("My Logo-2024!"), "MyLogo2024");
        assert_eq!(sanitize_logo_name("../../etc"), "etc");
        assert_eq!(sanitize_logo_name("-- !"), "");
    }

    #[test]
    fn wildcard_patterns_match_whole_file_names() {
        let (include, exclude) = create_regex_sets(
            &["*.mp4".to_string()],
            &["draft*".to_string()],
        ).unwrap();
        assert!(include.is_match("intro.mp4"));
        assert!(!include.is_match("intro.mov"));
        assert!(!include.is_match("intro.mp4.bak"));
        assert!(exclude.is_match("draft_intro.mp4"));
        assert!(!exclude.is_match("final_draft.mp4"));
    }

    #[test]
    fn literal_pattern_does_not_match_longer_names() {
        let (include, _) = create_regex_sets(&["clip.mp4".to_string()], &[]).unwrap();
        assert!(include.is_match("clip.mp4"));
        assert!(!include.is_match("myclip.mp4"));
        assert!(!include.is_match("clipxmp4"));
    }

    #[test]
    fn regex_metacharacters_are_taken_literally() {
        let (include, exclude) = create_regex_sets(
            &["a+b.mp4".to_string()],
            &["take (1)*".to_string()],
        ).unwrap();
        assert!(include.is_match("a+b.mp4"));
        assert!(!include.is_match("aab.mp4"));
        assert!(exclude.is_match("take (1) final.mov"));
        assert!(!exclude.is_match("take 1.mov"));
    }

    #[test]
    fn empty_exclude_matches_nothing() {
        let (_, exclude) = create_regex_sets(&["*".to_string()], &[]).unwrap();
        assert!(!exclude.is_match("anything.mp4"));
    }

    #[test]
    fn file_size_switches_units_at_one_megabyte() {
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn default_archive_path_is_a_timestamped_zip() {
        let path = default_archive_path();
        let name = path.to_string_lossy();
        assert!(name.starts_with("branded_videos_"));
        assert!(name.ends_with(".zip"));
    }
}
