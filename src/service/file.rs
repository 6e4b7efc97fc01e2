use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use regex::RegexSet;
use walkdir::WalkDir;
use crate::models::file::{VideoCollectInput, VideoCollectOutput};
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_regex_sets;

pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];

pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        FileService::new()
    }
}

impl FileServiceTrait for FileService {
    fn collect_videos(&self, input: VideoCollectInput) -> io::Result<VideoCollectOutput> {
        let exclude = input.exclude_patterns.unwrap_or_default();
        let (include_set, exclude_set) = create_regex_sets(&input.include_patterns, &exclude)?;

        let mut videos = Vec::new();
        for path in &input.paths {
            if path.is_file() {
                if is_video_valid(path, &include_set, &exclude_set) {
                    videos.push(path.to_path_buf());
                } else {
                    warn!("略過非影片或不符合條件的檔案：{}", path.display());
                }
            } else if path.is_dir() {
                for entry in WalkDir::new(path).follow_links(true) {
                    let entry = entry.map_err(io::Error::from)?;
                    if entry.file_type().is_file() && is_video_valid(entry.path(), &include_set, &exclude_set) {
                        videos.push(entry.into_path());
                    }
                }
            } else {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("輸入路徑 '{}' 不存在", path.display())
                ));
            }
        }
        videos.sort();
        videos.dedup();

        let mut total_size = 0;
        for video in &videos {
            total_size += fs::metadata(video)?.len();
        }
        info!("找到 {} 支影片，總大小：{} 位元組", videos.len(), total_size);

        Ok(VideoCollectOutput { videos, total_size })
    }
}

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn is_video_valid(path: &Path, include_set: &RegexSet, exclude_set: &RegexSet) -> bool {
    if !is_video_file(path) {
        return false;
    }
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    include_set.is_match(&name) && !exclude_set.is_match(&name)
}

/// 每支影片的輸出路徑；同名影片第二次起加上索引，避免互相覆寫
pub fn plan_destinations(videos: &[PathBuf], staging: &Path) -> Vec<PathBuf> {
    let mut used = std::collections::HashSet::new();
    videos
        .iter()
        .enumerate()
        .map(|(index, video)| {
            let file_name = video
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| format!("video_{}.mp4", index));
            let mut candidate = format!("branded_{}", file_name);
            let mut attempt = 0;
            while !used.insert(candidate.clone()) {
                candidate = if attempt == 0 {
                    format!("branded_{}_{}", index, file_name)
                } else {
                    format!("branded_{}_{}_{}", index, attempt, file_name)
                };
                attempt += 1;
            }
            staging.join(candidate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extensions_match_case_insensitively() {
        assert!(is_video_file(Path::new("a/b/clip.MP4")));
        assert!(is_video_file(Path::new("clip.mov")));
        assert!(is_video_file(Path::new("clip.avi")));
        assert!(!is_video_file(Path::new("clip.mkv")));
        assert!(!is_video_file(Path::new("mp4")));
    }

    #[test]
    fn patterns_apply_to_file_name_only() {
        let (include, exclude) = create_regex_sets(&["*".to_string()], &["draft*".to_string()]).unwrap();
        assert!(is_video_valid(Path::new("drafts_dir/final.mp4"), &include, &exclude));
        assert!(is_video_valid(Path::new("ok/final_draft.mp4"), &include, &exclude));
        assert!(!is_video_valid(Path::new("ok/draft_cut.mp4"), &include, &exclude));
    }

    #[test]
    fn duplicate_names_get_an_index_prefix() {
        let videos = vec![
            PathBuf::from("a/clip.mp4"),
            PathBuf::from("b/clip.mp4"),
            PathBuf::from("b/other.mov"),
        ];
        let destinations = plan_destinations(&videos, Path::new("stage"));
        assert_eq!(destinations, vec![
            PathBuf::from("stage/branded_clip.mp4"),
            PathBuf::from("stage/branded_1_clip.mp4"),
            PathBuf::from("stage/branded_other.mov"),
        ]);
    }

    #[test]
    fn indexed_name_already_taken_gets_a_counter() {
        let videos = vec![
            PathBuf::from("a/2_clip.mp4"),
            PathBuf::from("b/clip.mp4"),
            PathBuf::from("c/clip.mp4"),
        ];
        let destinations = plan_destinations(&videos, Path::new("stage"));
        assert_eq!(destinations, vec![
            PathBuf::from("stage/branded_2_clip.mp4"),
            PathBuf::from("stage/branded_clip.mp4"),
            PathBuf::from("stage/branded_2_1_clip.mp4"),
        ]);
        let unique: std::collections::HashSet<_> = destinations.iter().collect();
        assert_eq!(unique.len(), videos.len());
    }
}
