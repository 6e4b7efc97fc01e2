use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use log::{debug, info, warn};
use crate::models::job::{Job, Outcome};
use crate::models::preview::PreviewRequest;
use crate::service::traits::i_service::VideoConverterTrait;

pub const FFMPEG_BINARY: &str = "ffmpeg";
const PREVIEW_SEEK: &str = "00:00:01";

/// ffmpeg 服務，以子行程執行 Logo 疊加
pub struct FfmpegService {
    binary: PathBuf,
}

impl FfmpegService {
    /// 指定路徑優先，否則從 PATH 尋找 ffmpeg；找不到時保留名稱，留給 `probe` 回報
    pub fn new(custom: Option<PathBuf>) -> Self {
        FfmpegService {
            binary: locate_ffmpeg(custom.as_deref()),
        }
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        FfmpegService { binary }
    }

    /// 擷取單張畫面，用於批次前確認 Logo 位置
    pub fn generate_preview(&self, request: &PreviewRequest) -> io::Result<PathBuf> {
        if let Some(parent) = request.image.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.run(&preview_args(request))?;
        info!("已產生預覽畫面：{}", request.image.display());
        Ok(request.image.clone())
    }

    fn run(&self, args: &[OsString]) -> io::Result<()> {
        debug!("執行 {} {:?}", self.binary.display(), args);
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("找不到 ffmpeg：{}，請先安裝 FFmpeg", self.binary.display())
                    )
                } else {
                    e
                }
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().rev().find(|line| !line.trim().is_empty()).unwrap_or("");
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("ffmpeg 結束狀態 {}：{}", output.status, last_line.trim())
            ));
        }
        Ok(())
    }
}

impl VideoConverterTrait for FfmpegService {
    fn probe(&self) -> io::Result<String> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| io::Error::new(
                io::ErrorKind::NotFound,
                format!("無法執行 ffmpeg（{}）：{}，請確認已安裝 FFmpeg", self.binary.display(), e)
            ))?;
        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("ffmpeg -version 結束狀態 {}", output.status)
            ));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout
            .lines()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| "ffmpeg（未知版本）".to_string());
        Ok(version)
    }

    fn convert(&self, job: &Job) -> Outcome<PathBuf> {
        debug!("處理影片 #{}：{}", job.index, job.source.display());
        match self.run(&overlay_args(job)) {
            Ok(()) => Outcome::Success(job.destination.clone()),
            Err(e) => {
                warn!("影片 {} 處理失敗：{}", job.source.display(), e);
                Outcome::Failure(e.to_string())
            }
        }
    }
}

pub fn locate_ffmpeg(custom: Option<&Path>) -> PathBuf {
    if let Some(path) = custom {
        return path.to_path_buf();
    }
    which::which(FFMPEG_BINARY).unwrap_or_else(|_| PathBuf::from(FFMPEG_BINARY))
}

/// 先將 Logo 縮放到指定寬度（高度等比），再疊加到影片上
pub fn overlay_filter(width: u32, overlay: &str) -> String {
    format!("[1:v]scale={}:-1[logo];[0:v][logo]overlay={}", width, overlay)
}

pub fn overlay_args(job: &Job) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        job.source.clone().into(),
        "-i".into(),
        job.logo.clone().into(),
        "-filter_complex".into(),
        overlay_filter(job.width, &job.overlay).into(),
        "-c:a".into(),
        "copy".into(),
        "-preset".into(),
        "ultrafast".into(),
        job.destination.clone().into(),
    ]
}

pub fn preview_args(request: &PreviewRequest) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-ss".into(),
        PREVIEW_SEEK.into(),
        "-i".into(),
        request.video.clone().into(),
        "-i".into(),
        request.logo.clone().into(),
        "-filter_complex".into(),
        overlay_filter(request.width, &request.overlay).into(),
        "-frames:v".into(),
        "1".into(),
        "-q:v".into(),
        "2".into(),
        request.image.clone().into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job {
            index: 0,
            source: PathBuf::from("in/clip.mp4"),
            destination: PathBuf::from("stage/branded_clip.mp4"),
            logo: PathBuf::from("saved_logos/Brand.png"),
            width: 250,
            overlay: "20:main_h-overlay_h-20".to_string(),
        }
    }

    #[test]
    fn filter_scales_logo_before_overlay() {
        assert_eq!(
            overlay_filter(300, "main_w-overlay_w-15:15"),
            "[1:v]scale=300:-1[logo];[0:v][logo]overlay=main_w-overlay_w-15:15"
        );
    }

    #[test]
    fn overlay_args_copy_audio_and_end_with_destination() {
        let args = overlay_args(&sample_job());
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args[0], "-y");
        assert_eq!(&args[1..3], ["-i", "in/clip.mp4"]);
        assert_eq!(&args[3..5], ["-i", "saved_logos/Brand.png"]);
        assert_eq!(args[6], "[1:v]scale=250:-1[logo];[0:v][logo]overlay=20:main_h-overlay_h-20");
        assert!(args.windows(2).any(|w| w == ["-c:a", "copy"]));
        assert!(args.windows(2).any(|w| w == ["-preset", "ultrafast"]));
        assert_eq!(args.last().map(String::as_str), Some("stage/branded_clip.mp4"));
    }

    #[test]
    fn preview_args_seek_and_grab_one_frame() {
        let request = PreviewRequest {
            video: PathBuf::from("clip.mp4"),
            logo: PathBuf::from("logo.png"),
            width: 120,
            overlay: "10:25".to_string(),
            image: PathBuf::from("preview.jpg"),
        };
        let args: Vec<String> = preview_args(&request)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(&args[1..3], ["-ss", "00:00:01"]);
        assert!(args.windows(2).any(|w| w == ["-frames:v", "1"]));
        assert!(args.contains(&"[1:v]scale=120:-1[logo];[0:v][logo]overlay=10:25".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("preview.jpg"));
    }

    #[test]
    fn custom_binary_takes_precedence() {
        assert_eq!(
            locate_ffmpeg(Some(Path::new("/opt/ffmpeg/bin/ffmpeg"))),
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
    }

    #[test]
    fn probe_reports_missing_binary() {
        let service = FfmpegService::with_binary(PathBuf::from("/nonexistent/ffmpeg-binary"));
        let err = service.probe().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn convert_with_missing_binary_is_a_failure_value() {
        let service = FfmpegService::with_binary(PathBuf::from("/nonexistent/ffmpeg-binary"));
        let outcome = service.convert(&sample_job());
        assert!(!outcome.is_success());
    }
}
