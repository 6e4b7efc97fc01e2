use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::config::{
    DEFAULT_LOGO_DIR, DEFAULT_WIDTH, DEFAULT_WORKERS, MARGIN_RANGE, WIDTH_RANGE, WORKERS_RANGE,
};
use crate::config::ports::{BatchConfig, ConfigPort, LogoSource};
use crate::facade::batch_facade::BatchFacade;
use crate::facade::traits::i_batch::BatchFacadeTrait;
use crate::models::placement::{
    overlay_expression, HorizontalAnchor, Placement, VerticalAnchor, DEFAULT_MARGIN,
    DEFAULT_MANUAL_OFFSET,
};
use crate::models::preview::PreviewRequest;
use crate::models::zip::ArchiveCompression;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::ffmpeg::FfmpegService;
use crate::service::file::FileService;
use crate::service::library::LogoLibrary;
use crate::service::zip::ZipService;
use crate::utils::utils::{default_archive_path, setup_logging};

pub fn process_interactive_mode() -> io::Result<String> {
    println!("=== 歡迎使用互動模式 ===");
    setup_logging(&get_log_level_option()?)?;

    let library = LogoLibrary::open(DEFAULT_LOGO_DIR)?;
    let logo = get_logo_source(&library)?;
    let videos = get_video_paths()?;
    let output = get_output_path()?;
    let use_default_config = get_default_config_option()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：左下角，邊距 20 px，寬度 250 px，同時處理 3 支影片");
        Box::new(DefaultConfigAdapter::new(videos, logo, output))
    } else {
        Box::new(InteractiveConfigAdapter::new(videos, logo, output))
    };
    // 先讀出配置供預覽使用，批次執行時再交給 facade
    let config = ConfigService::new(config_port).get_config()?;

    if get_preview_option()? {
        preview_first_video(&library, &config)?;
    }

    let facade = BatchFacade::new(
        Box::new(FixedConfigAdapter(config)),
        library,
        Box::new(FfmpegService::new(None)),
        Box::new(FileService::new()),
        Box::new(ZipService::new()),
    );
    let report = facade.execute_batch()?;
    Ok(report.summary())
}

fn preview_first_video(library: &LogoLibrary, config: &BatchConfig) -> io::Result<()> {
    let Some(video) = config.videos.iter().find(|p| p.is_file()) else {
        println!("預覽需要指定單一影片檔案，略過");
        return Ok(());
    };
    let logo = match &config.logo {
        LogoSource::Library(name) => library.resolve(name)?,
        LogoSource::File(path) => path.clone(),
    };
    let request = PreviewRequest {
        video: video.clone(),
        logo,
        width: config.width,
        overlay: overlay_expression(&config.placement),
        image: std::env::temp_dir().join("preview_debug.jpg"),
    };
    match FfmpegService::new(None).generate_preview(&request) {
        Ok(image) => println!("預覽畫面已產生：{}", image.display()),
        Err(e) => println!("預覽失敗：{}", e),
    }
    Ok(())
}

pub fn get_logo_source(library: &LogoLibrary) -> io::Result<LogoSource> {
    loop {
        let saved = library.list()?;
        if saved.is_empty() {
            println!("Logo 庫是空的，請指定 Logo 圖片");
            break;
        }
        let items = library_menu_items(&saved);
        let choice = Select::new()
            .with_prompt("從 Logo 庫選擇（使用方向鍵選擇，按 Enter 確認）")
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Logo 選擇失敗: {}", e)))?;
        match choice {
            i if i < saved.len() => return Ok(LogoSource::Library(saved[i].clone())),
            i if i == saved.len() => break,
            _ => delete_saved_logo(library, &saved)?,
        }
    }

    let path: String = Input::new()
        .with_prompt("請輸入 Logo 圖片路徑（png/jpg）")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).is_file() { Ok(()) } else { Err(format!("檔案 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let save = Confirm::new()
        .with_prompt("是否存入 Logo 庫以便下次使用？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("儲存選項輸入失敗: {}", e)))?;
    if save {
        let name: String = Input::new()
            .with_prompt("Logo 名稱")
            .default("MyLogo".to_string())
            .interact_text()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        let saved_name = library.save(Path::new(&path), &name)?;
        return Ok(LogoSource::Library(saved_name));
    }
    Ok(LogoSource::File(PathBuf::from(path)))
}

/// Logo 庫選單：已存的 Logo，之後是「其他圖片」與「刪除」兩個動作
pub fn library_menu_items(saved: &[String]) -> Vec<String> {
    let mut items = saved.to_vec();
    items.push("使用其他圖片檔…".to_string());
    items.push("刪除 Logo…".to_string());
    items
}

fn delete_saved_logo(library: &LogoLibrary, saved: &[String]) -> io::Result<()> {
    let index = Select::new()
        .with_prompt("選擇要刪除的 Logo")
        .items(saved)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Logo 選擇失敗: {}", e)))?;
    let confirmed = Confirm::new()
        .with_prompt(format!("確定刪除 '{}'？", saved[index]))
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("刪除確認失敗: {}", e)))?;
    if confirmed {
        library.delete(&saved[index])?;
        println!("已刪除 '{}'", saved[index]);
    }
    Ok(())
}

pub fn get_video_paths() -> io::Result<Vec<PathBuf>> {
    let input: String = Input::new()
        .with_prompt("請輸入影片檔案或目錄，以逗號分隔（例如：./clips 或 a.mp4,b.mov）")
        .validate_with(|input: &String| -> Result<(), String> {
            for part in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !Path::new(part).exists() {
                    return Err(format!("路徑 '{}' 不存在", part));
                }
            }
            Ok(())
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(split_paths(&input))
}

pub fn split_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

pub fn get_output_path() -> io::Result<PathBuf> {
    let default = default_archive_path().to_string_lossy().to_string();
    let output: String = Input::new()
        .with_prompt("輸入 ZIP 輸出路徑")
        .default(default)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(PathBuf::from(output))
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（左下角、寬度 250 px、同時處理 3 支影片）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_placement() -> io::Result<Placement> {
    let mode = Select::new()
        .with_prompt("選擇位置模式")
        .items(&["標準位置（預設）", "手動輸入 X/Y"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("位置模式選擇失敗: {}", e)))?;

    if mode == 1 {
        let x = prompt_number("X 位置（px）", DEFAULT_MANUAL_OFFSET, |_| true)?;
        let y = prompt_number("Y 位置（px）", DEFAULT_MANUAL_OFFSET, |_| true)?;
        return Ok(Placement::manual(x, y));
    }

    let vertical = match Select::new()
        .with_prompt("垂直位置")
        .items(&["下方", "上方", "置中"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("垂直位置選擇失敗: {}", e)))?
    {
        0 => VerticalAnchor::Bottom,
        1 => VerticalAnchor::Top,
        _ => VerticalAnchor::Center,
    };
    let horizontal = match Select::new()
        .with_prompt("水平位置")
        .items(&["左側", "右側", "置中"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("水平位置選擇失敗: {}", e)))?
    {
        0 => HorizontalAnchor::Left,
        1 => HorizontalAnchor::Right,
        _ => HorizontalAnchor::Center,
    };
    let margin = prompt_number("邊距（px，0-100）", DEFAULT_MARGIN, |m| MARGIN_RANGE.contains(m))?;
    Ok(Placement::preset(vertical, horizontal, margin))
}

pub fn get_width_option() -> io::Result<u32> {
    prompt_number("Logo 寬度（px，50-1000）", DEFAULT_WIDTH, |w| WIDTH_RANGE.contains(w))
}

pub fn get_workers_option() -> io::Result<usize> {
    prompt_number("同時處理的影片數（1-5，越多越快但更吃 CPU）", DEFAULT_WORKERS, |w| WORKERS_RANGE.contains(w))
}

pub fn get_preview_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("開始前先產生第一支影片的預覽畫面？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預覽選項輸入失敗: {}", e)))
}

pub const LOG_LEVELS: [&str; 4] = ["info", "debug", "warn", "error"];

pub fn get_log_level_option() -> io::Result<String> {
    let choice = Select::new()
        .with_prompt("日誌等級")
        .items(&LOG_LEVELS)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌等級選擇失敗: {}", e)))?;
    Ok(LOG_LEVELS[choice].to_string())
}

fn prompt_number<T, V>(prompt: &str, default: T, valid: V) -> io::Result<T>
where
    T: Clone + std::fmt::Display + std::str::FromStr,
    T::Err: std::fmt::Display,
    V: Fn(&T) -> bool,
{
    Input::<T>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|value: &T| -> Result<(), String> {
            if valid(value) { Ok(()) } else { Err(format!("{} 超出允許範圍", value)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("數值輸入失敗: {}", e)))
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    videos: Vec<PathBuf>,
    logo: LogoSource,
    output: PathBuf,
}

impl InteractiveConfigAdapter {
    pub fn new(videos: Vec<PathBuf>, logo: LogoSource, output: PathBuf) -> Self {
        InteractiveConfigAdapter { videos, logo, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<BatchConfig> {
        let placement = get_placement()?;
        let width = get_width_option()?;
        let workers = get_workers_option()?;

        Ok(BatchConfig {
            videos: self.videos.clone(),
            logo: self.logo.clone(),
            placement,
            width,
            workers,
            output: self.output.clone(),
            include: vec!["*".to_string()],
            exclude: None,
            compression: ArchiveCompression::Stored,
            no_progress: false,
        })
    }
}

// 已確定的配置，避免互動提問在 facade 內重複出現
struct FixedConfigAdapter(BatchConfig);

impl ConfigPort for FixedConfigAdapter {
    fn get_config(&self) -> io::Result<BatchConfig> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_paths_are_trimmed() {
        assert_eq!(
            split_paths(" a.mp4, clips ,,b.mov "),
            vec![PathBuf::from("a.mp4"), PathBuf::from("clips"), PathBuf::from("b.mov")]
        );
        assert!(split_paths(" , ").is_empty());
    }

    #[test]
    fn library_menu_lists_logos_then_actions() {
        let items = library_menu_items(&["Brand.png".to_string(), "Alt.png".to_string()]);
        assert_eq!(items.len(), 4);
        assert_eq!(&items[..2], ["Brand.png", "Alt.png"]);
        assert!(items[3].contains("刪除"));
    }

    #[test]
    fn offered_log_levels_match_cli_choices() {
        use clap::Parser;
        for level in LOG_LEVELS {
            let cli = crate::config::config::Cli::try_parse_from([
                "logo_overlay", "--log-level", level, "logo", "list",
            ]).unwrap();
            assert_eq!(cli.log_level, level);
        }
        assert_eq!(LOG_LEVELS[0], "info");
    }
}
