use std::io;
use std::path::PathBuf;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{
    validate_file_patterns, validate_input_path, validate_input_paths, validate_range, Cli, Command,
    LogoArgs, LogoCommand, OverlayArgs, PreviewArgs, ProcessArgs, MARGIN_RANGE, WIDTH_RANGE,
    WORKERS_RANGE,
};
use crate::config::ports::{BatchConfig, ConfigPort, LogoSource};
use crate::facade::batch_facade::BatchFacade;
use crate::facade::traits::i_batch::BatchFacadeTrait;
use crate::models::placement::{overlay_expression, Placement};
use crate::models::preview::PreviewRequest;
use crate::service::ffmpeg::FfmpegService;
use crate::service::file::FileService;
use crate::service::library::LogoLibrary;
use crate::service::zip::ZipService;
use crate::utils::utils::{default_archive_path, setup_logging};

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<String> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;
    let library = LogoLibrary::open(&cli.library)?;

    match cli.command.clone() {
        Command::Process(args) => {
            let facade = BatchFacade::new(
                Box::new(CliConfigAdapter::new(args)),
                library,
                Box::new(FfmpegService::new(cli.ffmpeg.clone())),
                Box::new(FileService::new()),
                Box::new(ZipService::new()),
            );
            let report = facade.execute_batch()?;
            for failure in &report.failures {
                println!("失敗 #{}：{}", failure.index, failure.reason);
            }
            Ok(report.summary())
        }
        Command::Preview(args) => run_preview(&library, cli.ffmpeg.clone(), args),
        Command::Logo { action } => run_logo_command(&library, action),
    }
}

fn run_preview(library: &LogoLibrary, ffmpeg: Option<PathBuf>, args: PreviewArgs) -> io::Result<String> {
    validate_input_path(&args.video)?;
    validate_range("width", args.overlay.width, &WIDTH_RANGE)?;
    let logo = match logo_source(&args.overlay.logo)? {
        LogoSource::Library(name) => library.resolve(&name)?,
        LogoSource::File(path) => validate_input_path(&path)?.to_path_buf(),
    };
    let request = PreviewRequest {
        video: args.video,
        logo,
        width: args.overlay.width,
        overlay: overlay_expression(&placement_from_args(&args.overlay)?),
        image: args.image.unwrap_or_else(|| std::env::temp_dir().join("preview_debug.jpg")),
    };
    let image = FfmpegService::new(ffmpeg).generate_preview(&request)?;
    Ok(format!("預覽畫面：{}", image.display()))
}

fn run_logo_command(library: &LogoLibrary, action: LogoCommand) -> io::Result<String> {
    match action {
        LogoCommand::List => {
            let names = library.list()?;
            if names.is_empty() {
                return Ok(format!("Logo 庫（{}）是空的", library.dir().display()));
            }
            Ok(names.join("\n"))
        }
        LogoCommand::Add { file, name } => {
            validate_input_path(&file)?;
            let saved = library.save(&file, &name)?;
            Ok(format!("已儲存至 Logo 庫：{}", saved))
        }
        LogoCommand::Delete { name } => {
            library.delete(&name)?;
            Ok(format!("已刪除 '{}'", name))
        }
    }
}

pub fn logo_source(args: &LogoArgs) -> io::Result<LogoSource> {
    match (&args.logo, &args.logo_name) {
        (Some(path), None) => Ok(LogoSource::File(path.clone())),
        (None, Some(name)) => Ok(LogoSource::Library(name.clone())),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "請以 --logo 或 --logo-name 其中之一指定 Logo"
        )),
    }
}

pub fn placement_from_args(args: &OverlayArgs) -> io::Result<Placement> {
    validate_range("margin", args.margin, &MARGIN_RANGE)?;
    Ok(Placement {
        mode: args.position,
        vertical: args.vertical,
        horizontal: args.horizontal,
        margin: args.margin,
        x: args.x,
        y: args.y,
    })
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    args: ProcessArgs,
}

impl CliConfigAdapter {
    pub fn new(args: ProcessArgs) -> Self {
        CliConfigAdapter { args }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<BatchConfig> {
        let args = &self.args;
        validate_input_paths(&args.videos)?;
        validate_file_patterns(&args.include, &args.exclude)?;
        let workers = validate_range("workers", args.workers, &WORKERS_RANGE)?;
        let width = validate_range("width", args.overlay.width, &WIDTH_RANGE)?;

        Ok(BatchConfig {
            videos: args.videos.clone(),
            logo: logo_source(&args.overlay.logo)?,
            placement: placement_from_args(&args.overlay)?,
            width,
            workers,
            output: args.output.clone().unwrap_or_else(default_archive_path),
            include: args.include.clone(),
            exclude: args.exclude.clone(),
            compression: args.compression,
            no_progress: args.no_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::placement::PositionMode;

    fn parse_process(argv: &[&str]) -> ProcessArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Process(args) => args,
            _ => panic!("expected process subcommand"),
        }
    }

    #[test]
    fn adapter_builds_config_from_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        std::fs::write(&video, b"fake").unwrap();
        let video_arg = video.to_string_lossy().to_string();

        let args = parse_process(&[
            "logo_overlay", "process", &video_arg, "--logo-name", "Brand.png",
            "--position", "manual", "--x", "10", "--y", "25", "--workers", "2",
        ]);
        let config = CliConfigAdapter::new(args).get_config().unwrap();

        assert_eq!(config.logo, LogoSource::Library("Brand.png".to_string()));
        assert_eq!(config.placement.mode, PositionMode::Manual);
        assert_eq!(overlay_expression(&config.placement), "10:25");
        assert_eq!(config.workers, 2);
        assert_eq!(config.width, 250);
        assert!(config.output.to_string_lossy().ends_with(".zip"));
    }

    #[test]
    fn adapter_rejects_out_of_range_workers() {
        let dir = tempfile::tempdir().unwrap();
        let video_arg = dir.path().to_string_lossy().to_string();
        let args = parse_process(&[
            "logo_overlay", "process", &video_arg, "--logo", "x.png", "--workers", "8",
        ]);
        let err = CliConfigAdapter::new(args).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn adapter_rejects_missing_videos() {
        let args = parse_process(&[
            "logo_overlay", "process", "/definitely/not/here.mp4", "--logo", "x.png",
        ]);
        let err = CliConfigAdapter::new(args).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn margin_above_limit_is_rejected() {
        let args = parse_process(&[
            "logo_overlay", "process", "a.mp4", "--logo", "x.png", "--margin", "150",
        ]);
        assert!(placement_from_args(&args.overlay).is_err());
    }
}
