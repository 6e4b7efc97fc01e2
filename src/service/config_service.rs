use std::io;
use std::path::PathBuf;
use crate::config::config::{DEFAULT_WIDTH, DEFAULT_WORKERS};
use crate::config::ports::{BatchConfig, ConfigPort, LogoSource};
use crate::models::placement::Placement;
use crate::models::zip::ArchiveCompression;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<BatchConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：左下角、邊距 20、寬度 250、3 個並行
pub struct DefaultConfigAdapter {
    videos: Vec<PathBuf>,
    logo: LogoSource,
    output: PathBuf,
}

impl DefaultConfigAdapter {
    pub fn new(videos: Vec<PathBuf>, logo: LogoSource, output: PathBuf) -> Self {
        DefaultConfigAdapter { videos, logo, output }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<BatchConfig> {
        Ok(BatchConfig {
            videos: self.videos.clone(),
            logo: self.logo.clone(),
            placement: Placement::default(),
            width: DEFAULT_WIDTH,
            workers: DEFAULT_WORKERS,
            output: self.output.clone(),
            include: vec!["*".to_string()],
            exclude: None,
            compression: ArchiveCompression::Stored,
            no_progress: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::placement::overlay_expression;

    #[test]
    fn default_adapter_fills_in_bottom_left_defaults() {
        let adapter = DefaultConfigAdapter::new(
            vec![PathBuf::from("clips")],
            LogoSource::Library("Brand.png".to_string()),
            PathBuf::from("out.zip"),
        );
        let config = ConfigService::new(Box::new(adapter)).get_config().unwrap();
        assert_eq!(config.width, 250);
        assert_eq!(config.workers, 3);
        assert_eq!(overlay_expression(&config.placement), "20:main_h-overlay_h-20");
        assert_eq!(config.compression, ArchiveCompression::Stored);
        assert_eq!(config.logo, LogoSource::Library("Brand.png".to_string()));
    }
}
