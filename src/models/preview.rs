use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct PreviewRequest {
    pub video: PathBuf,
    pub logo: PathBuf,
    pub width: u32,
    pub overlay: String,
    pub image: PathBuf,
}
