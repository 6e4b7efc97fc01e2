use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct VideoCollectInput {
    pub paths: Vec<PathBuf>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct VideoCollectOutput {
    pub videos: Vec<PathBuf>,
    pub total_size: u64,
}
