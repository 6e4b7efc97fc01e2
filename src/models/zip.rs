use std::path::PathBuf;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchiveCompression {
    Stored,
    Deflated,
}

#[derive(Clone, Debug)]
pub struct ArchiveInput {
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    pub compression: ArchiveCompression,
}

#[derive(Clone, Debug)]
pub struct ArchiveOutput {
    pub path: PathBuf,
    pub entries: usize,
    pub size: u64,
}
