use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use log::info;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;
use crate::models::zip::{ArchiveCompression, ArchiveInput, ArchiveOutput};
use crate::service::traits::i_service::ArchiveServiceTrait;
use crate::utils::utils::format_file_size;

pub struct ZipService;

impl ZipService {
    pub fn new() -> Self {
        ZipService
    }
}

impl Default for ZipService {
    fn default() -> Self {
        ZipService::new()
    }
}

impl ArchiveServiceTrait for ZipService {
    /// 將成功的輸出打包成單一 ZIP，項目名稱為檔案本身的名稱
    fn create_archive(&self, input: ArchiveInput) -> io::Result<ArchiveOutput> {
        if let Some(parent) = input.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let options = SimpleFileOptions::default()
            .compression_method(match input.compression {
                ArchiveCompression::Stored => CompressionMethod::Stored,
                ArchiveCompression::Deflated => CompressionMethod::Deflated,
            })
            .large_file(true);

        let file = File::create(&input.output)?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        for path in &input.files {
            let entry_name = entry_name(path)?;
            zip.start_file(entry_name, options)?;
            copy_file_content(path, &mut zip)?;
        }
        let mut writer = zip.finish()?;
        writer.flush()?;

        let size = fs::metadata(&input.output)?.len();
        info!(
            "生成 ZIP：{}，共 {} 個檔案，大小：{}",
            input.output.display(),
            input.files.len(),
            format_file_size(size)
        );

        Ok(ArchiveOutput {
            path: input.output.clone(),
            entries: input.files.len(),
            size,
        })
    }
}

fn entry_name(path: &Path) -> io::Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("無法取得檔名：{}", path.display())
        ))
}

pub fn copy_file_content<W: Write>(file_path: &Path, writer: &mut W) -> io::Result<u64> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::with_capacity(4 * 1024 * 1024, file);
    io::copy(&mut reader, writer)
}
