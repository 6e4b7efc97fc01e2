use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::info;
use crate::utils::utils::sanitize_logo_name;

const LOGO_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// 以目錄保存的 Logo 庫
pub struct LogoLibrary {
    dir: PathBuf,
}

impl LogoLibrary {
    /// 開啟 Logo 庫，目錄不存在時自動建立
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LogoLibrary { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if is_logo_file(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.entry_path(name)?;
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Logo 庫中找不到 '{}'", name)
            ));
        }
        Ok(path)
    }

    /// 將圖片存入 Logo 庫，名稱只保留英數字元並一律以 `.png` 儲存
    /// # 回傳
    /// - 儲存後的檔名
    pub fn save(&self, source: &Path, name: &str) -> io::Result<String> {
        let clean_name = sanitize_logo_name(name);
        if clean_name.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Logo 名稱 '{}' 不含任何英數字元", name)
            ));
        }
        let file_name = format!("{}.png", clean_name);
        fs::copy(source, self.dir.join(&file_name))?;
        info!("已儲存 Logo：{}", file_name);
        Ok(file_name)
    }

    pub fn delete(&self, name: &str) -> io::Result<()> {
        let path = self.resolve(name)?;
        fs::remove_file(&path)?;
        info!("已刪除 Logo：{}", name);
        Ok(())
    }

    fn entry_path(&self, name: &str) -> io::Result<PathBuf> {
        // 只接受單純檔名，避免跳出 Logo 庫目錄
        let is_plain = Path::new(name).file_name().map(|f| f == name).unwrap_or(false);
        if !is_plain {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("無效的 Logo 名稱：{}", name)
            ));
        }
        Ok(self.dir.join(name))
    }
}

fn is_logo_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| LOGO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_extensions_are_case_insensitive() {
        assert!(is_logo_file("brand.PNG"));
        assert!(is_logo_file("brand.jpeg"));
        assert!(!is_logo_file("brand.gif"));
        assert!(!is_logo_file("png"));
    }
}
