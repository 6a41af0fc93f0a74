#[cfg(test)]
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

const DARK: &str = "dark";
const LIGHT: &str = "light";

/// 主题偏好的持久化（唯一持久化的状态）
pub trait PreferenceStore {
    /// 读取偏好，`Ok(None)` 表示尚未保存过
    fn load_dark_mode(&self) -> Result<Option<bool>, StorageError>;

    fn save_dark_mode(&self, dark_mode: bool) -> Result<(), StorageError>;
}

fn encode(dark_mode: bool) -> &'static str {
    if dark_mode { DARK } else { LIGHT }
}

fn decode(value: &str) -> Result<bool, StorageError> {
    match value.trim() {
        DARK => Ok(true),
        LIGHT => Ok(false),
        other => Err(StorageError::InvalidTheme(other.to_string())),
    }
}

/// 文件存储 (<data_dir>/theme)
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn filename() -> &'static str {
        "theme"
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::filename()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_dark_mode(&self) -> Result<Option<bool>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        decode(&content).map(Some)
    }

    fn save_dark_mode(&self, dark_mode: bool) -> Result<(), StorageError> {
        fs::write(&self.path, encode(dark_mode)).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// 内存存储，用于测试
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryPreferenceStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
        }
    }

    /// 当前保存的原始值
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferenceStore {
    fn load_dark_mode(&self) -> Result<Option<bool>, StorageError> {
        self.value.borrow().as_deref().map(decode).transpose()
    }

    fn save_dark_mode(&self, dark_mode: bool) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(encode(dark_mode).to_string());
        Ok(())
    }
}

#[cfg(test)]
impl<T: PreferenceStore + ?Sized> PreferenceStore for std::rc::Rc<T> {
    fn load_dark_mode(&self) -> Result<Option<bool>, StorageError> {
        (**self).load_dark_mode()
    }

    fn save_dark_mode(&self, dark_mode: bool) -> Result<(), StorageError> {
        (**self).save_dark_mode(dark_mode)
    }
}

/// 终端配色提示：COLORFGBG = "fg;bg"，背景色 0-6 或 8 视为深色
pub fn system_prefers_dark() -> bool {
    env::var("COLORFGBG")
        .ok()
        .is_some_and(|value| colorfgbg_is_dark(&value))
}

fn colorfgbg_is_dark(value: &str) -> bool {
    value
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}
