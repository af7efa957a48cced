#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A pair of annotation trees under one temp dir.
pub struct Trees {
    pub temp: tempfile::TempDir,
}

impl Trees {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(temp.path().join("orig")).expect("create original root");
        fs::create_dir_all(temp.path().join("yolo")).expect("create yolo root");
        Self { temp }
    }

    pub fn original_root(&self) -> PathBuf {
        self.temp.path().join("orig")
    }

    pub fn yolo_root(&self) -> PathBuf {
        self.temp.path().join("yolo")
    }

    pub fn images_root(&self) -> PathBuf {
        self.temp.path().join("images")
    }

    /// Add `<key>_anno.txt` under the original root.
    pub fn original(&self, key: &str, content: &str) -> &Self {
        write_text(&self.original_root().join(format!("{key}_anno.txt")), content);
        self
    }

    /// Add `<key>.txt` under the YOLO root.
    pub fn yolo(&self, key: &str, content: &str) -> &Self {
        write_text(&self.yolo_root().join(format!("{key}.txt")), content);
        self
    }

    /// Add a blank BMP image `<key>.bmp` under the images root.
    pub fn image(&self, key: &str, width: u32, height: u32) -> &Self {
        write_bmp(&self.images_root().join(format!("{key}.bmp")), width, height);
        self
    }
}

pub fn write_text(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write text file");
}

/// Minimal 24-bit BMP; enough for header-only dimension probing.
pub fn write_bmp(path: &Path, width: u32, height: u32) {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixels = row_stride * height;
    let file_size = 54 + pixels;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&54u32.to_le_bytes());
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&pixels.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&[0; 8]);
    bytes.resize(file_size as usize, 0);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write bmp file");
}
