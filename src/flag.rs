use std::fmt;

use image::imageops::FilterType;

use crate::api::{Client, HttpGet};
use crate::error::FlagError;

pub const FLAG_WIDTH: u32 = 200;
pub const FLAG_HEIGHT: u32 = 120;

/// Decoded flag, RGBA8, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct FlagImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for FlagImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagRef {
    Image(FlagImage),
    /// The record carries no PNG flag URL.
    Missing,
    LoadError(String),
}

impl FlagRef {
    /// Text shown in place of the image, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            FlagRef::Image(_) => None,
            FlagRef::Missing => Some("No flag available"),
            FlagRef::LoadError(_) => Some("Flag load error"),
        }
    }
}

pub trait FlagSource {
    fn load_flag(&self, url: &str) -> Result<FlagImage, FlagError>;
}

impl<T: HttpGet> FlagSource for Client<T> {
    fn load_flag(&self, url: &str) -> Result<FlagImage, FlagError> {
        let bytes = self.get_bytes(url)?;
        decode_and_resize(&bytes, FLAG_WIDTH, FLAG_HEIGHT)
    }
}

pub fn decode_and_resize(bytes: &[u8], width: u32, height: u32) -> Result<FlagImage, FlagError> {
    let img = image::load_from_memory(bytes)?
        .resize_exact(width, height, FilterType::CatmullRom)
        .into_rgba8();
    let (w, h) = img.dimensions();

    Ok(FlagImage {
        width: w,
        height: h,
        rgba: img.into_raw(),
    })
}
