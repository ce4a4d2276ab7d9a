use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageResult};

use crate::error::RequestError;

/// Decodes the first frame of a GIF and re-encodes it as a JPEG.
///
/// Animation frames after the first are never read.
pub fn first_frame_jpeg<R: Read>(reader: R) -> ImageResult<Vec<u8>> {
  let decoder = GifDecoder::new(reader)?;
  let frame = DynamicImage::from_decoder(decoder)?.to_rgb8();

  let mut jpeg = Vec::new();
  JpegEncoder::new(&mut jpeg).encode_image(&frame)?;
  Ok(jpeg)
}

/// Opens `path` and produces its thumbnail. Blocking; run off the async runtime.
pub fn create_thumbnail(path: &Path) -> Result<Vec<u8>, RequestError> {
  let file = File::open(path).map_err(|source| RequestError::NotFound {
    path: path.to_path_buf(),
    source,
  })?;
  first_frame_jpeg(BufReader::new(file)).map_err(|source| RequestError::Decode {
    path: path.to_path_buf(),
    source,
  })
}
