//! Image XObject embedding
//!
//! Every image file is decoded and written into the output document once;
//! later draws of the same file reuse the cached object.

use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Image XObjects already written to an output document
#[derive(Debug, Default)]
pub struct ImageStore {
    cache: HashMap<PathBuf, ObjectId>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object id of the image XObject for `path`, embedding it on first use.
    pub fn embed(&mut self, output: &mut Document, path: &Path) -> Result<ObjectId> {
        if let Some(&id) = self.cache.get(path) {
            return Ok(id);
        }

        let id = embed_image(output, path)?;
        log::debug!("Embedded image {} as {:?}", path.display(), id);
        self.cache.insert(path.to_path_buf(), id);
        Ok(id)
    }

    /// Number of distinct images embedded so far
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Decode an image file and add it as an RGB image XObject, with a
/// soft mask when the source has an alpha channel.
fn embed_image(output: &mut Document, path: &Path) -> Result<ObjectId> {
    let decoded = image::open(path)?;
    let (width, height) = (decoded.width(), decoded.height());
    let has_alpha = decoded.color().has_alpha();

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(rgba.len() / 4);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    let mut dict = image_dictionary(width, height, b"DeviceRGB");
    if has_alpha {
        let smask = image_stream(image_dictionary(width, height, b"DeviceGray"), alpha)?;
        let smask_id = output.add_object(smask);
        dict.set("SMask", Object::Reference(smask_id));
    }

    Ok(output.add_object(image_stream(dict, rgb)?))
}

fn image_dictionary(width: u32, height: u32, color_space: &[u8]) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

fn image_stream(dict: Dictionary, samples: Vec<u8>) -> Result<Stream> {
    let mut stream = Stream::new(dict, samples);
    stream.compress()?;
    Ok(stream)
}
