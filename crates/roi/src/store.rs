//! Reading masks and their slide metadata from disk.
//!
//! Two layouts are understood:
//!
//! - a JSON store document holding attributes and one or more named arrays:
//!   `{"attrs": {"resolution": [w, h], "rounded_to_0_100": true},
//!     "arrays": {"tumor": {"shape": [rows, cols], "data": [...]}}}`
//! - an image file (png, tiff, ...) read as 8-bit luma, with the same `attrs`
//!   object in a `<file>.attrs.json` sidecar. Luma is scaled to `0..=1`
//!   unless `rounded_to_0_100` is set, in which case it is kept as is.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    error::{Result, RoiError},
    types::{Mask, MaskGrid, ResolutionPair},
};

pub const RESOLUTION_KEY: &str = "resolution";
pub const PERCENTAGE_KEY: &str = "rounded_to_0_100";

#[derive(Debug, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    attrs: Map<String, Value>,
    #[serde(default)]
    arrays: BTreeMap<String, StoreArray>,
}

#[derive(Debug, Deserialize)]
struct StoreArray {
    /// `[rows, cols]`
    shape: [usize; 2],
    data: Vec<f32>,
}

/// A mask together with the resolution of the slide it was computed on
#[derive(Debug, Clone)]
pub struct MaskStore {
    pub mask: Mask,
    pub resolution: ResolutionPair,
}

impl MaskStore {
    /// Open a store document (`.json`) or an image with an attribute sidecar.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_document = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let store = if is_document {
            Self::from_document_str(&fs::read_to_string(path)?)?
        } else {
            Self::from_image(path)?
        };
        info!(
            path = %path.display(),
            mask = ?(store.mask.width(), store.mask.height()),
            slide = ?(store.resolution.width, store.resolution.height),
            "mask store loaded"
        );
        Ok(store)
    }

    /// Parse a JSON store document.
    pub fn from_document_str(document: &str) -> Result<Self> {
        let document: StoreDocument = serde_json::from_str(document)?;
        let (resolution, percentage) = read_attrs(&document.attrs)?;

        let shapes: Vec<[usize; 2]> = document.arrays.values().map(|array| array.shape).collect();
        if shapes.windows(2).any(|pair| pair[0] != pair[1]) {
            return Err(RoiError::AmbiguousShapeCount { shapes });
        }

        // The first array in name order is the mask
        let (name, array) = document
            .arrays
            .into_iter()
            .next()
            .ok_or_else(|| RoiError::InvalidStore("store holds no arrays".to_string()))?;
        debug!(array = %name, "reading mask array");

        let [rows, cols] = array.shape;
        let cells = rows
            .checked_mul(cols)
            .ok_or_else(|| RoiError::InvalidStore(format!("array '{name}' shape [{rows}, {cols}] overflows")))?;
        if array.data.len() != cells {
            return Err(RoiError::InvalidStore(format!(
                "array '{name}' has {} values for shape [{rows}, {cols}]",
                array.data.len()
            )));
        }
        let width = u32::try_from(cols).map_err(|_| RoiError::InvalidStore(format!("array '{name}' is too wide")))?;
        let height = u32::try_from(rows).map_err(|_| RoiError::InvalidStore(format!("array '{name}' is too tall")))?;
        let mask = Mask::from_values(width, height, array.data, percentage)
            .ok_or_else(|| RoiError::InvalidStore(format!("array '{name}' does not match its shape")))?;

        Ok(Self { mask, resolution })
    }

    fn from_image(path: &Path) -> Result<Self> {
        let sidecar = sidecar_path(path);
        let attrs: Map<String, Value> = match fs::read_to_string(&sidecar) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(RoiError::MissingMetadata { key: RESOLUTION_KEY });
            }
            Err(err) => return Err(err.into()),
        };
        let (resolution, percentage) = read_attrs(&attrs)?;

        // Percentage masks store 0..=100 directly, others span the full 8-bit range
        let scale = if percentage { 1.0 } else { 255.0 };
        let luma = image::open(path)?.to_luma8();
        let grid = MaskGrid::from_fn(luma.width(), luma.height(), |x, y| {
            image::Luma([f32::from(luma.get_pixel(x, y).0[0]) / scale])
        });

        Ok(Self { mask: Mask::new(grid, percentage), resolution })
    }

    pub fn into_parts(self) -> (Mask, ResolutionPair) {
        (self.mask, self.resolution)
    }
}

/// `mask.png` -> `mask.png.attrs.json`
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".attrs.json");
    PathBuf::from(name)
}

fn read_attrs(attrs: &Map<String, Value>) -> Result<(ResolutionPair, bool)> {
    let resolution = attrs
        .get(RESOLUTION_KEY)
        .ok_or(RoiError::MissingMetadata { key: RESOLUTION_KEY })?;
    let resolution: [u32; 2] = serde_json::from_value(resolution.clone()).map_err(|err| {
        RoiError::InvalidStore(format!("attribute '{RESOLUTION_KEY}' is not a [width, height] pair: {err}"))
    })?;

    let percentage = match attrs.get(PERCENTAGE_KEY) {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            return Err(RoiError::InvalidStore(format!(
                "attribute '{PERCENTAGE_KEY}' must be a boolean, got {other}"
            )));
        }
    };

    Ok((ResolutionPair::from(resolution), percentage))
}
