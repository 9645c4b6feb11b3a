// src/loader/json_loader.rs
use crate::error::GameError;
use crate::map::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const INLINE_PATH: &str = "<inline>";

#[derive(Serialize, Deserialize)]
struct JsonTileset {
    #[serde(default)]
    columns: u32,
    firstgid: u32,
    #[serde(default)]
    image: String,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    tilecount: u32,
    tileheight: u32,
    tilewidth: u32,
}

#[derive(Serialize, Deserialize)]
struct JsonChunk {
    data: Vec<u32>,
    height: u32,
    width: u32,
    x: i32,
    y: i32,
}

#[derive(Serialize, Deserialize)]
struct JsonLayer {
    #[serde(default)]
    chunks: Vec<JsonChunk>,
    // finite (non-chunked) layers keep their tiles here
    #[serde(default, skip_serializing)]
    data: Vec<u32>,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
    #[serde(default)]
    startx: i32,
    #[serde(default)]
    starty: i32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "one")]
    opacity: f32,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

#[derive(Serialize, Deserialize)]
struct JsonMap {
    #[serde(default)]
    tilesets: Vec<JsonTileset>,
    #[serde(default)]
    layers: Vec<JsonLayer>,
}

impl From<JsonTileset> for Tileset {
    fn from(t: JsonTileset) -> Self {
        Tileset {
            first_gid: t.firstgid,
            name: t.name,
            class: t.class,
            image: t.image,
            image_w: t.imagewidth,
            image_h: t.imageheight,
            tile_w: t.tilewidth,
            tile_h: t.tileheight,
            columns: t.columns,
            tilecount: t.tilecount,
            spacing: t.spacing,
            margin: t.margin,
        }
    }
}

impl From<&Tileset> for JsonTileset {
    fn from(t: &Tileset) -> Self {
        JsonTileset {
            columns: t.columns,
            firstgid: t.first_gid,
            image: t.image.clone(),
            imageheight: t.image_h,
            imagewidth: t.image_w,
            margin: t.margin,
            name: t.name.clone(),
            class: t.class.clone(),
            spacing: t.spacing,
            tilecount: t.tilecount,
            tileheight: t.tile_h,
            tilewidth: t.tile_w,
        }
    }
}

fn layer_from_json(l: JsonLayer) -> TileLayer {
    let chunks = if l.chunks.is_empty() && !l.data.is_empty() {
        vec![Chunk {
            x: l.x,
            y: l.y,
            width: l.width,
            height: l.height,
            data: l.data,
        }]
    } else {
        l.chunks
            .into_iter()
            .map(|c| Chunk {
                x: c.x,
                y: c.y,
                width: c.width,
                height: c.height,
                data: c.data,
            })
            .collect()
    };

    TileLayer {
        id: l.id,
        name: l.name,
        class: l.class,
        visible: l.visible,
        opacity: l.opacity,
        x: l.x,
        y: l.y,
        width: l.width,
        height: l.height,
        start_x: l.startx,
        start_y: l.starty,
        chunks,
    }
}

fn layer_to_json(l: &TileLayer) -> JsonLayer {
    JsonLayer {
        chunks: l
            .chunks
            .iter()
            .map(|c| JsonChunk {
                data: c.data.clone(),
                height: c.height,
                width: c.width,
                x: c.x,
                y: c.y,
            })
            .collect(),
        data: Vec::new(),
        height: l.height,
        id: l.id,
        name: l.name.clone(),
        class: l.class.clone(),
        width: l.width,
        x: l.x,
        y: l.y,
        startx: l.start_x,
        starty: l.start_y,
        visible: l.visible,
        opacity: l.opacity,
    }
}

fn map_from_json(j: JsonMap) -> Result<TileMap, GameError> {
    let tilesets = j.tilesets.into_iter().map(Tileset::from).collect();
    let layers = j.layers.into_iter().map(layer_from_json).collect();
    TileMap::new(tilesets, layers)
}

/// Decode a map document already in memory.
pub fn decode_map_str(txt: &str) -> Result<TileMap, GameError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| GameError::MapDecode {
        path: PathBuf::from(INLINE_PATH),
        source,
    })?;
    map_from_json(j)
}

/// Read and decode a map file. Also returns the directory tileset images
/// are resolved against.
pub fn decode_map_file(path: impl AsRef<Path>) -> Result<(TileMap, PathBuf), GameError> {
    let p = path.as_ref();

    let txt = std::fs::read_to_string(p).map_err(|source| GameError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let j: JsonMap = serde_json::from_str(&txt).map_err(|source| GameError::MapDecode {
        path: p.to_path_buf(),
        source,
    })?;

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    debug!(
        path = %p.display(),
        tilesets = j.tilesets.len(),
        layers = j.layers.len(),
        "decoded map"
    );

    Ok((map_from_json(j)?, map_dir))
}

/// Serialize tilesets and layers back to the chunked document layout.
pub fn encode_map(map: &TileMap) -> Result<String, serde_json::Error> {
    let j = JsonMap {
        tilesets: map.tilesets().iter().map(JsonTileset::from).collect(),
        layers: map.layers().iter().map(layer_to_json).collect(),
    };
    serde_json::to_string_pretty(&j)
}
