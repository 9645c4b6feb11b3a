//! Chunked tile map model and its render pass.

use crate::command::{DrawCommand, TextureRef, TileFlip};
use crate::error::GameError;
use macroquad::prelude::Rect;
use serde::Deserialize;
use tracing::warn;

pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// Raw tile value from a chunk, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    /// Gid with the flip bits masked off.
    #[inline]
    pub fn clean(self) -> u32 {
        self.0 & GID_MASK
    }

    /// No tile here, whatever flip bits are set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.clean() == 0
    }

    /// Flip flags of this cell.
    #[inline]
    pub fn flip(self) -> TileFlip {
        TileFlip {
            h: self.0 & FLIP_H != 0,
            v: self.0 & FLIP_V != 0,
            d: self.0 & FLIP_D != 0,
        }
    }
}

/// How a nonzero cell picks what to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileSampling {
    /// Stretch the layer's whole class texture over the cell.
    #[default]
    WholeTexture,
    /// Cut the cell out of the owning tileset's atlas by `gid - firstgid`.
    Atlas,
}

/// Tileset metadata. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tileset {
    pub first_gid: u32,
    pub name: String,
    /// Selects the texture for layers with the same class.
    pub class: String,
    pub image: String,
    pub image_w: u32,
    pub image_h: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    pub columns: u32,
    pub tilecount: u32,
    pub spacing: u32,
    pub margin: u32,
}

impl Tileset {
    #[inline]
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tilecount
    }

    /// Atlas region of tile `local` (0-based within this tileset).
    pub fn atlas_rect(&self, local: u32) -> Rect {
        let cols = self.columns.max(1);
        let col = local % cols;
        let row = local / cols;
        let sx = self.margin + col * (self.tile_w + self.spacing);
        let sy = self.margin + row * (self.tile_h + self.spacing);
        Rect::new(sx as f32, sy as f32, self.tile_w as f32, self.tile_h as f32)
    }
}

/// Rectangular block of tiles placed at `(x, y)` in tile units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` entries, `0` = empty.
    pub data: Vec<u32>,
}

impl Chunk {
    /// Tile at local `(x, y)`; out-of-range reads as empty.
    #[inline]
    pub fn tile(&self, x: u32, y: u32) -> TileId {
        if x >= self.width || y >= self.height {
            return TileId(0);
        }
        let idx = (y * self.width + x) as usize;
        TileId(self.data.get(idx).copied().unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub id: u32,
    pub name: String,
    pub class: String,
    pub visible: bool,
    /// Carried for the format; rendering ignores it.
    pub opacity: f32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub start_x: i32,
    pub start_y: i32,
    pub chunks: Vec<Chunk>,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            class: String::new(),
            visible: true,
            opacity: 1.0,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            start_x: 0,
            start_y: 0,
            chunks: Vec::new(),
        }
    }
}

/// Read-only chunked tile map.
///
/// Layers draw in declaration order. Every cell uses the tile size of the
/// first tileset.
#[derive(Debug, Clone)]
pub struct TileMap {
    tilesets: Vec<Tileset>,
    layers: Vec<TileLayer>,
    /// Distinct tileset classes; index = texture slot.
    classes: Vec<String>,
    /// Tileset index providing the image for each slot.
    class_images: Vec<usize>,
    /// Texture slot per layer, `None` when no tileset has the layer's class.
    layer_slots: Vec<Option<usize>>,
}

impl TileMap {
    /// Validate chunks and build the class lookups.
    pub fn new(tilesets: Vec<Tileset>, layers: Vec<TileLayer>) -> Result<Self, GameError> {
        for layer in &layers {
            for (index, chunk) in layer.chunks.iter().enumerate() {
                let expected = chunk.width as usize * chunk.height as usize;
                if chunk.data.len() != expected {
                    return Err(GameError::InvalidChunk {
                        layer: layer.name.clone(),
                        index,
                        expected,
                        actual: chunk.data.len(),
                    });
                }
            }
        }

        let mut classes: Vec<String> = Vec::new();
        let mut class_images: Vec<usize> = Vec::new();
        for (i, ts) in tilesets.iter().enumerate() {
            match classes.iter().position(|c| *c == ts.class) {
                // later tilesets with the same class replace the image
                Some(slot) => class_images[slot] = i,
                None => {
                    classes.push(ts.class.clone());
                    class_images.push(i);
                }
            }
        }

        let layer_slots: Vec<Option<usize>> = layers
            .iter()
            .map(|l| classes.iter().position(|c| *c == l.class))
            .collect();

        for (layer, slot) in layers.iter().zip(&layer_slots) {
            if slot.is_none() && layer.chunks.iter().any(|c| c.data.iter().any(|&g| g != 0)) {
                warn!(
                    layer = %layer.name,
                    class = %layer.class,
                    "no tileset for layer class; its tiles will not draw"
                );
            }
        }
        if tilesets.is_empty() && !layers.is_empty() {
            warn!("map has layers but no tilesets; nothing will draw");
        }

        Ok(Self {
            tilesets,
            layers,
            classes,
            class_images,
            layer_slots,
        })
    }

    pub fn tilesets(&self) -> &[Tileset] {
        &self.tilesets
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Distinct tileset classes, in first-seen order. Index = texture slot.
    pub fn texture_classes(&self) -> &[String] {
        &self.classes
    }

    /// `(slot, class, tileset)` for every texture to load.
    pub fn texture_sources(&self) -> impl Iterator<Item = (usize, &str, &Tileset)> + '_ {
        self.classes
            .iter()
            .zip(&self.class_images)
            .enumerate()
            .map(move |(slot, (class, &ts))| (slot, class.as_str(), &self.tilesets[ts]))
    }

    /// Shared tile size, from the first tileset.
    pub fn tile_size(&self) -> Option<(f32, f32)> {
        self.tilesets
            .first()
            .map(|t| (t.tile_w as f32, t.tile_h as f32))
    }

    /// Tileset owning `gid` and the tile's index inside it.
    ///
    /// Maps carry a handful of tilesets, so this scans their ranges. If
    /// ranges overlap the later tileset wins.
    pub fn ts_for_gid(&self, gid: TileId) -> Option<(usize, &Tileset, u32)> {
        let clean = gid.clean();
        let idx = self.tilesets.iter().rposition(|t| t.contains(clean))?;
        let ts = &self.tilesets[idx];
        Some((idx, ts, clean - ts.first_gid))
    }

    fn slot_for_tileset(&self, ts_index: usize) -> Option<usize> {
        let class = &self.tilesets[ts_index].class;
        self.classes.iter().position(|c| c == class)
    }

    /// Append the draws for every visible layer to `out`, back to front.
    pub fn emit_draws(&self, sampling: TileSampling, out: &mut Vec<DrawCommand>) {
        let Some((tw, th)) = self.tile_size() else {
            return;
        };

        for (layer_index, layer) in self.layers.iter().enumerate() {
            if !layer.visible {
                continue;
            }
            let layer_slot = self.layer_slots[layer_index];

            for chunk in &layer.chunks {
                for y in 0..chunk.height {
                    for x in 0..chunk.width {
                        let tile = chunk.tile(x, y);
                        if tile.is_empty() {
                            continue;
                        }

                        // i64: chunk offsets may sit right at i32::MAX
                        let dest = Rect::new(
                            (i64::from(chunk.x) + i64::from(x)) as f32 * tw,
                            (i64::from(chunk.y) + i64::from(y)) as f32 * th,
                            tw,
                            th,
                        );

                        let (slot, src, flip) = match sampling {
                            TileSampling::WholeTexture => match layer_slot {
                                Some(slot) => (slot, None, TileFlip::default()),
                                None => continue,
                            },
                            TileSampling::Atlas => {
                                let Some((ts_index, ts, local)) = self.ts_for_gid(tile) else {
                                    continue;
                                };
                                match self.slot_for_tileset(ts_index) {
                                    Some(slot) => (slot, Some(ts.atlas_rect(local)), tile.flip()),
                                    None => continue,
                                }
                            }
                        };

                        out.push(DrawCommand {
                            texture: TextureRef::Class(slot),
                            layer_index: Some(layer_index),
                            src,
                            dest,
                            flip,
                        });
                    }
                }
            }
        }
    }

    /// Convenience wrapper over [`TileMap::emit_draws`].
    pub fn draw_commands(&self, sampling: TileSampling) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        self.emit_draws(sampling, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset(class: &str, first_gid: u32, tilecount: u32) -> Tileset {
        Tileset {
            first_gid,
            name: class.to_owned(),
            class: class.to_owned(),
            image: format!("{class}.png"),
            image_w: 64,
            image_h: 64,
            tile_w: 16,
            tile_h: 16,
            columns: 4,
            tilecount,
            ..Default::default()
        }
    }

    fn layer(class: &str, chunks: Vec<Chunk>) -> TileLayer {
        TileLayer {
            name: class.to_owned(),
            class: class.to_owned(),
            chunks,
            ..Default::default()
        }
    }

    fn chunk(x: i32, y: i32, width: u32, height: u32, data: Vec<u32>) -> Chunk {
        Chunk { x, y, width, height, data }
    }

    #[test]
    fn all_zero_chunk_emits_nothing() {
        let map = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer("ground", vec![chunk(0, 0, 4, 4, vec![0; 16])])],
        )
        .unwrap();
        assert!(map.draw_commands(TileSampling::WholeTexture).is_empty());
    }

    #[test]
    fn single_cell_lands_at_chunk_offset_plus_local_position() {
        let mut data = vec![0; 12];
        data[2 * 4 + 1] = 5; // local (1, 2)
        let map = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer("ground", vec![chunk(-16, 32, 4, 3, data)])],
        )
        .unwrap();

        let draws = map.draw_commands(TileSampling::WholeTexture);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].dest, Rect::new(-15.0 * 16.0, 34.0 * 16.0, 16.0, 16.0));
        assert_eq!(draws[0].src, None);
        assert_eq!(draws[0].texture, TextureRef::Class(0));
    }

    #[test]
    fn hidden_layers_are_skipped_and_order_is_declaration_order() {
        let mut hidden = layer("ground", vec![chunk(0, 0, 1, 1, vec![1])]);
        hidden.visible = false;
        let map = TileMap::new(
            vec![tileset("ground", 1, 16), tileset("trees", 17, 16)],
            vec![
                layer("ground", vec![chunk(0, 0, 2, 1, vec![1, 1])]),
                hidden,
                layer("trees", vec![chunk(0, 0, 1, 1, vec![17])]),
            ],
        )
        .unwrap();

        let draws = map.draw_commands(TileSampling::WholeTexture);
        let layers: Vec<_> = draws.iter().map(|d| d.layer_index).collect();
        assert_eq!(layers, vec![Some(0), Some(0), Some(2)]);
        assert_eq!(draws[2].texture, TextureRef::Class(1));
    }

    #[test]
    fn layer_without_matching_class_is_a_silent_gap() {
        let map = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer("water", vec![chunk(0, 0, 1, 1, vec![1])])],
        )
        .unwrap();
        assert!(map.draw_commands(TileSampling::WholeTexture).is_empty());
    }

    #[test]
    fn every_cell_uses_the_first_tileset_size() {
        let mut big = tileset("trees", 17, 4);
        big.tile_w = 32;
        big.tile_h = 48;
        let map = TileMap::new(
            vec![tileset("ground", 1, 16), big],
            vec![layer("trees", vec![chunk(1, 1, 1, 1, vec![17])])],
        )
        .unwrap();
        let draws = map.draw_commands(TileSampling::WholeTexture);
        assert_eq!(draws[0].dest, Rect::new(16.0, 16.0, 16.0, 16.0));
    }

    #[test]
    fn bad_chunk_length_is_rejected() {
        let err = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer("ground", vec![chunk(0, 0, 2, 2, vec![1, 2, 3])])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidChunk { expected: 4, actual: 3, .. }
        ));
    }

    #[test]
    fn atlas_sampling_picks_cell_by_gid() {
        let mut ts = tileset("ground", 1, 16);
        ts.margin = 1;
        ts.spacing = 2;
        let map = TileMap::new(
            vec![ts],
            vec![layer("ground", vec![chunk(0, 0, 2, 1, vec![6, 99])])],
        )
        .unwrap();

        let draws = map.draw_commands(TileSampling::Atlas);
        // gid 99 belongs to no tileset
        assert_eq!(draws.len(), 1);
        // local 5 -> col 1, row 1
        assert_eq!(draws[0].src, Some(Rect::new(19.0, 19.0, 16.0, 16.0)));
    }

    #[test]
    fn atlas_sampling_carries_flip_bits_to_the_draw() {
        let map = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer(
                "ground",
                vec![chunk(0, 0, 2, 1, vec![FLIP_H | FLIP_D | 2, FLIP_V | 3])],
            )],
        )
        .unwrap();

        let draws = map.draw_commands(TileSampling::Atlas);
        assert_eq!(draws.len(), 2);
        // flags never leak into the atlas lookup
        assert_eq!(draws[0].src, Some(Rect::new(16.0, 0.0, 16.0, 16.0)));
        assert_eq!(draws[0].flip, TileFlip { h: true, v: false, d: true });
        assert_eq!(draws[1].src, Some(Rect::new(32.0, 0.0, 16.0, 16.0)));
        assert_eq!(draws[1].flip, TileFlip { h: false, v: true, d: false });

        // whole-texture mode stretches the class image as-is
        let whole = map.draw_commands(TileSampling::WholeTexture);
        assert!(whole.iter().all(|d| d.flip == TileFlip::default()));
    }

    #[test]
    fn flip_bits_alone_are_an_empty_cell() {
        let map = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer("ground", vec![chunk(0, 0, 1, 1, vec![FLIP_H | FLIP_V])])],
        )
        .unwrap();
        assert!(map.draw_commands(TileSampling::WholeTexture).is_empty());
    }

    #[test]
    fn high_first_gid_resolves_without_a_dense_table() {
        let map = TileMap::new(
            vec![tileset("ground", 1, 16), tileset("far", 200_000_000, 1)],
            vec![layer("far", vec![chunk(0, 0, 2, 1, vec![200_000_000, 200_000_001])])],
        )
        .unwrap();

        let (idx, ts, local) = map.ts_for_gid(TileId(200_000_000)).unwrap();
        assert_eq!((idx, ts.name.as_str(), local), (1, "far", 0));
        assert!(map.ts_for_gid(TileId(200_000_001)).is_none());
        assert!(map.ts_for_gid(TileId(u32::MAX)).is_none());

        let draws = map.draw_commands(TileSampling::Atlas);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].texture, TextureRef::Class(1));
        assert_eq!(draws[0].src, Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
    }

    #[test]
    fn chunk_near_i32_max_does_not_overflow() {
        let map = TileMap::new(
            vec![tileset("ground", 1, 16)],
            vec![layer("ground", vec![chunk(i32::MAX, i32::MIN, 2, 1, vec![0, 1])])],
        )
        .unwrap();

        let draws = map.draw_commands(TileSampling::WholeTexture);
        let expected_x = (i64::from(i32::MAX) + 1) as f32 * 16.0;
        assert_eq!(draws[0].dest.x, expected_x);
        assert_eq!(draws[0].dest.y, i32::MIN as f32 * 16.0);
    }

    #[test]
    fn duplicate_classes_share_a_slot_and_last_image_wins() {
        let mut second = tileset("ground", 17, 16);
        second.image = "ground_v2.png".into();
        let map = TileMap::new(vec![tileset("ground", 1, 16), second], vec![]).unwrap();

        let sources: Vec<_> = map
            .texture_sources()
            .map(|(slot, class, ts)| (slot, class.to_owned(), ts.image.clone()))
            .collect();
        assert_eq!(sources, vec![(0, "ground".to_owned(), "ground_v2.png".to_owned())]);
    }

    #[test]
    fn no_tilesets_draws_nothing() {
        let map = TileMap::new(
            vec![],
            vec![layer("ground", vec![chunk(0, 0, 1, 1, vec![1])])],
        )
        .unwrap();
        assert!(map.tile_size().is_none());
        assert!(map.draw_commands(TileSampling::WholeTexture).is_empty());
    }
}
