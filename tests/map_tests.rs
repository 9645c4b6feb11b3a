// tests/map_tests.rs

use lost_jungle::{decode_map_str, encode_map, TextureRef, TileSampling};
use macroquad::prelude::Rect;

const ONE_TILE: &str = r#"
{
  "tilesets": [
    { "columns": 1, "firstgid": 1, "image": "ground.png", "imageheight": 16, "imagewidth": 16,
      "margin": 0, "name": "Ground", "class": "ground", "spacing": 0, "tilecount": 1,
      "tileheight": 16, "tilewidth": 16 }
  ],
  "layers": [
    { "chunks": [ { "data": [1, 0], "height": 1, "width": 2, "x": 0, "y": 0 } ],
      "height": 1, "id": 1, "name": "Ground", "class": "ground", "width": 2,
      "x": 0, "y": 0, "startx": 0, "starty": 0, "visible": true, "opacity": 1.0 }
  ]
}
"#;

#[test]
fn one_nonzero_cell_gives_one_draw() {
    let map = decode_map_str(ONE_TILE).expect("map should decode");
    let draws = map.draw_commands(TileSampling::WholeTexture);

    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].dest, Rect::new(0.0, 0.0, 16.0, 16.0));
    assert_eq!(draws[0].texture, TextureRef::Class(0));
    assert_eq!(map.texture_classes(), ["ground".to_owned()]);
}

const TWO_LAYERS: &str = r#"
{
  "tilesets": [
    { "firstgid": 1, "class": "ground", "image": "g.png", "tilecount": 4, "columns": 2,
      "tileheight": 8, "tilewidth": 8 },
    { "firstgid": 5, "class": "trees", "image": "t.png", "tilecount": 4, "columns": 2,
      "tileheight": 8, "tilewidth": 8 }
  ],
  "layers": [
    { "name": "below", "class": "ground",
      "chunks": [ { "data": [1, 1, 1, 1], "height": 2, "width": 2, "x": -2, "y": -2 } ] },
    { "name": "above", "class": "trees",
      "chunks": [ { "data": [0, 6, 0, 0], "height": 2, "width": 2, "x": 16, "y": 0 } ] }
  ]
}
"#;

#[test]
fn later_layers_draw_after_earlier_ones() {
    let map = decode_map_str(TWO_LAYERS).unwrap();
    let draws = map.draw_commands(TileSampling::WholeTexture);

    assert_eq!(draws.len(), 5);
    assert!(draws[..4].iter().all(|d| d.texture == TextureRef::Class(0)));
    assert_eq!(draws[4].texture, TextureRef::Class(1));
    assert_eq!(draws[4].dest, Rect::new(17.0 * 8.0, 0.0, 8.0, 8.0));
    // negative chunk offsets
    assert_eq!(draws[0].dest, Rect::new(-16.0, -16.0, 8.0, 8.0));
}

#[test]
fn atlas_sampling_uses_owning_tileset() {
    let map = decode_map_str(TWO_LAYERS).unwrap();
    let draws = map.draw_commands(TileSampling::Atlas);

    let tree = draws.last().unwrap();
    assert_eq!(tree.texture, TextureRef::Class(1));
    assert_eq!(tree.src, Some(Rect::new(8.0, 0.0, 8.0, 8.0)));
}

#[test]
fn reencoded_map_keeps_chunk_data() {
    let map = decode_map_str(TWO_LAYERS).unwrap();
    let again = decode_map_str(&encode_map(&map).unwrap()).unwrap();

    for (a, b) in map.layers().iter().zip(again.layers()) {
        assert_eq!(a.chunks.len(), b.chunks.len());
        for (ca, cb) in a.chunks.iter().zip(&b.chunks) {
            assert_eq!(ca.data, cb.data);
        }
    }
}

const JSON_WITH_EXTRA: &str = r#"
{
  "infinite": true,
  "dummyField": "ignored",
  "tilesets": [ { "firstgid": 1, "tilewidth": 8, "tileheight": 8, "wangsets": [] } ],
  "layers": [ { "name": "L", "type": "tilelayer", "chunks": [], "properties": [] } ]
}
"#;

#[test]
fn load_ignores_extra_fields() {
    let map = decode_map_str(JSON_WITH_EXTRA).expect("Should ignore unknown fields");
    assert_eq!(map.layers()[0].name, "L");
    assert!(map.layers()[0].chunks.is_empty());
}

const BAD_CHUNK: &str = r#"
{
  "tilesets": [ { "firstgid": 1, "tilewidth": 8, "tileheight": 8 } ],
  "layers": [ { "name": "oops", "chunks": [ { "data": [1,2,3], "height": 2, "width": 2, "x": 0, "y": 0 } ] } ]
}
"#;

#[test]
fn error_on_chunk_size_mismatch() {
    let err = decode_map_str(BAD_CHUNK).unwrap_err();
    assert!(matches!(err, lost_jungle::GameError::InvalidChunk { layer, .. } if layer == "oops"));
}
