//! Tile-map levels.
//!
//! A [`Level`] is built from one or more [`Tilesheet`]s and a stack of
//! [`Layer`]s. Sheets are cut into a tileset, in sheet order, each sheet
//! read left to right and top to bottom. A layer maps every map cell to a
//! tileset entry, 1-based; 0 leaves the cell empty.

use engine_math::{Point, SpaceComponent, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::render::{DrawCall, Region, RenderBatch, Texture};

/// A texture cut into equally sized tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tilesheet {
    /// The sheet's image.
    pub texture: Texture,
    /// Global id of the sheet's first tile in the map file.
    pub first_gid: u32,
}

/// One layer of the map, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name, used in logs.
    pub name: String,
    /// One global tile id per cell; 0 marks an empty cell.
    pub tile_mapping: Vec<u32>,
}

/// A placed tile. Empty cells carry no region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Top-left corner in level pixels.
    pub position: Point,
    /// Part of a sheet to draw.
    pub region: Option<Region>,
}

/// A built tile map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile size in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    /// One entry per map cell per layer, layer by layer.
    pub tiles: Vec<Tile>,
    /// Free-standing images, drawn at their own position.
    pub images: Vec<Tile>,
}

/// The `index`th tile of a sheet, counting right then down.
///
/// Returns `None` when the tile size is zero.
#[must_use]
pub fn region_from_sheet(texture: &Texture, tile_width: u32, tile_height: u32, index: u32) -> Option<Region> {
    if tile_width == 0 || tile_height == 0 {
        return None;
    }
    let columns = texture.width / tile_width;
    if columns == 0 {
        return None;
    }
    Some(Region {
        texture: texture.id,
        x: (index % columns) * tile_width,
        y: (index / columns) * tile_height,
        width: tile_width,
        height: tile_height,
    })
}

impl Level {
    /// Cut `sheets` into a tileset and lay out every layer.
    #[must_use]
    pub fn build(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        sheets: &[Tilesheet],
        layers: &[Layer],
    ) -> Self {
        let tileset = Self::tileset(tile_width, tile_height, sheets);
        let cells = (width as usize) * (height as usize);
        let mut tiles = Vec::with_capacity(cells * layers.len());

        for layer in layers {
            if layer.tile_mapping.len() < cells {
                warn!(
                    layer = %layer.name,
                    expected = cells,
                    actual = layer.tile_mapping.len(),
                    "layer is shorter than the map; missing cells are empty"
                );
            }
            for y in 0..height {
                for x in 0..width {
                    let cell = (x + y * width) as usize;
                    let gid = layer.tile_mapping.get(cell).copied().unwrap_or(0);
                    let region = match gid.checked_sub(1) {
                        None => None,
                        Some(index) => {
                            let region = tileset.get(index as usize).copied();
                            if region.is_none() {
                                warn!(layer = %layer.name, x, y, gid, "tile index out of range");
                            }
                            region
                        }
                    };
                    tiles.push(Tile {
                        position: Vec2::new((x * tile_width) as f32, (y * tile_height) as f32),
                        region,
                    });
                }
            }
        }

        debug!(
            width,
            height,
            layers = layers.len(),
            tileset = tileset.len(),
            "level built"
        );
        Self {
            width,
            height,
            tile_width,
            tile_height,
            tiles,
            images: Vec::new(),
        }
    }

    /// Every tile of every sheet, in order.
    #[must_use]
    pub fn tileset(tile_width: u32, tile_height: u32, sheets: &[Tilesheet]) -> Vec<Region> {
        if tile_width == 0 || tile_height == 0 {
            warn!(tile_width, tile_height, "zero tile size; tileset is empty");
            return Vec::new();
        }
        sheets
            .iter()
            .flat_map(|sheet| {
                let texture = sheet.texture;
                let count = (texture.width / tile_width) * (texture.height / tile_height);
                (0..count).filter_map(move |index| region_from_sheet(&texture, tile_width, tile_height, index))
            })
            .collect()
    }

    /// Draw images at their own position and tiles offset by `space`.
    pub fn render(&self, batch: &mut impl RenderBatch, space: &SpaceComponent) {
        for image in &self.images {
            if let Some(region) = image.region {
                batch.draw(DrawCall::at(region, image.position));
            }
        }
        for tile in &self.tiles {
            if let Some(region) = tile.region {
                batch.draw(DrawCall::at(region, tile.position + space.position));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextureId;

    fn sheet(id: u32, width: u32, height: u32) -> Tilesheet {
        Tilesheet {
            texture: Texture {
                id: TextureId(id),
                width,
                height,
            },
            first_gid: 1,
        }
    }

    fn layer(mapping: &[u32]) -> Layer {
        Layer {
            name: "ground".into(),
            tile_mapping: mapping.to_vec(),
        }
    }

    #[test]
    fn test_region_from_sheet_counts_right_then_down() {
        let texture = sheet(1, 64, 32).texture;
        let region = region_from_sheet(&texture, 16, 16, 5).unwrap();
        assert_eq!((region.x, region.y), (16, 16));
        assert_eq!((region.width, region.height), (16, 16));
        assert!(region_from_sheet(&texture, 0, 16, 0).is_none());
    }

    #[test]
    fn test_tileset_spans_sheets_in_order() {
        let tileset = Level::tileset(16, 16, &[sheet(1, 32, 16), sheet(2, 16, 32)]);
        let ids: Vec<_> = tileset.iter().map(|r| (r.texture.0, r.x, r.y)).collect();
        assert_eq!(ids, vec![(1, 0, 0), (1, 16, 0), (2, 0, 0), (2, 0, 16)]);
    }

    #[test]
    fn test_build_maps_cells_to_tiles() {
        let level = Level::build(2, 2, 16, 16, &[sheet(1, 32, 32)], &[layer(&[1, 0, 4, 2])]);
        assert_eq!(level.tiles.len(), 4);
        assert_eq!(level.tiles[0].region.map(|r| (r.x, r.y)), Some((0, 0)));
        assert_eq!(level.tiles[1].region, None);
        assert_eq!(level.tiles[2].region.map(|r| (r.x, r.y)), Some((16, 16)));
        assert_eq!(level.tiles[2].position, Vec2::new(0.0, 16.0));
        assert_eq!(level.tiles[3].position, Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_out_of_range_and_short_layers_are_empty() {
        let level = Level::build(2, 1, 16, 16, &[sheet(1, 16, 16)], &[layer(&[9])]);
        assert_eq!(level.tiles.len(), 2);
        assert!(level.tiles.iter().all(|tile| tile.region.is_none()));
    }

    #[test]
    fn test_layers_stack() {
        let level = Level::build(1, 1, 16, 16, &[sheet(1, 16, 16)], &[layer(&[1]), layer(&[0])]);
        assert_eq!(level.tiles.len(), 2);
        assert!(level.tiles[0].region.is_some());
        assert!(level.tiles[1].region.is_none());
    }

    #[test]
    fn test_render_offsets_tiles_not_images() {
        let mut level = Level::build(2, 1, 16, 16, &[sheet(1, 16, 16)], &[layer(&[0, 1])]);
        let region = level.tiles[1].region.unwrap();
        level.images.push(Tile {
            position: Vec2::new(3.0, 4.0),
            region: Some(region),
        });

        let mut batch: Vec<DrawCall> = Vec::new();
        level.render(&mut batch, &SpaceComponent::new(Vec2::new(100.0, 50.0), 32.0, 16.0));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].position, Vec2::new(3.0, 4.0));
        assert_eq!(batch[1].position, Vec2::new(116.0, 50.0));
        assert_eq!(batch[1].scale, Vec2::ONE);
        assert_eq!(batch[1].tint, 0xff_ffff);
        assert_eq!(batch[1].alpha, 1.0);
    }
}
