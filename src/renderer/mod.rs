//! Renderer — the pure rasterizer.
//!
//! Takes a raster, the engine's current transform, and a panel contract and
//! produces the panel's pixel grid. Stateless and deterministic: the same
//! inputs always produce the same pixels. It knows nothing about timers,
//! terminals, or the step sequence.
//!
//! The animation steps are authored in y-up semantics, while the panel grid
//! has its origin at the top-left with y growing downward. The paint
//! transform therefore moves the origin to the panel center, flips the
//! vertical axis before composing the animation transform, and flips it
//! again afterwards so images keep their expected shape on screen. The two
//! flips would cancel algebraically, but collapsing them would mirror the
//! apparent rotation direction, so they are kept as authored.

use crate::affine::Affine;
use crate::types::{PanelContract, Raster, Rgb};

/// Color painted where no raster pixel lands.
pub const BACKGROUND: Rgb = Rgb::WHITE;

pub struct Renderer;

impl Renderer {
    /// Paint `raster` through `transform` onto a `contract`-sized grid.
    ///
    /// Device pixels are sampled at their centers through the inverse of
    /// the full paint transform; pixels that miss the raster get the
    /// background color. An empty raster or contract paints nothing.
    pub fn paint(raster: &Raster, transform: Affine, contract: PanelContract) -> Vec<Vec<Rgb>> {
        let mut grid =
            vec![vec![BACKGROUND; contract.width as usize]; contract.height as usize];
        if raster.is_empty() {
            return grid;
        }

        // Anchor the raster's own center at the transformed origin, using
        // integer half-extents so odd sizes keep a true center pixel.
        let half_w = (raster.width() / 2) as f64;
        let half_h = (raster.height() / 2) as f64;

        let flip = Affine::scale(1.0, -1.0)
            * Affine::translation(0.0, -(raster.height() as f64));
        let center = Affine::translation(
            contract.width as f64 / 2.0,
            contract.height as f64 / 2.0,
        );
        let composite =
            center * flip * transform * flip * Affine::translation(-half_w, -half_h);

        // Degenerate transforms (not produced by any step table) paint
        // nothing rather than failing.
        let Some(inverse) = composite.inverse() else {
            return grid;
        };

        for (py, row) in grid.iter_mut().enumerate() {
            for (px, cell) in row.iter_mut().enumerate() {
                let (sx, sy) = inverse.apply(px as f64 + 0.5, py as f64 + 0.5);
                let (u, v) = (sx.floor(), sy.floor());
                if u >= 0.0 && v >= 0.0 {
                    if let Some(color) = raster.get(u as u32, v as u32) {
                        *cell = color;
                    }
                }
            }
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: PanelContract = PanelContract {
        width: 41,
        height: 41,
    };

    /// 11×11 white raster with one red pixel at the middle of the right edge.
    fn marker_raster() -> Raster {
        let mut r = Raster::filled(11, 11, Rgb::WHITE);
        r.set(10, 5, Rgb::RED);
        r
    }

    fn find_red(grid: &[Vec<Rgb>]) -> Vec<(usize, usize)> {
        let mut hits = Vec::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c == Rgb::RED {
                    hits.push((x, y));
                }
            }
        }
        hits
    }

    #[test]
    fn paint_is_pure() {
        let raster = marker_raster();
        let transform = Affine::translation(-5.0, 7.0) * Affine::rotation(0.3);
        let first = Renderer::paint(&raster, transform, CONTRACT);
        let second = Renderer::paint(&raster, transform, CONTRACT);
        assert_eq!(first, second);
    }

    #[test]
    fn identity_centers_the_raster_unflipped() {
        let grid = Renderer::paint(&marker_raster(), Affine::IDENTITY, CONTRACT);
        // Raster (0,0) lands at device (15,15), so (10,5) lands at (25,20).
        assert_eq!(find_red(&grid), vec![(25, 20)]);
        assert_eq!(grid[15][15], Rgb::WHITE);
        assert_eq!(grid[14][15], BACKGROUND);
        assert_eq!(grid[14][14], BACKGROUND);
    }

    #[test]
    fn positive_y_translation_moves_pixels_up() {
        let grid = Renderer::paint(
            &marker_raster(),
            Affine::translation(0.0, 7.0),
            CONTRACT,
        );
        // Same column as the identity placement, seven device rows higher.
        assert_eq!(find_red(&grid), vec![(25, 13)]);
    }

    #[test]
    fn quarter_turn_counterclockwise_on_screen() {
        let grid = Renderer::paint(
            &marker_raster(),
            Affine::rotation(std::f64::consts::FRAC_PI_2),
            CONTRACT,
        );
        // The right-edge marker swings above the (translated) image center:
        // with the double-flip correction the visual direction matches the
        // y-up authoring direction.
        assert_eq!(find_red(&grid), vec![(10, 25)]);
    }

    #[test]
    fn empty_raster_paints_background_only() {
        let raster = Raster::filled(0, 0, Rgb::WHITE);
        let grid = Renderer::paint(&raster, Affine::IDENTITY, CONTRACT);
        assert!(grid.iter().flatten().all(|&c| c == BACKGROUND));
    }

    #[test]
    fn degenerate_transform_paints_background_only() {
        let grid = Renderer::paint(
            &marker_raster(),
            Affine::scale(0.0, 0.0),
            CONTRACT,
        );
        assert!(grid.iter().flatten().all(|&c| c == BACKGROUND));
    }

    #[test]
    fn double_scale_covers_two_device_pixels_per_raster_pixel() {
        let grid = Renderer::paint(
            &marker_raster(),
            Affine::scale(2.0, 1.0),
            CONTRACT,
        );
        let hits = find_red(&grid);
        assert_eq!(hits.len(), 2);
        // Both hits share a row; the columns are adjacent.
        assert_eq!(hits[0].1, hits[1].1);
        assert_eq!(hits[1].0, hits[0].0 + 1);
    }
}
