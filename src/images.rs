//! The three displayed images, each built by a pure generator.
//!
//! Builders take the configured size and return a finished `Raster`; nothing
//! here depends on time, randomness, or external state, so the same size
//! always produces the same pixels.

use crate::types::{Raster, Rgb};

/// Four-color flag: a white cross dividing the image into green (top-left),
/// red (top-right), blue (bottom-left), and yellow (bottom-right) quarters.
pub fn flag(size: u32) -> Raster {
    let mut raster = Raster::filled(size, size, Rgb::WHITE);
    let mid = size / 2;

    for y in 0..size {
        for x in 0..size {
            if x == mid || y == mid {
                continue; // the cross stays white
            }
            let color = match (x < mid, y < mid) {
                (true, true) => Rgb::GREEN,
                (false, true) => Rgb::RED,
                (true, false) => Rgb::BLUE,
                (false, false) => Rgb::YELLOW,
            };
            raster.set(x, y, color);
        }
    }

    raster
}

/// Blue right triangle on a white field, hypotenuse from the bottom-left
/// corner to the top-right corner, filled toward the bottom-right.
pub fn triangle(size: u32) -> Raster {
    let mut raster = Raster::filled(size, size, Rgb::WHITE);

    for y in 0..size {
        for x in 0..size {
            if x + y + 1 >= size {
                raster.set(x, y, Rgb::BLUE);
            }
        }
    }

    raster
}

/// Letter Z: black top and bottom bars joined by a gray diagonal on a white
/// field. The diagonal runs from the top-right corner to the bottom-left.
pub fn letter_z(size: u32) -> Raster {
    let mut raster = Raster::filled(size, size, Rgb::WHITE);

    for y in 0..size {
        for x in 0..size {
            if x + y + 1 == size {
                raster.set(x, y, Rgb::GRAY);
            } else if y == 0 || y + 1 == size {
                raster.set(x, y, Rgb::BLACK);
            }
        }
    }

    raster
}
