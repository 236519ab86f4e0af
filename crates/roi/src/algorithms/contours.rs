use image::{GrayImage, imageops};
use imageproc::contours::{find_contours, BorderType};
use crate::{error::Result, traits::ContourTracer, types::Contour};

/// Suzuki-Abe border following over 8-connected foreground regions.
///
/// Only outermost borders are kept: hole borders and the outer borders of
/// islands nested inside holes are discarded. Every contour is compressed to
/// the end points of its straight runs, starts at the topmost-then-leftmost
/// pixel of the region and runs down the left side first (clockwise with the
/// y axis pointing up). Regions touching the image border are traced like
/// any other region.
#[derive(Debug, Clone, Default)]
pub struct BorderFollowingTracer;

impl ContourTracer for BorderFollowingTracer {
    fn trace(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        // Border following never starts in column 0, so trace inside a one
        // pixel background frame and shift the points back.
        let mut framed = GrayImage::new(binary_image.width() + 2, binary_image.height() + 2);
        imageops::replace(&mut framed, binary_image, 1, 1);

        let contours = find_contours::<i32>(&framed)
            .into_iter()
            .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
            .map(|contour| {
                let pixels: Contour = contour.points.iter().map(|p| [p.x - 1, p.y - 1]).collect();
                canonical_orientation(simplify_chain(&pixels))
            })
            .collect();

        Ok(contours)
    }
}

/// Drop repeated pixels and every pixel lying inside a straight
/// horizontal, vertical or diagonal run of a closed chain.
pub fn simplify_chain(pixels: &[[i32; 2]]) -> Contour {
    let mut chain: Contour = Vec::with_capacity(pixels.len());
    for &p in pixels {
        if chain.last() != Some(&p) {
            chain.push(p);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }
    if chain.len() < 3 {
        return chain;
    }

    let n = chain.len();
    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let curr = chain[i];
            let next = chain[(i + 1) % n];
            step(prev, curr) != step(curr, next)
        })
        .map(|i| chain[i])
        .collect()
}

fn step(from: [i32; 2], to: [i32; 2]) -> [i32; 2] {
    [(to[0] - from[0]).signum(), (to[1] - from[1]).signum()]
}

/// Twice the signed shoelace area of an open ring of pixel coordinates.
fn signed_area2(ring: &[[i32; 2]]) -> i64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let [x0, y0] = ring[i];
            let [x1, y1] = ring[(i + 1) % n];
            i64::from(x0) * i64::from(y1) - i64::from(x1) * i64::from(y0)
        })
        .sum()
}

/// Rotate the ring to start at its topmost-then-leftmost vertex and reverse
/// it if it winds with positive signed area in image coordinates.
fn canonical_orientation(mut ring: Contour) -> Contour {
    let Some(start) = ring
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p[1], p[0]))
        .map(|(i, _)| i)
    else {
        return ring;
    };
    ring.rotate_left(start);
    if signed_area2(&ring) > 0 {
        ring[1..].reverse();
    }
    ring
}
