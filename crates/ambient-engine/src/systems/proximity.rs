//! Proximity graph: which particle pairs are close enough to draw an edge.
//!
//! Rebuilt from scratch every frame. Two builders produce the same set of
//! pairs with the same cached distances; the grid one only changes how
//! candidates are found.

use std::collections::HashMap;

use glam::Vec2;

use crate::components::particle::Particle;

/// Above this many particles the uniform grid replaces the pairwise scan.
pub const GRID_THRESHOLD: usize = 400;

/// An edge between two pool indices, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// Fill `out` with every pair whose distance is `<= threshold`.
pub fn build_connections(particles: &[Particle], threshold: f32, out: &mut Vec<Connection>) {
    if particles.len() > GRID_THRESHOLD {
        build_grid(particles, threshold, out);
    } else {
        build_pairwise(particles, threshold, out);
    }
}

/// O(n²) scan over all unordered pairs.
pub fn build_pairwise(particles: &[Particle], threshold: f32, out: &mut Vec<Connection>) {
    out.clear();
    for (a, pa) in particles.iter().enumerate() {
        for (offset, pb) in particles[a + 1..].iter().enumerate() {
            push_if_close(out, a, a + 1 + offset, pa.pos, pb.pos, threshold);
        }
    }
}

/// Uniform grid with cells `threshold` wide; each particle is tested against
/// its own and the eight surrounding cells.
pub fn build_grid(particles: &[Particle], threshold: f32, out: &mut Vec<Connection>) {
    out.clear();
    if threshold <= 0.0 || !threshold.is_finite() {
        return build_pairwise(particles, threshold, out);
    }

    let cell_of = |pos: Vec2| -> (i32, i32) {
        ((pos.x / threshold).floor() as i32, (pos.y / threshold).floor() as i32)
    };

    let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::with_capacity(particles.len());
    for (i, p) in particles.iter().enumerate() {
        cells.entry(cell_of(p.pos)).or_default().push(i);
    }

    for (a, pa) in particles.iter().enumerate() {
        let (cx, cy) = cell_of(pa.pos);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &b in bucket.iter().filter(|&&b| b > a) {
                    push_if_close(out, a, b, pa.pos, particles[b].pos, threshold);
                }
            }
        }
    }
}

#[inline]
fn push_if_close(out: &mut Vec<Connection>, a: usize, b: usize, pa: Vec2, pb: Vec2, threshold: f32) {
    let distance = pa.distance(pb);
    if distance <= threshold {
        out.push(Connection { a, b, distance });
    }
}
