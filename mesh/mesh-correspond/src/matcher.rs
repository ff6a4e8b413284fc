//! Two-phase vertex matching.

use kiddo::{KdTree, SquaredEuclidean};
use mesh_types::{IndexedMesh, Point3};
use rayon::prelude::*;
use tracing::debug;

use crate::correspondence::{Correspondence, MatchGroup};
use crate::error::{MatchError, MatchResult, MeshSide};
use crate::params::{MatchParams, NearestSearch};

/// Large-mesh row count above which distance rows are filled in parallel.
const PARALLEL_ROWS: usize = 1000;

/// Leaf bucket size of [`KdTree`]. A bucket whose items all share the split
/// coordinate cannot be split, so the tree needs fewer coincident values
/// than this on every axis.
const KD_BUCKET_SIZE: usize = 32;

/// Match the vertices of two point sets.
///
/// The larger set (the first one on equal sizes) is distributed over the
/// vertices of the smaller one:
///
/// 1. The globally closest remaining (large, small) pair is matched, and
///    both vertices are retired. This repeats once per small vertex, so
///    every small vertex receives at least one member. Ties go to the pair
///    found first scanning large vertices in the outer loop and small
///    vertices in the inner loop.
/// 2. Each large vertex left over joins the group of its nearest small
///    vertex. Small vertices may collect many members here.
///
/// The result does not depend on argument order.
///
/// With [`NearestSearch::KdTree`], phase 2 queries a k-d tree instead of
/// scanning the distance table. Which of several equidistant small vertices
/// wins is then unspecified. Small sets with 32 or more vertices sharing a
/// coordinate on one axis (flat grids, duplicated seams) use the scan.
///
/// # Errors
///
/// Returns [`MatchError::EmptyMesh`] if either set is empty and
/// [`MatchError::NonFinitePosition`] if a coordinate is NaN or infinite.
///
/// # Examples
///
/// ```
/// use mesh_correspond::{match_vertices, MatchParams};
/// use mesh_types::Point3;
///
/// let small = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
/// let large = [
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 1.0),
/// ];
///
/// let c = match_vertices(&small, &large, &MatchParams::default())?;
/// assert_eq!(c.groups[0].slots, vec![0]);
/// assert_eq!(c.groups[1].slots, vec![1, 2]);
/// # Ok::<(), mesh_correspond::MatchError>(())
/// ```
pub fn match_vertices(
    a: &[Point3<f64>],
    b: &[Point3<f64>],
    params: &MatchParams,
) -> MatchResult<Correspondence> {
    check_points(a, MeshSide::First)?;
    check_points(b, MeshSide::Second)?;

    let (large, small, large_side) = if a.len() >= b.len() {
        (a, b, MeshSide::First)
    } else {
        (b, a, MeshSide::Second)
    };

    debug!(
        "Matching {} large vertices onto {} small vertices",
        large.len(),
        small.len()
    );

    let distances = DistanceMatrix::new(large, small);
    let mut groups: Vec<MatchGroup> = small
        .iter()
        .enumerate()
        .map(|(l, p)| MatchGroup::new(*p, l))
        .collect();

    let consumed = match_closest_pairs(&distances, large, &mut groups);
    let leftover = large.len() - small.len();

    match params.nearest {
        NearestSearch::KdTree if !fits_kdtree(small) => {
            debug!("Too many coincident coordinates for a k-d tree, scanning rows");
            attach_by_rows(&distances, large, &consumed, &mut groups);
        }
        NearestSearch::BruteForce => attach_by_rows(&distances, large, &consumed, &mut groups),
        NearestSearch::KdTree => {
            let tree = build_kdtree(small);
            for h in (0..large.len()).filter(|&h| !consumed[h]) {
                let p = &large[h];
                let nearest = tree.nearest_one::<SquaredEuclidean>(&[p.x, p.y, p.z]);
                #[allow(clippy::cast_possible_truncation)]
                let l = nearest.item as usize;
                groups[l].push(large[h], h);
            }
        }
    }

    debug!(
        "Matched {} pairs, attached {} remaining vertices",
        small.len(),
        leftover
    );

    Ok(Correspondence {
        groups,
        large_vertex_count: large.len(),
        large_side,
    })
}

/// Match the vertices of two meshes by position.
///
/// Only vertex positions take part; faces are ignored.
///
/// # Errors
///
/// See [`match_vertices`].
pub fn match_meshes(
    a: &IndexedMesh,
    b: &IndexedMesh,
    params: &MatchParams,
) -> MatchResult<Correspondence> {
    match_vertices(&a.positions(), &b.positions(), params)
}

fn check_points(points: &[Point3<f64>], side: MeshSide) -> MatchResult<()> {
    if points.is_empty() {
        return Err(MatchError::EmptyMesh { side });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        return Err(MatchError::NonFinitePosition { side, index });
    }
    Ok(())
}

/// Dense row-major `large × small` distance table.
struct DistanceMatrix {
    values: Vec<f64>,
    cols: usize,
}

impl DistanceMatrix {
    fn new(large: &[Point3<f64>], small: &[Point3<f64>]) -> Self {
        let cols = small.len();
        let mut values = vec![0.0; large.len() * cols];

        let fill = |(h, row): (usize, &mut [f64])| {
            for (d, p) in row.iter_mut().zip(small) {
                *d = (large[h] - p).norm();
            }
        };

        // Fill rows in parallel for large meshes
        if large.len() > PARALLEL_ROWS {
            values.par_chunks_mut(cols).enumerate().for_each(fill);
        } else {
            values.chunks_mut(cols).enumerate().for_each(fill);
        }

        Self { values, cols }
    }

    fn get(&self, h: usize, l: usize) -> f64 {
        self.values[h * self.cols + l]
    }

    /// First small index with the smallest distance in row `h`.
    fn nearest_in_row(&self, h: usize) -> usize {
        let row = &self.values[h * self.cols..(h + 1) * self.cols];
        let mut best = 0;
        for (l, &d) in row.iter().enumerate().skip(1) {
            if d < row[best] {
                best = l;
            }
        }
        best
    }
}

/// Greedy global-minimum pairing. Returns which large vertices were used.
///
/// Retired rows and columns are skipped rather than overwritten, which is the
/// same as setting them to infinity.
fn match_closest_pairs(
    distances: &DistanceMatrix,
    large: &[Point3<f64>],
    groups: &mut [MatchGroup],
) -> Vec<bool> {
    let mut row_used = vec![false; large.len()];
    let mut col_used = vec![false; groups.len()];

    for _ in 0..groups.len() {
        let mut best: Option<(f64, usize, usize)> = None;
        for h in (0..large.len()).filter(|&h| !row_used[h]) {
            for l in (0..groups.len()).filter(|&l| !col_used[l]) {
                let d = distances.get(h, l);
                if best.is_none_or(|(min, _, _)| d < min) {
                    best = Some((d, h, l));
                }
            }
        }

        // The large side has at least as many rows as there are columns
        let Some((_, h, l)) = best else { break };
        groups[l].push(large[h], h);
        row_used[h] = true;
        col_used[l] = true;
    }

    row_used
}

/// Attach leftover rows to the lowest-index nearest column.
fn attach_by_rows(
    distances: &DistanceMatrix,
    large: &[Point3<f64>],
    consumed: &[bool],
    groups: &mut [MatchGroup],
) {
    for h in (0..large.len()).filter(|&h| !consumed[h]) {
        let l = distances.nearest_in_row(h);
        groups[l].push(large[h], h);
    }
}

/// Whether every axis has fewer than [`KD_BUCKET_SIZE`] equal coordinates.
fn fits_kdtree(points: &[Point3<f64>]) -> bool {
    if points.len() < KD_BUCKET_SIZE {
        return true;
    }
    (0..3).all(|axis| {
        let mut values: Vec<f64> = points.iter().map(|p| p[axis]).collect();
        values.sort_unstable_by(f64::total_cmp);
        // -0.0 and 0.0 sort next to each other and compare equal
        values.chunk_by(|a, b| a == b).all(|run| run.len() < KD_BUCKET_SIZE)
    })
}

fn build_kdtree(points: &[Point3<f64>]) -> KdTree<f64, 3> {
    let mut tree: KdTree<f64, 3> = KdTree::new();
    for (i, p) in points.iter().enumerate() {
        tree.add(&[p.x, p.y, p.z], i as u64);
    }
    tree
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small() -> Vec<Point3<f64>> {
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)]
    }

    fn large() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
        ]
    }

    fn grid(n: usize, spacing: f64, offset: f64) -> Vec<Point3<f64>> {
        let mut points = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                #[allow(clippy::cast_precision_loss)]
                points.push(Point3::new(
                    i as f64 * spacing + offset,
                    0.0,
                    j as f64 * spacing + offset,
                ));
            }
        }
        points
    }

    #[test]
    fn test_small_and_large_example() {
        let c = match_vertices(&small(), &large(), &MatchParams::default()).unwrap();

        assert_eq!(c.large_side(), MeshSide::Second);
        assert_eq!(c.large_vertex_count(), 3);
        assert_eq!(c.group_count(), 2);

        assert_eq!(c.groups[0].parent_index, 0);
        assert_eq!(c.groups[0].slots, vec![0]);
        assert_relative_eq!(c.groups[0].members[0], Point3::new(0.0, 0.0, 1.0));

        // (1,0,0) and (2,0,1) tie for (2,0,0); the lower row wins phase 1
        assert_eq!(c.groups[1].slots, vec![1, 2]);
        assert_relative_eq!(c.groups[1].parent, Point3::new(2.0, 0.0, 0.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_argument_order_does_not_matter() {
        let forward = match_vertices(&small(), &large(), &MatchParams::default()).unwrap();
        let reversed = match_vertices(&large(), &small(), &MatchParams::default()).unwrap();

        assert_eq!(forward.groups, reversed.groups);
        assert_eq!(reversed.large_side(), MeshSide::First);
    }

    #[test]
    fn test_equal_sizes_first_is_large() {
        let a = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)];
        let b = vec![Point3::new(5.0, 0.0, 1.0), Point3::new(0.0, 0.0, 1.0)];
        let c = match_vertices(&a, &b, &MatchParams::default()).unwrap();

        assert_eq!(c.large_side(), MeshSide::First);
        // Groups follow b, each with exactly one member of a
        assert_eq!(c.groups[0].slots, vec![1]);
        assert_eq!(c.groups[1].slots, vec![0]);
        assert_eq!(c.max_group_size(), 1);
    }

    #[test]
    fn test_scan_order_breaks_exact_ties() {
        // Every large vertex is equidistant from both small vertices
        let small = vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let large = vec![
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let c = match_vertices(&small, &large, &MatchParams::default()).unwrap();

        // Phase 1: (row 0, col 0) then (row 1, col 1); phase 2: row 2 → col 0
        assert_eq!(c.groups[0].slots, vec![0, 2]);
        assert_eq!(c.groups[1].slots, vec![1]);
    }

    #[test]
    fn test_leftovers_are_not_rebalanced() {
        // All leftover vertices cluster around the first small vertex; the
        // second keeps only its phase-1 partner
        let small = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)];
        let large = vec![
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(0.2, 0.0, 0.0),
            Point3::new(0.3, 0.0, 0.0),
            Point3::new(0.4, 0.0, 0.0),
        ];
        let c = match_vertices(&small, &large, &MatchParams::default()).unwrap();

        // Phase 1 pairs slot 0 with small 0, then the closest remaining pair
        // for small 1 is slot 3
        assert_eq!(c.groups[1].slots, vec![3]);
        assert_eq!(c.groups[0].slots, vec![0, 1, 2]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_every_slot_covered_once() {
        let small = grid(5, 1.0, 0.1);
        let large = grid(12, 0.4, 0.0);
        let c = match_vertices(&small, &large, &MatchParams::default()).unwrap();

        assert_eq!(c.group_count(), 25);
        assert!(c.validate().is_ok());
        assert!(c.groups.iter().all(|g| !g.is_empty()));
        let total: usize = c.groups.iter().map(MatchGroup::len).sum();
        assert_eq!(total, 144);
    }

    #[test]
    fn test_single_small_vertex_takes_everything() {
        let small = vec![Point3::new(0.0, 0.0, 0.0)];
        let c = match_vertices(&small, &large(), &MatchParams::default()).unwrap();
        assert_eq!(c.groups[0].len(), 3);
        // Phase-1 partner first, then the rest in index order
        assert_eq!(c.groups[0].slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_kd_tree_matches_brute_force_without_ties() {
        let small = grid(4, 1.0, 0.13);
        let large = grid(9, 0.37, 0.0);

        let brute = match_vertices(&small, &large, &MatchParams::default()).unwrap();
        let tree = match_vertices(&small, &large, &MatchParams::kd_tree()).unwrap();

        assert!(tree.validate().is_ok());
        assert_eq!(brute.slot_parents(), tree.slot_parents());
    }

    #[test]
    fn test_kd_tree_on_flat_grid() {
        // 100 small vertices share y = 0
        let small = grid(10, 1.0, 0.0);
        let large = grid(15, 0.63, 0.05);
        assert!(!fits_kdtree(&small));

        let brute = match_vertices(&small, &large, &MatchParams::default()).unwrap();
        let tree = match_vertices(&small, &large, &MatchParams::kd_tree()).unwrap();

        assert!(tree.validate().is_ok());
        assert_eq!(brute, tree);
    }

    #[test]
    fn test_kd_tree_on_coincident_vertices() {
        let small = vec![Point3::new(1.0, 2.0, 3.0); 40];
        let large = vec![Point3::new(-1.0, 0.5, 3.0); 41];

        let c = match_vertices(&small, &large, &MatchParams::kd_tree()).unwrap();
        assert!(c.validate().is_ok());
        assert_eq!(c.group_count(), 40);
        // The one leftover joins the lowest tied index
        assert_eq!(c.groups[0].slots, vec![0, 40]);
    }

    #[test]
    fn test_fits_kdtree_counts_signed_zeros_together() {
        #[allow(clippy::cast_precision_loss)]
        let mut points: Vec<_> = (0..36)
            .map(|i| Point3::new(i as f64 + 0.5, i as f64, -(i as f64)))
            .collect();
        assert!(fits_kdtree(&points));

        for (i, p) in points.iter_mut().enumerate() {
            p.x = if i % 2 == 0 { 0.0 } else { -0.0 };
        }
        assert!(!fits_kdtree(&points));
    }

    #[test]
    fn test_parallel_distance_rows() {
        // Enough rows to take the parallel path
        let small = grid(3, 10.0, 0.5);
        let large = grid(33, 0.6, 0.0);
        assert!(large.len() > PARALLEL_ROWS);

        let c = match_vertices(&small, &large, &MatchParams::kd_tree()).unwrap();
        assert!(c.validate().is_ok());
        assert_eq!(c.large_vertex_count(), large.len());
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<Point3<f64>> = Vec::new();
        assert_eq!(
            match_vertices(&empty, &small(), &MatchParams::default()),
            Err(MatchError::EmptyMesh {
                side: MeshSide::First
            })
        );
        assert_eq!(
            match_vertices(&small(), &empty, &MatchParams::default()),
            Err(MatchError::EmptyMesh {
                side: MeshSide::Second
            })
        );
    }

    #[test]
    fn test_non_finite_position() {
        let mut bad = large();
        bad[2].y = f64::NAN;
        assert_eq!(
            match_vertices(&small(), &bad, &MatchParams::default()),
            Err(MatchError::NonFinitePosition {
                side: MeshSide::Second,
                index: 2
            })
        );
    }

    #[test]
    fn test_match_meshes_uses_positions() {
        let a = mesh_types::octahedron(1.0);
        let b = mesh_types::octahedron(2.0);
        let c = match_meshes(&a, &b, &MatchParams::default()).unwrap();

        // Same vertex order, so each vertex pairs with its scaled twin
        for (l, group) in c.groups.iter().enumerate() {
            assert_eq!(group.slots, vec![l]);
        }
    }
}
