//! API Regression Tests for the mesh-blend crates
//!
//! These tests serve as a regression suite to ensure the public API remains
//! stable across the blend crates. They are organized in 4 tiers:
//!
//! - Tier 1: Foundation (mesh-types, raw buffers, primitives)
//! - Tier 2: Subdivision (mesh-subdivide)
//! - Tier 3: Matching and morphing (mesh-correspond, mesh-morph)
//! - Tier 4: Pipeline (mesh-blend)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

use mesh_blend::{correspond, morph, prelude::*, subdivide as sub, types};

// =============================================================================
// TIER 1: Foundation - Basic Types and Primitives
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn vertex_creation_and_access() {
        let v = types::Vertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f64::EPSILON);
        assert!(v.normal().is_none());
        assert!(v.uv().is_none());

        let v2 = types::Vertex::with_normal(Point3::new(4.0, 5.0, 6.0), Vector3::z());
        assert_eq!(v2.normal(), Some(Vector3::z()));
    }

    #[test]
    fn raw_buffer_round_trip() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let normals = [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        let indices = [0, 2, 1];

        let mesh = types::IndexedMesh::try_from_raw(&positions, Some(&normals), &indices).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.has_normals());

        let raw = mesh.to_raw();
        assert_eq!(raw.positions, positions);
        assert_eq!(raw.normals.as_deref(), Some(&normals[..]));
        assert_eq!(raw.indices, indices);
    }

    #[test]
    fn raw_buffer_errors() {
        use types::MeshError;

        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        assert_eq!(
            types::IndexedMesh::try_from_raw(&positions, None, &[0, 1]),
            Err(MeshError::MalformedIndexBuffer { len: 2 })
        );
        assert_eq!(
            types::IndexedMesh::try_from_raw(&positions[..8], None, &[0, 1, 2]),
            Err(MeshError::MalformedPositionBuffer { len: 8 })
        );
        assert!(matches!(
            types::IndexedMesh::try_from_raw(&positions, None, &[0, 1, 3]),
            Err(MeshError::FaceIndexOutOfBounds { index: 3, .. })
        ));
    }

    #[test]
    fn primitive_octahedron() {
        let mesh = octahedron(1.0);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);

        let bounds = mesh.bounds();
        assert!((bounds.min.x + 1.0).abs() < f64::EPSILON);
        assert!((bounds.max.z - 1.0).abs() < f64::EPSILON);
    }
}

// =============================================================================
// TIER 2: Subdivision
// =============================================================================

mod tier2_subdivision {
    use super::*;

    #[test]
    fn subdivide_params_builder() {
        let params = SubdivideParams::new()
            .with_iterations(3)
            .with_max_faces(1_000)
            .with_max_vertices(500);
        assert_eq!(params.iterations, 3);
        assert_eq!(params.expected_faces(8), 512);
        assert_eq!(params.vertex_limit(), 500);
    }

    #[test]
    fn subdivide_mesh_result() {
        let result = subdivide_mesh(&octahedron(1.0), &SubdivideParams::new()).unwrap();
        assert_eq!(result.final_faces, 32);
        assert_eq!(result.final_vertices, 18);

        let display = format!("{}", result);
        assert!(display.contains("→")); // Shows before → after
    }

    #[test]
    fn edge_key_and_counting() {
        assert_eq!(sub::EdgeKey::new(9, 2), sub::EdgeKey::new(2, 9));
        assert_eq!(sub::count_unique_edges(&octahedron(1.0)), 12);
    }

    #[test]
    fn equalize_density_stops_below_target() {
        let params = SubdivideParams::new().with_iterations(5);
        let result = equalize_density(&octahedron(1.0), 100, &params).unwrap();
        assert_eq!(result.final_vertices, 66);
    }

    #[test]
    fn subdivide_errors() {
        use sub::SubdivideError;

        assert!(matches!(
            subdivide(&IndexedMesh::new()),
            Err(SubdivideError::EmptyMesh)
        ));

        let params = SubdivideParams::new().with_max_vertices(sub::MAX_INDEXABLE_VERTICES + 1);
        assert_eq!(params.vertex_limit(), sub::MAX_INDEXABLE_VERTICES);
    }
}

// =============================================================================
// TIER 3: Matching and Morphing
// =============================================================================

mod tier3_match_and_morph {
    use super::*;

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

    #[test]
    fn end_to_end_example() {
        let c = match_vertices(&small(), &large(), &MatchParams::default()).unwrap();
        assert_eq!(c.groups[0].slots, vec![0]);
        assert_eq!(c.groups[1].slots, vec![1, 2]);

        let output = interpolate(&c, &[[0, 1, 2]], 50.0).unwrap();
        assert_eq!(output.mesh.vertices[1].position, Point3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn correspondence_api() {
        let c = match_vertices(&small(), &large(), &MatchParams::default()).unwrap();
        assert!(c.validate().is_ok());
        assert_eq!(c.group_count(), 2);
        assert_eq!(c.large_vertex_count(), 3);
        assert_eq!(c.large_side(), correspond::MeshSide::Second);
        assert_eq!(c.slot_parents(), vec![Some(0), Some(1), Some(1)]);
        assert_eq!(c.max_group_size(), 2);

        let display = format!("{}", c);
        assert!(display.contains("2 groups"));
    }

    #[test]
    fn match_errors() {
        use correspond::{MatchError, MeshSide};

        let err = match_vertices(&[], &large(), &MatchParams::default()).unwrap_err();
        assert_eq!(err, MatchError::EmptyMesh { side: MeshSide::First });
    }

    #[test]
    fn morph_output_summary() {
        let c = match_vertices(&small(), &large(), &MatchParams::default()).unwrap();
        let output = interpolate(&c, &[[0, 1, 2]], 25.0).unwrap();

        assert_eq!(output.percent, 25.0);
        assert!(output.summary().contains("25.0% blend"));
        assert_eq!(morph::FULL_PERCENT, 100.0);
    }

    #[test]
    fn morph_errors() {
        use morph::MorphError;

        let c = match_vertices(&small(), &large(), &MatchParams::default()).unwrap();
        assert!(matches!(
            interpolate(&c, &[[0, 1, 2]], f64::NAN),
            Err(MorphError::NonFiniteParameter(_))
        ));
        assert!(matches!(
            interpolate(&c, &[[0, 1, 5]], 10.0),
            Err(MorphError::InvalidTriangles(_))
        ));
    }

    #[test]
    fn vertex_normals_recompute() {
        let mut mesh = octahedron(1.0);
        mesh.clear_normals();
        assert_eq!(morph::compute_vertex_normals(&mut mesh), 0);
        assert!(mesh.has_normals());
    }
}

// =============================================================================
// TIER 4: Pipeline
// =============================================================================

mod tier4_pipeline {
    use super::*;

    #[test]
    fn blend_params_builder() {
        let params = BlendParams::default()
            .with_equalize(true)
            .with_matching(MatchParams::kd_tree())
            .with_initial_percent(0.0)
            .with_step_size(0.5);

        assert!(params.equalize);
        assert_eq!(params.matching.nearest, NearestSearch::KdTree);
    }

    #[test]
    fn pipeline_morph_and_step() {
        let sparse = octahedron(1.0);
        let dense = subdivide(&octahedron(2.0)).unwrap();
        let mut pipeline = MorphPipeline::new(&sparse, &dense, &BlendParams::default()).unwrap();

        let full = pipeline.morph(100.0).unwrap();
        for (out, v) in full.mesh.vertices.iter().zip(&dense.vertices) {
            assert_eq!(out.position, v.position);
        }

        pipeline.set_percent(0.0).unwrap();
        let output = pipeline.step_forward().unwrap();
        assert_eq!(output.percent, 0.5);
        assert_eq!(pipeline.percent(), 0.5);
        assert_eq!(pipeline.current().unwrap().percent, 0.5);
    }

    #[test]
    fn pipeline_with_equalization() {
        let sparse = octahedron(1.0);
        let dense = subdivide(&subdivide(&octahedron(2.0)).unwrap()).unwrap();

        let params = BlendParams::new().with_equalize(true);
        let pipeline = MorphPipeline::new(&dense, &sparse, &params).unwrap();
        assert_eq!(pipeline.equalize_passes(), 2);
        assert_eq!(pipeline.correspondence().max_group_size(), 1);
    }

    #[test]
    fn pipeline_error_conversion() {
        let result = MorphPipeline::new(&IndexedMesh::new(), &octahedron(1.0), &BlendParams::default());
        assert!(matches!(result, Err(BlendError::Mesh(_))));
    }
}
