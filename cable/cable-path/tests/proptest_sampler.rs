//! Property-based tests for path sampling.
//!
//! Run with: cargo test -p cable-path -- proptest

use cable_path::{
    CableScene, Connection, PathSampler, Resolution, Strand, Transform, TransformProvider,
    sample_strand,
};
use nalgebra::{UnitQuaternion, Vector3};
use proptest::prelude::*;

fn arb_vector(range: f64) -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-range..range).prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

fn arb_transform() -> impl Strategy<Value = Transform> {
    (
        arb_vector(50.0),
        arb_vector(3.0),
        prop::array::uniform3(0.1..4.0f64),
    )
        .prop_map(|(translation, scaled_axis, [sx, sy, sz])| Transform {
            translation,
            rotation: UnitQuaternion::from_scaled_axis(scaled_axis),
            scale: Vector3::new(sx, sy, sz),
        })
}

fn arb_strand() -> impl Strategy<Value = Strand> {
    (arb_vector(5.0), arb_vector(5.0)).prop_map(|(start_offset, end_offset)| Strand {
        start_offset,
        end_offset,
    })
}

proptest! {
    #[test]
    fn proptest_length_and_endpoints(
        a in arb_transform(),
        b in arb_transform(),
        strand in arb_strand(),
        n in 2usize..100,
    ) {
        let points = sample_strand(&a, Some(&b), &strand, Resolution::clamped(n));
        prop_assert_eq!(points.len(), n);
        prop_assert_eq!(points[0], a.world_position());
        prop_assert_eq!(points[n - 1], b.world_position());
    }

    #[test]
    fn proptest_strand_count_is_min_length(
        starts in prop::collection::vec(arb_vector(2.0), 0..6),
        ends in prop::collection::vec(arb_vector(2.0), 0..6),
    ) {
        let mut scene = CableScene::new();
        let a = scene.add_anchor(Transform::identity());
        let b = scene.add_anchor(Transform::from_xyz(1.0, 2.0, 3.0));
        let expected = starts.len().min(ends.len());

        let mut conn = Connection::new(b);
        conn.start_offsets = starts;
        conn.end_offsets = ends;
        scene.path_mut(a).unwrap().connections.push(conn);

        let sampled = PathSampler::new(&scene).sample_anchor(a).unwrap();
        prop_assert_eq!(sampled.strand_count(), expected);
        prop_assert_eq!(sampled.points.len(), expected * 20);
    }

    #[test]
    fn proptest_local_points_round_trip(owner in arb_transform(), b in arb_transform()) {
        let mut scene = CableScene::new();
        let a = scene.add_anchor(owner);
        let target = scene.add_anchor(b);
        scene.connect(a, target).unwrap();

        let sampler = PathSampler::new(&scene);
        let world = sampler.sample_anchor(a).unwrap();
        let local = sampler.sample_anchor_local(a).unwrap();
        prop_assert_eq!(&world.spans, &local.spans);
        for (w, l) in world.points.iter().zip(&local.points) {
            let back = owner.local_to_world(&l.coords);
            prop_assert!((back - w).norm() < 1e-6 * (1.0 + w.coords.norm()));
        }
    }
}
