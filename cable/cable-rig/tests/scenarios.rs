//! End-to-end rebuild scenarios.

use approx::assert_relative_eq;
use cable_path::{AnchorId, CableScene, Connection, Transform};
use cable_rig::{CableMesh, CableRig, CableRigConfig, CapturedMesh, FrameMode, MeshBuffers};
use nalgebra::{Point3, Vector3};

fn straight_scene() -> (CableScene, AnchorId, AnchorId) {
    let mut scene = CableScene::new();
    let a = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 0.0));
    let b = scene.add_anchor(Transform::from_xyz(0.0, 0.0, 10.0));
    scene.connect(a, b).unwrap();
    (scene, a, b)
}

fn straight_config() -> CableRigConfig {
    CableRigConfig::default()
        .with_diameter(0.2)
        .with_radial_segments(8)
}

fn ring_center(mesh: &CableMesh, ring: usize, segments: usize) -> Point3<f64> {
    let sum = mesh.vertices[ring * segments..(ring + 1) * segments]
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
    Point3::from(sum / segments as f64)
}

/// Every side face's normal must point away from the segment of cable
/// axis it wraps.
fn assert_outward(mesh: &CableMesh, segments: usize, rings_per_strand: usize) {
    let strands = mesh.vertex_count() / (segments * rings_per_strand);
    let faces_per_strand = (rings_per_strand - 1) * segments * 2;
    for strand in 0..strands {
        for local in 0..faces_per_strand {
            let face = strand * faces_per_strand + local;
            let ring = strand * rings_per_strand + local / (segments * 2);
            let c0 = ring_center(mesh, ring, segments);
            let c1 = ring_center(mesh, ring + 1, segments);
            let axis = (c1 - c0).normalize();

            let [i0, i1, i2] = mesh.faces[face];
            let centroid = (mesh.vertices[i0 as usize].position.coords
                + mesh.vertices[i1 as usize].position.coords
                + mesh.vertices[i2 as usize].position.coords)
                / 3.0;
            let rel = centroid - c0.coords;
            let outward = rel - axis * rel.dot(&axis);

            let normal = mesh.face_normal(face).unwrap();
            assert!(
                normal.dot(&outward) > 0.0,
                "face {face} of strand {strand} points inward"
            );
        }
    }
}

#[test]
fn straight_tube_along_z() {
    let (scene, a, _) = straight_scene();
    let rig = CableRig::new(&scene, a, straight_config()).unwrap();
    let mesh = rig.build().unwrap();

    assert_eq!(mesh.vertex_count(), 160);
    assert_eq!(mesh.face_count(), 304);

    for ring in 0..20 {
        let center = ring_center(&mesh, ring, 8);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-9);
    }
    assert_relative_eq!(ring_center(&mesh, 0, 8).z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(ring_center(&mesh, 19, 8).z, 10.0, epsilon = 1e-12);

    for v in &mesh.vertices {
        let radial = Vector3::new(v.position.x, v.position.y, 0.0).norm();
        assert_relative_eq!(radial, 0.1, epsilon = 1e-9);
    }

    let bounds = mesh.bounds();
    assert_relative_eq!(bounds.min.z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(bounds.max.z, 10.0, epsilon = 1e-12);

    assert_outward(&mesh, 8, 20);
}

#[test]
fn published_buffers_carry_bounds() {
    let (scene, a, _) = straight_scene();
    let rig = CableRig::new(&scene, a, straight_config()).unwrap();
    let mut sink = CapturedMesh::default();
    let mesh = rig.publish(&mut sink).unwrap();

    assert_eq!(sink.buffers.bounds, mesh.bounds());
    assert_relative_eq!(sink.buffers.bounds.min.x, -0.1, epsilon = 1e-9);
    assert_relative_eq!(sink.buffers.bounds.max.x, 0.1, epsilon = 1e-9);
    assert_relative_eq!(sink.buffers.bounds.max.z, 10.0, epsilon = 1e-12);
}

#[test]
fn null_target_yields_empty_buffers() {
    let mut scene = CableScene::new();
    let a = scene.add_anchor(Transform::identity());
    scene.path_mut(a).unwrap().add_connection(None);

    let rig = CableRig::new(&scene, a, CableRigConfig::default()).unwrap();
    let mut sink = CapturedMesh::default();
    let mesh = rig.publish(&mut sink).unwrap();

    assert!(mesh.is_empty());
    assert!(sink.buffers.positions.is_empty());
    assert!(sink.buffers.indices.is_empty());
    assert_eq!(sink.presents, 1);
}

#[test]
fn broken_connection_does_not_abort_others() {
    let (mut scene, a, b) = straight_scene();
    let path = scene.path_mut(a).unwrap();
    path.add_connection(None);
    path.connections.push(Connection::new(AnchorId::from_raw(404)));
    path.add_connection(Some(b));

    let mesh = CableRig::new(&scene, a, straight_config())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(mesh.vertex_count(), 2 * 160);
    assert_eq!(mesh.face_count(), 2 * 304);
}

#[test]
fn mismatched_offsets_render_min_length() {
    let (mut scene, a, b) = straight_scene();
    let path = scene.path_mut(a).unwrap();
    path.connections.clear();
    let mut conn = Connection::new(b);
    conn.start_offsets = (0..3).map(|i| Vector3::new(f64::from(i), 0.0, 1.0)).collect();
    conn.end_offsets = (0..5).map(|i| Vector3::new(f64::from(i), 0.0, -1.0)).collect();
    path.connections.push(conn);

    let rig = CableRig::new(&scene, a, straight_config()).unwrap();
    assert_eq!(rig.sample().strand_count(), 3);

    let mesh = rig.build().unwrap();
    assert_eq!(mesh.vertex_count(), 3 * 160);
    assert_eq!(mesh.face_count(), 3 * 304);
}

#[test]
fn strands_do_not_share_vertices() {
    let (mut scene, a, _) = straight_scene();
    scene.path_mut(a).unwrap().push_start_offset(0, Vector3::x()).unwrap();
    scene.path_mut(a).unwrap().push_end_offset(0, Vector3::x()).unwrap();

    let mesh = CableRig::new(&scene, a, straight_config())
        .unwrap()
        .build()
        .unwrap();
    for (i, face) in mesh.faces.iter().enumerate() {
        let strand = i / 304;
        for &idx in face {
            assert_eq!(idx as usize / 160, strand);
        }
    }
    // Both strands start at the same anchor, yet their first rings are
    // separate vertices at the same place.
    assert_relative_eq!(ring_center(&mesh, 0, 8), ring_center(&mesh, 20, 8), epsilon = 1e-12);
}

#[test]
fn curved_cable_faces_outward() {
    let mut scene = CableScene::new();
    let a = scene.add_anchor(Transform::identity());
    let b = scene.add_anchor(Transform::from_xyz(4.0, 0.0, 6.0));
    scene.connect(a, b).unwrap();
    let path = scene.path_mut(a).unwrap();
    path.set_start_offset(0, 0, Vector3::new(0.0, -1.5, 2.0)).unwrap();
    path.set_end_offset(0, 0, Vector3::new(0.0, -1.5, -2.0)).unwrap();

    for mode in [FrameMode::TangentFollowing, FrameMode::ParallelTransport] {
        let config = straight_config().with_frame_mode(mode);
        let mesh = CableRig::new(&scene, a, config).unwrap().build().unwrap();
        assert_eq!(mesh.vertex_count(), 160);
        assert_outward(&mesh, 8, 20);
    }
}

#[test]
fn mesh_is_in_owner_local_space() {
    let mut scene = CableScene::new();
    let a = scene.add_anchor(
        Transform::from_xyz(3.0, 1.0, -2.0).with_axis_angle(Vector3::y(), std::f64::consts::FRAC_PI_2),
    );
    let b = scene.add_anchor(Transform::from_xyz(13.0, 1.0, -2.0));
    scene.connect(a, b).unwrap();

    let mesh = CableRig::new(&scene, a, straight_config())
        .unwrap()
        .build()
        .unwrap();

    // Rotating +Z by 90° about Y gives +X, so the cable runs along local +Z.
    assert_relative_eq!(ring_center(&mesh, 0, 8), Point3::origin(), epsilon = 1e-9);
    assert_relative_eq!(
        ring_center(&mesh, 19, 8),
        Point3::new(0.0, 0.0, 10.0),
        epsilon = 1e-9
    );
}

#[test]
fn rebuild_is_idempotent() {
    let (mut scene, a, _) = straight_scene();
    scene
        .path_mut(a)
        .unwrap()
        .set_start_offset(0, 0, Vector3::new(1.0, 2.0, 3.0))
        .unwrap();
    let rig = CableRig::new(&scene, a, straight_config()).unwrap();

    let first: MeshBuffers = rig.build().unwrap().to_buffers();
    let second: MeshBuffers = rig.build().unwrap().to_buffers();

    let bits = |b: &MeshBuffers| -> Vec<u32> {
        b.positions
            .iter()
            .flatten()
            .chain(b.uvs.iter().flatten())
            .chain(b.normals.iter().flatten())
            .map(|f| f.to_bits())
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first.indices, second.indices);
}

#[test]
fn resolution_edit_changes_ring_count() {
    let (mut scene, a, _) = straight_scene();
    scene.path_mut(a).unwrap().set_resolution(5).unwrap();
    let mesh = CableRig::new(&scene, a, straight_config())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(mesh.vertex_count(), 5 * 8);
    assert_eq!(mesh.face_count(), 4 * 8 * 2);
}

#[test]
fn caps_close_both_ends() {
    let (scene, a, _) = straight_scene();
    let config = straight_config().with_caps(true);
    let mesh = CableRig::new(&scene, a, config).unwrap().build().unwrap();
    assert_eq!(mesh.vertex_count(), 160 + 2);
    assert_eq!(mesh.face_count(), 304 + 2 * 8);
}
