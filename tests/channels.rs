//! Map channel slot assignment.

use std::collections::HashSet;

use facetport::{
    channel::{ChannelAssignment, ChannelFamily, ChannelKey, ChannelResolver, MAX_CHANNELS},
    error::ChannelError,
    interchange::{IndexList, InputInfo, Primitive, SourceMesh, VertexData},
};
use quickcheck_macros::quickcheck;

fn triangle_positions() -> Vec<f32> {
    vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
}

/// One UV source and one color source, each holding 3 attribute vertices.
fn mesh_with(primitive: Primitive) -> SourceMesh {
    SourceMesh::new(triangle_positions())
        .with_uvs(VertexData::single("uv", 2, vec![0.0f32; 6]).unwrap())
        .with_colors(VertexData::single("rgb", 3, vec![1.0f32; 9]).unwrap())
        .with_primitive(primitive)
}

fn assign(mesh: &SourceMesh, limit: usize) -> (ChannelAssignment, Result<(), ChannelError>) {
    let mut assignment = ChannelAssignment::new(limit);
    let res = assignment.assign(mesh, &ChannelResolver::new(mesh));
    (assignment, res)
}

fn list(set: u32) -> IndexList {
    IndexList::new(set, 0, vec![0, 1, 2])
}

#[test]
fn keys_encode_family() {
    let uv = ChannelKey::uv(0, 3);
    let color = ChannelKey::color(0, 3);
    assert_ne!(uv, color);
    assert_eq!(uv.family(), ChannelFamily::Uv);
    assert_eq!(color.family(), ChannelFamily::Color);
    assert_eq!(color.set_index(), 0);
    assert_eq!(color.source(), 3);
    assert_eq!(ChannelKey::color(7, 0).set_index(), 7);
}

#[test]
fn favored_slots() {
    assert_eq!(ChannelKey::color(1, 0).favored_slot(), 0);
    assert_eq!(ChannelKey::color(2, 0).favored_slot(), 2);
    assert_eq!(ChannelKey::uv(0, 0).favored_slot(), 1);
    assert_eq!(ChannelKey::uv(1, 0).favored_slot(), 1);
    assert_eq!(ChannelKey::uv(5, 0).favored_slot(), 5);
}

#[test]
fn same_set_from_two_sources() {
    let uvs = VertexData::new(
        vec![0.0f32; 12],
        vec![InputInfo::new("a", 2, 6), InputInfo::new("b", 2, 6)],
    )
    .unwrap();
    let mesh = SourceMesh::new(triangle_positions()).with_uvs(uvs).with_primitive(
        Primitive::triangles(vec![0, 1, 2])
            .with_uvs(IndexList::new(0, 0, vec![0, 1, 2]))
            .with_uvs(IndexList::new(0, 3, vec![0, 1, 2])),
    );
    let (assignment, res) = assign(&mesh, MAX_CHANNELS);
    assert_eq!(res, Ok(()));
    assert_eq!(assignment.slot(&ChannelKey::uv(0, 0)), Some(1));
    assert_eq!(assignment.slot(&ChannelKey::uv(0, 1)), Some(2));
    assert_eq!(assignment.channel_count(), 3);
}

#[test]
fn vertex_color_takes_slot_zero() {
    let mesh = mesh_with(
        Primitive::triangles(vec![0, 1, 2])
            .with_uvs(list(1))
            .with_colors(list(1)),
    );
    let (assignment, res) = assign(&mesh, MAX_CHANNELS);
    assert_eq!(res, Ok(()));
    assert_eq!(assignment.slot(&ChannelKey::color(1, 0)), Some(0));
    assert_eq!(assignment.slot(&ChannelKey::uv(1, 0)), Some(1));
    assert!(assignment.is_used(0));
    assert_eq!(assignment.high_water(), Some(1));
}

#[test]
fn favored_collision_falls_back_to_first_free() {
    let mesh = mesh_with(
        Primitive::triangles(vec![0, 1, 2])
            .with_uvs(list(0))
            .with_uvs(list(1))
            .with_uvs(list(3)),
    );
    let (assignment, res) = assign(&mesh, MAX_CHANNELS);
    assert_eq!(res, Ok(()));
    assert_eq!(assignment.slot(&ChannelKey::uv(0, 0)), Some(1));
    assert_eq!(assignment.slot(&ChannelKey::uv(3, 0)), Some(3));
    // set 1 favors slot 1, which set 0 already took
    assert_eq!(assignment.slot(&ChannelKey::uv(1, 0)), Some(2));
}

#[test]
fn repeated_keys_are_assigned_once() {
    let mesh = mesh_with(Primitive::triangles(vec![0, 1, 2]).with_uvs(list(0)))
        .with_primitive(Primitive::triangles(vec![2, 1, 0]).with_uvs(list(0)));
    let (assignment, res) = assign(&mesh, MAX_CHANNELS);
    assert_eq!(res, Ok(()));
    assert_eq!(assignment.len(), 1);
    assert_eq!(assignment.channel_count(), 2);
    assert!(!assignment.is_used(2));
}

#[test]
fn exhaustion_keeps_earlier_slots() {
    let mesh = mesh_with(
        Primitive::triangles(vec![0, 1, 2])
            .with_uvs(list(0))
            .with_uvs(list(1))
            .with_uvs(list(2))
            .with_uvs(list(3)),
    );
    let (assignment, res) = assign(&mesh, 2);
    assert_eq!(
        res,
        Err(ChannelError::Exhausted {
            key: ChannelKey::uv(1, 0),
            limit: 2
        })
    );
    assert_eq!(assignment.slot(&ChannelKey::uv(0, 0)), Some(1));
    assert_eq!(assignment.slot(&ChannelKey::uv(2, 0)), Some(2));
    assert_eq!(assignment.slot(&ChannelKey::uv(1, 0)), None);
    assert_eq!(assignment.slot(&ChannelKey::uv(3, 0)), None);
    assert_eq!(assignment.channel_count(), 3);
}

#[test]
fn unresolved_source() {
    let mesh = mesh_with(
        Primitive::triangles(vec![0, 1, 2]).with_uvs(IndexList::new(0, 7, vec![0, 1, 2])),
    );
    let (assignment, res) = assign(&mesh, MAX_CHANNELS);
    assert_eq!(
        res,
        Err(ChannelError::UnresolvedSource {
            primitive: 0,
            initial_index: 7
        })
    );
    assert!(assignment.is_empty());
}

#[test]
fn limit_is_clamped() {
    assert_eq!(ChannelAssignment::new(0).limit(), 1);
    assert_eq!(ChannelAssignment::new(1000).limit(), MAX_CHANNELS);
    assert_eq!(ChannelAssignment::default().channel_count(), 0);
}

fn mesh_with_sets(sets: &[(u8, bool)]) -> SourceMesh {
    let primitive = sets
        .iter()
        .fold(Primitive::triangles(vec![0, 1, 2]), |p, &(set, color)| {
            let list = list((set % 12) as u32);
            if color {
                p.with_colors(list)
            } else {
                p.with_uvs(list)
            }
        });
    mesh_with(primitive)
}

#[quickcheck]
fn assignment_is_deterministic(sets: Vec<(u8, bool)>, limit: u8) -> bool {
    let mesh = mesh_with_sets(&sets);
    let limit = (limit % 12) as usize + 1;
    assign(&mesh, limit) == assign(&mesh, limit)
}

#[quickcheck]
fn assignment_is_injective(sets: Vec<(u8, bool)>, limit: u8) -> bool {
    let mesh = mesh_with_sets(&sets);
    let (assignment, _) = assign(&mesh, (limit % 12) as usize + 1);
    let slots: HashSet<usize> = assignment.iter().map(|(_, s)| s).collect();
    slots.len() == assignment.len()
        && assignment.iter().all(|(_, s)| s <= assignment.limit())
        && assignment
            .iter()
            .all(|(k, s)| s != 0 || k.family() == ChannelFamily::Color)
}

#[quickcheck]
fn high_water_tracks_highest_slot(sets: Vec<(u8, bool)>, limit: u8) -> bool {
    let mesh = mesh_with_sets(&sets);
    let (assignment, _) = assign(&mesh, (limit % 12) as usize + 1);
    assignment.high_water() == assignment.iter().map(|(_, s)| s).max()
}

#[quickcheck]
fn generous_limit_never_exhausts(sets: Vec<(u8, bool)>) -> bool {
    let mesh = mesh_with_sets(&sets);
    let (assignment, res) = assign(&mesh, MAX_CHANNELS);
    let distinct: HashSet<(u8, bool)> = sets.iter().map(|&(s, c)| (s % 12, c)).collect();
    res.is_ok() && assignment.len() == distinct.len()
}
