//! End-to-end conversion to triangle meshes.

use facetport::{
    channel::ChannelKey,
    convert,
    interchange::{IndexList, InputInfo, Primitive, SourceMesh, VertexData},
    ConvertOptions, MapChannel, MaterialMode,
};
use nalgebra::{Point3, Vector3};

fn quad_positions() -> Vec<f32> {
    vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ]
}

fn quad_uvs() -> VertexData {
    VertexData::single("uv0", 2, vec![0.0f32, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap()
}

fn strip_quad() -> SourceMesh {
    SourceMesh::new(quad_positions())
        .with_normals(vec![0.0f32, 0.0, 2.0])
        .with_uvs(quad_uvs())
        .with_primitive(
            Primitive::strips(vec![0, 1, 3, 2], vec![4])
                .with_normals(vec![0, 0, 0, 0])
                .with_uvs(IndexList::new(0, 0, vec![0, 1, 3, 2]))
                .with_material(5),
        )
}

#[test]
fn strip_quad_converts() {
    let conversion = convert(&strip_quad(), &ConvertOptions::default())
        .unwrap()
        .unwrap();
    let mesh = conversion.mesh.as_triangle().unwrap();

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.vertices[2], Point3::new(1.0, 1.0, 0.0));

    let faces: Vec<_> = mesh.faces.iter().map(|f| f.vertices).collect();
    assert_eq!(faces, vec![[0, 1, 3], [3, 1, 2]]);
    assert!(mesh.faces.iter().all(|f| f.material == 5));
    assert!(mesh.faces.iter().all(|f| f.visible_edges == [true; 3]));

    let normals = mesh.normals.as_ref().unwrap();
    assert_eq!(normals.normals, vec![Vector3::new(0.0, 0.0, 1.0)]);
    assert_eq!(normals.faces, vec![[0, 0, 0], [0, 0, 0]]);

    // slot 0 is allocated but unused
    assert_eq!(mesh.channels.len(), 2);
    assert_eq!(mesh.channel(0), Some(&MapChannel::zeroed(2)));
    let uv = mesh.channel(1).unwrap();
    assert_eq!(uv.vertices.len(), 4);
    assert_eq!(uv.vertices[1], Point3::new(1.0, 0.0, 0.0));
    assert_eq!(uv.faces, vec![[0, 1, 3], [3, 1, 2]]);
    assert_eq!(conversion.channels.slot(&ChannelKey::uv(0, 0)), Some(1));
}

#[test]
fn fans_and_lists_concatenate() {
    let mesh = SourceMesh::new(quad_positions())
        .with_primitive(Primitive::fans(vec![0, 1, 2, 3], vec![4]))
        .with_primitive(Primitive::triangles(vec![3, 2, 1]));
    let conversion = convert(&mesh, &ConvertOptions::default())
        .unwrap()
        .unwrap();
    let mesh = conversion.mesh.as_triangle().unwrap();
    let faces: Vec<_> = mesh.faces.iter().map(|f| f.vertices).collect();
    assert_eq!(faces, vec![[0, 1, 2], [0, 2, 3], [3, 2, 1]]);
    assert!(mesh.normals.is_none());
    assert!(mesh.channels.is_empty());
    assert!(mesh.faces.iter().all(|f| f.material == 0));
}

#[test]
fn materials_remap_in_encounter_order() {
    let mesh = SourceMesh::new(quad_positions())
        .with_primitive(Primitive::triangles(vec![0, 1, 2]).with_material(70_000))
        .with_primitive(Primitive::triangles(vec![0, 2, 3]).with_material(3))
        .with_primitive(Primitive::triangles(vec![1, 2, 3]))
        .with_primitive(Primitive::triangles(vec![0, 1, 3]).with_material(70_000));

    let options = ConvertOptions::default().with_material_mode(MaterialMode::Remap);
    let conversion = convert(&mesh, &options).unwrap().unwrap();
    let materials: Vec<_> = conversion
        .mesh
        .as_triangle()
        .unwrap()
        .faces
        .iter()
        .map(|f| f.material)
        .collect();
    assert_eq!(materials, vec![1, 2, 0, 1]);
    assert_eq!(
        conversion.materials.iter().collect::<Vec<_>>(),
        vec![(70_000, 1), (3, 2), (0, 3)]
    );

    // raw tags must fit a host id
    assert_eq!(
        convert(&mesh, &ConvertOptions::default()),
        Err(facetport::Error::MaterialOutOfRange(70_000))
    );
}

#[test]
fn default_material_takes_first_id() {
    let mesh = SourceMesh::new(quad_positions())
        .with_primitive(Primitive::triangles(vec![0, 1, 2]))
        .with_primitive(Primitive::triangles(vec![0, 2, 3]).with_material(7));

    let options = ConvertOptions::default().with_material_mode(MaterialMode::Remap);
    let conversion = convert(&mesh, &options).unwrap().unwrap();
    assert_eq!(
        conversion.materials.iter().collect::<Vec<_>>(),
        vec![(0, 1), (7, 2)]
    );
    let materials: Vec<_> = conversion
        .mesh
        .as_triangle()
        .unwrap()
        .faces
        .iter()
        .map(|f| f.material)
        .collect();
    // tag 0 is numbered, but its faces keep the host default
    assert_eq!(materials, vec![0, 2]);
}

#[test]
fn scalar_sources_fill_x_only() {
    let uvs = VertexData::new(
        vec![
            9.0f64, 9.0, 9.0, 9.0, 9.0, 9.0, // set 0: three 2D coordinates
            0.25, 0.5, 0.75, // set 1: three scalars
        ],
        vec![InputInfo::new("a", 2, 6), InputInfo::new("u", 1, 3)],
    )
    .unwrap();
    let mesh = SourceMesh::new(quad_positions()).with_uvs(uvs).with_primitive(
        Primitive::triangles(vec![0, 1, 2])
            .with_uvs(IndexList::new(0, 0, vec![0, 1, 2]))
            .with_uvs(IndexList::new(1, 3, vec![1, 0, 2])),
    );
    let conversion = convert(&mesh, &ConvertOptions::default())
        .unwrap()
        .unwrap();
    // set 1 favors slot 1, which set 0 already took
    assert_eq!(conversion.channels.slot(&ChannelKey::uv(1, 1)), Some(2));
    let mesh = conversion.mesh.as_triangle().unwrap();
    let scalar = mesh.channel(2).unwrap();
    assert_eq!(
        scalar.vertices,
        vec![
            Point3::new(0.25, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.75, 0.0, 0.0),
        ]
    );
    assert_eq!(scalar.faces, vec![[1, 0, 2]]);
}

#[test]
fn vertex_colors_land_in_slot_zero() {
    let colors = VertexData::single(
        "rgba",
        4,
        vec![
            1.0f64, 0.0, 0.0, 0.5, //
            0.0, 1.0, 0.0, 0.5, //
            0.0, 0.0, 1.0, 0.5,
        ],
    )
    .unwrap();
    let mesh = SourceMesh::new(quad_positions())
        .with_colors(colors)
        .with_uvs(quad_uvs())
        .with_primitive(
            Primitive::triangles(vec![0, 1, 2])
                .with_colors(IndexList::new(1, 0, vec![2, 1, 0]))
                .with_uvs(IndexList::new(0, 0, vec![0, 1, 2])),
        );
    let conversion = convert(&mesh, &ConvertOptions::default())
        .unwrap()
        .unwrap();
    let mesh = conversion.mesh.as_triangle().unwrap();
    let color = mesh.channel(0).unwrap();
    assert_eq!(
        color.vertices,
        vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    );
    assert_eq!(color.faces, vec![[2, 1, 0]]);
    assert_eq!(mesh.channel(1).unwrap().faces, vec![[0, 1, 2]]);
}

#[test]
fn later_sources_are_offset() {
    let uvs = VertexData::new(
        vec![
            9.0f32, 9.0, 9.0, 9.0, 9.0, 9.0, // set 0: three 2D coordinates
            0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, // set 2: three 3D coordinates
        ],
        vec![InputInfo::new("a", 2, 6), InputInfo::new("b", 3, 9)],
    )
    .unwrap();
    let mesh = SourceMesh::new(quad_positions()).with_uvs(uvs).with_primitive(
        Primitive::triangles(vec![0, 1, 2])
            .with_uvs(IndexList::new(0, 0, vec![0, 1, 2]))
            .with_uvs(IndexList::new(2, 3, vec![2, 2, 1])),
    );
    let conversion = convert(&mesh, &ConvertOptions::default())
        .unwrap()
        .unwrap();
    let mesh = conversion.mesh.as_triangle().unwrap();
    assert_eq!(mesh.channels.len(), 3);
    let second = mesh.channel(2).unwrap();
    assert_eq!(
        second.vertices,
        vec![
            Point3::new(0.1, 0.2, 0.3),
            Point3::new(0.4, 0.5, 0.6),
            Point3::new(0.7, 0.8, 0.9),
        ]
    );
    assert_eq!(second.faces, vec![[2, 2, 1]]);
    assert_eq!(mesh.channel(1).unwrap().vertices[0], Point3::new(9.0, 9.0, 0.0));
}

#[test]
fn exhausted_channels_are_dropped() {
    let primitive = (0..4).fold(Primitive::triangles(vec![0, 1, 2]), |p, set| {
        p.with_uvs(IndexList::new(set, 0, vec![0, 1, 2]))
    });
    let mesh = SourceMesh::new(quad_positions())
        .with_uvs(quad_uvs())
        .with_primitive(primitive);
    let options = ConvertOptions::default().with_channel_limit(2);
    let conversion = convert(&mesh, &options).unwrap().unwrap();
    let mesh = conversion.mesh.as_triangle().unwrap();
    assert_eq!(mesh.channels.len(), 3);
    assert_eq!(conversion.channels.len(), 2);
    assert_eq!(conversion.channels.slot(&ChannelKey::uv(3, 0)), None);
}

#[test]
fn faceless_meshes_produce_nothing() {
    let empty = SourceMesh::new(quad_positions());
    assert_eq!(convert(&empty, &ConvertOptions::default()), Ok(None));

    let short = SourceMesh::new(quad_positions())
        .with_primitive(Primitive::strips(vec![0, 1], vec![2]))
        .with_primitive(Primitive::polygons(Vec::new(), vec![-3]));
    assert_eq!(convert(&short, &ConvertOptions::default()), Ok(None));
}

#[cfg(debug_assertions)]
#[test]
fn malformed_sources_are_rejected() {
    let mesh = SourceMesh::new(quad_positions()).with_primitive(Primitive::triangles(vec![0, 1, 9]));
    assert!(matches!(
        convert(&mesh, &ConvertOptions::default()),
        Err(facetport::Error::Source(_))
    ));
}
