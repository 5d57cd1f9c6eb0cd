//! Procedural interchange meshes.

use interchange::{IndexList, InputInfo, Primitive, SourceMesh, VertexData};
use nalgebra::{Point3, Scale3};

use crate::cli::Demo;

pub fn build(demo: Demo, scale: &Scale3<f32>) -> SourceMesh {
    match demo {
        Demo::Cube => cube(scale),
        Demo::Grid => grid(4, scale),
        Demo::Prism => prism(scale),
        Demo::Crowded => crowded(120, scale),
    }
}

fn scaled(points: impl IntoIterator<Item = Point3<f32>>, scale: &Scale3<f32>) -> Vec<f32> {
    points
        .into_iter()
        .flat_map(|p| {
            let p = scale.transform_point(&p);
            [p.x, p.y, p.z]
        })
        .collect()
}

fn cube(scale: &Scale3<f32>) -> SourceMesh {
    let corners = (0..8u32).map(|i| {
        Point3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32)
    });
    // each side in strip order
    const SIDES: [[u32; 4]; 6] = [
        [0, 2, 1, 3],
        [4, 5, 6, 7],
        [0, 4, 2, 6],
        [1, 3, 5, 7],
        [0, 1, 4, 5],
        [2, 6, 3, 7],
    ];
    let normals = vec![
        0.0f32, 0.0, -1.0, //
        0.0, 0.0, 1.0, //
        -1.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, -1.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    let uvs = VertexData::single("cube-uv", 2, vec![0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0])
        .expect("cube uvs fill one stride-2 source");

    let mut mesh = SourceMesh::new(scaled(corners, scale))
        .with_normals(normals)
        .with_uvs(uvs);
    for (side, indices) in SIDES.into_iter().enumerate() {
        mesh.push_primitive(
            Primitive::strips(indices.to_vec(), vec![4])
                .with_normals(vec![side as u32; 4])
                .with_uvs(IndexList::new(0, 0, vec![0, 1, 2, 3]))
                .with_material((side as u32 / 2 + 1) * 10),
        );
    }
    mesh
}

fn grid(cells: u32, scale: &Scale3<f32>) -> SourceMesh {
    let side = cells + 1;
    let vertex = |x: u32, y: u32| y * side + x;
    let points = (0..side).flat_map(|y| (0..side).map(move |x| Point3::new(x as f32, y as f32, 0.0)));
    let positions: Vec<f64> = scaled(points, scale).into_iter().map(f64::from).collect();

    let norm = |i: u32| i as f32 / cells as f32;
    let mut uv_values = Vec::new();
    let mut color_values = Vec::new();
    for y in 0..side {
        for x in 0..side {
            uv_values.extend([norm(x), norm(y)]);
            color_values.extend([norm(x), norm(y), 1.0 - norm(x)]);
        }
    }
    // the second set tiles the first
    uv_values.extend(uv_values.clone().into_iter().map(|c| c * cells as f32));
    let count = uv_values.len() / 2;
    let uvs = VertexData::new(
        uv_values,
        vec![
            InputInfo::new("grid-uv", 2, count),
            InputInfo::new("grid-tiled", 2, count),
        ],
    )
    .expect("grid uv sources match their values");
    let colors =
        VertexData::single("grid-rgb", 3, color_values).expect("grid colors fill one stride-3 source");

    let mut indices = Vec::new();
    for y in 0..cells {
        for x in 0..cells {
            indices.extend([
                vertex(x, y),
                vertex(x + 1, y),
                vertex(x + 1, y + 1),
                vertex(x, y + 1),
            ]);
        }
    }
    let runs = vec![4; (cells * cells) as usize];
    SourceMesh::new(positions)
        .with_uvs(uvs)
        .with_colors(colors)
        .with_primitive(
            Primitive::fans(indices.clone(), runs)
                .with_uvs(IndexList::new(0, 0, indices.clone()))
                .with_uvs(IndexList::new(1, (side * side) as usize, indices.clone()))
                .with_colors(IndexList::new(1, 0, indices))
                .with_material(3),
        )
}

fn prism(scale: &Scale3<f32>) -> SourceMesh {
    const SIDES: u32 = 6;
    let ring = |z: f32| {
        (0..SIDES).map(move |i| {
            let a = std::f32::consts::TAU * i as f32 / SIDES as f32;
            Point3::new(a.cos(), a.sin(), z)
        })
    };
    let positions = scaled(ring(0.0).chain(ring(1.0)), scale);

    let bottom: Vec<u32> = (0..SIDES).rev().collect();
    let top: Vec<u32> = (SIDES..2 * SIDES).collect();
    let mut quads = Vec::new();
    for i in 0..SIDES {
        let j = (i + 1) % SIDES;
        quads.extend([i, j, j + SIDES, i + SIDES]);
    }

    SourceMesh::new(positions)
        .with_primitive(
            // the hole marker between the caps consumes no indices
            Primitive::polygons([bottom, top].concat(), vec![SIDES as i32, -1, SIDES as i32])
                .with_material(1),
        )
        .with_primitive(Primitive::polygons(quads, vec![4; SIDES as usize]).with_material(2))
}

fn crowded(sets: u32, scale: &Scale3<f32>) -> SourceMesh {
    let corners = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let uvs = VertexData::single("crowded-uv", 2, vec![0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0])
        .expect("crowded uvs fill one stride-2 source");
    let primitive = (0..sets).fold(Primitive::triangles(vec![0, 1, 2]), |p, set| {
        p.with_uvs(IndexList::new(set, 0, vec![0, 1, 2]))
    });
    SourceMesh::new(scaled(corners, scale))
        .with_uvs(uvs)
        .with_primitive(primitive)
}
