use clap::Parser;
use facetport::{Conversion, ConvertOptions, ConvertedMesh};

mod cli;
mod demo;

pub fn main() -> Result<(), facetport::Error> {
    let args = cli::Cli::parse();
    cli::initialize_tracing(&args.log_filter, args.log_format);

    let options = ConvertOptions::default()
        .with_material_mode(args.materials.into())
        .with_channel_limit(args.channel_limit);
    tracing::debug!(?options);

    for demo in args.demos {
        let _span = tracing::info_span!("demo", ?demo).entered();
        let source = demo::build(demo, &args.mesh_scale);
        match facetport::convert(&source, &options)? {
            Some(conversion) => report(demo, &conversion),
            None => tracing::info!("source produced no faces"),
        }
    }
    Ok(())
}

fn report(demo: cli::Demo, conversion: &Conversion) {
    let kind = match conversion.mesh {
        ConvertedMesh::Triangle(_) => "triangle",
        ConvertedMesh::Polygon(_) => "polygon",
    };
    println!(
        "{demo:?}: {kind} mesh, {} vertices, {} faces",
        conversion.mesh.vertex_count(),
        conversion.mesh.face_count()
    );

    let normals = match &conversion.mesh {
        ConvertedMesh::Triangle(m) => m.normals.as_ref().map(|n| n.normals.len()),
        ConvertedMesh::Polygon(m) => m.normals.as_ref().map(|n| n.normals.len()),
    };
    if let Some(pool) = normals {
        println!("  normals: {pool}");
    }

    for (tag, id) in conversion.materials.iter() {
        println!("  material tag {tag} -> id {id}");
    }

    if let ConvertedMesh::Triangle(mesh) = &conversion.mesh {
        for (key, slot) in conversion.channels.iter() {
            let vertices = mesh.channel(slot).map_or(0, |c| c.vertices.len());
            println!(
                "  {:?} set {} (source {}) -> channel {slot}, {vertices} vertices",
                key.family(),
                key.set_index(),
                key.source()
            );
        }
        if !mesh.channels.is_empty() {
            println!("  channels allocated: {}", mesh.channels.len());
        }
    }
}
