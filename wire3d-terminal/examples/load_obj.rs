/// Example: Report on an OBJ file, then render it in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj
use anyhow::Result;
use std::env;
use wire3d_core::{load_obj, Mesh, RenderConfig};

fn main() -> Result<()> {
    let Some(path) = env::args().nth(1) else {
        eprintln!("Usage: load_obj <obj-file>");
        eprintln!("\nNo OBJ file provided, using default cube...");
        return wire3d_terminal::run(Mesh::cube(0.0, 0.0, 0.0, 1.0), &RenderConfig::default());
    };

    println!("Loading OBJ file: {path}");
    let load = load_obj(&path)?;

    println!(
        "{} vertices, {} triangles",
        load.vertex_count,
        load.mesh.len()
    );
    if load.out_of_range_faces > 0 {
        println!("{} faces dropped (vertex index out of range)", load.out_of_range_faces);
    }
    for skipped in &load.skipped {
        println!("skipped {skipped}");
    }

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));
    wire3d_terminal::run(load.mesh, &RenderConfig::default())?;

    println!("Thank you for using wire3d!");
    Ok(())
}
