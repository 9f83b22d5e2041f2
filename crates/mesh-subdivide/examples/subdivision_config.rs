//! Example: subdivision configs as TOML or JSON.
//!
//! Run with: `cargo run --example subdivision_config --features config`

#[cfg(not(feature = "config"))]
fn main() {
    eprintln!("This example requires the 'config' feature.");
    eprintln!("Run with: cargo run --example subdivision_config --features config");
}

#[cfg(feature = "config")]
use mesh_subdivide::{subdivide_mesh, Mesh, SubdivisionConfig, SubdivisionScheme};

#[cfg(feature = "config")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a config in code and print both encodings.
    let config = SubdivisionConfig::with_name("smooth-preview")
        .description("Two Loop passes for a quick preview")
        .scheme(SubdivisionScheme::Loop)
        .iterations(2);

    println!("=== TOML ===\n{}", config.to_toml()?);
    println!("=== JSON ===\n{}", config.to_json()?);

    // Parse one back; omitted fields take the defaults.
    let parsed = SubdivisionConfig::from_toml(
        r#"
        name = "keep-corners"
        scheme = "butterfly"
        iterations = 2
        "#,
    )?;
    println!(
        "Parsed '{}': {} x {}, tolerance {}",
        parsed.name, parsed.scheme, parsed.iterations, parsed.tolerance
    );

    // Run it on a cube.
    let mesh = create_test_cube();
    let result = subdivide_mesh(&mesh, &parsed.into_params())?;
    println!("{}", result);
    println!("{}", result.mesh.validate());

    Ok(())
}

/// Unit cube scaled to 10, 12 outward-facing triangles.
#[cfg(feature = "config")]
fn create_test_cube() -> Mesh {
    use nalgebra::Point3;

    Mesh::from_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(0.0, 10.0, 10.0),
        ],
        &[
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ],
    )
}
