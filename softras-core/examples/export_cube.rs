//! Write the built-in cube as a `.v` model.
//!
//! Usage: cargo run -p softras-core --example export_cube -- cube.v [size]

use softras_core::{encode_vmodel, parse_vmodel, Mesh};
use std::env;
use std::fs;
use std::io;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <output.v> [size]", args[0]);
        std::process::exit(2);
    }

    let size = match args.get(2) {
        Some(s) => s
            .parse::<f32>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("bad size: {e}")))?,
        None => 2.0,
    };

    let cube = Mesh::cube(size);
    let bytes = encode_vmodel(&cube);
    debug_assert_eq!(parse_vmodel(&bytes).as_ref(), Ok(&cube));
    fs::write(&args[1], &bytes)?;

    println!(
        "Wrote {} ({} bytes, {} triangles)",
        args[1],
        bytes.len(),
        cube.triangle_count()
    );
    Ok(())
}
