//! Skeleton dump — prints the skeleton and offsets of a named test polygon.
//!
//! ```text
//! main.rs      — entry point (this file)
//! shapes.rs    — named test polygons
//! ```
//!
//! Usage:
//! ```text
//! cargo run --example dump                      # default (dumbbell)
//! cargo run --example dump -- l_shape 0.5       # shape and offset distance
//! RUST_LOG=skelset=trace cargo run --example dump -- rectangle
//! ```

mod shapes;

use skelset::{Direction, SkeletonError, SkeletonManager};

fn main() -> Result<(), SkeletonError> {
    // Default: WARN for everything, INFO for skelset.
    // Override with RUST_LOG env var (e.g. RUST_LOG=skelset=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("skelset=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "dumbbell".to_owned());
    let distance = args.next().and_then(|d| d.parse().ok()).unwrap_or(1.0);

    let Some(points) = shapes::by_name(&name) else {
        eprintln!("unknown shape `{name}`; available: {}", shapes::NAMES.join(", "));
        return Ok(());
    };

    let manager = SkeletonManager::build(&points)?;
    for direction in [Direction::Interior, Direction::Exterior] {
        println!("== {direction} ==");
        match manager.skeleton_info(direction) {
            Ok(info) => {
                println!("{} vertices, {} edges", info.vertices.len(), info.edges.len());
                for (a, b) in &info.edges {
                    println!("  ({:.3}, {:.3}) -> ({:.3}, {:.3})", a.x, a.y, b.x, b.y);
                }
            }
            Err(err) => {
                println!("unavailable: {err}");
                continue;
            }
        }

        let polygons = manager.offset_polygon(distance, direction)?;
        println!("offset {distance}: {} polygon(s)", polygons.len());
        for polygon in &polygons {
            let coords: Vec<String> = polygon
                .points()
                .iter()
                .map(|p| format!("({:.3}, {:.3})", p.x, p.y))
                .collect();
            println!("  area {:.3}: {}", polygon.area(), coords.join(" "));
        }
    }
    Ok(())
}
