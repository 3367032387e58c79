use std::path::PathBuf;

use clap::{Parser, Subcommand};

use map_route::graph::generators::{generate_grid_map, generate_random_map};
use map_route::graph::{save_map, Graph, CURRENT_VERSION};

/// Writes synthetic road maps in the binary map format
#[derive(Parser, Debug)]
#[clap(name = "gen-map", version)]
struct Cli {
    /// Output file
    #[clap(short, long)]
    output: PathBuf,

    /// Format version to write (1 or 2)
    #[clap(long, default_value_t = CURRENT_VERSION)]
    format_version: u8,

    /// Random seed
    #[clap(long, default_value_t = 42)]
    seed: u64,

    #[clap(subcommand)]
    shape: Shape,
}

#[derive(Subcommand, Debug)]
enum Shape {
    /// Rectangular street grid with two-way streets
    Grid {
        #[clap(long)]
        width: usize,
        #[clap(long)]
        height: usize,
        #[clap(long, default_value_t = 100)]
        spacing: i32,
        /// Largest random delay added to each street
        #[clap(long, default_value_t = 20)]
        jitter: u32,
    },
    /// Randomly scattered nodes with random arcs
    Random {
        #[clap(long)]
        nodes: usize,
        #[clap(long, default_value_t = 3)]
        arcs_per_node: usize,
        #[clap(long, default_value_t = 100_000)]
        extent: i32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.format_version == 0 || cli.format_version > CURRENT_VERSION {
        return Err(format!("unsupported format version {}", cli.format_version).into());
    }

    let map = match cli.shape {
        Shape::Grid {
            width,
            height,
            spacing,
            jitter,
        } => generate_grid_map(width, height, spacing, jitter, cli.seed),
        Shape::Random {
            nodes,
            arcs_per_node,
            extent,
        } => generate_random_map(nodes, arcs_per_node, extent, cli.seed),
    }
    .with_version(cli.format_version);

    save_map(&map, &cli.output)?;
    println!(
        "Wrote {} nodes and {} arcs to {}",
        map.vertex_count(),
        map.edge_count(),
        cli.output.display()
    );
    Ok(())
}
