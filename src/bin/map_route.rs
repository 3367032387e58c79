use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::error;
use serde::Serialize;

use map_route::graph::{Graph, GraphLoader, LoaderConfig};
use map_route::{Dijkstra, ErrorKind, QueryReader, RoadMap, ShortestPathAlgorithm};

/// Plans routes in a binary road map
#[derive(Parser, Debug)]
#[clap(name = "map-route", version)]
struct Cli {
    /// Binary road map file
    datafile: PathBuf,

    /// File with whitespace-separated 1-based source/target pairs, or "-" for stdin
    queries: String,

    /// Emit one JSON object per query instead of plain text
    #[clap(long)]
    json: bool,

    /// Abort any single query after this many milliseconds
    #[clap(long)]
    deadline_ms: Option<u64>,

    /// Largest node count accepted from the map header
    #[clap(long, default_value_t = LoaderConfig::default().max_nodes)]
    max_nodes: usize,

    /// Largest arc count accepted for a single node
    #[clap(long, default_value_t = LoaderConfig::default().max_arcs_per_node)]
    max_arcs_per_node: usize,
}

#[derive(Debug, Serialize)]
struct RouteReport {
    source: usize,
    target: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    seconds: f64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let loader = GraphLoader::with_config(LoaderConfig {
        max_nodes: cli.max_nodes,
        max_arcs_per_node: cli.max_arcs_per_node,
    });

    let start = Instant::now();
    let map = match loader.load_file(&cli.datafile) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error loading {}: {}", cli.datafile.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Loaded {} nodes in {:.6} seconds",
        map.vertex_count(),
        start.elapsed().as_secs_f64()
    );

    let input: Box<dyn BufRead> = if cli.queries == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(&cli.queries) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error opening query file {}: {}", cli.queries, e);
                return ExitCode::FAILURE;
            }
        }
    };

    let mut solver = Dijkstra::new();
    if let Some(ms) = cli.deadline_ms {
        solver = solver.with_deadline(Duration::from_millis(ms));
    }

    match run_queries(&map, &solver, input, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Aborting query stream: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Answers every query in the stream. Per-query failures are reported and
/// skipped; read errors and internal errors end the run.
fn run_queries(
    map: &RoadMap,
    solver: &Dijkstra,
    input: Box<dyn BufRead>,
    json: bool,
) -> map_route::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for query in QueryReader::new(input, map.vertex_count()) {
        let query = match query {
            Ok(query) => query,
            Err(e) if e.kind() == ErrorKind::InvalidQuery => {
                eprintln!("{}", e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if !json {
            writeln!(out, "finding a route from {} to {}", query.source, query.target)?;
        }

        let start = Instant::now();
        let outcome = solver
            .solve(map, query.source, query.target)
            .and_then(|result| result.route().map(|route| (route, result.cost)));
        let seconds = start.elapsed().as_secs_f64();

        let mut report = RouteReport {
            source: query.source,
            target: query.target,
            route: None,
            cost: None,
            error: None,
            seconds,
        };

        match outcome {
            Ok((route, cost)) => {
                if !json {
                    for vertex in &route {
                        writeln!(out, "{}", vertex)?;
                    }
                    writeln!(out, "cost: {}", cost)?;
                    writeln!(out, "time: {:.6} seconds", seconds)?;
                }
                report.route = Some(route);
                report.cost = Some(cost);
            }
            Err(e) if e.kind() == ErrorKind::Internal => return Err(e),
            Err(e) => {
                if !json {
                    writeln!(out, "{}", e)?;
                }
                report.error = Some(e.to_string());
            }
        }

        if json {
            let line = serde_json::to_string(&report).map_err(io::Error::from)?;
            writeln!(out, "{}", line)?;
        }
    }

    Ok(())
}
