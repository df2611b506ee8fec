use std::error::Error;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use gis_layer_splitter::process_file;
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "map_all.geojson";
const DEFAULT_OUTPUT: &str = ".";

fn main() {
    let matches = Command::new("GIS Layer Splitter")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Jesper Fjellin")
        .about("Splits a GeoJSON file into water, green, buildings and roads layers")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_INPUT)
                .help("Input GeoJSON feature collection"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT)
                .help("Directory the layer files are written to (created if missing)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v info, -vv debug)"),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let input = matches.get_one::<PathBuf>("input").unwrap();
    let output = matches.get_one::<PathBuf>("output").unwrap();

    match process_file(input, output) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            eprintln!("Error: {}", error_chain(&e));
            std::process::exit(1);
        }
    }
}

/// `err` followed by each of its sources, joined with `: `.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
