//! tabless - Terminal Viewer for Delimited Tabular Text Files
//!
//! Displays CSV/TSV-like files in a scrollable grid, sniffing the dialect
//! from the file and loading rows incrementally at idle priority.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("tabless")
        .version(tabless::VERSION)
        .about("A terminal viewer for delimited tabular text files")
        .long_about(
            "tabless displays delimiter-separated files (CSV, TSV and friends) in a \
             scrollable spreadsheet-style grid. The delimiter, quoting convention and \
             header row are sniffed from the file, and rows are loaded incrementally \
             so even very large files stay responsive.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the delimited text file to view")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("ROWS")
                .help("Maximum number of data rows to load")
                .default_value("100000")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("geometry")
                .short('g')
                .long("geometry")
                .value_name("WIDTHxHEIGHT")
                .help("Viewport size cap, in character cells")
                .default_value("1000x618"),
        )
        .get_matches();

    let file_path = PathBuf::from(
        matches
            .get_one::<String>("file")
            .expect("file argument is required"),
    );
    let limit = *matches.get_one::<u64>("limit").expect("limit has a default");
    let geometry: tabless::ui::Geometry = matches
        .get_one::<String>("geometry")
        .expect("geometry has a default")
        .parse()?;

    // Validate the file up front; this is the only fatal error class
    tabless::source::validate_file_path(&file_path)?;

    // Sniff the dialect once from a bounded sample, then build the feeder
    let sample = tabless::source::read_sample(&file_path)?;
    let sniffed = tabless::dialect::sniff_or_default(&sample);
    let reader = tabless::source::open_reader(&file_path, &sniffed.dialect)?;
    let feeder = tabless::RowFeeder::new(reader, sniffed.has_header, limit);

    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unnamed>")
        .to_string();

    use tabless::ui::TerminalUI;
    use tabless::Application;

    let frontend = Box::new(TerminalUI::new()?);
    let mut app = Application::new(file_name, feeder, frontend, geometry);

    app.run().context("viewer terminated with an error")?;

    Ok(())
}
