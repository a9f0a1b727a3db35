// xdna: Reading and writing DNA Strider / SerialCloner .xdna sequence files.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use clap::Parser;
use log::info;

use xdna::Position;
use xdna::SeqRecord;
use xdna::Strand;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

fn read_xdna(
    file: &Path,
) -> Result<SeqRecord, E> {
    let mut conn_in = BufReader::new(File::open(file)?);
    let record = xdna::decode_from_read(&mut conn_in)?;
    info!("Read {} residues and {} features from {}", record.seq.len(), record.features.len(), file.display());
    Ok(record)
}

fn format_position(pos: &Position) -> String {
    match pos {
        Position::Exact(pos) => pos.to_string(),
        Position::Before(pos) => format!("<{}", pos),
        Position::After(pos) => format!(">{}", pos),
    }
}

fn write_summary<W: Write>(
    record: &SeqRecord,
    conn_out: &mut W,
) -> Result<(), E> {
    let topology = record.topology.map_or("unknown".to_string(), |topology| topology.to_string());
    writeln!(conn_out, "id\t{}", record.id)?;
    writeln!(conn_out, "molecule\t{}", record.molecule)?;
    writeln!(conn_out, "topology\t{}", topology)?;
    writeln!(conn_out, "length\t{}", record.seq.len())?;
    writeln!(conn_out, "description\t{}", record.description)?;
    for feature in &record.features {
        let strand = match feature.location.strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        };
        writeln!(conn_out, "{}\t{}\t{}\t{}\t{}",
                 feature.kind,
                 format_position(&feature.location.start),
                 format_position(&feature.location.end),
                 strand,
                 feature.label().unwrap_or(""))?;
    }
    Ok(())
}

fn write_fasta<W: Write>(
    record: &SeqRecord,
    width: usize,
    conn_out: &mut W,
) -> Result<(), E> {
    writeln!(conn_out, ">{}", record.description)?;
    for line in record.seq.chunks(width.max(1)) {
        conn_out.write_all(line)?;
        conn_out.write_all(b"\n")?;
    }
    Ok(())
}

fn run(cli: cli::Cli) -> Result<(), E> {
    // Subcommands:
    match &cli.command {
        // View
        Some(cli::Commands::View {
            input_files,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            let stdout = std::io::stdout();
            let mut conn_out = BufWriter::new(stdout.lock());
            for file in input_files {
                let record = read_xdna(file)?;
                write_summary(&record, &mut conn_out)?;
            }
            conn_out.flush()?;
        },

        // Fasta
        Some(cli::Commands::Fasta {
            input_files,
            out_file,
            width,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            let mut conn_out: Box<dyn Write> = match out_file {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(BufWriter::new(std::io::stdout())),
            };
            for file in input_files {
                let record = read_xdna(file)?;
                write_fasta(&record, *width, &mut conn_out)?;
            }
            conn_out.flush()?;
        },

        // Reencode
        Some(cli::Commands::Reencode {
            input_file,
            out_file,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            let record = read_xdna(input_file)?;
            let (bytes, warnings) = xdna::encode(&[record])?;

            let mut conn_out = BufWriter::new(File::create(out_file)?);
            conn_out.write_all(&bytes)?;
            conn_out.flush()?;

            if !warnings.is_empty() {
                info!("Wrote {} with warnings: {:?}", out_file.display(), warnings);
            }
        },
        None => {
            cli::Cli::command().print_help()?;
        },
    }
    Ok(())
}

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
