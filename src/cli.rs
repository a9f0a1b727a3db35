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
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Print the sequence summary and features
    View {
        // Input file(s)
        #[arg(group = "input", required = true, help = "Input .xdna file(s)")]
        input_files: Vec<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Convert to FASTA
    Fasta {
        // Input file(s)
        #[arg(group = "input", required = true, help = "Input .xdna file(s)")]
        input_files: Vec<PathBuf>,

        // Output file path, defaults to stdout
        #[arg(short = 'o', long = "output", required = false)]
        out_file: Option<PathBuf>,

        // Residues per line
        #[arg(long = "width", default_value_t = 60)]
        width: usize,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Decode and encode a .xdna file
    Reencode {
        // Input file
        #[arg(group = "input", required = true, help = "Input .xdna file")]
        input_file: PathBuf,

        // Output file path
        #[arg(short = 'o', long = "output", required = true)]
        out_file: PathBuf,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
