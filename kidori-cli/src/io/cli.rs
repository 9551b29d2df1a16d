use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kidori::fsize;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info",
        global = true
    )]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Packs a cut list and writes the layout and its cutting diagram
    Pack {
        #[arg(short, long, value_name = "FILE")]
        input_file: PathBuf,
        #[arg(short, long, value_name = "FOLDER")]
        solution_folder: PathBuf,
        /// Name of the resulting diagram, defaults to the input file name. Saved only with `--store`
        #[arg(short, long)]
        name: Option<String>,
        /// Folder of named diagrams to save the result in
        #[arg(long, value_name = "FOLDER")]
        store: Option<PathBuf>,
    },
    /// Moves a placed piece of a saved diagram, if the new position is free
    Move {
        #[arg(long, value_name = "FOLDER")]
        store: PathBuf,
        #[arg(short, long)]
        name: String,
        /// Id of the placed piece
        #[arg(short, long)]
        piece: usize,
        #[arg(short, allow_negative_numbers = true)]
        x: fsize,
        #[arg(short, allow_negative_numbers = true)]
        y: fsize,
    },
    /// Lists the saved diagrams
    List {
        #[arg(long, value_name = "FOLDER")]
        store: PathBuf,
    },
    /// Deletes a saved diagram
    Delete {
        #[arg(long, value_name = "FOLDER")]
        store: PathBuf,
        #[arg(short, long)]
        name: String,
    },
}
