use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use clap::Parser as ClapParser;
use kidori::io::svg::layout_to_svg;
use kidori::io::{export_layout, export_outcome, import_cut_list, import_layout};
use kidori::packing::Packer;
use kidori::session::PackingSession;
use kidori_cli::config::CliConfig;
use kidori_cli::diagram_store::DiagramStore;
use kidori_cli::io;
use kidori_cli::io::cli::{Cli, Command};
use log::{info, warn};
use thousands::Separable;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => io::read_json(&config_file).context("incorrect config file format")?,
    };

    info!("Successfully parsed CliConfig: {config:?}");

    match args.command {
        Command::Pack {
            input_file,
            solution_folder,
            name,
            store,
        } => main_pack(&input_file, &solution_folder, name, store.as_deref(), config),
        Command::Move {
            store,
            name,
            piece,
            x,
            y,
        } => main_move(&DiagramStore::open(&store, config.pretty_json)?, &name, piece, x, y),
        Command::List { store } => {
            let store = DiagramStore::open(&store, config.pretty_json)?;
            let names = store.list()?;
            info!("[MAIN] {} diagrams in {}", names.len(), store.folder().display());
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Command::Delete { store, name } => DiagramStore::open(&store, config.pretty_json)?.delete(&name),
    }
}

fn main_pack(
    input_file: &Path,
    output_folder: &Path,
    name: Option<String>,
    store: Option<&Path>,
    config: CliConfig,
) -> Result<()> {
    let input_stem = input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file should have a valid name")?;

    if !output_folder.exists() {
        fs::create_dir_all(output_folder)
            .with_context(|| format!("could not create solution folder: {}", output_folder.display()))?;
    }

    let cut_list = import_cut_list(&io::read_cut_list(input_file)?)?;
    let total_area = cut_list.pieces().iter().map(|p| p.total_area()).sum::<f64>();
    info!(
        "[MAIN] packing {} units of {} pieces, total area {}",
        cut_list.n_instances(),
        cut_list.pieces().len(),
        (total_area.round() as u64).separate_with_commas()
    );

    let outcome = Packer::new(cut_list.pack_config())?.pack(&cut_list.expand());
    if !outcome.is_complete() {
        warn!("[MAIN] {} pieces could not be placed", outcome.unplaced.len());
    }

    let diagram_name = name.unwrap_or_else(|| input_stem.to_string());
    let diagram = export_outcome(&diagram_name, &cut_list, &outcome);

    {
        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&diagram, &solution_path, config.pretty_json)?;
    }

    {
        let svg_path = output_folder.join(format!("sol_{input_stem}.svg"));
        let svg = layout_to_svg(&outcome.layout, config.svg_draw_options, &diagram_name);
        io::write_svg(&svg, &svg_path)?;
    }

    if let Some(store) = store {
        DiagramStore::open(store, config.pretty_json)?.save(&diagram)?;
    }

    Ok(())
}

fn main_move(store: &DiagramStore, name: &str, piece: usize, x: f64, y: f64) -> Result<()> {
    let mut diagram = store.load(name)?;
    ensure!(!diagram.layouts.is_empty(), "diagram {name:?} contains no layout");

    let cut_list = import_cut_list(&diagram.cut_list)?;
    let layout = import_layout(&diagram.layouts[0])?;
    let mut session = PackingSession::with_layout(cut_list, layout);

    let outcome = session.move_piece(piece, x, y)?;
    let (x, y) = outcome.position();
    match outcome.is_accepted() {
        true => info!("[MAIN] moved piece {piece} to ({x:.1}, {y:.1})"),
        false => warn!("[MAIN] move rejected, piece {piece} overlaps another piece there and stays at ({x:.1}, {y:.1})"),
    }

    if let Some(layout) = session.layout() {
        diagram.layouts[0] = export_layout(layout);
    }
    store.save(&diagram)?;
    Ok(())
}
