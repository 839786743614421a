use clap::Parser;
use log::{error, info};
use seriescat_core::cli::Cli;
use seriescat_core::{write_csv, MetadataHarvester};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    // Verify directory exists
    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Harvesting series under: {}", cli.directory.display());

    let harvester = MetadataHarvester::new(config);
    let records = match harvester.harvest(&cli.directory) {
        Ok(records) => records,
        Err(e) => {
            error!("Harvest failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Harvested {} series", records.len());

    let output = cli.output_path();
    if let Err(e) = write_csv(&output, &records) {
        error!("Failed to write {}: {}", output.display(), e);
        eprintln!("Error: failed to write {}: {}", output.display(), e);
        process::exit(1);
    }

    println!("CSV output completed: {}", output.display());
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
