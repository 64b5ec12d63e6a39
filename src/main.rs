// ABOUTME: Entry point for the konvoy CLI application.
// ABOUTME: Parses arguments, runs the conversion, and exits non-zero on the first error.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, ConvertArgs};
use konvoy::diagnostics::Diagnostics;
use konvoy::emit;
use konvoy::error::Result;
use konvoy::model::ServiceModel;
use konvoy::options::{ConvertOptions, Destination, EmitFlags};
use konvoy::output::{Output, OutputMode};
use konvoy::serializer::OutputFormat;
use konvoy::transformer;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    let result = match cli.command {
        Commands::Convert(args) => convert(args, Output::new(mode)),
    };

    if let Err(e) = result {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

fn convert_options(args: &ConvertArgs) -> Result<ConvertOptions> {
    let input = match &args.file {
        Some(path) => path.clone(),
        None => ServiceModel::locate(&env::current_dir()?)?,
    };

    let destination = if args.stdout {
        Destination::Stdout
    } else {
        match &args.out {
            Some(path) => Destination::from_out_path(path),
            None => Destination::default(),
        }
    };

    let emit = EmitFlags {
        deployment: args.deployment,
        daemon_set: args.daemon_set,
        replication_controller: args.replication_controller,
        deployment_config: args.deployment_config,
        chart: args.chart,
    }
    .or_default_controller();

    let options = ConvertOptions {
        input,
        replicas: args.replicas,
        format: OutputFormat::from_yaml_flag(args.yaml),
        destination,
        emit,
    };
    options.validate()?;
    Ok(options)
}

fn convert(args: ConvertArgs, output: Output) -> Result<()> {
    let options = convert_options(&args)?;
    let model = ServiceModel::load(&options.input)?;

    // Stdout carries the manifests themselves, so feedback stays off it.
    let output = if options.destination == Destination::Stdout {
        Output::quiet()
    } else {
        output
    };

    let mut diag = Diagnostics::default();
    let bundle = transformer::transform(&model, &options, &mut diag)?;
    emit::emit(&bundle, &options, &output)?;

    if diag.has_warnings() {
        tracing::debug!(warnings = diag.warnings().len(), "conversion finished with warnings");
    }
    Ok(())
}
