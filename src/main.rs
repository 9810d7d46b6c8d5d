use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use seamm_config::{
    logging::initialize_tracing,
    utilities::get_default_configuration_file_path,
    Document,
};
use tracing::info;

use crate::cli::CLIArgs;

mod cli;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let console_filter = tracing_subscriber::EnvFilter::try_new(&cli_args.console_log_level)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!(
                "Invalid --console-log-level filter: {}.",
                cli_args.console_log_level
            )
        })?;

    let log_file_filter = tracing_subscriber::EnvFilter::try_new(&cli_args.log_file_level)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!("Invalid --log-file-level filter: {}.", cli_args.log_file_level)
        })?;

    let logging_raii_guard = initialize_tracing(
        console_filter,
        log_file_filter,
        cli_args.log_file_output_directory.as_deref(),
        "seamm-config.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    // Load the configuration document.
    let configuration_file_path = match cli_args.configuration_file_path.as_ref() {
        Some(path) => path.clone(),
        None => get_default_configuration_file_path()
            .wrap_err("Could not determine the default configuration file path.")?,
    };

    let document = if cli_args.init {
        Document::load_or_init(&configuration_file_path)
    } else {
        Document::from_path(&configuration_file_path)
    }
    .into_diagnostic()
    .wrap_err_with(|| {
        miette!(
            "Failed to load configuration file: {}.",
            configuration_file_path.display()
        )
    })?;

    info!(
        path = %configuration_file_path.display(),
        "Configuration loaded."
    );

    if cli_args.list_sections {
        for name in document.section_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(section) = cli_args.section.as_deref() else {
        return Err(miette!(
            "No SECTION given. Specify SECTION and KEY, or use --list-sections."
        ));
    };

    if cli_args.dump_section {
        let values = if cli_args.raw {
            document.section_values(section)
        } else {
            document
                .resolve_values(section)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to expand the options of [{}].", section))?
        };

        for (key, value) in &values {
            println!("{key} = {value}");
        }

        return Ok(());
    }

    let Some(key) = cli_args.key.as_deref() else {
        return Err(miette!(
            "No KEY given. Specify SECTION and KEY, or use --dump-section."
        ));
    };

    let value = if cli_args.raw {
        document
            .get(section, key)
            .map(str::to_string)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to look up {}:{}.", section, key))?
    } else {
        document
            .resolve(section, key)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to resolve {}:{}.", section, key))?
    };

    println!("{value}");

    drop(logging_raii_guard);
    Ok(())
}
