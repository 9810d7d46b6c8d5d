//! Command-line interface definitions for the `seamm-config` binary.

use std::path::PathBuf;

use clap::Parser;


/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "seamm-config",
    author,
    about = "Look up and expand values from the SEAMM configuration file.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `~/SEAMM/seamm.ini`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. Defaults to ~/SEAMM/seamm.ini"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(help = "Section to look up, e.g. SEAMM. Section names are case-sensitive.")]
    pub section: Option<String>,

    #[arg(
        help = "Option to look up within the section, e.g. datastore. \
                Option names are case-insensitive and `-`/`_`-insensitive."
    )]
    pub key: Option<String>,

    #[arg(
        long = "raw",
        help = "Print the stored value as-is, without expanding ${...} references."
    )]
    pub raw: bool,

    #[arg(
        long = "list-sections",
        help = "List the names of the sections in the configuration file and exit."
    )]
    pub list_sections: bool,

    #[arg(
        long = "dump-section",
        help = "Print every option visible from SECTION (including [DEFAULT] \
                fallbacks), fully expanded unless --raw is also given."
    )]
    pub dump_section: bool,

    #[arg(
        long = "init",
        help = "If the configuration file does not exist, create it from the \
                packaged template before reading it."
    )]
    pub init: bool,

    #[arg(
        long = "console-log-level",
        default_value = "warn",
        help = "Tracing filter for console output, e.g. warn or seamm_config=debug."
    )]
    pub console_log_level: String,

    #[arg(
        long = "log-file-directory",
        help = "If specified, tracing output is also written to seamm-config.log \
                in this directory."
    )]
    pub log_file_output_directory: Option<PathBuf>,

    #[arg(
        long = "log-file-level",
        default_value = "debug",
        help = "Tracing filter for the log file, if --log-file-directory is given."
    )]
    pub log_file_level: String,
}
