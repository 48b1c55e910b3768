//! Error types emitted by the WikiHum maintenance CLI.
//!
//! Keep this error type reasonably small, as the command helpers all return
//! `Result<_, CliError>`.

use std::{io, sync::Arc};

use camino::Utf8PathBuf;
use thiserror::Error;
use wikihum_core::{IdError, StoreError, TaskError};
use wikihum_data::{ClientBuildError, TabularError};

/// Errors emitted by the WikiHum maintenance CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable.
        env: &'static str,
    },
    /// Both an access token and a bot password were configured.
    #[error("configure either an access token or a bot password, not both")]
    ConflictingCredentials,
    /// `--write` was requested without credentials.
    #[error("--write needs an access token or a bot password")]
    WriteNeedsCredentials,
    /// The HTTP clients could not be built.
    #[error(transparent)]
    Client(#[from] ClientBuildError),
    /// An argument is not a valid entity or property id.
    #[error("invalid {field} {value:?}: {source}")]
    InvalidId {
        /// Flag name.
        field: &'static str,
        /// Given text.
        value: String,
        /// Parser error.
        #[source]
        source: IdError,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name.
        field: &'static str,
        /// Given path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name.
        field: &'static str,
        /// Given path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name.
        field: &'static str,
        /// Given path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Reading or writing a CSV file failed.
    #[error(transparent)]
    Tabular(#[from] TabularError),
    /// A workflow aborted.
    #[error(transparent)]
    Task(#[from] TaskError),
    /// Loading an entity for display failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The report file could not be opened.
    #[error("failed to open report {path:?}: {source}")]
    OpenReport {
        /// Report path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Writing the report trailer or command output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}
