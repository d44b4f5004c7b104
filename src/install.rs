use colored::Colorize;
use miette::Diagnostic;
use std::{path::Path, process::Command};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum InstallError {
    #[error("install command is empty")]
    #[diagnostic(
        code(expresso::install::empty),
        help("Set install_command in expresso.toml")
    )]
    Empty,

    #[error("unable to spawn `{command}`")]
    #[diagnostic(
        code(expresso::install::spawn),
        help("Is the package manager on your PATH?")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn format_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Runs an install argv inside `target` with inherited stdio, so the
/// package manager's own output reaches the user directly. A non-zero
/// exit is logged, not recovered from; the subprocess already said what
/// went wrong.
pub fn run(target: &Path, argv: &[String]) -> Result<(), InstallError> {
    let (program, args) = argv.split_first().ok_or(InstallError::Empty)?;

    let rendered = format_command(argv);

    println!("{} {}", "run".blue(), &rendered);

    let status = Command::new(program)
        .args(args)
        .current_dir(target)
        .status()
        .map_err(|error| InstallError::Spawn {
            command: rendered.clone(),
            source: error,
        })?;

    if !status.success() {
        log::warn!("`{}` exited with {}", rendered, status);
    }

    Ok(())
}
