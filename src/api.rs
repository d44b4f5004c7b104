use crate::{
    blueprint,
    config::{Config, CONFIG_FILE},
    errors::{FileOperation, IoError},
    install,
    materialize::{self, Outcome},
    preview,
    prompt::{self, Answers},
    repo,
};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ExpressoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] crate::prompt::PromptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Blueprint(#[from] crate::blueprint::BlueprintError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Repo(#[from] crate::repo::RepoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Install(#[from] crate::install::InstallError),
}

/// Interactive entry point for `expresso new`.
///
/// Runs the question sequence, materializes the blueprint under
/// `destination` (the project name when not given), initializes the
/// repository, then installs dependencies unless told to skip.
///
/// # Errors
///
/// Returns an [`ExpressoError`] if:
///
/// - The config file exists but cannot be read or parsed.
/// - A prompt fails or a yes/no answer is not 'y' or 'n'.
/// - A template entry cannot be rendered.
/// - Repository initialization fails.
/// - The package manager cannot be spawned.
pub fn new_project(destination: Option<&str>, skip_install: bool) -> Result<(), ExpressoError> {
    let config = Config::load_or_default(CONFIG_FILE)?;

    let answers = prompt::gather(&config)?;

    let destination = destination.unwrap_or(&answers.project);

    let cwd = std::env::current_dir()
        .map_err(|error| IoError::new(FileOperation::Resolve, PathBuf::from(destination), error))?;

    let target = materialize::resolve(&cwd, destination);

    scaffold(&answers, &target, &config)?;

    if skip_install {
        log::debug!("skipping dependency installation");

        return Ok(());
    }

    install_dependencies(&answers, &target, &config)
}

/// Materializes the blueprint into `target` and initializes the
/// repository. Nothing here touches the network.
pub fn scaffold(answers: &Answers, target: &Path, config: &Config) -> Result<(), ExpressoError> {
    let blueprint = blueprint::render(answers)?;

    preview::print_plan(&blueprint, target);

    let mut created_dirs = 0usize;
    let mut created_files = 0usize;
    let mut skipped = 0usize;

    for (path, content) in &blueprint.entries {
        // one failing entry must not keep the rest from being attempted
        match materialize::materialize(target, path, content) {
            Ok(Outcome::CreatedDir) => created_dirs += 1,
            Ok(Outcome::CreatedFile) => created_files += 1,
            Ok(Outcome::Skipped) => skipped += 1,
            Err(error) => log::error!("failed to create {}: {}", path, error),
        }
    }

    println!(
        "{} directories and {} files created, {} skipped",
        created_dirs, created_files, skipped
    );

    repo::initialize(target, &config.default_branch, answers.repository.as_deref())?;

    Ok(())
}

/// Runs the package-manager install inside `target`, plus the
/// type-definition install for the typed variant.
pub fn install_dependencies(
    answers: &Answers,
    target: &Path,
    config: &Config,
) -> Result<(), ExpressoError> {
    install::run(target, &config.install_command)?;

    if answers.typed {
        install::run(target, &config.typed_install_command)?;
    }

    Ok(())
}
