use crate::{
    errors::IoError,
    materialize::{materialize, Outcome},
};
use git2::Repository;
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

const IGNORE_FILE: &str = ".gitignore";
const IGNORE_CONTENT: &str = "node_modules/\n.env.*\n";

#[derive(Debug, Error, Diagnostic)]
pub enum RepoError {
    #[error("I/O error within repository domain")]
    #[diagnostic(code(expresso::repo::io))]
    Io(#[from] IoError),

    #[error("unable to initialize repository at '{path}'")]
    #[diagnostic(code(expresso::repo::init))]
    Init {
        path: std::path::PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("unable to point HEAD at branch '{branch}'")]
    #[diagnostic(code(expresso::repo::branch))]
    Branch {
        branch: String,
        #[source]
        source: git2::Error,
    },

    #[error("unable to add remote '{url}'")]
    #[diagnostic(code(expresso::repo::remote))]
    Remote {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("'{url}' does not look like a git remote")]
    #[diagnostic(
        code(expresso::repo::invalid_remote),
        help("Valid forms: gh:user/repo, gl:user/repo, git@host:user/repo.git, https://host/user/repo.git")
    )]
    InvalidRemote { url: String },
}

fn is_git_remote(url: &str) -> bool {
    lazy_static::lazy_static! {
        static ref GIT_URL_REGEX: regex::Regex = regex::Regex::new(
            r"(?x)        # Enable extended mode
            ^(?:
                # 1) gh:account/repo
                gh:[^/]+/[^/]+
                |
                # 2) gl:account/repo
                gl:[^/]+/[^/]+
                |
                # 3) git@host:account/repo.git
                git@[A-Za-z0-9._-]+:[^/]+/[^/]+\.git
                |
                # 4) http(s):// or git+http(s)://...
                (?:git\+)?https?://.*
            )$"
        ).expect("a valid regex pattern");
    }

    GIT_URL_REGEX.is_match(url)
}

/// Expands gh:/gl: shorthand into a full clone URL; full URLs pass
/// through untouched.
pub fn expand_remote_url(url: &str) -> Result<String, RepoError> {
    if !is_git_remote(url) {
        return Err(RepoError::InvalidRemote {
            url: url.to_string(),
        });
    }

    if let Some(stripped) = url.strip_prefix("gh:") {
        Ok(format!("https://github.com/{}.git", stripped))
    } else if let Some(stripped) = url.strip_prefix("gl:") {
        Ok(format!("https://gitlab.com/{}.git", stripped))
    } else {
        Ok(url.to_string())
    }
}

/// Initializes a repository in `target`, moves HEAD to `branch`, wires
/// up the `origin` remote when a URL was supplied, and writes the ignore
/// file through the same creation path as every other entry.
pub fn initialize(target: &Path, branch: &str, remote: Option<&str>) -> Result<(), RepoError> {
    let repository = Repository::init(target).map_err(|error| RepoError::Init {
        path: target.to_path_buf(),
        source: error,
    })?;

    // equivalent of renaming the default branch before the first commit
    let head = format!("refs/heads/{}", branch);
    repository
        .set_head(&head)
        .map_err(|error| RepoError::Branch {
            branch: branch.to_string(),
            source: error,
        })?;

    if let Some(url) = remote {
        let expanded = expand_remote_url(url)?;

        repository
            .remote("origin", &expanded)
            .map_err(|error| RepoError::Remote {
                url: expanded.clone(),
                source: error,
            })?;

        log::debug!("origin set to {}", expanded);
    }

    if let Outcome::Skipped = materialize(target, IGNORE_FILE, IGNORE_CONTENT)? {
        log::debug!("ignore file already present, left untouched");
    }

    Ok(())
}
