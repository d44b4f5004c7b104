use crate::config::Config;
use inquire::{required, Text};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Error occurred trying to prompt user for {field}")]
    #[diagnostic(code(expresso::prompt::io))]
    Read {
        field: &'static str,
        #[source]
        source: inquire::InquireError,
    },

    #[error("expected 'y' or 'n' for {field}, got '{answer}'")]
    #[diagnostic(
        code(expresso::prompt::invalid_answer),
        help("Answer with a single 'y' or 'n'.")
    )]
    InvalidAnswer {
        field: &'static str,
        answer: String,
    },
}

/// Everything one scaffold run needs to know, gathered up front.
#[derive(Debug, Clone)]
pub struct Answers {
    pub project: String,
    pub author: String,
    /// Remote URL, present only when the user said a repository exists.
    pub repository: Option<String>,
    pub typed: bool,
}

/// Parses a yes/no answer ignoring case. Anything but y/n is an error,
/// there is no retry loop.
pub fn parse_yes_no(field: &'static str, answer: &str) -> Result<bool, PromptError> {
    match answer.to_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(PromptError::InvalidAnswer {
            field,
            answer: answer.to_string(),
        }),
    }
}

/// Parses a yes/no answer requiring an exact lowercase 'y' or 'n'.
pub fn parse_yes_no_strict(field: &'static str, answer: &str) -> Result<bool, PromptError> {
    match answer {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(PromptError::InvalidAnswer {
            field,
            answer: answer.to_string(),
        }),
    }
}

/// Runs the interactive question sequence in its fixed order: project
/// name, author, existing-repository flag, remote URL (conditionally),
/// typed variant.
pub fn gather(config: &Config) -> Result<Answers, PromptError> {
    let project = Text::new("Project name:")
        .with_validator(required!("project name is required"))
        .prompt()
        .map_err(|error| PromptError::Read {
            field: "project name",
            source: error,
        })?;

    let author = match &config.author {
        Some(default) => Text::new("Author:").with_default(default),
        None => Text::new("Author:").with_validator(required!("author is required")),
    }
    .prompt()
    .map_err(|error| PromptError::Read {
        field: "author",
        source: error,
    })?;

    let has_repository = Text::new("Existing GitHub repository? [y/n]")
        .prompt()
        .map_err(|error| PromptError::Read {
            field: "existing repository",
            source: error,
        })
        .and_then(|answer| parse_yes_no("existing repository", &answer))?;

    let repository = if has_repository {
        let url = Text::new("Repository URL:")
            .with_validator(required!("repository URL is required"))
            .prompt()
            .map_err(|error| PromptError::Read {
                field: "repository URL",
                source: error,
            })?;

        Some(url)
    } else {
        None
    };

    let typed = Text::new("Use the TypeScript variant? [y/n]")
        .prompt()
        .map_err(|error| PromptError::Read {
            field: "TypeScript variant",
            source: error,
        })
        .and_then(|answer| parse_yes_no_strict("TypeScript variant", &answer))?;

    log::debug!("answers gathered for project: {}", project);

    Ok(Answers {
        project,
        author,
        repository,
        typed,
    })
}
