//! Command handling for the `pr-inbox` binary.
//!
//! - [`target`]: Resolve the repository and pull request to summarise
//! - [`output`]: Write the inbox in the selected format
//!
//! [`run`] wires configuration, discovery, fetching, and output together.

use std::io::{self, Write};

use camino::Utf8PathBuf;
use octocrab::Octocrab;
use pr_inbox::config::{CliArgs, ConfigSources, InboxConfig};
use pr_inbox::github::{
    GITHUB_API_BASE, InboxError, OctocrabThreadSource, PullRequestLocator, RepositoryLocator,
};
use pr_inbox::inbox::build_inbox;
use pr_inbox::local::{LocalRepository, discover_repository};
use pr_inbox::update::UpdateCheck;

pub mod output;
pub mod target;

#[cfg(test)]
pub mod test_utils;

/// Version compared against the latest release tag.
const CURRENT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Builds and prints the inbox for one pull request.
///
/// # Errors
///
/// Returns the first configuration, resolution, API, or output error.
pub async fn run(cli: CliArgs) -> Result<(), InboxError> {
    let local = discover_local_repository();
    let sources = ConfigSources::discover(local.as_ref().map(LocalRepository::workdir), cli);
    let config = InboxConfig::load(&sources)?;

    let format = config.output_format()?;
    let options = config.compact_options()?;
    let token = config.resolve_token()?;
    let repository = target::resolve_repository(&config, local.as_ref())?;
    let source = OctocrabThreadSource::for_token(
        &token,
        repository.api_base().as_str().trim_end_matches('/'),
    )?;

    let mut update_check = if config.no_update_check {
        None
    } else {
        Some(UpdateCheck::spawn(
            update_client(&source, &repository)?,
            CURRENT_VERSION,
        ))
    };

    let number =
        target::resolve_pull_request(&config, &source, &repository, local.as_ref()).await?;
    let locator = PullRequestLocator::new(repository, number);
    tracing::debug!("building inbox for {}#{}", locator.repository().slug(), number);

    let inbox = build_inbox(&source, &locator, config.include_issue_comments, options).await?;

    if let Some(notice) = update_check.as_mut().and_then(UpdateCheck::try_take) {
        writeln!(io::stderr().lock(), "{notice}").map_err(|error| InboxError::io(&error))?;
    }

    let template = output::resolve_template(
        sources.cli.prompt.as_deref(),
        config.prompt_file.as_deref(),
        config.prompt.as_deref(),
    )?;
    let mut stdout = io::stdout().lock();
    output::write_inbox(&mut stdout, format, &inbox, template.as_deref())
}

/// Discovers the checkout containing the working directory, if any.
fn discover_local_repository() -> Option<LocalRepository> {
    let cwd = std::env::current_dir()
        .ok()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())?;

    discover_repository(&cwd)
        .inspect_err(|error| tracing::debug!("local discovery skipped: {error}"))
        .ok()
}

/// Releases are published on github.com, so enterprise runs use an
/// anonymous public client instead of the enterprise one.
fn update_client(
    source: &OctocrabThreadSource,
    repository: &RepositoryLocator,
) -> Result<Octocrab, InboxError> {
    if repository.api_base().as_str().trim_end_matches('/') == GITHUB_API_BASE {
        return Ok(source.client().clone());
    }
    Octocrab::builder().build().map_err(|error| InboxError::Api {
        message: format!("build update client failed: {error}"),
    })
}
