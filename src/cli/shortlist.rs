//! Organisation repository shortlist operation.

use std::io::{self, Write};

use repominer::ranking::write_results;
use repominer::{
    MinerConfig, MiningError, OctocrabOrganisationGateway, OrganisationGateway,
    OrganisationLocator, PersonalAccessToken, RepositoryShortlist,
};

use super::output::write_shortlist;

/// Shortlists the configured organisation's repositories.
///
/// # Errors
///
/// Returns [`MiningError::Configuration`] if no organisation is configured,
/// gateway errors from GitHub, and [`MiningError::Io`] when the results file
/// cannot be written.
pub async fn run(config: &MinerConfig) -> Result<(), MiningError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(config, OctocrabOrganisationGateway::for_token, &mut stdout).await
}

/// Shortlists repositories using a custom gateway builder.
///
/// This function is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &MinerConfig,
    build_gateway: F,
    writer: &mut W,
) -> Result<(), MiningError>
where
    G: OrganisationGateway,
    F: FnOnce(&PersonalAccessToken, &OrganisationLocator) -> Result<G, MiningError>,
    W: Write,
{
    let organisation = config.require_organisation()?;
    let token = config.resolve_token()?;

    let gateway = build_gateway(&token, &organisation)?;
    let builder = RepositoryShortlist::new(&gateway);
    let selected = builder
        .build(&organisation, &config.shortlist_criteria())
        .await?;

    let names: Vec<String> = if config.rank_by_contributors {
        builder
            .rank_by_contributors(&organisation, selected)
            .await?
            .into_iter()
            .map(|ranked| ranked.repository.full_name)
            .collect()
    } else {
        selected
            .into_iter()
            .map(|repository| repository.full_name)
            .collect()
    };

    let path = write_results(config.results_path(), &names)?;
    write_shortlist(writer, &names, &path)
}
