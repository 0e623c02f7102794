//! Final deployment step: links the strategy to the previously deployed
//! vault. A vault can only be initialized once.

use {
    crate::{arguments::InitializeArguments, chain::VaultChain},
    alloy::primitives::{Address, TxHash},
    anyhow::{Context, Result, ensure},
    contracts::ContractFactory,
    std::process::ExitCode,
};

const INITIALIZE: &str = "initialize";

pub async fn initialize_vault(
    chain: &dyn VaultChain,
    factory: &ContractFactory,
    vault: Address,
    strategy: Address,
) -> Result<TxHash> {
    factory.ensure_function(INITIALIZE)?;
    ensure!(
        !chain.is_initialized(vault).await?,
        "vault {vault} is already initialized"
    );
    tracing::debug!(contract = factory.name(), %vault, %strategy, "initializing");

    let tx = chain
        .initialize(vault, strategy)
        .await
        .with_context(|| format!("failed to initialize vault {vault}"))?;

    let linked = chain.strategy(vault).await?;
    ensure!(
        linked == strategy,
        "vault {vault} is linked to strategy {linked} instead of {strategy}"
    );
    Ok(tx)
}

pub async fn run(args: InitializeArguments) -> Result<()> {
    let factory = ContractFactory::from_artifacts(&args.shared.artifacts, &args.shared.contract)
        .context("failed to load contract factory")?;
    let chain = crate::connect(&args.shared).await?;
    initialize_and_report(&chain, &factory, args.vault, args.strategy).await
}

async fn initialize_and_report(
    chain: &dyn VaultChain,
    factory: &ContractFactory,
    vault: Address,
    strategy: Address,
) -> Result<()> {
    let tx = initialize_vault(chain, factory, vault, strategy).await?;
    tracing::info!(%vault, ?tx, "Vault initialized");
    Ok(())
}

/// Entry point of the `initialize-vault` binary.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = match crate::parse_arguments::<InitializeArguments>(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    observe::tracing::initialize(&args.shared.logging.observe_config());
    observe::panic_hook::install();
    tracing::info!("running initialize-vault with validated arguments:\n{}", args);

    crate::exit_code(run(args).await)
}
