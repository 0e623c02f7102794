//! First deployment step: creates the vault contract.

use {
    crate::{arguments::DeployArguments, chain::VaultChain},
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    contracts::{ContractFactory, alloy::ReaperVaultv1_4},
    std::process::ExitCode,
};

/// Constructor arguments of the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultParams {
    pub want: Address,
    pub token_name: String,
    pub token_symbol: String,
    pub deposit_fee: U256,
    pub tvl_cap: U256,
}

impl VaultParams {
    fn constructor(&self) -> ReaperVaultv1_4::ReaperVaultv1_4::constructorCall {
        ReaperVaultv1_4::ReaperVaultv1_4::constructorCall {
            _token: self.want,
            _name: self.token_name.clone(),
            _symbol: self.token_symbol.clone(),
            _depositFee: self.deposit_fee,
            _tvlCap: self.tvl_cap,
        }
    }
}

/// Deploys a new vault built from `factory` and returns its address once the
/// creation transaction got mined.
pub async fn deploy_vault(
    chain: &dyn VaultChain,
    factory: &ContractFactory,
    params: &VaultParams,
) -> Result<Address> {
    let code = factory
        .deploy_code(&params.constructor())
        .with_context(|| format!("failed to build creation code of {}", factory.name()))?;
    tracing::debug!(contract = factory.name(), ?params, "deploying");

    chain
        .deploy(code)
        .await
        .with_context(|| format!("failed to deploy {}", factory.name()))
}

pub async fn run(args: DeployArguments) -> Result<()> {
    let factory = ContractFactory::from_artifacts(&args.shared.artifacts, &args.shared.contract)
        .context("failed to load contract factory")?;
    let chain = crate::connect(&args.shared).await?;
    deploy_and_report(&chain, &factory, &args.params()).await
}

async fn deploy_and_report(
    chain: &dyn VaultChain,
    factory: &ContractFactory,
    params: &VaultParams,
) -> Result<()> {
    let vault = deploy_vault(chain, factory, params).await?;
    tracing::info!(%vault, "Vault deployed");
    Ok(())
}

/// Entry point of the `deploy-vault` binary.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = match crate::parse_arguments::<DeployArguments>(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    observe::tracing::initialize(&args.shared.logging.observe_config());
    observe::panic_hook::install();
    tracing::info!("running deploy-vault with validated arguments:\n{}", args);

    crate::exit_code(run(args).await)
}
