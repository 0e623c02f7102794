//! Command line arguments of the deployment binaries. Every value the
//! deployment steps submit on-chain defaults to the parameters of the
//! CUSD-AGEUR Creditum crypt.

use {
    crate::deploy::VaultParams,
    alloy::{
        primitives::{Address, U256, address},
        signers::local::PrivateKeySigner,
    },
    contracts::alloy::ReaperVaultv1_4,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::Level,
    url::Url,
};

/// Token deposited into the vault.
pub const WANT: Address = address!("0x1b371a952A3246dAc40530D400d86b5d36655ad1");
pub const TOKEN_NAME: &str = "CUSD-AGEUR Creditum Crypt";
pub const TOKEN_SYMBOL: &str = "rf-CUSD-AGEUR";
pub const DEPOSIT_FEE: U256 = U256::ZERO;
/// Deposits are not capped.
pub const TVL_CAP: U256 = U256::MAX;

/// Vault created by `deploy-vault`.
pub const VAULT: Address = address!("0x63AFF1c026b79f28990A8E81eEB8b5D4c306DB1B");
/// Strategy managing the vault's deposits.
pub const STRATEGY: Address = address!("0xd7c7Be67819247eBB8fc8Ec8922b2d101d8514D6");

#[derive(clap::Parser)]
#[group(skip)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,vault_deployer=debug,contracts=debug,ethrpc=info"
    )]
    pub log_filter: String,

    /// Log events at or above this level are written to stderr.
    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: Level,

    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl LoggingArguments {
    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(
            &self.log_filter,
            self.log_stderr_threshold,
            self.use_json_logs,
        )
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

/// Arguments shared by both deployment steps.
#[derive(clap::Parser)]
#[group(skip)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Private key of the account sending the transactions.
    #[clap(long, env)]
    pub private_key: PrivateKeySigner,

    /// The chain ID the node is expected to be on. Nothing gets submitted
    /// when the connected node reports a different one.
    #[clap(long, env)]
    pub chain_id: Option<u64>,

    /// Directory containing the Hardhat compilation artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Name of the vault contract. Use `<source>:<contract>` if the name is
    /// not unique within the artifacts.
    #[clap(long, env, default_value = ReaperVaultv1_4::NAME)]
    pub contract: String,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            private_key,
            chain_id,
            artifacts,
            contract,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "sender: {}", private_key.address())?;
        writeln!(f, "chain_id: {chain_id:?}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "contract: {contract}")?;
        Ok(())
    }
}

#[derive(clap::Parser)]
pub struct DeployArguments {
    #[clap(flatten)]
    pub shared: Arguments,

    /// Token the vault accepts deposits in.
    #[clap(long, env, default_value_t = WANT)]
    pub want: Address,

    /// Name of the vault's share token.
    #[clap(long, env, default_value = TOKEN_NAME)]
    pub token_name: String,

    /// Symbol of the vault's share token.
    #[clap(long, env, default_value = TOKEN_SYMBOL)]
    pub token_symbol: String,

    /// Fee charged on deposits.
    #[clap(long, env, default_value_t = DEPOSIT_FEE)]
    pub deposit_fee: U256,

    /// Maximum amount of `want` the vault accepts.
    #[clap(long, env, default_value_t = TVL_CAP)]
    pub tvl_cap: U256,
}

impl DeployArguments {
    pub fn params(&self) -> VaultParams {
        VaultParams {
            want: self.want,
            token_name: self.token_name.clone(),
            token_symbol: self.token_symbol.clone(),
            deposit_fee: self.deposit_fee,
            tvl_cap: self.tvl_cap,
        }
    }
}

impl Display for DeployArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            shared,
            want,
            token_name,
            token_symbol,
            deposit_fee,
            tvl_cap,
        } = self;

        write!(f, "{shared}")?;
        writeln!(f, "want: {want}")?;
        writeln!(f, "token_name: {token_name}")?;
        writeln!(f, "token_symbol: {token_symbol}")?;
        writeln!(f, "deposit_fee: {deposit_fee}")?;
        writeln!(f, "tvl_cap: {tvl_cap}")?;
        Ok(())
    }
}

#[derive(clap::Parser)]
pub struct InitializeArguments {
    #[clap(flatten)]
    pub shared: Arguments,

    /// Address of the vault to initialize.
    #[clap(long, env, default_value_t = VAULT)]
    pub vault: Address,

    /// Strategy the vault gets linked to.
    #[clap(long, env, default_value_t = STRATEGY)]
    pub strategy: Address,
}

impl Display for InitializeArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            shared,
            vault,
            strategy,
        } = self;

        write!(f, "{shared}")?;
        writeln!(f, "vault: {vault}")?;
        writeln!(f, "strategy: {strategy}")?;
        Ok(())
    }
}
