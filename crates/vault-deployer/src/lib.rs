//! Deployment steps of the CUSD-AGEUR Creditum crypt vault. Each step is a
//! separate binary that sends a single transaction and waits for it to be
//! mined:
//!
//! 1. `deploy-vault` creates the vault contract.
//! 2. `initialize-vault` links the strategy to the vault.
pub mod arguments;
pub mod chain;
pub mod deploy;
pub mod initialize;
#[cfg(test)]
mod testing;

use {
    anyhow::{Result, ensure},
    chain::{Onchain, VaultChain},
    clap::Parser,
    std::process::ExitCode,
};

/// Parses the command line of a binary. Usage errors are printed to stderr
/// and turn into a failing exit code like every other error; `--help` and
/// `--version` print to stdout and exit successfully.
pub(crate) fn parse_arguments<T: Parser>(
    args: impl Iterator<Item = String>,
) -> Result<T, ExitCode> {
    T::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        if err.exit_code() == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    })
}

/// Connects to the node with a provider signing transactions with the
/// configured private key.
pub(crate) async fn connect(args: &arguments::Arguments) -> Result<Onchain> {
    let provider = ethrpc::alloy::provider_with_signer(
        &args.node_url,
        "vault_deployer",
        args.private_key.clone(),
    );
    let chain = Onchain::new(provider);
    check_chain_id(&chain, args.chain_id).await?;
    Ok(chain)
}

/// Fails if the node is on another chain than `expected`. Without an
/// expectation the node is not queried at all.
pub(crate) async fn check_chain_id(chain: &dyn VaultChain, expected: Option<u64>) -> Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let chain_id = chain.chain_id().await?;
    ensure!(
        chain_id == expected,
        "connected to node with chain id {chain_id}, expected {expected}"
    );
    tracing::debug!(chain_id, "connected to expected chain");
    Ok(())
}

/// Maps the result of a deployment step to the exit code of the process.
/// Errors are logged, which writes them to stderr with the default stderr
/// threshold.
pub fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(?err, "deployment step failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        arguments::{DeployArguments, InitializeArguments},
        chain::MockVaultChain,
    };

    fn command_line(args: &[&str]) -> impl Iterator<Item = String> {
        args.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn invalid_arguments_fail_with_regular_exit_code() {
        let result = parse_arguments::<DeployArguments>(command_line(&[
            "deploy-vault",
            "--private-key",
            "not-a-key",
        ]));
        assert_eq!(result.err(), Some(ExitCode::FAILURE));

        let result = parse_arguments::<InitializeArguments>(command_line(&[
            "initialize-vault",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "--vault",
            "0x1234",
        ]));
        assert_eq!(result.err(), Some(ExitCode::FAILURE));
    }

    #[test]
    fn help_exits_successfully() {
        let result =
            parse_arguments::<DeployArguments>(command_line(&["deploy-vault", "--help"]));
        assert_eq!(result.err(), Some(ExitCode::SUCCESS));
    }

    #[test]
    fn exit_code_reflects_result() {
        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
        assert_eq!(
            exit_code(Err(anyhow::anyhow!("node unreachable"))),
            ExitCode::FAILURE
        );
    }

    #[tokio::test]
    async fn chain_id_is_only_checked_when_expected() {
        let mut chain = MockVaultChain::new();
        chain.expect_chain_id().never();
        check_chain_id(&chain, None).await.unwrap();

        let mut chain = MockVaultChain::new();
        chain.expect_chain_id().times(1).returning(|| Ok(250));
        check_chain_id(&chain, Some(250)).await.unwrap();
    }

    #[tokio::test]
    async fn wrong_chain_is_rejected() {
        let mut chain = MockVaultChain::new();
        chain.expect_chain_id().returning(|| Ok(1));
        chain.expect_deploy().never();

        let err = check_chain_id(&chain, Some(250)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "connected to node with chain id 1, expected 250"
        );
    }
}
