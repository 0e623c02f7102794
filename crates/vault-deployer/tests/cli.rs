//! Runs the deployment binaries and checks that the outcome reaches the
//! caller through the exit code and the output streams.

use {
    serde_json::json,
    std::{
        fs,
        path::Path,
        process::{Command, Output},
    },
    tempfile::TempDir,
};

const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
// Nothing listens on port 1, so every request is refused right away.
const UNREACHABLE_NODE: &str = "http://127.0.0.1:1";

fn write_vault_artifact(dir: &Path) {
    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "ReaperVaultv1_4",
        "sourceName": "contracts/ReaperVaultv1_4.sol",
        "abi": [
            {
                "type": "function",
                "name": "initialize",
                "inputs": [{ "name": "_strategy", "type": "address", "internalType": "address" }],
                "outputs": [{ "name": "", "type": "bool", "internalType": "bool" }],
                "stateMutability": "nonpayable"
            }
        ],
        "bytecode": "0x608060405234801561001057600080fd5b50",
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    let path = dir.join("contracts/ReaperVaultv1_4.sol/ReaperVaultv1_4.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, artifact.to_string()).unwrap();
}

fn run(binary: &str, artifacts: &Path) -> Output {
    Command::new(binary)
        .args([
            "--node-url",
            UNREACHABLE_NODE,
            "--private-key",
            PRIVATE_KEY,
            "--log-filter",
            "warn,vault_deployer=debug",
            "--log-stderr-threshold",
            "error",
        ])
        .arg("--artifacts")
        .arg(artifacts)
        .output()
        .unwrap()
}

#[test]
fn deploy_fails_without_artifact() {
    let artifacts = TempDir::new().unwrap();

    let output = run(env!("CARGO_BIN_EXE_deploy-vault"), artifacts.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load contract factory"), "{stderr}");
}

#[test]
fn deploy_fails_when_node_is_unreachable() {
    let artifacts = TempDir::new().unwrap();
    write_vault_artifact(artifacts.path());

    let output = run(env!("CARGO_BIN_EXE_deploy-vault"), artifacts.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to deploy ReaperVaultv1_4"), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Vault deployed"), "{stdout}");
}

#[test]
fn initialize_fails_when_node_is_unreachable() {
    let artifacts = TempDir::new().unwrap();
    write_vault_artifact(artifacts.path());

    let output = run(env!("CARGO_BIN_EXE_initialize-vault"), artifacts.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to read initialization state of vault"),
        "{stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Vault initialized"), "{stdout}");
}

#[test]
fn missing_private_key_fails_with_regular_exit_code() {
    let artifacts = TempDir::new().unwrap();
    write_vault_artifact(artifacts.path());

    let output = Command::new(env!("CARGO_BIN_EXE_deploy-vault"))
        .env_remove("PRIVATE_KEY")
        .args(["--node-url", UNREACHABLE_NODE])
        .arg("--artifacts")
        .arg(artifacts.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--private-key"), "{stderr}");
}

#[test]
fn help_exits_successfully() {
    let output = Command::new(env!("CARGO_BIN_EXE_initialize-vault"))
        .arg("--help")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--strategy"), "{stdout}");
}
