#[tokio::main]
async fn main() -> std::process::ExitCode {
    vault_deployer::deploy::start(std::env::args()).await
}
