#[tokio::main]
async fn main() -> std::process::ExitCode {
    vault_deployer::initialize::start(std::env::args()).await
}
