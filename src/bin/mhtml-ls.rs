use anyhow::Result;
use mhtml_language_server::lsp::server::serve;
use mhtml_language_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;
    config.init_logging();
    serve(config).await
}
