use anyhow::Result;
use sap_assist::{Config, GroqClient, Session};
use sap_assist::ui::TerminalForm;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the form on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(endpoint = %config.endpoint, model = config.default_model.model_id(), "starting");

    let client = GroqClient::with_endpoint(config.endpoint.clone());
    let mut session = Session::new(config.default_model);
    let mut form = TerminalForm::new(client)?;
    form.run(&mut session).await?;

    Ok(())
}
