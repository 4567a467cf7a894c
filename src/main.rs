use anyhow::Context;
use turtle_site::configuration::get_configuration;
use turtle_site::startup::Application;
use turtle_site::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may come from a local .env file instead of the shell
    dotenv::dotenv().ok();

    let subscriber =
        get_subscriber("turtle_site".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration =
        get_configuration().context("Failed to read configuration")?;

    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;

    Ok(())
}
