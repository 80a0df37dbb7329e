use mailrelay::{config::AppConfig, App, Result};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        mailrelay::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        mailrelay::init_dbg_tracing();
    }

    // Fail before binding anything if the environment is incomplete.
    let config = AppConfig::from_env()
        .inspect_err(|er| error!("Fatal Error: Building config: {er}"))?;

    let app = App::build_from_config(config).await?;
    mailrelay::serve(app).await?;

    Ok(())
}
