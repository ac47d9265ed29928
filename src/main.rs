use fcmdash::{
    app,
    config::{ConfigProvider, EnvVarProvider},
    InjectableServices,
};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let env_config_provider = EnvVarProvider::new(env::vars().collect())?;
    let config = env_config_provider.get_config();

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log::info!("Listening on {}", config.bind_address);

    axum::serve(
        listener,
        app(config, InjectableServices { api_address: None }).await,
    )
    .await?;

    Ok(())
}
