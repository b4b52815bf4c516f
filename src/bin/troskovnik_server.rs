use troskovnik::{config::ServerConfig, server};

#[tokio::main]
async fn main() {
    troskovnik::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load server configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = server::run(config).await {
        tracing::error!(error = %err, "server terminated");
        std::process::exit(1);
    }
}
