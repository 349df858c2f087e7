use statichost::config::Config;
use statichost::logger;
use statichost::server::Server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    // Size the Tokio runtime from config, defaulting to one worker per core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Construction is fail-fast: broken TLS material or an unbindable
    // address must abort startup before any connection is accepted.
    let server = Server::construct(&cfg)?;

    logger::log_server_start(&server.local_addr(), &cfg);

    server.listen().await?;
    Ok(())
}
