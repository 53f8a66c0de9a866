use crate::{
    config::Config,
    database,
    router::router,
    state::{ServerState, ServerStateData},
};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::{error, info};
use tokio::net::TcpListener;

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db_pool = database::init_db(&config).await?;
    let server_state = ServerStateData::from_config(db_pool, &config)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("API listening on {}", addr);

    serve(listener, server_state).await
}

pub async fn serve(
    listener: TcpListener,
    server_state: ServerState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let state_clone = server_state.clone();

        tokio::task::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, service_fn(move |req| router(req, state_clone.clone())))
                .await
            {
                error!("server error: {}", err);
            }
        });
    }
}
