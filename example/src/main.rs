use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};

const DEFAULT_ADDR: &str = "0.0.0.0:42069";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_owned());
    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {}", listener.local_addr()?);

    loop {
        let (io, peer) = match listener.accept().await {
            Ok(ok) => ok,
            Err(err) => {
                log::error!("failed to accept connection: {err}");
                continue;
            }
        };

        tokio::spawn(connection(io, peer));
    }
}

async fn connection(io: TcpStream, peer: SocketAddr) {
    let config = reqline::Config::new().max_line_len(8 * 1024);

    match reqline::request_from_async_reader_with(io, &config).await {
        Ok(request) => {
            let line = request.request_line();
            log::info!(
                "{peer}: method: {}, target: {}, version: {}",
                line.method(),
                String::from_utf8_lossy(line.request_target()),
                line.http_version().as_str(),
            );
        }
        Err(reqline::Error::Closed) => log::debug!("{peer}: closed"),
        Err(err) => log::warn!("{peer}: {err}"),
    }
}
