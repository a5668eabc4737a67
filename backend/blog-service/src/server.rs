//! HTTP server lifecycle.

use actix_web::dev::Server;
use std::future::Future;
use std::io;

/// Drive `server` until it exits on its own or `shutdown` resolves.
///
/// On shutdown the server is stopped gracefully and awaited. An early exit
/// returns immediately with the server's own result.
pub async fn run_until_shutdown<F>(server: Server, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::pin!(shutdown);

    let finished = tokio::select! {
        result = &mut server_task => Some(result),
        _ = &mut shutdown => None,
    };

    let result = match finished {
        Some(result) => result,
        None => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            server_task.await
        }
    };

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            tracing::error!("HTTP server failed: {}", e);
            Err(e)
        }
        Err(e) => {
            tracing::error!("HTTP server task join error: {}", e);
            Err(io::Error::new(io::ErrorKind::Other, e.to_string()))
        }
    }
}
