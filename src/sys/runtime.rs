use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// One background thread hosting the tokio runtime for the control socket
/// and the config watcher. The GTK main thread stays free of async I/O.
pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::Builder::new()
        .name("fabmenu-services".into())
        .spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(tx).await;
                    });
                }

                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                std::future::pending::<()>().await;
            });
        })
        .map(|_| ())
        .unwrap_or_else(|e| log::error!("Failed to spawn service thread: {}", e));
}
