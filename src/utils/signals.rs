//! Termination signals forwarded to the scheduler as a quit

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    error::{Error, Result},
    tasks::Control,
};

/// Install handlers for SIGTERM, SIGINT and SIGHUP.
///
/// Returns the task future; the first signal received sends [`Control::Quit`],
/// so the active section's process is killed on the way out.
pub fn quit_on_signal(tx: mpsc::Sender<Control>) -> Result<impl std::future::Future<Output = ()>> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGHUP,
    ])
    .map_err(Error::Signal)?;

    Ok(async move {
        if let Some(signal) = signals.next().await {
            info!("Received signal: {}", signal);
            let _ = tx.send(Control::Quit).await;
        }
    })
}
