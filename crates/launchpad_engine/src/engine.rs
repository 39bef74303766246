use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use launchpad_logging::{launch_debug, launch_warn};

use crate::fetch::{FetchSettings, LaunchFetcher, ReqwestFetcher};
use crate::{EngineEvent, PageQuery, RequestId};

enum EngineCommand {
    FetchPage {
        request_id: RequestId,
        query: PageQuery,
    },
}

/// Handle to the background fetch worker.
///
/// The worker owns a tokio runtime on its own thread. Dropping the handle
/// closes the command channel, which stops the worker and cancels any
/// request still waiting on the pacing delay or the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        let pacing_delay = settings.pacing_delay;
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)), pacing_delay)
    }

    pub fn with_fetcher(fetcher: Arc<dyn LaunchFetcher>, pacing_delay: Duration) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("launchpad-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), pacing_delay, command, event_tx).await;
                    });
                }
                launch_debug!("engine command channel closed; worker exiting");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, request_id: RequestId, query: PageQuery) {
        if self
            .cmd_tx
            .send(EngineCommand::FetchPage { request_id, query })
            .is_err()
        {
            launch_warn!("engine worker gone; request {} not sent", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn LaunchFetcher,
    pacing_delay: Duration,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage { request_id, query } => {
            // The pacing delay always completes before the read starts.
            if !pacing_delay.is_zero() {
                tokio::time::sleep(pacing_delay).await;
            }
            let result = fetcher.fetch_page(query).await;
            if let Err(err) = &result {
                launch_warn!("request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::PageFetched {
                request_id,
                query,
                result,
            });
        }
    }
}
