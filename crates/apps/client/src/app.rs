//! The console event loop.
//!
//! Input lines and finished commands are handled on one task. Once input
//! ends (EOF or `quit`) no more lines are read, but commands still in flight
//! are awaited and applied before returning.

use std::io::{self, Write};
use std::sync::Arc;

use layers::VectorLayer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::console::{self, Step};
use crate::service::ProcessService;
use crate::session::{Applied, Completion, Session};

pub async fn run<R, W>(
    session: &mut Session,
    layer: &VectorLayer,
    service: Arc<dyn ProcessService>,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = input.lines();
    let mut reading = true;

    loop {
        if !reading && session.in_flight() == 0 {
            break;
        }
        tokio::select! {
            line = lines.next_line(), if reading => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        reading = false;
                        stop_reading(session);
                        continue;
                    }
                    Err(err) => {
                        error!("input read failed: {err}");
                        reading = false;
                        stop_reading(session);
                        continue;
                    }
                };
                let command = match console::parse(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        continue;
                    }
                };
                match console::execute(session, layer, command) {
                    Step::Continue(Some(text)) => writeln!(out, "{text}")?,
                    Step::Continue(None) => {}
                    Step::Send(dispatch) => {
                        let service = Arc::clone(&service);
                        let done_tx = done_tx.clone();
                        tokio::spawn(async move {
                            let done = dispatch.run(service.as_ref()).await;
                            let _ = done_tx.send(done);
                        });
                    }
                    Step::Quit => {
                        reading = false;
                        stop_reading(session);
                    }
                }
            }
            Some(done) = done_rx.recv() => {
                let applied = session.complete(done);
                report(session, applied, out)?;
            }
        }
    }

    Ok(())
}

fn stop_reading(session: &Session) {
    if session.in_flight() > 0 {
        info!(pending = session.in_flight(), "input closed, waiting for pending commands");
    }
}

fn report<W: Write>(session: &Session, applied: Applied, out: &mut W) -> io::Result<()> {
    match applied {
        Applied::Reconciled {
            highlighted,
            polygons,
        } => {
            let ids = session
                .state()
                .highlighted()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>();
            writeln!(out, "{highlighted} highlighted: {}", ids.join(" "))?;
            for id in polygons {
                writeln!(out, "polygon {id} added")?;
            }
        }
        Applied::Failed => writeln!(out, "command failed, highlights cleared")?,
        Applied::Stale => {}
    }
    Ok(())
}
