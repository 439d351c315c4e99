//! A terminal spinner that follows the busy flag of a form.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::consts::LOADING_TEXT;
use crate::state::Snapshot;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// Draws `⠋ Planning...` on stderr while the followed snapshot is busy.
///
/// Shells without a busy flag never show it. Writes to stderr so the
/// rendered result on stdout stays clean.
pub struct Spinner {
    handle: JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl Spinner {
    /// Start following `snapshots` in a background task.
    pub fn follow(mut snapshots: watch::Receiver<Snapshot>) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut i = 0;
            let mut drawn = false;
            loop {
                let busy = {
                    let snapshot = snapshots.borrow_and_update();
                    snapshot.shell.has_busy_flag() && snapshot.is_busy()
                };

                if busy {
                    // \r moves to start of line, \x1b[2K clears the line
                    eprint!("\x1b[2K\r{}", frame_line(i));
                    let _ = std::io::stderr().flush();
                    drawn = true;
                    i += 1;
                } else if drawn {
                    clear_line();
                    drawn = false;
                }

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL), if busy => {}
                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = stop_rx.changed() => break,
                }
            }
            if drawn {
                clear_line();
            }
        });

        Self {
            handle,
            stop: stop_tx,
        }
    }

    /// Stop following and clear the spinner line.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}

fn frame_line(i: usize) -> String {
    format!("{} {}", FRAMES[i % FRAMES.len()], LOADING_TEXT)
}

fn clear_line() {
    eprint!("\x1b[2K\r");
    let _ = std::io::stderr().flush();
}
