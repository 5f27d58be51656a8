use std::io::{self, BufRead};

use tokio::sync::mpsc;

/// Lines typed by the player, in order, from a single producer.
///
/// Stdin is read on a plain OS thread: a blocking read parked inside tokio's
/// blocking pool would keep the runtime from shutting down while the player
/// never presses enter.
pub struct LineInput {
    rx: mpsc::Receiver<io::Result<String>>,
    /// Reads given up on by a timer. The next line to arrive belongs to one
    /// of them, not to whoever is asking now.
    abandoned: usize,
}

impl LineInput {
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel(16);
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            log::debug!("stdin reader finished");
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::Receiver<io::Result<String>>) -> Self {
        Self { rx, abandoned: 0 }
    }

    /// Next line, with no filtering. `None` once the input is exhausted.
    pub async fn next_line(&mut self) -> Option<io::Result<String>> {
        self.rx.recv().await
    }

    /// Next line meant for the current question. Lines owed to abandoned
    /// reads are dropped first.
    ///
    /// Cancel safe: each line is either returned or dropped within the poll
    /// that received it.
    pub async fn next_answer(&mut self) -> Option<io::Result<String>> {
        loop {
            let line = self.rx.recv().await?;
            if self.abandoned == 0 {
                return Some(line);
            }
            self.abandoned -= 1;
            log::debug!("Dropped a line typed for an earlier question");
        }
    }

    /// Marks the read in progress as lost to a timer.
    pub fn abandon_read(&mut self) {
        self.abandoned += 1;
    }

    /// Drops every line already queued, e.g. typed while the questions were
    /// being generated. Returns how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        self.abandoned = self.abandoned.saturating_sub(dropped);
        dropped
    }

    /// Reads one trimmed line for a prompt; end of input or a read error gives an empty string.
    pub async fn read_trimmed(&mut self) -> String {
        match self.next_line().await {
            Some(Ok(line)) => line.trim().to_string(),
            Some(Err(err)) => {
                log::warn!("Failed to read line: {}", err);
                String::new()
            }
            None => String::new(),
        }
    }

    /// Input whose lines arrive one second apart, starting one second after
    /// the call. The returned sender keeps the input open until dropped.
    #[cfg(test)]
    pub fn scripted(lines: Vec<io::Result<String>>) -> (Self, mpsc::Sender<io::Result<String>>) {
        let (tx, rx) = mpsc::channel(16);
        let script_tx = tx.clone();
        tokio::spawn(async move {
            for line in lines {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                if script_tx.send(line).await.is_err() {
                    break;
                }
            }
        });
        (Self::from_receiver(rx), tx)
    }
}
