//! Background scoring worker for the generating stage.
//!
//! The worker is the single timed continuation of a measurement submission:
//! it waits out the processing delay, scores the record and reports back
//! over a channel. It never touches the session; the workflow applies the
//! result on its own thread after checking the generation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::{MeasurementRecord, RiskAssessment};
use crate::ports::RiskEngine;

/// Granularity of cancellation checks while waiting out the delay.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Progress updates from the scoring worker.
#[derive(Debug, Clone)]
pub enum ScoringProgress {
    /// Delay started
    Started { generation: u64 },
    /// Scoring finished
    Complete {
        generation: u64,
        assessment: RiskAssessment,
    },
    /// Cancelled before scoring ran
    Cancelled { generation: u64 },
}

impl ScoringProgress {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation }
            | Self::Complete { generation, .. }
            | Self::Cancelled { generation } => *generation,
        }
    }
}

/// Handle to a running scoring worker.
pub struct ScoringWorkerHandle {
    progress_rx: Receiver<ScoringProgress>,
    cancelled: Arc<AtomicBool>,
    generation: u64,
    started_at: Instant,
    delay: Duration,
    _handle: JoinHandle<()>,
}

impl ScoringWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<ScoringProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Block for the next progress update.
    ///
    /// Returns `None` on timeout or if the worker is gone.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ScoringProgress> {
        match self.progress_rx.recv_timeout(timeout) {
            Ok(progress) => Some(progress),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Ask the worker to stop; scoring is skipped if it has not run yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fraction of the processing delay elapsed at `now`, in [0, 1].
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.delay.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.delay.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Worker that scores a record after the processing delay.
pub struct ScoringWorker;

impl ScoringWorker {
    /// Spawn a background scoring task tagged with `generation`.
    pub fn spawn<E>(
        engine: Arc<E>,
        measurements: MeasurementRecord,
        generation: u64,
        delay: Duration,
    ) -> ScoringWorkerHandle
    where
        E: RiskEngine + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::spawn(move || {
            Self::run(engine.as_ref(), &measurements, generation, delay, &flag, &tx);
        });

        ScoringWorkerHandle {
            progress_rx: rx,
            cancelled,
            generation,
            started_at: Instant::now(),
            delay,
            _handle: handle,
        }
    }

    fn run<E: RiskEngine + ?Sized>(
        engine: &E,
        measurements: &MeasurementRecord,
        generation: u64,
        delay: Duration,
        cancelled: &AtomicBool,
        tx: &Sender<ScoringProgress>,
    ) {
        // Send errors mean the workflow dropped the handle; nothing left to do.
        let _ = tx.send(ScoringProgress::Started { generation });

        let deadline = Instant::now() + delay;
        loop {
            if cancelled.load(Ordering::SeqCst) {
                tracing::debug!("Scoring generation {} cancelled during delay", generation);
                let _ = tx.send(ScoringProgress::Cancelled { generation });
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(CANCEL_POLL_INTERVAL));
        }

        let assessment = engine.evaluate(measurements);
        let _ = tx.send(ScoringProgress::Complete {
            generation,
            assessment,
        });
    }
}
