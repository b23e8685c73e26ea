use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Owning side of the stop signal. Stopping (or dropping) it disconnects the
/// channel, which wakes every worker sleeping on a `StopSignal`.
pub struct StopHandle {
    sender: Option<Sender<()>>,
}

/// Cloneable receiving side handed to every worker thread.
#[derive(Clone)]
pub struct StopSignal {
    receiver: Receiver<()>,
}

pub fn stop_pair() -> (StopHandle, StopSignal) {
    let (sender, receiver) = channel::bounded(0);
    (
        StopHandle {
            sender: Some(sender),
        },
        StopSignal { receiver },
    )
}

impl StopHandle {
    pub fn stop(&mut self) {
        self.sender.take();
    }
}

impl StopSignal {
    /// Sleeps for `delay`. Returns false instead if the signal fired meanwhile.
    pub fn sleep(&self, delay: Duration) -> bool {
        matches!(
            self.receiver.recv_timeout(delay),
            Err(RecvTimeoutError::Timeout)
        )
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_sleep_runs_to_timeout_while_running() {
        let (_handle, signal) = stop_pair();
        assert!(signal.sleep(Duration::from_millis(5)));
        assert!(!signal.is_stopped());
    }

    #[test]
    fn test_stop_wakes_sleeper() {
        let (mut handle, signal) = stop_pair();
        let sleeper = thread::spawn(move || {
            let now = Instant::now();
            let kept_running = signal.sleep(Duration::from_secs(30));
            (kept_running, now.elapsed())
        });
        thread::sleep(Duration::from_millis(20));
        handle.stop();
        let (kept_running, elapsed) = sleeper.join().unwrap();
        assert!(!kept_running);
        assert!(elapsed < Duration::from_secs(30));
    }

    #[test]
    fn test_dropping_handle_stops() {
        let (handle, signal) = stop_pair();
        drop(handle);
        assert!(signal.is_stopped());
        assert!(!signal.sleep(Duration::from_secs(1)));
    }
}
