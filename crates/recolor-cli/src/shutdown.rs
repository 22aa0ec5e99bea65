use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Stop flag for the watch loop; waits on it wake up as soon as it is set.
pub struct ShutdownSignal {
    stopped: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }

    /// Create a signal that Ctrl+C triggers.
    pub fn install() -> anyhow::Result<Arc<Self>> {
        let signal = Arc::new(Self::new());
        let handler_signal = Arc::clone(&signal);
        ctrlc::set_handler(move || {
            println!("\nStopping...");
            handler_signal.trigger();
        })?;
        Ok(signal)
    }

    pub fn trigger(&self) {
        // Set under the lock so a waiter between its check and its park sees it
        let _guard = self.mutex.lock();
        self.stopped.store(true, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` unless triggered first.
    ///
    /// Returns `true` when the signal was triggered.
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_shutdown() {
            return true;
        }

        let Ok(guard) = self.mutex.lock() else {
            return true;
        };
        match self
            .condvar
            .wait_timeout_while(guard, duration, |_| !self.is_shutdown())
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            // Poisoned mutex: stop rather than spin
            Err(_) => true,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
