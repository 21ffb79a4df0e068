//! Ctrl+C handling for long-running installs.

use std::{
    process,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::signal;

use crate::error::{Error, Result};

/// Exit status used when the user interrupts a run.
const INTERRUPT_EXIT_CODE: i32 = 130;

/// Cooperative interrupt flag checked between installer steps.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    /// Set once an interrupt has been requested.
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Create an untriggered interrupt flag.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Request that the run stop.
    pub(crate) fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether an interrupt has been requested.
    pub(crate) fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Fail with [`Error::Interrupted`] if an interrupt has been requested.
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_triggered() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    /// Listen for Ctrl+C and terminate the process as soon as it arrives.
    ///
    /// In-flight writes are not finished or rolled back.
    pub(crate) fn install_handler(&self) {
        let interrupt = self.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                interrupt.trigger();
                eprintln!();
                eprintln!("{}", Error::Interrupted);
                process::exit(INTERRUPT_EXIT_CODE);
            }
        });
    }
}
