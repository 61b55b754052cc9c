use async_trait::async_trait;
use domain::{DriverError, GpioController, GpioProvider, PinLevel};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

/// Operation performed against the mock hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioOp {
    Configure(u8),
    SetLevel(u8, PinLevel),
    ReleaseAll,
}

/// A recorded call. `session` identifies the controller returned by `open()`.
#[derive(Debug, Clone, Copy)]
pub struct GpioCall {
    pub session: usize,
    pub op: GpioOp,
    pub at: Instant,
    pub ok: bool,
}

/// Fault that makes every matching call fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioFault {
    Open,
    Configure(u8),
    Drive(u8, PinLevel),
    Release,
}

/// Recording GPIO backend with fault injection
#[derive(Clone, Default)]
pub struct MockGpioProvider {
    calls: Arc<Mutex<Vec<GpioCall>>>,
    faults: Arc<Mutex<Vec<GpioFault>>>,
    sessions: Arc<AtomicUsize>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGpioProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fault(self, fault: GpioFault) -> Self {
        self.inject_fault(fault);
        self
    }

    pub fn inject_fault(&self, fault: GpioFault) {
        lock(&self.faults).push(fault);
    }

    pub fn clear_faults(&self) {
        lock(&self.faults).clear();
    }

    pub fn calls(&self) -> Vec<GpioCall> {
        lock(&self.calls).clone()
    }

    pub fn ops(&self) -> Vec<GpioOp> {
        lock(&self.calls).iter().map(|c| c.op).collect()
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }

    /// Highest number of lines that were simultaneously high across all sessions
    pub fn peak_active_lines(&self) -> usize {
        let mut active: HashSet<(usize, u8)> = HashSet::new();
        let mut peak = 0;

        for call in lock(&self.calls).iter().filter(|c| c.ok) {
            match call.op {
                GpioOp::SetLevel(pin, PinLevel::High) => {
                    active.insert((call.session, pin));
                }
                GpioOp::SetLevel(pin, PinLevel::Low) | GpioOp::Configure(pin) => {
                    active.remove(&(call.session, pin));
                }
                GpioOp::ReleaseAll => active.retain(|(session, _)| *session != call.session),
            }
            peak = peak.max(active.len());
        }
        peak
    }
}

impl GpioProvider for MockGpioProvider {
    fn open(&self) -> Result<Box<dyn GpioController>, DriverError> {
        if lock(&self.faults).contains(&GpioFault::Open) {
            return Err(DriverError::Unavailable("injected fault".to_string()));
        }

        let session = self.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockGpio {
            session,
            claimed: HashSet::new(),
            calls: self.calls.clone(),
            faults: self.faults.clone(),
        }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct MockGpio {
    session: usize,
    claimed: HashSet<u8>,
    calls: Arc<Mutex<Vec<GpioCall>>>,
    faults: Arc<Mutex<Vec<GpioFault>>>,
}

impl MockGpio {
    fn faulted(&self, fault: GpioFault) -> bool {
        lock(&self.faults).contains(&fault)
    }

    fn record(&self, op: GpioOp, ok: bool) {
        lock(&self.calls).push(GpioCall {
            session: self.session,
            op,
            at: Instant::now(),
            ok,
        });
    }
}

#[async_trait]
impl GpioController for MockGpio {
    async fn configure_as_output(&mut self, pin: u8) -> Result<(), DriverError> {
        if self.faulted(GpioFault::Configure(pin)) {
            self.record(GpioOp::Configure(pin), false);
            return Err(DriverError::Configure {
                pin,
                reason: "injected fault".to_string(),
            });
        }
        self.claimed.insert(pin);
        self.record(GpioOp::Configure(pin), true);
        Ok(())
    }

    async fn set_level(&mut self, pin: u8, level: PinLevel) -> Result<(), DriverError> {
        let reason = if !self.claimed.contains(&pin) {
            Some("pin not configured")
        } else if self.faulted(GpioFault::Drive(pin, level)) {
            Some("injected fault")
        } else {
            None
        };

        self.record(GpioOp::SetLevel(pin, level), reason.is_none());
        match reason {
            Some(reason) => Err(DriverError::Write {
                pin,
                level,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn release_all(&mut self) -> Result<(), DriverError> {
        if self.faulted(GpioFault::Release) {
            self.record(GpioOp::ReleaseAll, false);
            return Err(DriverError::Release("injected fault".to_string()));
        }
        self.claimed.clear();
        self.record(GpioOp::ReleaseAll, true);
        Ok(())
    }
}
