//! Sampling loop
//!
//! The loop is owned by the caller: it runs on whatever [`Pacer`] the caller supplies and checks
//! a [`StopSignal`] before every sample, so nothing here spins in the background.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::{
    decoder::{decode, Reading},
    source::FrameSource,
    thermometer::{Duration, Instant},
};

/// Cooperative cancellation flag shared between the loop and whoever wants to stop it.
///
/// Only uses atomic loads and stores, which thumbv6 supports.
#[derive(Debug, Default)]
pub struct StopSignal(AtomicBool);

impl StopSignal {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Ask the loop to stop before its next sample
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear a previous stop request
    pub fn resume(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clock and delay used to pace the loop
pub trait Pacer {
    fn now(&self) -> Instant;

    /// Wait until `at`. Returns immediately if `at` has already passed.
    async fn delay_until(&mut self, at: Instant);
}

pub struct Poller<S> {
    source: S,
    period: Duration,
}

impl<S: FrameSource> Poller<S> {
    pub const fn new(source: S, period: Duration) -> Self {
        Self { source, period }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Capture and decode one frame, stamping it with `now`.
    ///
    /// A failed capture is returned as is and nothing is decoded.
    pub fn sample(&mut self, now: Instant) -> Result<Reading, S::Error> {
        let frame = self.source.read_frame()?;
        Ok(decode(frame, now))
    }

    /// Sample once per period until `stop` is raised.
    ///
    /// Every outcome, reading or capture error, is passed to `report`. Periods are measured from
    /// the previous deadline rather than from when the sample finished, so the cadence does not
    /// drift. Returns the number of samples taken.
    #[cfg_attr(feature = "sizing", inline(never))]
    pub async fn run<P, F>(&mut self, pacer: &mut P, stop: &StopSignal, mut report: F) -> u32
    where
        P: Pacer,
        F: FnMut(Result<Reading, S::Error>),
    {
        let mut count = 0;
        let mut deadline = pacer.now();

        while !stop.is_stopped() {
            #[cfg(feature = "defmt")]
            defmt::trace!("poll {=u32}", count);

            report(self.sample(pacer.now()));
            count += 1;

            deadline += self.period;
            pacer.delay_until(deadline).await;
        }

        count
    }
}
