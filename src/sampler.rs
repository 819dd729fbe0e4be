//! Thermocouple sampling task

use defmt::*;
use rtic_monotonics::{
    stm32::{Tim2 as Mono, *},
    Monotonic,
};
use rtic_thermocouple::{
    source::{max31855::MAX_CLOCK_HZ, Max31855},
    Duration, Instant, Pacer, Reading, StopSignal,
};
use stm32f0xx_hal::{
    gpio::{
        gpioa::{PA5, PA6, PA7},
        Alternate, Output, Pin, PushPull, AF0,
    },
    pac::SPI1,
    spi::{EightBit, Spi},
};

pub const SAMPLE_PERIOD: Duration = Duration::millis(500);
pub const SPI_CLOCK_HZ: u32 = 1_000_000;
pub const QUEUE_LEN: usize = 4;

static_assertions::const_assert!(SPI_CLOCK_HZ <= MAX_CLOCK_HZ);

/// Raised by the terminal to stop sampling, cleared to let it run again
pub static STOP: StopSignal = StopSignal::new();

pub type Bus = Spi<SPI1, PA5<Alternate<AF0>>, PA6<Alternate<AF0>>, PA7<Alternate<AF0>>, EightBit>;
pub type Sensor = Max31855<Bus, Pin<Output<PushPull>>>;

/// Paces the loop off the TIM2 monotonic
struct MonoPacer;

impl Pacer for MonoPacer {
    fn now(&self) -> Instant {
        Instant::from_ticks(Mono::now().duration_since_epoch().to_micros())
    }

    async fn delay_until(&mut self, at: Instant) {
        let now = self.now();
        if at > now {
            Mono::delay((at - now).to_micros().micros()).await;
        }
    }
}

#[allow(clippy::needless_lifetimes, reason = "clippy bug")]
#[cfg_attr(feature = "sizing", inline(never))]
pub async fn sampler<'a>(cx: crate::app::sampler::Context<'a>) {
    let poller = cx.local.poller;
    let tx = cx.local.tx;

    info!("Sampling every {=u64} ms", poller.period().to_millis());

    let count = poller
        .run(&mut MonoPacer, &STOP, |outcome| match outcome {
            Ok(reading) => {
                if tx.try_send(reading).is_err() {
                    warn!("Report queue full, dropping reading");
                }
            }
            Err(e) => error!("Error reading frame: {}", e.as_str()),
        })
        .await;

    info!("Sampling stopped after {=u32} samples", count);
}

/// Log one reading
pub fn report(reading: &Reading) {
    trace!("{}", reading);

    if let Some(message) = reading.fault_message() {
        warn!(
            "{=str} (internal: {=f32} C, thermocouple: {=f32} C)",
            message,
            reading.internal_celsius(),
            reading.thermocouple_celsius()
        );
    } else {
        info!(
            "Internal: {=f32} C, Thermocouple: {=f32} C",
            reading.internal_celsius(),
            reading.thermocouple_celsius()
        );
    }
}
