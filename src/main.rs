#![feature(type_alias_impl_trait, lint_reasons)]
#![no_std]
#![no_main]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(dead_code, clippy::module_name_repetitions, clippy::wildcard_imports)]

mod sampler;

use defmt_rtt as _;
use panic_probe as _;

#[rtic::app(device = stm32f0xx_hal::pac, dispatchers = [USART1, TIM14])]
mod app {
    use defmt::{panic, unreachable, *};
    use rtic_monotonics::{
        stm32::{Tim2 as Mono, *},
        Monotonic,
    };
    use rtic_sync::{
        channel::{ReceiveError, Receiver, Sender},
        make_channel,
    };
    use rtic_thermocouple::{source::Max31855, Poller, Reading};
    use stm32f0xx_hal::{
        gpio::{
            gpioa::{PA15, PA2},
            Alternate, Output, Pin, PushPull, AF1,
        },
        pac::{IWDG, USART2},
        prelude::*,
        serial,
        serial::{Event, Serial},
        spi::Spi,
        watchdog::Watchdog,
    };

    use crate::sampler::{Sensor, QUEUE_LEN, SAMPLE_PERIOD, SPI_CLOCK_HZ, STOP};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        usart: Serial<USART2, PA2<Alternate<AF1>>, PA15<Alternate<AF1>>>,
        poller: Poller<Sensor>,
        tx: Sender<'static, Reading, QUEUE_LEN>,
    }

    #[init]
    fn init(mut cx: init::Context) -> (Shared, Local) {
        // Set system clock to 24 MHz
        let mut rcc = cx
            .device
            .RCC
            .configure()
            .hsi48()
            .sysclk(24.mhz())
            .pclk(24.mhz())
            .hclk(24.mhz())
            .freeze(&mut cx.device.FLASH);

        trace!("sysclk: {}", rcc.clocks.sysclk().0);
        trace!("hclk: {}", rcc.clocks.hclk().0);
        trace!("pclk: {}", rcc.clocks.pclk().0);

        // Enable tim2 monotonic
        let token = rtic_monotonics::create_stm32_tim2_monotonic_token!();
        Mono::start(24_000_000, token);

        // Setup GPIO
        let gpioa = cx.device.GPIOA.split(&mut rcc);
        let gpiob = cx.device.GPIOB.split(&mut rcc);
        let pb3 = gpiob.pb3.into_push_pull_output(&cx.cs);

        let _ = heartbeat::spawn(pb3.downgrade());
        let _ = watchdog::spawn(cx.device.IWDG);

        // Setup USART for the stop/go keys
        let mut usart = Serial::usart2(
            cx.device.USART2,
            (
                gpioa.pa2.into_alternate_af1(&cx.cs),
                gpioa.pa15.into_alternate_af1(&cx.cs),
            ),
            115_200.bps(),
            &mut rcc,
        );
        usart.listen(Event::Rxne);

        // Setup SPI1 in mode 0. The converter only talks, MOSI is left unconnected.
        let spi = Spi::spi1(
            cx.device.SPI1,
            (
                gpioa.pa5.into_alternate_af0(&cx.cs),
                gpioa.pa6.into_alternate_af0(&cx.cs),
                gpioa.pa7.into_alternate_af0(&cx.cs),
            ),
            embedded_hal::spi::MODE_0,
            SPI_CLOCK_HZ.hz(),
            &mut rcc,
        );
        let cs = gpioa.pa4.into_push_pull_output(&cx.cs).downgrade();

        let sensor = match Max31855::new(spi, cs) {
            Ok(sensor) => sensor,
            Err(e) => panic!("Failed to set up MAX31855: {}", e.as_str()),
        };
        let poller = Poller::new(sensor, SAMPLE_PERIOD);

        // Setup channels
        let (tx, rx) = make_channel!(Reading, QUEUE_LEN);

        // Launch sampling & reporting
        let _ = sampler::spawn();
        let _ = report::spawn(rx);

        info!("Press 's' to stop sampling, 'g' to resume");

        (Shared {}, Local { usart, poller, tx })
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    #[task(priority = 1)]
    async fn heartbeat(_: heartbeat::Context, mut pin: Pin<Output<PushPull>>) {
        unwrap!(pin.set_low());
        let mut now = Mono::now();
        loop {
            unwrap!(pin.toggle());
            now += 500.millis();
            Mono::delay_until(now).await;
        }
    }

    #[task(priority = 1)]
    async fn watchdog(_: watchdog::Context, wdg: IWDG) {
        let mut wdg = Watchdog::new(wdg);
        wdg.start(1.hz());

        loop {
            wdg.feed();
            Mono::delay(100.millis()).await;
        }
    }

    #[task(priority = 2, local = [poller, tx])]
    async fn sampler(cx: sampler::Context) {
        crate::sampler::sampler(cx).await;
    }

    #[task(priority = 1)]
    async fn report(_: report::Context, mut rx: Receiver<'static, Reading, QUEUE_LEN>) {
        loop {
            let reading = match rx.recv().await {
                Ok(reading) => reading,
                Err(ReceiveError::Empty) => continue,
                Err(ReceiveError::NoSender) => unreachable!("Sender dropped"),
            };

            crate::sampler::report(&reading);
        }
    }

    #[task(binds = USART2, local = [usart])]
    fn usart2(cx: usart2::Context) {
        let usart = cx.local.usart;

        loop {
            match usart.read() {
                Ok(b's') => {
                    info!("Stopping sampler");
                    STOP.stop();
                }
                Ok(b'g') => {
                    if STOP.is_stopped() {
                        info!("Resuming sampler");
                        STOP.resume();
                        // Still running if the stop was not seen yet, then it simply carries on
                        let _ = sampler::spawn();
                    }
                }
                Ok(b) => trace!("Ignoring key: {=u8:#x}", b),
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(serial::Error::Framing)) => warn!("USART error: Framing"),
                Err(nb::Error::Other(serial::Error::Noise)) => warn!("USART error: Noise"),
                Err(nb::Error::Other(serial::Error::Overrun)) => warn!("USART error: Overrun"),
                Err(nb::Error::Other(serial::Error::Parity)) => warn!("USART error: Parity"),
                Err(nb::Error::Other(_)) => warn!("USART error: Unknown"),
            }
        }
    }

    timestamp!("{=u64:us}", {
        Mono::now().duration_since_epoch().to_micros()
    });
}
