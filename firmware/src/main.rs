#![no_main]
#![no_std]
#![feature(type_alias_impl_trait)]

use defmt_rtt as _; // global logger
use panic_probe as _; // panic handler

mod display;
mod sensor;

#[rtic::app(
    device = stm32l0xx_hal::pac,
    dispatchers = []
)]
mod app {
    use embedded_time::rate::Extensions as _;
    use stm32l0xx_hal::pac::TIM2;
    use stm32l0xx_hal::prelude::*;
    use stm32l0xx_hal::rcc;
    use stm32l0xx_hal::timer::Timer;

    use thermo_core::{Flag, FrameCell, Multiplexer, Polarity, Sampler};

    use crate::display::DisplayPort;
    use crate::sensor::Lm35;

    /// Display refresh tick: 500 Hz, one digit position per 2 ms.
    const TICK_HZ: u32 = 500;

    /// Published display image, written by `idle`, read by `refresh`.
    static DISPLAY: FrameCell = FrameCell::new();

    /// Raised by `refresh` every 15th tick, consumed by `idle`.
    static SAMPLE_DUE: Flag = Flag::new();

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        tick: Timer<TIM2>,
        mux: Multiplexer<DisplayPort>,
        sampler: Sampler,
        sensor: Lm35,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        defmt::info!("init");

        let dp = cx.device;

        let mut rcc = dp.RCC.freeze(rcc::Config::hsi16());
        let gpioa = dp.GPIOA.split(&mut rcc);
        let gpiob = dp.GPIOB.split(&mut rcc);

        let port = DisplayPort::new(
            [
                gpiob.pb0.into_push_pull_output().downgrade(),
                gpiob.pb1.into_push_pull_output().downgrade(),
                gpiob.pb2.into_push_pull_output().downgrade(),
                gpiob.pb3.into_push_pull_output().downgrade(),
                gpiob.pb4.into_push_pull_output().downgrade(),
                gpiob.pb5.into_push_pull_output().downgrade(),
                gpiob.pb6.into_push_pull_output().downgrade(),
                gpiob.pb7.into_push_pull_output().downgrade(),
            ],
            [
                gpioa.pa0.into_push_pull_output().downgrade(),
                gpioa.pa1.into_push_pull_output().downgrade(),
                gpioa.pa2.into_push_pull_output().downgrade(),
            ],
        );
        let mux = Multiplexer::new(port, Polarity::ActiveLow, None);

        let sensor = Lm35::new(dp.ADC.constrain(&mut rcc), gpioa.pa4.into_analog());

        let mut tick = Timer::new(dp.TIM2, TICK_HZ.Hz(), &mut rcc);
        tick.listen();

        (
            Shared {},
            Local {
                tick,
                mux,
                sampler: Sampler::new(),
                sensor,
            },
        )
    }

    /// Display refresh, every 2 ms. Bounded: one frame snapshot and a
    /// handful of pin writes.
    #[task(binds = TIM2, local = [tick, mux])]
    fn refresh(cx: refresh::Context) {
        cx.local.tick.clear_irq();

        if cx.local.mux.tick(&DISPLAY) {
            SAMPLE_DUE.raise();
        }
    }

    #[idle(local = [sampler, sensor])]
    fn idle(cx: idle::Context) -> ! {
        defmt::info!("idle");

        loop {
            if SAMPLE_DUE.take() {
                if let Some(temperature) = cx.local.sampler.step(cx.local.sensor, &DISPLAY) {
                    defmt::info!("temperature: {} C", *temperature);
                }
            }

            // Sleep until the next tick; a due signal raised between the
            // check above and here is picked up one tick later at worst.
            cortex_m::asm::wfi();
        }
    }
}
