#![no_std]

//! ATmega328P port: Timer0 in CTC mode driving the millisecond counter.
//!
//! [`init`] programs Timer0 for a compare-match interrupt every
//! millisecond and must run exactly once at startup. Enabling global
//! interrupts is deliberately left to the caller, so the application
//! controls when ticking begins:
//!
//! ```ignore
//! let dp = avr_device::atmega328p::Peripherals::take().unwrap();
//! millis_avr::init(&dp.TC0).unwrap();
//! unsafe { avr_device::interrupt::enable() };
//!
//! let start = millis_core::millis();
//! while millis_core::elapsed_since(start) < 1000 {}
//! ```
//!
//! Caller-enforced precondition: Timer0 must not be claimed by anything
//! else (PWM on OC0A/OC0B included). Nothing here can detect a
//! conflicting owner.

use avr_device::atmega328p::TC0;
use millis_core::{ConfigResult, Prescaler, TimerConfig};

/// Program Timer0 with the default 16 MHz configuration.
///
/// A part running at a different clock needs [`init_with`] and a
/// matching [`TimerConfig`]; the default on such a part validates
/// cleanly against its *declared* clock and simply ticks at the wrong
/// rate, which no runtime check can catch.
pub fn init(tc0: &TC0) -> ConfigResult<()> {
    init_with(tc0, &TimerConfig::DEFAULT)
}

/// Program Timer0 from an explicit, validated configuration.
pub fn init_with(tc0: &TC0, config: &TimerConfig) -> ConfigResult<()> {
    config.validate()?;

    // CTC mode: count up to OCR0A, reset, raise compare-match A.
    tc0.tccr0a.write(|w| w.wgm0().ctc());
    tc0.ocr0a.write(|w| w.bits(config.compare));
    tc0.tccr0b.write(|w| match config.prescaler {
        Prescaler::Direct => w.cs0().direct(),
        Prescaler::Div8 => w.cs0().prescale_8(),
        Prescaler::Div64 => w.cs0().prescale_64(),
        Prescaler::Div256 => w.cs0().prescale_256(),
        Prescaler::Div1024 => w.cs0().prescale_1024(),
    });

    // Start the first period from zero, clear any stale compare-match
    // flag, then unmask the interrupt. Flag bits clear on writing one.
    tc0.tcnt0.write(|w| w.bits(0));
    tc0.tifr0.write(|w| w.ocf0a().set_bit());
    tc0.timsk0.write(|w| w.ocie0a().set_bit());

    Ok(())
}

#[allow(non_snake_case)]
#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    millis_core::on_tick();
}
