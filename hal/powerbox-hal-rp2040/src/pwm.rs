//! PWM output for RP2040
//!
//! One PWM slice drives the converter control pin. Channel 0 maps to the
//! slice's A output and channel 1 to its B output.
//!
//! The counter wraps at `2^resolution_bits - 1`, so duty values map 1:1 to
//! compare values. The carrier frequency is set with the slice's
//! fractional clock divider:
//!
//! ```text
//! f_pwm = clk_sys / (divider * (top + 1))
//! ```
//!
//! With a 125 MHz system clock, 8 bits and 100 kHz this gives a divider of
//! 4.875 (nearest 1/16 step) and an actual carrier of ~100.2 kHz. The
//! divider register holds 1.0 to 255.9375, so carriers below
//! `clk_sys / (256 * (top + 1))` are clamped to the slowest one it can do.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;

use powerbox_hal::pwm::{PwmOutput, PwmSettings};

/// Largest divider the slice accepts (8-bit integer, 4-bit fraction)
const MAX_DIVIDER: f32 = 255.9375;

/// PWM slice driving the converter control pin
pub struct Rp2040Pwm<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> Rp2040Pwm<'d> {
    /// Wrap an already-constructed PWM slice
    ///
    /// The output stays at 0% duty until `configure` is called.
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = PwmConfig::default();
        config.compare_a = 0;
        config.compare_b = 0;
        pwm.set_config(&config);

        Self { pwm, config }
    }

    /// Clock divider for the requested carrier frequency
    fn divider_for(settings: &PwmSettings) -> FixedU16<U4> {
        let divider = settings.clock_divider(clk_sys_freq(), MAX_DIVIDER);
        FixedU16::<U4>::saturating_from_num(divider)
    }

    fn set_compare(&mut self, channel: u8, compare: u16) {
        if channel == 0 {
            self.config.compare_a = compare;
        } else {
            self.config.compare_b = compare;
        }
    }
}

impl<'d> PwmOutput for Rp2040Pwm<'d> {
    fn configure(&mut self, channel: u8, frequency_hz: u32, resolution_bits: u8) {
        let settings = PwmSettings::new(channel, frequency_hz, resolution_bits);
        let top = settings.max_duty() as u16;

        self.config.top = top;
        self.config.divider = Self::divider_for(&settings);
        self.set_compare(channel, 0);
        self.pwm.set_config(&self.config);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PWM channel {} configured: top={}, divider={}",
            channel,
            top,
            self.config.divider.to_bits()
        );
    }

    fn write_duty(&mut self, channel: u8, duty: u32) {
        let compare = duty.min(self.config.top as u32) as u16;
        self.set_compare(channel, compare);
        self.pwm.set_config(&self.config);
    }
}
