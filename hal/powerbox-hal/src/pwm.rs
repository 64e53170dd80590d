//! PWM output abstractions
//!
//! The adjustable converter is programmed through the duty cycle of a PWM
//! signal on its control pin. Implementations wrap whatever timer or PWM
//! slice the chip provides.

/// Largest supported duty-cycle resolution
pub const MAX_RESOLUTION_BITS: u8 = 16;

/// Smallest clock divider a counter can run at (no division)
pub const MIN_CLOCK_DIVIDER: f32 = 1.0;

/// PWM output channel
///
/// Both operations are single register updates on real hardware and have
/// no failure path.
pub trait PwmOutput {
    /// Configure `channel` for the given carrier frequency and resolution
    ///
    /// After configuration the channel accepts duty values in
    /// `0..=2^resolution_bits - 1` and the output starts at 0% duty.
    fn configure(&mut self, channel: u8, frequency_hz: u32, resolution_bits: u8);

    /// Write a raw duty value to `channel`
    fn write_duty(&mut self, channel: u8, duty: u32);
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    fn configure(&mut self, channel: u8, frequency_hz: u32, resolution_bits: u8) {
        (**self).configure(channel, frequency_hz, resolution_bits)
    }

    fn write_duty(&mut self, channel: u8, duty: u32) {
        (**self).write_duty(channel, duty)
    }
}

/// Channel settings for a PWM output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmSettings {
    /// Hardware channel number
    pub channel: u8,
    /// Carrier frequency in Hz
    pub frequency_hz: u32,
    /// Duty-cycle resolution in bits (1-16)
    pub resolution_bits: u8,
}

impl PwmSettings {
    /// Create new settings, limiting the resolution to 1-16 bits
    pub const fn new(channel: u8, frequency_hz: u32, resolution_bits: u8) -> Self {
        let resolution_bits = if resolution_bits == 0 {
            1
        } else if resolution_bits > MAX_RESOLUTION_BITS {
            MAX_RESOLUTION_BITS
        } else {
            resolution_bits
        };

        Self {
            channel,
            frequency_hz,
            resolution_bits,
        }
    }

    /// Full-scale duty value (`2^resolution_bits - 1`)
    pub const fn max_duty(&self) -> u32 {
        (1u32 << self.resolution_bits) - 1
    }

    /// Counter clock divider that produces `frequency_hz` from `clock_hz`
    ///
    /// The counter wraps after `max_duty() + 1` ticks. The result is
    /// clamped to `[MIN_CLOCK_DIVIDER, max_divider]`, so carriers the
    /// hardware cannot reach come out as close as it allows.
    pub fn clock_divider(&self, clock_hz: u32, max_divider: f32) -> f32 {
        let counts_per_period = (self.max_duty() as f32 + 1.0) * self.frequency_hz.max(1) as f32;
        (clock_hz as f32 / counts_per_period).clamp(MIN_CLOCK_DIVIDER, max_divider)
    }

    /// Apply these settings to an output
    pub fn apply<P: PwmOutput + ?Sized>(&self, pwm: &mut P) {
        pwm.configure(self.channel, self.frequency_hz, self.resolution_bits);
    }
}
