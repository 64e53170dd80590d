//! Test doubles for the regulator tests

use std::cell::RefCell;
use std::rc::Rc;

use powerbox_hal::pwm::PwmOutput;

#[derive(Default)]
struct PwmLog {
    configured: Option<(u8, u32, u8)>,
    writes: Vec<(u8, u32)>,
}

/// Mock PWM recording every call
///
/// Clones share one log, so a test can keep a handle after moving the
/// output into a controller.
#[derive(Clone, Default)]
pub struct MockPwm {
    log: Rc<RefCell<PwmLog>>,
}

impl MockPwm {
    pub fn configured(&self) -> Option<(u8, u32, u8)> {
        self.log.borrow().configured
    }

    pub fn writes(&self) -> Vec<(u8, u32)> {
        self.log.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.log.borrow().writes.len()
    }

    pub fn last_duty(&self) -> Option<u32> {
        self.log.borrow().writes.last().map(|&(_, duty)| duty)
    }
}

impl PwmOutput for MockPwm {
    fn configure(&mut self, channel: u8, frequency_hz: u32, resolution_bits: u8) {
        self.log.borrow_mut().configured = Some((channel, frequency_hz, resolution_bits));
    }

    fn write_duty(&mut self, channel: u8, duty: u32) {
        self.log.borrow_mut().writes.push((channel, duty));
    }
}
