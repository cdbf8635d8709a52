//! Audio device lifecycle.
//!
//! `AudioDevice` is a readiness flag only. It opens no output stream and
//! plays nothing; it records whether scripts initialized audio so shutdown
//! closes it exactly once.

/// Readiness tracker for the process-wide audio device.
#[derive(Debug, Default)]
pub struct AudioDevice {
    ready: bool,
}

impl AudioDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the device ready. Re-initializing a ready device is a no-op.
    pub fn init(&mut self) {
        if self.ready {
            log::warn!("audio: device already initialized");
            return;
        }
        self.ready = true;
        log::info!("audio: device initialized");
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Closes a ready device. Returns `false` when it was not initialized.
    pub fn close(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        self.ready = false;
        log::info!("audio: device closed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_only_succeeds_once() {
        let mut audio = AudioDevice::new();
        assert!(!audio.close());
        audio.init();
        assert!(audio.is_ready());
        assert!(audio.close());
        assert!(!audio.close());
        assert!(!audio.is_ready());
    }

    #[test]
    fn double_init_keeps_device_ready() {
        let mut audio = AudioDevice::new();
        audio.init();
        audio.init();
        assert!(audio.is_ready());
    }
}
