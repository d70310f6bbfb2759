//! Captured packet type and the capture seam

use crate::Result;
use std::time::SystemTime;

/// A raw frame captured off the wire
#[derive(Debug, Clone)]
pub struct Packet {
    /// When the frame was captured
    pub timestamp: SystemTime,
    /// Interface the frame was received on
    pub interface: String,
    /// Frame data including the Ethernet header
    pub data: Vec<u8>,
}

impl Packet {
    pub fn new(interface: String, data: Vec<u8>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            interface,
            data,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A filtered stream of frames from an interface.
///
/// Setup errors (missing interface, bad filter, insufficient
/// privileges) must be returned from `start` rather than deferred to
/// the delivery path.
pub trait FrameCapture: Send + Sync {
    /// Begin delivering frames matching `filter` to `callback`.
    fn start(
        &mut self,
        filter: &str,
        callback: Box<dyn FnMut(Packet) + Send + 'static>,
    ) -> Result<()>;

    /// Stop delivering frames and release the underlying handle.
    fn stop(&mut self);
}
