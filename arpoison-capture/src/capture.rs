//! Callback-driven packet capture around pcap

use arpoison_core::{Error, FrameCapture, Packet, Result};
use parking_lot::{Mutex, RwLock};
use pcap::{Active, Capture, Device};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default snapshot length (maximum bytes per packet)
const DEFAULT_SNAPLEN: i32 = 65535;

/// Default read timeout; bounds how long a stop request can go unnoticed
const DEFAULT_TIMEOUT_MS: i32 = 500;

/// Configuration for packet capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Maximum bytes to capture per packet
    pub snaplen: i32,
    /// Read timeout in milliseconds
    pub timeout_ms: i32,
    /// Enable promiscuous mode
    pub promiscuous: bool,
    /// Deliver packets as they arrive instead of buffering
    pub immediate_mode: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            promiscuous: true,
            immediate_mode: true,
        }
    }
}

/// State of packet capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Stopped,
    Running,
}

/// Long-lived capture on a single interface, feeding frames to a callback
pub struct PacketCapture {
    interface: String,
    config: CaptureConfig,
    filter: Option<String>,
    state: Arc<RwLock<CaptureState>>,
    capture: Arc<Mutex<Option<Capture<Active>>>>,
    received: Arc<AtomicU64>,
}

impl PacketCapture {
    /// Create a new packet capture on the specified interface
    pub fn new(interface: &str) -> Self {
        Self {
            interface: interface.to_string(),
            config: CaptureConfig::default(),
            filter: None,
            state: Arc::new(RwLock::new(CaptureState::Stopped)),
            capture: Arc::new(Mutex::new(None)),
            received: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a new packet capture with custom configuration
    pub fn with_config(interface: &str, config: CaptureConfig) -> Self {
        let mut capture = Self::new(interface);
        capture.config = config;
        capture
    }

    /// Set the BPF filter applied when the capture starts
    pub fn set_filter(&mut self, bpf: &str) {
        debug!(filter = bpf, "setting BPF filter");
        self.filter = Some(bpf.to_string());
    }

    /// Current capture state
    pub fn state(&self) -> CaptureState {
        *self.state.read()
    }

    /// Check if capture is running
    pub fn is_running(&self) -> bool {
        *self.state.read() == CaptureState::Running
    }

    /// Frames delivered to the callback so far
    pub fn frames_received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    fn open(&self) -> Result<Capture<Active>> {
        let device = Device::from(self.interface.as_str());
        let mut capture = Capture::from_device(device)
            .map_err(|e| Error::capture(format!("failed to create capture: {}", e)))?
            .promisc(self.config.promiscuous)
            .snaplen(self.config.snaplen)
            .timeout(self.config.timeout_ms)
            .immediate_mode(self.config.immediate_mode)
            .open()
            .map_err(|e| Error::capture(format!("failed to open capture: {}", e)))?;

        if let Some(filter) = &self.filter {
            capture
                .filter(filter, true)
                .map_err(|e| Error::capture(format!("invalid BPF filter '{}': {}", filter, e)))?;
        }

        info!(interface = %self.interface, "capture opened");
        Ok(capture)
    }

    /// Start the capture thread.
    ///
    /// Setup errors (missing interface, bad filter, insufficient
    /// privileges) are returned before any thread is spawned.
    pub fn start<F>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(Packet) + Send + 'static,
    {
        if *self.state.read() != CaptureState::Stopped {
            return Err(Error::capture("capture already running"));
        }

        let capture = self.open()?;
        *self.capture.lock() = Some(capture);
        *self.state.write() = CaptureState::Running;

        let capture_arc = Arc::clone(&self.capture);
        let state_arc = Arc::clone(&self.state);
        let received = Arc::clone(&self.received);
        let interface = self.interface.clone();

        thread::spawn(move || {
            let mut guard = capture_arc.lock();
            if let Some(capture) = guard.as_mut() {
                loop {
                    if *state_arc.read() == CaptureState::Stopped {
                        debug!("capture stop requested");
                        break;
                    }

                    match capture.next_packet() {
                        Ok(packet) => {
                            received.fetch_add(1, Ordering::Relaxed);
                            callback(Packet::new(interface.clone(), packet.data.to_vec()));
                        }
                        Err(pcap::Error::TimeoutExpired) => continue,
                        Err(e) => {
                            error!(error = %e, "capture read failed");
                            break;
                        }
                    }
                }
            }

            *state_arc.write() = CaptureState::Stopped;
            info!(interface = %interface, "capture thread finished");
        });

        Ok(())
    }

    /// Stop the capture and release the pcap handle.
    ///
    /// The capture thread exits at its next read timeout.
    pub fn stop(&mut self) {
        if *self.state.read() == CaptureState::Stopped {
            return;
        }

        info!(interface = %self.interface, "stopping capture");
        *self.state.write() = CaptureState::Stopped;

        // Give the thread one read timeout to let go of the handle.
        thread::sleep(Duration::from_millis(self.config.timeout_ms as u64));
        *self.capture.lock() = None;
    }
}

impl FrameCapture for PacketCapture {
    fn start(
        &mut self,
        filter: &str,
        mut callback: Box<dyn FnMut(Packet) + Send + 'static>,
    ) -> Result<()> {
        self.set_filter(filter);
        PacketCapture::start(self, move |packet| callback(packet))
    }

    fn stop(&mut self) {
        PacketCapture::stop(self);
    }
}

impl Drop for PacketCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
