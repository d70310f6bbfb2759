//! Packet capture for arpoison
//!
//! Thin wrapper over libpcap. The capture read blocks with a short
//! timeout so the capture thread can notice a requested stop between
//! reads; dropping or stopping the handle is the only way to cancel a
//! capture, there is no cooperative checkpoint inside the read itself.

pub mod capture;
pub mod filters;

pub use capture::{CaptureConfig, CaptureState, PacketCapture};
