//! Compute device selection for the inference backend.
//!
//! The device is probed once at startup. A missing accelerator is not an
//! error: selection degrades to the CPU.

use std::fmt;

use candle_core::{utils, Device};
use tracing::{debug, info};

/// Resolved compute device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeDevice {
    Cuda(usize),
    Metal(usize),
    Cpu,
}

impl ComputeDevice {
    pub fn is_accelerated(&self) -> bool {
        !matches!(self, ComputeDevice::Cpu)
    }

    /// Opens the tensor-runtime handle for this device.
    pub fn open(&self) -> candle_core::Result<Device> {
        match *self {
            ComputeDevice::Cuda(ordinal) => Device::new_cuda(ordinal),
            ComputeDevice::Metal(ordinal) => Device::new_metal(ordinal),
            ComputeDevice::Cpu => Ok(Device::Cpu),
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeDevice::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
            ComputeDevice::Metal(ordinal) => write!(f, "metal:{ordinal}"),
            ComputeDevice::Cpu => f.write_str("cpu"),
        }
    }
}

/// Host capability query. Each method returns the ordinal of a usable
/// accelerator, if any.
pub trait AccelerationProbe {
    fn cuda(&self) -> Option<usize>;
    fn metal(&self) -> Option<usize>;
}

/// Probe backed by candle. An accelerator counts as available only when the
/// backend was compiled in and device 0 actually opens.
#[derive(Debug, Default, Clone, Copy)]
pub struct CandleProbe;

impl AccelerationProbe for CandleProbe {
    fn cuda(&self) -> Option<usize> {
        if !utils::cuda_is_available() {
            return None;
        }
        match Device::new_cuda(0) {
            Ok(_) => Some(0),
            Err(err) => {
                debug!(error = %err, "cuda backend compiled in but no device opened");
                None
            }
        }
    }

    fn metal(&self) -> Option<usize> {
        if !utils::metal_is_available() {
            return None;
        }
        match Device::new_metal(0) {
            Ok(_) => Some(0),
            Err(err) => {
                debug!(error = %err, "metal backend compiled in but no device opened");
                None
            }
        }
    }
}

/// Picks CUDA, then Metal, then the CPU fallback.
pub fn select_device(probe: &dyn AccelerationProbe) -> ComputeDevice {
    let device = if let Some(ordinal) = probe.cuda() {
        ComputeDevice::Cuda(ordinal)
    } else if let Some(ordinal) = probe.metal() {
        ComputeDevice::Metal(ordinal)
    } else {
        ComputeDevice::Cpu
    };
    info!(
        device = %device,
        accelerated = device.is_accelerated(),
        "compute device selected"
    );
    device
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe {
        cuda: Option<usize>,
        metal: Option<usize>,
    }

    impl AccelerationProbe for FixedProbe {
        fn cuda(&self) -> Option<usize> {
            self.cuda
        }

        fn metal(&self) -> Option<usize> {
            self.metal
        }
    }

    #[test]
    fn no_accelerator_falls_back_to_cpu() {
        let probe = FixedProbe {
            cuda: None,
            metal: None,
        };
        let device = select_device(&probe);
        assert_eq!(device, ComputeDevice::Cpu);
        assert!(!device.is_accelerated());
    }

    #[test]
    fn cuda_wins_over_metal() {
        let probe = FixedProbe {
            cuda: Some(0),
            metal: Some(0),
        };
        let device = select_device(&probe);
        assert_eq!(device, ComputeDevice::Cuda(0));
        assert!(device.is_accelerated());
    }

    #[test]
    fn metal_used_when_cuda_missing() {
        let probe = FixedProbe {
            cuda: None,
            metal: Some(0),
        };
        assert_eq!(select_device(&probe), ComputeDevice::Metal(0));
    }

    #[test]
    fn selection_is_deterministic() {
        let probe = FixedProbe {
            cuda: None,
            metal: None,
        };
        assert_eq!(select_device(&probe), select_device(&probe));
    }

    #[test]
    fn candle_probe_reports_nothing_without_backends() {
        if !utils::cuda_is_available() {
            assert_eq!(CandleProbe.cuda(), None);
        }
        if !utils::metal_is_available() {
            assert_eq!(CandleProbe.metal(), None);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(ComputeDevice::Cuda(1).to_string(), "cuda:1");
        assert_eq!(ComputeDevice::Metal(0).to_string(), "metal:0");
        assert_eq!(ComputeDevice::Cpu.to_string(), "cpu");
    }

    #[test]
    fn cpu_always_opens() {
        assert!(ComputeDevice::Cpu.open().unwrap().is_cpu());
    }
}
