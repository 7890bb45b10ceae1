use candle_core::{Device, Tensor};
use tracing::{info, warn};

use crate::device::ComputeDevice;

/// Inference-only tensor runtime shared with request handlers.
///
/// Holds the device resolved at startup and the gradient-tracking mode.
/// Gradients are disabled at construction and there is no way to turn them
/// back on.
#[derive(Debug, Clone)]
pub struct InferenceRuntime {
    device: ComputeDevice,
    tensor_device: Device,
    grad_enabled: bool,
}

impl InferenceRuntime {
    /// Opens `device`, degrading to the CPU if the accelerator can't be opened.
    pub fn new(device: ComputeDevice) -> Self {
        let (device, tensor_device) = match device.open() {
            Ok(opened) => (device, opened),
            Err(err) => {
                warn!(device = %device, error = %err, "accelerator unavailable, using cpu");
                (ComputeDevice::Cpu, Device::Cpu)
            }
        };
        info!(device = %device, grad_enabled = false, "inference runtime ready");
        Self {
            device,
            tensor_device,
            grad_enabled: false,
        }
    }

    pub fn device(&self) -> ComputeDevice {
        self.device
    }

    pub fn tensor_device(&self) -> &Device {
        &self.tensor_device
    }

    pub fn grad_enabled(&self) -> bool {
        self.grad_enabled
    }

    /// Moves `tensor` onto the runtime device. With gradients disabled the
    /// result is detached from any computation graph.
    pub fn place(&self, tensor: &Tensor) -> candle_core::Result<Tensor> {
        let placed = tensor.to_device(&self.tensor_device)?;
        if self.grad_enabled {
            Ok(placed)
        } else {
            Ok(placed.detach())
        }
    }
}
