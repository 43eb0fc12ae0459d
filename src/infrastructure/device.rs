use std::fmt;

use candle_core::Device;

use crate::presentation::config::DeviceSetting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeDevice {
    Cpu,
    Cuda,
}

impl ComputeDevice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeDevice::Cpu => "cpu",
            ComputeDevice::Cuda => "cuda",
        }
    }

    pub fn to_candle(self) -> Result<Device, candle_core::Error> {
        match self {
            ComputeDevice::Cpu => Ok(Device::Cpu),
            ComputeDevice::Cuda => Device::new_cuda(0),
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn gpu_available() -> bool {
    candle_core::utils::cuda_is_available()
}

/// `auto` picks CUDA only when a device is present and GPU use is enabled.
pub fn resolve_device(setting: DeviceSetting, enable_gpu: bool) -> ComputeDevice {
    match setting {
        DeviceSetting::Auto if enable_gpu && gpu_available() => ComputeDevice::Cuda,
        DeviceSetting::Auto => ComputeDevice::Cpu,
        DeviceSetting::Cpu => ComputeDevice::Cpu,
        DeviceSetting::Cuda => ComputeDevice::Cuda,
    }
}
