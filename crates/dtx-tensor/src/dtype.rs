//! Element types and device descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Element type of a tensor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 32-bit IEEE float. The usual input type for inference engines.
    #[default]
    F32,
    F64,
    I32,
    I64,
}

impl DType {
    /// Size in bytes of one element.
    pub fn size(self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Lowercase name as used in metadata and CLI flags.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f32" | "float32" => Ok(DType::F32),
            "f64" | "float64" => Ok(DType::F64),
            "i32" | "int32" => Ok(DType::I32),
            "i64" | "int64" => Ok(DType::I64),
            other => Err(format!("unknown dtype '{other}'")),
        }
    }
}

/// Kind of device a buffer lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[default]
    Cpu,
    Gpu,
}

/// Device placement: kind plus ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Device {
    pub kind: DeviceKind,
    pub id: u32,
}

impl Device {
    pub const fn cpu() -> Self {
        Self {
            kind: DeviceKind::Cpu,
            id: 0,
        }
    }

    pub const fn gpu(id: u32) -> Self {
        Self {
            kind: DeviceKind::Gpu,
            id,
        }
    }

    pub fn is_cpu(self) -> bool {
        self.kind == DeviceKind::Cpu
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DeviceKind::Cpu => write!(f, "cpu:{}", self.id),
            DeviceKind::Gpu => write!(f, "gpu:{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_sizes() {
        assert_eq!(DType::F32.size(), 4);
        assert_eq!(DType::I64.size(), 8);
    }

    #[test]
    fn test_dtype_from_str() {
        assert_eq!("f32".parse::<DType>(), Ok(DType::F32));
        assert_eq!("Float64".parse::<DType>(), Ok(DType::F64));
        assert_eq!(" int32 ".parse::<DType>(), Ok(DType::I32));
        assert!("bf16".parse::<DType>().is_err());
    }

    #[test]
    fn test_device_display() {
        assert_eq!(Device::cpu().to_string(), "cpu:0");
        assert_eq!(Device::gpu(2).to_string(), "gpu:2");
    }
}
