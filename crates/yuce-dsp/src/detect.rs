//! 运行时 CPU 能力检测.

/// 检测到的 CPU 向量扩展
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCapabilities {
    /// SSE4.1
    pub sse41: bool,
    /// AVX2
    pub avx2: bool,
    /// NEON (AArch64 基线)
    pub neon: bool,
}

impl CpuCapabilities {
    /// 最佳可用级别名称
    pub fn best_level(&self) -> &'static str {
        if self.avx2 {
            "AVX2"
        } else if self.sse41 {
            "SSE4.1"
        } else if self.neon {
            "NEON"
        } else {
            "Scalar"
        }
    }
}

/// 检测 CPU 能力 (x86_64)
#[cfg(target_arch = "x86_64")]
pub fn detect() -> CpuCapabilities {
    CpuCapabilities {
        sse41: is_x86_feature_detected!("sse4.1"),
        avx2: is_x86_feature_detected!("avx2"),
        neon: false,
    }
}

/// 检测 CPU 能力 (AArch64)
#[cfg(target_arch = "aarch64")]
pub fn detect() -> CpuCapabilities {
    CpuCapabilities {
        neon: true,
        ..Default::default()
    }
}

/// 其他架构只有标量实现
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn detect() -> CpuCapabilities {
    CpuCapabilities::default()
}
