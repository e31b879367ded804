//! 可失败的缓冲区分配.

use crate::error::{YuceError, YuceResult};

/// 分配长度为 `len` 的缓冲区并以 `value` 填充, 分配失败返回错误而不是中止进程
pub fn try_vec<T: Clone>(len: usize, value: T, what: &str) -> YuceResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| {
        YuceError::OutOfMemory(format!("{what}: 需要 {len} 个元素"))
    })?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_vec_ok() {
        let v = try_vec(16, 3u8, "测试").unwrap();
        assert_eq!(v.len(), 16);
        assert!(v.iter().all(|&x| x == 3));
    }

    #[test]
    fn test_try_vec_overflow() {
        let err = try_vec(usize::MAX / 2, 0u64, "巨大缓冲").unwrap_err();
        assert!(matches!(err, YuceError::OutOfMemory(_)), "超大分配应返回 OutOfMemory");
    }
}
