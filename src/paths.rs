use std::path::PathBuf;

/// Returns the flowset root directory.
///
/// Honors the `FLOWSET_ROOT` environment variable, falling back to `.flowset`
/// in the current directory.
pub fn flowset_root() -> PathBuf {
    if let Ok(root) = std::env::var("FLOWSET_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".flowset")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_flowset_root_default() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::remove_var("FLOWSET_ROOT") };
        let root = flowset_root();
        assert_eq!(root, PathBuf::from(".flowset"));
    }

    #[test]
    #[serial]
    fn test_flowset_root_with_env_var() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::set_var("FLOWSET_ROOT", "/custom/path/.flowset") };
        let root = flowset_root();
        assert_eq!(root, PathBuf::from("/custom/path/.flowset"));
        unsafe { std::env::remove_var("FLOWSET_ROOT") };
    }
}
