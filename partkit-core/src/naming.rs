use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `${prefix}_${index}`, no zero padding.
pub fn part_path(prefix: &Path, index: u64) -> PathBuf {
    let mut s = OsString::from(prefix.as_os_str());
    s.push(format!("_{index}"));
    PathBuf::from(s)
}

/// Collects `prefix_0, prefix_1, ...` up to the first index that is not
/// an existing regular file.
pub fn discover_parts(prefix: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for index in 0.. {
        let p = part_path(prefix, index);
        if !p.is_file() {
            break;
        }
        out.push(p);
    }
    out
}
