use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// `out/joined.csv` -> `out/.joined.csv.part`
pub fn temp_sibling(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(dest.file_name().unwrap_or_else(|| "output".as_ref()));
    name.push(".part");
    dest.with_file_name(name)
}

/// Move `tmp` over `dest`. If rename fails (e.g. across filesystems),
/// fall back to copy+remove.
pub fn replace_file(tmp: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(tmp, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!("rename {} -> {} failed ({e}); copying", tmp.display(), dest.display());
            fs::copy(tmp, dest)?;
            fs::remove_file(tmp)
        }
    }
}
