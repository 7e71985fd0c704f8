use std::env;
use std::path::{Path, PathBuf};

/// Libraries the image module needs at link time.
///
/// libisulad_img carries the image API, libisula_libutils carries the
/// generated JSON parsers and their free functions.
const LIBRARIES: &[&str] = &["isulad_img", "isula_libutils"];

/// Directories searched when neither pkg-config nor ISULAD_IMG_LIB_DIR
/// locate the library. iSulad installs into /usr/lib64 on openEuler.
const FALLBACK_DIRS: &[&str] = &["/usr/lib64", "/usr/lib", "/usr/local/lib"];

fn get_library_name(name: &str) -> String {
    if cfg!(target_os = "macos") {
        format!("lib{}.dylib", name)
    } else {
        format!("lib{}.so", name)
    }
}

/// Finds the directory holding libisulad_img, or None if it is not installed.
fn locate_library_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var("ISULAD_IMG_LIB_DIR") {
        let dir = PathBuf::from(dir);
        if dir.join(get_library_name(LIBRARIES[0])).exists() {
            return Some(dir);
        }
        println!(
            "cargo:warning=ISULAD_IMG_LIB_DIR={} does not contain {}",
            dir.display(),
            get_library_name(LIBRARIES[0])
        );
    }

    if let Ok(lib) = pkg_config::Config::new()
        .cargo_metadata(false)
        .probe("isulad_img")
    {
        if let Some(dir) = lib.link_paths.first() {
            return Some(dir.clone());
        }
    }

    FALLBACK_DIRS
        .iter()
        .map(Path::new)
        .find(|dir| dir.join(get_library_name(LIBRARIES[0])).exists())
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-env-changed=ISULAD_IMG_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LIBISULAD_IMG_SYS_STUB");

    // Set LIBISULAD_IMG_SYS_STUB=1 to skip linking (CI linting, docs builds)
    if env::var("LIBISULAD_IMG_SYS_STUB").is_ok() {
        println!("cargo:warning=LIBISULAD_IMG_SYS_STUB mode: skipping link directives");
        return;
    }

    let Some(lib_dir) = locate_library_dir() else {
        println!(
            "cargo:warning=libisulad_img not found; set ISULAD_IMG_LIB_DIR to link the image module"
        );
        return;
    };

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    for lib in LIBRARIES {
        println!("cargo:rustc-link-lib=dylib={}", lib);
    }

    // Expose library directory to dependent crates
    println!("cargo:LIB_DIR={}", lib_dir.display());
}
