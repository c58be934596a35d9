use asdlc_core::{paths, AsdlcError};
use std::path::{Path, PathBuf};

fn cwd() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Directory a command operates on, without requiring a project.
///
/// Priority:
/// 1. `--root` flag / `ASDLC_ROOT` env var (passed in as `explicit`)
/// 2. The current directory
pub fn resolve_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(cwd)
}

/// Resolve the root of the enclosing A-SDLC project.
///
/// Priority:
/// 1. `--root` flag / `ASDLC_ROOT` env var, which must itself be a project
/// 2. Walk upward from `cwd` looking for `.asdlc/` or `PROJECT_CONTEXT.md`
pub fn require_project_root(explicit: Option<&Path>) -> Result<PathBuf, AsdlcError> {
    match explicit {
        Some(p) if paths::is_project_root(p) => Ok(p.to_path_buf()),
        Some(_) => Err(AsdlcError::NotAProject),
        None => paths::find_project_root(&cwd()).ok_or(AsdlcError::NotAProject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_dir(Some(dir.path())), dir.path());
    }

    #[test]
    fn explicit_project_root_accepted() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".asdlc")).unwrap();
        assert_eq!(require_project_root(Some(dir.path())).unwrap(), dir.path());
    }

    #[test]
    fn explicit_non_project_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            require_project_root(Some(dir.path())),
            Err(AsdlcError::NotAProject)
        ));
    }
}
