//! Directory collaborators and their local-filesystem implementation

use crate::error::{Error, Result};
use camino::Utf8Path;
use nix::unistd::{chown, Gid, Group, Uid, User};
use rdproject_core::Ownership;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use tracing::{debug, info};

/// Mode of every project directory
pub const DIRECTORY_MODE: u32 = 0o770;

/// Mode of every rendered property file
pub const FILE_MODE: u32 = 0o660;

/// Permissions and ownership applied to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttrs {
    pub mode: u32,
    pub ownership: Option<Ownership>,
}

impl FileAttrs {
    pub fn new(mode: u32, ownership: Option<Ownership>) -> Self {
        Self { mode, ownership }
    }

    /// Attributes of project directories
    pub fn directory(ownership: Option<Ownership>) -> Self {
        Self::new(DIRECTORY_MODE, ownership)
    }

    /// Attributes of property files
    pub fn file(ownership: Option<Ownership>) -> Self {
        Self::new(FILE_MODE, ownership)
    }
}

/// Idempotent directory creation
pub trait DirectoryEnsurer: Send + Sync {
    /// Make sure `path` exists as a directory with `attrs`, creating parents when `recursive`
    fn ensure_dir(&self, path: &Utf8Path, attrs: &FileAttrs, recursive: bool) -> Result<()>;
}

/// Idempotent directory removal
pub trait DirectoryRemover: Send + Sync {
    /// Remove `path` (and its contents when `recursive`); a missing path is not an error
    fn remove_dir(&self, path: &Utf8Path, recursive: bool) -> Result<()>;
}

/// Collaborators backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryEnsurer for LocalFilesystem {
    fn ensure_dir(&self, path: &Utf8Path, attrs: &FileAttrs, recursive: bool) -> Result<()> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                debug!("Directory {} already exists", path);
            }
            Ok(_) => {
                return Err(Error::io(
                    path,
                    io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let created = if recursive {
                    fs::create_dir_all(path)
                } else {
                    fs::create_dir(path)
                };
                created.map_err(|e| Error::io(path, e))?;
                info!("Created directory {}", path);
            }
            Err(e) => return Err(Error::io(path, e)),
        }

        apply_attrs(path, attrs)
    }
}

impl DirectoryRemover for LocalFilesystem {
    fn remove_dir(&self, path: &Utf8Path, recursive: bool) -> Result<()> {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(Error::io(
                    path,
                    io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Directory {} does not exist, nothing to delete", path);
                return Ok(());
            }
            Err(e) => return Err(Error::io(path, e)),
        }

        let removed = if recursive {
            fs::remove_dir_all(path)
        } else {
            fs::remove_dir(path)
        };
        removed.map_err(|e| Error::io(path, e))?;
        info!("Deleted directory {}", path);

        Ok(())
    }
}

/// Set mode, then owner and group when ownership is managed
pub fn apply_attrs(path: &Utf8Path, attrs: &FileAttrs) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(attrs.mode))
        .map_err(|e| Error::io(path, e))?;

    if let Some(ownership) = &attrs.ownership {
        let (uid, gid) = resolve_ownership(path, ownership)?;
        chown(path.as_std_path(), Some(uid), Some(gid))
            .map_err(|errno| Error::io(path, io::Error::from(errno)))?;
        debug!(
            "Set ownership of {} to {}:{}",
            path, ownership.user, ownership.group
        );
    }

    Ok(())
}

/// Look up the numeric ids of a user and group by name
fn resolve_ownership(path: &Utf8Path, ownership: &Ownership) -> Result<(Uid, Gid)> {
    let user = User::from_name(&ownership.user)
        .map_err(|errno| Error::io(path, io::Error::from(errno)))?
        .ok_or_else(|| Error::unknown_user(&ownership.user))?;

    let group = Group::from_name(&ownership.group)
        .map_err(|errno| Error::io(path, io::Error::from(errno)))?
        .ok_or_else(|| Error::unknown_group(&ownership.group))?;

    Ok((user.uid, group.gid))
}
