// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{StoreError, WriteDurability};

/// Writes `contents` to a sibling temp file and renames it over `path`.
///
/// Refuses to write through a symlink. Parent directories are created as needed.
pub(crate) fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: io::Error::other("refusing to write through symlink"),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".weekgrid.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        return Err(discard_temp(&tmp_path, source));
    }

    if durability == WriteDurability::Durable {
        if let Err(source) = file.sync_all() {
            drop(file);
            return Err(discard_temp(&tmp_path, source));
        }
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir_path = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
            let dir = fs::File::open(dir_path).map_err(|source| StoreError::Io {
                path: dir_path.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: dir_path.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

/// Removes a half-written temp file and reports the failure against it.
fn discard_temp(tmp_path: &Path, source: io::Error) -> StoreError {
    let _ = fs::remove_file(tmp_path);
    StoreError::Io {
        path: tmp_path.to_path_buf(),
        source,
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use super::{discard_temp, write_atomic};
    use crate::store::{StoreError, WriteDurability};
    use crate::test_support::TempDir;

    fn leftover_temps(dir: &std::path::Path) -> Vec<String> {
        fs::read_dir(dir)
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".weekgrid.tmp."))
            .collect()
    }

    #[test]
    fn durable_write_replaces_contents_without_leftovers() {
        let tmp = TempDir::new("atomic");
        let path = tmp.path().join("store.json");

        write_atomic(&path, b"{}", WriteDurability::BestEffort).expect("first write");
        write_atomic(&path, b"{\"a\":1}", WriteDurability::Durable).expect("second write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "{\"a\":1}");
        assert!(leftover_temps(tmp.path()).is_empty());
    }

    #[test]
    fn failed_temp_write_removes_the_temp_file() {
        let tmp = TempDir::new("atomic");
        let tmp_path = tmp.path().join(".weekgrid.tmp.store.json.1");
        fs::write(&tmp_path, b"partial").expect("seed temp");

        let err = discard_temp(&tmp_path, io::Error::other("disk gone"));

        assert!(matches!(err, StoreError::Io { ref path, .. } if *path == tmp_path));
        assert!(!tmp_path.exists());
        assert!(leftover_temps(tmp.path()).is_empty());
    }
}
