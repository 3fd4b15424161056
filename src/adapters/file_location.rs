// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of a configuration file from a file name and a base path.

use std::path::{Path, PathBuf};

/// Where a file-backed configuration reads from and writes to.
///
/// The file name is kept verbatim. When a base path is set the file name is
/// resolved below it, even if it starts with a path separator.
///
/// # Examples
///
/// ```
/// use xmlcfg::adapters::FileLocation;
/// use std::path::PathBuf;
///
/// let mut location = FileLocation::default();
/// location.set_base_path("/etc/myapp");
/// location.set_file_name("/subdir/hello.xml");
///
/// assert_eq!(location.file_name(), Some("/subdir/hello.xml"));
/// assert_eq!(location.file(), Some(PathBuf::from("/etc/myapp/subdir/hello.xml")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileLocation {
    file_name: Option<String>,
    base_path: Option<PathBuf>,
}

impl FileLocation {
    /// Creates a location for `path`, split into base path and file name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let mut location = Self::default();
        location.set_file(path);
        location
    }

    /// The file name as it was set.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Sets the file name, leaving the base path alone.
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = Some(file_name.into());
    }

    /// The base path, if any.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Sets the directory the file name is resolved against.
    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) {
        self.base_path = Some(base_path.into());
    }

    /// Points the location at `path`: its parent becomes the base path and its
    /// last component the file name.
    pub fn set_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
                self.base_path = Some(parent.to_path_buf());
                self.file_name = Some(name.to_string_lossy().into_owned());
            }
            _ => {
                self.base_path = None;
                self.file_name = Some(path.to_string_lossy().into_owned());
            }
        }
    }

    /// The resolved file, `None` until a file name is set.
    pub fn file(&self) -> Option<PathBuf> {
        let file_name = self.file_name.as_deref()?;
        Some(match &self.base_path {
            Some(base) => base.join(file_name.trim_start_matches(['/', '\\'])),
            None => PathBuf::from(file_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_location() {
        let location = FileLocation::default();
        assert_eq!(location.file_name(), None);
        assert_eq!(location.base_path(), None);
        assert_eq!(location.file(), None);
    }

    #[test]
    fn test_file_name_without_base_path() {
        let mut location = FileLocation::default();
        location.set_file_name("/abs/conf/test.xml");
        assert_eq!(location.file_name(), Some("/abs/conf/test.xml"));
        assert_eq!(location.file(), Some(PathBuf::from("/abs/conf/test.xml")));
    }

    #[test]
    fn test_file_name_with_base_path() {
        let mut location = FileLocation::default();
        location.set_base_path("/abs/conf");
        location.set_file_name("hello.xml");
        assert_eq!(location.file_name(), Some("hello.xml"));
        assert_eq!(location.base_path(), Some(Path::new("/abs/conf")));
        assert_eq!(location.file(), Some(PathBuf::from("/abs/conf/hello.xml")));
    }

    #[test]
    fn test_leading_separator_resolves_below_base() {
        let mut location = FileLocation::default();
        location.set_base_path("/abs/conf");
        location.set_file_name("/subdir/hello.xml");
        assert_eq!(
            location.file(),
            Some(PathBuf::from("/abs/conf/subdir/hello.xml"))
        );
    }

    #[test]
    fn test_set_file_splits_path() {
        let location = FileLocation::from_path("/abs/conf/test.xml");
        assert_eq!(location.file_name(), Some("test.xml"));
        assert_eq!(location.base_path(), Some(Path::new("/abs/conf")));
        assert_eq!(location.file(), Some(PathBuf::from("/abs/conf/test.xml")));
    }

    #[test]
    fn test_set_file_bare_name() {
        let location = FileLocation::from_path("test.xml");
        assert_eq!(location.file_name(), Some("test.xml"));
        assert_eq!(location.base_path(), None);
        assert_eq!(location.file(), Some(PathBuf::from("test.xml")));
    }

    #[test]
    fn test_set_file_replaces_base_path() {
        let mut location = FileLocation::default();
        location.set_base_path("/old");
        location.set_file("relative.xml");
        assert_eq!(location.base_path(), None);
    }
}
