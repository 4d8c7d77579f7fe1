#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::ffi::OsString;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};

    use crate::fs::{FileSystem, MemoryFs};

    /// Two layers of drop-in directories.
    pub fn layered_tree() -> MemoryFs {
        MemoryFs::new()
            .with_file("config/default.d/00-default.json", r#"{"foo": "bar"}"#)
            .with_file("config/default.d/10-baz.json", r#"{"baz": "qux"}"#)
            .with_file(
                "config/local.d/99-local.json",
                r#"{"foo": "foo", "one": "two"}"#,
            )
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestConfig {
        pub host: String,
        pub port: u16,
        #[serde(default)]
        pub debug: bool,
        pub database: TestDbConfig,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestDbConfig {
        pub url: Option<String>,
        pub pool_size: usize,
    }

    /// Lists directory entries in reverse order.
    pub struct ReversedFs(pub MemoryFs);

    #[async_trait]
    impl FileSystem for ReversedFs {
        fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
            let mut names = self.0.read_dir(path)?;
            names.reverse();
            Ok(names)
        }

        fn is_dir(&self, path: &Path) -> io::Result<bool> {
            self.0.is_dir(path)
        }

        fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.0.read_file(path)
        }

        async fn read_file_async(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.0.read_file_async(path).await
        }
    }

    /// Fails every operation on one path with `PermissionDenied`.
    pub struct FailingFs {
        inner: MemoryFs,
        denied: PathBuf,
    }

    impl FailingFs {
        pub fn new(inner: MemoryFs, denied: impl Into<PathBuf>) -> Self {
            Self {
                inner,
                denied: denied.into(),
            }
        }

        fn check(&self, path: &Path) -> io::Result<()> {
            if path == self.denied {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("permission denied: {}", path.display()),
                ));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl FileSystem for FailingFs {
        fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
            self.check(path)?;
            self.inner.read_dir(path)
        }

        fn is_dir(&self, path: &Path) -> io::Result<bool> {
            self.inner.is_dir(path)
        }

        fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.check(path)?;
            self.inner.read_file(path)
        }

        async fn read_file_async(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.check(path)?;
            self.inner.read_file_async(path).await
        }
    }

    /// Delays async reads per path so completion order can be forced.
    pub struct DelayedFs {
        inner: MemoryFs,
        delays: HashMap<PathBuf, Duration>,
    }

    impl DelayedFs {
        pub fn new(inner: MemoryFs) -> Self {
            Self {
                inner,
                delays: HashMap::new(),
            }
        }

        pub fn delay(mut self, path: impl Into<PathBuf>, millis: u64) -> Self {
            self.delays.insert(path.into(), Duration::from_millis(millis));
            self
        }
    }

    #[async_trait]
    impl FileSystem for DelayedFs {
        fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
            self.inner.read_dir(path)
        }

        fn is_dir(&self, path: &Path) -> io::Result<bool> {
            self.inner.is_dir(path)
        }

        fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.inner.read_file(path)
        }

        async fn read_file_async(&self, path: &Path) -> io::Result<Vec<u8>> {
            if let Some(delay) = self.delays.get(path) {
                tokio::time::sleep(*delay).await;
            }
            self.inner.read_file_async(path).await
        }
    }

    #[test]
    fn layered_tree_has_three_files() {
        let fs = layered_tree();
        assert_eq!(fs.read_dir(Path::new("config/default.d")).unwrap().len(), 2);
        assert_eq!(fs.read_dir(Path::new("config/local.d")).unwrap().len(), 1);
    }
}
