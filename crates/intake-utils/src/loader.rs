use crate::loader::error::LoadingError;
use crate::loader::file::File;
use crate::loader::file_system::FileSystemLoader;
use futures::Stream;
use std::path::Path;
use std::pin::Pin;
use url::Url;

pub mod error;
pub mod file;
pub mod file_system;

#[derive(Debug, Clone, Copy, Default)]
pub enum Filter {
    Yaml,
    #[default]
    Any,
}

impl Filter {
    pub fn apply<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str());
        let Some(extension) = extension else {
            return false;
        };
        let allowed_extensions: &[&str] = match self {
            Filter::Yaml => &["yaml", "yml"],
            Filter::Any => return true,
        };
        allowed_extensions.contains(&extension)
    }
}

/// Backend-dispatching loader for catalog directories. Only the local
/// filesystem is wired up today; the enum stays so a remote backend can be
/// added without touching call sites.
#[derive(Clone, Debug)]
pub enum Loader {
    FileSystem(FileSystemLoader),
}

impl Loader {
    pub fn from_url(url: &Url) -> Result<Loader, LoadingError> {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| LoadingError::InvalidUrl(url.to_string()))?;
                Ok(Loader::FileSystem(FileSystemLoader::new(path)))
            }
            scheme => Err(LoadingError::UnsupportedScheme(scheme.to_string())),
        }
    }
}

impl LoaderTrait for Loader {
    fn load_dir<'a, P: AsRef<Path>>(
        &'a self,
        path: P,
        filter: Filter,
    ) -> Pin<Box<dyn Stream<Item = Result<File, LoadingError>> + Send + 'a>> {
        match self {
            Loader::FileSystem(loader) => loader.load_dir(path, filter),
        }
    }

    async fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<File, LoadingError> {
        match self {
            Loader::FileSystem(loader) => loader.load_file(path).await,
        }
    }
}

pub trait LoaderTrait {
    fn load_dir<'a, P: AsRef<Path>>(
        &'a self,
        path: P,
        filter: Filter,
    ) -> Pin<Box<dyn Stream<Item = Result<File, LoadingError>> + Send + 'a>>;
    fn load_file<P: AsRef<Path>>(&self, path: P) -> impl Future<Output = Result<File, LoadingError>>;
}
