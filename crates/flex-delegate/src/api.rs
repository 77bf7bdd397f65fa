use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use flex_sys::{FlexDelegateCreateFn, FlexDelegateDeleteFn, TfLiteDelegate};
use libloading::Library;
use tracing::debug;

use crate::config::LoaderConfig;
use crate::error::{DelegateError, Result};

/// Where a `FlexApi`'s entry points came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiSource {
    /// Resolved at link time (`link` feature).
    Linked,
    /// Resolved from a shared library opened at runtime.
    Loaded(PathBuf),
    /// Supplied by the caller through `FlexApi::from_fns`.
    Custom,
}

/// The two native entry points of the flex delegate.
///
/// A loaded `FlexApi` owns its `Library`, so the code behind the function
/// pointers stays mapped for as long as the table is alive. Every
/// `FlexDelegate` holds an `Arc` to the table that created it.
pub struct FlexApi {
    create: FlexDelegateCreateFn,
    delete: FlexDelegateDeleteFn,
    source: ApiSource,
    _lib: Option<Library>,
}

impl fmt::Debug for FlexApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexApi")
            .field("source", &self.source)
            .finish()
    }
}

impl FlexApi {
    /// Entry points resolved by the linker.
    #[cfg(feature = "link")]
    pub fn linked() -> Self {
        Self {
            create: flex_sys::TfLiteFlexDelegateCreate,
            delete: flex_sys::TfLiteFlexDelegateDelete,
            source: ApiSource::Linked,
            _lib: None,
        }
    }

    /// Use the first candidate in `config` that opens and exports both symbols.
    ///
    /// Candidates that fail to open or lack an entry point are skipped.
    ///
    /// # Errors
    /// `MissingSymbol` for the last candidate that opened without both entry
    /// points, or `LibraryNotFound` if no candidate opened at all.
    pub fn load(config: &LoaderConfig) -> Result<Self> {
        let mut missing = None;

        for candidate in config.candidates() {
            // SAFETY: Opening the library runs its initializers; no symbols are invoked here.
            let lib = match unsafe { Library::new(candidate) } {
                Ok(lib) => lib,
                Err(err) => {
                    debug!(path = %candidate.display(), error = %err, "flex delegate library probe failed");
                    continue;
                }
            };

            match Self::from_library(lib, candidate) {
                Ok(api) => {
                    debug!(path = %candidate.display(), "opened flex delegate library");
                    return Ok(api);
                }
                Err(err) => {
                    debug!(path = %candidate.display(), error = %err, "skipping library without flex delegate symbols");
                    missing = Some(err);
                }
            }
        }

        Err(missing.unwrap_or_else(|| DelegateError::LibraryNotFound {
            tried: config.candidates().to_vec(),
        }))
    }

    /// Build a table from caller-supplied entry points.
    ///
    /// # Safety
    /// `create` must return either null or a handle that `delete` accepts, and
    /// `delete` must release such a handle when called exactly once with it.
    /// Both must be callable from any thread.
    pub unsafe fn from_fns(create: FlexDelegateCreateFn, delete: FlexDelegateDeleteFn) -> Self {
        Self {
            create,
            delete,
            source: ApiSource::Custom,
            _lib: None,
        }
    }

    fn from_library(lib: Library, path: &Path) -> Result<Self> {
        let create = load_symbol::<FlexDelegateCreateFn>(&lib, flex_sys::CREATE_SYMBOL, path)?;
        let delete = load_symbol::<FlexDelegateDeleteFn>(&lib, flex_sys::DELETE_SYMBOL, path)?;
        Ok(Self {
            create,
            delete,
            source: ApiSource::Loaded(path.to_path_buf()),
            _lib: Some(lib),
        })
    }

    /// Where the entry points came from.
    pub fn source(&self) -> &ApiSource {
        &self.source
    }

    /// Call the native create entry point. Null means allocation failure.
    ///
    /// # Safety
    /// A non-null result must be passed to `delete_raw` exactly once.
    pub(crate) unsafe fn create_raw(&self) -> *mut TfLiteDelegate {
        (self.create)()
    }

    /// Call the native delete entry point.
    ///
    /// # Safety
    /// `handle` must come from `create_raw` on this table and be live.
    pub(crate) unsafe fn delete_raw(&self, handle: *mut TfLiteDelegate) {
        (self.delete)(handle)
    }
}

fn load_symbol<T: Copy>(lib: &Library, name: &'static [u8], path: &Path) -> Result<T> {
    // SAFETY: Caller provides the symbol type declared in flex-sys.
    let sym = unsafe { lib.get::<T>(name) }.map_err(|source| DelegateError::MissingSymbol {
        symbol: flex_sys::symbol_name(name),
        path: path.to_path_buf(),
        source,
    })?;
    Ok(*sym)
}

static DEFAULT_API: OnceLock<std::result::Result<Arc<FlexApi>, String>> = OnceLock::new();

/// Returns true if the process-wide `FlexApi` can be initialized.
pub fn is_available() -> bool {
    flex_api().is_ok()
}

/// The process-wide `FlexApi`, initialized on first use.
///
/// With the `link` feature this is `FlexApi::linked()`. Otherwise the library
/// is loaded with `LoaderConfig::from_env()`. A failed initialization is
/// remembered and reported as `Unavailable` on every later call.
pub fn flex_api() -> Result<Arc<FlexApi>> {
    let init = DEFAULT_API.get_or_init(|| match default_api() {
        Ok(api) => Ok(Arc::new(api)),
        Err(err) => Err(err.to_string()),
    });
    match init {
        Ok(api) => Ok(Arc::clone(api)),
        Err(msg) => Err(DelegateError::Unavailable(msg.clone())),
    }
}

#[cfg(feature = "link")]
fn default_api() -> Result<FlexApi> {
    Ok(FlexApi::linked())
}

#[cfg(not(feature = "link"))]
fn default_api() -> Result<FlexApi> {
    FlexApi::load(&LoaderConfig::from_env())
}
