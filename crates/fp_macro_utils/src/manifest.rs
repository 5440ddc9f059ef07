use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Names the facade crate can be depended on as, in lookup order.
const FACADE_NAMES: [&str; 2] = ["flatpath", "fp"];

/// Prefix shared by every member crate re-exported by the facade.
const MEMBER_PREFIX: &str = "fp_";

/// The caller's parsed `Cargo.toml`, used to find how a member crate is
/// reachable from the code a proc-macro emits.
///
/// ```rust
/// # use fp_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("fp_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. A direct dependency named `name` resolves to `::name`.
/// 2. For `fp_*` names, a dependency on the facade resolves to
///    `::flatpath::*` (or `::fp::*` when renamed), e.g.
///    `fp_reflect` -> `::flatpath::reflect`.
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Otherwise `::name` is returned.
///
/// A crate deriving on its own types should declare
/// `extern crate self as fp_reflect;` so that rule 4 also holds inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> std::io::Result<SystemTime> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let text = segments.iter().fold(String::new(), |mut acc, s| {
            acc.push_str("::");
            acc.push_str(s);
            acc
        });
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let member = name.strip_prefix(MEMBER_PREFIX)?;
        FACADE_NAMES
            .iter()
            .find(|facade| deps.contains_key(facade))
            .map(|facade| Self::absolute(&[*facade, member]))
    }

    /// Returns the path under which the crate `name` is reachable from the
    /// caller, following the rules on [`Manifest`].
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::find_in(deps, name))
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are parsed once and cached until the file is modified, but
    /// the lookup still takes a global lock, so call this once per macro
    /// invocation and keep the returned paths.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        {
            let cache = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
