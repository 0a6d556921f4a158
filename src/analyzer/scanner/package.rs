//! Package discovery on disk.
//!
//! Maps a dotted package name to its directory, finds importable submodules
//! breadth-first, and lays pages out to mirror the dotted structure.

use ignore::WalkBuilder;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use crate::constants::INIT_MODULE;
use crate::types::{DocError, ModuleName, Result};

/// A module found while walking a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModule {
    pub name: ModuleName,
    /// Backing source file (`__init__.py` for packages)
    pub path: PathBuf,
    pub is_package: bool,
}

impl DiscoveredModule {
    pub fn is_init(&self) -> bool {
        self.path.file_stem().and_then(|s| s.to_str()) == Some(INIT_MODULE)
    }
}

/// All modules backed by one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    pub path: PathBuf,
    pub modules: Vec<DiscoveredModule>,
}

impl ModuleFile {
    /// Canonical module for this file: the shortest dotted name, first
    /// discovered on ties.
    pub fn canonical(&self) -> Option<&DiscoveredModule> {
        self.modules
            .iter()
            .reduce(|best, m| if m.name.as_str().len() < best.name.as_str().len() { m } else { best })
    }

    pub fn is_init(&self) -> bool {
        self.path.file_stem().and_then(|s| s.to_str()) == Some(INIT_MODULE)
    }
}

/// Walks a Python package on disk the way `pkgutil` discovers submodules.
pub struct PackageWalker {
    source_root: PathBuf,
    package: ModuleName,
    exclude_private: bool,
    exclude: Vec<String>,
}

impl PackageWalker {
    pub fn new<P: AsRef<Path>>(source_root: P, package: impl Into<ModuleName>) -> Self {
        Self {
            source_root: source_root.as_ref().to_path_buf(),
            package: package.into(),
            exclude_private: false,
            exclude: vec![],
        }
    }

    pub fn with_exclude_private(mut self, exclude_private: bool) -> Self {
        self.exclude_private = exclude_private;
        self
    }

    /// Glob patterns matched against paths relative to the package directory
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Directory of the package. Fails when it does not exist or is not an
    /// importable package.
    pub fn locate(&self) -> Result<PathBuf> {
        let dir = self
            .package
            .segments()
            .fold(self.source_root.clone(), |acc, seg| acc.join(seg));

        if !dir.is_dir() {
            return Err(DocError::PackageNotFound {
                name: self.package.to_string(),
                searched: dir,
            });
        }
        if !dir.join(init_file()).is_file() {
            return Err(DocError::NotAPackage {
                name: self.package.to_string(),
                path: dir,
            });
        }
        Ok(dir)
    }

    /// Root package first, then submodules in breadth-first order, each
    /// directory's entries sorted by file name.
    pub fn discover_modules(&self) -> Result<Vec<DiscoveredModule>> {
        let root_dir = self.locate()?;
        let mut modules = vec![DiscoveredModule {
            name: self.package.clone(),
            path: root_dir.join(init_file()),
            is_package: true,
        }];

        let mut queue = VecDeque::from([(root_dir.clone(), self.package.clone())]);

        while let Some((dir, package)) = queue.pop_front() {
            for (path, is_dir) in list_dir(&dir) {
                let Some(child) = module_segment(&path, is_dir) else {
                    continue;
                };
                let name = package.child(&child);

                if self.exclude_private && name.has_private_segment() {
                    continue;
                }
                if self.should_exclude(&root_dir, &path) {
                    continue;
                }

                if is_dir {
                    let init = path.join(init_file());
                    if !init.is_file() {
                        continue;
                    }
                    modules.push(DiscoveredModule {
                        name: name.clone(),
                        path: init,
                        is_package: true,
                    });
                    queue.push_back((path, name));
                } else {
                    modules.push(DiscoveredModule {
                        name,
                        path,
                        is_package: false,
                    });
                }
            }
        }

        tracing::debug!(package = %self.package, count = modules.len(), "Discovered modules");
        Ok(modules)
    }

    fn should_exclude(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }
}

fn init_file() -> String {
    format!("{}.py", INIT_MODULE)
}

/// Direct entries of a directory sorted by name. Ignore files play no part:
/// only the configured `exclude` globs filter modules.
fn list_dir(dir: &Path) -> Vec<(PathBuf, bool)> {
    WalkBuilder::new(dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|e| e.ok())
        .filter(|e| e.depth() == 1)
        .map(|e| {
            let is_dir = e.file_type().is_some_and(|t| t.is_dir());
            (e.into_path(), is_dir)
        })
        .collect()
}

/// Module name segment for a directory entry, if it can be a module.
fn module_segment(path: &Path, is_dir: bool) -> Option<String> {
    let segment = if is_dir {
        path.file_name()?.to_str()?
    } else {
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            return None;
        }
        path.file_stem()?.to_str()?
    };

    if segment == INIT_MODULE || !is_identifier(segment) {
        return None;
    }
    Some(segment.to_string())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Group modules by backing file, keeping first-seen file order.
pub fn group_by_file(modules: Vec<DiscoveredModule>) -> Vec<ModuleFile> {
    let mut groups: Vec<ModuleFile> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for module in modules {
        match index.get(&module.path) {
            Some(&i) => groups[i].modules.push(module),
            None => {
                index.insert(module.path.clone(), groups.len());
                groups.push(ModuleFile {
                    path: module.path.clone(),
                    modules: vec![module],
                });
            }
        }
    }

    groups
}

/// Output file for a module: the leading package segment is dropped and
/// `__init__` segments are collapsed.
pub fn resolve_output_path(name: &ModuleName, output_root: &Path, page_file: &str) -> PathBuf {
    name.segments()
        .skip(1)
        .filter(|seg| *seg != INIT_MODULE)
        .fold(output_root.to_path_buf(), |acc, seg| acc.join(seg))
        .join(page_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn layout() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "pkg/__init__.py");
        touch(root, "pkg/core.py");
        touch(root, "pkg/_internal.py");
        touch(root, "pkg/notes.txt");
        touch(root, "pkg/my-script.py");
        touch(root, "pkg/sub/__init__.py");
        touch(root, "pkg/sub/leaf.py");
        touch(root, "pkg/sub/deep/__init__.py");
        touch(root, "pkg/sub/deep/bottom.py");
        // Not a package: no __init__.py
        touch(root, "pkg/data/loader.py");
        dir
    }

    fn names(modules: &[DiscoveredModule]) -> Vec<&str> {
        modules.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_discover_breadth_first() {
        let dir = layout();
        let modules = PackageWalker::new(dir.path(), "pkg")
            .discover_modules()
            .unwrap();

        assert_eq!(
            names(&modules),
            vec![
                "pkg",
                "pkg._internal",
                "pkg.core",
                "pkg.sub",
                "pkg.sub.leaf",
                "pkg.sub.deep",
                "pkg.sub.deep.bottom",
            ]
        );
        assert!(modules[0].is_package);
        assert!(modules[0].is_init());
        assert!(!modules[2].is_package);
    }

    #[test]
    fn test_discover_excludes_private() {
        let dir = layout();
        let modules = PackageWalker::new(dir.path(), "pkg")
            .with_exclude_private(true)
            .discover_modules()
            .unwrap();

        assert!(!names(&modules).contains(&"pkg._internal"));
        assert!(names(&modules).contains(&"pkg.core"));
    }

    #[test]
    fn test_discover_glob_exclude() {
        let dir = layout();
        let modules = PackageWalker::new(dir.path(), "pkg")
            .with_exclude(vec!["sub/deep*".to_string()])
            .discover_modules()
            .unwrap();

        assert!(!names(&modules).contains(&"pkg.sub.deep"));
        assert!(!names(&modules).contains(&"pkg.sub.deep.bottom"));
        assert!(names(&modules).contains(&"pkg.sub.leaf"));
    }

    #[test]
    fn test_discover_ignores_vcs_ignore_files() {
        let dir = layout();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "_version.py\n").unwrap();
        fs::write(root.join("pkg/.ignore"), "generated.py\n").unwrap();
        touch(root, "pkg/_version.py");
        touch(root, "pkg/generated.py");

        let modules = PackageWalker::new(root, "pkg").discover_modules().unwrap();

        assert!(names(&modules).contains(&"pkg._version"));
        assert!(names(&modules).contains(&"pkg.generated"));
    }

    #[test]
    fn test_dotted_package_name() {
        let dir = layout();
        let modules = PackageWalker::new(dir.path(), "pkg.sub")
            .discover_modules()
            .unwrap();

        assert_eq!(
            names(&modules),
            vec!["pkg.sub", "pkg.sub.leaf", "pkg.sub.deep", "pkg.sub.deep.bottom"]
        );
    }

    #[test]
    fn test_locate_failures() {
        let dir = layout();

        let missing = PackageWalker::new(dir.path(), "nope").locate().unwrap_err();
        assert!(matches!(missing, DocError::PackageNotFound { .. }));

        let not_pkg = PackageWalker::new(dir.path(), "pkg.data").locate().unwrap_err();
        assert!(matches!(not_pkg, DocError::NotAPackage { .. }));
    }

    #[test]
    fn test_group_by_file_shortest_name_wins() {
        let path = PathBuf::from("/src/pkg/core.py");
        let modules = vec![
            DiscoveredModule {
                name: ModuleName::new("pkg.compat.core"),
                path: path.clone(),
                is_package: false,
            },
            DiscoveredModule {
                name: ModuleName::new("pkg.other"),
                path: PathBuf::from("/src/pkg/other.py"),
                is_package: false,
            },
            DiscoveredModule {
                name: ModuleName::new("pkg.core"),
                path: path.clone(),
                is_package: false,
            },
        ];

        let groups = group_by_file(modules);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].path, path);
        assert_eq!(groups[0].modules.len(), 2);
        assert_eq!(groups[0].canonical().unwrap().name.as_str(), "pkg.core");
    }

    #[test]
    fn test_canonical_tie_keeps_first() {
        let path = PathBuf::from("/src/pkg/a.py");
        let group = ModuleFile {
            path: path.clone(),
            modules: vec![
                DiscoveredModule {
                    name: ModuleName::new("pkg.aa"),
                    path: path.clone(),
                    is_package: false,
                },
                DiscoveredModule {
                    name: ModuleName::new("pkg.bb"),
                    path,
                    is_package: false,
                },
            ],
        };
        assert_eq!(group.canonical().unwrap().name.as_str(), "pkg.aa");
    }

    #[test]
    fn test_resolve_output_path() {
        let out = Path::new("/out");

        assert_eq!(
            resolve_output_path(&ModuleName::new("pkg.sub.mod"), out, "page.tsx"),
            PathBuf::from("/out/sub/mod/page.tsx")
        );
        assert_eq!(
            resolve_output_path(&ModuleName::new("pkg.__init__"), out, "page.tsx"),
            PathBuf::from("/out/page.tsx")
        );
        assert_eq!(
            resolve_output_path(&ModuleName::new("pkg.sub.__init__"), out, "page.md"),
            PathBuf::from("/out/sub/page.md")
        );
        assert_eq!(
            resolve_output_path(&ModuleName::new("pkg"), out, "page.md"),
            PathBuf::from("/out/page.md")
        );
    }
}
