pub mod comments;
pub mod extractor;
pub mod go;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::codebase::scanner::scan_package_dir;
use crate::types::{FuncDoc, PackageDoc, TypeDoc};
use crate::{AppError, Result};

use extractor::{Extractor, ParsedFile};

pub struct PackageParser {
    extractor: Extractor,
}

impl PackageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new()?,
        })
    }

    /// Parses every Go file in `dir` and returns one model per package
    /// name, ordered by name. A directory without Go files yields an empty
    /// list.
    pub fn parse_dir(&mut self, dir: &Path, import_path: &str) -> Result<Vec<PackageDoc>> {
        let files = scan_package_dir(dir)?;

        let mut by_package: BTreeMap<String, Vec<(PathBuf, ParsedFile)>> = BTreeMap::new();
        for path in files {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
            let parsed = self.extractor.parse(&path, &content)?;
            by_package
                .entry(parsed.package.clone())
                .or_default()
                .push((path, parsed));
        }

        Ok(by_package
            .into_iter()
            .map(|(name, files)| assemble_package(name, import_path, files))
            .collect())
    }
}

/// Parses `dir` and picks the package that documents the import path.
///
/// Fails with [`AppError::NoPackages`] when the directory holds no Go
/// package at all.
pub fn open_package_doc(dir: &Path, import_path: &str) -> Result<PackageDoc> {
    let mut parser = PackageParser::new()?;
    let packages = parser.parse_dir(dir, import_path)?;
    select_documented(packages)
        .ok_or_else(|| AppError::NoPackages(dir.display().to_string()))
}

/// First package carrying a package comment, else the first package.
pub fn select_documented(packages: Vec<PackageDoc>) -> Option<PackageDoc> {
    let idx = packages
        .iter()
        .position(|p| !p.doc.is_empty())
        .unwrap_or(0);
    packages.into_iter().nth(idx)
}

/// Merges the files of one package: concatenates package comments, attaches
/// methods to their receivers and constructors to the type they return.
fn assemble_package(name: String, import_path: &str, files: Vec<(PathBuf, ParsedFile)>) -> PackageDoc {
    let mut pkg = PackageDoc {
        name,
        import_path: import_path.to_string(),
        ..Default::default()
    };

    let mut types: Vec<TypeDoc> = Vec::new();
    let mut type_idx: HashMap<String, usize> = HashMap::new();
    let mut funcs = Vec::new();
    let mut methods: Vec<FuncDoc> = Vec::new();

    for (path, file) in files {
        if !file.package_doc.is_empty() {
            if !pkg.doc.is_empty() {
                pkg.doc.push('\n');
            }
            pkg.doc.push_str(&file.package_doc);
        }
        pkg.consts.extend(file.consts);
        pkg.vars.extend(file.vars);
        funcs.extend(file.funcs);
        methods.extend(file.methods);
        for t in file.types {
            match type_idx.get(&t.name) {
                Some(&i) => types[i] = t,
                None => {
                    type_idx.insert(t.name.clone(), types.len());
                    types.push(t);
                }
            }
        }
        pkg.filenames.push(path);
    }

    for method in methods {
        let owner = method.recv.as_ref().and_then(|r| type_idx.get(r));
        if let Some(&i) = owner {
            types[i].methods.push(method);
        }
    }

    // A function is a constructor when exactly one result is a package type.
    for parsed in funcs {
        let mut owners = parsed
            .result_types
            .iter()
            .filter_map(|r| type_idx.get(r));
        let owner = match (owners.next(), owners.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        };
        match owner {
            Some(&i) => types[i].funcs.push(parsed.func),
            None => pkg.funcs.push(parsed.func),
        }
    }

    pkg.types = types;
    pkg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::GoFixture;

    #[test]
    fn test_parse_dir_groups_by_package() {
        let fixture = GoFixture::new();
        fixture.write("mesh.go", "// Package gfx draws.\npackage gfx\n\ntype Mesh struct{}\n");
        fixture.write("mesh_test.go", "package gfx_test\n\nfunc TestMesh() {}\n");

        let mut parser = PackageParser::new().unwrap();
        let packages = parser.parse_dir(fixture.path(), "azul3d.org/gfx.v1").unwrap();
        let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["gfx", "gfx_test"]);
        assert_eq!(packages[0].import_path, "azul3d.org/gfx.v1");
        assert_eq!(packages[0].filenames.len(), 1);
    }

    #[test]
    fn test_open_prefers_documented_package() {
        let fixture = GoFixture::new();
        fixture.write("a.go", "package alpha\n");
        fixture.write("b.go", "// Package beta is documented.\npackage beta\n");

        let pkg = open_package_doc(fixture.path(), "x/beta.v1").unwrap();
        assert_eq!(pkg.name, "beta");
        assert_eq!(pkg.doc, "Package beta is documented.\n");
    }

    #[test]
    fn test_open_falls_back_to_first_package() {
        let fixture = GoFixture::new();
        fixture.write("a.go", "package alpha\n");
        fixture.write("b.go", "package beta\n");

        let pkg = open_package_doc(fixture.path(), "x.v1").unwrap();
        assert_eq!(pkg.name, "alpha");
    }

    #[test]
    fn test_open_empty_dir_is_no_packages() {
        let fixture = GoFixture::new();
        fixture.write("README.md", "nothing here\n");
        let err = open_package_doc(fixture.path(), "x.v1").unwrap_err();
        assert!(err.is_no_packages());
    }

    #[test]
    fn test_open_missing_dir_is_not_no_packages() {
        let fixture = GoFixture::new();
        let err = open_package_doc(&fixture.path().join("gone"), "x.v1").unwrap_err();
        assert!(!err.is_no_packages());
    }

    #[test]
    fn test_constructors_and_methods_attach_across_files() {
        let fixture = GoFixture::new();
        fixture.write(
            "mesh.go",
            "package gfx\n\ntype Mesh struct{}\n\nfunc (m *Mesh) Draw() {}\n\nfunc (h hidden) Peek() {}\n",
        );
        fixture.write(
            "new.go",
            "package gfx\n\nfunc NewMesh() *Mesh { return nil }\n\nfunc Load(path string) error { return nil }\n",
        );

        let pkg = open_package_doc(fixture.path(), "azul3d.org/gfx.v1").unwrap();
        assert_eq!(pkg.types.len(), 1);
        let mesh = &pkg.types[0];
        assert_eq!(mesh.funcs.len(), 1);
        assert_eq!(mesh.funcs[0].name, "NewMesh");
        assert_eq!(mesh.methods.len(), 1);
        assert_eq!(mesh.methods[0].name, "Draw");

        let free: Vec<_> = pkg.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(free, vec!["Load"]);
    }

    #[test]
    fn test_package_docs_concatenate() {
        let fixture = GoFixture::new();
        fixture.write("a.go", "// First part.\npackage p\n");
        fixture.write("b.go", "// Second part.\npackage p\n");

        let pkg = open_package_doc(fixture.path(), "p.v1").unwrap();
        assert_eq!(pkg.doc, "First part.\n\nSecond part.\n");
    }

    #[test]
    fn test_constructor_needs_exactly_one_package_result() {
        let fixture = GoFixture::new();
        fixture.write(
            "tex.go",
            r#"package gfx

type Mesh struct{}

type Tex struct{}

func Parse() (error, *Tex) { return nil, nil }

func Load() (*Mesh, *Tex, error) { return nil, nil, nil }

func Pair() (a, b *Mesh) { return }
"#,
        );

        let pkg = open_package_doc(fixture.path(), "azul3d.org/gfx.v1").unwrap();
        let mesh = pkg.types.iter().find(|t| t.name == "Mesh").unwrap();
        let tex = pkg.types.iter().find(|t| t.name == "Tex").unwrap();

        let tex_funcs: Vec<_> = tex.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(tex_funcs, vec!["Parse"]);
        let mesh_funcs: Vec<_> = mesh.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(mesh_funcs, vec!["Pair"]);

        let free: Vec<_> = pkg.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(free, vec!["Load"]);
    }
}
