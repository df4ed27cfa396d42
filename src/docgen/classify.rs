//! Classification of a raw package model into sorted index entries.
//!
//! Functions are linked to types by name only: a free function is hidden
//! from the function index whenever any type lists a constructor or method
//! of the same name, even if the two are unrelated.

use std::collections::HashSet;

use crate::types::{
    ClassifiedFunction, ClassifiedType, ClassifiedValue, FuncDoc, PackageDoc, TypeDoc, ValueDoc,
};

use super::render::{render_doc, section_id};

/// Identifiers starting with these belong to test code.
pub const RESERVED_PREFIXES: [&str; 3] = ["Test", "Benchmark", "Example"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub consts: Vec<ClassifiedValue>,
    pub vars: Vec<ClassifiedValue>,
    pub funcs: Vec<ClassifiedFunction>,
    pub types: Vec<ClassifiedType>,
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|p| name.starts_with(p))
}

pub fn classify(pkg: &PackageDoc) -> Classified {
    let types: Vec<TypeDoc> = pkg
        .types
        .iter()
        .filter(|t| !is_reserved(&t.name))
        .map(|t| TypeDoc {
            funcs: keep_public(&t.funcs),
            methods: keep_public(&t.methods),
            ..t.clone()
        })
        .collect();
    let funcs = keep_public(&pkg.funcs);

    Classified {
        consts: collect_values(&pkg.consts),
        vars: collect_values(&pkg.vars),
        funcs: collect_funcs(&funcs, &types),
        types: collect_types(&types),
    }
}

fn keep_public(funcs: &[FuncDoc]) -> Vec<FuncDoc> {
    funcs
        .iter()
        .filter(|f| !is_reserved(&f.name))
        .cloned()
        .collect()
}

/// Free-standing functions, minus any name already listed under a type.
pub fn collect_funcs(funcs: &[FuncDoc], types: &[TypeDoc]) -> Vec<ClassifiedFunction> {
    let typed: HashSet<&str> = types
        .iter()
        .flat_map(|t| t.funcs.iter().chain(t.methods.iter()))
        .map(|f| f.name.as_str())
        .collect();

    let mut out: Vec<ClassifiedFunction> = funcs
        .iter()
        .filter(|f| !typed.contains(f.name.as_str()))
        .map(|f| classify_func(f, &f.name))
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

pub fn collect_types(types: &[TypeDoc]) -> Vec<ClassifiedType> {
    let mut out: Vec<ClassifiedType> = types
        .iter()
        .map(|t| {
            let mut funcs: Vec<ClassifiedFunction> =
                t.funcs.iter().map(|f| classify_func(f, &f.name)).collect();
            let mut methods: Vec<ClassifiedFunction> = t
                .methods
                .iter()
                .map(|m| classify_func(m, &format!("{} {}", t.name, m.name)))
                .collect();
            funcs.sort_by(|a, b| a.name.cmp(&b.name));
            methods.sort_by(|a, b| a.name.cmp(&b.name));

            ClassifiedType {
                name: t.name.clone(),
                anchor: section_id(&t.name),
                text: t.decl.clone(),
                doc: render_doc(&t.doc),
                funcs,
                methods,
            }
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Constants or variables with reserved names removed; a declaration whose
/// names are all reserved disappears.
pub fn collect_values(values: &[ValueDoc]) -> Vec<ClassifiedValue> {
    let mut out: Vec<ClassifiedValue> = values
        .iter()
        .filter_map(|v| {
            let names: Vec<String> = v
                .names
                .iter()
                .filter(|n| !is_reserved(n))
                .cloned()
                .collect();
            let name = names.first()?.clone();
            Some(ClassifiedValue {
                name,
                names,
                text: v.decl.clone(),
                doc: render_doc(&v.doc),
            })
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn classify_func(f: &FuncDoc, anchor_name: &str) -> ClassifiedFunction {
    ClassifiedFunction {
        name: f.name.clone(),
        anchor: section_id(anchor_name),
        text: f.decl.clone(),
        doc: render_doc(&f.doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str) -> FuncDoc {
        FuncDoc {
            name: name.to_string(),
            decl: format!("func {}()", name),
            doc: String::new(),
            recv: None,
        }
    }

    fn ty(name: &str, funcs: &[&str], methods: &[&str]) -> TypeDoc {
        TypeDoc {
            name: name.to_string(),
            decl: format!("type {} struct{{}}", name),
            doc: format!("{} is a type.\n", name),
            funcs: funcs.iter().map(|f| func(f)).collect(),
            methods: methods.iter().map(|m| func(m)).collect(),
        }
    }

    fn value(names: &[&str]) -> ValueDoc {
        ValueDoc {
            names: names.iter().map(|n| n.to_string()).collect(),
            decl: format!("const {} = 1", names.join(", ")),
            doc: String::new(),
        }
    }

    #[test]
    fn test_method_name_suppresses_free_function() {
        let pkg = PackageDoc {
            funcs: vec![func("New"), func("Load")],
            types: vec![ty("Mesh", &[], &["New"])],
            ..Default::default()
        };
        let classified = classify(&pkg);
        let names: Vec<_> = classified.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Load"]);
        assert_eq!(classified.types[0].methods[0].name, "New");
    }

    #[test]
    fn test_constructor_name_suppresses_free_function() {
        let funcs = vec![func("NewMesh"), func("Draw")];
        let types = vec![ty("Mesh", &["NewMesh"], &[])];
        let out = collect_funcs(&funcs, &types);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Draw");
    }

    #[test]
    fn test_reserved_identifiers_removed_everywhere() {
        let pkg = PackageDoc {
            consts: vec![value(&["TestHelper"]), value(&["MaxSize", "TestLimit"])],
            vars: vec![value(&["TestHelper"])],
            funcs: vec![func("TestHelper"), func("BenchmarkDraw"), func("Open")],
            types: vec![
                ty("TestHelper", &[], &["Run"]),
                ty("Mesh", &["ExampleMesh"], &["TestHelper", "Draw"]),
            ],
            ..Default::default()
        };
        let c = classify(&pkg);

        assert_eq!(c.consts.len(), 1);
        assert_eq!(c.consts[0].names, vec!["MaxSize"]);
        assert!(c.vars.is_empty());
        let funcs: Vec<_> = c.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(funcs, vec!["Open"]);
        assert_eq!(c.types.len(), 1);
        assert_eq!(c.types[0].name, "Mesh");
        assert!(c.types[0].funcs.is_empty());
        let methods: Vec<_> = c.types[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["Draw"]);
    }

    #[test]
    fn test_prefix_match_not_word_match() {
        assert!(is_reserved("Testing"));
        assert!(is_reserved("Examples"));
        assert!(!is_reserved("MyTest"));
        assert!(!is_reserved("Bench"));
    }

    #[test]
    fn test_lists_sorted_by_name() {
        let pkg = PackageDoc {
            consts: vec![value(&["Zeta"]), value(&["Alpha"])],
            funcs: vec![func("Zip"), func("Add"), func("Mul")],
            types: vec![
                ty("Vec", &[], &["Sub", "Add"]),
                ty("Mat", &["NewMatB", "NewMatA"], &[]),
            ],
            ..Default::default()
        };
        let c = classify(&pkg);
        let consts: Vec<_> = c.consts.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(consts, vec!["Alpha", "Zeta"]);
        let types: Vec<_> = c.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(types, vec!["Mat", "Vec"]);
        let ctors: Vec<_> = c.types[0].funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(ctors, vec!["NewMatA", "NewMatB"]);
        // Add is a method of Vec, so the free Add is hidden.
        let funcs: Vec<_> = c.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(funcs, vec!["Mul", "Zip"]);
    }

    #[test]
    fn test_docs_rendered_and_anchored() {
        let types = vec![ty("Mesh", &[], &["Draw"])];
        let out = collect_types(&types);
        assert_eq!(out[0].doc, "<p>\nMesh is a type.\n</p>\n");
        assert_eq!(out[0].anchor, "mesh");
        assert_eq!(out[0].methods[0].anchor, "mesh-draw");
    }
}
