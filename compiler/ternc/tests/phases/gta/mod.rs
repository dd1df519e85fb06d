//! Global type analysis through the session: multi-file packages, imports
//! and the verification pass.

use pretty_assertions::assert_eq;
use tern_ir::{NodeKind, TreeBuilder};
use tern_types::{GtaError, LoadError, SymbolKind, TypeError};
use ternc::{MemoryLoader, Session};

fn point_method(b: &mut TreeBuilder<'_>, name: &str) -> tern_ir::NodeId {
    let point = b.type_name("Point");
    let ptr = b.pointer(point);
    let recv = b.field(&["p"], ptr);
    let ftype = b.func_type(&[], &[]);
    b.func_decl(Some(recv), name, ftype, &[])
}

fn point_spec(b: &mut TreeBuilder<'_>) -> tern_ir::NodeId {
    let int = b.type_name("int");
    let xy = b.field(&["x", "y"], int);
    let st = b.struct_type(&[xy]);
    b.type_spec("Point", st)
}

#[test]
fn methods_declared_before_their_type_in_another_file_attach() {
    let mut s = Session::new();
    let (methods, types, scale) = {
        let mut b = s.tree();
        let scale = point_method(&mut b, "Scale");
        let shift = point_method(&mut b, "Shift");
        let methods = b.file("geo", &[scale, shift]);
        let spec = point_spec(&mut b);
        let types = b.file("geo", &[spec]);
        (methods, types, scale)
    };
    s.analyze(&[methods, types]).unwrap();
    s.verify().unwrap();

    let program = s.program();
    assert_eq!(program.package_count(), 1);
    let geo = program.package_scope(s.intern("geo")).unwrap();
    let point = program.scopes.lookup_local(geo, s.intern("Point")).unwrap();
    assert_eq!(point.kind, SymbolKind::Type);
    let names: Vec<&str> = program
        .pool
        .methods(point.typ)
        .iter()
        .map(|&m| s.interner().lookup(s.forest().name(m).unwrap()))
        .collect();
    assert_eq!(names, vec!["Scale", "Shift"]);
    assert_eq!(program.pool.methods(point.typ)[0], scale);
}

#[test]
fn source_package_shared_by_two_files_is_analyzed_once() {
    let mut s = Session::new();
    let (util, a, b_file) = {
        let mut b = s.tree();
        let seven = b.int(7);
        let v = b.define("Seven", &[seven]);
        let util = b.file("util", &[v]);

        let imp = b.import(None, "lib/util");
        let q = b.ident("util");
        let sel = b.ident("Seven");
        let seven_ref = b.node(NodeKind::SelectorExpr, &[q, sel]);
        let copy = b.define("copy", &[seven_ref]);
        let a = b.file("main", &[imp, copy]);

        let imp = b.import(Some("u"), "lib/util");
        let b_file = b.file("main", &[imp]);
        (util, a, b_file)
    };
    s.set_loader(MemoryLoader::new().package("lib/util", &[util]));
    // A second analysis of util would redeclare `Seven`.
    s.analyze(&[a, b_file]).unwrap();

    let program = s.program();
    assert!(program.is_loaded(s.intern("lib/util")));
    assert_eq!(program.package_count(), 2);
    let util_scope = program.package_at_path(s.intern("lib/util")).unwrap();
    assert_eq!(program.package_scope(s.intern("util")), Some(util_scope));
    let main = program.package_scope(s.intern("main")).unwrap();
    for alias in ["util", "u"] {
        let sym = program.scopes.lookup_local(main, s.intern(alias)).unwrap();
        assert_eq!(sym.package, Some(util_scope), "{alias}");
    }
}

#[test]
fn import_cycle_reports_the_chain() {
    let mut s = Session::new();
    let (a, b_file, main) = {
        let mut b = s.tree();
        let imp = b.import(None, "b");
        let a = b.file("a", &[imp]);
        let imp = b.import(None, "a");
        let b_file = b.file("b", &[imp]);
        let imp = b.import(None, "a");
        let main = b.file("main", &[imp]);
        (a, b_file, main)
    };
    s.set_loader(MemoryLoader::new().package("a", &[a]).package("b", &[b_file]));

    match s.analyze(&[main]).unwrap_err() {
        GtaError::ImportCycle { chain } => assert_eq!(chain, vec!["a", "b", "a"]),
        other => panic!("expected import cycle, got {other}"),
    }
}

#[test]
fn unknown_import_path_surfaces_the_loader_error() {
    let mut s = Session::new();
    let main = {
        let mut b = s.tree();
        let imp = b.import(None, "lib/missing");
        b.file("main", &[imp])
    };
    s.set_loader(MemoryLoader::new());

    let err = s.analyze(&[main]).unwrap_err();
    assert!(
        matches!(err, GtaError::Load(LoadError::NotFound { ref path }) if path == "lib/missing"),
        "{err}"
    );
}

#[test]
fn verify_rejects_a_type_that_was_never_declared() {
    let mut s = Session::new();
    let main = {
        let mut b = s.tree();
        let ty = b.type_name("Missing");
        let v = b.define("v", &[ty]);
        b.file("main", &[v])
    };
    s.analyze(&[main]).unwrap();

    assert!(matches!(
        s.verify(),
        Err(GtaError::Type { ref name, source: TypeError::Unresolved(_) }) if name == "Missing"
    ));
}

#[test]
fn native_packages_bind_by_name_or_into_scope() {
    fn zero(_: &[tern_value::Value]) -> Result<tern_value::Value, String> {
        Ok(tern_value::Value::int(0))
    }

    let mut s = Session::new();
    s.register_native("host/num", &[("Zero", tern_value::Value::native("Zero", zero))]);
    let main = {
        let mut b = s.tree();
        let dot = b.import(Some("."), "host/num");
        let named = b.import(None, "host/num");
        b.file("main", &[dot, named])
    };
    s.analyze(&[main]).unwrap();

    let program = s.program();
    let scope = program.package_scope(s.intern("main")).unwrap();
    let zero = program.scopes.lookup_local(scope, s.intern("Zero")).unwrap();
    assert_eq!(zero.kind, SymbolKind::Bound);
    let num = program.scopes.lookup_local(scope, s.intern("num")).unwrap();
    assert_eq!(num.kind, SymbolKind::Package);
    assert_eq!(num.path, Some(s.intern("host/num")));
}
