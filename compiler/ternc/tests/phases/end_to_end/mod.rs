//! Programs taken from declarations to results: analysis, annotation,
//! package initialization and calls.

use pretty_assertions::assert_eq;
use tern_eval::Output;
use tern_ir::{Action, BinaryOp, NodeKind, Slot, TypeId};
use tern_value::Value;
use ternc::{MemoryLoader, Session};

use crate::common::{global_slot, int_func, Cfg};

/// ```text
/// package main          package main
/// var n = 5             func Double() int { return n * 2 }
/// ```
///
/// Run with the files handed to analysis in both orders.
#[test]
fn package_variable_feeds_a_function_in_another_file() {
    ternc::init_tracing();
    for vars_first in [true, false] {
        let mut s = Session::new();
        let (vars, define) = {
            let mut b = s.tree();
            let five = b.int(5);
            let define = b.define("n", &[five]);
            (b.file("main", &[define]), define)
        };
        let (funcs, n, mul, ret, double) = {
            let mut b = s.tree();
            let n = b.ident("n");
            let two = b.int(2);
            let mul = b.binary(BinaryOp::Mul, n, two);
            let ret = b.ret(&[mul]);
            let double = int_func(&mut b, "Double", &[], 1, &[ret]);
            (b.file("main", &[double]), n, mul, ret, double)
        };
        let roots = if vars_first { [vars, funcs] } else { [funcs, vars] };
        s.analyze(&roots).unwrap();
        s.verify().unwrap();

        let scope = s.program().package_scope(s.intern("main")).unwrap();
        let ident = s.forest().child(define, 0).unwrap();
        assert_eq!(s.forest().typ(ident), Some(TypeId::INT), "vars_first={vars_first}");
        let slot = global_slot(s.forest(), define);
        assert_eq!(slot, Slot::Global { scope, index: 0 }, "vars_first={vars_first}");

        Cfg::new(s.forest_mut())
            .op(define, Action::Define, None)
            .init(vars, define)
            .slot(n, slot)
            .op(mul, Action::Mul, Some(1))
            .op(ret, Action::Return, None)
            .chain(&[mul, ret])
            .func(double, mul, 2, 1);

        s.initialize(&roots).unwrap();
        assert_eq!(
            s.call("main", "Double", &[]).unwrap(),
            vec![Value::int(10)],
            "vars_first={vars_first}"
        );
    }
}

/// ```text
/// package util                 package main
/// func Seven() int {           import "lib/util"
///     return 7                 func Main() int { return util.Seven() + 1 }
/// }
/// ```
#[test]
fn imported_source_function_is_called_through_its_declaration() {
    let mut s = Session::new();
    let (util, seven, seven_ret) = {
        let mut b = s.tree();
        let lit = b.int(7);
        let ret = b.ret(&[lit]);
        let seven = int_func(&mut b, "Seven", &[], 1, &[ret]);
        (b.file("util", &[seven]), seven, ret)
    };
    let (main, entry, call, add, ret) = {
        let mut b = s.tree();
        let imp = b.import(None, "lib/util");
        let q = b.ident("util");
        let sel = b.ident("Seven");
        let fun = b.node(NodeKind::SelectorExpr, &[q, sel]);
        let call = b.call(fun, &[]);
        let one = b.int(1);
        let add = b.binary(BinaryOp::Add, call, one);
        let ret = b.ret(&[add]);
        let entry = int_func(&mut b, "Main", &[], 1, &[ret]);
        (b.file("main", &[imp, entry]), entry, call, add, ret)
    };
    s.set_loader(MemoryLoader::new().package("lib/util", &[util]));
    s.analyze(&[main]).unwrap();
    assert_eq!(s.lookup_function("util", "Seven").unwrap(), seven);

    Cfg::new(s.forest_mut())
        .op(seven_ret, Action::Return, None)
        .func(seven, seven_ret, 1, 1)
        .op(call, Action::Call, Some(1))
        .callee(call, seven)
        .op(add, Action::Add, Some(2))
        .op(ret, Action::Return, None)
        .chain(&[call, add, ret])
        .func(entry, call, 3, 1);

    assert_eq!(s.call("main", "Main", &[]).unwrap(), vec![Value::int(8)]);
    assert_eq!(s.call("util", "Seven", &[]).unwrap(), vec![Value::int(7)]);
}

fn halve(args: &[Value]) -> Result<Value, String> {
    match args {
        [Value::Int(n)] => Ok(Value::int(n / 2)),
        _ => Err("halve takes one int".to_string()),
    }
}

/// ```text
/// package main
/// import . "host/num"
/// func Main() int { return Halve(84) }
/// ```
#[test]
fn dot_imported_native_is_called_by_its_bare_name() {
    let mut s = Session::new();
    s.register_native("host/num", &[("Halve", Value::native("Halve", halve))]);
    let (file, entry, call, ret) = {
        let mut b = s.tree();
        let imp = b.import(Some("."), "host/num");
        let fun = b.ident("Halve");
        let arg = b.int(84);
        let call = b.call(fun, &[arg]);
        let ret = b.ret(&[call]);
        let entry = int_func(&mut b, "Main", &[], 1, &[ret]);
        (b.file("main", &[imp, entry]), entry, call, ret)
    };
    s.analyze(&[file]).unwrap();
    Cfg::new(s.forest_mut())
        .op(call, Action::Call, Some(1))
        .op(ret, Action::Return, None)
        .chain(&[call, ret])
        .func(entry, call, 2, 1);

    assert_eq!(s.call("main", "Main", &[]).unwrap(), vec![Value::int(42)]);
}

/// ```text
/// package main
/// var n = 5
/// func Show() { println("n =", n); print("done") }
/// ```
#[test]
fn builtins_write_to_the_session_output() {
    let mut s = Session::new();
    let output = Output::capture();
    s.set_output(output.clone());
    let (file, define, n, println, print, show) = {
        let mut b = s.tree();
        let five = b.int(5);
        let define = b.define("n", &[five]);
        let label = b.string("n =");
        let n = b.ident("n");
        let fun = b.ident("println");
        let println = b.call(fun, &[label, n]);
        let done = b.string("done");
        let fun = b.ident("print");
        let print = b.call(fun, &[done]);
        let show = int_func(&mut b, "Show", &[], 0, &[println, print]);
        (b.file("main", &[define, show]), define, n, println, print, show)
    };
    s.analyze(&[file]).unwrap();
    let slot = global_slot(s.forest(), define);
    Cfg::new(s.forest_mut())
        .op(define, Action::Define, None)
        .init(file, define)
        .slot(n, slot)
        .op(println, Action::Call, None)
        .op(print, Action::Call, None)
        .chain(&[println, print])
        .func(show, println, 0, 0);

    s.initialize(&[file]).unwrap();
    assert_eq!(s.call("main", "Show", &[]).unwrap(), Vec::<Value>::new());
    assert_eq!(output.captured(), "n = 5\ndone");
}
