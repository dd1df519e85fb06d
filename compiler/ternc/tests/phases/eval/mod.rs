//! Execution through the session: calling convention, limits and state
//! carried between calls.

use pretty_assertions::assert_eq;
use tern_eval::{EvalErrorKind, EvalMode};
use tern_ir::{Action, BinaryOp, NodeKind};
use tern_value::Value;
use ternc::{Session, SessionError};

use crate::common::{global_slot, int_func, Cfg};

fn eval_kind(err: SessionError) -> EvalErrorKind {
    match err {
        SessionError::Eval(e) => e.kind,
        other => panic!("expected an evaluation error, got {other}"),
    }
}

#[test]
fn two_results_come_back_in_declaration_order() {
    let mut s = Session::new();
    let (file, pair, x1, x2, add, ret) = {
        let mut b = s.tree();
        let x1 = b.ident("x");
        let x2 = b.ident("x");
        let one = b.int(1);
        let add = b.binary(BinaryOp::Add, x2, one);
        let ret = b.ret(&[x1, add]);
        let pair = int_func(&mut b, "Pair", &["x"], 2, &[ret]);
        (b.file("main", &[pair]), pair, x1, x2, add, ret)
    };
    s.analyze(&[file]).unwrap();
    Cfg::new(s.forest_mut())
        .slot(x1, tern_ir::Slot::Local(2))
        .slot(x2, tern_ir::Slot::Local(2))
        .op(add, Action::Add, Some(3))
        .op(ret, Action::Return, None)
        .chain(&[add, ret])
        .func(pair, add, 4, 2);

    assert_eq!(
        s.call("main", "Pair", &[Value::int(4)]).unwrap(),
        vec![Value::int(4), Value::int(5)]
    );
}

#[test]
fn unknown_functions_are_reported_by_name() {
    let mut s = Session::new();
    let file = {
        let mut b = s.tree();
        let five = b.int(5);
        let n = b.define("n", &[five]);
        b.file("main", &[n])
    };
    s.analyze(&[file]).unwrap();

    for (package, function) in [("main", "Missing"), ("main", "n"), ("other", "Main")] {
        match s.call(package, function, &[]).unwrap_err() {
            SessionError::UnknownFunction {
                package: p,
                function: f,
            } => assert_eq!((p.as_str(), f.as_str()), (package, function)),
            other => panic!("expected unknown function, got {other}"),
        }
    }
}

#[test]
fn package_variables_persist_between_calls() {
    let mut s = Session::new();
    let (file, define, n_rhs, n_lhs, n_ret, add, assign, ret, bump) = {
        let mut b = s.tree();
        let five = b.int(5);
        let define = b.define("n", &[five]);
        let n_rhs = b.ident("n");
        let one = b.int(1);
        let add = b.binary(BinaryOp::Add, n_rhs, one);
        let n_lhs = b.ident("n");
        let assign = b.assign(&[n_lhs], &[add]);
        let n_ret = b.ident("n");
        let ret = b.ret(&[n_ret]);
        let bump = int_func(&mut b, "Bump", &[], 1, &[assign, ret]);
        let file = b.file("main", &[define, bump]);
        (file, define, n_rhs, n_lhs, n_ret, add, assign, ret, bump)
    };
    s.analyze(&[file]).unwrap();
    let n = global_slot(s.forest(), define);
    Cfg::new(s.forest_mut())
        .op(define, Action::Define, None)
        .init(file, define)
        .slot(n_rhs, n)
        .slot(n_lhs, n)
        .slot(n_ret, n)
        .op(add, Action::Add, Some(1))
        .op(assign, Action::Assign, None)
        .op(ret, Action::Return, None)
        .chain(&[add, assign, ret])
        .func(bump, add, 2, 1);

    s.initialize(&[file]).unwrap();
    assert_eq!(s.call("main", "Bump", &[]).unwrap(), vec![Value::int(6)]);
    assert_eq!(s.call("main", "Bump", &[]).unwrap(), vec![Value::int(7)]);
}

/// ```text
/// package main          package main
/// var n = 5             var m = 3
///                       func Sum() int { return n + m }
/// ```
///
/// The second file is analyzed after the first one has already run.
#[test]
fn later_analysis_extends_package_storage() {
    let mut s = Session::new();
    let (first, n_def) = {
        let mut b = s.tree();
        let five = b.int(5);
        let n_def = b.define("n", &[five]);
        (b.file("main", &[n_def]), n_def)
    };
    s.analyze(&[first]).unwrap();
    Cfg::new(s.forest_mut())
        .op(n_def, Action::Define, None)
        .init(first, n_def);
    s.initialize(&[first]).unwrap();

    let (second, m_def, n, m, add, ret, sum) = {
        let mut b = s.tree();
        let three = b.int(3);
        let m_def = b.define("m", &[three]);
        let n = b.ident("n");
        let m = b.ident("m");
        let add = b.binary(BinaryOp::Add, n, m);
        let ret = b.ret(&[add]);
        let sum = int_func(&mut b, "Sum", &[], 1, &[ret]);
        (b.file("main", &[m_def, sum]), m_def, n, m, add, ret, sum)
    };
    s.analyze(&[second]).unwrap();
    let n_slot = global_slot(s.forest(), n_def);
    let m_slot = global_slot(s.forest(), m_def);
    Cfg::new(s.forest_mut())
        .op(m_def, Action::Define, None)
        .init(second, m_def)
        .slot(n, n_slot)
        .slot(m, m_slot)
        .op(add, Action::Add, Some(1))
        .op(ret, Action::Return, None)
        .chain(&[add, ret])
        .func(sum, add, 2, 1);
    s.initialize(&[second]).unwrap();

    assert_eq!(s.call("main", "Sum", &[]).unwrap(), vec![Value::int(8)]);
}

#[test]
fn bounded_mode_stops_a_spinning_function() {
    let mut s = Session::new();
    s.set_mode(EvalMode::Bounded { max_steps: 50 });
    let (file, spin, body) = {
        let mut b = s.tree();
        let body = b.block(&[]);
        let spin = int_func(&mut b, "Spin", &[], 0, &[body]);
        (b.file("main", &[spin]), spin, body)
    };
    s.analyze(&[file]).unwrap();
    Cfg::new(s.forest_mut()).link(body, body).func(spin, body, 0, 0);

    assert_eq!(
        eval_kind(s.call("main", "Spin", &[]).unwrap_err()),
        EvalErrorKind::StepBudgetExceeded { budget: 50 }
    );
}

#[test]
fn runaway_recursion_hits_the_mode_depth_limit() {
    let mut s = Session::new();
    s.set_mode(EvalMode::Bounded {
        max_steps: 1_000_000,
    });
    let (file, rec, call) = {
        let mut b = s.tree();
        let fun = b.ident("Rec");
        let call = b.call(fun, &[]);
        let rec = int_func(&mut b, "Rec", &[], 0, &[call]);
        (b.file("main", &[rec]), rec, call)
    };
    s.analyze(&[file]).unwrap();
    Cfg::new(s.forest_mut())
        .op(call, Action::Call, None)
        .callee(call, rec)
        .func(rec, call, 0, 0);

    let err = match s.call("main", "Rec", &[]).unwrap_err() {
        SessionError::Eval(e) => e,
        other => panic!("expected an evaluation error, got {other}"),
    };
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 256 });
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(256));
}

#[test]
fn overflow_report_names_the_failing_function() {
    let mut s = Session::new();
    let (file, square, x1, x2, mul, ret) = {
        let mut b = s.tree();
        let x1 = b.ident("x");
        let x2 = b.ident("x");
        let mul = b.binary(BinaryOp::Mul, x1, x2);
        let ret = b.ret(&[mul]);
        let square = int_func(&mut b, "Square", &["x"], 1, &[ret]);
        (b.file("main", &[square]), square, x1, x2, mul, ret)
    };
    s.analyze(&[file]).unwrap();
    Cfg::new(s.forest_mut())
        .slot(x1, tern_ir::Slot::Local(1))
        .slot(x2, tern_ir::Slot::Local(1))
        .op(mul, Action::Mul, Some(2))
        .op(ret, Action::Return, None)
        .chain(&[mul, ret])
        .func(square, mul, 3, 1);

    assert_eq!(
        s.call("main", "Square", &[Value::int(3_000_000_000)]).unwrap(),
        vec![Value::int(9_000_000_000_000_000_000)]
    );
    let err = match s.call("main", "Square", &[Value::int(i64::MAX)]).unwrap_err() {
        SessionError::Eval(e) => e,
        other => panic!("expected an evaluation error, got {other}"),
    };
    assert_eq!(err.node, Some(mul));
    let report = err.report();
    assert!(report.contains("integer overflow in multiplication"), "{report}");
    assert!(report.contains("0: Square"), "{report}");
    assert_eq!(s.forest().kind(mul), NodeKind::BinaryExpr(BinaryOp::Mul));
}
