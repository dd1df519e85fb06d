//! Range iteration with the hidden cursor slot.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tern_ir::{Action, BinaryOp, IncDec, NodeId, NodeKind};
use tern_value::{EvalErrorKind, Value};

use super::Fixture;

/// `func SumRange(a) (int, int) { s := 0; for k, v := range a { s = s + v }; return s, k }`
///
/// Slots: 0-1 results, 2 a, 3 k, 4 v, 5 s, 6 range, 7 sum, 8 cursor.
fn sum_range(f: &mut Fixture) -> NodeId {
    let s = f.local("s", 5);
    let zero = f.int(0);
    let def_s = f.op(NodeKind::Define, &[s, zero], Action::Define, None);
    let k = f.local("k", 3);
    let v = f.local("v", 4);
    let a = f.local("a", 2);
    let range = f.op(NodeKind::RangeStmt, &[k, v, a], Action::Range, Some(6));
    f.forest.set_aux(range, 8);
    let s = f.local("s", 5);
    let v = f.local("v", 4);
    let add = f.op(NodeKind::BinaryExpr(BinaryOp::Add), &[s, v], Action::Add, Some(7));
    let s = f.local("s", 5);
    let assign = f.op(NodeKind::AssignStmt, &[s, add], Action::Assign, None);
    let s = f.local("s", 5);
    let k = f.local("k", 3);
    let ret = f.op(NodeKind::ReturnStmt, &[s, k], Action::Return, None);

    f.chain(&[def_s, range]);
    f.forest.branch(range, Some(add), ret);
    f.chain(&[add, assign, range]);
    f.func("SumRange", &["a"], 2, &[def_s, range, assign, ret], def_s, 9)
}

fn ints(items: &[i64]) -> Value {
    Value::seq(items.iter().copied().map(Value::int).collect())
}

#[test]
fn range_visits_each_element_once() {
    let mut f = Fixture::new();
    let decl = sum_range(&mut f);
    let mut interp = f.interp();
    let out = interp.call(decl, &[ints(&[1, 2, 3])]).unwrap();
    assert_eq!(out, vec![Value::int(6), Value::int(2)]);
}

#[test]
fn empty_range_writes_nothing() {
    let mut f = Fixture::new();
    let decl = sum_range(&mut f);
    let mut interp = f.interp();
    let out = interp.call(decl, &[ints(&[])]).unwrap();
    assert_eq!(out, vec![Value::int(0), Value::Nil]);
}

#[test]
fn range_over_non_sequence_is_a_type_mismatch() {
    let mut f = Fixture::new();
    let decl = sum_range(&mut f);
    let mut interp = f.interp();
    let err = interp.call(decl, &[Value::int(3)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "sequence",
            got: "int"
        }
    );
}

#[test]
fn exhausted_range_restarts_from_zero() {
    // for pass := 0; pass < 2; pass++ { for _, v := range a { s = s + v } }
    // Slots: 0 result, 1 a, 2 s, 3 pass, 4 cond, 5 range, 6 sum, 7 cursor, 8 v.
    let mut f = Fixture::new();
    let s = f.local("s", 2);
    let zero = f.int(0);
    let def_s = f.op(NodeKind::Define, &[s, zero], Action::Define, None);
    let pass = f.local("pass", 3);
    let zero = f.int(0);
    let def_pass = f.op(NodeKind::Define, &[pass, zero], Action::Define, None);
    let pass = f.local("pass", 3);
    let two = f.int(2);
    let cond = f.op(NodeKind::BinaryExpr(BinaryOp::Lt), &[pass, two], Action::Lower, Some(4));
    let blank = f.tree().ident("_");
    let v = f.local("v", 8);
    let a = f.local("a", 1);
    let range = f.op(NodeKind::RangeStmt, &[blank, v, a], Action::Range, Some(5));
    f.forest.set_aux(range, 7);
    let s = f.local("s", 2);
    let v = f.local("v", 8);
    let add = f.op(NodeKind::BinaryExpr(BinaryOp::Add), &[s, v], Action::Add, Some(6));
    let s = f.local("s", 2);
    let assign = f.op(NodeKind::AssignStmt, &[s, add], Action::Assign, None);
    let pass = f.local("pass", 3);
    let inc = f.op(NodeKind::IncDecStmt(IncDec::Inc), &[pass], Action::Inc, Some(3));
    let s = f.local("s", 2);
    let ret = f.op(NodeKind::ReturnStmt, &[s], Action::Return, None);

    f.chain(&[def_s, def_pass, cond]);
    f.forest.branch(cond, Some(range), ret);
    f.forest.branch(range, Some(add), inc);
    f.chain(&[add, assign, range]);
    f.forest.link(inc, cond);
    let decl = f.func(
        "Twice",
        &["a"],
        1,
        &[def_s, def_pass, cond, range, assign, inc, ret],
        def_s,
        9,
    );

    let mut interp = f.interp();
    assert_eq!(
        interp.call(decl, &[ints(&[1, 2, 3])]).unwrap(),
        vec![Value::int(12)]
    );
}

proptest! {
    #[test]
    fn range_sums_and_counts(items in prop::collection::vec(-1000i64..1000, 0..40)) {
        let mut f = Fixture::new();
        let decl = sum_range(&mut f);
        let mut interp = f.interp();
        let out = interp.call(decl, &[ints(&items)]).unwrap();

        let last = match items.len() {
            0 => Value::Nil,
            n => Value::int(i64::try_from(n).unwrap() - 1),
        };
        prop_assert_eq!(&out, &vec![Value::int(items.iter().sum()), last]);
        // define, one range visit per element plus the final one,
        // sum and assign per element, return
        let n = u64::try_from(items.len()).unwrap();
        prop_assert_eq!(interp.steps(), 3 * n + 3);
    }
}
