use pretty_assertions::assert_eq;

use super::*;
use crate::{BinaryOp, StringInterner};

#[test]
fn push_wires_parent_links() {
    let interner = StringInterner::new();
    let mut forest = SyntaxForest::new();

    let x = forest.push_ident(interner.intern("x"));
    let one = forest.push_literal(Literal::Int(1));
    let sum = forest.push(NodeKind::BinaryExpr(BinaryOp::Add), &[x, one]);

    assert_eq!(forest.children(sum), &[x, one]);
    assert_eq!(forest.parent(x), Some(sum));
    assert_eq!(forest.parent(one), Some(sum));
    assert_eq!(forest.parent(sum), None);
    assert_eq!(forest.len(), 3);
}

#[test]
fn literals_are_typed_on_push() {
    let interner = StringInterner::new();
    let mut forest = SyntaxForest::new();

    let i = forest.push_literal(Literal::Int(7));
    let b = forest.push_literal(Literal::Bool(true));
    let s = forest.push_literal(Literal::Str(interner.intern("hi")));

    assert_eq!(forest.typ(i), Some(TypeId::INT));
    assert_eq!(forest.typ(b), Some(TypeId::BOOL));
    assert_eq!(forest.typ(s), Some(TypeId::STRING));
}

#[test]
fn branch_sets_both_successors() {
    let mut forest = SyntaxForest::new();
    let cond = forest.push_literal(Literal::Bool(true));
    let a = forest.push(NodeKind::ExprStmt, &[]);
    let b = forest.push(NodeKind::ExprStmt, &[]);

    forest.branch(cond, Some(a), b);
    assert_eq!(forest.node(cond).tnext, Some(a));
    assert_eq!(forest.node(cond).fnext, Some(b));

    forest.link(a, b);
    assert_eq!(forest.node(a).tnext, Some(b));
    assert_eq!(forest.node(a).fnext, None);
}

#[test]
fn capture_scrutinee_reads_switch_tag() {
    let interner = StringInterner::new();
    let mut forest = SyntaxForest::new();

    let tag = forest.push_ident(interner.intern("x"));
    let value = forest.push_literal(Literal::Int(2));
    let case = forest.push(NodeKind::CaseClause, &[value]);
    let default = forest.push(NodeKind::CaseClause, &[]);
    let body = forest.push(NodeKind::BlockStmt, &[case, default]);
    let _switch = forest.push(NodeKind::SwitchStmt, &[tag, body]);

    assert_eq!(forest.capture_scrutinee(case), Some(tag));
    assert_eq!(forest.node(case).scrutinee, Some(tag));
    assert_eq!(forest.capture_scrutinee(default), Some(tag));
}

#[test]
fn capture_scrutinee_rejects_other_shapes() {
    let mut forest = SyntaxForest::new();
    let case = forest.push(NodeKind::CaseClause, &[]);
    let block = forest.push(NodeKind::BlockStmt, &[case]);
    let _if = forest.push(NodeKind::IfStmt, &[block]);

    assert_eq!(forest.capture_scrutinee(case), None);
    assert_eq!(forest.node(case).scrutinee, None);
}

#[test]
fn get_out_of_range_is_none() {
    let forest = SyntaxForest::new();
    assert!(forest.get(NodeId::new(3)).is_none());
    assert!(forest.is_empty());
}
