//! Function and method registration.

use tern_ir::{Name, NodeId, NodeKind, WalkControl};

use super::type_resolution::{func_type, lookup_or_declare_type};
use crate::check::GlobalAnalysis;
use crate::{GtaError, Symbol, SymbolKind};

/// Register `[FieldList recv, Ident name, FuncType, BlockStmt?]`.
///
/// A non-empty receiver list also attaches the declaration to the receiver
/// type's method list (and, for `*T`, to both `*T` and `T`). The body is not
/// visited.
pub fn register_func(
    gta: &mut GlobalAnalysis<'_>,
    decl: NodeId,
) -> Result<WalkControl, GtaError> {
    let recv_list = gta
        .forest
        .child(decl, 0)
        .filter(|&r| gta.forest.kind(r) == NodeKind::FieldList)
        .ok_or_else(|| gta.malformed(decl, "function must have a receiver list"))?;
    let (_, name) = gta.ident_child(decl, 1, "function name must be an identifier")?;
    let sig = gta
        .forest
        .child(decl, 2)
        .ok_or_else(|| gta.malformed(decl, "function without a signature"))?;

    let scope = gta.scope;
    let ty = func_type(gta, scope, sig)?;
    gta.forest.set_type(decl, ty);

    let is_method = !gta.forest.children(recv_list).is_empty();
    let existing = gta
        .program
        .scopes
        .lookup_local(scope, name)
        .map(|sym| (sym.kind, sym.node));
    let bind = if is_method {
        // Methods share the function namespace only where it is free.
        match existing {
            None => true,
            Some((SymbolKind::Func, Some(prev))) => declares_method(gta, prev),
            Some(_) => false,
        }
    } else {
        match existing {
            None => true,
            Some((SymbolKind::Func, Some(prev))) if declares_method(gta, prev) => true,
            Some(_) => {
                return Err(GtaError::Redeclared {
                    name: gta.text(name),
                });
            }
        }
    };
    if bind {
        gta.program.scopes.insert(scope, name, Symbol::func(ty, decl));
    }

    if is_method {
        gta.forest.set_name(decl, name);
        attach_method(gta, decl, recv_list)?;
    }
    tracing::debug!(
        name = gta.interner.lookup(name),
        method = is_method,
        ty = %gta.program.pool.display(ty, gta.interner),
        "function"
    );
    Ok(WalkControl::Skip)
}

/// Append `decl` to its receiver type (`T` or `*T`).
fn attach_method(
    gta: &mut GlobalAnalysis<'_>,
    decl: NodeId,
    recv_list: NodeId,
) -> Result<(), GtaError> {
    let scope = gta.scope;
    // Anonymous receiver `Field[type]` or named `Field[Ident, type]`.
    let recv_ty = gta
        .forest
        .child(recv_list, 0)
        .and_then(|field| gta.forest.children(field).last().copied())
        .ok_or_else(|| gta.malformed(recv_list, "receiver without a type"))?;

    match gta.forest.kind(recv_ty) {
        NodeKind::Ident => {
            let type_name = receiver_name(gta, recv_ty)?;
            let ty = lookup_or_declare_type(gta, scope, type_name, recv_ty)?;
            gta.program.pool.add_method(ty, decl);
        }
        NodeKind::StarExpr => {
            let elem_node = gta
                .forest
                .child(recv_ty, 0)
                .ok_or_else(|| gta.malformed(recv_ty, "pointer receiver without a type"))?;
            let type_name = receiver_name(gta, elem_node)?;
            let elem = lookup_or_declare_type(gta, scope, type_name, elem_node)?;
            let ptr = gta.program.pool.pointer(elem);
            gta.program.pool.add_method(elem, decl);
            gta.program.pool.add_method(ptr, decl);
        }
        _ => return Err(gta.malformed(recv_ty, "receiver must be T or *T")),
    }
    Ok(())
}

fn receiver_name(gta: &GlobalAnalysis<'_>, node: NodeId) -> Result<Name, GtaError> {
    match (gta.forest.kind(node), gta.forest.name(node)) {
        (NodeKind::Ident, Some(name)) => Ok(name),
        _ => Err(gta.malformed(node, "receiver type must be a type name")),
    }
}

fn declares_method(gta: &GlobalAnalysis<'_>, decl: NodeId) -> bool {
    gta.forest
        .child(decl, 0)
        .is_some_and(|recv| !gta.forest.children(recv).is_empty())
}
