//! Package-level variable registration.

use tern_ir::{Name, NodeId, NodeKind, ScopeId, Slot, TypeId, WalkControl};

use super::type_resolution::{infer_type, lookup_or_declare_type, resolve_type};
use crate::check::{GlobalAnalysis, PendingVar};
use crate::{GtaError, Symbol};

/// Declare a global variable with the next slot of the active scope.
///
/// Shapes: `[name, type]`, `[name, value]`, `[name, type, value]`, or
/// `[name]` inside a group whose first member carries the type.
pub fn register_var(
    gta: &mut GlobalAnalysis<'_>,
    define: NodeId,
) -> Result<WalkControl, GtaError> {
    let (_, name) = gta.ident_child(define, 0, "declaration must start with its name")?;
    let scope = gta.scope;
    if name != gta.names.blank {
        check_free(gta, scope, name)?;
    }
    let index = gta.program.scopes.next_slot(scope);

    let source = match gta.forest.children(define).len() {
        1 => gta
            .forest
            .parent(define)
            .filter(|&group| gta.forest.kind(group) == NodeKind::DeclGroup)
            .and_then(|group| gta.forest.child(group, 0))
            .filter(|&first| first != define)
            .and_then(|first| gta.forest.child(first, 1)),
        _ => gta.forest.child(define, 1),
    };
    let Some(source) = source else {
        return Err(GtaError::CannotInfer {
            name: gta.text(name),
        });
    };

    let explicit = gta.forest.children(define).len() >= 3;
    let ty = if explicit {
        Some(resolve_type(gta, scope, source)?)
    } else {
        infer_type(gta, scope, source)?
    };
    match ty {
        Some(ty) => bind(gta, scope, name, define, index, ty),
        None => {
            tracing::debug!(name = gta.interner.lookup(name), "variable type deferred");
            gta.pending.push(PendingVar {
                scope,
                name,
                define,
                source,
                index,
            });
        }
    }
    Ok(WalkControl::Skip)
}

/// Infer the deferred variables until no more progress is made.
///
/// Whatever is left over and is a bare identifier is taken to be a type
/// declared later; anything else cannot be inferred.
pub fn settle_pending(gta: &mut GlobalAnalysis<'_>) -> Result<(), GtaError> {
    loop {
        let mut progress = false;
        let pending = std::mem::take(&mut gta.pending);
        for var in pending {
            match infer_type(gta, var.scope, var.source)? {
                Some(ty) => {
                    bind(gta, var.scope, var.name, var.define, var.index, ty);
                    progress = true;
                }
                None => gta.pending.push(var),
            }
        }
        if !progress || gta.pending.is_empty() {
            break;
        }
    }

    for var in std::mem::take(&mut gta.pending) {
        if gta.forest.kind(var.source) != NodeKind::Ident {
            return Err(GtaError::CannotInfer {
                name: gta.text(var.name),
            });
        }
        let type_name = gta
            .forest
            .name(var.source)
            .ok_or_else(|| gta.malformed(var.source, "identifier without a name"))?;
        let ty = lookup_or_declare_type(gta, var.scope, type_name, var.source)?;
        bind(gta, var.scope, var.name, var.define, var.index, ty);
    }
    Ok(())
}

fn check_free(gta: &GlobalAnalysis<'_>, scope: ScopeId, name: Name) -> Result<(), GtaError> {
    let taken = gta.program.scopes.lookup_local(scope, name).is_some()
        || gta
            .pending
            .iter()
            .any(|p| p.scope == scope && p.name == name);
    if taken {
        return Err(GtaError::Redeclared {
            name: gta.text(name),
        });
    }
    Ok(())
}

fn bind(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    name: Name,
    define: NodeId,
    index: u32,
    ty: TypeId,
) {
    if name != gta.names.blank {
        gta.program
            .scopes
            .insert(scope, name, Symbol::global_var(ty, index));
    }
    gta.forest.set_type(define, ty);
    if let Some(ident) = gta.forest.child(define, 0) {
        gta.forest.set_type(ident, ty);
        gta.forest.set_slot(ident, Slot::Global { scope, index });
    }
    tracing::debug!(
        name = gta.interner.lookup(name),
        index,
        ty = %gta.program.pool.display(ty, gta.interner),
        "global variable"
    );
}
