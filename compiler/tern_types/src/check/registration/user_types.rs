//! Type declaration registration.

use tern_ir::{NodeId, NodeKind, WalkControl};

use super::type_resolution::{lookup_or_declare_type, resolve_type};
use crate::check::GlobalAnalysis;
use crate::{GtaError, Symbol, SymbolKind, Tag};

/// Register `[Ident name, type expr]`.
///
/// The declared name always denotes a `Named` type. If a receiver or a
/// forward reference already created that placeholder it is completed in
/// place, so methods attached earlier stay attached. A bare identifier on
/// the right declares an alias, which does not inherit the target's methods.
pub fn register_type_spec(
    gta: &mut GlobalAnalysis<'_>,
    spec: NodeId,
) -> Result<WalkControl, GtaError> {
    let (name_node, name) = gta.ident_child(spec, 0, "type declaration must start with its name")?;
    let rhs = gta
        .forest
        .child(spec, 1)
        .ok_or_else(|| gta.malformed(spec, "type declaration without a type"))?;
    let scope = gta.scope;

    let existing = gta
        .program
        .scopes
        .lookup_local(scope, name)
        .map(|sym| (sym.kind, sym.typ));
    let named = match existing {
        None => {
            let named = gta.program.pool.named(name);
            gta.program
                .scopes
                .insert(scope, name, Symbol::type_name(named));
            named
        }
        Some((SymbolKind::Type, ty))
            if gta.program.pool.tag(ty) == Tag::Named && !gta.program.pool.is_resolved(ty) =>
        {
            ty
        }
        Some(_) => {
            return Err(GtaError::Redeclared {
                name: gta.text(name),
            });
        }
    };

    let declared = if gta.forest.kind(rhs) == NodeKind::Ident {
        let target_name = gta
            .forest
            .name(rhs)
            .ok_or_else(|| gta.malformed(rhs, "identifier without a name"))?;
        let target = lookup_or_declare_type(gta, scope, target_name, rhs)?;
        gta.program.pool.alias(name, target)
    } else {
        resolve_type(gta, scope, rhs)?
    };
    gta.program
        .pool
        .set_resolution(named, declared)
        .map_err(|source| GtaError::Type {
            name: gta.text(name),
            source,
        })?;

    gta.forest.set_type(spec, named);
    gta.forest.set_type(name_node, named);
    tracing::debug!(
        name = gta.interner.lookup(name),
        ty = %gta.program.pool.display(declared, gta.interner),
        methods = gta.program.pool.methods(named).len(),
        "type"
    );
    Ok(WalkControl::Skip)
}
