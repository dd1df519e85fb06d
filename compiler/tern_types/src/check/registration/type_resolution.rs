//! Type expressions and initializer inference.

use tern_ir::{Literal, Name, NodeId, NodeKind, ScopeId, TypeId, UnaryOp};

use crate::check::GlobalAnalysis;
use crate::{GtaError, Symbol, SymbolKind, Tag};

/// Resolve a node in type position.
///
/// Unknown type names become forward-declared placeholders in `scope`.
pub fn resolve_type(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    node: NodeId,
) -> Result<TypeId, GtaError> {
    match gta.forest.kind(node) {
        NodeKind::Ident => {
            let name = gta
                .forest
                .name(node)
                .ok_or_else(|| gta.malformed(node, "identifier without a name"))?;
            lookup_or_declare_type(gta, scope, name, node)
        }
        NodeKind::StarExpr => {
            let elem = only_child(gta, node)?;
            let elem = resolve_type(gta, scope, elem)?;
            Ok(gta.program.pool.pointer(elem))
        }
        NodeKind::ArrayType => {
            let elem = only_child(gta, node)?;
            let elem = resolve_type(gta, scope, elem)?;
            Ok(gta.program.pool.array(elem))
        }
        NodeKind::StructType => {
            let list = only_child(gta, node)?;
            let mut fields = Vec::new();
            for field in gta.forest.children(list).to_vec() {
                let children = gta.forest.children(field).to_vec();
                let Some((&ty_node, names)) = children.split_last() else {
                    return Err(gta.malformed(field, "field without a type"));
                };
                let ty = resolve_type(gta, scope, ty_node)?;
                if names.is_empty() {
                    // Embedded field: named after its type.
                    let name = embedded_name(gta, ty_node).unwrap_or(Name::EMPTY);
                    fields.push((name, ty));
                }
                for &n in names {
                    fields.push((gta.forest.name(n).unwrap_or(Name::EMPTY), ty));
                }
            }
            Ok(gta.program.pool.struct_type(&fields))
        }
        NodeKind::FuncType => func_type(gta, scope, node),
        NodeKind::SelectorExpr => qualified_type(gta, scope, node),
        NodeKind::ParenExpr => {
            let inner = only_child(gta, node)?;
            resolve_type(gta, scope, inner)
        }
        _ => Err(gta.malformed(node, "expected a type expression")),
    }
}

/// Type of `func(params) (results)`.
///
/// Each field contributes one entry per declared name, or one if unnamed.
pub fn func_type(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    ftype: NodeId,
) -> Result<TypeId, GtaError> {
    if gta.forest.kind(ftype) != NodeKind::FuncType {
        return Err(gta.malformed(ftype, "expected a function signature"));
    }
    let params = match gta.forest.child(ftype, 0) {
        Some(list) => field_list_types(gta, scope, list)?,
        None => Vec::new(),
    };
    let results = match gta.forest.child(ftype, 1) {
        Some(list) => field_list_types(gta, scope, list)?,
        None => Vec::new(),
    };
    Ok(gta.program.pool.function(&params, &results))
}

fn field_list_types(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    list: NodeId,
) -> Result<Vec<TypeId>, GtaError> {
    let mut types = Vec::new();
    for field in gta.forest.children(list).to_vec() {
        let children = gta.forest.children(field).to_vec();
        let Some((&ty_node, names)) = children.split_last() else {
            return Err(gta.malformed(field, "field without a type"));
        };
        let ty = resolve_type(gta, scope, ty_node)?;
        types.extend(std::iter::repeat_n(ty, names.len().max(1)));
    }
    Ok(types)
}

/// The type called `name` as seen from `scope`, declaring a placeholder in
/// `scope` if nothing by that name exists yet.
pub fn lookup_or_declare_type(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    name: Name,
    node: NodeId,
) -> Result<TypeId, GtaError> {
    if let Some((_, sym)) = gta.program.scopes.lookup(scope, name) {
        return match sym.kind {
            SymbolKind::Type => Ok(sym.typ),
            _ => Err(gta.malformed(node, "identifier does not name a type")),
        };
    }
    let placeholder = gta.program.pool.named(name);
    gta.program
        .scopes
        .insert(scope, name, Symbol::type_name(placeholder));
    tracing::debug!(
        name = gta.interner.lookup(name),
        ?placeholder,
        "forward-declared type"
    );
    Ok(placeholder)
}

/// `pkg.T` in type position.
fn qualified_type(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    node: NodeId,
) -> Result<TypeId, GtaError> {
    let (_, pkg) = gta.ident_child(node, 0, "qualifier must be an identifier")?;
    let (sel_node, sel) = gta.ident_child(node, 1, "selector must be an identifier")?;
    let target = gta
        .program
        .scopes
        .lookup(scope, pkg)
        .filter(|(_, sym)| sym.kind == SymbolKind::Package)
        .map(|(_, sym)| (sym.typ, sym.package));
    match target {
        Some((_, Some(package))) => lookup_or_declare_type(gta, package, sel, sel_node),
        Some((TypeId::BOUND_PACKAGE, None)) => Ok(TypeId::BOUND_VALUE),
        _ => Err(gta.malformed(node, "qualifier is not an imported package")),
    }
}

/// Type of an initializer expression.
///
/// `Ok(None)` means the expression refers to something not declared yet.
pub fn infer_type(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    node: NodeId,
) -> Result<Option<TypeId>, GtaError> {
    match gta.forest.kind(node) {
        NodeKind::BasicLit => Ok(gta.forest.literal(node).map(Literal::type_id)),
        NodeKind::Ident => {
            let Some(name) = gta.forest.name(node) else {
                return Err(gta.malformed(node, "identifier without a name"));
            };
            if name == gta.names.true_ || name == gta.names.false_ {
                return Ok(Some(TypeId::BOOL));
            }
            Ok(gta
                .program
                .scopes
                .lookup(scope, name)
                .and_then(|(_, sym)| match sym.kind {
                    SymbolKind::Builtin => None,
                    _ => Some(sym.typ),
                }))
        }
        NodeKind::CompositeLit => {
            let ty = gta
                .forest
                .child(node, 0)
                .ok_or_else(|| gta.malformed(node, "composite literal without a type"))?;
            resolve_type(gta, scope, ty).map(Some)
        }
        NodeKind::StarExpr | NodeKind::ArrayType | NodeKind::StructType | NodeKind::FuncType => {
            resolve_type(gta, scope, node).map(Some)
        }
        NodeKind::BinaryExpr(op) => {
            if op.yields_bool() {
                return Ok(Some(TypeId::BOOL));
            }
            let lhs = gta
                .forest
                .child(node, 0)
                .ok_or_else(|| gta.malformed(node, "binary expression without operands"))?;
            infer_type(gta, scope, lhs)
        }
        NodeKind::UnaryExpr(op) => {
            let operand = only_child(gta, node)?;
            match op {
                UnaryOp::Not => Ok(Some(TypeId::BOOL)),
                UnaryOp::Neg => infer_type(gta, scope, operand),
                UnaryOp::Addr => Ok(infer_type(gta, scope, operand)?
                    .map(|ty| gta.program.pool.pointer(ty))),
            }
        }
        NodeKind::ParenExpr => {
            let inner = only_child(gta, node)?;
            infer_type(gta, scope, inner)
        }
        NodeKind::IndexExpr => {
            let seq = gta
                .forest
                .child(node, 0)
                .ok_or_else(|| gta.malformed(node, "index expression without an operand"))?;
            Ok(infer_type(gta, scope, seq)?.and_then(|ty| element_of(gta, ty)))
        }
        NodeKind::CallExpr => infer_call(gta, scope, node),
        NodeKind::SelectorExpr => {
            let (_, pkg) = gta.ident_child(node, 0, "qualifier must be an identifier")?;
            let (_, sel) = gta.ident_child(node, 1, "selector must be an identifier")?;
            let scopes = &gta.program.scopes;
            Ok(match scopes.lookup(scope, pkg) {
                Some((_, sym)) if sym.kind == SymbolKind::Package => match sym.package {
                    Some(package) => scopes.lookup_local(package, sel).map(|s| s.typ),
                    None => Some(TypeId::BOUND_VALUE),
                },
                _ => None,
            })
        }
        _ => Ok(None),
    }
}

/// Result type of a single-result call, or a conversion `T(x)`.
fn infer_call(
    gta: &mut GlobalAnalysis<'_>,
    scope: ScopeId,
    call: NodeId,
) -> Result<Option<TypeId>, GtaError> {
    let fun = gta
        .forest
        .child(call, 0)
        .ok_or_else(|| gta.malformed(call, "call without a callee"))?;
    if gta.forest.kind(fun) == NodeKind::Ident {
        let name = gta.forest.name(fun);
        if name == Some(gta.names.len) {
            return Ok(Some(TypeId::INT));
        }
        let is_type = name
            .and_then(|n| gta.program.scopes.lookup(scope, n))
            .is_some_and(|(_, sym)| sym.kind == SymbolKind::Type);
        if is_type {
            return resolve_type(gta, scope, fun).map(Some);
        }
    }
    let Some(fun_ty) = infer_type(gta, scope, fun)? else {
        return Ok(None);
    };
    let pool = &gta.program.pool;
    let Ok(sig) = pool.underlying(fun_ty) else {
        return Ok(None);
    };
    if pool.tag(sig) != Tag::Function {
        return Ok(None);
    }
    match pool.func_results(sig).as_slice() {
        [single] => Ok(Some(*single)),
        _ => Ok(None),
    }
}

fn element_of(gta: &GlobalAnalysis<'_>, ty: TypeId) -> Option<TypeId> {
    let pool = &gta.program.pool;
    let base = pool.underlying(ty).ok()?;
    match pool.tag(base) {
        Tag::Array => pool.elem(base),
        Tag::String => Some(TypeId::INT),
        _ => None,
    }
}

fn embedded_name(gta: &GlobalAnalysis<'_>, ty_node: NodeId) -> Option<Name> {
    match gta.forest.kind(ty_node) {
        NodeKind::Ident => gta.forest.name(ty_node),
        NodeKind::StarExpr => embedded_name(gta, gta.forest.child(ty_node, 0)?),
        _ => None,
    }
}

fn only_child(gta: &GlobalAnalysis<'_>, node: NodeId) -> Result<NodeId, GtaError> {
    match gta.forest.children(node) {
        [child] => Ok(*child),
        _ => Err(gta.malformed(node, "expected exactly one operand")),
    }
}
