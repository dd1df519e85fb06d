//! `File` and `ImportSpec` registration.

use tern_ir::{Literal, Name, NodeId, ScopeId, WalkControl};

use crate::check::GlobalAnalysis;
use crate::{GtaError, LoadError, Symbol};

/// Switch the active scope to the file's package scope.
pub fn register_file(
    gta: &mut GlobalAnalysis<'_>,
    file: NodeId,
) -> Result<WalkControl, GtaError> {
    let (_, package) = gta.ident_child(file, 0, "file must start with its package name")?;
    let scope = gta.program.ensure_package(package);
    gta.scope = scope;
    gta.forest.set_scope(file, scope);
    tracing::debug!(package = gta.interner.lookup(package), ?scope, "file");
    Ok(WalkControl::Descend)
}

/// Bind an imported package (or, for a dot-import of a native package, its
/// exports) in the active scope.
pub fn register_import(
    gta: &mut GlobalAnalysis<'_>,
    spec: NodeId,
) -> Result<WalkControl, GtaError> {
    let (alias, path_node) = match gta.forest.children(spec).len() {
        1 => (None, gta.forest.child(spec, 0)),
        2 => {
            let (_, alias) = gta.ident_child(spec, 0, "import alias must be an identifier")?;
            (Some(alias), gta.forest.child(spec, 1))
        }
        _ => return Err(gta.malformed(spec, "import takes an optional alias and a path")),
    };
    let Some(Literal::Str(path)) = path_node.and_then(|p| gta.forest.literal(p)) else {
        return Err(gta.malformed(spec, "import path must be a string literal"));
    };
    let path_text = gta.interner.lookup(path);
    let name = match alias {
        Some(alias) => alias,
        None => gta.interner.intern(base_name(path_text)),
    };

    let natives = gta.natives;
    if let Some(exports) = natives.get(path) {
        if name == gta.names.dot {
            for (export, value) in exports {
                gta.program
                    .scopes
                    .insert(gta.scope, *export, Symbol::bound(value.clone()));
            }
            tracing::debug!(
                path = path_text,
                count = exports.len(),
                "dot-import of native package"
            );
        } else {
            gta.program
                .scopes
                .insert(gta.scope, name, Symbol::native_package(path));
            tracing::debug!(path = path_text, "native package import");
        }
        return Ok(WalkControl::Skip);
    }

    if name == gta.names.dot {
        return Err(gta.malformed(spec, "dot-import is only supported for native packages"));
    }
    let package = load_source(gta, path)?;
    gta.program
        .scopes
        .insert(gta.scope, name, Symbol::source_package(path, package));
    Ok(WalkControl::Skip)
}

/// Analyze the source package at `path` unless it was already loaded.
fn load_source(gta: &mut GlobalAnalysis<'_>, path: Name) -> Result<ScopeId, GtaError> {
    if let Some(scope) = gta.program.package_at_path(path) {
        return Ok(scope);
    }
    if gta.program.loading.contains(&path) {
        let mut chain: Vec<String> =
            gta.program.loading.iter().map(|&p| gta.text(p)).collect();
        chain.push(gta.text(path));
        return Err(GtaError::ImportCycle { chain });
    }

    let path_text = gta.interner.lookup(path);
    tracing::debug!(path = path_text, "loading source package");
    gta.program.loading.push(path);
    let outcome = gta
        .loader
        .load(path_text, gta.forest, gta.interner)
        .map_err(GtaError::from)
        .and_then(|roots| {
            let saved = gta.scope;
            let result = gta.analyze_roots(&roots);
            gta.scope = saved;
            result.map(|()| roots)
        });
    gta.program.loading.pop();
    let roots = outcome?;

    let scope = roots.iter().find_map(|&root| gta.forest.node(root).scope);
    gta.program.mark_loaded(path, scope);
    scope.ok_or_else(|| {
        GtaError::Load(LoadError::Failed {
            path: path_text.to_string(),
            message: "no package files".to_string(),
        })
    })
}

/// Last component of an import path.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
