//! Parser-facing construction API.
//!
//! Wraps `SyntaxForest::push` with one method per node shape so that callers
//! (the parser, tests) never assemble child lists by hand.

use crate::{BinaryOp, Literal, NodeId, NodeKind, StringInterner, SyntaxForest, UnaryOp};

pub struct TreeBuilder<'a> {
    forest: &'a mut SyntaxForest,
    interner: &'a StringInterner,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(forest: &'a mut SyntaxForest, interner: &'a StringInterner) -> Self {
        TreeBuilder { forest, interner }
    }

    /// Direct access for annotations on nodes built so far.
    pub fn forest(&mut self) -> &mut SyntaxForest {
        self.forest
    }

    pub fn node(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        self.forest.push(kind, children)
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.forest.push_ident(name)
    }

    pub fn int(&mut self, v: i64) -> NodeId {
        self.forest.push_literal(Literal::Int(v))
    }

    pub fn boolean(&mut self, v: bool) -> NodeId {
        self.forest.push_literal(Literal::Bool(v))
    }

    pub fn string(&mut self, v: &str) -> NodeId {
        let s = self.interner.intern(v);
        self.forest.push_literal(Literal::Str(s))
    }

    /// `package name` followed by its declarations.
    pub fn file(&mut self, package: &str, decls: &[NodeId]) -> NodeId {
        let mut children = vec![self.ident(package)];
        children.extend_from_slice(decls);
        self.node(NodeKind::File, &children)
    }

    /// `import alias "path"`; `alias` may be `"."` for a dot-import.
    pub fn import(&mut self, alias: Option<&str>, path: &str) -> NodeId {
        let path = self.string(path);
        match alias {
            Some(alias) => {
                let alias = self.ident(alias);
                self.node(NodeKind::ImportSpec, &[alias, path])
            }
            None => self.node(NodeKind::ImportSpec, &[path]),
        }
    }

    /// `type name <ty>`
    pub fn type_spec(&mut self, name: &str, ty: NodeId) -> NodeId {
        let name = self.ident(name);
        self.node(NodeKind::TypeSpec, &[name, ty])
    }

    /// Identifier used in type position.
    pub fn type_name(&mut self, name: &str) -> NodeId {
        self.ident(name)
    }

    /// `*elem`
    pub fn pointer(&mut self, elem: NodeId) -> NodeId {
        self.node(NodeKind::StarExpr, &[elem])
    }

    /// `[]elem`
    pub fn array(&mut self, elem: NodeId) -> NodeId {
        self.node(NodeKind::ArrayType, &[elem])
    }

    /// `struct { fields }`
    pub fn struct_type(&mut self, fields: &[NodeId]) -> NodeId {
        let list = self.node(NodeKind::FieldList, fields);
        self.node(NodeKind::StructType, &[list])
    }

    /// `names... ty`; an empty `names` gives an anonymous field.
    pub fn field(&mut self, names: &[&str], ty: NodeId) -> NodeId {
        let mut children: Vec<NodeId> = names.iter().map(|n| self.ident(n)).collect();
        children.push(ty);
        self.node(NodeKind::Field, &children)
    }

    pub fn field_list(&mut self, fields: &[NodeId]) -> NodeId {
        self.node(NodeKind::FieldList, fields)
    }

    /// `func(params) (results)`
    pub fn func_type(&mut self, params: &[NodeId], results: &[NodeId]) -> NodeId {
        let params = self.field_list(params);
        let results = self.field_list(results);
        self.node(NodeKind::FuncType, &[params, results])
    }

    /// `func (recv) name <ftype> { body }`
    ///
    /// The receiver list is always present (empty for plain functions).
    pub fn func_decl(
        &mut self,
        recv: Option<NodeId>,
        name: &str,
        ftype: NodeId,
        body: &[NodeId],
    ) -> NodeId {
        let recv = match recv {
            Some(field) => self.field_list(&[field]),
            None => self.field_list(&[]),
        };
        let name = self.ident(name);
        let body = self.block(body);
        self.node(NodeKind::FuncDecl, &[recv, name, ftype, body])
    }

    pub fn block(&mut self, stmts: &[NodeId]) -> NodeId {
        self.node(NodeKind::BlockStmt, stmts)
    }

    /// `var name rest...` where `rest` is a type, a value, or both.
    pub fn define(&mut self, name: &str, rest: &[NodeId]) -> NodeId {
        let mut children = vec![self.ident(name)];
        children.extend_from_slice(rest);
        self.node(NodeKind::Define, &children)
    }

    /// `var ( a, b T )`: group defines sharing the first one's type.
    pub fn decl_group(&mut self, defines: &[NodeId]) -> NodeId {
        self.node(NodeKind::DeclGroup, defines)
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.node(NodeKind::BinaryExpr(op), &[lhs, rhs])
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.node(NodeKind::UnaryExpr(op), &[operand])
    }

    pub fn call(&mut self, fun: NodeId, args: &[NodeId]) -> NodeId {
        let mut children = vec![fun];
        children.extend_from_slice(args);
        self.node(NodeKind::CallExpr, &children)
    }

    pub fn index(&mut self, seq: NodeId, index: NodeId) -> NodeId {
        self.node(NodeKind::IndexExpr, &[seq, index])
    }

    /// `ty{elems...}`
    pub fn composite(&mut self, ty: NodeId, elems: &[NodeId]) -> NodeId {
        let mut children = vec![ty];
        children.extend_from_slice(elems);
        self.node(NodeKind::CompositeLit, &children)
    }

    pub fn ret(&mut self, values: &[NodeId]) -> NodeId {
        self.node(NodeKind::ReturnStmt, values)
    }

    /// `lhs... = rhs...`
    pub fn assign(&mut self, lhs: &[NodeId], rhs: &[NodeId]) -> NodeId {
        let mut children = lhs.to_vec();
        children.extend_from_slice(rhs);
        self.node(NodeKind::AssignStmt, &children)
    }
}
