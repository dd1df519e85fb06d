//! Type pool: the type graph.
//!
//! Every type is a `TypeId` into one `Pool`. The pool owns, per item, its
//! tag, its child type (`val`: pointee, element, alias target or the
//! resolution of a named type), an optional name and a compact `extra`
//! payload for struct fields and function signatures. Method lists are kept
//! in a parallel table indexed by `TypeId`.

mod construct;
mod format;

use rustc_hash::FxHashMap;
use tern_ir::{Name, NodeId, TypeId};

use crate::{Tag, TypeError};

#[derive(Clone, Debug)]
struct Item {
    tag: Tag,
    val: Option<TypeId>,
    name: Option<Name>,
    extra: Box<[u32]>,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
struct StructuralKey {
    tag: Tag,
    val: Option<TypeId>,
    extra: Box<[u32]>,
}

/// Owner of every type of a session.
#[derive(Clone, Debug)]
pub struct Pool {
    items: Vec<Item>,
    methods: Vec<Vec<NodeId>>,
    structural: FxHashMap<StructuralKey, TypeId>,
}

impl Pool {
    /// Create a pool holding the pre-interned types at their fixed ids.
    pub fn new() -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(64),
            methods: Vec::with_capacity(64),
            structural: FxHashMap::default(),
        };
        for tag in [
            Tag::Int,
            Tag::Bool,
            Tag::String,
            Tag::BoundValue,
            Tag::BoundPackage,
            Tag::SourcePackage,
        ] {
            pool.push(tag, None, None, &[]);
        }
        debug_assert_eq!(pool.len(), TypeId::PRIMITIVE_COUNT as usize);
        pool
    }

    fn push(
        &mut self,
        tag: Tag,
        val: Option<TypeId>,
        name: Option<Name>,
        extra: &[u32],
    ) -> TypeId {
        let raw = u32::try_from(self.items.len())
            .unwrap_or_else(|_| panic!("type pool exceeded {} items", u32::MAX));
        self.items.push(Item {
            tag,
            val,
            name,
            extra: extra.into(),
        });
        self.methods.push(Vec::new());
        TypeId::from_raw(raw)
    }

    /// Hash-cons a structural type.
    fn intern(&mut self, tag: Tag, val: Option<TypeId>, extra: &[u32]) -> TypeId {
        debug_assert!(tag.is_structural());
        let key = StructuralKey {
            tag,
            val,
            extra: extra.into(),
        };
        if let Some(&id) = self.structural.get(&key) {
            return id;
        }
        let id = self.push(tag, val, None, extra);
        self.structural.insert(key, id);
        id
    }

    fn item(&self, id: TypeId) -> &Item {
        &self.items[id.index()]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.items.len()
    }

    #[inline]
    pub fn tag(&self, id: TypeId) -> Tag {
        self.item(id).tag
    }

    /// Child type: pointee, element, alias target, or named resolution.
    #[inline]
    pub fn val(&self, id: TypeId) -> Option<TypeId> {
        self.item(id).val
    }

    /// Declared name of a named or alias type.
    #[inline]
    pub fn name(&self, id: TypeId) -> Option<Name> {
        self.item(id).name
    }

    /// Complete a forward-declared named type.
    ///
    /// The placeholder keeps its id and its method list.
    pub fn set_resolution(&mut self, named: TypeId, target: TypeId) -> Result<(), TypeError> {
        let item = &mut self.items[named.index()];
        if item.tag != Tag::Named {
            return Err(TypeError::NotNamed(named));
        }
        if item.val.is_some() {
            return Err(TypeError::AlreadyResolved(named));
        }
        item.val = Some(target);
        Ok(())
    }

    /// False only for named types still waiting for their declaration.
    pub fn is_resolved(&self, id: TypeId) -> bool {
        let item = self.item(id);
        item.tag != Tag::Named || item.val.is_some()
    }

    /// Follow named and alias links down to a structural or primitive type.
    pub fn underlying(&self, id: TypeId) -> Result<TypeId, TypeError> {
        let mut current = id;
        // Any chain longer than the pool revisits an item.
        for _ in 0..=self.items.len() {
            let item = self.item(current);
            match item.tag {
                Tag::Named => current = item.val.ok_or(TypeError::Unresolved(current))?,
                Tag::Alias => current = item.val.ok_or(TypeError::Unresolved(current))?,
                _ => return Ok(current),
            }
        }
        Err(TypeError::Cycle(id))
    }

    /// Methods attached to `id`, in declaration order.
    pub fn methods(&self, id: TypeId) -> &[NodeId] {
        &self.methods[id.index()]
    }

    /// Attach a method declaration. Returns `false` if it was already attached.
    pub fn add_method(&mut self, id: TypeId, decl: NodeId) -> bool {
        let list = &mut self.methods[id.index()];
        if list.contains(&decl) {
            return false;
        }
        list.push(decl);
        true
    }

    /// Element type of a pointer or array.
    pub fn elem(&self, id: TypeId) -> Option<TypeId> {
        match self.tag(id) {
            Tag::Pointer | Tag::Array => self.val(id),
            _ => None,
        }
    }

    /// Fields of a struct type, in declaration order.
    pub fn struct_fields(&self, id: TypeId) -> Vec<(Name, TypeId)> {
        let item = self.item(id);
        if item.tag != Tag::Struct {
            return Vec::new();
        }
        item.extra
            .chunks_exact(2)
            .map(|pair| (Name::from_raw(pair[0]), TypeId::from_raw(pair[1])))
            .collect()
    }

    /// Parameter types of a function type.
    pub fn func_params(&self, id: TypeId) -> Vec<TypeId> {
        self.signature(id).0
    }

    /// Result types of a function type.
    pub fn func_results(&self, id: TypeId) -> Vec<TypeId> {
        self.signature(id).1
    }

    fn signature(&self, id: TypeId) -> (Vec<TypeId>, Vec<TypeId>) {
        let item = self.item(id);
        let Some((&count, rest)) = item.extra.split_first() else {
            return (Vec::new(), Vec::new());
        };
        if item.tag != Tag::Function {
            return (Vec::new(), Vec::new());
        }
        let (params, results) = rest.split_at((count as usize).min(rest.len()));
        let ids = |raw: &[u32]| raw.iter().copied().map(TypeId::from_raw).collect();
        (ids(params), ids(results))
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
