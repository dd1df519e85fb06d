//! Type construction.

use tern_ir::{Name, TypeId};

use super::Pool;
use crate::Tag;

impl Pool {
    /// `*elem`
    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(Tag::Pointer, Some(elem), &[])
    }

    /// `[]elem`
    pub fn array(&mut self, elem: TypeId) -> TypeId {
        self.intern(Tag::Array, Some(elem), &[])
    }

    /// `struct { name type; ... }`
    pub fn struct_type(&mut self, fields: &[(Name, TypeId)]) -> TypeId {
        let extra: Vec<u32> = fields
            .iter()
            .flat_map(|&(name, ty)| [name.raw(), ty.raw()])
            .collect();
        self.intern(Tag::Struct, None, &extra)
    }

    /// `func(params) (results)`
    ///
    /// Layout of `extra`: `[param_count, params..., results...]`.
    pub fn function(&mut self, params: &[TypeId], results: &[TypeId]) -> TypeId {
        let count = u32::try_from(params.len())
            .unwrap_or_else(|_| panic!("function with {} parameters", params.len()));
        let mut extra = Vec::with_capacity(1 + params.len() + results.len());
        extra.push(count);
        extra.extend(params.iter().map(|t| t.raw()));
        extra.extend(results.iter().map(|t| t.raw()));
        self.intern(Tag::Function, None, &extra)
    }

    /// Fresh alias `name = target`. Never shares methods with `target`.
    pub fn alias(&mut self, name: Name, target: TypeId) -> TypeId {
        self.push(Tag::Alias, Some(target), Some(name), &[])
    }

    /// Fresh, unresolved named type. Complete it with `set_resolution`.
    pub fn named(&mut self, name: Name) -> TypeId {
        self.push(Tag::Named, None, Some(name), &[])
    }
}
