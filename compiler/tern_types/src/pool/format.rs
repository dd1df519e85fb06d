//! Human-readable type rendering for traces and error messages.

use tern_ir::{StringLookup, TypeId};

use super::Pool;
use crate::Tag;

impl Pool {
    /// Render `id` the way it would be written in source.
    pub fn display<I: StringLookup>(&self, id: TypeId, interner: &I) -> String {
        let mut out = String::new();
        self.write_type(id, interner, &mut out);
        out
    }

    fn write_type<I: StringLookup>(&self, id: TypeId, interner: &I, out: &mut String) {
        match self.tag(id) {
            Tag::Int | Tag::Bool | Tag::String => {
                out.push_str(id.primitive_name().unwrap_or("?"));
            }
            Tag::BoundValue | Tag::BoundPackage | Tag::SourcePackage => {
                out.push_str(id.primitive_name().unwrap_or("<package>"));
            }
            Tag::Named | Tag::Alias => match self.name(id) {
                Some(name) => out.push_str(interner.lookup(name)),
                None => out.push_str("<anonymous>"),
            },
            Tag::Pointer => {
                out.push('*');
                self.write_elem(id, interner, out);
            }
            Tag::Array => {
                out.push_str("[]");
                self.write_elem(id, interner, out);
            }
            Tag::Struct => {
                out.push_str("struct{");
                for (i, (name, ty)) in self.struct_fields(id).into_iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(interner.lookup(name));
                    out.push(' ');
                    self.write_type(ty, interner, out);
                }
                out.push('}');
            }
            Tag::Function => {
                out.push_str("func(");
                self.write_list(&self.func_params(id), interner, out);
                out.push(')');
                let results = self.func_results(id);
                match results.as_slice() {
                    [] => {}
                    [single] => {
                        out.push(' ');
                        self.write_type(*single, interner, out);
                    }
                    many => {
                        out.push_str(" (");
                        self.write_list(many, interner, out);
                        out.push(')');
                    }
                }
            }
        }
    }

    fn write_elem<I: StringLookup>(&self, id: TypeId, interner: &I, out: &mut String) {
        match self.val(id) {
            Some(elem) => self.write_type(elem, interner, out),
            None => out.push('?'),
        }
    }

    fn write_list<I: StringLookup>(&self, ids: &[TypeId], interner: &I, out: &mut String) {
        for (i, &ty) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(ty, interner, out);
        }
    }
}
