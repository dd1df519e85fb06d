//! Names the engine compares against on the call path.

use tern_ir::{Name, StringInterner};

/// Builtin functions dispatched directly by `Call`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Builtin {
    Println,
    Print,
}

/// Builtin names interned once at construction, so recognizing a builtin
/// call is a `u32` comparison.
#[derive(Copy, Clone)]
pub(crate) struct BuiltinNames {
    pub(crate) println: Name,
    pub(crate) print: Name,
}

impl BuiltinNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        BuiltinNames {
            println: interner.intern("println"),
            print: interner.intern("print"),
        }
    }

    pub(crate) fn builtin(&self, name: Name) -> Option<Builtin> {
        if name == self.println {
            Some(Builtin::Println)
        } else if name == self.print {
            Some(Builtin::Print)
        } else {
            None
        }
    }
}
