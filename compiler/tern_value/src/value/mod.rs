//! The closed set of values a frame slot can hold.

use std::fmt;

use tern_ir::NodeId;

use crate::Heap;

/// Signature of a host function exposed through a native package.
pub type NativeFnPtr = fn(&[Value]) -> Result<Value, String>;

/// Host function value.
#[derive(Copy, Clone)]
pub struct NativeFn {
    pub func: NativeFnPtr,
    pub name: &'static str,
}

impl NativeFn {
    pub fn new(name: &'static str, func: NativeFnPtr) -> Self {
        NativeFn { func, name }
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({})", self.name)
    }
}

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// Contents of a slot that was never written.
    #[default]
    Nil,
    Int(i64),
    Bool(bool),
    Str(Heap<String>),
    /// Array or slice contents.
    Seq(Heap<Vec<Value>>),
    /// Reference to a function declaration node.
    Func(NodeId),
    Native(NativeFn),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Heap::new(items))
    }

    pub fn native(name: &'static str, func: NativeFnPtr) -> Self {
        Value::Native(NativeFn::new(name, func))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<NodeId> {
        match self {
            Value::Func(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Func(_) => "func",
            Value::Native(_) => "native func",
        }
    }
}

/// Structural equality. Functions compare by declaration, natives by name.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::Seq(a), Value::Seq(b)) => Heap::ptr_eq(a, b) || **a == **b,
            (Value::Func(a), Value::Func(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Seq(items) => f.debug_tuple("Seq").field(&items.as_slice()).finish(),
            Value::Func(id) => write!(f, "Func({id:?})"),
            Value::Native(n) => write!(f, "Native({})", n.name),
        }
    }
}

/// Printed form, as produced by `println`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Func(id) => write!(f, "func{id}"),
            Value::Native(n) => write!(f, "native {}", n.name),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
