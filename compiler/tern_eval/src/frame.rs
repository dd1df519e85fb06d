//! Activation frames.

use tern_value::Value;

/// Slots of one function activation.
///
/// Slots `0..k` hold the function's `k` declared results. Every slot starts
/// as `Value::Nil`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    slots: Vec<Value>,
}

impl Frame {
    pub fn new(len: u32) -> Self {
        Frame {
            slots: vec![Value::Nil; len as usize],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, index: u32) -> Option<&Value> {
        self.slots.get(index as usize)
    }

    /// Overwrite slot `index`. Returns `false` if the frame is too short.
    #[inline]
    pub fn set(&mut self, index: u32, value: Value) -> bool {
        match self.slots.get_mut(index as usize) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Lengthen to `len` slots with `Value::Nil`; never shrinks.
    pub fn grow(&mut self, len: u32) {
        if self.slots.len() < len as usize {
            self.slots.resize(len as usize, Value::Nil);
        }
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.slots
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.slots
    }
}
