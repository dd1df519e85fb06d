//! Package-level variable storage.

use tern_ir::ScopeId;
use tern_types::ScopeTree;
use tern_value::Value;

use crate::Frame;

/// One frame per scope, sized from the slots the scope handed out during
/// type analysis. Identifiers of package variables address it through
/// `Slot::Global`.
#[derive(Clone, Debug, Default)]
pub struct Globals {
    frames: Vec<Frame>,
}

impl Globals {
    pub fn new(scopes: &ScopeTree) -> Self {
        Globals {
            frames: scopes
                .ids()
                .map(|id| Frame::new(scopes.get(id).slot_count()))
                .collect(),
        }
    }

    /// Cover scopes and slots handed out by a later analysis run, keeping
    /// every value already stored.
    pub fn extend_to(&mut self, scopes: &ScopeTree) {
        for id in scopes.ids() {
            let len = scopes.get(id).slot_count();
            match self.frames.get_mut(id.index()) {
                Some(frame) => frame.grow(len),
                None => self.frames.push(Frame::new(len)),
            }
        }
    }

    pub fn frame(&self, scope: ScopeId) -> Option<&Frame> {
        self.frames.get(scope.index())
    }

    pub fn get(&self, scope: ScopeId, index: u32) -> Option<&Value> {
        self.frame(scope)?.get(index)
    }

    /// Store into a global slot. Returns `false` if it does not exist.
    pub fn set(&mut self, scope: ScopeId, index: u32, value: Value) -> bool {
        self.frames
            .get_mut(scope.index())
            .is_some_and(|frame| frame.set(index, value))
    }
}
