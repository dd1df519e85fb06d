//! Registration handlers, one per declaration kind.

mod funcs;
mod packages;
mod type_resolution;
mod user_types;
mod vars;

pub(super) use funcs::register_func;
pub(super) use packages::{register_file, register_import};
pub(super) use user_types::register_type_spec;
pub(super) use vars::{register_var, settle_pending};
