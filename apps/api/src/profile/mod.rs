// Profile core: form normalization, validation, the per-session store and
// the completeness gate that guards every generation feature.

pub mod completeness;
pub mod handlers;
pub mod model;
pub mod normalize;
pub mod store;
pub mod validation;
