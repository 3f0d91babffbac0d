pub mod canonicalize;
pub mod expand;
pub mod next;
pub mod validate;
