mod extract;

pub use extract::*;
