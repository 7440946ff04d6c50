#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the CAP project.

Do NOT depend on this crate directly.
Use `cap-io` instead.
"#]

pub mod ident;
pub mod model;
