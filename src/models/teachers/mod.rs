pub mod entities;
pub mod roles;
