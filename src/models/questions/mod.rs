pub mod entities;
pub mod filter;
pub mod requests;
pub mod responses;
