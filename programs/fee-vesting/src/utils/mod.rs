pub mod access;
pub mod claim;
pub mod fees;
pub mod guard;
pub mod schedule;
pub mod sync;
pub mod whitelist;
