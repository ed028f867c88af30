pub mod initialize;
pub mod whitelist;
pub mod fund_vault;
pub mod sync_unlocks;
pub mod claim;
pub mod collect_fees;
pub mod set_fee_collector;
pub mod emit_claim_quote;

pub use initialize::*;
pub use whitelist::*;
pub use fund_vault::*;
pub use sync_unlocks::*;
pub use claim::*;
pub use collect_fees::*;
pub use set_fee_collector::*;
pub use emit_claim_quote::*;
