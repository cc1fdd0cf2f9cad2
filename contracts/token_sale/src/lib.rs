#![no_std]

mod contract;
mod errors;
mod oracle;
mod pricing;
mod storage;
mod types;


pub use contract::{TokenSaleContract, TokenSaleContractClient};
pub use errors::Error;
pub use types::{Commission, Package, PaymentKind, Purchase, SaleConfig, SalePhase, SaleType};
