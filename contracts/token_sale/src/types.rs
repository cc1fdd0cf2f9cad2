use soroban_sdk::{contracttype, Address, Env, String};

/// Package tiers the owner may price; arbitrary amounts are rejected.
pub const ALLOWED_PACKAGE_AMOUNTS: [u128; 4] = [1_000, 5_000, 10_000, 30_000];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SaleType {
    Unset = 0,
    Private = 1,
    PreSale = 2,
    Public = 3,
}

impl SaleType {
    /// Label stamped on purchase records written by the engine.
    pub fn label(&self, env: &Env) -> String {
        match self {
            SaleType::Unset => String::from_str(env, "Unset"),
            SaleType::Private => String::from_str(env, "Private"),
            SaleType::PreSale => String::from_str(env, "PreSale"),
            SaleType::Public => String::from_str(env, "Public"),
        }
    }

    /// Phases priced by the time-increasing model rather than the package table.
    pub fn is_time_priced(&self) -> bool {
        matches!(self, SaleType::PreSale | SaleType::Public)
    }
}

/// Static configuration, written once at initialization.
#[derive(Clone)]
#[contracttype]
pub struct SaleConfig {
    pub treasury: Address,     // recipient of all collected funds
    pub oracle: Address,       // native price feed contract
    pub native_token: Address, // native asset contract used for native settlement
    pub token_decimals: u32,   // decimal count of the allowed stable tokens
    pub stable_payments_enabled: bool,
}

/// The active phase descriptor. Replaced wholesale by each configuration
/// call, never partially patched.
#[derive(Clone)]
#[contracttype]
pub struct SalePhase {
    pub sale_type: SaleType,
    pub start_time: u64,
    pub end_time: u64,
    pub base_price: u128,      // dollars per token, 1e7 fixed point
    pub daily_increment: u128, // price step per elapsed full day, 1e7 fixed point
    pub lock_months: u32,
    pub vesting_months: u32,
}

/// Flat pricing and vesting terms for one package amount.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Package {
    pub price_per_unit: u128, // dollars per token, 1e7 fixed point
    pub lock_months: u32,
    pub vesting_months: u32,
}

/// One purchase event in a buyer's ledger. Append-only.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Purchase {
    pub package_amount: u128,   // dollars
    pub token_allocation: u128, // 1e18 fixed point
    pub unit_price: u128,       // 1e7 fixed point
    pub timestamp: u64,
    pub lock_months: u32,
    pub vesting_months: u32,
    pub label: String,
}

/// One referral credit in a referrer's ledger. Append-only.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Commission {
    pub amount: u128, // token allocation units, 1e18 fixed point
    pub timestamp: u64,
    pub label: String,
}

/// How a purchase is settled: attached native value or a stable token pull.
#[derive(Clone)]
#[contracttype]
pub enum PaymentKind {
    Native,
    Stable(Address),
}

#[contracttype]
pub enum DataKey {
    Config,
    Phase,
    Owner,
    Paused,
    TotalSold,
    TotalRaised,
    Package(u128),
    Purchases(Address),
    Commissions(Address),
    SupportedToken(Address),
    ReferralTypes,
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
