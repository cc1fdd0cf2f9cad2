use crate::types::*;
use soroban_sdk::{vec, Address, Env, Vec};

pub fn get_config(env: &Env) -> Option<SaleConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_phase(env: &Env) -> Option<SalePhase> {
    env.storage().instance().get(&DataKey::Phase)
}

pub fn set_phase(env: &Env, phase: &SalePhase) {
    env.storage().instance().set(&DataKey::Phase, phase);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_total_sold(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSold)
        .unwrap_or(0)
}

pub fn set_total_sold(env: &Env, amount: u128) {
    env.storage().instance().set(&DataKey::TotalSold, &amount);
}

pub fn get_total_raised(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: u128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn get_package(env: &Env, package_amount: u128) -> Option<Package> {
    env.storage()
        .persistent()
        .get(&DataKey::Package(package_amount))
}

pub fn set_package(env: &Env, package_amount: u128, package: &Package) {
    env.storage()
        .persistent()
        .set(&DataKey::Package(package_amount), package);
}

pub fn get_purchases(env: &Env, user: &Address) -> Vec<Purchase> {
    env.storage()
        .persistent()
        .get(&DataKey::Purchases(user.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_purchase(env: &Env, user: &Address, purchase: &Purchase) {
    let mut purchases = get_purchases(env, user);
    purchases.push_back(purchase.clone());
    env.storage()
        .persistent()
        .set(&DataKey::Purchases(user.clone()), &purchases);
}

pub fn get_commissions(env: &Env, user: &Address) -> Vec<Commission> {
    env.storage()
        .persistent()
        .get(&DataKey::Commissions(user.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_commission(env: &Env, user: &Address, commission: &Commission) {
    let mut commissions = get_commissions(env, user);
    commissions.push_back(commission.clone());
    env.storage()
        .persistent()
        .set(&DataKey::Commissions(user.clone()), &commissions);
}

pub fn is_supported_token(env: &Env, token: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::SupportedToken(token.clone()))
        .unwrap_or(false)
}

pub fn set_supported_token(env: &Env, token: &Address, supported: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::SupportedToken(token.clone()), &supported);
}

pub fn get_referral_types(env: &Env) -> Vec<SaleType> {
    env.storage()
        .instance()
        .get(&DataKey::ReferralTypes)
        .unwrap_or_else(|| vec![env, SaleType::Public])
}

pub fn set_referral_types(env: &Env, types: &Vec<SaleType>) {
    env.storage().instance().set(&DataKey::ReferralTypes, types);
}
