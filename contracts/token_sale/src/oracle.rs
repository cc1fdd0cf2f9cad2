use soroban_sdk::{Address, Env, Symbol};

/// Native price in dollars per whole native unit, FEED_SCALE fixed point.
///
/// Providers implement `latest() -> (i128, u64)` (value, updated_at). The
/// invocation is raw by symbol so any conforming feed works; if the call
/// traps, the whole transaction reverts.
pub fn latest_native_price(env: &Env, oracle: &Address) -> u128 {
    let (price, _updated_at): (i128, u64) =
        env.invoke_contract(oracle, &Symbol::new(env, "latest"), soroban_sdk::vec![env]);
    if price <= 0 {
        return 0;
    }
    price as u128
}
