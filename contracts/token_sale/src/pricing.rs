//! Fixed-point pricing for the staged sale.
//!
//! All arithmetic is integer-only `u128` and truncates toward zero. The
//! scale of every quantity is fixed by the constants below, never inferred
//! from context.

/// Unit prices are dollars per token, scaled by 1e7.
pub const PRICE_SCALE: u128 = 10_000_000;

/// Token allocations are scaled by 1e18.
pub const ALLOCATION_SCALE: u128 = 1_000_000_000_000_000_000;

/// Feed prices are dollars per whole native unit, scaled by 1e8.
pub const FEED_SCALE: u128 = 100_000_000;

/// Smallest native units (stroops) per whole native unit.
pub const NATIVE_SCALE: u128 = 10_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Referral commission rate in basis points of the buyer's allocation.
pub const REFERRAL_BPS: u128 = 1_000;
pub const BPS_DENOM: u128 = 10_000;

/// Flat-table allocation: `package_amount` dollars at `price_per_unit`
/// (PRICE_SCALE) dollars per token.
pub fn flat_allocation(package_amount: u128, price_per_unit: u128) -> u128 {
    package_amount * ALLOCATION_SCALE / price_per_unit
}

/// Whole days elapsed since `start`; 0 before the window opens.
pub fn elapsed_full_days(start: u64, now: u64) -> u64 {
    if now <= start {
        return 0;
    }
    (now - start) / SECONDS_PER_DAY
}

/// Time-increasing unit price: base plus one increment per elapsed full day.
pub fn current_unit_price(base_price: u128, daily_increment: u128, start: u64, now: u64) -> u128 {
    base_price + daily_increment * elapsed_full_days(start, now) as u128
}

/// Time-increasing allocation: `amount` dollars at the current unit price.
pub fn time_priced_allocation(amount: u128, unit_price: u128) -> u128 {
    amount * ALLOCATION_SCALE / unit_price
}

/// Native units due for `dollar_amount` dollars at `feed_price`
/// (FEED_SCALE dollars per whole native unit).
pub fn native_fund_due(dollar_amount: u128, feed_price: u128) -> u128 {
    dollar_amount * NATIVE_SCALE * FEED_SCALE / feed_price
}

/// Stable-token units due for `dollar_amount` dollars.
pub fn stable_fund_due(dollar_amount: u128, token_decimals: u32) -> u128 {
    dollar_amount * 10u128.pow(token_decimals)
}

/// Commission credited to a referrer for a referred allocation.
pub fn referral_commission(token_allocation: u128) -> u128 {
    token_allocation * REFERRAL_BPS / BPS_DENOM
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flat_allocation_is_exact() {
        // 1000 dollars at 0.0002 $/token (2000 in 1e7 scale) -> 5e17
        assert_eq!(flat_allocation(1_000, 2_000), 500_000_000_000_000_000);
        assert_eq!(flat_allocation(5_000, 1_800), 2_777_777_777_777_777_777);
    }

    #[test]
    fn flat_allocation_truncates_toward_zero() {
        // 1000 * 1e18 / 3000 = 333333333333333333.33..
        assert_eq!(flat_allocation(1_000, 3_000), 333_333_333_333_333_333);
    }

    #[test]
    fn elapsed_days_clamp_and_boundaries() {
        assert_eq!(elapsed_full_days(100, 99), 0);
        assert_eq!(elapsed_full_days(100, 100), 0);
        assert_eq!(elapsed_full_days(100, 100 + SECONDS_PER_DAY - 1), 0);
        assert_eq!(elapsed_full_days(100, 100 + SECONDS_PER_DAY), 1);
        assert_eq!(elapsed_full_days(100, 100 + 3 * SECONDS_PER_DAY + 5), 3);
    }

    #[test]
    fn unit_price_steps_per_day() {
        assert_eq!(current_unit_price(1_000, 100, 100, 50), 1_000);
        assert_eq!(current_unit_price(1_000, 100, 100, 100), 1_000);
        assert_eq!(
            current_unit_price(1_000, 100, 100, 100 + 3 * SECONDS_PER_DAY),
            1_300
        );
    }

    #[test]
    fn native_fund_conversion() {
        // $1000 at $2.00 per native unit -> 500 whole units -> 5e9 stroops
        assert_eq!(native_fund_due(1_000, 200_000_000), 5_000_000_000);
        // $500 at $2.00 -> 2.5e9 stroops
        assert_eq!(native_fund_due(500, 200_000_000), 2_500_000_000);
    }

    #[test]
    fn stable_fund_scales_by_decimals() {
        assert_eq!(stable_fund_due(1_000, 6), 1_000_000_000);
        assert_eq!(stable_fund_due(2_000, 7), 20_000_000_000);
    }

    #[test]
    fn commission_is_ten_percent() {
        assert_eq!(referral_commission(500_000_000_000_000_000), 50_000_000_000_000_000);
        assert_eq!(referral_commission(9), 0); // truncates
    }
}
