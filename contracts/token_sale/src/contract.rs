use crate::errors::Error;
use crate::oracle;
use crate::pricing;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, token, Address, Env, String, Vec};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Staged Token Sale with Packages, Vesting Terms and Referrals"
);

#[contract]
pub struct TokenSaleContract;

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = get_owner(env).ok_or(Error::NotInitialized)?;
    if *caller != owner {
        return Err(Error::NotOwner);
    }
    Ok(())
}

fn check_window(env: &Env, start_time: u64, end_time: u64) -> Result<(), Error> {
    let now = get_ledger_timestamp(env);
    if start_time <= now || end_time <= start_time {
        return Err(Error::InvalidWindow);
    }
    Ok(())
}

fn check_sale_open(env: &Env, phase: &SalePhase, requested: SaleType) -> Result<(), Error> {
    if is_paused(env) {
        return Err(Error::SalePaused);
    }
    if requested == SaleType::Unset || phase.sale_type != requested {
        return Err(Error::SaleTypeMismatch);
    }
    let now = get_ledger_timestamp(env);
    if now < phase.start_time || now > phase.end_time {
        return Err(Error::SaleWindowClosed);
    }
    Ok(())
}

fn fund_due_for(
    env: &Env,
    config: &SaleConfig,
    kind: &PaymentKind,
    dollar_amount: u128,
) -> Result<u128, Error> {
    match kind {
        PaymentKind::Native => {
            let feed_price = oracle::latest_native_price(env, &config.oracle);
            if feed_price == 0 {
                return Err(Error::InvalidInputAmount);
            }
            Ok(pricing::native_fund_due(dollar_amount, feed_price))
        }
        PaymentKind::Stable(_) => Ok(pricing::stable_fund_due(
            dollar_amount,
            config.token_decimals,
        )),
    }
}

/// Single settlement path for both payment kinds. Either the full attached
/// native value or exactly `fund_due` of the stable token ends up at the
/// treasury; any failure reverts the whole call.
fn settle(
    env: &Env,
    config: &SaleConfig,
    buyer: &Address,
    kind: &PaymentKind,
    fund_due: u128,
    attached_value: u128,
) -> Result<(), Error> {
    match kind {
        PaymentKind::Native => {
            if attached_value < fund_due {
                return Err(Error::InsufficientNativeValue);
            }
            // The full attached value is forwarded; excess is not refunded.
            let client = token::Client::new(env, &config.native_token);
            client.transfer(buyer, &config.treasury, &(attached_value as i128));
        }
        PaymentKind::Stable(token_address) => {
            if !config.stable_payments_enabled || !is_supported_token(env, token_address) {
                return Err(Error::UnsupportedToken);
            }
            let client = token::Client::new(env, token_address);
            if client.balance(buyer) < fund_due as i128 {
                return Err(Error::InsufficientTokenBalance);
            }
            let engine = env.current_contract_address();
            if client.allowance(buyer, &engine) < fund_due as i128 {
                return Err(Error::InsufficientAllowance);
            }
            client.transfer_from(&engine, buyer, &config.treasury, &(fund_due as i128));
        }
    }
    Ok(())
}

fn referral_eligible(env: &Env, sale_type: SaleType) -> bool {
    for eligible in get_referral_types(env).iter() {
        if eligible == sale_type {
            return true;
        }
    }
    false
}

#[allow(clippy::too_many_arguments)]
fn record_purchase(
    env: &Env,
    buyer: &Address,
    sale_type: SaleType,
    package_amount: u128,
    token_allocation: u128,
    unit_price: u128,
    lock_months: u32,
    vesting_months: u32,
    referrer: Option<Address>,
) {
    let now = get_ledger_timestamp(env);
    let purchase = Purchase {
        package_amount,
        token_allocation,
        unit_price,
        timestamp: now,
        lock_months,
        vesting_months,
        label: sale_type.label(env),
    };
    push_purchase(env, buyer, &purchase);
    set_total_sold(env, get_total_sold(env) + token_allocation);
    set_total_raised(env, get_total_raised(env) + package_amount);

    env.events().publish(
        ("purchase",),
        (
            buyer.clone(),
            package_amount,
            token_allocation,
            now,
            lock_months,
            vesting_months,
        ),
    );

    if let Some(referrer) = referrer {
        if referrer != *buyer && referral_eligible(env, sale_type) {
            let amount = pricing::referral_commission(token_allocation);
            if amount > 0 {
                let commission = Commission {
                    amount,
                    timestamp: now,
                    label: String::from_str(env, "Referral"),
                };
                push_commission(env, &referrer, &commission);
                env.events()
                    .publish(("commission",), (referrer, buyer.clone(), amount));
            }
        }
    }
}

#[contractimpl]
impl TokenSaleContract {
    /// Initialize the sale engine.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        treasury: Address,
        oracle: Address,
        native_token: Address,
        stable_tokens: Vec<Address>,
        token_decimals: u32,
        stable_payments_enabled: bool,
        sale_type: SaleType,
        start_time: u64,
        end_time: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        if token_decimals == 0 {
            return Err(Error::InvalidInputAmount);
        }
        check_window(&env, start_time, end_time)?;

        let config = SaleConfig {
            treasury: treasury.clone(),
            oracle: oracle.clone(),
            native_token,
            token_decimals,
            stable_payments_enabled,
        };
        set_config(&env, &config);
        // Pricing for the initial phase comes from the package table
        // (Private) or a later configure_sale call.
        set_phase(
            &env,
            &SalePhase {
                sale_type,
                start_time,
                end_time,
                base_price: 0,
                daily_increment: 0,
                lock_months: 0,
                vesting_months: 0,
            },
        );
        set_owner(&env, &owner);
        set_paused(&env, false);
        set_total_sold(&env, 0);
        set_total_raised(&env, 0);
        for stable_token in stable_tokens.iter() {
            set_supported_token(&env, &stable_token, true);
        }

        env.events().publish(
            ("sale_initialized",),
            (treasury, oracle, sale_type, start_time, end_time),
        );
        Ok(())
    }

    /// Configure the flat-price (Private) phase window.
    pub fn config_private_sale(
        env: Env,
        caller: Address,
        sale_type: SaleType,
        start_time: u64,
        end_time: u64,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if sale_type != SaleType::Private {
            return Err(Error::SaleTypeMismatch);
        }
        check_window(&env, start_time, end_time)?;

        set_phase(
            &env,
            &SalePhase {
                sale_type,
                start_time,
                end_time,
                base_price: 0,
                daily_increment: 0,
                lock_months: 0,
                vesting_months: 0,
            },
        );

        env.events()
            .publish(("private_configured",), (start_time, end_time));
        Ok(())
    }

    /// Configure a time-increasing (PreSale/Public) phase. Replaces the
    /// phase descriptor wholesale.
    #[allow(clippy::too_many_arguments)]
    pub fn configure_sale(
        env: Env,
        caller: Address,
        sale_type: SaleType,
        base_price: u128,
        daily_increment: u128,
        start_time: u64,
        end_time: u64,
        lock_months: u32,
        vesting_months: u32,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if !sale_type.is_time_priced() {
            return Err(Error::SaleTypeMismatch);
        }
        if base_price == 0 {
            return Err(Error::InvalidInputAmount);
        }
        check_window(&env, start_time, end_time)?;

        set_phase(
            &env,
            &SalePhase {
                sale_type,
                start_time,
                end_time,
                base_price,
                daily_increment,
                lock_months,
                vesting_months,
            },
        );

        env.events().publish(
            ("sale_configured",),
            (sale_type, base_price, daily_increment, start_time, end_time),
        );
        Ok(())
    }

    /// Upsert flat pricing and vesting terms for one of the curated
    /// package amounts.
    pub fn add_package(
        env: Env,
        caller: Address,
        package_amount: u128,
        price_per_unit: u128,
        lock_months: u32,
        vesting_months: u32,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if !ALLOWED_PACKAGE_AMOUNTS.contains(&package_amount) {
            return Err(Error::InvalidPackageAmount);
        }
        if price_per_unit == 0 {
            return Err(Error::InvalidInputAmount);
        }

        set_package(
            &env,
            package_amount,
            &Package {
                price_per_unit,
                lock_months,
                vesting_months,
            },
        );

        env.events()
            .publish(("package_added",), (package_amount, price_per_unit));
        Ok(())
    }

    /// Extend the stable-token allow-list.
    pub fn add_supported_token(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_supported_token(&env, &token, true);
        env.events().publish(("token_added",), (token,));
        Ok(())
    }

    /// Set the phases whose purchases credit referral commissions.
    pub fn set_referral_sale_types(
        env: Env,
        caller: Address,
        types: Vec<SaleType>,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_referral_types(&env, &types);
        env.events().publish(("referral_set",), (types,));
        Ok(())
    }

    /// Flip the pause flag without touching the phase or window.
    pub fn toggle_sale(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let paused = !is_paused(&env);
        set_paused(&env, paused);
        env.events().publish(("sale_toggled",), (paused,));
        Ok(())
    }

    /// Clear the cumulative counters without altering the window.
    pub fn reset_sale(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_total_sold(&env, 0);
        set_total_raised(&env, 0);
        env.events().publish(("sale_reset",), ());
        Ok(())
    }

    /// Estimate (fund_due, token_allocation) for a flat-price package.
    pub fn estimate_private_fund(
        env: Env,
        package_amount: u128,
        kind: PaymentKind,
    ) -> Result<(u128, u128), Error> {
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let phase = get_phase(&env).ok_or(Error::NotInitialized)?;
        if phase.sale_type != SaleType::Private {
            return Err(Error::SaleTypeMismatch);
        }
        let package = get_package(&env, package_amount).ok_or(Error::InvalidPackageAmount)?;

        let token_allocation = pricing::flat_allocation(package_amount, package.price_per_unit);
        let fund_due = fund_due_for(&env, &config, &kind, package_amount)?;
        Ok((fund_due, token_allocation))
    }

    /// Estimate (fund_due, token_allocation) for a time-priced purchase.
    pub fn estimate_fund(
        env: Env,
        sale_type: SaleType,
        amount: u128,
        kind: PaymentKind,
    ) -> Result<(u128, u128), Error> {
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let phase = get_phase(&env).ok_or(Error::NotInitialized)?;
        if !sale_type.is_time_priced() || phase.sale_type != sale_type {
            return Err(Error::SaleTypeMismatch);
        }

        let now = get_ledger_timestamp(&env);
        let unit_price = pricing::current_unit_price(
            phase.base_price,
            phase.daily_increment,
            phase.start_time,
            now,
        );
        if unit_price == 0 {
            return Err(Error::InvalidInputAmount);
        }
        let token_allocation = pricing::time_priced_allocation(amount, unit_price);
        let fund_due = fund_due_for(&env, &config, &kind, amount)?;
        Ok((fund_due, token_allocation))
    }

    /// Buy a package with attached native value during the Private phase.
    pub fn pay_with_native_in_private(
        env: Env,
        buyer: Address,
        package_amount: u128,
        value: u128,
        referrer: Option<Address>,
    ) -> Result<(), Error> {
        buyer.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let phase = get_phase(&env).ok_or(Error::NotInitialized)?;
        check_sale_open(&env, &phase, SaleType::Private)?;
        let package = get_package(&env, package_amount).ok_or(Error::InvalidPackageAmount)?;

        let token_allocation = pricing::flat_allocation(package_amount, package.price_per_unit);
        let fund_due = fund_due_for(&env, &config, &PaymentKind::Native, package_amount)?;
        settle(
            &env,
            &config,
            &buyer,
            &PaymentKind::Native,
            fund_due,
            value,
        )?;

        record_purchase(
            &env,
            &buyer,
            phase.sale_type,
            package_amount,
            token_allocation,
            package.price_per_unit,
            package.lock_months,
            package.vesting_months,
            referrer,
        );
        Ok(())
    }

    /// Buy a package with an approved stable token during the Private phase.
    pub fn pay_with_token_in_private(
        env: Env,
        buyer: Address,
        token: Address,
        package_amount: u128,
        referrer: Option<Address>,
    ) -> Result<(), Error> {
        buyer.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let phase = get_phase(&env).ok_or(Error::NotInitialized)?;
        check_sale_open(&env, &phase, SaleType::Private)?;
        let package = get_package(&env, package_amount).ok_or(Error::InvalidPackageAmount)?;

        let kind = PaymentKind::Stable(token);
        let token_allocation = pricing::flat_allocation(package_amount, package.price_per_unit);
        let fund_due = fund_due_for(&env, &config, &kind, package_amount)?;
        settle(&env, &config, &buyer, &kind, fund_due, 0)?;

        record_purchase(
            &env,
            &buyer,
            phase.sale_type,
            package_amount,
            token_allocation,
            package.price_per_unit,
            package.lock_months,
            package.vesting_months,
            referrer,
        );
        Ok(())
    }

    /// Buy with attached native value during a time-priced phase.
    pub fn buy_with_native(
        env: Env,
        buyer: Address,
        sale_type: SaleType,
        amount: u128,
        value: u128,
        referrer: Option<Address>,
    ) -> Result<(), Error> {
        buyer.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let phase = get_phase(&env).ok_or(Error::NotInitialized)?;
        if !sale_type.is_time_priced() {
            return Err(Error::SaleTypeMismatch);
        }
        check_sale_open(&env, &phase, sale_type)?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let now = get_ledger_timestamp(&env);
        let unit_price = pricing::current_unit_price(
            phase.base_price,
            phase.daily_increment,
            phase.start_time,
            now,
        );
        if unit_price == 0 {
            return Err(Error::InvalidInputAmount);
        }
        let token_allocation = pricing::time_priced_allocation(amount, unit_price);
        let fund_due = fund_due_for(&env, &config, &PaymentKind::Native, amount)?;
        settle(
            &env,
            &config,
            &buyer,
            &PaymentKind::Native,
            fund_due,
            value,
        )?;

        record_purchase(
            &env,
            &buyer,
            phase.sale_type,
            amount,
            token_allocation,
            unit_price,
            phase.lock_months,
            phase.vesting_months,
            referrer,
        );
        Ok(())
    }

    /// Buy with an approved stable token during a time-priced phase.
    pub fn buy_with_token(
        env: Env,
        buyer: Address,
        token: Address,
        sale_type: SaleType,
        amount: u128,
        referrer: Option<Address>,
    ) -> Result<(), Error> {
        buyer.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let phase = get_phase(&env).ok_or(Error::NotInitialized)?;
        if !sale_type.is_time_priced() {
            return Err(Error::SaleTypeMismatch);
        }
        check_sale_open(&env, &phase, sale_type)?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let now = get_ledger_timestamp(&env);
        let unit_price = pricing::current_unit_price(
            phase.base_price,
            phase.daily_increment,
            phase.start_time,
            now,
        );
        if unit_price == 0 {
            return Err(Error::InvalidInputAmount);
        }
        let kind = PaymentKind::Stable(token);
        let token_allocation = pricing::time_priced_allocation(amount, unit_price);
        let fund_due = fund_due_for(&env, &config, &kind, amount)?;
        settle(&env, &config, &buyer, &kind, fund_due, 0)?;

        record_purchase(
            &env,
            &buyer,
            phase.sale_type,
            amount,
            token_allocation,
            unit_price,
            phase.lock_months,
            phase.vesting_months,
            referrer,
        );
        Ok(())
    }

    /// Backfill purchase records settled off-chain. Bypasses payment
    /// validation and funds movement; writes the same ledger shape.
    #[allow(clippy::too_many_arguments)]
    pub fn add_user_by_admin(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
        package_amounts: Vec<u128>,
        token_amounts: Vec<u128>,
        unit_prices: Vec<u128>,
        timestamps: Vec<u64>,
        lock_months: Vec<u32>,
        vesting_months: Vec<u32>,
        labels: Vec<String>,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;

        let count = addresses.len();
        if package_amounts.len() != count
            || token_amounts.len() != count
            || unit_prices.len() != count
            || timestamps.len() != count
            || lock_months.len() != count
            || vesting_months.len() != count
            || labels.len() != count
        {
            return Err(Error::ArrayLengthMismatch);
        }

        for i in 0..count {
            let purchase = Purchase {
                package_amount: package_amounts.get_unchecked(i),
                token_allocation: token_amounts.get_unchecked(i),
                unit_price: unit_prices.get_unchecked(i),
                timestamp: timestamps.get_unchecked(i),
                lock_months: lock_months.get_unchecked(i),
                vesting_months: vesting_months.get_unchecked(i),
                label: labels.get_unchecked(i),
            };
            push_purchase(&env, &addresses.get_unchecked(i), &purchase);
        }

        env.events().publish(("backfill",), (count,));
        Ok(())
    }

    // View functions
    pub fn current_sale_type(env: Env) -> Result<SaleType, Error> {
        Ok(get_phase(&env).ok_or(Error::NotInitialized)?.sale_type)
    }

    pub fn sale_start_time(env: Env) -> Result<u64, Error> {
        Ok(get_phase(&env).ok_or(Error::NotInitialized)?.start_time)
    }

    pub fn sale_end_time(env: Env) -> Result<u64, Error> {
        Ok(get_phase(&env).ok_or(Error::NotInitialized)?.end_time)
    }

    pub fn is_pause(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        get_owner(&env).ok_or(Error::NotInitialized)
    }

    pub fn treasury(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.treasury)
    }

    pub fn packages(env: Env, package_amount: u128) -> Option<Package> {
        get_package(&env, package_amount)
    }

    pub fn get_user_details(env: Env, user: Address) -> (Vec<Purchase>, Vec<Commission>) {
        (get_purchases(&env, &user), get_commissions(&env, &user))
    }

    pub fn total_sold(env: Env) -> u128 {
        get_total_sold(&env)
    }

    pub fn total_raised(env: Env) -> u128 {
        get_total_raised(&env)
    }

    pub fn supported_token(env: Env, token: Address) -> bool {
        is_supported_token(&env, &token)
    }

    pub fn referral_sale_types(env: Env) -> Vec<SaleType> {
        get_referral_types(&env)
    }
}
