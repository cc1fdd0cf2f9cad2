#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address, Env,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOwner = 3,
    InvalidPrice = 4,
}

/// Price in dollars per whole native unit, scaled by 1e8, plus the
/// ledger timestamp at which it was last set.
#[derive(Clone)]
#[contracttype]
pub struct PriceData {
    pub price: i128,
    pub updated_at: u64,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,
    Price,
}

contractmeta!(key = "Description", val = "Owner-settable native price feed");

#[contract]
pub struct PriceFeedContract;

#[contractimpl]
impl PriceFeedContract {
    pub fn initialize(env: Env, owner: Address, price: i128) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        env.storage().instance().set(&DataKey::Owner, &owner);
        let data = PriceData {
            price,
            updated_at: env.ledger().timestamp(),
        };
        env.storage().instance().set(&DataKey::Price, &data);

        env.events().publish(("feed_initialized",), (owner, price));
        Ok(())
    }

    pub fn set_price(env: Env, caller: Address, price: i128) -> Result<(), Error> {
        caller.require_auth();
        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        if caller != owner {
            return Err(Error::NotOwner);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        let data = PriceData {
            price,
            updated_at: env.ledger().timestamp(),
        };
        env.storage().instance().set(&DataKey::Price, &data);

        env.events()
            .publish((symbol_short!("price_set"),), (price, data.updated_at));
        Ok(())
    }

    /// Provider-interface read: (price, updated_at).
    pub fn latest(env: Env) -> Result<(i128, u64), Error> {
        let data: PriceData = env
            .storage()
            .instance()
            .get(&DataKey::Price)
            .ok_or(Error::NotInitialized)?;
        Ok((data.price, data.updated_at))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::{Address, Env};

    #[test]
    fn test_set_and_read_price() {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|l| l.timestamp = 1_700_000_000);

        let cid = env.register_contract(None, PriceFeedContract);
        let client = PriceFeedContractClient::new(&env, &cid);

        let owner = Address::generate(&env);
        client.initialize(&owner, &200_000_000i128); // $2.00

        let (price, ts) = client.latest();
        assert_eq!(price, 200_000_000);
        assert_eq!(ts, 1_700_000_000);

        env.ledger().with_mut(|l| l.timestamp = 1_700_000_600);
        client.set_price(&owner, &250_000_000i128);
        let (price, ts) = client.latest();
        assert_eq!(price, 250_000_000);
        assert_eq!(ts, 1_700_000_600);
    }

    #[test]
    fn test_rejects_non_owner_and_bad_price() {
        let env = Env::default();
        env.mock_all_auths();

        let cid = env.register_contract(None, PriceFeedContract);
        let client = PriceFeedContractClient::new(&env, &cid);

        let owner = Address::generate(&env);
        let stranger = Address::generate(&env);

        assert_eq!(
            client.try_initialize(&owner, &0i128),
            Err(Ok(Error::InvalidPrice))
        );
        client.initialize(&owner, &100_000_000i128);
        assert_eq!(
            client.try_initialize(&owner, &100_000_000i128),
            Err(Ok(Error::AlreadyInitialized))
        );
        assert_eq!(
            client.try_set_price(&stranger, &300_000_000i128),
            Err(Ok(Error::NotOwner))
        );
        assert_eq!(
            client.try_set_price(&owner, &-5i128),
            Err(Ok(Error::InvalidPrice))
        );
    }
}
