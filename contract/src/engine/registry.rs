use crate::error::AuctionContractError;

use solana_program::pubkey::Pubkey;

use std::collections::BTreeMap;
use std::ops::Range;

/// Issues collection items to buyers.
///
/// Token ids are sequential and start at zero, so a successful mint returns
/// the contiguous range of ids it issued.
pub trait OwnershipRegistry {
    type Recipient: ?Sized;

    fn mint_to(
        &mut self,
        recipient: &Self::Recipient,
        quantity: u64,
    ) -> Result<Range<u64>, AuctionContractError>;

    fn total_supply(&self) -> Result<u64, AuctionContractError>;
}

/// In-memory collection that tracks the owner of every issued item.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    symbol: String,
    max_supply: u64,
    total_supply: u64,
    // first token id of a batch -> (batch end, owner)
    batches: BTreeMap<u64, (u64, Pubkey)>,
    balances: BTreeMap<Pubkey, u64>,
}

impl Collection {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, max_supply: u64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            max_supply,
            total_supply: 0,
            batches: BTreeMap::new(),
            balances: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    pub fn owner_of(&self, token_id: u64) -> Option<&Pubkey> {
        self.batches
            .range(..=token_id)
            .next_back()
            .filter(|(_, (end, _))| token_id < *end)
            .map(|(_, (_, owner))| owner)
    }
}

impl OwnershipRegistry for Collection {
    type Recipient = Pubkey;

    fn mint_to(
        &mut self,
        recipient: &Pubkey,
        quantity: u64,
    ) -> Result<Range<u64>, AuctionContractError> {
        let first = self.total_supply;
        let end = first
            .checked_add(quantity)
            .filter(|end| *end <= self.max_supply)
            .ok_or(AuctionContractError::MintFailed)?;

        if quantity > 0 {
            self.batches.insert(first, (end, *recipient));
            *self.balances.entry(*recipient).or_insert(0) += quantity;
        }
        self.total_supply = end;
        Ok(first..end)
    }

    fn total_supply(&self) -> Result<u64, AuctionContractError> {
        Ok(self.total_supply)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sequential_token_ids() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut collection = Collection::new("Reactive", "RCT", 10);
        assert_eq!(collection.name(), "Reactive");
        assert_eq!(collection.symbol(), "RCT");

        assert_eq!(collection.mint_to(&alice, 3), Ok(0..3));
        assert_eq!(collection.mint_to(&bob, 2), Ok(3..5));
        assert_eq!(collection.mint_to(&alice, 1), Ok(5..6));

        assert_eq!(collection.total_supply(), Ok(6));
        assert_eq!(collection.balance_of(&alice), 4);
        assert_eq!(collection.balance_of(&bob), 2);
        assert_eq!(collection.balance_of(&Pubkey::new_unique()), 0);

        assert_eq!(collection.owner_of(0), Some(&alice));
        assert_eq!(collection.owner_of(2), Some(&alice));
        assert_eq!(collection.owner_of(3), Some(&bob));
        assert_eq!(collection.owner_of(4), Some(&bob));
        assert_eq!(collection.owner_of(5), Some(&alice));
        assert_eq!(collection.owner_of(6), None);
    }

    #[test]
    fn refuses_to_exceed_max_supply() {
        let owner = Pubkey::new_unique();
        let mut collection = Collection::new("Reactive", "RCT", 4);
        assert_eq!(collection.mint_to(&owner, 4), Ok(0..4));
        assert_eq!(
            collection.mint_to(&owner, 1),
            Err(AuctionContractError::MintFailed)
        );
        assert_eq!(collection.total_supply(), Ok(4));
        assert_eq!(collection.balance_of(&owner), 4);
    }
}
