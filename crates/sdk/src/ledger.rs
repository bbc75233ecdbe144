use std::collections::BTreeMap;

use arena_model::Address;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// The value ledger rewards are held and paid in.
///
/// `transfer` always moves value out of the custody account the ledger
/// handle acts for.
pub trait ValueLedger {
    /// Ledger failure.
    type Error: std::fmt::Display;

    /// Balance of `holder`.
    fn balance_of(&self, holder: &Address) -> u128;

    /// Move `amount` from `from` to `to`.
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u128)
        -> Result<(), Self::Error>;

    /// Move `amount` from custody to `to`.
    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), Self::Error>;
}

/// Error of [`MemoryLedger`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Sender balance too low.
    #[error("insufficient balance of {holder}: required {required}, available {available}")]
    InsufficientBalance {
        /// Sender.
        holder: Address,
        /// Amount requested.
        required: u128,
        /// Sender balance.
        available: u128,
    },
    /// Receiver balance would overflow.
    #[error("balance overflow")]
    Overflow,
}

/// In-memory [`ValueLedger`] acting for a single custody account.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLedger {
    custody: Address,
    #[serde_as(as = "BTreeMap<_, PickFirst<(DisplayFromStr, _)>>")]
    balances: BTreeMap<Address, u128>,
}

impl MemoryLedger {
    /// Create an empty ledger acting for `custody`.
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: BTreeMap::new(),
        }
    }

    /// The custody account.
    pub fn custody(&self) -> &Address {
        &self.custody
    }

    /// Credit `holder` out of thin air.
    pub fn mint(&mut self, holder: &Address, amount: u128) -> Result<(), LedgerError> {
        let balance = self.balances.entry(*holder).or_default();
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn move_value(&mut self, from: &Address, to: &Address, amount: u128) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                holder: *from,
                required: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(*from, remaining);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

impl ValueLedger for MemoryLedger {
    type Error = LedgerError;

    fn balance_of(&self, holder: &Address) -> u128 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), Self::Error> {
        self.move_value(from, to, amount)
    }

    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), Self::Error> {
        let custody = self.custody;
        self.move_value(&custody, to, amount)
    }
}
