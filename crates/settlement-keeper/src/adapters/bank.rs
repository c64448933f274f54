//! In-memory ledger used by tests and by hosts without a bank module.

use crate::domain::errors::BankError;
use crate::ports::outbound::BankKeeper;
use primitive_types::U256;
use shared_types::Address;
use std::collections::BTreeMap;

type Balances = BTreeMap<String, U256>;

/// Module and account balances keyed by name, then denomination.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBank {
    modules: BTreeMap<String, Balances>,
    accounts: BTreeMap<Address, Balances>,
    supply: Balances,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank with the given modules registered and empty.
    pub fn with_modules<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut bank = Self::new();
        for name in names {
            bank.modules.insert(name.to_string(), Balances::new());
        }
        bank
    }

    /// Overwrite a module balance without touching supply.
    pub fn set_module_balance(&mut self, module: &str, denom: &str, amount: U256) {
        let balances = self.modules.entry(module.to_string()).or_default();
        if amount.is_zero() {
            balances.remove(denom);
        } else {
            balances.insert(denom.to_string(), amount);
        }
    }

    pub fn account_balance(&self, account: &Address, denom: &str) -> U256 {
        self.accounts
            .get(account)
            .and_then(|b| b.get(denom))
            .copied()
            .unwrap_or_default()
    }

    fn module_mut(&mut self, module: &str) -> Result<&mut Balances, BankError> {
        self.modules
            .get_mut(module)
            .ok_or_else(|| BankError::UnknownModule(module.to_string()))
    }
}

fn debit(balances: &mut Balances, holder: &str, denom: &str, amount: U256) -> Result<(), BankError> {
    let available = balances.get(denom).copied().unwrap_or_default();
    if available < amount {
        return Err(BankError::InsufficientFunds {
            holder: holder.to_string(),
            denom: denom.to_string(),
            available,
            required: amount,
        });
    }
    let remaining = available - amount;
    if remaining.is_zero() {
        balances.remove(denom);
    } else {
        balances.insert(denom.to_string(), remaining);
    }
    Ok(())
}

fn credit(balances: &mut Balances, denom: &str, amount: U256) {
    if amount.is_zero() {
        return;
    }
    let entry = balances.entry(denom.to_string()).or_default();
    *entry = entry.saturating_add(amount);
}

impl BankKeeper for InMemoryBank {
    fn module_balance(&self, module: &str, denom: &str) -> U256 {
        self.modules
            .get(module)
            .and_then(|b| b.get(denom))
            .copied()
            .unwrap_or_default()
    }

    fn module_balances(&self, module: &str) -> BTreeMap<String, U256> {
        self.modules.get(module).cloned().unwrap_or_default()
    }

    fn supply(&self, denom: &str) -> U256 {
        self.supply.get(denom).copied().unwrap_or_default()
    }

    fn send_module_to_module(
        &mut self,
        from: &str,
        to: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError> {
        self.module_mut(to)?;
        debit(self.module_mut(from)?, from, denom, amount)?;
        credit(self.module_mut(to)?, denom, amount);
        Ok(())
    }

    fn send_module_to_account(
        &mut self,
        from: &str,
        to: &Address,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError> {
        debit(self.module_mut(from)?, from, denom, amount)?;
        credit(self.accounts.entry(to.clone()).or_default(), denom, amount);
        Ok(())
    }

    fn send_account_to_module(
        &mut self,
        from: &Address,
        to: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError> {
        self.module_mut(to)?;
        let account = self.accounts.entry(from.clone()).or_default();
        debit(account, from.as_str(), denom, amount)?;
        credit(self.module_mut(to)?, denom, amount);
        Ok(())
    }

    fn mint_to_module(&mut self, module: &str, denom: &str, amount: U256) -> Result<(), BankError> {
        credit(self.module_mut(module)?, denom, amount);
        credit(&mut self.supply, denom, amount);
        Ok(())
    }

    fn burn_from_module(
        &mut self,
        module: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError> {
        debit(self.module_mut(module)?, module, denom, amount)?;
        let supply = self.supply.entry(denom.to_string()).or_default();
        *supply = supply.saturating_sub(amount);
        Ok(())
    }
}
