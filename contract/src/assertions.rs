use solana_program::account_info::AccountInfo;
use solana_program::program_error::ProgramError;
use solana_program::program_pack::Pack;
use solana_program::pubkey::Pubkey;
use solana_program::system_program::ID as SYS_ID;
use solana_program::sysvar::rent::ID as RENT_ID;

use spl_token::state::Account;
use spl_token::ID as TOKEN_ID;

use crate::AuctionContractError;

// ************************ Accounts assertions ************************ //

pub fn assert_token_program(account_pubkey: &Pubkey) -> Result<(), ProgramError> {
    if *account_pubkey != TOKEN_ID {
        return Err(AuctionContractError::InvalidProgramAddress.into());
    }
    Ok(())
}

pub fn assert_system_program(account_pubkey: &Pubkey) -> Result<(), ProgramError> {
    if *account_pubkey != SYS_ID {
        return Err(AuctionContractError::InvalidProgramAddress.into());
    }
    Ok(())
}

pub fn assert_rent_program(account_pubkey: &Pubkey) -> Result<(), ProgramError> {
    if *account_pubkey != RENT_ID {
        return Err(AuctionContractError::InvalidProgramAddress.into());
    }
    Ok(())
}

pub fn assert_token_account_owner<'a>(
    token_account_info: &AccountInfo<'a>,
    expected_owner: &Pubkey,
) -> Result<(), ProgramError> {
    let token_account = Account::unpack_from_slice(&token_account_info.data.borrow())?;

    if token_account.owner != *expected_owner {
        return Err(AuctionContractError::InvalidAccountOwner.into());
    }

    Ok(())
}

// ************************ Arithmetic checks ************************ //

pub fn checked_credit_account(
    account: &AccountInfo,
    amount: u64,
) -> Result<(), AuctionContractError> {
    let account_current_lamports = **account.lamports.borrow();
    if let Some(lamports) = account_current_lamports.checked_add(amount) {
        **account.lamports.borrow_mut() = lamports;
        Ok(())
    } else {
        Err(AuctionContractError::ArithmeticError)
    }
}

pub fn checked_debit_account(
    account: &AccountInfo,
    amount: u64,
) -> Result<(), AuctionContractError> {
    let account_current_lamports = **account.lamports.borrow();
    if let Some(lamports) = account_current_lamports.checked_sub(amount) {
        **account.lamports.borrow_mut() = lamports;
        Ok(())
    } else {
        Err(AuctionContractError::ArithmeticError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lamport_accounting() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 100;
        let mut data: Vec<u8> = vec![];
        let account = AccountInfo::new(
            &key,
            false,
            true,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );

        checked_credit_account(&account, 50).unwrap();
        assert_eq!(account.lamports(), 150);
        checked_debit_account(&account, 150).unwrap();
        assert_eq!(account.lamports(), 0);
        assert_eq!(
            checked_debit_account(&account, 1),
            Err(AuctionContractError::ArithmeticError)
        );
        checked_credit_account(&account, u64::MAX).unwrap();
        assert_eq!(
            checked_credit_account(&account, 1),
            Err(AuctionContractError::ArithmeticError)
        );
    }
}
