use crate::core::errors::{ServiceError, ServiceResult};
use crate::domain::{AppState, RawAmount};

/// Records actual spending, notes and the shared-expense partner.
pub struct ExpenseService;

/// Which spend map an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spender {
    Me,
    Other,
}

impl ExpenseService {
    /// Upserts the user's spend for `key`, rounded to cents and clamped at zero.
    pub fn set_expense_spent<'a>(
        state: &AppState,
        key: &str,
        value: impl Into<RawAmount<'a>>,
    ) -> ServiceResult<AppState> {
        Self::set_spent(state, Spender::Me, key, value.into())
    }

    /// Upserts the partner's spend for `key`.
    pub fn set_expense_other_spent<'a>(
        state: &AppState,
        key: &str,
        value: impl Into<RawAmount<'a>>,
    ) -> ServiceResult<AppState> {
        Self::set_spent(state, Spender::Other, key, value.into())
    }

    /// Notes are stored for any id but only allow-listed ones are ever shown.
    pub fn set_expense_note(
        state: &AppState,
        category_id: &str,
        text: &str,
    ) -> ServiceResult<AppState> {
        let mut next = state.clone();
        next.expense_notes
            .insert(category_id.to_string(), text.to_string());
        Ok(next)
    }

    pub fn set_other_person_name(state: &AppState, text: &str) -> ServiceResult<AppState> {
        let mut next = state.clone();
        next.other_person_name = text.to_string();
        Ok(next)
    }

    fn set_spent(
        state: &AppState,
        spender: Spender,
        key: &str,
        value: RawAmount<'_>,
    ) -> ServiceResult<AppState> {
        if !state.valid_keys().contains(key) {
            return Err(ServiceError::UnknownBudgetKey(key.to_string()));
        }
        let mut next = state.clone();
        let map = match spender {
            Spender::Me => &mut next.expense_spent,
            Spender::Other => &mut next.expense_other_spent,
        };
        map.insert(key.to_string(), value.to_cents());
        Ok(next)
    }
}
