use crate::core::errors::{ServiceError, ServiceResult};
use crate::core::ids::IdGenerator;
use crate::domain::{
    catalog::is_notes_category,
    keys::{budget_key, category_key_prefix},
    AppState, Category, MonthlyBudget, NamedEntity, RawAmount, SubCategory,
};

const CATEGORY_ID_PREFIX: &str = "cat";
const SUB_CATEGORY_ID_PREFIX: &str = "sub";

/// Edits the category tree of the selected month.
pub struct CategoryService;

impl CategoryService {
    /// Appends an empty category and returns the new state with the generated id.
    pub fn add_category(
        state: &AppState,
        name: &str,
        ids: &dyn IdGenerator,
    ) -> ServiceResult<(AppState, String)> {
        let name = Self::validate_name(name)?;
        let mut next = state.clone();
        let month = Self::selected_month_mut(&mut next)?;
        let id = Self::unique_id(ids, CATEGORY_ID_PREFIX, |candidate| {
            month.category(candidate).is_some()
        });
        month.categories.push(Category::new(id.clone(), name));
        Ok((next, id))
    }

    /// Removes the category and every spend entry and note tied to it.
    pub fn remove_category(state: &AppState, category_id: &str) -> ServiceResult<AppState> {
        let mut next = state.clone();
        let month = Self::selected_month_mut(&mut next)?;
        let before = month.categories.len();
        month.categories.retain(|category| category.id != category_id);
        if month.categories.len() == before {
            return Err(ServiceError::CategoryNotFound(category_id.to_string()));
        }

        let prefix = category_key_prefix(category_id);
        next.expense_spent.retain(|key, _| !key.starts_with(&prefix));
        next.expense_other_spent
            .retain(|key, _| !key.starts_with(&prefix));
        if is_notes_category(category_id) {
            next.expense_notes
                .insert(category_id.to_string(), String::new());
        } else {
            next.expense_notes.remove(category_id);
        }
        Ok(next)
    }

    pub fn rename_category(
        state: &AppState,
        category_id: &str,
        name: &str,
    ) -> ServiceResult<AppState> {
        let name = Self::validate_name(name)?;
        let mut next = state.clone();
        Self::category_mut(&mut next, category_id)?.name = name;
        Ok(next)
    }

    /// Appends a zero-amount line unless a sibling already has the name (case-insensitive).
    pub fn add_sub_category(
        state: &AppState,
        category_id: &str,
        name: &str,
        ids: &dyn IdGenerator,
    ) -> ServiceResult<(AppState, String)> {
        let name = Self::validate_name(name)?;
        let mut next = state.clone();
        let category = Self::category_mut(&mut next, category_id)?;
        if category.has_sub_category_named(&name) {
            return Err(ServiceError::DuplicateName(name));
        }
        let id = Self::unique_id(ids, SUB_CATEGORY_ID_PREFIX, |candidate| {
            category.sub_category(candidate).is_some()
        });
        category
            .sub_categories
            .push(SubCategory::new(id.clone(), name));
        Ok((next, id))
    }

    /// Removes a line and its spend entries; the last line of a category is kept.
    pub fn remove_sub_category(
        state: &AppState,
        category_id: &str,
        sub_category_id: &str,
    ) -> ServiceResult<AppState> {
        let mut next = state.clone();
        let category = Self::category_mut(&mut next, category_id)?;
        if category.sub_category(sub_category_id).is_none() {
            return Err(ServiceError::SubCategoryNotFound(
                sub_category_id.to_string(),
            ));
        }
        if category.sub_categories.len() <= 1 {
            return Err(ServiceError::LastSubCategory(category_id.to_string()));
        }
        category
            .sub_categories
            .retain(|sub| sub.id != sub_category_id);

        let key = budget_key(category_id, sub_category_id);
        next.expense_spent.remove(&key);
        next.expense_other_spent.remove(&key);
        Ok(next)
    }

    /// Renames a line; the new name must stay unique among its siblings.
    pub fn rename_sub_category(
        state: &AppState,
        category_id: &str,
        sub_category_id: &str,
        name: &str,
    ) -> ServiceResult<AppState> {
        let name = Self::validate_name(name)?;
        let mut next = state.clone();
        let category = Self::category_mut(&mut next, category_id)?;
        let clash = category
            .sub_categories
            .iter()
            .any(|sub| sub.id != sub_category_id && sub.has_name(&name));
        if clash {
            return Err(ServiceError::DuplicateName(name));
        }
        let sub = category
            .sub_category_mut(sub_category_id)
            .ok_or_else(|| ServiceError::SubCategoryNotFound(sub_category_id.to_string()))?;
        sub.name = name;
        Ok(next)
    }

    /// Stores `max(0, value)` rounded to cents; non-numeric input stores 0.
    pub fn set_sub_category_budget<'a>(
        state: &AppState,
        category_id: &str,
        sub_category_id: &str,
        value: impl Into<RawAmount<'a>>,
    ) -> ServiceResult<AppState> {
        let mut next = state.clone();
        let sub = Self::category_mut(&mut next, category_id)?
            .sub_category_mut(sub_category_id)
            .ok_or_else(|| ServiceError::SubCategoryNotFound(sub_category_id.to_string()))?;
        sub.amount = value.into().to_cents();
        Ok(next)
    }

    fn validate_name(candidate: &str) -> ServiceResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            Err(ServiceError::EmptyName)
        } else {
            Ok(trimmed.to_string())
        }
    }

    fn selected_month_mut(state: &mut AppState) -> ServiceResult<&mut MonthlyBudget> {
        state
            .selected_budget_mut()
            .ok_or(ServiceError::NoSelectedMonth)
    }

    fn category_mut<'s>(
        state: &'s mut AppState,
        category_id: &str,
    ) -> ServiceResult<&'s mut Category> {
        Self::selected_month_mut(state)?
            .category_mut(category_id)
            .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))
    }

    fn unique_id(ids: &dyn IdGenerator, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = ids.next_id(prefix);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}
