//! Built-in default taxonomy used to initialize new data and new budget months.

use once_cell::sync::Lazy;

use super::{
    category::{Category, SubCategory},
    keys::budget_key,
};

/// Category ids that carry a free-text notes field.
pub const EXPENSE_NOTES_CATEGORY_IDS: [&str; 4] = [
    "subscriptions",
    "going-out",
    "personal-expenses",
    "common-shopping",
];

/// Category ids retired from the catalog; filtered out of seeds and stored data alike.
pub const RETIRED_CATEGORY_IDS: [&str; 1] = ["phone-bill"];

/// Shape of one seed entry.
#[derive(Debug, Clone, Copy)]
pub enum SeedLines {
    /// A category budgeted as a single line.
    Single,
    Items(&'static [(&'static str, &'static str)]),
    Groups(&'static [SeedGroup]),
}

#[derive(Debug, Clone, Copy)]
pub struct SeedGroup {
    pub id: &'static str,
    pub name: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy)]
pub struct SeedCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub lines: SeedLines,
}

pub const SEED_CATALOG: &[SeedCategory] = &[
    SeedCategory {
        id: "house",
        name: "House",
        lines: SeedLines::Items(&[
            ("rent", "Rent"),
            ("electricity", "Electricity"),
            ("gas", "Gas"),
            ("water", "Water"),
            ("insurance", "Insurance"),
        ]),
    },
    SeedCategory {
        id: "car",
        name: "Car",
        lines: SeedLines::Items(&[
            ("loan", "Loan"),
            ("insurance", "Insurance"),
            ("fuel", "Fuel"),
            ("maintenance", "Maintenance"),
        ]),
    },
    SeedCategory {
        id: "subscriptions",
        name: "Subscriptions",
        lines: SeedLines::Single,
    },
    SeedCategory {
        id: "groceries",
        name: "Groceries and essentials",
        lines: SeedLines::Single,
    },
    SeedCategory {
        id: "internet",
        name: "Internet",
        lines: SeedLines::Single,
    },
    SeedCategory {
        id: "going-out",
        name: "Going out",
        lines: SeedLines::Single,
    },
    SeedCategory {
        id: "personal-expenses",
        name: "Personal expenses",
        lines: SeedLines::Single,
    },
    SeedCategory {
        id: "common-shopping",
        name: "Common shopping",
        lines: SeedLines::Single,
    },
    SeedCategory {
        id: "travelling",
        name: "Travelling",
        lines: SeedLines::Groups(&[
            SeedGroup {
                id: "travel-transport",
                name: "Travel (flight, car, hotel, parking, gas, cab, visa)",
                items: &[
                    ("flight", "Flight"),
                    ("car", "Car"),
                    ("hotel", "Hotel"),
                    ("parking", "Parking"),
                    ("gas", "Gas"),
                    ("cab", "Cab"),
                    ("visa", "Visa"),
                ],
            },
            SeedGroup {
                id: "travel-shopping-eating",
                name: "Travel (shopping and eating out)",
                items: &[("shopping", "Shopping"), ("eating-out", "Eating out")],
            },
        ]),
    },
    SeedCategory {
        id: "miscellaneous",
        name: "Miscellaneous",
        lines: SeedLines::Single,
    },
];

static SEED_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    SEED_CATALOG
        .iter()
        .filter(|seed| !is_retired_category(seed.id))
        .map(SeedCategory::to_category)
        .collect()
});

impl SeedCategory {
    /// Flattens the seed entry into the nested category shape with zero amounts.
    pub fn to_category(&self) -> Category {
        let sub_categories = match self.lines {
            SeedLines::Single => vec![SubCategory::new(self.id, self.name)],
            SeedLines::Items(items) => items
                .iter()
                .map(|(id, name)| SubCategory::new(*id, *name))
                .collect(),
            SeedLines::Groups(groups) => groups
                .iter()
                .flat_map(|group| {
                    group.items.iter().map(move |(id, name)| {
                        SubCategory::new(budget_key(group.id, id), *name)
                    })
                })
                .collect(),
        };
        Category::new(self.id, self.name).with_sub_categories(sub_categories)
    }

    /// Pairs each flat-era storage key with the nested sub-category id it became.
    ///
    /// Single-line categories were keyed by the bare category id.
    pub fn legacy_keys(&self) -> Vec<(String, String)> {
        match self.lines {
            SeedLines::Single => vec![(self.id.to_string(), self.id.to_string())],
            SeedLines::Items(items) => items
                .iter()
                .map(|(id, _)| (budget_key(self.id, id), id.to_string()))
                .collect(),
            SeedLines::Groups(groups) => groups
                .iter()
                .flat_map(|group| {
                    group.items.iter().map(move |(id, _)| {
                        let sub_id = budget_key(group.id, id);
                        (budget_key(self.id, &sub_id), sub_id)
                    })
                })
                .collect(),
        }
    }
}

/// Fresh deep copy of the seed categories, retired ids excluded.
pub fn initial_categories() -> Vec<Category> {
    SEED_CATEGORIES.clone()
}

pub fn is_retired_category(id: &str) -> bool {
    RETIRED_CATEGORY_IDS.contains(&id)
}

pub fn is_notes_category(id: &str) -> bool {
    EXPENSE_NOTES_CATEGORY_IDS.contains(&id)
}
