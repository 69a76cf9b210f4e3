//! Core data structures for the finance tracker
//!
//! `AppData` is the single document persisted for the whole application.
//! Anything read from storage or an import file goes through [`normalize`]
//! first, so the typed structs below are always well-formed.

use crate::core::traits::Entity;
use crate::utils::id::generate_id;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Root document: settings, budget, savings goals and debt accounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppData {
    pub settings: Settings,
    pub budget: Budget,
    pub savings: Vec<SavingsGoal>,
    pub debt: Vec<DebtAccount>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub currency: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub monthly_income: f64,
    pub categories: Vec<Category>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A budget line. `spent > planned` is a legal, displayable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub planned: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub balance: f64,
    /// Annual rate in percent, e.g. `19.99`
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub min_payment: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ========== Inputs for add operations ==========

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub planned: f64,
    pub spent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub balance: f64,
    pub interest_rate: f64,
    pub min_payment: f64,
}

// ========== Partial updates ==========

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub monthly_income: Option<f64>,
    pub categories: Option<Vec<Category>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub planned: Option<f64>,
    pub spent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsGoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    /// `Some(None)` clears the date
    pub target_date: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtPatch {
    pub name: Option<String>,
    pub balance: Option<f64>,
    pub interest_rate: Option<f64>,
    pub min_payment: Option<f64>,
}

/// Aggregates shown on the overview page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub monthly_income: f64,
    pub total_planned: f64,
    pub total_spent: f64,
    pub total_savings: f64,
    pub total_savings_target: f64,
    pub total_debt: f64,
    pub debt_accounts: usize,
    pub net_from_budget: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Currency code for display, falling back when the stored one is blank
    pub fn currency_code(&self) -> &str {
        if self.currency.trim().is_empty() {
            DEFAULT_CURRENCY
        } else {
            &self.currency
        }
    }

    pub fn apply_patch(&mut self, patch: SettingsPatch) {
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            categories: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Budget {
    pub fn apply_patch(&mut self, patch: BudgetPatch) {
        if let Some(income) = patch.monthly_income {
            self.monthly_income = income;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
    }

    pub fn total_planned(&self) -> f64 {
        self.categories.iter().map(|c| c.planned).sum()
    }

    pub fn total_spent(&self) -> f64 {
        self.categories.iter().map(|c| c.spent).sum()
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            budget: Budget::default(),
            savings: Vec::new(),
            debt: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl AppData {
    pub fn summary(&self) -> Summary {
        let total_spent = self.budget.total_spent();
        Summary {
            monthly_income: self.budget.monthly_income,
            total_planned: self.budget.total_planned(),
            total_spent,
            total_savings: self.savings.iter().map(|g| g.current_amount).sum(),
            total_savings_target: self.savings.iter().map(|g| g.target_amount).sum(),
            total_debt: self.debt.iter().map(|d| d.balance).sum(),
            debt_accounts: self.debt.len(),
            net_from_budget: self.budget.monthly_income - total_spent,
        }
    }
}

impl Summary {
    /// Share of planned spending already spent, `None` with nothing planned
    pub fn spent_ratio(&self) -> Option<f64> {
        (self.total_planned > 0.0).then(|| self.total_spent / self.total_planned)
    }
}

impl<'de> Deserialize<'de> for AppData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

impl Category {
    pub fn new(fields: NewCategory) -> Self {
        Self {
            id: generate_id(),
            name: fields.name,
            planned: fields.planned,
            spent: fields.spent,
            extra: Map::new(),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.planned - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.planned
    }
}

impl SavingsGoal {
    pub fn new(fields: NewSavingsGoal) -> Self {
        Self {
            id: generate_id(),
            name: fields.name,
            target_amount: fields.target_amount,
            current_amount: fields.current_amount,
            target_date: fields.target_date,
            extra: Map::new(),
        }
    }

    /// Fraction of the target reached, clamped to `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount).clamp(0.0, 1.0)
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

impl DebtAccount {
    pub fn new(fields: NewDebt) -> Self {
        Self {
            id: generate_id(),
            name: fields.name,
            balance: fields.balance,
            interest_rate: fields.interest_rate,
            min_payment: fields.min_payment,
            extra: Map::new(),
        }
    }
}

impl Entity for Category {
    type Patch = CategoryPatch;
    const KIND: &'static str = "category";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(planned) = patch.planned {
            self.planned = planned;
        }
        if let Some(spent) = patch.spent {
            self.spent = spent;
        }
    }
}

impl Entity for SavingsGoal {
    type Patch = SavingsGoalPatch;
    const KIND: &'static str = "savings goal";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: SavingsGoalPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(target) = patch.target_amount {
            self.target_amount = target;
        }
        if let Some(current) = patch.current_amount {
            self.current_amount = current;
        }
        if let Some(date) = patch.target_date {
            self.target_date = date;
        }
    }
}

impl Entity for DebtAccount {
    type Patch = DebtPatch;
    const KIND: &'static str = "debt account";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: DebtPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
        if let Some(rate) = patch.interest_rate {
            self.interest_rate = rate;
        }
        if let Some(min) = patch.min_payment {
            self.min_payment = min;
        }
    }
}

// ========== Normalization ==========

/// Repair an arbitrary JSON value into a well-formed `AppData`.
///
/// Non-object input yields the defaults. Sub-objects are merged over their
/// defaults, lists that are not arrays become empty, and unknown keys are
/// carried through at every level. Each list element is repaired on its own:
/// a missing id is generated, and an element that cannot be read as its
/// entity type is dropped without affecting its siblings.
pub fn normalize(raw: &Value) -> AppData {
    let Some(root) = raw.as_object() else {
        return AppData::default();
    };

    let mut extra = root.clone();
    let settings = normalize_settings(extra.remove("settings"));
    let budget = normalize_budget(extra.remove("budget"));
    let savings = repair_list(extra.remove("savings"));
    let debt = repair_list(extra.remove("debt"));

    AppData {
        settings,
        budget,
        savings,
        debt,
        extra,
    }
}

fn normalize_settings(raw: Option<Value>) -> Settings {
    let Some(Value::Object(mut extra)) = raw else {
        return Settings::default();
    };

    let currency = match extra.remove("currency") {
        Some(Value::String(code)) => code,
        _ => DEFAULT_CURRENCY.to_string(),
    };

    Settings { currency, extra }
}

fn normalize_budget(raw: Option<Value>) -> Budget {
    let mut extra = match raw {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let monthly_income = extra
        .remove("monthlyIncome")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let categories = repair_list(extra.remove("categories"));

    Budget {
        monthly_income,
        categories,
        extra,
    }
}

fn repair_list<T: Entity>(raw: Option<Value>) -> Vec<T> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(mut entity) => {
                if entity.id().is_empty() {
                    entity.set_id(generate_id());
                }
                Some(entity)
            }
            Err(e) => {
                log::warn!("Dropping malformed {} entry: {}", T::KIND, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roundtrip(data: &AppData) -> AppData {
        let value = serde_json::to_value(data).expect("serialize");
        normalize(&value)
    }

    #[test]
    fn test_non_object_input_yields_defaults() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2]), json!(true)] {
            assert_eq!(normalize(&raw), AppData::default());
        }
    }

    #[test]
    fn test_defaults_shape() {
        let value = serde_json::to_value(AppData::default()).expect("serialize");
        assert_eq!(
            value,
            json!({
                "settings": { "currency": "USD" },
                "budget": { "monthlyIncome": 0.0, "categories": [] },
                "savings": [],
                "debt": []
            })
        );
    }

    #[test]
    fn test_missing_arrays_are_replaced() {
        let data = normalize(&json!({
            "budget": { "monthlyIncome": 1200, "categories": "oops" },
            "savings": { "not": "an array" },
            "debt": null
        }));

        assert_eq!(data.budget.monthly_income, 1200.0);
        assert!(data.budget.categories.is_empty());
        assert!(data.savings.is_empty());
        assert!(data.debt.is_empty());
        assert_eq!(data.settings.currency, "USD");
    }

    #[test]
    fn test_partial_settings_merge_with_defaults() {
        let data = normalize(&json!({ "settings": { "theme": "dark" } }));
        assert_eq!(data.settings.currency, "USD");
        assert_eq!(data.settings.extra.get("theme"), Some(&json!("dark")));

        let data = normalize(&json!({ "settings": "EUR" }));
        assert_eq!(data.settings, Settings::default());

        let data = normalize(&json!({ "settings": { "currency": 5 } }));
        assert_eq!(data.settings.currency, "USD");
    }

    #[test]
    fn test_raw_values_win_over_defaults() {
        let data = normalize(&json!({
            "settings": { "currency": "PHP" },
            "budget": { "monthlyIncome": 5000, "categories": [] },
            "savings": [],
            "debt": []
        }));
        assert_eq!(data.settings.currency, "PHP");
        assert_eq!(data.budget.monthly_income, 5000.0);
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let raw = json!({
            "version": 3,
            "settings": { "currency": "EUR", "locale": "de-DE" },
            "budget": {
                "monthlyIncome": 10,
                "categories": [{ "id": "c1", "name": "Food", "planned": 5, "spent": 1, "color": "red" }],
                "period": "monthly"
            },
            "savings": [],
            "debt": [{ "id": "d1", "name": "Card", "balance": 100, "interestRate": 20, "minPayment": 10, "lender": "Bank" }]
        });

        let data = normalize(&raw);
        assert_eq!(data.extra.get("version"), Some(&json!(3)));
        assert_eq!(data.budget.extra.get("period"), Some(&json!("monthly")));
        assert_eq!(data.budget.categories[0].extra.get("color"), Some(&json!("red")));
        assert_eq!(data.debt[0].extra.get("lender"), Some(&json!("Bank")));

        let out = serde_json::to_value(&data).expect("serialize");
        assert_eq!(out["settings"]["locale"], json!("de-DE"));
        assert_eq!(out["budget"]["categories"][0]["color"], json!("red"));
    }

    #[test]
    fn test_element_repair_drops_only_bad_entries() {
        let data = normalize(&json!({
            "budget": {
                "categories": [
                    { "id": "a", "name": "Rent", "planned": 1500, "spent": 1500 },
                    "garbage",
                    { "id": "b", "name": "Food", "planned": "lots" },
                    { "name": "Fun" }
                ]
            }
        }));

        let names: Vec<&str> = data.budget.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Fun"]);
        let fun = &data.budget.categories[1];
        assert!(!fun.id.is_empty());
        assert_eq!(fun.planned, 0.0);
        assert_eq!(fun.spent, 0.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            json!(null),
            json!({}),
            json!({ "settings": { "currency": "JPY", "x": [1] } }),
            json!({
                "budget": { "monthlyIncome": 3200.5, "categories": [{ "id": "1", "name": "A", "planned": 1, "spent": 2 }] },
                "savings": [{ "id": "s", "name": "Trip", "targetAmount": 900, "currentAmount": 100, "targetDate": "2027-01-01" }],
                "debt": [{ "name": "Loan", "balance": 10 }],
                "extra": { "nested": true }
            }),
        ];

        for raw in inputs {
            let once = normalize(&raw);
            let twice = roundtrip(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_deserialize_goes_through_normalize() {
        let data: AppData = serde_json::from_str(r#"{"savings": 7}"#).expect("parse");
        assert!(data.savings.is_empty());
        assert_eq!(data.settings.currency, "USD");
    }

    #[test]
    fn test_summary_totals() {
        let mut data = AppData::default();
        data.budget.monthly_income = 4000.0;
        data.budget.categories.push(Category::new(NewCategory { name: "Rent".into(), planned: 1500.0, spent: 1500.0 }));
        data.budget.categories.push(Category::new(NewCategory { name: "Food".into(), planned: 500.0, spent: 620.0 }));
        data.savings.push(SavingsGoal::new(NewSavingsGoal {
            name: "Emergency".into(),
            target_amount: 10000.0,
            current_amount: 2500.0,
            target_date: None,
        }));
        data.debt.push(DebtAccount::new(NewDebt { name: "Card".into(), balance: 800.0, interest_rate: 19.9, min_payment: 40.0 }));

        let summary = data.summary();
        assert_eq!(summary.total_planned, 2000.0);
        assert_eq!(summary.total_spent, 2120.0);
        assert_eq!(summary.net_from_budget, 1880.0);
        assert_eq!(summary.total_savings, 2500.0);
        assert_eq!(summary.total_savings_target, 10000.0);
        assert_eq!(summary.total_debt, 800.0);
        assert_eq!(summary.debt_accounts, 1);
        assert_eq!(summary.spent_ratio(), Some(1.06));

        assert!(!data.budget.categories[0].is_over_budget());
        assert!(data.budget.categories[1].is_over_budget());
        assert_eq!(data.savings[0].progress(), 0.25);
    }

    #[test]
    fn test_spent_ratio_without_plan() {
        assert_eq!(AppData::default().summary().spent_ratio(), None);
    }

    #[test]
    fn test_savings_progress_edges() {
        let mut goal = SavingsGoal::new(NewSavingsGoal {
            name: "Car".into(),
            target_amount: 0.0,
            current_amount: 50.0,
            target_date: None,
        });
        assert_eq!(goal.progress(), 0.0);
        assert!(goal.is_reached());

        goal.target_amount = 40.0;
        assert_eq!(goal.progress(), 1.0);
    }
}
