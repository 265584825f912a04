//! Wire types for the hosted FinTrack REST API.
//!
//! Field names and casing mirror the JSON payloads exactly; these types are
//! shared between the client library and any frontend built on top of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    /// Request body for `POST /auth/jwt/create/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    /// Response of `POST /auth/jwt/create/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TokenPair {
        pub access: String,
        pub refresh: String,
    }

    /// Request body for `POST /auth/jwt/refresh/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenRefresh {
        pub refresh: String,
    }

    /// Response of `POST /auth/jwt/refresh/`: only the access token rotates.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccessToken {
        pub access: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub is_active: bool,
        pub date_joined: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum CategoryType {
        Income,
        Expense,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryType,
        /// Icon name; the API occasionally returns `null` here.
        #[serde(default)]
        pub icon: Option<String>,
        pub color: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Account {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
    }

    /// A single transaction as served by `GET /transactions/`.
    ///
    /// Read-only from the client's perspective. The amount is signed; the
    /// sign encodes income/expense when the category type is ambiguous.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: i64,
        pub description: String,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub category: Category,
        pub account: Account,
        pub is_recurring: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// One page of `GET /transactions/`.
    ///
    /// `next` is the server-provided pointer to the following page; `None`
    /// marks the end of the collection.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionPage {
        pub results: Vec<Transaction>,
        pub next: Option<String>,
    }

    /// Server-side sort order, serialized as the `ordering` query parameter.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub enum SortOrder {
        #[default]
        #[serde(rename = "-date")]
        DateDesc,
        #[serde(rename = "date")]
        DateAsc,
        #[serde(rename = "-amount")]
        AmountDesc,
        #[serde(rename = "amount")]
        AmountAsc,
    }

    impl SortOrder {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::DateDesc => "-date",
                Self::DateAsc => "date",
                Self::AmountDesc => "-amount",
                Self::AmountAsc => "amount",
            }
        }
    }

    /// Query parameters for `GET /transactions/`.
    #[derive(Clone, Debug, Serialize)]
    pub struct TransactionListParams {
        pub page: u32,
        pub ordering: SortOrder,
        pub search: String,
    }
}

pub mod stats {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CurrentMonth {
        pub total_wealth: f64,
        pub wealth_change: f64,
        pub income: f64,
        pub income_change: f64,
        pub expenses: f64,
        pub expenses_change: f64,
        pub savings: f64,
        pub savings_change: f64,
        pub transactions_count: u64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct WealthPoint {
        pub month: String,
        pub wealth: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct WealthSlice {
        pub name: String,
        pub size: f64,
        pub index: u32,
    }

    /// Response of `GET /transactions/dashboard_stats/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DashboardStats {
        pub current_month: CurrentMonth,
        pub wealth_evolution: Vec<WealthPoint>,
        pub wealth_composition: Vec<WealthSlice>,
    }
}

pub mod analytics {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MonthlyData {
        pub month: String,
        pub income: f64,
        pub expenses: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TrendPoint {
        pub month: String,
        pub amount: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryTrend {
        pub category: String,
        pub data: Vec<TrendPoint>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BiggestExpense {
        pub amount: f64,
        pub description: String,
        pub category: String,
        pub date: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Insights {
        pub avg_monthly_savings: f64,
        pub savings_rate: f64,
        pub biggest_expense: BiggestExpense,
        pub total_income: f64,
        pub total_expenses: f64,
        pub period_months: u32,
    }

    /// Response of `GET /transactions/analytics/?months=N`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct AnalyticsData {
        pub monthly_data: Vec<MonthlyData>,
        pub category_trends: Vec<CategoryTrend>,
        pub insights: Insights,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum BudgetPeriod {
        Weekly,
        Monthly,
        Yearly,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum BudgetStatus {
        Good,
        Warning,
        Exceeded,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetCategory {
        pub id: i64,
        pub name: String,
        #[serde(default)]
        pub icon: Option<String>,
        pub color: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Budget {
        pub id: i64,
        pub allocated: f64,
        pub period: BudgetPeriod,
        pub category: BudgetCategory,
        pub spent: f64,
        pub remaining: f64,
        pub percentage_used: f64,
        pub status: BudgetStatus,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetSummary {
        pub total_allocated: f64,
        pub total_spent: f64,
        pub total_remaining: f64,
        pub overall_percentage: f64,
    }

    /// Response of `GET /budgets/overview/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetOverview {
        pub summary: BudgetSummary,
        pub budgets: Vec<Budget>,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::{CategoryType, SortOrder, Transaction, TransactionPage};

    #[test]
    fn transaction_page_parses_wire_payload() {
        let raw = r##"{
            "results": [{
                "id": 42,
                "description": "Salary",
                "amount": 2500.0,
                "date": "2025-06-30T08:00:00Z",
                "category": {"id": 1, "name": "Salary", "type": "INCOME", "icon": null, "color": "#4caf50"},
                "account": {"id": 3, "name": "Checking", "type": "BANK"},
                "is_recurring": true,
                "created_at": "2025-06-30T08:00:01Z",
                "updated_at": "2025-06-30T08:00:01Z"
            }],
            "next": null
        }"##;

        let page: TransactionPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.next.is_none());

        let tx: &Transaction = &page.results[0];
        assert_eq!(tx.id, 42);
        assert_eq!(tx.category.kind, CategoryType::Income);
        assert!(tx.category.icon.is_none());
        assert_eq!(tx.account.kind, "BANK");
    }

    #[test]
    fn sort_order_matches_ordering_parameter() {
        assert_eq!(SortOrder::default().as_str(), "-date");
        let encoded = serde_json::to_string(&SortOrder::AmountDesc).unwrap();
        assert_eq!(encoded, "\"-amount\"");
    }
}
