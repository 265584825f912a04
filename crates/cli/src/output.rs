use api_types::{
    analytics::AnalyticsData,
    budget::{BudgetOverview, BudgetStatus},
    stats::DashboardStats,
    transaction::CategoryType,
};
use client::{TransactionList, TypeFilter};

pub fn transactions(list: &TransactionList) {
    let visible = list.visible();
    if visible.is_empty() {
        println!("no transactions found");
        return;
    }

    for tx in &visible {
        let sign = match tx.category.kind {
            CategoryType::Income => "+",
            CategoryType::Expense => "-",
        };
        println!(
            "{}  {}{:>10.2}  {:<30}  {} / {}",
            tx.date.format("%Y-%m-%d"),
            sign,
            tx.amount.abs(),
            tx.description,
            tx.category.name,
            tx.account.name,
        );
    }

    let filter_note = match list.filter() {
        TypeFilter::All => String::new(),
        TypeFilter::Income => " (income only)".to_string(),
        TypeFilter::Expense => " (expense only)".to_string(),
    };
    println!(
        "{} of {} fetched{}{}",
        visible.len(),
        list.items().len(),
        filter_note,
        if list.has_next() { ", more on server" } else { "" },
    );
}

pub fn dashboard(stats: &DashboardStats) {
    let month = &stats.current_month;
    println!("total wealth   {:>12.2}  ({:+.2})", month.total_wealth, month.wealth_change);
    println!("income         {:>12.2}  ({:+.2})", month.income, month.income_change);
    println!("expenses       {:>12.2}  ({:+.2})", month.expenses, month.expenses_change);
    println!("savings        {:>12.2}  ({:+.2})", month.savings, month.savings_change);
    println!("transactions   {:>12}", month.transactions_count);

    if !stats.wealth_evolution.is_empty() {
        println!();
        for point in &stats.wealth_evolution {
            println!("{}  {:>12.2}", point.month, point.wealth);
        }
    }
}

pub fn analytics(data: &AnalyticsData) {
    for month in &data.monthly_data {
        println!(
            "{}  income {:>10.2}  expenses {:>10.2}",
            month.month, month.income, month.expenses
        );
    }

    let insights = &data.insights;
    println!();
    println!(
        "over {} months: income {:.2}, expenses {:.2}",
        insights.period_months, insights.total_income, insights.total_expenses
    );
    println!(
        "avg monthly savings {:.2} (rate {:.1}%)",
        insights.avg_monthly_savings, insights.savings_rate
    );
    println!(
        "biggest expense: {:.2} on {} ({}, {})",
        insights.biggest_expense.amount,
        insights.biggest_expense.description,
        insights.biggest_expense.category,
        insights.biggest_expense.date,
    );
}

pub fn budgets(overview: &BudgetOverview) {
    for budget in &overview.budgets {
        let status = match budget.status {
            BudgetStatus::Good => "ok",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        };
        println!(
            "{:<20}  {:>9.2} / {:>9.2}  ({:>5.1}%)  {}",
            budget.category.name, budget.spent, budget.allocated, budget.percentage_used, status,
        );
    }

    let summary = &overview.summary;
    println!();
    println!(
        "allocated {:.2}, spent {:.2}, remaining {:.2} ({:.1}%)",
        summary.total_allocated,
        summary.total_spent,
        summary.total_remaining,
        summary.overall_percentage,
    );
}
