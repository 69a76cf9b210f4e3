use crate::core::data::{AppData, Category, DebtAccount, SavingsGoal, Summary};
use crate::utils::format::{format_currency, format_percent, progress_bar, truncate_string};
use colored::*;

const BAR_WIDTH: usize = 20;

pub struct OutputStyle;

impl OutputStyle {
    pub fn name(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn amount(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>18}: {}", Self::label(label), color_fn(value));
    }

    // ========== Overview ==========

    pub fn print_summary(summary: &Summary, currency: &str) {
        Self::print_header("📊 Overview");

        Self::print_field_colored("Monthly income", &format_currency(summary.monthly_income, currency), Self::amount);
        if summary.total_planned > 0.0 {
            Self::print_field_colored("Planned spending", &format_currency(summary.total_planned, currency), Self::muted);
        }

        Self::print_field_colored("Spent this month", &format_currency(summary.total_spent, currency), Self::amount);
        if let Some(ratio) = summary.spent_ratio() {
            Self::print_field_colored("Of planned", &format!("{:.0}%", ratio * 100.0), Self::muted);
        }

        let net = format_currency(summary.net_from_budget, currency);
        if summary.net_from_budget < 0.0 {
            Self::print_field_colored("Left this month", &net, Self::error);
        } else {
            Self::print_field_colored("Left this month", &net, Self::success);
        }

        Self::print_field_colored("Total savings", &format_currency(summary.total_savings, currency), Self::amount);
        if summary.total_savings_target > 0.0 {
            Self::print_field_colored(
                "Savings goal",
                &format_currency(summary.total_savings_target, currency),
                Self::muted,
            );
        }

        Self::print_field_colored("Total debt", &format_currency(summary.total_debt, currency), Self::amount);
        if summary.debt_accounts > 0 {
            Self::print_field_colored("Accounts", &format!("{} account(s)", summary.debt_accounts), Self::muted);
        }
    }

    pub fn print_overview(data: &AppData) {
        let currency = data.settings.currency_code();
        Self::print_summary(&data.summary(), currency);

        let total_planned = data.budget.total_planned();
        if !data.budget.categories.is_empty() && total_planned > 0.0 {
            println!("\n{}", Self::header("Budget by category"));
            for category in &data.budget.categories {
                let share = category.planned / total_planned * 100.0;
                println!(
                    "  {:<24} {} {}",
                    Self::name(&truncate_string(&category.name, 24)),
                    progress_bar(category.planned / total_planned, BAR_WIDTH),
                    Self::muted(&format!("{:.0}%", share))
                );
            }
        }
    }

    // ========== Entity lines ==========

    pub fn print_category(category: &Category, currency: &str) {
        let ratio = if category.planned > 0.0 {
            category.spent / category.planned
        } else if category.spent > 0.0 {
            1.0
        } else {
            0.0
        };
        let amounts = format!(
            "{} / {}",
            format_currency(category.spent, currency),
            format_currency(category.planned, currency)
        );

        println!("{} {}", Self::name(&category.name), Self::muted(&category.id));
        if category.is_over_budget() {
            println!(
                "  {} {} {}",
                progress_bar(ratio, BAR_WIDTH).as_str().red(),
                Self::amount(&amounts),
                Self::error(&format!(
                    "over by {}",
                    format_currency(-category.remaining(), currency)
                ))
            );
        } else {
            println!("  {} {}", progress_bar(ratio, BAR_WIDTH), Self::amount(&amounts));
        }
    }

    pub fn print_savings_goal(goal: &SavingsGoal, currency: &str) {
        println!("{} {}", Self::name(&goal.name), Self::muted(&goal.id));
        if let Some(date) = goal.target_date.as_deref().filter(|d| !d.is_empty()) {
            println!("  {} {}", Self::label("Target date:"), date);
        }

        let bar = progress_bar(goal.progress(), BAR_WIDTH);
        let amounts = format!(
            "{} / {}",
            format_currency(goal.current_amount, currency),
            format_currency(goal.target_amount, currency)
        );
        if goal.is_reached() {
            println!("  {} {} {}", bar.as_str().green(), Self::amount(&amounts), Self::success("reached"));
        } else {
            println!("  {} {}", bar, Self::amount(&amounts));
        }
    }

    pub fn print_debt(account: &DebtAccount, currency: &str) {
        println!("{} {}", Self::name(&account.name), Self::muted(&account.id));
        println!("  {}", Self::amount(&format_currency(account.balance, currency)));
        println!(
            "  {} {}   {} {}",
            Self::label("APR:"),
            format_percent(account.interest_rate),
            Self::label("Min. payment:"),
            format_currency(account.min_payment, currency)
        );
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

/// Print a titled list, or a muted hint when it is empty
pub fn print_list<T>(title: &str, items: &[T], empty_hint: &str, print_item: impl Fn(&T)) {
    OutputStyle::print_header(title);
    if items.is_empty() {
        println!("{}", OutputStyle::muted(empty_hint));
        return;
    }

    for (i, item) in items.iter().enumerate() {
        print_item(item);
        if i < items.len() - 1 {
            println!("{}", OutputStyle::muted(&OutputStyle::separator()));
        }
    }
}
