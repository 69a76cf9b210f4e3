use crate::cli::{BudgetCommands, CategoryAddArgs, CategoryEditArgs};
use crate::core::data::{BudgetPatch, CategoryPatch, NewCategory};
use crate::core::operations::AppDataController;
use crate::core::traits::StorageBackend;
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::format::format_currency;
use crate::utils::interactive::{parse_amount, parse_optional_amount, require_name};
use crate::utils::output::{OutputStyle, print_list};
use anyhow::Result;

pub fn handle_budget_command<B: StorageBackend>(
    controller: &mut AppDataController<B>,
    command: Option<BudgetCommands>,
) -> Result<()> {
    match command.unwrap_or(BudgetCommands::List) {
        BudgetCommands::List => handle_list(controller),
        BudgetCommands::Income { amount } => handle_income(controller, &amount),
        BudgetCommands::Add(args) => handle_add(controller, &args),
        BudgetCommands::Edit(args) => handle_edit(controller, &args),
        BudgetCommands::Remove { id } => handle_remove(controller, &id),
    }
}

fn handle_list<B: StorageBackend>(controller: &AppDataController<B>) -> Result<()> {
    let data = controller.data();
    let currency = data.settings.currency_code();

    OutputStyle::print_field_colored(
        "Monthly income",
        &format_currency(data.budget.monthly_income, currency),
        OutputStyle::amount,
    );
    OutputStyle::print_field_colored(
        "Planned / spent",
        &format!(
            "{} / {}",
            format_currency(data.budget.total_planned(), currency),
            format_currency(data.budget.total_spent(), currency)
        ),
        OutputStyle::muted,
    );
    println!();

    print_list(
        "🗂️  Budget categories",
        &data.budget.categories,
        "No categories yet. Add one with `budget add <name> --planned <amount>`.",
        |category| OutputStyle::print_category(category, currency),
    );
    Ok(())
}

fn handle_income<B: StorageBackend>(controller: &mut AppDataController<B>, amount: &str) -> Result<()> {
    let income = parse_amount("Monthly income", amount)?;
    controller.update_budget(BudgetPatch {
        monthly_income: Some(income),
        ..Default::default()
    });

    let currency = controller.data().settings.currency_code().to_string();
    handle_flow(FlowResult::Success(format!(
        "Monthly income set to {}",
        format_currency(income, &currency)
    )));
    Ok(())
}

fn handle_add<B: StorageBackend>(controller: &mut AppDataController<B>, args: &CategoryAddArgs) -> Result<()> {
    let fields = NewCategory {
        name: require_name(&args.name)?,
        planned: parse_amount("Planned", &args.planned)?,
        spent: parse_amount("Spent", &args.spent)?,
    };
    let name = fields.name.clone();
    let id = controller.add_category(fields);

    handle_flow(FlowResult::Success(format!("Category '{}' added ({})", name, id)));
    Ok(())
}

fn handle_edit<B: StorageBackend>(controller: &mut AppDataController<B>, args: &CategoryEditArgs) -> Result<()> {
    let patch = CategoryPatch {
        name: args.name.as_deref().map(require_name).transpose()?,
        planned: parse_optional_amount("Planned", args.planned.as_deref())?,
        spent: parse_optional_amount("Spent", args.spent.as_deref())?,
    };

    if controller.update_category(&args.id, patch) {
        handle_flow(FlowResult::Success("Category updated".to_string()));
    } else {
        handle_flow(FlowResult::NotFound {
            item_type: "Category".to_string(),
            search_term: args.id.clone(),
        });
    }
    Ok(())
}

fn handle_remove<B: StorageBackend>(controller: &mut AppDataController<B>, id: &str) -> Result<()> {
    if controller.remove_category(id) {
        handle_flow(FlowResult::Success("Category removed".to_string()));
    } else {
        handle_flow(FlowResult::NotFound {
            item_type: "Category".to_string(),
            search_term: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use crate::utils::error::AppError;

    #[test]
    fn test_income_then_add_category() {
        let mut controller = AppDataController::new(MemoryBackend::new());

        handle_budget_command(&mut controller, Some(BudgetCommands::Income { amount: "5,000".into() }))
            .expect("set income");
        handle_budget_command(
            &mut controller,
            Some(BudgetCommands::Add(CategoryAddArgs {
                name: "  Rent ".into(),
                planned: "1500".into(),
                spent: "1500".into(),
            })),
        )
        .expect("add category");

        let budget = &controller.data().budget;
        assert_eq!(budget.monthly_income, 5000.0);
        assert_eq!(budget.categories.len(), 1);
        assert_eq!(budget.categories[0].name, "Rent");
    }

    #[test]
    fn test_add_rejects_blank_name_and_negative_amounts() {
        let mut controller = AppDataController::new(MemoryBackend::new());

        let blank = handle_budget_command(
            &mut controller,
            Some(BudgetCommands::Add(CategoryAddArgs {
                name: " ".into(),
                planned: "10".into(),
                spent: "0".into(),
            })),
        );
        let negative = handle_budget_command(&mut controller, Some(BudgetCommands::Income { amount: "-1".into() }));

        for result in [blank, negative] {
            let err = result.expect_err("should be rejected");
            assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Validation(_))));
        }
        assert!(controller.data().budget.categories.is_empty());
        assert_eq!(controller.data().budget.monthly_income, 0.0);
    }

    #[test]
    fn test_edit_unknown_id_is_not_an_error() {
        let mut controller = AppDataController::new(MemoryBackend::new());
        let result = handle_budget_command(
            &mut controller,
            Some(BudgetCommands::Edit(CategoryEditArgs {
                id: "missing".into(),
                name: None,
                planned: Some("10".into()),
                spent: None,
            })),
        );
        assert!(result.is_ok());
        assert!(controller.data().budget.categories.is_empty());
    }
}
