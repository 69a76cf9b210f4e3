use crate::cli::{SavingsAddArgs, SavingsCommands, SavingsEditArgs};
use crate::core::data::{NewSavingsGoal, SavingsGoalPatch};
use crate::core::operations::AppDataController;
use crate::core::traits::StorageBackend;
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::format::format_currency;
use crate::utils::interactive::{parse_amount, parse_optional_amount, parse_target_date, require_name};
use crate::utils::output::{OutputStyle, print_list};
use anyhow::Result;

pub fn handle_savings_command<B: StorageBackend>(
    controller: &mut AppDataController<B>,
    command: Option<SavingsCommands>,
) -> Result<()> {
    match command.unwrap_or(SavingsCommands::List) {
        SavingsCommands::List => handle_list(controller),
        SavingsCommands::Add(args) => handle_add(controller, &args),
        SavingsCommands::Edit(args) => handle_edit(controller, &args),
        SavingsCommands::Remove { id } => {
            if controller.remove_savings_goal(&id) {
                handle_flow(FlowResult::Success("Savings goal removed".to_string()));
            } else {
                handle_flow(FlowResult::NotFound {
                    item_type: "Savings goal".to_string(),
                    search_term: id,
                });
            }
            Ok(())
        }
    }
}

fn handle_list<B: StorageBackend>(controller: &AppDataController<B>) -> Result<()> {
    let data = controller.data();
    let currency = data.settings.currency_code();
    let summary = data.summary();

    if !data.savings.is_empty() {
        OutputStyle::print_field_colored(
            "Saved so far",
            &format!(
                "{} of {}",
                format_currency(summary.total_savings, currency),
                format_currency(summary.total_savings_target, currency)
            ),
            OutputStyle::amount,
        );
        println!();
    }

    print_list(
        "🐷 Savings goals",
        &data.savings,
        "No savings goals yet. Create one (e.g. Emergency fund, Vacation) with `savings add`.",
        |goal| OutputStyle::print_savings_goal(goal, currency),
    );
    Ok(())
}

fn handle_add<B: StorageBackend>(controller: &mut AppDataController<B>, args: &SavingsAddArgs) -> Result<()> {
    let fields = NewSavingsGoal {
        name: require_name(&args.name)?,
        target_amount: parse_amount("Target amount", &args.target)?,
        current_amount: parse_amount("Current amount", &args.current)?,
        target_date: match args.date.as_deref() {
            Some(date) => parse_target_date(date)?,
            None => None,
        },
    };
    let name = fields.name.clone();
    let id = controller.add_savings_goal(fields);

    handle_flow(FlowResult::Success(format!("Savings goal '{}' added ({})", name, id)));
    Ok(())
}

fn handle_edit<B: StorageBackend>(controller: &mut AppDataController<B>, args: &SavingsEditArgs) -> Result<()> {
    let patch = SavingsGoalPatch {
        name: args.name.as_deref().map(require_name).transpose()?,
        target_amount: parse_optional_amount("Target amount", args.target.as_deref())?,
        current_amount: parse_optional_amount("Current amount", args.current.as_deref())?,
        target_date: args.date.as_deref().map(parse_target_date).transpose()?,
    };

    if controller.update_savings_goal(&args.id, patch) {
        handle_flow(FlowResult::Success("Savings goal updated".to_string()));
    } else {
        handle_flow(FlowResult::NotFound {
            item_type: "Savings goal".to_string(),
            search_term: args.id.clone(),
        });
    }
    Ok(())
}
