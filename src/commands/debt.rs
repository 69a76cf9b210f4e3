use crate::cli::{DebtAddArgs, DebtCommands, DebtEditArgs};
use crate::core::data::{DebtPatch, NewDebt};
use crate::core::operations::AppDataController;
use crate::core::traits::StorageBackend;
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::format::format_currency;
use crate::utils::interactive::{parse_amount, parse_optional_amount, require_name};
use crate::utils::output::{OutputStyle, print_list};
use anyhow::Result;

pub fn handle_debt_command<B: StorageBackend>(
    controller: &mut AppDataController<B>,
    command: Option<DebtCommands>,
) -> Result<()> {
    match command.unwrap_or(DebtCommands::List) {
        DebtCommands::List => handle_list(controller),
        DebtCommands::Add(args) => handle_add(controller, &args),
        DebtCommands::Edit(args) => handle_edit(controller, &args),
        DebtCommands::Remove { id } => {
            if controller.remove_debt(&id) {
                handle_flow(FlowResult::Success("Debt account removed".to_string()));
            } else {
                handle_flow(FlowResult::NotFound {
                    item_type: "Debt account".to_string(),
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

    if !data.debt.is_empty() {
        OutputStyle::print_field_colored(
            "Total debt",
            &format_currency(data.summary().total_debt, currency),
            OutputStyle::amount,
        );
        println!();
    }

    print_list(
        "💳 Debt accounts",
        &data.debt,
        "No debt accounts. Track credit cards or loans with `debt add`.",
        |account| OutputStyle::print_debt(account, currency),
    );
    Ok(())
}

fn handle_add<B: StorageBackend>(controller: &mut AppDataController<B>, args: &DebtAddArgs) -> Result<()> {
    let fields = NewDebt {
        name: require_name(&args.name)?,
        balance: parse_amount("Balance", &args.balance)?,
        interest_rate: parse_amount("Interest rate", &args.rate)?,
        min_payment: parse_amount("Minimum payment", &args.min_payment)?,
    };
    let name = fields.name.clone();
    let id = controller.add_debt(fields);

    handle_flow(FlowResult::Success(format!("Debt account '{}' added ({})", name, id)));
    Ok(())
}

fn handle_edit<B: StorageBackend>(controller: &mut AppDataController<B>, args: &DebtEditArgs) -> Result<()> {
    let patch = DebtPatch {
        name: args.name.as_deref().map(require_name).transpose()?,
        balance: parse_optional_amount("Balance", args.balance.as_deref())?,
        interest_rate: parse_optional_amount("Interest rate", args.rate.as_deref())?,
        min_payment: parse_optional_amount("Minimum payment", args.min_payment.as_deref())?,
    };

    if controller.update_debt(&args.id, patch) {
        handle_flow(FlowResult::Success("Debt account updated".to_string()));
    } else {
        handle_flow(FlowResult::NotFound {
            item_type: "Debt account".to_string(),
            search_term: args.id.clone(),
        });
    }
    Ok(())
}
