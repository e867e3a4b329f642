use crate::cli::core::{format_amount, join_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{section as output_section, tint_balance};
use crate::cli::registry::CommandEntry;
use crate::parser;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "account",
            "Show or rename the account",
            "account [name]",
            cmd_account,
        ),
        CommandEntry::new(
            "balance",
            "Show or set the initial balance",
            "balance [amount]",
            cmd_balance,
        ),
        CommandEntry::new("save", "Write the ledger to disk", "save", cmd_save),
        CommandEntry::new(
            "status",
            "Summarize the ledger and where it is stored",
            "status",
            cmd_status,
        ),
    ]
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        io::print_info(format!("Account: {}", context.ledger.account_name()));
        return Ok(());
    }
    let name = join_args(args);
    if name.is_empty() {
        return Err(CommandError::InvalidArguments(
            "account name cannot be empty".into(),
        ));
    }
    context.ledger.set_account_name(name);
    io::print_success(format!("Account renamed to '{}'.", context.ledger.account_name()));
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            io::print_info(format!(
                "Initial balance: {}",
                format_amount(context.ledger.initial_balance())
            ));
            Ok(())
        }
        [raw] => {
            let amount = parser::parse_amount(raw)?;
            context.ledger.set_initial_balance(amount);
            io::print_success(format!("Initial balance set to {}.", format_amount(amount)));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments("usage: balance [amount]".into())),
    }
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.save()
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = &context.ledger;
    let thresholds = context.config.thresholds();
    output_section(ledger.account_name());
    io::print_info(format!(
        "  Initial balance : {}",
        format_amount(ledger.initial_balance())
    ));
    io::print_info(format!("  Transactions    : {}", ledger.len()));
    if let Some(last) = ledger.transactions().last() {
        let closing = format_amount(last.balance());
        io::print_info(format!(
            "  Closing balance : {}",
            tint_balance(&closing, thresholds.classify(last.balance()))
        ));
    }
    match ledger.lowest_near_now() {
        Some(lowest) => io::print_info(format!(
            "  Lowest near now : {} on {}",
            tint_balance(
                &format_amount(lowest.balance()),
                thresholds.classify(lowest.balance())
            ),
            lowest.date.format("%Y-%m-%d")
        )),
        None => io::print_info("  Lowest near now : none"),
    }
    io::print_info(format!("  Today           : {}", ledger.today().format("%Y-%m-%d")));
    io::print_info(format!(
        "  Unsaved changes : {}",
        if ledger.is_dirty() { "yes" } else { "no" }
    ));
    io::print_info(format!("  Opened from     : {}", context.source));
    io::print_info(format!("  Ledger file     : {}", context.store.path().display()));
    io::print_info(format!(
        "  Config file     : {}",
        context.config_manager.path().display()
    ));
    Ok(())
}
