use crate::cli::core::{
    describe, format_amount, format_optional, join_args, parse_optional_amount, CliMode,
    CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output::tint_balance;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::ledger::{status::is_beyond_horizon, Periodicity, TransactionEdit};
use crate::{parser, search};

const LOWEST_MARKER: &str = "<< lowest";
const LATER_MARKER: &str = "later";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show transactions with projected balances",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "add",
            "Add a blank transaction, or parse one from text",
            "add [Name, Date, Amount, Periodicity]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change one field of a transaction",
            "edit <row> <name|date|deposit|payment|periodicity> <value>",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Remove a transaction", "delete <row>", cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new(
            "advance",
            "Push a recurring transaction to its next date",
            "advance <row>",
            cmd_advance,
        ),
        CommandEntry::new(
            "search",
            "Find transactions by name",
            "search <words>",
            cmd_search,
        )
        .with_aliases(&["find"]),
        CommandEntry::new(
            "lowest",
            "Show the lowest projected balance within a month of today",
            "lowest",
            cmd_lowest,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = &context.ledger;
    if ledger.is_empty() {
        io::print_info("No transactions. Use `add` to create one.");
        return Ok(());
    }

    let today = ledger.today();
    let thresholds = context.config.thresholds();
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Name"),
        TableColumn::right("Deposit"),
        TableColumn::right("Payment"),
        TableColumn::left("Periodicity"),
        TableColumn::right("Balance"),
        TableColumn::left(""),
    ]);
    for (index, txn) in ledger.transactions().iter().enumerate() {
        let flag = if txn.is_lowest_near_now() {
            LOWEST_MARKER
        } else if is_beyond_horizon(txn.date, today) {
            LATER_MARKER
        } else {
            ""
        };
        table.add_row(vec![
            (index + 1).to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.name.clone(),
            format_optional(txn.deposit()),
            format_optional(txn.payment()),
            txn.periodicity.to_string(),
            format_amount(txn.balance()),
            flag.to_string(),
        ]);
    }

    const BALANCE_COLUMN: usize = 6;
    let transactions = ledger.transactions();
    table.print_with(|row, column, cell| {
        if column == BALANCE_COLUMN {
            tint_balance(&cell, thresholds.classify(transactions[row].balance()))
        } else {
            cell
        }
    });
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = if args.is_empty() {
        context.ledger.add()
    } else {
        let entry = parser::parse_entry(&join_args(args))?;
        context.ledger.insert(entry)
    };
    if let (Some(row), Some(txn)) = (context.row_of(id), context.ledger.get(id)) {
        io::print_success(format!("Added row {row}: {}.", describe(txn)));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row, field, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <row> <name|date|deposit|payment|periodicity> <value>".into(),
        ));
    };
    let id = context.resolve_row(row)?;
    let value = join_args(value);
    let edit = match field.to_ascii_lowercase().as_str() {
        "name" => TransactionEdit::Name(value),
        "date" => TransactionEdit::Date(parser::parse_date(&value)?),
        "deposit" => TransactionEdit::Deposit(parse_optional_amount(&value)?),
        "payment" => TransactionEdit::Payment(parse_optional_amount(&value)?),
        "periodicity" => TransactionEdit::Periodicity(value.parse::<Periodicity>()?),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{other}`; expected name, date, deposit, payment or periodicity"
            )))
        }
    };
    context.ledger.edit(id, edit)?;
    if let (Some(row), Some(txn)) = (context.row_of(id), context.ledger.get(id)) {
        io::print_success(format!("Updated row {row}: {}.", describe(txn)));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <row>".into()));
    };
    let id = context.resolve_row(row)?;
    let description = context
        .ledger
        .get(id)
        .map(describe)
        .unwrap_or_default();

    if context.mode() == CliMode::Interactive {
        let prompt = format!("Delete {description}?");
        if !io::confirm_action(&context.theme, &prompt, false)? {
            io::print_info("Delete cancelled.");
            return Ok(());
        }
    }

    context.ledger.delete(id)?;
    io::print_success(format!("Deleted {description}."));
    Ok(())
}

fn cmd_advance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row] = args else {
        return Err(CommandError::InvalidArguments("usage: advance <row>".into()));
    };
    let id = context.resolve_row(row)?;
    let previous = context.ledger.get(id).map(|txn| txn.date);
    let next = context.ledger.advance(id)?;
    let name = context
        .ledger
        .get(id)
        .map(|txn| txn.name.clone())
        .unwrap_or_default();
    match previous {
        Some(previous) if previous == next => io::print_info(format!(
            "'{name}' stays on {}.",
            next.format("%Y-%m-%d")
        )),
        _ => io::print_success(format!(
            "'{name}' moved to {} (row {}).",
            next.format("%Y-%m-%d"),
            context.row_of(id).unwrap_or_default()
        )),
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = join_args(args);
    if query.is_empty() {
        return Err(CommandError::InvalidArguments("usage: search <words>".into()));
    }
    let hits = search::search(context.ledger.transactions(), &query);
    if hits.is_empty() {
        io::print_info(format!("No transactions match `{query}`."));
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Name"),
        TableColumn::right("Balance"),
        TableColumn::right("Hits"),
    ]);
    for hit in &hits {
        let row = context.row_of(hit.transaction.id()).unwrap_or_default();
        table.add_row(vec![
            row.to_string(),
            hit.transaction.date.format("%Y-%m-%d").to_string(),
            hit.transaction.name.clone(),
            format_amount(hit.transaction.balance()),
            hit.hits.to_string(),
        ]);
    }
    table.print_with(|_, _, cell| cell);
    Ok(())
}

fn cmd_lowest(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(lowest) = context.ledger.lowest_near_now() else {
        return Err(CommandError::Message(
            "No transactions fall within a month of today.".into(),
        ));
    };
    let status = context.config.thresholds().classify(lowest.balance());
    let row = context.row_of(lowest.id()).unwrap_or_default();
    io::print_info(format!(
        "Lowest balance near today: {} at row {row}, {} [{status}]",
        tint_balance(&format_amount(lowest.balance()), status),
        describe(lowest)
    ));
    Ok(())
}
