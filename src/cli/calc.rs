//! Calculator CLI command
//!
//! Evaluates an amount expression exactly as transaction entry would.

use crate::calc::{evaluate_amount, parse_math_expression};
use crate::error::TallyResult;

/// Handle the calc command
pub fn handle_calc_command(expression: &str, as_money: bool) -> TallyResult<()> {
    if as_money {
        let amount = evaluate_amount(expression)?;
        println!("{} ({} cents)", amount, amount.cents());
    } else {
        println!("{}", parse_math_expression(expression)?);
    }
    Ok(())
}
