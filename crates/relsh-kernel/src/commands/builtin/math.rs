//! The fixed-arity numeric command family.
//!
//! All operands go through the argument resolver with an expected type
//! of `number`, so variables and the `result` keyword work anywhere a
//! literal does. `sqrt` and `factorial` take exactly one operand; every
//! other command takes at least two. `divide` and `exponent` fold
//! left-to-right across all operands.

use relsh_types::{DataType, TypedValue};

use crate::commands::{Category, Command, CommandSpec, ExecContext};
use crate::error::{ArithmeticError, ShellError, ShellResult};

/// Resolve every argument to a number, enforcing a minimum count.
fn numeric_args(
    name: &str,
    min: usize,
    args: &[String],
    ctx: &ExecContext<'_>,
) -> ShellResult<Vec<f64>> {
    if args.len() < min {
        return Err(ShellError::Syntax(format!(
            "{name} requires at least {min} operands"
        )));
    }
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        match ctx.resolve(arg, DataType::Number)? {
            TypedValue::Number(n) => values.push(n),
            other => {
                return Err(ShellError::TypeMismatch {
                    expected: DataType::Number,
                    actual: other.data_type(),
                })
            }
        }
    }
    Ok(values)
}

/// Resolve exactly one numeric operand.
fn single_numeric(name: &str, args: &[String], ctx: &ExecContext<'_>) -> ShellResult<f64> {
    if args.len() != 1 {
        return Err(ShellError::Syntax(format!(
            "{name} requires exactly one operand"
        )));
    }
    match ctx.resolve(&args[0], DataType::Number)? {
        TypedValue::Number(n) => Ok(n),
        other => Err(ShellError::TypeMismatch {
            expected: DataType::Number,
            actual: other.data_type(),
        }),
    }
}

fn finite(n: f64) -> ShellResult<TypedValue> {
    if n.is_finite() {
        Ok(TypedValue::Number(n))
    } else {
        Err(ArithmeticError::Overflow.into())
    }
}

pub struct Add;

impl Command for Add {
    fn name(&self) -> &str {
        "add"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("add", Category::Math, "Add two or more numbers")
            .usage("add <n> <n> [...]")
            .example("add 2 3")
            .example("add $price #tax 1.5")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let values = numeric_args("add", 2, args, ctx)?;
        finite(values.iter().sum())
    }
}

pub struct Subtract;

impl Command for Subtract {
    fn name(&self) -> &str {
        "subtract"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "subtract",
            Category::Math,
            "Subtract numbers from the first operand",
        )
        .usage("subtract <n> <n> [...]")
        .example("subtract 10 3 2")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let values = numeric_args("subtract", 2, args, ctx)?;
        finite(values[1..].iter().fold(values[0], |acc, n| acc - n))
    }
}

pub struct Multiply;

impl Command for Multiply {
    fn name(&self) -> &str {
        "multiply"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("multiply", Category::Math, "Multiply two or more numbers")
            .usage("multiply <n> <n> [...]")
            .example("multiply 6 7")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let values = numeric_args("multiply", 2, args, ctx)?;
        finite(values.iter().product())
    }
}

pub struct Divide;

impl Command for Divide {
    fn name(&self) -> &str {
        "divide"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "divide",
            Category::Math,
            "Divide the first operand by each following operand",
        )
        .usage("divide <n> <n> [...]")
        .example("divide 100 10 2")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let values = numeric_args("divide", 2, args, ctx)?;
        let mut acc = values[0];
        for n in &values[1..] {
            if *n == 0.0 {
                return Err(ArithmeticError::DivideByZero.into());
            }
            acc /= n;
        }
        finite(acc)
    }
}

pub struct Exponent;

impl Command for Exponent {
    fn name(&self) -> &str {
        "exponent"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "exponent",
            Category::Math,
            "Raise the first operand to each following power, left to right",
        )
        .usage("exponent <n> <n> [...]")
        .example("exponent 2 10")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let values = numeric_args("exponent", 2, args, ctx)?;
        finite(values[1..].iter().fold(values[0], |acc, n| acc.powf(*n)))
    }
}

pub struct Sqrt;

impl Command for Sqrt {
    fn name(&self) -> &str {
        "sqrt"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("sqrt", Category::Math, "Square root of one number")
            .usage("sqrt <n>")
            .example("sqrt 16")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let n = single_numeric("sqrt", args, ctx)?;
        if n < 0.0 {
            return Err(ArithmeticError::NegativeSqrt.into());
        }
        Ok(TypedValue::Number(n.sqrt()))
    }
}

pub struct Average;

impl Command for Average {
    fn name(&self) -> &str {
        "average"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("average", Category::Math, "Average of two or more numbers")
            .usage("average <n> <n> [...]")
            .example("average 1 2 3 4")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let values = numeric_args("average", 2, args, ctx)?;
        finite(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub struct Factorial;

impl Command for Factorial {
    fn name(&self) -> &str {
        "factorial"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new(
            "factorial",
            Category::Math,
            "Factorial of one non-negative integer",
        )
        .usage("factorial <n>")
        .example("factorial 5")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let n = single_numeric("factorial", args, ctx)?;
        if n < 0.0 || n.fract() != 0.0 {
            return Err(
                ArithmeticError::FactorialDomain(TypedValue::format_number(n)).into(),
            );
        }
        let mut acc = 1.0_f64;
        let mut i = 2.0_f64;
        while i <= n {
            acc *= i;
            i += 1.0;
        }
        finite(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin::testutil::{args, with_ctx};
    use rstest::rstest;

    #[rstest]
    #[case("add", "2 3", 5.0)]
    #[case("subtract", "10 3 2", 5.0)]
    #[case("multiply", "6 7", 42.0)]
    #[case("divide", "100 10 2", 5.0)]
    #[case("exponent", "2 10", 1024.0)]
    #[case("average", "1 2 3 4", 2.5)]
    fn binary_family_folds(#[case] name: &str, #[case] operands: &str, #[case] expected: f64) {
        with_ctx(|ctx, _| {
            let value = ctx.run_command(name, &args(operands)).unwrap();
            assert_eq!(value, TypedValue::Number(expected));
        });
    }

    #[rstest]
    #[case("add", "2")]
    #[case("divide", "10")]
    #[case("sqrt", "4 9")]
    #[case("factorial", "")]
    fn arity_is_enforced(#[case] name: &str, #[case] operands: &str) {
        with_ctx(|ctx, _| {
            let err = ctx.run_command(name, &args(operands)).unwrap_err();
            assert!(matches!(err, ShellError::Syntax(_)));
        });
    }

    #[test]
    fn sqrt_of_sixteen() {
        with_ctx(|ctx, _| {
            let value = ctx.run_command("sqrt", &args("16")).unwrap();
            assert_eq!(value, TypedValue::Number(4.0));
        });
    }

    #[test]
    fn sqrt_rejects_negatives() {
        with_ctx(|ctx, _| {
            let err = ctx.run_command("sqrt", &args("-4")).unwrap_err();
            assert!(matches!(
                err,
                ShellError::Arithmetic(ArithmeticError::NegativeSqrt)
            ));
        });
    }

    #[test]
    fn factorial_of_five() {
        with_ctx(|ctx, _| {
            let value = ctx.run_command("factorial", &args("5")).unwrap();
            assert_eq!(value, TypedValue::Number(120.0));
        });
    }

    #[test]
    fn factorial_requires_integer() {
        with_ctx(|ctx, _| {
            let err = ctx.run_command("factorial", &args("4.5")).unwrap_err();
            assert!(matches!(
                err,
                ShellError::Arithmetic(ArithmeticError::FactorialDomain(_))
            ));
        });
    }

    #[test]
    fn divide_by_zero_is_reported() {
        with_ctx(|ctx, _| {
            let err = ctx.run_command("divide", &args("10 0")).unwrap_err();
            assert!(matches!(
                err,
                ShellError::Arithmetic(ArithmeticError::DivideByZero)
            ));
        });
    }

    #[test]
    fn operands_resolve_variables_and_result() {
        with_ctx(|ctx, _| {
            ctx.state.vars.set("#x", TypedValue::Number(4.0)).unwrap();
            ctx.state.set_last_result(TypedValue::Number(6.0));
            let value = ctx.run_command("add", &args("#x result")).unwrap();
            assert_eq!(value, TypedValue::Number(10.0));
        });
    }

    #[test]
    fn non_numeric_operand_fails() {
        with_ctx(|ctx, _| {
            let err = ctx.run_command("add", &args("2 pears")).unwrap_err();
            assert!(matches!(err, ShellError::TypeMismatch { .. }));
        });
    }
}
