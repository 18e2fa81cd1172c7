//! calc — free-form arithmetic over the restricted evaluator.
//!
//! The expression goes through a fixed substitution pipeline before
//! evaluation: nested command spans first (innermost spans whose head
//! token is a registered command; pure math parentheses are left
//! alone), then the `result` keyword, then `$`/`#` variables. The fully
//! substituted text must survive the evaluator's character whitelist.

use relsh_types::{DataType, TypedValue};

use crate::arith;
use crate::commands::{Category, Command, CommandSpec, ExecContext};
use crate::error::{ShellError, ShellResult};
use crate::resolve;
use crate::state::ShellState;

pub struct Calc;

impl Command for Calc {
    fn name(&self) -> &str {
        "calc"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("calc", Category::Math, "Evaluate an arithmetic expression")
            .usage("calc <expression>")
            .example("calc \"2 + 3 * 4\"")
            .example("calc \"(add 2 3) * 2\"")
            .example("calc $width * $height")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        if args.is_empty() {
            return Err(ShellError::Syntax("calc requires an expression".into()));
        }
        let joined = args.join(" ");
        let expr = resolve::unquote(&joined).unwrap_or(&joined).to_string();

        let expr = substitute_commands(expr, ctx)?;
        let expr = substitute_refs(&expr, ctx.state)?;
        let value = arith::eval_expression(&expr)?;
        Ok(TypedValue::Number(value))
    }
}

/// Replace every innermost parenthesized span whose head token is a
/// registered command with its numeric result, repeating until none
/// remain. Spans that are plain math are left untouched.
fn substitute_commands(mut expr: String, ctx: &mut ExecContext<'_>) -> ShellResult<String> {
    if expr.matches('(').count() != expr.matches(')').count() {
        return Err(ShellError::Syntax("unbalanced parentheses".into()));
    }

    let mut search_from = 0;
    while let Some(rel) = expr[search_from..].find(')') {
        let close = search_from + rel;
        let open = expr[..close]
            .rfind('(')
            .ok_or_else(|| ShellError::Syntax("unbalanced parentheses".into()))?;
        let inner = expr[open + 1..close].trim().to_string();
        let mut tokens = inner.split_whitespace().map(str::to_string);
        let head = tokens.next().unwrap_or_default().to_lowercase();

        if ctx.registry.contains(&head) {
            let args: Vec<String> = tokens.collect();
            let value = ctx.run_command(&head, &args)?;
            let number = value.as_number().ok_or(ShellError::TypeMismatch {
                expected: DataType::Number,
                actual: value.data_type(),
            })?;
            expr.replace_range(open..=close, &TypedValue::format_number(number));
            search_from = 0;
        } else {
            search_from = close + 1;
        }
    }
    Ok(expr)
}

/// Substitute the `result` keyword and `$`/`#` variable references with
/// their numeric values. A missing or non-numeric reference fails; any
/// other identifier is left for the charset check to reject.
fn substitute_refs(expr: &str, state: &ShellState) -> ShellResult<String> {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '$' || c == '#' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            let var = state
                .vars
                .get(&name)
                .ok_or_else(|| ShellError::Resolution(format!("unknown variable: {name}")))?;
            let number = var.value.as_number().ok_or(ShellError::TypeMismatch {
                expected: DataType::Number,
                actual: var.value.data_type(),
            })?;
            out.push_str(&TypedValue::format_number(number));
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if word.eq_ignore_ascii_case("result") {
                let number = match state.last_result() {
                    TypedValue::Number(n) => *n,
                    TypedValue::Null => {
                        return Err(ShellError::Resolution(
                            "no result available to reference".into(),
                        ))
                    }
                    other => {
                        return Err(ShellError::TypeMismatch {
                            expected: DataType::Number,
                            actual: other.data_type(),
                        })
                    }
                };
                out.push_str(&TypedValue::format_number(number));
            } else {
                out.push_str(&word);
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin::testutil::with_ctx;
    use crate::error::ArithmeticError;

    fn calc(ctx: &mut ExecContext<'_>, expr: &str) -> ShellResult<TypedValue> {
        ctx.run_command("calc", &[format!("\"{expr}\"")])
    }

    #[test]
    fn plain_precedence() {
        with_ctx(|ctx, _| {
            assert_eq!(
                calc(ctx, "2 + 3 * 4").unwrap(),
                TypedValue::Number(14.0)
            );
        });
    }

    #[test]
    fn nested_command_substitution() {
        with_ctx(|ctx, _| {
            assert_eq!(
                calc(ctx, "(add 2 3) * 2").unwrap(),
                TypedValue::Number(10.0)
            );
        });
    }

    #[test]
    fn math_parens_are_left_for_the_evaluator() {
        with_ctx(|ctx, _| {
            assert_eq!(
                calc(ctx, "(2 + 3) * 4").unwrap(),
                TypedValue::Number(20.0)
            );
        });
    }

    #[test]
    fn mixed_command_and_math_parens() {
        with_ctx(|ctx, _| {
            assert_eq!(
                calc(ctx, "(2 + 3) * (add 1 1)").unwrap(),
                TypedValue::Number(10.0)
            );
        });
    }

    #[test]
    fn caret_is_exponentiation() {
        with_ctx(|ctx, _| {
            assert_eq!(calc(ctx, "2 ^ 10").unwrap(), TypedValue::Number(1024.0));
        });
    }

    #[test]
    fn variables_substitute_numerically() {
        with_ctx(|ctx, _| {
            ctx.state.vars.set("$w", TypedValue::Number(3.0)).unwrap();
            ctx.state.vars.set("#h", TypedValue::Number(4.0)).unwrap();
            assert_eq!(calc(ctx, "$w * #h").unwrap(), TypedValue::Number(12.0));
        });
    }

    #[test]
    fn missing_variable_fails() {
        with_ctx(|ctx, _| {
            let err = calc(ctx, "$nope + 1").unwrap_err();
            assert!(matches!(err, ShellError::Resolution(_)));
        });
    }

    #[test]
    fn non_numeric_variable_fails() {
        with_ctx(|ctx, _| {
            ctx.state
                .vars
                .set("#s", TypedValue::Str("abc".into()))
                .unwrap();
            let err = calc(ctx, "#s + 1").unwrap_err();
            assert!(matches!(err, ShellError::TypeMismatch { .. }));
        });
    }

    #[test]
    fn result_substitutes_when_numeric() {
        with_ctx(|ctx, _| {
            ctx.state.set_last_result(TypedValue::Number(6.0));
            assert_eq!(calc(ctx, "result * 7").unwrap(), TypedValue::Number(42.0));
        });
    }

    #[test]
    fn division_by_zero_inside_calc() {
        with_ctx(|ctx, _| {
            let err = calc(ctx, "10/0").unwrap_err();
            assert!(matches!(
                err,
                ShellError::Arithmetic(ArithmeticError::DivideByZero)
            ));
        });
    }

    #[test]
    fn nested_failure_aborts_whole_expression() {
        with_ctx(|ctx, _| {
            let err = calc(ctx, "(divide 1 0) + 5").unwrap_err();
            assert!(matches!(
                err,
                ShellError::Arithmetic(ArithmeticError::DivideByZero)
            ));
        });
    }

    #[test]
    fn stray_identifiers_are_rejected() {
        with_ctx(|ctx, _| {
            let err = calc(ctx, "2 + bananas").unwrap_err();
            assert!(matches!(
                err,
                ShellError::Arithmetic(ArithmeticError::InvalidExpression(_))
            ));
        });
    }

    #[test]
    fn unbalanced_quoted_parens_rejected() {
        with_ctx(|ctx, _| {
            let err = calc(ctx, "(2 + 3").unwrap_err();
            assert!(matches!(err, ShellError::Syntax(_)));
        });
    }
}
